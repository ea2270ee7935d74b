use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::{CommentError, Curve, Network};
use crate::ports::{Certificate, CertificateDecoder};
use super::{nebula_v1, nebula_v2};

pub const PEM_LABEL_V1: &str = "NEBULA CERTIFICATE";
pub const PEM_LABEL_V2: &str = "NEBULA CERTIFICATE V2";

/// A decoded v1 or v2 Nebula certificate. `digest_input` holds the bytes the fingerprint is taken over:
/// the whole encoded certificate for v1, details element plus curve, key and signature for v2.
#[derive(Debug, Clone)]
pub struct NebulaCert {
    pub version: u8,
    pub name: String,
    pub networks: Vec<Network>,
    pub unsafe_networks: Vec<Network>,
    pub groups: Vec<String>,
    pub is_ca: bool,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    pub public_key: Vec<u8>,
    pub issuer: Vec<u8>,
    pub curve: Curve,
    pub signature: Vec<u8>,
    pub digest_input: Vec<u8>,
}

/// v1 keeps curve and public key inside `details`, v2 moves them to the top level.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CertJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    curve: Option<&'static str>,
    details: DetailsJson<'a>,
    fingerprint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key: Option<String>,
    signature: String,
    version: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailsJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    curve: Option<&'static str>,
    groups: &'a [String],
    is_ca: bool,
    issuer: String,
    name: &'a str,
    networks: Vec<String>,
    not_after: DateTime<Utc>,
    not_before: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key: Option<String>,
    unsafe_networks: Vec<String>,
}

impl Certificate for NebulaCert {
    fn name(&self) -> &str { &self.name }
    fn version(&self) -> u8 { self.version }
    fn curve(&self) -> Curve { self.curve }
    fn groups(&self) -> &[String] { &self.groups }
    fn not_after(&self) -> DateTime<Utc> { self.not_after }
    fn networks(&self) -> &[Network] { &self.networks }
    fn unsafe_networks(&self) -> &[Network] { &self.unsafe_networks }

    fn fingerprint(&self) -> Result<String, CommentError> {
        if self.digest_input.is_empty() {
            return Err(CommentError::fingerprint("certificate has no encoded form"));
        }
        Ok(hex::encode(sha256(&self.digest_input)))
    }

    fn to_json(&self) -> Result<String, CommentError> {
        let public_key = hex::encode(&self.public_key);
        let (top, nested) = if self.version == 1 {
            ((None, None), (Some(self.curve.as_str()), Some(public_key)))
        } else {
            ((Some(self.curve.as_str()), Some(public_key)), (None, None))
        };
        let json = CertJson {
            curve: top.0,
            details: DetailsJson {
                curve: nested.0,
                groups: &self.groups,
                is_ca: self.is_ca,
                issuer: hex::encode(&self.issuer),
                name: &self.name,
                networks: self.networks.iter().map(|n| n.to_string()).collect(),
                not_after: self.not_after,
                not_before: self.not_before,
                public_key: nested.1,
                unsafe_networks: self.unsafe_networks.iter().map(|n| n.to_string()).collect(),
            },
            fingerprint: self.fingerprint()?,
            public_key: top.1,
            signature: hex::encode(&self.signature),
            version: self.version,
        };
        serde_json::to_string(&json).map_err(|e| CommentError::fingerprint(format!("failed to serialize certificate: {}", e)))
    }
}

pub struct NebulaDecoder;

impl NebulaDecoder {
    pub fn new() -> Self { Self }
}

impl Default for NebulaDecoder {
    fn default() -> Self { Self::new() }
}

impl CertificateDecoder for NebulaDecoder {
    type Cert = NebulaCert;

    fn decode(&self, block: &[u8]) -> Result<NebulaCert, CommentError> {
        let pem = pem::parse(block).map_err(|e| CommentError::decode(format!("failed to parse PEM: {}", e)))?;
        match pem.tag() {
            PEM_LABEL_V1 => nebula_v1::parse_certificate(pem.contents()),
            PEM_LABEL_V2 => nebula_v2::parse_certificate(pem.contents()),
            other => Err(CommentError::decode(format!("unexpected PEM label {:?}", other))),
        }
    }
}

pub(super) fn timestamp(secs: i64) -> Result<DateTime<Utc>, CommentError> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| CommentError::decode(format!("timestamp out of range: {}", secs)))
}

fn sha256(data: &[u8]) -> [u8; 32] {
    use ring::digest::{Context, SHA256};
    let mut ctx = Context::new(&SHA256);
    ctx.update(data);
    let d = ctx.finish();
    let mut out = [0u8; 32];
    out.copy_from_slice(d.as_ref());
    out
}
