use std::net::IpAddr;
use chrono::{DateTime, TimeZone, Utc};
use crate::domain::{CommentError, Curve, Marker, Network};
use crate::ports::{Certificate, CertificateDecoder};

#[derive(Debug, Clone)]
pub struct FakeCert {
    pub name: String,
    pub version: u8,
    pub groups: Vec<String>,
    pub networks: Vec<Network>,
    pub not_after: DateTime<Utc>,
    pub fingerprint: Option<String>,
}

impl FakeCert {
    pub const FINGERPRINT: &'static str = "4d1e7a0c94b1f3a2e65d2c8f0b7a9e31c5d6f8a0b2c4d6e8f0a1b3c5d7e9f1a3";

    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: 1,
            groups: Vec::new(),
            networks: Vec::new(),
            not_after: Utc.with_ymd_and_hms(2026, 6, 11, 17, 30, 0).unwrap(),
            fingerprint: Some(Self::FINGERPRINT.to_string()),
        }
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn with_groups(mut self, groups: &[&str]) -> Self {
        self.groups = groups.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn with_networks(mut self, networks: &[&str]) -> Self {
        self.networks = networks.iter().map(|n| parse_network(n)).collect();
        self
    }

    pub fn without_fingerprint(mut self) -> Self {
        self.fingerprint = None;
        self
    }
}

fn parse_network(s: &str) -> Network {
    let (addr, len) = s.split_once('/').unwrap();
    Network::new(addr.parse::<IpAddr>().unwrap(), len.parse().unwrap())
}

impl Certificate for FakeCert {
    fn name(&self) -> &str { &self.name }
    fn version(&self) -> u8 { self.version }
    fn curve(&self) -> Curve { Curve::Curve25519 }
    fn groups(&self) -> &[String] { &self.groups }
    fn not_after(&self) -> DateTime<Utc> { self.not_after }
    fn networks(&self) -> &[Network] { &self.networks }
    fn unsafe_networks(&self) -> &[Network] { &[] }

    fn fingerprint(&self) -> Result<String, CommentError> {
        self.fingerprint.clone().ok_or_else(|| CommentError::fingerprint("no digest"))
    }

    fn to_json(&self) -> Result<String, CommentError> {
        Ok(serde_json::json!({ "name": self.name }).to_string())
    }
}

/// Reads `key: value` lines between markers. Any indentation left in the block is rejected.
pub struct FakeDecoder;

impl CertificateDecoder for FakeDecoder {
    type Cert = FakeCert;

    fn decode(&self, block: &[u8]) -> Result<FakeCert, CommentError> {
        let text = std::str::from_utf8(block).map_err(|e| CommentError::decode(e.to_string()))?;
        let lines: Vec<&str> = text.lines().collect();
        let (first, last) = match (lines.first(), lines.last()) {
            (Some(f), Some(l)) if lines.len() >= 2 => (*f, *l),
            _ => return Err(CommentError::decode("block too short")),
        };
        let marker = Marker::match_begin(first.as_bytes()).ok_or_else(|| CommentError::decode("missing BEGIN"))?;
        if !marker.is_end(last.as_bytes()) {
            return Err(CommentError::decode("missing END"));
        }

        let mut cert = FakeCert::new("");
        for line in &lines[1..lines.len() - 1] {
            let (key, value) = line.split_once(": ").ok_or_else(|| CommentError::decode(format!("bad line {:?}", line)))?;
            match key {
                "name" => cert.name = value.to_string(),
                "version" => cert.version = value.parse().map_err(|_| CommentError::decode("bad version"))?,
                "groups" => cert.groups = value.split(',').map(str::to_string).collect(),
                "networks" => cert.networks = value.split(',').map(parse_network).collect(),
                "fingerprint" if value == "none" => cert.fingerprint = None,
                _ => return Err(CommentError::decode(format!("bad line {:?}", line))),
            }
        }
        Ok(cert)
    }
}
