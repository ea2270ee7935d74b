use chrono::{DateTime, Utc};
use crate::domain::{CommentError, Curve, Network};

pub trait Certificate {
    fn name(&self) -> &str;
    fn version(&self) -> u8;
    fn curve(&self) -> Curve;
    fn groups(&self) -> &[String];
    fn not_after(&self) -> DateTime<Utc>;
    fn networks(&self) -> &[Network];
    fn unsafe_networks(&self) -> &[Network];
    fn fingerprint(&self) -> Result<String, CommentError>;
    fn to_json(&self) -> Result<String, CommentError>;
}

/// Turns the bytes of one cert block, markers included and padding removed, into a certificate.
pub trait CertificateDecoder {
    type Cert: Certificate;

    fn decode(&self, block: &[u8]) -> Result<Self::Cert, CommentError>;
}
