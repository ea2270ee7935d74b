use std::net::{IpAddr, Ipv4Addr};
use prost::Message;
use crate::domain::{CommentError, Curve, Network};
use super::nebula::{timestamp, NebulaCert};

#[derive(Clone, PartialEq, Message)]
pub struct RawNebulaCertificate {
    #[prost(message, optional, tag = "1")]
    pub details: Option<RawNebulaCertificateDetails>,
    #[prost(bytes = "vec", tag = "2")]
    pub signature: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
pub struct RawNebulaCertificateDetails {
    #[prost(string, tag = "1")]
    pub name: String,
    /// Address and mask pairs.
    #[prost(uint32, repeated, tag = "2")]
    pub ips: Vec<u32>,
    #[prost(uint32, repeated, tag = "3")]
    pub subnets: Vec<u32>,
    #[prost(string, repeated, tag = "4")]
    pub groups: Vec<String>,
    #[prost(int64, tag = "5")]
    pub not_before: i64,
    #[prost(int64, tag = "6")]
    pub not_after: i64,
    #[prost(bytes = "vec", tag = "7")]
    pub public_key: Vec<u8>,
    #[prost(bool, tag = "8")]
    pub is_ca: bool,
    #[prost(bytes = "vec", tag = "9")]
    pub issuer: Vec<u8>,
    #[prost(int32, tag = "100")]
    pub curve: i32,
}

pub fn parse_certificate(der: &[u8]) -> Result<NebulaCert, CommentError> {
    let raw = RawNebulaCertificate::decode(der)
        .map_err(|e| CommentError::decode(format!("failed to parse v1 certificate: {}", e)))?;
    let details = raw.details.as_ref().ok_or_else(|| CommentError::decode("encoded details was nil"))?;

    let curve = Curve::from_code(details.curve.into())
        .ok_or_else(|| CommentError::decode(format!("unknown curve {}", details.curve)))?;

    Ok(NebulaCert {
        version: 1,
        name: details.name.clone(),
        networks: address_pairs(&details.ips, "ips")?,
        unsafe_networks: address_pairs(&details.subnets, "subnets")?,
        groups: details.groups.clone(),
        is_ca: details.is_ca,
        not_before: timestamp(details.not_before)?,
        not_after: timestamp(details.not_after)?,
        public_key: details.public_key.clone(),
        issuer: details.issuer.clone(),
        curve,
        signature: raw.signature.clone(),
        digest_input: raw.encode_to_vec(),
    })
}

fn address_pairs(values: &[u32], field: &str) -> Result<Vec<Network>, CommentError> {
    if values.len() % 2 != 0 {
        return Err(CommentError::decode(format!("encoded {} should be in pairs, an odd number was found", field)));
    }
    Ok(values.chunks_exact(2)
        .map(|pair| Network::new(IpAddr::V4(Ipv4Addr::from(pair[0])), pair[1].count_ones() as u8))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorClass;

    fn sample() -> RawNebulaCertificate {
        RawNebulaCertificate {
            details: Some(RawNebulaCertificateDetails {
                name: "host-1".to_string(),
                ips: vec![u32::from(Ipv4Addr::new(10, 1, 0, 5)), 0xffff_ff00],
                subnets: vec![u32::from(Ipv4Addr::new(192, 168, 0, 0)), 0xffff_0000],
                groups: vec!["dev".to_string(), "ssh".to_string()],
                not_before: 1_700_000_000,
                not_after: 1_781_136_000,
                public_key: vec![7; 32],
                is_ca: false,
                issuer: vec![0xaa, 0xbb],
                curve: 1,
            }),
            signature: vec![9; 64],
        }
    }

    #[test]
    fn decodes_fields() {
        let cert = parse_certificate(&sample().encode_to_vec()).unwrap();
        assert_eq!(cert.version, 1);
        assert_eq!(cert.name, "host-1");
        assert_eq!(Network::join(&cert.networks), "10.1.0.5/24");
        assert_eq!(Network::join(&cert.unsafe_networks), "192.168.0.0/16");
        assert_eq!(cert.groups, vec!["dev", "ssh"]);
        assert_eq!(cert.curve, Curve::P256);
        assert_eq!(cert.not_after.format("%Y-%m-%d").to_string(), "2026-06-11");
        assert_eq!(cert.digest_input, sample().encode_to_vec());
    }

    #[test]
    fn odd_address_list_is_rejected() {
        let mut raw = sample();
        if let Some(d) = raw.details.as_mut() {
            d.ips.pop();
        }
        let err = parse_certificate(&raw.encode_to_vec()).unwrap_err();
        assert_eq!(err.class, ErrorClass::Decode);
        assert!(err.message.contains("ips"));
    }

    #[test]
    fn missing_details_is_rejected() {
        let raw = RawNebulaCertificate { details: None, signature: vec![1] };
        assert!(parse_certificate(&raw.encode_to_vec()).is_err());
    }

    #[test]
    fn unknown_curve_is_rejected() {
        let mut raw = sample();
        if let Some(d) = raw.details.as_mut() {
            d.curve = 5;
        }
        assert!(parse_certificate(&raw.encode_to_vec()).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_certificate(&[0xff, 0xff, 0xff]).is_err());
    }
}
