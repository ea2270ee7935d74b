use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use der::{Encode, Reader, SliceReader, Tag};
use crate::domain::{CommentError, Curve, Network};
use super::nebula::{timestamp, NebulaCert};

const CERT_DETAILS: u8 = 0;
const CERT_CURVE: u8 = 1;
const CERT_PUBLIC_KEY: u8 = 2;
const CERT_SIGNATURE: u8 = 3;

const DETAILS_NAME: u8 = 0;
const DETAILS_NETWORKS: u8 = 1;
const DETAILS_UNSAFE_NETWORKS: u8 = 2;
const DETAILS_GROUPS: u8 = 3;
const DETAILS_IS_CA: u8 = 4;
const DETAILS_NOT_BEFORE: u8 = 5;
const DETAILS_NOT_AFTER: u8 = 6;
const DETAILS_ISSUER: u8 = 7;

#[derive(Default)]
struct Details {
    name: Option<String>,
    networks: Vec<Network>,
    unsafe_networks: Vec<Network>,
    groups: Vec<String>,
    is_ca: bool,
    not_before: Option<u64>,
    not_after: Option<u64>,
    issuer: Vec<u8>,
}

/// The fingerprint covers the encoded details element, one curve byte, the public key and the signature.
pub fn parse_certificate(der: &[u8]) -> Result<NebulaCert, CommentError> {
    let mut outer = reader(der)?;
    let cert = next_element(&mut outer)?;
    if cert.tag != Tag::Sequence {
        return Err(CommentError::decode(format!("expected SEQUENCE, found {}", cert.tag)));
    }
    if !outer.is_finished() {
        return Err(CommentError::decode("trailing data after certificate"));
    }

    let mut details = None;
    let mut raw_details = Vec::new();
    let mut curve = Curve::Curve25519;
    let mut public_key = None;
    let mut signature = None;

    let mut fields = reader(cert.value)?;
    while !fields.is_finished() {
        let field = next_element(&mut fields)?;
        match context_number(field.tag) {
            Some(CERT_DETAILS) => {
                details = Some(parse_details(field.value)?);
                raw_details = field.to_der();
            }
            Some(CERT_CURVE) => {
                curve = Curve::from_code(unsigned(field.value)? as i64)
                    .ok_or_else(|| CommentError::decode("unknown curve"))?;
            }
            Some(CERT_PUBLIC_KEY) => public_key = Some(field.value.to_vec()),
            Some(CERT_SIGNATURE) => signature = Some(field.value.to_vec()),
            _ => return Err(CommentError::decode(format!("unexpected certificate field {}", field.tag))),
        }
    }

    let details = details.ok_or_else(|| CommentError::decode("missing details"))?;
    let not_before = details.not_before.ok_or_else(|| CommentError::decode("missing notBefore"))?;
    let not_after = details.not_after.ok_or_else(|| CommentError::decode("missing notAfter"))?;
    let public_key = public_key.ok_or_else(|| CommentError::decode("missing public key"))?;
    let signature = signature.ok_or_else(|| CommentError::decode("missing signature"))?;

    let mut digest_input = raw_details;
    digest_input.push(curve.code());
    digest_input.extend_from_slice(&public_key);
    digest_input.extend_from_slice(&signature);

    Ok(NebulaCert {
        version: 2,
        name: details.name.ok_or_else(|| CommentError::decode("missing name"))?,
        networks: details.networks,
        unsafe_networks: details.unsafe_networks,
        groups: details.groups,
        is_ca: details.is_ca,
        not_before: timestamp(seconds(not_before)?)?,
        not_after: timestamp(seconds(not_after)?)?,
        public_key,
        issuer: details.issuer,
        curve,
        signature,
        digest_input,
    })
}

fn parse_details(body: &[u8]) -> Result<Details, CommentError> {
    let mut details = Details::default();
    let mut fields = reader(body)?;

    while !fields.is_finished() {
        let field = next_element(&mut fields)?;
        let value = field.value;
        match context_number(field.tag) {
            Some(DETAILS_NAME) => details.name = Some(utf8(value)?),
            Some(DETAILS_NETWORKS) => details.networks = parse_networks(value)?,
            Some(DETAILS_UNSAFE_NETWORKS) => details.unsafe_networks = parse_networks(value)?,
            Some(DETAILS_GROUPS) => {
                let mut groups = reader(value)?;
                while !groups.is_finished() {
                    let group = next_element(&mut groups)?;
                    if group.tag != Tag::Utf8String {
                        return Err(CommentError::decode(format!("expected UTF8String group, found {}", group.tag)));
                    }
                    details.groups.push(utf8(group.value)?);
                }
            }
            Some(DETAILS_IS_CA) => details.is_ca = value == [0xff],
            Some(DETAILS_NOT_BEFORE) => details.not_before = Some(unsigned(value)?),
            Some(DETAILS_NOT_AFTER) => details.not_after = Some(unsigned(value)?),
            Some(DETAILS_ISSUER) => details.issuer = value.to_vec(),
            _ => return Err(CommentError::decode(format!("unexpected details field {}", field.tag))),
        }
    }
    Ok(details)
}

fn parse_networks(body: &[u8]) -> Result<Vec<Network>, CommentError> {
    let mut networks = Vec::new();
    let mut items = reader(body)?;
    while !items.is_finished() {
        let item = next_element(&mut items)?;
        if item.tag != Tag::OctetString {
            return Err(CommentError::decode(format!("expected OCTET STRING network, found {}", item.tag)));
        }
        networks.push(network(item.value)?);
    }
    Ok(networks)
}

/// Address bytes followed by one prefix length byte.
fn network(value: &[u8]) -> Result<Network, CommentError> {
    let (addr, bits, max) = match value.len() {
        5 => {
            let octets: [u8; 4] = value[..4].try_into().map_err(|_| CommentError::decode("invalid network"))?;
            (IpAddr::V4(Ipv4Addr::from(octets)), value[4], 32)
        }
        17 => {
            let octets: [u8; 16] = value[..16].try_into().map_err(|_| CommentError::decode("invalid network"))?;
            (IpAddr::V6(Ipv6Addr::from(octets)), value[16], 128)
        }
        n => return Err(CommentError::decode(format!("invalid network length {}", n))),
    };
    if bits > max {
        return Err(CommentError::decode(format!("invalid prefix length {}", bits)));
    }
    Ok(Network::new(addr, bits))
}

fn reader(bytes: &[u8]) -> Result<SliceReader<'_>, CommentError> {
    SliceReader::new(bytes).map_err(der_error)
}

struct Element<'a> {
    tag: Tag,
    header: &'a [u8],
    value: &'a [u8],
}

impl Element<'_> {
    fn to_der(&self) -> Vec<u8> {
        [self.header, self.value].concat()
    }
}

fn next_element<'a>(reader: &mut SliceReader<'a>) -> Result<Element<'a>, CommentError> {
    let header = reader.peek_header().map_err(der_error)?;
    let header_len = header.encoded_len().map_err(der_error)?;
    let header_bytes = reader.read_slice(header_len).map_err(der_error)?;
    let value = reader.read_slice(header.length).map_err(der_error)?;
    Ok(Element { tag: header.tag, header: header_bytes, value })
}

fn context_number(tag: Tag) -> Option<u8> {
    match tag {
        Tag::ContextSpecific { number, .. } => Some(number.value()),
        _ => None,
    }
}

/// Big-endian unsigned INTEGER content, allowing one leading zero byte.
fn unsigned(value: &[u8]) -> Result<u64, CommentError> {
    let value = match value {
        [0, rest @ ..] if !rest.is_empty() => rest,
        _ => value,
    };
    if value.is_empty() || value.len() > 8 {
        return Err(CommentError::decode("invalid integer"));
    }
    Ok(value.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

fn seconds(value: u64) -> Result<i64, CommentError> {
    i64::try_from(value).map_err(|_| CommentError::decode(format!("timestamp out of range: {}", value)))
}

fn utf8(value: &[u8]) -> Result<String, CommentError> {
    String::from_utf8(value.to_vec()).map_err(|e| CommentError::decode(format!("invalid UTF-8: {}", e)))
}

fn der_error(e: der::Error) -> CommentError {
    CommentError::decode(format!("failed to parse v2 certificate: {}", e))
}
