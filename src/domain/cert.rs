use std::fmt;
use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Curve {
    #[default]
    Curve25519,
    P256,
}

impl Curve {
    pub fn from_code(code: i64) -> Option<Curve> {
        match code {
            0 => Some(Curve::Curve25519),
            1 => Some(Curve::P256),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Curve::Curve25519 => 0,
            Curve::P256 => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Curve::Curve25519 => "CURVE25519",
            Curve::P256 => "P256",
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An address plus prefix length, rendered as `addr/len`. The address is kept as given, not masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    pub addr: IpAddr,
    pub prefix_len: u8,
}

impl Network {
    pub fn new(addr: IpAddr, prefix_len: u8) -> Self {
        Self { addr, prefix_len }
    }

    pub fn join(networks: &[Network]) -> String {
        networks.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(",")
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn network_display() {
        let v4 = Network::new(IpAddr::V4(Ipv4Addr::new(10, 1, 0, 5)), 24);
        let v6 = Network::new(IpAddr::V6(Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 1)), 64);
        assert_eq!(v4.to_string(), "10.1.0.5/24");
        assert_eq!(Network::join(&[v4, v6]), "10.1.0.5/24,fd00::1/64");
        assert_eq!(Network::join(&[]), "");
    }

    #[test]
    fn curve_codes() {
        assert_eq!(Curve::from_code(0), Some(Curve::Curve25519));
        assert_eq!(Curve::from_code(1).map(|c| c.to_string()), Some("P256".to_string()));
        assert_eq!(Curve::from_code(7), None);
        assert_eq!(Curve::P256.code(), 1);
        assert_eq!(Curve::from_code(Curve::Curve25519.code().into()), Some(Curve::Curve25519));
    }
}
