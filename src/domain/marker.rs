#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    V1,
    V2,
}

impl Marker {
    pub const ALL: [Marker; 2] = [Marker::V1, Marker::V2];

    pub fn begin(&self) -> &'static [u8] {
        match self {
            Marker::V1 => b"-----BEGIN NEBULA CERTIFICATE-----",
            Marker::V2 => b"-----BEGIN NEBULA CERTIFICATE V2-----",
        }
    }

    pub fn end(&self) -> &'static [u8] {
        match self {
            Marker::V1 => b"-----END NEBULA CERTIFICATE-----",
            Marker::V2 => b"-----END NEBULA CERTIFICATE V2-----",
        }
    }

    /// `trimmed` is the line with leading spaces and tabs already removed.
    pub fn match_begin(trimmed: &[u8]) -> Option<Marker> {
        Self::ALL.into_iter().find(|m| trimmed.starts_with(m.begin()))
    }

    pub fn is_end(&self, trimmed: &[u8]) -> bool {
        trimmed.starts_with(self.end())
    }
}
