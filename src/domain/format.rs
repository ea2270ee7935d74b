use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    Invalid,
    Name,
    Version,
    Curve,
    Groups,
    NotAfter,
    Fingerprint,
    Networks,
    UnsafeNetworks,
    Json,
}

impl FormatType {
    pub const ALL: [FormatType; 9] = [
        FormatType::Name,
        FormatType::Version,
        FormatType::Curve,
        FormatType::Groups,
        FormatType::NotAfter,
        FormatType::Fingerprint,
        FormatType::Networks,
        FormatType::UnsafeNetworks,
        FormatType::Json,
    ];

    /// Case-insensitive lookup. Unknown tokens map to `Invalid`.
    pub fn parse(s: &str) -> FormatType {
        Self::ALL.into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .unwrap_or(FormatType::Invalid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatType::Invalid => "invalid",
            FormatType::Name => "name",
            FormatType::Version => "version",
            FormatType::Curve => "curve",
            FormatType::Groups => "groups",
            FormatType::NotAfter => "notAfter",
            FormatType::Fingerprint => "fingerprint",
            FormatType::Networks => "networks",
            FormatType::UnsafeNetworks => "unsafeNetworks",
            FormatType::Json => "json",
        }
    }

    pub fn is_valid(&self) -> bool {
        *self != FormatType::Invalid
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatEntry {
    pub kind: FormatType,
    pub exclude: String,
    pub omit_empty: bool,
}

impl FormatEntry {
    pub fn new(kind: FormatType) -> Self {
        Self { kind, exclude: String::new(), omit_empty: false }
    }

    pub fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    pub fn exclude(mut self, value: impl Into<String>) -> Self {
        self.exclude = value.into();
        self
    }

    /// An empty exclusion never suppresses anything.
    pub fn suppresses(&self, value: &str) -> bool {
        (self.omit_empty && value.is_empty()) || (!self.exclude.is_empty() && self.exclude == value)
    }
}
