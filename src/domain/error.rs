use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Input,
    Io,
    Decode,
    Truncated,
    Fingerprint,
}

impl ErrorClass {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorClass::Input => 2,
            ErrorClass::Io => 3,
            ErrorClass::Decode => 4,
            ErrorClass::Truncated => 5,
            ErrorClass::Fingerprint => 6,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ErrorClass::Input => "INPUT",
            ErrorClass::Io => "IO",
            ErrorClass::Decode => "DECODE",
            ErrorClass::Truncated => "TRUNCATED",
            ErrorClass::Fingerprint => "FINGERPRINT",
        }
    }
}

#[derive(Debug, Error)]
#[error("error[{}]: {message}", .class.tag())]
pub struct CommentError {
    pub class: ErrorClass,
    pub message: String,
}

impl CommentError {
    pub fn new(class: ErrorClass, message: impl Into<String>) -> Self {
        Self { class, message: message.into() }
    }

    pub fn input(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Input, msg) }
    pub fn io(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Io, msg) }
    pub fn decode(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Decode, msg) }
    pub fn truncated(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Truncated, msg) }
    pub fn fingerprint(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Fingerprint, msg) }

    pub fn invalid_format_type(entry: &str) -> Self {
        Self::input(format!("invalid format type: {:?}", entry))
    }

    pub fn invalid_modifier(modifier: &str) -> Self {
        Self::input(format!("invalid format modifier: {:?}", modifier))
    }

    /// Prefixes the message with `context`, keeping the class.
    pub fn context(self, context: impl std::fmt::Display) -> Self {
        Self { class: self.class, message: format!("{}: {}", context, self.message) }
    }
}

impl From<std::io::Error> for CommentError {
    fn from(e: std::io::Error) -> Self {
        Self::io(e.to_string())
    }
}
