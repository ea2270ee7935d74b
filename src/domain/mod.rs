mod cert;
mod error;
mod format;
mod marker;
mod outcome;

pub use cert::{Curve, Network};
pub use error::{ErrorClass, CommentError};
pub use format::{FormatType, FormatEntry};
pub use marker::Marker;
pub use outcome::{ScanOutcome, RunSummary};
