mod certificate;
mod diff;
mod fs;

pub use certificate::{Certificate, CertificateDecoder};
pub use diff::DiffRenderer;
pub use fs::{EntryKind, FileEntry, FileSystem};
