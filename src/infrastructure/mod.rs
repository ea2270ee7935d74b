mod diff;
mod fs;
mod nebula;
mod nebula_v1;
mod nebula_v2;

pub use diff::UnifiedDiffRenderer;
pub use fs::WalkdirFileSystem;
pub use nebula::{NebulaCert, NebulaDecoder, PEM_LABEL_V1, PEM_LABEL_V2};
pub use nebula_v1::{RawNebulaCertificate, RawNebulaCertificateDetails};
