use std::path::{Path, PathBuf};
use crate::domain::CommentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Symlink,
    Other,
}

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size: u64,
}

pub trait FileSystem {
    /// Every non-directory entry under `root` (or `root` itself), in lexical order.
    fn walk(&self, root: &Path) -> Result<Vec<FileEntry>, CommentError>;
    fn read(&self, path: &Path) -> Result<Vec<u8>, CommentError>;
    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), CommentError>;
}
