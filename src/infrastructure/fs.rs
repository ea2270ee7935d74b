use std::fs;
use std::path::Path;
use walkdir::WalkDir;
use crate::domain::CommentError;
use crate::ports::{EntryKind, FileEntry, FileSystem};

/// Local disk. Symlinks are reported, never followed, including a symlinked root.
pub struct WalkdirFileSystem;

impl WalkdirFileSystem {
    pub fn new() -> Self { Self }
}

impl Default for WalkdirFileSystem {
    fn default() -> Self { Self::new() }
}

impl FileSystem for WalkdirFileSystem {
    fn walk(&self, root: &Path) -> Result<Vec<FileEntry>, CommentError> {
        let mut entries = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .follow_root_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| CommentError::io(e.to_string()))?;
            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            let kind = if file_type.is_symlink() {
                EntryKind::Symlink
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };
            let size = entry.metadata().map_err(|e| CommentError::io(format!("info {:?}: {}", entry.path(), e)))?.len();
            entries.push(FileEntry { path: entry.into_path(), kind, size });
        }
        Ok(entries)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, CommentError> {
        fs::read(path).map_err(|e| CommentError::io(format!("read: {}", e)))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), CommentError> {
        fs::write(path, contents).map_err(|e| CommentError::io(format!("write: {}", e)))
    }
}
