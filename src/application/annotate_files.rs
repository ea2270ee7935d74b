use std::io::Write;
use std::path::Path;
use tracing::debug;
use crate::domain::{CommentError, RunSummary};
use crate::ports::{CertificateDecoder, DiffRenderer, EntryKind, FileEntry, FileSystem};
use super::{Config, Scanner};

pub struct AnnotateFilesUseCase<F, D, R>
where
    F: FileSystem,
    D: CertificateDecoder,
    R: DiffRenderer,
{
    fs: F,
    decoder: D,
    diff: R,
    config: Config,
}

impl<F, D, R> AnnotateFilesUseCase<F, D, R>
where
    F: FileSystem,
    D: CertificateDecoder,
    R: DiffRenderer,
{
    pub fn new(fs: F, decoder: D, diff: R, config: Config) -> Self {
        Self { fs, decoder, diff, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Walks every root in order, stopping at the first error.
    pub fn execute<P: AsRef<Path>, W: Write>(&self, roots: &[P], out: &mut W) -> Result<RunSummary, CommentError> {
        let scanner = Scanner::new(&self.decoder, &self.config.comment_prefix, &self.config.entries);
        let mut summary = RunSummary::default();

        for root in roots {
            let root = root.as_ref();
            let entries = self.fs.walk(root).map_err(|e| e.context(format!("walk {:?}", root)))?;
            for entry in entries {
                if self.should_skip(&entry) {
                    summary.files_skipped += 1;
                    continue;
                }
                if self.process(&scanner, &entry.path, out).map_err(|e| e.context(format!("process {:?}", entry.path)))? {
                    summary.files_changed += 1;
                }
                summary.files_scanned += 1;
            }
        }

        Ok(summary)
    }

    fn should_skip(&self, entry: &FileEntry) -> bool {
        match entry.kind {
            EntryKind::Symlink => {
                debug!(path = %entry.path.display(), "skipping symlink");
                true
            }
            EntryKind::Other => {
                debug!(path = %entry.path.display(), "skipping non-regular file");
                true
            }
            EntryKind::File if self.config.exceeds_limit(entry.size) => {
                debug!(path = %entry.path.display(), size = entry.size, "skipping large file");
                true
            }
            EntryKind::File => false,
        }
    }

    fn process<W: Write>(&self, scanner: &Scanner<'_, D>, path: &Path, out: &mut W) -> Result<bool, CommentError> {
        debug!(path = %path.display(), "processing");
        let bytes = self.fs.read(path)?;
        let outcome = scanner.scan(bytes.as_slice())?;

        if outcome.binary {
            debug!(path = %path.display(), "skipping binary file");
            return Ok(false);
        }
        if !outcome.changed() {
            return Ok(false);
        }

        let display = path.display().to_string();
        if self.config.list {
            writeln!(out, "{}", display)?;
        }
        if self.config.diff {
            let rendered = self.diff.render(&format!("{}.orig", display), &outcome.source, &display, &outcome.output);
            out.write_all(rendered.as_bytes())?;
        }
        if self.config.write {
            self.fs.write(path, &outcome.output)?;
        }
        Ok(true)
    }
}
