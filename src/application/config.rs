use crate::domain::{CommentError, FormatEntry, RunSummary};
use super::format_parser::{parse_format_entries, DEFAULT_FORMAT};

pub const DEFAULT_COMMENT_PREFIX: &str = "# nebula:";
pub const DEFAULT_LARGE_FILE_LIMIT: u64 = 10 * 1000 * 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub diff: bool,
    pub write: bool,
    pub list: bool,
    pub exit_on_change: bool,
    /// Files larger than this many bytes are skipped. Zero disables the check.
    pub large_file_limit: u64,
    pub comment_prefix: String,
    pub format: String,
    pub entries: Vec<FormatEntry>,
}

impl Config {
    pub fn with_format(mut self, format: &str) -> Result<Self, CommentError> {
        self.entries = parse_format_entries(format)?;
        self.format = format.to_string();
        Ok(self)
    }

    /// An empty prefix would match every line and strip the whole file.
    pub fn with_comment_prefix(mut self, prefix: impl Into<String>) -> Result<Self, CommentError> {
        let prefix = prefix.into();
        if prefix.trim_start_matches([' ', '\t']).is_empty() {
            return Err(CommentError::input("comment prefix must not be empty"));
        }
        self.comment_prefix = prefix;
        Ok(self)
    }

    pub fn with_large_file_limit(mut self, limit: u64) -> Self {
        self.large_file_limit = limit;
        self
    }

    pub fn with_modes(mut self, diff: bool, write: bool, list: bool) -> Self {
        self.diff = diff;
        self.write = write;
        self.list = list;
        self.normalize_modes()
    }

    pub fn with_exit_on_change(mut self, exit: bool) -> Self {
        self.exit_on_change = exit;
        self
    }

    /// With no output mode selected, diff is assumed.
    pub fn normalize_modes(mut self) -> Self {
        if !self.diff && !self.write && !self.list {
            self.diff = true;
        }
        self
    }

    /// True when `-e` was given and the run changed, or would change, a file.
    pub fn exit_on(&self, summary: &RunSummary) -> bool {
        self.exit_on_change && summary.changed()
    }

    pub fn exceeds_limit(&self, size: u64) -> bool {
        self.large_file_limit > 0 && size > self.large_file_limit
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            diff: true,
            write: false,
            list: false,
            exit_on_change: false,
            large_file_limit: DEFAULT_LARGE_FILE_LIMIT,
            comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            entries: parse_format_entries(DEFAULT_FORMAT).unwrap_or_default(),
        }
    }
}
