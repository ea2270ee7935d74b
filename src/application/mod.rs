mod annotate_files;
mod config;
mod format_parser;
mod formatter;
mod scanner;
#[cfg(test)]
pub(crate) mod testing;

pub use annotate_files::AnnotateFilesUseCase;
pub use config::{Config, DEFAULT_COMMENT_PREFIX, DEFAULT_LARGE_FILE_LIMIT};
pub use format_parser::{parse_format_entries, parse_format_entry, DEFAULT_FORMAT};
pub use formatter::{field_value, format_entry, needs_quotes, quote, render_annotation};
pub use scanner::Scanner;
