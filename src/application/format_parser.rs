use crate::domain::{CommentError, FormatEntry, FormatType};

pub const DEFAULT_FORMAT: &str = "name,version:!=1,groups:?,networks:?,unsafeNetworks:?,notAfter,fingerprint";

pub fn parse_format_entries(format: &str) -> Result<Vec<FormatEntry>, CommentError> {
    format.split(',').map(parse_format_entry).collect()
}

pub fn parse_format_entry(entry: &str) -> Result<FormatEntry, CommentError> {
    let mut parts = entry.split(':');
    let kind = FormatType::parse(parts.next().unwrap_or_default());
    if !kind.is_valid() {
        return Err(CommentError::invalid_format_type(entry));
    }

    let mut fe = FormatEntry::new(kind);
    for modifier in parts {
        if modifier == "?" {
            fe.omit_empty = true;
        } else if let Some(value) = modifier.strip_prefix("!=") {
            fe.exclude = value.to_string();
        } else {
            return Err(CommentError::invalid_modifier(modifier));
        }
    }
    Ok(fe)
}
