use crate::domain::{CommentError, FormatEntry, FormatType, Network};
use crate::ports::Certificate;

/// Renders every entry in order. The result has no comment prefix and no trailing newline.
pub fn render_annotation<C: Certificate + ?Sized>(cert: &C, entries: &[FormatEntry]) -> Result<String, CommentError> {
    let mut out = String::new();
    for entry in entries {
        if let Some(field) = format_entry(cert, entry)? {
            out.push_str(&field);
        }
    }
    Ok(out)
}

/// One field with its leading space, or `None` when the entry suppresses its value.
pub fn format_entry<C: Certificate + ?Sized>(cert: &C, entry: &FormatEntry) -> Result<Option<String>, CommentError> {
    let value = field_value(cert, entry.kind)?;
    if entry.suppresses(&value) {
        return Ok(None);
    }

    let field = match entry.kind {
        FormatType::Json => format!(" {}", value),
        kind if needs_quotes(&value) => format!(" {}={}", kind, quote(&value)),
        kind => format!(" {}={}", kind, value),
    };
    Ok(Some(field))
}

pub fn field_value<C: Certificate + ?Sized>(cert: &C, kind: FormatType) -> Result<String, CommentError> {
    match kind {
        FormatType::Name => Ok(cert.name().to_string()),
        FormatType::Version => Ok(cert.version().to_string()),
        FormatType::Curve => Ok(cert.curve().to_string()),
        FormatType::Groups => Ok(cert.groups().join(",")),
        FormatType::NotAfter => Ok(cert.not_after().format("%Y-%m-%d").to_string()),
        FormatType::Fingerprint => cert.fingerprint(),
        FormatType::Networks => Ok(Network::join(cert.networks())),
        FormatType::UnsafeNetworks => Ok(Network::join(cert.unsafe_networks())),
        FormatType::Json => cert.to_json(),
        FormatType::Invalid => Err(CommentError::input(format!("invalid type: {}", kind))),
    }
}

/// Bare values may only contain ASCII letters, digits, `-`, `:` and `_`.
pub fn needs_quotes(value: &str) -> bool {
    !value.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'_'))
}

/// Double-quoted with Go `strconv.Quote` escapes: `\xNN` below space and for DEL,
/// `\uNNNN` / `\UNNNNNNNN` for other non-printing characters.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            c if c < ' ' || c == '\u{7f}' => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if is_printable(c) => out.push(c),
            c if (c as u32) < 0x10000 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push_str(&format!("\\U{:08x}", c as u32)),
        }
    }
    out.push('"');
    out
}

/// Graphic characters plus ASCII space. Other spaces, controls, format characters and private use are not.
fn is_printable(c: char) -> bool {
    if c.is_ascii() {
        return (' '..='~').contains(&c);
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(c as u32,
        0xad | 0x600..=0x605 | 0x61c | 0x6dd | 0x70f | 0x180e
        | 0x200b..=0x200f | 0x202a..=0x202e | 0x2060..=0x206f
        | 0xe000..=0xf8ff | 0xfeff | 0xfff9..=0xfffb
        | 0xf0000..=0x10ffff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::format_parser::{parse_format_entries, DEFAULT_FORMAT};
    use crate::application::testing::FakeCert;
    use crate::domain::ErrorClass;

    fn render(cert: &FakeCert, format: &str) -> String {
        render_annotation(cert, &parse_format_entries(format).unwrap()).unwrap()
    }

    #[test]
    fn default_format_for_simple_ca() {
        let cert = FakeCert::new("My CA").with_groups(&["dev"]);
        assert_eq!(
            render(&cert, DEFAULT_FORMAT),
            format!(" name=\"My CA\" groups=dev notAfter=2026-06-11 fingerprint={}", FakeCert::FINGERPRINT)
        );
    }

    #[test]
    fn field_order_follows_format() {
        let cert = FakeCert::new("host").with_groups(&["a"]);
        assert_eq!(render(&cert, "groups,name,version"), " groups=a name=host version=1");
        assert_eq!(render(&cert, "version,name,groups"), " version=1 name=host groups=a");
    }

    #[test]
    fn omit_empty_drops_the_whole_field() {
        let cert = FakeCert::new("host");
        assert_eq!(render(&cert, "name,groups:?"), " name=host");
        assert_eq!(render(&cert, "name,groups"), " name=host groups=");
    }

    #[test]
    fn exclusion_only_matches_exact_value() {
        let v1 = FakeCert::new("host");
        let v2 = FakeCert::new("host").with_version(2);
        assert_eq!(render(&v1, "version:!=1"), "");
        assert_eq!(render(&v2, "version:!=1"), " version=2");
        assert_eq!(render(&v1, "curve:!=P256"), " curve=CURVE25519");
    }

    #[test]
    fn empty_exclusion_keeps_empty_value() {
        let cert = FakeCert::new("host");
        assert_eq!(render(&cert, "groups:!="), " groups=");
    }

    #[test]
    fn quoting_rules() {
        let cert = FakeCert::new("host").with_groups(&["ops team", "dev"]);
        assert_eq!(render(&cert, "groups"), " groups=\"ops team,dev\"");
        assert_eq!(render(&cert, "fingerprint"), format!(" fingerprint={}", FakeCert::FINGERPRINT));
        assert_eq!(render(&FakeCert::new("say \"hi\""), "name"), " name=\"say \\\"hi\\\"\"");
        assert!(needs_quotes("a,b"));
        assert!(needs_quotes("10.0.0.1/24"));
        assert!(!needs_quotes("2026-06-11"));
        assert!(!needs_quotes(""));
        assert!(needs_quotes("héllo"));
    }

    #[test]
    fn quoting_uses_go_escapes() {
        assert_eq!(quote("ops team"), "\"ops team\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote("tab\there\n"), "\"tab\\there\\n\"");
        assert_eq!(quote("\u{0}\u{1}\u{7f}"), "\"\\x00\\x01\\x7f\"");
        assert_eq!(quote("\u{7}\u{b}"), "\"\\a\\v\"");
        assert_eq!(quote("héllo ☃"), "\"héllo ☃\"");
        assert_eq!(quote("a\u{a0}b\u{200b}"), "\"a\\u00a0b\\u200b\"");
        assert_eq!(quote("\u{f0000}"), "\"\\U000f0000\"");
        assert_eq!(render(&FakeCert::new("del\u{7f}"), "name"), " name=\"del\\x7f\"");
    }

    #[test]
    fn networks_are_joined_and_quoted() {
        let cert = FakeCert::new("host").with_networks(&["10.1.0.1/24", "10.2.0.1/16"]);
        assert_eq!(render(&cert, "networks,unsafeNetworks:?"), " networks=\"10.1.0.1/24,10.2.0.1/16\"");
    }

    #[test]
    fn json_is_emitted_raw() {
        let cert = FakeCert::new("host");
        assert_eq!(render(&cert, "name,json"), " name=host {\"name\":\"host\"}");
    }

    #[test]
    fn fingerprint_failure_aborts_render() {
        let cert = FakeCert::new("host").without_fingerprint();
        let entries = parse_format_entries("name,fingerprint").unwrap();
        let err = render_annotation(&cert, &entries).unwrap_err();
        assert_eq!(err.class, ErrorClass::Fingerprint);
    }

    #[test]
    fn invalid_entry_is_rejected() {
        let cert = FakeCert::new("host");
        let err = format_entry(&cert, &FormatEntry::new(FormatType::Invalid)).unwrap_err();
        assert_eq!(err.class, ErrorClass::Input);
    }
}
