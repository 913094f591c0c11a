use std::io::{BufRead, ErrorKind};
use std::path::Path;

use tracing::debug;

use crate::error::Error;
use crate::model::{Entry, EnvMap};

/// Parse env entries from UTF-8 text.
///
/// Blank lines, `#` comment lines and lines without `=` are skipped.
pub fn parse_str(input: &str) -> EnvMap {
    parse_str_with_source(input, None)
}

/// Parse env entries from UTF-8 bytes.
pub fn parse_bytes(input: &[u8]) -> Result<EnvMap, Error> {
    let text = std::str::from_utf8(input)?;
    Ok(parse_str(text))
}

/// Parse env entries from a buffered reader.
pub fn parse_reader<R: BufRead>(mut reader: R) -> Result<EnvMap, Error> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    parse_bytes(&buf)
}

/// Parse an env file from disk.
///
/// Returns `Ok(None)` when `path` does not exist. Every other read failure is
/// an error.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Option<EnvMap>, Error> {
    let path = path.as_ref();
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            debug!(path = %path.display(), "env file not found");
            return Ok(None);
        }
        Err(source) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let content = std::str::from_utf8(&bytes).map_err(|source| Error::InvalidEncoding {
        path: Some(path.to_path_buf()),
        source,
    })?;
    let map = parse_str_with_source(content, Some(path));
    debug!(path = %path.display(), keys = map.len(), "parsed env file");
    Ok(Some(map))
}

pub(crate) fn parse_str_with_source(input: &str, source: Option<&Path>) -> EnvMap {
    let mut map = EnvMap::new();
    let mut line_num = 0u32;

    for line in input.split('\n') {
        line_num = line_num.saturating_add(1);
        let Some((key, value)) = parse_line(line) else {
            continue;
        };

        map.insert(Entry {
            key: key.to_owned(),
            value: value.to_owned(),
            source: source.map(Path::to_path_buf),
            line: line_num,
        });
    }

    map
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let working = trim(line);
    if working.is_empty() || working.starts_with('#') {
        return None;
    }

    let (key, value) = working.split_once('=')?;
    let key = trim(key);
    if key.is_empty() {
        return None;
    }

    Some((key, strip_quotes(trim(value))))
}

// A byte-order mark counts as whitespace.
fn trim(text: &str) -> &str {
    text.trim_matches(|ch: char| ch.is_whitespace() || ch == '\u{feff}')
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() < 2 {
        return value;
    }

    let first = bytes[0];
    if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_values_and_comments() {
        let input = "A=1\nB = 2\n# skip\nC=hello # not a comment\nD=\n";
        let parsed = parse_str(input);

        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed.get("A"), Some("1"));
        assert_eq!(parsed.get("B"), Some("2"));
        assert_eq!(parsed.get("C"), Some("hello # not a comment"));
        assert_eq!(parsed.get("D"), Some(""));
    }

    #[test]
    fn trims_whitespace_around_key_and_value() {
        let parsed = parse_str("   SPACED   =   some value  \n\tTABBED\t=\tx\t\n");

        assert_eq!(parsed.get("SPACED"), Some("some value"));
        assert_eq!(parsed.get("TABBED"), Some("x"));
    }

    #[test]
    fn indented_comment_is_skipped() {
        let parsed = parse_str("   # A=1\nB=2\n");

        assert!(!parsed.contains_key("# A"));
        assert_eq!(parsed.keys().collect::<Vec<_>>(), vec!["B"]);
    }

    #[test]
    fn splits_on_first_equals_only() {
        let parsed = parse_str("URL=postgres://u:p@host/db?sslmode=require\n");

        assert_eq!(
            parsed.get("URL"),
            Some("postgres://u:p@host/db?sslmode=require")
        );
    }

    #[test]
    fn lines_without_equals_are_dropped() {
        let parsed = parse_str("JUST_A_WORD\nexport\nA=1\n");

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get("A"), Some("1"));
    }

    #[test]
    fn lines_with_empty_key_are_dropped() {
        let parsed = parse_str("=orphan\n  = also\nA=1\n");

        assert_eq!(parsed.len(), 1);
        assert!(!parsed.contains_key(""));
    }

    #[test]
    fn strips_a_single_layer_of_matching_quotes() {
        let input = "D=\"a'b\"\nS='\"x\"'\nM=\"abc'\nN=\"\"\nQ='\n";
        let parsed = parse_str(input);

        assert_eq!(parsed.get("D"), Some("a'b"));
        assert_eq!(parsed.get("S"), Some("\"x\""));
        assert_eq!(parsed.get("M"), Some("\"abc'"));
        assert_eq!(parsed.get("N"), Some(""));
        assert_eq!(parsed.get("Q"), Some("'"));
    }

    #[test]
    fn quoted_values_keep_inner_whitespace_and_backslashes() {
        let parsed = parse_str("A=\"  padded  \"\nB='C:\\\\Temp\\n'\n");

        assert_eq!(parsed.get("A"), Some("  padded  "));
        assert_eq!(parsed.get("B"), Some("C:\\\\Temp\\n"));
    }

    #[test]
    fn duplicate_keys_keep_last() {
        let parsed = parse_str("A=1\nA=2\n");

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get("A"), Some("2"));
        assert_eq!(parsed.entry("A").map(|entry| entry.line), Some(2));
    }

    #[test]
    fn byte_order_mark_is_not_part_of_the_first_key() {
        let parsed = parse_str("\u{feff}PORT=3000\nNAME=x\n");

        assert_eq!(parsed.keys().collect::<Vec<_>>(), vec!["PORT", "NAME"]);
        assert_eq!(parsed.get("PORT"), Some("3000"));
    }

    #[test]
    fn byte_order_mark_before_comment_still_skips_line() {
        let parsed = parse_str("\u{feff}# header\nA=1\n");

        assert_eq!(parsed.keys().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(parsed.entry("A").map(|entry| entry.line), Some(2));
    }

    #[test]
    fn parses_crlf_input() {
        let parsed = parse_str("A=1\r\nB=\"two\"\r\n");

        assert_eq!(parsed.get("A"), Some("1"));
        assert_eq!(parsed.get("B"), Some("two"));
    }

    #[test]
    fn parses_unicode_values() {
        let parsed = parse_str("GREETING=こんにちは\n");

        assert_eq!(parsed.get("GREETING"), Some("こんにちは"));
    }

    #[test]
    fn records_line_numbers() {
        let parsed = parse_str("# header\n\nA=1\nskip\nB=2");

        let lines: Vec<_> = parsed.entries().iter().map(|entry| entry.line).collect();
        assert_eq!(lines, vec![3, 5]);
    }

    #[test]
    fn parse_bytes_rejects_invalid_utf8() {
        let err = parse_bytes(&[b'A', b'=', 0x80]).expect_err("expected encoding error");
        assert!(matches!(err, Error::InvalidEncoding { path: None, .. }));
    }

    #[test]
    fn parse_reader_reads_to_end() {
        let reader = std::io::Cursor::new("KEY=1\nOTHER='two'\n");
        let parsed = parse_reader(reader).expect("parse should succeed");

        assert_eq!(parsed.get("KEY"), Some("1"));
        assert_eq!(parsed.get("OTHER"), Some("two"));
    }
}
