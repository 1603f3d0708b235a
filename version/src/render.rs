//! Canonical text form of a metadata document.
//!
//! Keys sorted at every level, 4-space indentation, `": "` between key and
//! value, every character outside printable ASCII escaped as lowercase
//! `\uXXXX`, and `\n` line endings with no trailing whitespace or final
//! newline. Numbers are written back exactly as they were read.

use std::io;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::ser::Formatter;
use serde_json::ser::PrettyFormatter;

const INDENT: &[u8] = b"    ";

/// Render `value` in canonical form.
///
/// ```
/// use html_report_version::to_canonical_json;
///
/// let value = serde_json::json!({"version": "1.0.4", "name": "x"});
/// assert_eq!(
///     to_canonical_json(&value)?,
///     "{\n    \"name\": \"x\",\n    \"version\": \"1.0.4\"\n}"
/// );
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn to_canonical_json(value: &Value) -> serde_json::Result<String> {
    let sorted = sorted(value);
    let mut ser = serde_json::Serializer::with_formatter(Vec::new(), CanonicalFormatter::new());
    sorted.serialize(&mut ser)?;
    let text = String::from_utf8(ser.into_inner())
        .map_err(|e| serde_json::Error::io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    Ok(normalize_line_endings(&text))
}

pub(crate) fn object_to_canonical_json(fields: &Map<String, Value>) -> serde_json::Result<String> {
    to_canonical_json(&Value::Object(fields.clone()))
}

/// Strip trailing whitespace from every line and join the lines with `\n`.
///
/// Both `\n` and `\r\n` separate lines; a lone `\r` at the end of a line is
/// whitespace and is dropped with it.
pub fn normalize_line_endings(text: &str) -> String {
    text.split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by_key(|(key, _)| *key);
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), sorted(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

const PRINTABLE_ASCII: std::ops::RangeInclusive<char> = ' '..='~';

/// Pretty printer that also escapes every character outside printable ASCII.
struct CanonicalFormatter {
    pretty: PrettyFormatter<'static>,
}

impl CanonicalFormatter {
    fn new() -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(INDENT),
        }
    }
}

impl Formatter for CanonicalFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        if fragment.chars().all(|ch| PRINTABLE_ASCII.contains(&ch)) {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if PRINTABLE_ASCII.contains(&ch) {
                writer.write_all(&[ch as u8])?;
                continue;
            }
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn sorts_keys_and_indents_four_spaces() {
        let value = json!({"version": "1.0.3", "name": "x", "id": "html-report"});
        let text = to_canonical_json(&value).unwrap();
        assert_eq!(
            text,
            "{\n    \"id\": \"html-report\",\n    \"name\": \"x\",\n    \"version\": \"1.0.3\"\n}"
        );
    }

    #[test]
    fn sorts_nested_objects() {
        let value = json!({
            "install": {"windows": [], "linux": ["a", "b"]},
            "description": "d",
        });
        let expected = r#"{
    "description": "d",
    "install": {
        "linux": [
            "a",
            "b"
        ],
        "windows": []
    }
}"#;
        assert_eq!(to_canonical_json(&value).unwrap(), expected);
    }

    #[test]
    fn empty_containers_stay_on_one_line() {
        let value = json!({"a": {}, "b": []});
        assert_eq!(
            to_canonical_json(&value).unwrap(),
            "{\n    \"a\": {},\n    \"b\": []\n}"
        );
    }

    #[test]
    fn escapes_non_ascii() {
        let value = json!({"author": "Zoë", "logo": "🎉"});
        assert_eq!(
            to_canonical_json(&value).unwrap(),
            "{\n    \"author\": \"Zo\\u00eb\",\n    \"logo\": \"\\ud83c\\udf89\"\n}"
        );
    }

    #[test]
    fn escapes_delete_character() {
        let value = json!({"name": "a\u{7f}b"});
        assert_eq!(
            to_canonical_json(&value).unwrap(),
            "{\n    \"name\": \"a\\u007fb\"\n}"
        );
    }

    #[test]
    fn numbers_keep_their_source_text() {
        let text = r#"{"big": 123456789012345678901234567890, "tiny": 1.0715660391465826e-75, "neg": -1.603964615428183e143, "one": 1.0}"#;
        let value: Value = serde_json::from_str(text).unwrap();
        assert_eq!(
            to_canonical_json(&value).unwrap(),
            "{\n    \"big\": 123456789012345678901234567890,\n    \"neg\": -1.603964615428183e143,\n    \"one\": 1.0,\n    \"tiny\": 1.0715660391465826e-75\n}"
        );
    }

    #[test]
    fn escaped_text_parses_back_to_the_same_value() {
        let value = json!({"author": "Zoë\n\"quoted\"", "n": 1.5, "ok": true, "none": null});
        let text = to_canonical_json(&value).unwrap();
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, value);
    }

    #[test]
    fn no_line_has_trailing_whitespace() {
        let value = json!({"a": [1, 2, {"b": "c"}], "d": "e"});
        let text = to_canonical_json(&value).unwrap();
        assert!(!text.ends_with('\n'));
        for line in text.lines() {
            assert_eq!(line, line.trim_end());
        }
    }

    #[test]
    fn normalize_handles_crlf_and_trailing_spaces() {
        assert_eq!(normalize_line_endings("a, \r\nb\t\r\nc"), "a,\nb\nc");
        assert_eq!(normalize_line_endings("a  \nb"), "a\nb");
        assert_eq!(normalize_line_endings("a\n"), "a\n");
        assert_eq!(normalize_line_endings(""), "");
    }
}
