//! Text and file boundary: parsing, rendering, loading and saving documents

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value as Json;
use tracing::debug;

use crate::error::{JsonTallyError, Result};
use crate::options::ReadOptions;
use crate::tracked::{TrackedArray, TrackedObject};
use crate::value::{Value, ValueKind};

/// Drop every line whose trimmed content starts with `//`.
///
/// Kept lines are copied verbatim, each followed by `\n`. Trailing comments
/// after JSON content on the same line are not touched.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        if line.trim_start().starts_with("//") {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Parse text whose top-level value must be an object.
pub fn parse_object(text: &str) -> Result<TrackedObject> {
    match serde_json::from_str::<Json>(text)? {
        Json::Object(map) => {
            debug!(keys = map.len(), "parsed JSON object");
            Ok(TrackedObject::from_json(&map))
        }
        other => Err(unexpected_root(ValueKind::Object, &other)),
    }
}

/// Parse text whose top-level value must be an array.
pub fn parse_array(text: &str) -> Result<TrackedArray> {
    match serde_json::from_str::<Json>(text)? {
        Json::Array(items) => {
            debug!(len = items.len(), "parsed JSON array");
            Ok(TrackedArray::from_json(&items))
        }
        other => Err(unexpected_root(ValueKind::Array, &other)),
    }
}

/// Load an object document from `path`.
///
/// # Errors
///
/// `Io` if the file cannot be read, `Malformed`/`UnexpectedRoot` if its
/// content is not a JSON object.
pub fn read_object_file(path: impl AsRef<Path>, options: &ReadOptions) -> Result<TrackedObject> {
    let path = path.as_ref();
    let text = read_text(path, options)?;
    parse_object(&text)
}

/// Load an array document from `path`. See [`read_object_file`].
pub fn read_array_file(path: impl AsRef<Path>, options: &ReadOptions) -> Result<TrackedArray> {
    let path = path.as_ref();
    let text = read_text(path, options)?;
    parse_array(&text)
}

/// Save `object` to `path`, pretty-printed when `indent > 0`.
///
/// The file ends with a newline. Reads are not counted.
pub fn write_file(path: impl AsRef<Path>, object: &TrackedObject, indent: usize) -> Result<()> {
    let path = path.as_ref();
    let mut text = object.to_json_string(indent)?;
    text.push('\n');
    fs::write(path, text).map_err(|source| JsonTallyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), keys = object.len(), indent, "wrote JSON file");
    Ok(())
}

impl TrackedObject {
    /// Parse a JSON object. See [`parse_object`].
    pub fn parse(text: &str) -> Result<Self> {
        parse_object(text)
    }

    /// Render as JSON text: compact for `indent == 0`, otherwise `indent`
    /// spaces per nesting level.
    pub fn to_json_string(&self, indent: usize) -> Result<String> {
        render(self, indent)
    }
}

impl TrackedArray {
    /// Parse a JSON array. See [`parse_array`].
    pub fn parse(text: &str) -> Result<Self> {
        parse_array(text)
    }

    /// Render as JSON text. See [`TrackedObject::to_json_string`].
    pub fn to_json_string(&self, indent: usize) -> Result<String> {
        render(self, indent)
    }
}

fn read_text(path: &Path, options: &ReadOptions) -> Result<String> {
    let raw = fs::read_to_string(path).map_err(|source| JsonTallyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        bytes = raw.len(),
        strip_comments = options.strip_comments,
        "read JSON file"
    );
    Ok(if options.strip_comments {
        strip_comments(&raw)
    } else {
        raw
    })
}

fn render<T: Serialize>(value: &T, indent: usize) -> Result<String> {
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }
    let spaces = " ".repeat(indent);
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(spaces.as_bytes()));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(out)?)
}

fn unexpected_root(expected: ValueKind, found: &Json) -> JsonTallyError {
    JsonTallyError::UnexpectedRoot {
        expected,
        found: Value::from(found).kind(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_strip_comments() {
        let text = "// header\n{\n  // inner\n  \"a\": 1, // kept\n    //indented\n}";
        assert_eq!(strip_comments(text), "{\n  \"a\": 1, // kept\n}\n");
        assert_eq!(strip_comments(""), "");
    }

    #[test]
    fn test_wrong_root_kind() {
        assert!(matches!(
            parse_object("[1, 2]"),
            Err(JsonTallyError::UnexpectedRoot {
                expected: ValueKind::Object,
                found: ValueKind::Array
            })
        ));
        assert!(matches!(
            parse_array("{}"),
            Err(JsonTallyError::UnexpectedRoot {
                expected: ValueKind::Array,
                found: ValueKind::Object
            })
        ));
        assert!(parse_object("\"text\"").unwrap_err().is_malformed());
    }

    #[test]
    fn test_invalid_text_is_malformed() {
        let err = parse_object("{\"a\": }").unwrap_err();
        assert!(matches!(err, JsonTallyError::Malformed(_)));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_comments_are_not_stripped_from_str() {
        assert!(parse_object("// note\n{}").is_err());
    }

    #[test]
    fn test_render_indent() {
        let obj = parse_object(r#"{"a": [1, 2.5], "b": {"c": null}}"#).unwrap();
        assert_eq!(obj.to_json_string(0).unwrap(), r#"{"a":[1,2.5],"b":{"c":null}}"#);
        assert_eq!(
            obj.to_json_string(2).unwrap(),
            "{\n  \"a\": [\n    1,\n    2.5\n  ],\n  \"b\": {\n    \"c\": null\n  }\n}"
        );
    }

    #[test]
    fn test_render_keeps_non_ascii_text() {
        let obj = parse_object(r#"{"name": "Récif ⚓", "note": "\u00e9"}"#).unwrap();
        assert_eq!(
            obj.to_json_string(1).unwrap(),
            "{\n \"name\": \"Récif ⚓\",\n \"note\": \"é\"\n}"
        );
    }

    #[test]
    fn test_key_order_survives_round_trip() {
        let text = r#"{"zeta":1,"alpha":2,"mid":3}"#;
        assert_eq!(parse_object(text).unwrap().to_json_string(0).unwrap(), text);
    }
}
