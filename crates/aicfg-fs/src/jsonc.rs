//! Reading of JSON-with-comments configuration documents
//!
//! `ai.json` permits `//` and `/* */` comments. Comments are blanked out
//! (replaced with spaces, newlines preserved) before handing the text to
//! serde_json, so parse error locations still point at the original text.

use crate::{Error, Result};
use serde_json::{Map, Value};

/// Strip `//` and `/* */` comments from JSON text.
///
/// Comment markers inside string literals are left alone. Stripped
/// characters are replaced with spaces so byte offsets, lines and columns
/// are preserved for error reporting.
pub fn strip_comments(text: &str) -> String {
    enum State {
        Normal,
        InString,
        InLineComment,
        InBlockComment,
    }

    let mut out = String::with_capacity(text.len());
    let mut state = State::Normal;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Normal => match c {
                '"' => {
                    state = State::InString;
                    out.push(c);
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::InLineComment;
                    out.push_str("  ");
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::InBlockComment;
                    out.push_str("  ");
                }
                _ => out.push(c),
            },
            State::InString => match c {
                '\\' => {
                    out.push(c);
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => {
                    state = State::Normal;
                    out.push(c);
                }
                _ => out.push(c),
            },
            State::InLineComment => {
                if c == '\n' {
                    state = State::Normal;
                    out.push(c);
                } else {
                    out.push(' ');
                }
            }
            State::InBlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Normal;
                    out.push_str("  ");
                } else if c == '\n' {
                    out.push(c);
                } else {
                    out.push(' ');
                }
            }
        }
    }

    out
}

/// Parse JSON-with-comments text into a plain object tree.
///
/// `origin` identifies where the text came from (file path or URL) and is
/// carried in parse errors. The top level must be a JSON object; no schema
/// validation happens here.
pub fn parse_document(text: &str, origin: &str) -> Result<Map<String, Value>> {
    let stripped = strip_comments(text);
    let value: Value = serde_json::from_str(&stripped).map_err(|e| Error::Parse {
        origin: origin.to_string(),
        message: e.to_string(),
        line: e.line(),
        column: e.column(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Error::NotAnObject {
            origin: origin.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_comments_stripped() {
        let text = "{\n  // the schema pointer\n  \"$schema\": \"x\"\n}";
        let doc = parse_document(text, "ai.json").unwrap();
        assert_eq!(doc["$schema"], "x");
    }

    #[test]
    fn test_block_comments_stripped() {
        let text = "{ /* inline */ \"skills\": { /* multi\nline */ } }";
        let doc = parse_document(text, "ai.json").unwrap();
        assert!(doc["skills"].is_object());
    }

    #[test]
    fn test_comment_markers_inside_strings_preserved() {
        let text = r#"{ "url": "https://example.com/a", "note": "a /* b */ c" }"#;
        let doc = parse_document(text, "ai.json").unwrap();
        assert_eq!(doc["url"], "https://example.com/a");
        assert_eq!(doc["note"], "a /* b */ c");
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let text = r#"{ "k": "quote \" // not a comment" }"#;
        let doc = parse_document(text, "ai.json").unwrap();
        assert_eq!(doc["k"], "quote \" // not a comment");
    }

    #[test]
    fn test_parse_error_carries_origin_and_location() {
        let err = parse_document("{ \"a\": }", "/tmp/bad.json").unwrap_err();
        match err {
            Error::Parse { origin, line, .. } => {
                assert_eq!(origin, "/tmp/bad.json");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_object_rejected() {
        let err = parse_document("[1, 2]", "ai.json").unwrap_err();
        assert!(matches!(err, Error::NotAnObject { .. }));
    }

    #[test]
    fn test_stripping_preserves_offsets() {
        let text = "{\n// comment\n\"a\": 1,\n}";
        let stripped = strip_comments(text);
        assert_eq!(stripped.lines().count(), text.lines().count());
        // trailing comma still fails, pointing at the original line
        let err = parse_document(text, "ai.json").unwrap_err();
        match err {
            Error::Parse { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }
    }
}
