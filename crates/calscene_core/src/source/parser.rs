//! Scene source parser.
//!
//! Line-by-line parsing of `FRAME` and `OBJECT` statements. The parser owns
//! a [`LineCursor`]; each statement parser borrows it, consumes exactly the
//! lines of its statement and hands it back.
//!
//! # Supported Syntax
//!
//! - `FRAME <name>` / `description: <json>` / `transform: <json>`
//! - `OBJECT <name>` / `frame: <name>` / `format: OBJ|BASE64` / `data: {` ... `}`

use thiserror::Error;

use super::cursor::{LineCursor, SourceLine};
use super::types::*;
use crate::literal::Literal;

/// Errors that can occur during scene source parsing.
///
/// Every variant carries the 1-based line number it refers to.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Expected {expected} at line {line}, found: {text}")]
    MalformedLine {
        line: usize,
        expected: &'static str,
        text: String,
    },

    #[error("Expected key '{expected}:' at line {line}, found: {text}")]
    UnexpectedKey {
        line: usize,
        expected: &'static str,
        text: String,
    },

    #[error("Invalid literal at line {line} ({message}): {text}")]
    InvalidLiteral {
        line: usize,
        message: String,
        text: String,
    },

    #[error("Line {line}: only OBJ, BASE64 formats are supported; found: '{text}'")]
    UnsupportedFormat { line: usize, text: String },

    #[error("Data block opened at line {line} is never closed: {text}")]
    UnterminatedBlock { line: usize, text: String },

    #[error("Cannot parse line {line}; expected a FRAME or OBJECT definition: {text}")]
    UnexpectedStatement { line: usize, text: String },

    #[error("Unexpected end of input after line {line}: expected {expected}")]
    EndOfInput { line: usize, expected: &'static str },
}

impl ParseError {
    /// 1-based line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::MalformedLine { line, .. }
            | ParseError::UnexpectedKey { line, .. }
            | ParseError::InvalidLiteral { line, .. }
            | ParseError::UnsupportedFormat { line, .. }
            | ParseError::UnterminatedBlock { line, .. }
            | ParseError::UnexpectedStatement { line, .. }
            | ParseError::EndOfInput { line, .. } => *line,
        }
    }

    /// Offending source text (empty for [`ParseError::EndOfInput`]).
    pub fn text(&self) -> &str {
        match self {
            ParseError::MalformedLine { text, .. }
            | ParseError::UnexpectedKey { text, .. }
            | ParseError::InvalidLiteral { text, .. }
            | ParseError::UnsupportedFormat { text, .. }
            | ParseError::UnterminatedBlock { text, .. }
            | ParseError::UnexpectedStatement { text, .. } => text.as_str(),
            ParseError::EndOfInput { .. } => "",
        }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A `key: value` line split at its first colon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyValue<'a> {
    /// The whole (trimmed) source line
    pub line: SourceLine<'a>,

    /// Text before the first colon, trailing whitespace removed
    pub key: &'a str,

    /// Everything after the first colon, untrimmed
    pub value: &'a str,
}

impl<'a> KeyValue<'a> {
    /// Decode the value as a JSON literal.
    pub fn decode_literal(&self) -> ParseResult<Literal> {
        Literal::parse(self.value).map_err(|e| ParseError::InvalidLiteral {
            line: self.line.number,
            message: e.to_string(),
            text: self.line.text.to_string(),
        })
    }
}

/// Scene source parser. Single use: [`SourceParser::parse`] consumes it.
pub struct SourceParser<'a> {
    cursor: LineCursor<'a>,
}

impl<'a> SourceParser<'a> {
    /// Create a new parser over source text.
    pub fn new(content: &'a str) -> Self {
        Self {
            cursor: LineCursor::new(content),
        }
    }

    /// Parse every statement and return the definitions in source order.
    pub fn parse(mut self) -> ParseResult<Vec<Definition>> {
        let mut definitions = Vec::new();

        while let Some(line) = self.cursor.peek() {
            if is_frame_header(line.text) {
                definitions.push(Definition::Frame(parse_frame(&mut self.cursor)?));
            } else if line.text.starts_with("OBJECT") {
                definitions.push(Definition::Object(parse_object(&mut self.cursor)?));
            } else {
                return Err(ParseError::UnexpectedStatement {
                    line: line.number,
                    text: line.text.to_string(),
                });
            }
        }

        Ok(definitions)
    }
}

/// `FRAME` followed by whitespace. A bare `FRAME` is not a frame header.
fn is_frame_header(text: &str) -> bool {
    text.strip_prefix("FRAME")
        .map_or(false, |rest| rest.starts_with(char::is_whitespace))
}

/// Consume the next significant line or fail with `EndOfInput`.
fn next_line<'a>(cursor: &mut LineCursor<'a>, expected: &'static str) -> ParseResult<SourceLine<'a>> {
    match cursor.next() {
        Some(line) => Ok(line),
        None => Err(ParseError::EndOfInput {
            line: cursor.line_number(),
            expected,
        }),
    }
}

/// Consume a `key: value` line, checking the key if one is expected.
pub fn parse_key_value<'a>(
    cursor: &mut LineCursor<'a>,
    expected_key: Option<&'static str>,
) -> ParseResult<KeyValue<'a>> {
    let line = next_line(cursor, expected_key.unwrap_or("\"key: value\""))?;

    let (key, value) = line.text.split_once(':').ok_or_else(|| ParseError::MalformedLine {
        line: line.number,
        expected: "\"key: value\"",
        text: line.text.to_string(),
    })?;
    let key = key.trim_end();

    if let Some(expected) = expected_key {
        if key != expected {
            return Err(ParseError::UnexpectedKey {
                line: line.number,
                expected,
                text: line.text.to_string(),
            });
        }
    }

    Ok(KeyValue { line, key, value })
}

/// Consume a statement header and return its name (the second token).
fn parse_header<'a>(cursor: &mut LineCursor<'a>, keyword: &'static str) -> ParseResult<&'a str> {
    let line = next_line(cursor, keyword)?;

    if !line.text.starts_with(keyword) {
        return Err(ParseError::MalformedLine {
            line: line.number,
            expected: keyword,
            text: line.text.to_string(),
        });
    }

    line.text
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| ParseError::MalformedLine {
            line: line.number,
            expected: "a statement name",
            text: line.text.to_string(),
        })
}

/// Parse a `FRAME <name>` statement with its `description` and `transform`.
pub fn parse_frame(cursor: &mut LineCursor<'_>) -> ParseResult<FrameDefinition> {
    let name = parse_header(cursor, "FRAME")?;
    let description = parse_key_value(cursor, Some("description"))?.decode_literal()?;
    let transform = parse_key_value(cursor, Some("transform"))?.decode_literal()?;

    Ok(FrameDefinition {
        name: name.to_string(),
        description,
        transform,
    })
}

/// Parse an `OBJECT <name>` statement including its raw data block.
pub fn parse_object(cursor: &mut LineCursor<'_>) -> ParseResult<SceneObjectDefinition> {
    let name = parse_header(cursor, "OBJECT")?;
    let frame = parse_key_value(cursor, Some("frame"))?.value.trim();

    let format_line = parse_key_value(cursor, Some("format"))?;
    let format = format_line
        .value
        .trim()
        .parse::<DataFormat>()
        .map_err(|unknown| ParseError::UnsupportedFormat {
            line: format_line.line.number,
            text: unknown.0,
        })?;

    let opener = parse_key_value(cursor, Some("data"))?;
    if opener.value.trim() != "{" {
        return Err(ParseError::MalformedLine {
            line: opener.line.number,
            expected: "delimiter '{' after data:",
            text: opener.line.text.to_string(),
        });
    }

    let data = read_data_block(cursor, opener.line)?;

    Ok(SceneObjectDefinition {
        name: name.to_string(),
        frame: frame.to_string(),
        format,
        data,
    })
}

/// Collect raw lines up to a line that trims to `}`. The closer is consumed
/// but not included.
fn read_data_block(cursor: &mut LineCursor<'_>, opener: SourceLine<'_>) -> ParseResult<String> {
    let mut lines = Vec::new();

    loop {
        match cursor.next_raw() {
            Some(line) if line.text.trim() == "}" => break,
            Some(line) => lines.push(line.text),
            None => {
                return Err(ParseError::UnterminatedBlock {
                    line: opener.number,
                    text: opener.text.to_string(),
                })
            }
        }
    }

    Ok(lines.join("\n"))
}

/// Parse scene source text and return the definitions in source order.
pub fn parse_source(content: &str) -> ParseResult<Vec<Definition>> {
    SourceParser::new(content).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
FRAME world
description: \"origin\"
transform: [1,0,0,0,0,1,0,0,0,0,1,0,0,0,0,1]

OBJECT cube
frame: world
format: OBJ
data: {
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
}
";

    fn identity() -> Literal {
        Literal::Array(
            [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1]
                .iter()
                .map(|&n| Literal::Number(n as f64))
                .collect(),
        )
    }

    #[test]
    fn test_parse_example() {
        let definitions = parse_source(EXAMPLE).unwrap();
        assert_eq!(definitions.len(), 2);

        assert_eq!(
            definitions[0],
            Definition::Frame(FrameDefinition {
                name: "world".to_string(),
                description: Literal::from("origin"),
                transform: identity(),
            })
        );

        assert_eq!(
            definitions[1],
            Definition::Object(SceneObjectDefinition {
                name: "cube".to_string(),
                frame: "world".to_string(),
                format: DataFormat::Obj,
                data: "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3".to_string(),
            })
        );
    }

    #[test]
    fn test_preserves_statement_order() {
        let source = "\
OBJECT a
frame: f
format: BASE64
data: {
}
FRAME f
description: null
transform: []
OBJECT b
frame: f
format: OBJ
data: {
}
";
        let names: Vec<String> = parse_source(source)
            .unwrap()
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "f", "b"]);
    }

    #[test]
    fn test_comments_between_fields_are_ignored() {
        let source = "\
# calibration scene

FRAME   world
  # the root frame
description: \"origin\"

   transform: [1,0,0,0,0,1,0,0,0,0,1,0,0,0,0,1]
# trailing comment
";
        let commented = parse_source(source).unwrap();
        let plain = parse_source(EXAMPLE).unwrap();
        assert_eq!(commented[0], plain[0]);
    }

    #[test]
    fn test_data_block_is_verbatim() {
        let source = "\
OBJECT mesh
  frame:   lidar
format:  OBJ
data:   {
# a comment inside data

    v 0 0 0
  }
";
        let definitions = parse_source(source).unwrap();
        let object = definitions[0].as_object().unwrap();

        assert_eq!(object.frame, "lidar");
        assert_eq!(object.format, DataFormat::Obj);
        assert_eq!(object.data, "# a comment inside data\n\n    v 0 0 0");
    }

    #[test]
    fn test_nested_literals_round_trip() {
        let source = r#"
FRAME cam_front
description: {"sensor": "camera", "tags": ["front", "hdr"], "meta": {"fps": 30, "ok": true}}
transform: [[1, 0, 0, 0.5], [0, 1, 0, 0], [0, 0, 1, 1.25], [0, 0, 0, 1]]
"#;
        let definitions = parse_source(source).unwrap();
        let frame = definitions[0].as_frame().unwrap();

        let expected = Literal::parse(
            r#"{"sensor": "camera", "tags": ["front", "hdr"], "meta": {"fps": 30, "ok": true}}"#,
        )
        .unwrap();
        assert_eq!(frame.description, expected);
        assert_eq!(frame.description.get("meta").and_then(|m| m.get("fps")), Some(&Literal::Number(30.0)));

        let rows = frame.transform.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2].as_array().unwrap()[3], Literal::Number(1.25));
    }

    #[test]
    fn test_value_keeps_extra_colons() {
        let source = "FRAME t\ndescription: \"12:30:00\"\ntransform : null\n";
        let definitions = parse_source(source).unwrap();
        let frame = definitions[0].as_frame().unwrap();

        assert_eq!(frame.description, Literal::from("12:30:00"));
        assert!(frame.transform.is_null());
    }

    #[test]
    fn test_unsupported_format() {
        let source = "OBJECT a\nframe: w\nformat:  PLY \ndata: {\n}\n";
        let err = parse_source(source).unwrap_err();

        assert_eq!(
            err,
            ParseError::UnsupportedFormat {
                line: 3,
                text: "PLY".to_string()
            }
        );
        assert!(err.to_string().contains("'PLY'"));
    }

    #[test]
    fn test_format_is_case_sensitive() {
        let source = "OBJECT a\nframe: w\nformat: obj\ndata: {\n}\n";
        assert!(matches!(
            parse_source(source),
            Err(ParseError::UnsupportedFormat { ref text, .. }) if text == "obj"
        ));
    }

    #[test]
    fn test_unterminated_block() {
        let source = "OBJECT a\nframe: w\nformat: OBJ\ndata: {\nv 0 0 0\n# }\n";
        let err = parse_source(source).unwrap_err();

        assert!(matches!(err, ParseError::UnterminatedBlock { line: 4, .. }));
        assert_eq!(err.text(), "data: {");
    }

    #[test]
    fn test_data_without_opening_brace() {
        let source = "OBJECT a\nframe: w\nformat: OBJ\ndata: {v 0 0 0}\n";
        let err = parse_source(source).unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line: 4, .. }));
    }

    #[test]
    fn test_frame_without_fields() {
        let source = "FRAME world\nOBJECT cube\nframe: world\n";
        let err = parse_source(source).unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line: 2, .. }));

        let source = "FRAME world\nframe: world\n";
        let err = parse_source(source).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedKey {
                line: 2,
                expected: "description",
                text: "frame: world".to_string()
            }
        );
    }

    #[test]
    fn test_frame_missing_transform() {
        let source = "FRAME world\ndescription: 1\nformat: OBJ\n";
        let err = parse_source(source).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedKey { line: 3, expected: "transform", .. }));
    }

    #[test]
    fn test_frame_at_end_of_input() {
        let err = parse_source("FRAME world\n\n# nothing else\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::EndOfInput {
                line: 3,
                expected: "description"
            }
        );
    }

    #[test]
    fn test_field_without_colon() {
        let err = parse_source("FRAME world\ndescription \"origin\"\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn test_invalid_literal() {
        let err = parse_source("FRAME world\ndescription: origin\ntransform: []\n").unwrap_err();

        match err {
            ParseError::InvalidLiteral { line, text, .. } => {
                assert_eq!(line, 2);
                assert_eq!(text, "description: origin");
            }
            other => panic!("Expected InvalidLiteral, got {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_statement() {
        let err = parse_source("\n# scene\nMESH thing\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedStatement {
                line: 3,
                text: "MESH thing".to_string()
            }
        );
    }

    #[test]
    fn test_bare_frame_keyword_is_not_a_statement() {
        let err = parse_source("FRAME\n").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedStatement { line: 1, .. }));
    }

    #[test]
    fn test_object_without_name() {
        let err = parse_source("OBJECT\nframe: w\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_source("").unwrap().is_empty());
        assert!(parse_source("\n  \n# only comments\n").unwrap().is_empty());
    }

    #[test]
    fn test_key_value_parser() {
        let mut cursor = LineCursor::new("  a:b : c  \nnocolon\n");

        let kv = parse_key_value(&mut cursor, None).unwrap();
        assert_eq!(kv.key, "a");
        assert_eq!(kv.value, "b : c");
        assert_eq!(kv.line.number, 1);

        let err = parse_key_value(&mut cursor, Some("x")).unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line: 2, .. }));

        let err = parse_key_value(&mut cursor, None).unwrap_err();
        assert!(matches!(err, ParseError::EndOfInput { line: 2, .. }));
    }
}
