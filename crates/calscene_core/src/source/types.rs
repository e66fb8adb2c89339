//! Scene definition types produced by the source parser.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::literal::Literal;

/// A parsed scene statement, in source order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Definition {
    /// A `FRAME` statement
    Frame(FrameDefinition),

    /// An `OBJECT` statement
    Object(SceneObjectDefinition),
}

impl Definition {
    /// Statement name (frame or object name).
    pub fn name(&self) -> &str {
        match self {
            Definition::Frame(frame) => &frame.name,
            Definition::Object(object) => &object.name,
        }
    }

    pub fn as_frame(&self) -> Option<&FrameDefinition> {
        match self {
            Definition::Frame(frame) => Some(frame),
            Definition::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&SceneObjectDefinition> {
        match self {
            Definition::Object(object) => Some(object),
            Definition::Frame(_) => None,
        }
    }
}

/// A named coordinate frame.
/// Syntax:
/// ```text
/// FRAME lidar_top
/// description: "Roof lidar"
/// transform: [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 1.8], [0, 0, 0, 1]]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameDefinition {
    /// Frame name (never empty)
    pub name: String,

    /// Human-readable description, any JSON literal
    pub description: Literal,

    /// Transform as written, usually a matrix literal
    pub transform: Literal,
}

/// A named scene object anchored to a frame, carrying an opaque payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObjectDefinition {
    /// Object name (never empty)
    pub name: String,

    /// Name of the frame this object lives in. Not checked while parsing.
    pub frame: String,

    /// Encoding of `data`
    pub format: DataFormat,

    /// Raw payload lines joined with `\n`, uninterpreted
    pub data: String,
}

/// Payload encodings accepted in an object's `format:` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataFormat {
    /// Wavefront OBJ text
    #[serde(rename = "OBJ")]
    Obj,

    /// Base64-encoded bytes
    #[serde(rename = "BASE64")]
    Base64,
}

impl DataFormat {
    /// All accepted formats.
    pub const ALL: [DataFormat; 2] = [DataFormat::Obj, DataFormat::Base64];

    /// Keyword as written in source.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Obj => "OBJ",
            DataFormat::Base64 => "BASE64",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a `format:` keyword outside [`DataFormat::ALL`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl FromStr for DataFormat {
    type Err = UnknownFormat;

    /// Exact, case-sensitive keyword match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}
