//! Wavefront OBJ subset parser.
//!
//! Only vertex positions and triangular faces are understood:
//!
//! ```text
//! # comment
//! v 0 0 0
//! v 1 0 0
//! v 0 1 0
//! f 1 2 3
//! ```
//!
//! Faces are resolved immediately, so the result holds a flat triangle list
//! (9 floats per face) next to the declared vertices.
//!
//! Lines are recognised by their first character. Any line starting with `v`
//! is read as a vertex, so `vn 0 0 1` declares a vertex and `vt 0 0` fails
//! for having two coordinates.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during Wavefront parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObjError {
    /// Coordinates must be three numbers that fit in an `f32`.
    #[error("Invalid vertex at line {line} ({reason}): {text}")]
    InvalidVertex {
        line: usize,
        reason: &'static str,
        text: String,
    },

    #[error("Only triangular faces are supported; line {line} has {count} indices: {text}")]
    NonTriangularFace {
        line: usize,
        count: usize,
        text: String,
    },

    #[error("Invalid vertex index '{index}' at line {line} ({vertex_count} vertices declared): {text}")]
    InvalidVertexIndex {
        line: usize,
        index: String,
        vertex_count: usize,
        text: String,
    },

    #[error("Invalid source line {line}: {text}")]
    InvalidLine { line: usize, text: String },
}

impl ObjError {
    /// 1-based line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ObjError::InvalidVertex { line, .. }
            | ObjError::NonTriangularFace { line, .. }
            | ObjError::InvalidVertexIndex { line, .. }
            | ObjError::InvalidLine { line, .. } => *line,
        }
    }
}

/// Result type for Wavefront parsing.
pub type ObjResult<T> = Result<T, ObjError>;

/// Vertices and flattened triangles parsed from Wavefront text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WavefrontMesh {
    /// Declared vertex positions, in source order
    pub vertices: Vec<Vec3>,

    /// Triangle corners as x, y, z floats; every 9 values form one face
    pub mesh: Vec<f32>,
}

impl WavefrontMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.len() / 9
    }

    /// Iterate over faces as three corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.mesh.chunks_exact(9).map(|c| {
            [
                Vec3::new(c[0], c[1], c[2]),
                Vec3::new(c[3], c[4], c[5]),
                Vec3::new(c[6], c[7], c[8]),
            ]
        })
    }
}

/// Wavefront subset parser. Single use: [`WavefrontParser::parse`] consumes it.
pub struct WavefrontParser<'a> {
    content: &'a str,
}

impl<'a> WavefrontParser<'a> {
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    /// Parse all lines in one pass.
    pub fn parse(self) -> ObjResult<WavefrontMesh> {
        let mut result = WavefrontMesh::default();

        for (i, raw) in self.content.lines().enumerate() {
            let line = i + 1;
            let text = raw.trim();

            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            // The tag is the first character; its token carries no data
            let fields = text.split_whitespace().skip(1);
            if text.starts_with('v') {
                let vertex = parse_vertex(fields).map_err(|reason| ObjError::InvalidVertex {
                    line,
                    reason,
                    text: text.to_string(),
                })?;
                result.vertices.push(vertex);
            } else if text.starts_with('f') {
                let indices: Vec<&str> = fields.collect();
                if indices.len() != 3 {
                    return Err(ObjError::NonTriangularFace {
                        line,
                        count: indices.len(),
                        text: text.to_string(),
                    });
                }

                for index in indices {
                    let vertex = resolve_index(index, &result.vertices).ok_or_else(|| {
                        ObjError::InvalidVertexIndex {
                            line,
                            index: index.to_string(),
                            vertex_count: result.vertices.len(),
                            text: text.to_string(),
                        }
                    })?;
                    result.mesh.extend_from_slice(&vertex.to_array());
                }
            } else {
                return Err(ObjError::InvalidLine {
                    line,
                    text: text.to_string(),
                });
            }
        }

        Ok(result)
    }
}

/// Exactly three numbers within `f32` range.
fn parse_vertex<'a>(mut fields: impl Iterator<Item = &'a str>) -> Result<Vec3, &'static str> {
    let mut coords = [0.0f32; 3];
    for coord in &mut coords {
        let value = fields
            .next()
            .ok_or("expected 3 coordinates")?
            .parse::<f64>()
            .map_err(|_| "coordinate is not a number")?;
        if !value.is_finite() {
            return Err("coordinate is not finite");
        }
        if value.abs() > f32::MAX as f64 {
            return Err("coordinate is outside f32 range");
        }
        *coord = value as f32;
    }

    if fields.next().is_some() {
        return Err("expected 3 coordinates");
    }
    Ok(Vec3::from_array(coords))
}

/// Resolve a 1-based index to a declared vertex. `v/vt/vn` forms use the
/// position index.
fn resolve_index(token: &str, vertices: &[Vec3]) -> Option<Vec3> {
    let position = token.split('/').next()?;
    let index = position.parse::<usize>().ok()?;
    index.checked_sub(1).and_then(|i| vertices.get(i)).copied()
}

/// Parse Wavefront subset text.
pub fn parse_wavefront(content: &str) -> ObjResult<WavefrontMesh> {
    WavefrontParser::new(content).parse()
}
