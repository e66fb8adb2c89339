//! Object payload decoding.
//!
//! The parser stores object `data` untouched. Decoding happens here, with a
//! [`PayloadDecoder`] picked from the object's [`DataFormat`] when the
//! payload is actually needed.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::source::{DataFormat, SceneObjectDefinition};
use crate::wavefront::{parse_wavefront, ObjError, WavefrontMesh};

/// Errors that can occur while decoding an object payload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("OBJ payload: {0}")]
    Obj(#[from] ObjError),

    #[error("BASE64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Result type for payload decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// A decoded object payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Geometry from an OBJ payload
    Mesh(WavefrontMesh),

    /// Raw bytes from a BASE64 payload
    Bytes(Vec<u8>),
}

impl Payload {
    pub fn as_mesh(&self) -> Option<&WavefrontMesh> {
        match self {
            Payload::Mesh(mesh) => Some(mesh),
            Payload::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Bytes(bytes) => Some(bytes.as_slice()),
            Payload::Mesh(_) => None,
        }
    }
}

/// Decodes the raw `data` text of one payload format.
pub trait PayloadDecoder {
    /// The format this decoder accepts.
    fn format(&self) -> DataFormat;

    fn decode(&self, data: &str) -> DecodeResult<Payload>;
}

/// Wavefront OBJ subset text to mesh.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjDecoder;

impl PayloadDecoder for ObjDecoder {
    fn format(&self) -> DataFormat {
        DataFormat::Obj
    }

    fn decode(&self, data: &str) -> DecodeResult<Payload> {
        Ok(Payload::Mesh(parse_wavefront(data)?))
    }
}

/// Standard base64 to bytes. Whitespace (including line breaks) is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct Base64Decoder;

impl PayloadDecoder for Base64Decoder {
    fn format(&self) -> DataFormat {
        DataFormat::Base64
    }

    fn decode(&self, data: &str) -> DecodeResult<Payload> {
        let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
        Ok(Payload::Bytes(STANDARD.decode(compact)?))
    }
}

impl DataFormat {
    /// Decoder for payloads in this format.
    pub fn decoder(&self) -> &'static dyn PayloadDecoder {
        match self {
            DataFormat::Obj => &ObjDecoder,
            DataFormat::Base64 => &Base64Decoder,
        }
    }
}

impl SceneObjectDefinition {
    /// Decode `data` according to `format`.
    pub fn decode(&self) -> DecodeResult<Payload> {
        log::debug!(
            "Decoding {} payload of object {} ({} bytes)",
            self.format,
            self.name,
            self.data.len()
        );
        self.format.decoder().decode(&self.data)
    }
}
