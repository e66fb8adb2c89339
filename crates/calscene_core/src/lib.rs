//! calscene core - scene-description and Wavefront-subset parsers.
//!
//! This crate provides:
//!
//! - **Scene source parsing**: `FRAME` and `OBJECT` statements into
//!   [`FrameDefinition`] and [`SceneObjectDefinition`] values
//! - **Wavefront parsing**: `v`/`f` lines into a flattened triangle mesh
//! - **Payload decoding**: OBJ text or BASE64 object data, selected by format
//! - **Scene index**: frame/object lookup and reference checks after parsing
//!
//! # Example
//!
//! ```ignore
//! use calscene_core::{parse_source, Scene};
//!
//! let definitions = parse_source(&text)?;
//! let scene = Scene::from_definitions("calibration", definitions);
//! println!("Parsed {} frames, {} objects",
//!     scene.frame_count(),
//!     scene.object_count());
//! ```

pub mod literal;
pub mod payload;
pub mod scene;
pub mod source;
pub mod wavefront;

// Re-export commonly used types
pub use literal::Literal;
pub use payload::{Base64Decoder, DecodeError, ObjDecoder, Payload, PayloadDecoder};
pub use scene::{Scene, SceneError};
pub use source::{
    parse_source, write_source, DataFormat, Definition, FrameDefinition, ParseError,
    SceneObjectDefinition, SourceParser,
};
pub use wavefront::{parse_wavefront, ObjError, WavefrontMesh, WavefrontParser};
