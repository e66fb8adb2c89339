//! Scene source support.
//!
//! This module parses the line-oriented scene description format into
//! frame and object definitions, and writes definitions back out.
//!
//! ## Statements
//!
//! - `FRAME <name>` followed by `description:` and `transform:` JSON literals
//! - `OBJECT <name>` followed by `frame:`, `format:` and a `data: {` ... `}` block
//!
//! Blank lines and `#` comments may appear between statements and between
//! fields. Inside a `data` block every line is kept verbatim.
//!
//! # Example
//!
//! ```ignore
//! use calscene_core::source::parse_source;
//!
//! let definitions = parse_source(&text)?;
//! for definition in &definitions {
//!     println!("{}", definition.name());
//! }
//! ```

mod cursor;
mod types;
mod parser;
mod writer;

pub use cursor::*;
pub use types::*;
pub use parser::*;
pub use writer::*;
