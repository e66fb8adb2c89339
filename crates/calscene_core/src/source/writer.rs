//! Scene source writer.
//!
//! Renders definitions back into the statement syntax accepted by the
//! parser. Output re-parses to equal definitions; values that could not
//! survive that trip are rejected instead of written.

use thiserror::Error;

use super::types::*;

/// Errors that can occur while writing scene source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WriteError {
    #[error("Invalid statement name: '{0}'")]
    InvalidName(String),

    #[error("Object '{object}' has an invalid frame reference: '{frame}'")]
    InvalidFrameReference { object: String, frame: String },

    #[error("Object '{object}' data line {line} would close the data block early")]
    ReservedDataLine { object: String, line: usize },

    #[error("Object '{object}' data line {line} ends with a carriage return")]
    CarriageReturn { object: String, line: usize },
}

/// Result type for writing operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// Render definitions as scene source, one blank line between statements.
pub fn write_source(definitions: &[Definition]) -> WriteResult<String> {
    let mut out = String::new();

    for (i, definition) in definitions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match definition {
            Definition::Frame(frame) => write_frame(&mut out, frame)?,
            Definition::Object(object) => write_object(&mut out, object)?,
        }
    }

    Ok(out)
}

fn check_name(name: &str) -> WriteResult<()> {
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(WriteError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn write_frame(out: &mut String, frame: &FrameDefinition) -> WriteResult<()> {
    check_name(&frame.name)?;

    out.push_str(&format!("FRAME {}\n", frame.name));
    out.push_str(&format!("description: {}\n", frame.description.to_json()));
    out.push_str(&format!("transform: {}\n", frame.transform.to_json()));
    Ok(())
}

fn write_object(out: &mut String, object: &SceneObjectDefinition) -> WriteResult<()> {
    check_name(&object.name)?;

    let frame = &object.frame;
    if frame.trim() != frame.as_str() || frame.contains(|c: char| c == '\n' || c == '\r') {
        return Err(WriteError::InvalidFrameReference {
            object: object.name.clone(),
            frame: frame.clone(),
        });
    }

    if let Some((line, text)) = first_unwritable_line(&object.data) {
        let object = object.name.clone();
        return Err(if text.ends_with('\r') {
            WriteError::CarriageReturn { object, line }
        } else {
            WriteError::ReservedDataLine { object, line }
        });
    }

    out.push_str(&format!("OBJECT {}\n", object.name));
    out.push_str(&format!("frame: {}\n", frame));
    out.push_str(&format!("format: {}\n", object.format));
    out.push_str("data: {\n");
    if !object.data.is_empty() {
        out.push_str(&object.data);
        out.push('\n');
    }
    out.push_str("}\n");
    Ok(())
}

/// First data line (1-based) that would not read back unchanged. A line
/// trimming to `}` ends the block, and a trailing `\r` is lost when the
/// written `\r\n` is split back into lines.
fn first_unwritable_line(data: &str) -> Option<(usize, &str)> {
    data.split('\n')
        .enumerate()
        .find(|(_, line)| line.trim() == "}" || line.ends_with('\r'))
        .map(|(i, line)| (i + 1, line))
}

/// True if every line of `data` can sit inside a data block.
pub fn is_writable_data(data: &str) -> bool {
    first_unwritable_line(data).is_none()
}
