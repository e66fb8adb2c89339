//! Line cursor over scene source text.
//!
//! The cursor hands out trimmed significant lines (skipping blank lines and
//! `#` comments) and, for data blocks, raw physical lines.

/// A single source line with its 1-based line number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number in the source text
    pub number: usize,

    /// Line content (trimmed for significant lines, verbatim for raw lines)
    pub text: &'a str,
}

impl<'a> SourceLine<'a> {
    /// True for blank lines and `#` comment lines.
    pub fn is_ignorable(text: &str) -> bool {
        let trimmed = text.trim();
        trimmed.is_empty() || trimmed.starts_with('#')
    }
}

/// Forward-only cursor over the lines of a source text.
///
/// Iterating yields the significant lines; [`LineCursor::next_raw`] yields
/// the next physical line without skipping anything.
#[derive(Clone, Debug)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    position: usize,
}

impl<'a> LineCursor<'a> {
    /// Create a cursor positioned before the first line.
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().collect(),
            position: 0,
        }
    }

    /// Index of the next significant line at or after the current position.
    fn next_significant_index(&self) -> Option<usize> {
        (self.position..self.lines.len()).find(|&i| !SourceLine::is_ignorable(self.lines[i]))
    }

    /// Look at the next significant line without consuming it.
    pub fn peek(&self) -> Option<SourceLine<'a>> {
        self.next_significant_index().map(|i| SourceLine {
            number: i + 1,
            text: self.lines[i].trim(),
        })
    }

    /// Consume the next physical line verbatim, comments and blanks included.
    pub fn next_raw(&mut self) -> Option<SourceLine<'a>> {
        let text = *self.lines.get(self.position)?;
        self.position += 1;
        Some(SourceLine {
            number: self.position,
            text,
        })
    }

    /// Number of the last consumed line (0 before anything was consumed).
    pub fn line_number(&self) -> usize {
        self.position
    }

    /// True once no significant lines remain.
    pub fn is_exhausted(&self) -> bool {
        self.next_significant_index().is_none()
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = SourceLine<'a>;

    fn next(&mut self) -> Option<SourceLine<'a>> {
        match self.next_significant_index() {
            Some(index) => {
                self.position = index + 1;
                Some(SourceLine {
                    number: index + 1,
                    text: self.lines[index].trim(),
                })
            }
            None => {
                // Trailing blanks and comments count as consumed
                self.position = self.lines.len();
                None
            }
        }
    }
}
