//! In-memory line source for the log parser.
//!
//! The whole log is read upfront; the parser then walks over the lines while
//! keeping track of the 1-based line number for error reporting.

use std::fs;
use std::path::Path;

// =#========================================================================#=
// IN MEMORY LINE SOURCE
// =#========================================================================#=
/// A line source that owns the lines of a log.
pub struct InMemoryLineSource {
    /// The owned lines being parsed
    lines: Vec<String>,
    /// Index of the next line to hand out
    pos: usize,
}

impl InMemoryLineSource {
    /// Creates a new line source from already split lines.
    ///
    /// # Arguments
    /// * `lines` - The lines to parse, without line terminators
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            pos: 0,
        }
    }

    /// Reads the entire file into memory and splits it into lines.
    ///
    /// Both `\n` and `\r\n` terminators are accepted.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::from_lines(contents.lines()))
    }

    /// Returns the next line together with its 1-based line number.
    pub fn next_line(&mut self) -> Option<(usize, &str)> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some((self.pos, line.as_str()))
    }

    /// Sets the index of the next line to be handed out.
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Check if all lines were handed out.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Consumes the source and returns its lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
