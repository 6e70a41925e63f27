//! Document representation - lines of text with a version counter
//!
//! Offsets are character offsets into the full text, where each line
//! break counts as one character.

use crate::error::{HighlightError, Result};
use crate::highlight::Position;

/// Identifier of an open document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A single line of text (without trailing newline)
#[derive(Debug, Clone)]
struct Line {
    text: String,
    /// Cached character count
    chars: usize,
}

impl Line {
    fn new(s: &str) -> Self {
        Self {
            text: s.to_string(),
            chars: s.chars().count(),
        }
    }
}

/// An in-memory text document
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    /// Always at least one line
    lines: Vec<Line>,
    /// Character offset at which each line starts
    line_starts: Vec<usize>,
    /// Bumped on every edit
    version: u64,
}

impl Document {
    /// Create a document from text
    pub fn new(id: DocumentId, text: &str) -> Self {
        let lines = split_lines(text);
        Self {
            id,
            line_starts: line_starts(&lines),
            lines,
            version: 0,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line's text by index
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(|l| l.text.as_str())
    }

    /// Length of the document in characters
    pub fn char_len(&self) -> usize {
        match (self.line_starts.last(), self.lines.last()) {
            (Some(start), Some(line)) => start + line.chars,
            _ => 0,
        }
    }

    /// Full text of the document
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(&line.text);
        }
        text
    }

    /// Text between two character offsets (clamped to the document)
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.text()
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }

    /// Convert a character offset to a line/column position.
    ///
    /// The offset one past the last character is valid and maps to the
    /// end of the last line.
    pub fn offset_to_position(&self, offset: usize) -> Result<Position> {
        // First line starts at 0, so there is always a line at or before
        let line_idx = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let column = offset - self.line_starts[line_idx];
        if column <= self.lines[line_idx].chars {
            return Ok(Position::new(line_idx, column));
        }
        Err(HighlightError::StaleOffset {
            offset,
            len: self.char_len(),
        })
    }

    /// Insert text at a character offset
    pub fn insert(&mut self, offset: usize, s: &str) -> Result<()> {
        let mut text = self.text();
        let byte = self.byte_index(&text, offset)?;
        text.insert_str(byte, s);
        self.replace_all(&text);
        Ok(())
    }

    /// Delete the characters in `start..end`, returns the deleted text
    pub fn delete(&mut self, start: usize, end: usize) -> Result<String> {
        let mut text = self.text();
        let start_byte = self.byte_index(&text, start)?;
        let end_byte = self.byte_index(&text, end.max(start))?;
        let deleted = text[start_byte..end_byte].to_string();
        text.replace_range(start_byte..end_byte, "");
        self.replace_all(&text);
        Ok(deleted)
    }

    /// Replace the whole content
    pub fn replace_all(&mut self, text: &str) {
        self.lines = split_lines(text);
        self.line_starts = line_starts(&self.lines);
        self.version += 1;
    }

    fn byte_index(&self, text: &str, offset: usize) -> Result<usize> {
        if offset == 0 {
            return Ok(0);
        }
        text.char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .nth(offset)
            .ok_or(HighlightError::StaleOffset {
                offset,
                len: self.char_len(),
            })
    }
}

fn split_lines(text: &str) -> Vec<Line> {
    // split('\n') always yields at least one item
    text.split('\n').map(Line::new).collect()
}

fn line_starts(lines: &[Line]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(lines.len());
    let mut offset = 0;
    for line in lines {
        starts.push(offset);
        // Line break counts as one character
        offset += line.chars + 1;
    }
    starts
}
