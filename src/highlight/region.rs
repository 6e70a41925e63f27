//! Mapping occurrences to line/column regions

use crate::error::Result;

use super::scanner::Occurrence;

/// A position in a document (0-indexed line, character column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A highlighted span of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub start: Position,
    pub end: Position,
}

impl Region {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Check if the region covers any part of a line
    pub fn touches_line(&self, line: usize) -> bool {
        line >= self.start.line && line <= self.end.line
    }

    /// Column range covered on `line`, given that line's length
    pub fn columns_on_line(&self, line: usize, line_len: usize) -> Option<(usize, usize)> {
        if !self.touches_line(line) {
            return None;
        }
        let start = if line == self.start.line { self.start.column } else { 0 };
        let end = if line == self.end.line { self.end.column } else { line_len };
        Some((start.min(line_len), end.min(line_len)))
    }
}

/// Result of mapping a batch of occurrences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedRegions {
    pub regions: Vec<Region>,
    /// Occurrences whose offsets could not be mapped
    pub dropped: usize,
}

/// Map each occurrence to a region using the document's offset mapping.
///
/// The mapping must come from the same document snapshot the occurrences
/// were scanned from. An occurrence that fails to map is dropped and
/// counted; the rest are still returned.
pub fn map_occurrences<I, F>(occurrences: I, mut to_position: F) -> MappedRegions
where
    I: IntoIterator<Item = Occurrence>,
    F: FnMut(usize) -> Result<Position>,
{
    let mut mapped = MappedRegions::default();

    for occurrence in occurrences {
        let start = to_position(occurrence.start);
        let end = to_position(occurrence.end);
        match (start, end) {
            (Ok(start), Ok(end)) => mapped.regions.push(Region::new(start, end)),
            (Err(e), _) | (_, Err(e)) => {
                tracing::debug!("Dropping region {}..{}: {}", occurrence.start, occurrence.end, e);
                mapped.dropped += 1;
            }
        }
    }

    mapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HighlightError;

    /// Offset mapping for a single-line document of `len` characters
    fn single_line(len: usize) -> impl FnMut(usize) -> Result<Position> {
        move |offset| {
            if offset <= len {
                Ok(Position::new(0, offset))
            } else {
                Err(HighlightError::StaleOffset { offset, len })
            }
        }
    }

    #[test]
    fn test_map_occurrences() {
        let occurrences = vec![Occurrence::new(0, 3), Occurrence::new(4, 7)];
        let mapped = map_occurrences(occurrences, single_line(10));

        assert_eq!(mapped.dropped, 0);
        assert_eq!(
            mapped.regions,
            vec![
                Region::new(Position::new(0, 0), Position::new(0, 3)),
                Region::new(Position::new(0, 4), Position::new(0, 7)),
            ]
        );
    }

    #[test]
    fn test_stale_offsets_are_dropped_individually() {
        let occurrences = vec![
            Occurrence::new(0, 3),
            Occurrence::new(4, 7),
            Occurrence::new(8, 11),
        ];
        let mapped = map_occurrences(occurrences, single_line(6));

        assert_eq!(mapped.dropped, 2);
        assert_eq!(mapped.regions.len(), 1);
        assert_eq!(mapped.regions[0].end, Position::new(0, 3));
    }

    #[test]
    fn test_columns_on_line() {
        let region = Region::new(Position::new(1, 3), Position::new(3, 2));
        assert_eq!(region.columns_on_line(0, 10), None);
        assert_eq!(region.columns_on_line(1, 10), Some((3, 10)));
        assert_eq!(region.columns_on_line(2, 5), Some((0, 5)));
        assert_eq!(region.columns_on_line(3, 10), Some((0, 2)));
        assert_eq!(region.columns_on_line(4, 10), None);
    }
}
