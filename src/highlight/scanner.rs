//! Occurrence scanning over the document text

use regex::Matches;

use super::pattern::SearchPattern;

/// A half-open span of character offsets into the document text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub start: usize,
    pub end: usize,
}

impl Occurrence {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A scan of one document text for one pattern
///
/// Borrows the text, so no copy is made. Each call to `iter` starts a
/// fresh left-to-right pass.
#[derive(Debug, Clone, Copy)]
pub struct Scan<'p, 't> {
    pattern: &'p SearchPattern,
    text: &'t str,
}

impl<'p, 't> Scan<'p, 't> {
    pub fn new(pattern: &'p SearchPattern, text: &'t str) -> Self {
        Self { pattern, text }
    }

    /// Iterate over the occurrences, in ascending order
    pub fn iter(&self) -> Occurrences<'p, 't> {
        Occurrences {
            matches: self.pattern.regex().find_iter(self.text),
            text: self.text,
            byte_pos: 0,
            char_pos: 0,
        }
    }
}

impl<'p, 't> IntoIterator for &Scan<'p, 't> {
    type Item = Occurrence;
    type IntoIter = Occurrences<'p, 't>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over non-overlapping occurrences
#[derive(Debug)]
pub struct Occurrences<'p, 't> {
    matches: Matches<'p, 't>,
    text: &'t str,
    /// Byte position the character count below refers to
    byte_pos: usize,
    char_pos: usize,
}

impl Occurrences<'_, '_> {
    /// Advance the byte/char cursor to `byte` and return its char offset.
    ///
    /// Match boundaries only move forward, so the text is walked once.
    fn char_offset(&mut self, byte: usize) -> usize {
        self.char_pos += self.text[self.byte_pos..byte].chars().count();
        self.byte_pos = byte;
        self.char_pos
    }
}

impl Iterator for Occurrences<'_, '_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        let m = self.matches.next()?;
        let start = self.char_offset(m.start());
        let end = self.char_offset(m.end());
        Some(Occurrence::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(selected: &str, text: &str) -> Vec<(usize, usize)> {
        let pattern = SearchPattern::literal(selected).unwrap();
        Scan::new(&pattern, text)
            .iter()
            .map(|o| (o.start, o.end))
            .collect()
    }

    #[test]
    fn test_all_occurrences_in_order() {
        assert_eq!(
            offsets("cat", "cat cat dog cat"),
            vec![(0, 3), (4, 7), (12, 15)]
        );
    }

    #[test]
    fn test_non_overlapping() {
        assert_eq!(offsets("aa", "aaaaa"), vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn test_whole_document() {
        assert_eq!(offsets("hello\nworld", "hello\nworld"), vec![(0, 11)]);
    }

    #[test]
    fn test_no_occurrences() {
        assert!(offsets("gone", "nothing to see").is_empty());
    }

    #[test]
    fn test_whitespace_selection() {
        assert_eq!(offsets("  ", "a  b    c"), vec![(1, 3), (4, 6), (6, 8)]);
    }

    #[test]
    fn test_character_offsets_after_multibyte_text() {
        // "é" and "ü" are two bytes each
        assert_eq!(offsets("x", "éx üx"), vec![(1, 2), (4, 5)]);
        assert_eq!(offsets("ü", "üü"), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_scan_is_restartable() {
        let pattern = SearchPattern::literal("o").unwrap();
        let scan = Scan::new(&pattern, "foo boo");
        let first: Vec<_> = scan.iter().collect();
        let second: Vec<_> = (&scan).into_iter().collect();
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Greedy left-to-right literal search over characters
        fn naive(selected: &str, text: &str) -> Vec<(usize, usize)> {
            let needle: Vec<char> = selected.chars().collect();
            let hay: Vec<char> = text.chars().collect();
            let mut found = Vec::new();
            let mut i = 0;
            while i + needle.len() <= hay.len() {
                if hay[i..i + needle.len()] == needle[..] {
                    found.push((i, i + needle.len()));
                    i += needle.len();
                } else {
                    i += 1;
                }
            }
            found
        }

        proptest! {
            /// Property: the scanner finds exactly the greedy non-overlapping literal matches
            #[test]
            fn prop_scan_matches_naive_search(
                text in "[ab.*é \n]{0,40}",
                selected in "[ab.*é \n]{1,4}"
            ) {
                prop_assert_eq!(offsets(&selected, &text), naive(&selected, &text));
            }
        }
    }
}
