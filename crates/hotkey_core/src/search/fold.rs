//! Case- and diacritic-insensitive substring matching.
//!
//! # Invariants
//! - Folding is lowercase, then NFD, then combining marks dropped.
//! - Reported byte ranges always start and end on `char` boundaries of the
//!   source text.

use std::ops::Range;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Folded needle used for substring tests against record text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatcher {
    query: String,
    needle: Vec<char>,
}

impl TextMatcher {
    /// Builds a matcher from the trimmed `query`.
    ///
    /// Returns `None` when nothing is left to match after trimming and folding.
    pub fn new(query: &str) -> Option<Self> {
        let query = query.trim();
        let needle = fold_str(query);
        if needle.is_empty() {
            return None;
        }
        Some(Self {
            query: query.to_string(),
            needle,
        })
    }

    /// Trimmed query this matcher was built from.
    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        FoldedText::new(haystack).find_from(&self.needle, 0).is_some()
    }

    /// Byte ranges of every leftmost-first, non-overlapping occurrence.
    pub fn find_ranges(&self, haystack: &str) -> Vec<Range<usize>> {
        let folded = FoldedText::new(haystack);
        let mut ranges = Vec::new();
        let mut cursor = 0;

        while let Some(found) = folded.find_from(&self.needle, cursor) {
            let start = folded.source_offset(found.start, haystack.len());
            let end = folded.source_offset(found.end, haystack.len());
            ranges.push(start..end);
            cursor = found.end;
        }

        ranges
    }
}

/// Folded view of a source string with per-char back references.
struct FoldedText {
    chars: Vec<char>,
    // Byte offset of the source char that produced each folded char.
    origins: Vec<usize>,
}

impl FoldedText {
    fn new(source: &str) -> Self {
        let mut chars = Vec::with_capacity(source.len());
        let mut origins = Vec::with_capacity(source.len());

        for (offset, ch) in source.char_indices() {
            for folded in fold_char(ch) {
                chars.push(folded);
                origins.push(offset);
            }
        }

        Self { chars, origins }
    }

    fn find_from(&self, needle: &[char], from: usize) -> Option<Range<usize>> {
        if needle.is_empty() || needle.len() > self.chars.len() {
            return None;
        }

        let last_start = self.chars.len() - needle.len();
        (from..=last_start)
            .filter(|&start| self.starts_source_char(start))
            .filter(|&start| self.ends_source_char(start + needle.len()))
            .find(|&start| self.chars[start..start + needle.len()] == *needle)
            .map(|start| start..start + needle.len())
    }

    fn starts_source_char(&self, index: usize) -> bool {
        index == 0 || self.origins[index] != self.origins[index - 1]
    }

    fn ends_source_char(&self, end: usize) -> bool {
        end == self.chars.len() || self.origins[end] != self.origins[end - 1]
    }

    // Chars that fold to nothing stick to whatever precedes them.
    fn source_offset(&self, index: usize, source_len: usize) -> usize {
        self.origins.get(index).copied().unwrap_or(source_len)
    }
}

fn fold_str(value: &str) -> Vec<char> {
    value.chars().flat_map(fold_char).collect()
}

fn fold_char(ch: char) -> impl Iterator<Item = char> {
    ch.to_lowercase().nfd().filter(|folded| !is_combining_mark(*folded))
}
