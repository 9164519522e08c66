//! Highlight segmentation for matched substrings.

use crate::search::fold::TextMatcher;

/// One run of record text, either matching the query or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub is_match: bool,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            is_match: false,
        }
    }

    fn matched(text: &'a str) -> Self {
        Self {
            text,
            is_match: true,
        }
    }
}

/// Splits `text` into ordered match/non-match segments for `query`.
///
/// Matching is case- and diacritic-insensitive, leftmost-first and
/// non-overlapping. Concatenating the segments reproduces `text` exactly.
/// A blank query, or one that never occurs, yields a single non-match
/// segment holding the whole text.
pub fn segments<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    let Some(matcher) = TextMatcher::new(query) else {
        return vec![Segment::plain(text)];
    };

    let ranges = matcher.find_ranges(text);
    if ranges.is_empty() {
        return vec![Segment::plain(text)];
    }

    let mut segments = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut cursor = 0;
    for range in ranges {
        if range.start > cursor {
            segments.push(Segment::plain(&text[cursor..range.start]));
        }
        segments.push(Segment::matched(&text[range.clone()]));
        cursor = range.end;
    }
    if cursor < text.len() {
        segments.push(Segment::plain(&text[cursor..]));
    }

    segments
}
