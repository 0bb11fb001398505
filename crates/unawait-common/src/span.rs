//! Byte-offset ranges into source text.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[pos, end)` into a source file.
///
/// Node ranges never include leading trivia, so slicing the source with a
/// node's range yields exactly the node's text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextRange {
    pub pos: u32,
    pub end: u32,
}

impl TextRange {
    #[inline]
    pub const fn new(pos: u32, end: u32) -> Self {
        TextRange { pos, end }
    }

    /// An empty range positioned at `pos`.
    #[inline]
    pub const fn empty(pos: u32) -> Self {
        TextRange { pos, end: pos }
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.pos)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.end <= self.pos
    }

    /// Smallest range covering both `self` and `other`.
    #[must_use]
    pub fn cover(self, other: TextRange) -> TextRange {
        TextRange {
            pos: self.pos.min(other.pos),
            end: self.end.max(other.end),
        }
    }

    #[inline]
    pub const fn contains_range(self, other: TextRange) -> bool {
        self.pos <= other.pos && other.end <= self.end
    }

    #[inline]
    pub const fn intersects(self, other: TextRange) -> bool {
        self.pos < other.end && other.pos < self.end
    }

    /// Slice `text` with this range. Returns an empty string when the range
    /// falls outside the text or splits a UTF-8 sequence.
    pub fn slice(self, text: &str) -> &str {
        text.get(self.pos as usize..self.end as usize).unwrap_or("")
    }
}

#[cfg(test)]
#[path = "../tests/span_tests.rs"]
mod tests;
