//! Conversion between character offsets, byte offsets and string slices.

/// Character-boundary index of a string.
///
/// Highlight passes work in character offsets; this maps them to byte
/// positions for slicing, and maps host-supplied byte offsets back.
#[derive(Debug, Clone)]
pub(crate) struct CharIndex {
    /// Byte position of every character start.
    starts: Vec<usize>,
    byte_len: usize,
}

/// Where a byte offset lands relative to the character grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ByteLookup {
    /// On a boundary; the character offset.
    Boundary(usize),
    /// Inside a multi-byte character; the offset of that character.
    Inside(usize),
}

impl CharIndex {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            starts: text.char_indices().map(|(b, _)| b).collect(),
            byte_len: text.len(),
        }
    }

    /// Number of characters.
    pub(crate) fn len(&self) -> usize {
        self.starts.len()
    }

    pub(crate) fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Byte position of character offset `c`, `c <= len()`.
    pub(crate) fn byte_of(&self, c: usize) -> usize {
        self.starts.get(c).copied().unwrap_or(self.byte_len)
    }

    /// Character offset of byte position `b`, `b <= byte_len()`.
    pub(crate) fn char_of(&self, b: usize) -> ByteLookup {
        if b >= self.byte_len {
            return ByteLookup::Boundary(self.len());
        }
        match self.starts.binary_search(&b) {
            Ok(c) => ByteLookup::Boundary(c),
            Err(c) => ByteLookup::Inside(c.saturating_sub(1)),
        }
    }

    /// Slice `text` between two character offsets.
    pub(crate) fn slice<'a>(&self, text: &'a str, start: usize, stop: usize) -> &'a str {
        &text[self.byte_of(start)..self.byte_of(stop)]
    }
}
