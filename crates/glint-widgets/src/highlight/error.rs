use thiserror::Error;

/// Malformed group data, reported under [`MalformedPolicy::Reject`](super::MalformedPolicy::Reject).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    #[error("group `{group}`: offset {offset} is negative")]
    NegativeOffset { group: String, offset: i64 },

    #[error("group `{group}`: offset {offset} is past the end of the text ({len})")]
    OutOfBounds { group: String, offset: i64, len: usize },

    #[error("group `{group}`: range [{start}, {stop}] ends before it starts")]
    InvertedRange { group: String, start: i64, stop: i64 },

    #[error("group `{group}`: byte offset {offset} is inside a multi-byte character")]
    NotCharBoundary { group: String, offset: usize },

    #[error("group `{group}`: a pair with a key range needs non-empty key and value ranges")]
    EmptyKeyedPair { group: String },
}

impl HighlightError {
    /// Key of the group the bad range belongs to.
    pub fn group(&self) -> &str {
        match self {
            HighlightError::NegativeOffset { group, .. }
            | HighlightError::OutOfBounds { group, .. }
            | HighlightError::InvertedRange { group, .. }
            | HighlightError::NotCharBoundary { group, .. }
            | HighlightError::EmptyKeyedPair { group } => group,
        }
    }
}
