//! Interval highlighting and the widgets that display it, for the **glint**
//! TUI framework.
//!
//! The [`highlight`] module is a pure, terminal-independent engine: it takes a
//! text and named groups of `(key?, value)` ranges and partitions the text
//! into classified segments. [`highlighted_text`] renders those segments as an
//! interactive [`glint_core::Component`].
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`highlight`] | Interval model, partitioner, segment classifier and click dispatch |
//! | [`highlighted_text`] | Bordered, scrollable card with mouse and keyboard interaction |
//! | [`key`] | Key-binding helpers and a one-line help renderer |
//! | [`runeutil`] | Unicode-aware wrapping of segments into terminal rows |

pub mod highlight;
pub mod highlighted_text;
pub mod key;
pub mod runeutil;

pub use highlight::{
    highlight, Classification, Group, Groups, Highlight, HighlightError, HighlightOptions,
    Highlighter, Interval, MalformedPolicy, OffsetUnit, Pair, RawRange, Role, Segment,
};
pub use highlighted_text::{HighlightStyle, HighlightedText};
