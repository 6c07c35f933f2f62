//! Interval highlighting: partition a text into display segments from named
//! groups of annotated ranges.
//!
//! A pass runs in four steps, each in its own module:
//!
//! 1. [`interval`]: resolve every group's `(key?, value)` pairs into
//!    in-bounds [`Interval`]s, tagged with role and emphasis.
//! 2. [`partition`]: collect all interval boundaries plus `0` and the text
//!    length into a sorted, de-duplicated breakpoint list.
//! 3. [`classify`]: find the intervals covering each segment's midpoint and
//!    reduce them to one [`Classification`].
//! 4. [`dispatch`]: list the group keys under a segment for click and hover
//!    reporting.
//!
//! Every pass is a pure function of `(content, groups, emphasis, options)`.
//!
//! ```rust,ignore
//! use glint_widgets::highlight::{highlight, Classification, Groups, Pair};
//!
//! let groups = Groups::new().with("g1", vec![Pair::keyed([0, 5], [6, 11])]);
//! let segments = highlight("hello world", &groups, &[] as &[&str]);
//! assert_eq!(segments[0].classification, Classification::Key);
//! assert_eq!(segments[2].text, "world");
//! ```

pub mod classify;
pub mod dispatch;
pub mod error;
pub mod interval;
pub(crate) mod offsets;
pub mod partition;

pub use classify::{classify, Classification};
pub use dispatch::{covering_group_keys, dispatch};
pub use error::HighlightError;
pub use interval::{Group, Groups, Interval, Pair, RawRange, Role};

use tracing::{debug, warn};

use offsets::{ByteLookup, CharIndex};
use partition::{breakpoints, segment_bounds};

/// What the offsets in [`RawRange`]s count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetUnit {
    /// Unicode scalar values (`char`s).
    #[default]
    Chars,
    /// UTF-8 bytes. Offsets inside a character snap back to its start under
    /// [`MalformedPolicy::Clamp`].
    Bytes,
}

/// What to do with negative, overshooting, inverted or misaligned ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Clamp offsets into the text and drop ranges that end before they start.
    #[default]
    Clamp,
    /// Fail the pass with a [`HighlightError`].
    Reject,
}

/// Options for a [`Highlighter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightOptions {
    pub unit: OffsetUnit,
    pub policy: MalformedPolicy,
}

impl HighlightOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(mut self, unit: OffsetUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// A run of text between two consecutive breakpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Character offset of the first character.
    pub start: usize,
    /// Character offset one past the last character.
    pub stop: usize,
    pub text: String,
    pub classification: Classification,
    /// Indices into [`Highlight::intervals`] of the covering intervals, ascending.
    pub covering: Vec<usize>,
    /// De-duplicated group keys of the covering intervals, in first-seen order.
    pub covering_groups: Vec<String>,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// Whether any interval covers this segment.
    pub fn is_covered(&self) -> bool {
        !self.covering.is_empty()
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.stop
    }
}

/// The result of a highlight pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlight {
    intervals: Vec<Interval>,
    breakpoints: Vec<usize>,
    segments: Vec<Segment>,
    len: usize,
}

impl Highlight {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Every resolved interval, in group insertion order.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn breakpoints(&self) -> &[usize] {
        &self.breakpoints
    }

    /// Length of the text in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the segment containing character `offset`.
    pub fn segment_at(&self, offset: usize) -> Option<usize> {
        let idx = self.segments.partition_point(|s| s.stop <= offset);
        self.segments
            .get(idx)
            .filter(|s| s.contains(offset))
            .map(|_| idx)
    }

    /// The intervals covering segment `index`.
    pub fn covering_intervals(&self, index: usize) -> impl Iterator<Item = &Interval> + '_ {
        self.segments
            .get(index)
            .map(|s| s.covering.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&i| &self.intervals[i])
    }

    /// Group keys to report for an interaction on segment `index`.
    pub fn dispatch(&self, index: usize) -> Option<Vec<String>> {
        self.segments.get(index).and_then(dispatch)
    }
}

/// Runs highlight passes with a fixed set of [`HighlightOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Highlighter {
    options: HighlightOptions,
}

impl Highlighter {
    pub fn new(options: HighlightOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> HighlightOptions {
        self.options
    }

    /// Partition `content` into classified segments.
    ///
    /// `emphasis` lists the group keys to highlight; an empty list
    /// highlights every group. Never fails under [`MalformedPolicy::Clamp`].
    pub fn highlight<S: AsRef<str>>(
        &self,
        content: &str,
        groups: &Groups,
        emphasis: &[S],
    ) -> Result<Highlight, HighlightError> {
        let index = CharIndex::new(content);
        let intervals = self.resolve(&index, groups, emphasis)?;
        let points = breakpoints(index.len(), &intervals);

        let segments: Vec<Segment> = classify::coverage(&points, &intervals)
            .into_iter()
            .zip(segment_bounds(&points))
            .map(|(covering, (start, stop))| {
                let covering_intervals = || covering.iter().map(|&i| &intervals[i]);
                Segment {
                    start,
                    stop,
                    text: index.slice(content, start, stop).to_string(),
                    classification: classify(covering_intervals()),
                    covering_groups: covering_group_keys(covering_intervals()),
                    covering: covering.clone(),
                }
            })
            .collect();

        debug!(
            chars = index.len(),
            groups = groups.len(),
            intervals = intervals.len(),
            segments = segments.len(),
            "highlight pass"
        );

        Ok(Highlight {
            intervals,
            breakpoints: points,
            segments,
            len: index.len(),
        })
    }

    /// Resolve `groups` into in-bounds intervals against `content`, in group
    /// insertion order (key before value within a pair).
    pub fn intervals<S: AsRef<str>>(
        &self,
        content: &str,
        groups: &Groups,
        emphasis: &[S],
    ) -> Result<Vec<Interval>, HighlightError> {
        self.resolve(&CharIndex::new(content), groups, emphasis)
    }

    fn resolve<S: AsRef<str>>(
        &self,
        index: &CharIndex,
        groups: &Groups,
        emphasis: &[S],
    ) -> Result<Vec<Interval>, HighlightError> {
        let mut intervals = Vec::new();
        for group in groups {
            let emphasized =
                emphasis.is_empty() || emphasis.iter().any(|k| k.as_ref() == group.key);
            let make = |(start, stop): (usize, usize), role: Role| Interval {
                start,
                stop,
                group: Some(group.key.clone()),
                role,
                emphasized,
            };

            for pair in &group.pairs {
                match pair.key {
                    Some(key_range) => {
                        let key = self.resolve_range(key_range, &group.key, index)?;
                        let value = self.resolve_range(pair.value, &group.key, index)?;
                        if self.options.policy == MalformedPolicy::Reject
                            && [key, value].iter().any(|r| r.is_none_or(|(a, b)| a == b))
                        {
                            return Err(HighlightError::EmptyKeyedPair {
                                group: group.key.clone(),
                            });
                        }
                        intervals.extend(key.map(|r| make(r, Role::Key)));
                        intervals.extend(value.map(|r| make(r, Role::Value)));
                    }
                    None => {
                        let value = self.resolve_range(pair.value, &group.key, index)?;
                        intervals.extend(value.map(|r| make(r, Role::ValueOnly)));
                    }
                }
            }
        }
        Ok(intervals)
    }

    /// `Ok(None)` means the range was dropped under the clamp policy.
    fn resolve_range(
        &self,
        range: RawRange,
        group: &str,
        index: &CharIndex,
    ) -> Result<Option<(usize, usize)>, HighlightError> {
        let start = self.resolve_offset(range.start, group, index)?;
        let stop = self.resolve_offset(range.stop, group, index)?;
        if start <= stop {
            return Ok(Some((start, stop)));
        }
        match self.options.policy {
            MalformedPolicy::Reject => Err(HighlightError::InvertedRange {
                group: group.to_string(),
                start: range.start,
                stop: range.stop,
            }),
            MalformedPolicy::Clamp => {
                warn!(group, start = range.start, stop = range.stop, "dropping inverted range");
                Ok(None)
            }
        }
    }

    fn resolve_offset(
        &self,
        offset: i64,
        group: &str,
        index: &CharIndex,
    ) -> Result<usize, HighlightError> {
        let reject = self.options.policy == MalformedPolicy::Reject;
        let limit = match self.options.unit {
            OffsetUnit::Chars => index.len(),
            OffsetUnit::Bytes => index.byte_len(),
        };

        let Ok(mut raw) = usize::try_from(offset) else {
            if reject {
                return Err(HighlightError::NegativeOffset {
                    group: group.to_string(),
                    offset,
                });
            }
            warn!(group, offset, "clamping negative offset to 0");
            return Ok(0);
        };
        if raw > limit {
            if reject {
                return Err(HighlightError::OutOfBounds {
                    group: group.to_string(),
                    offset,
                    len: limit,
                });
            }
            warn!(group, offset, len = limit, "clamping offset to end of text");
            raw = limit;
        }

        match self.options.unit {
            OffsetUnit::Chars => Ok(raw),
            OffsetUnit::Bytes => match index.char_of(raw) {
                ByteLookup::Boundary(c) => Ok(c),
                ByteLookup::Inside(_) if reject => Err(HighlightError::NotCharBoundary {
                    group: group.to_string(),
                    offset: raw,
                }),
                ByteLookup::Inside(c) => {
                    warn!(group, offset, "snapping byte offset to character start");
                    Ok(c)
                }
            },
        }
    }
}

/// Highlight `content` with default options (character offsets, clamping).
pub fn highlight<S: AsRef<str>>(content: &str, groups: &Groups, emphasis: &[S]) -> Vec<Segment> {
    // The clamp policy has no error path.
    Highlighter::default()
        .highlight(content, groups, emphasis)
        .map(Highlight::into_segments)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_EMPHASIS: &[&str] = &[];

    fn classes(segments: &[Segment]) -> Vec<(&str, Classification)> {
        segments
            .iter()
            .map(|s| (s.text.as_str(), s.classification))
            .collect()
    }

    #[test]
    fn empty_input_yields_no_segments() {
        let segments = highlight("", &Groups::new(), NO_EMPHASIS);
        assert!(segments.is_empty());
    }

    #[test]
    fn plain_text_is_one_unclassified_segment() {
        let segments = highlight("plain", &Groups::new(), NO_EMPHASIS);
        assert_eq!(classes(&segments), vec![("plain", Classification::None)]);
        assert_eq!(dispatch(&segments[0]), None);
    }

    #[test]
    fn single_key_value_pair() {
        let groups = Groups::new().with("g1", vec![Pair::keyed([0, 5], [6, 11])]);
        let segments = highlight("hello world", &groups, NO_EMPHASIS);
        assert_eq!(
            classes(&segments),
            vec![
                ("hello", Classification::Key),
                (" ", Classification::None),
                ("world", Classification::Value),
            ]
        );
        assert_eq!(segments[2].covering_groups, vec!["g1"]);
    }

    #[test]
    fn overlapping_groups_with_empty_emphasis() {
        let groups = Groups::new()
            .with("a", vec![Pair::value_only([2, 4])])
            .with("b", vec![Pair::value_only([2, 4])]);
        let segments = highlight("abcdef", &groups, NO_EMPHASIS);
        assert_eq!(
            classes(&segments),
            vec![
                ("ab", Classification::None),
                ("cd", Classification::Overlap),
                ("ef", Classification::None),
            ]
        );
        assert_eq!(segments[1].covering_groups, vec!["a", "b"]);
    }

    #[test]
    fn muted_group_does_not_count_toward_overlap() {
        let groups = Groups::new()
            .with("a", vec![Pair::keyed([0, 2], [2, 4])])
            .with("b", vec![Pair::value_only([2, 4])]);
        let segments = highlight("abcd", &groups, &["a"]);
        assert_eq!(
            classes(&segments),
            vec![("ab", Classification::Key), ("cd", Classification::Value)]
        );
        // Muted groups are still reported on click.
        assert_eq!(segments[1].covering_groups, vec!["a", "b"]);
    }

    #[test]
    fn fully_muted_coverage_is_hover_only() {
        let groups = Groups::new().with("a", vec![Pair::value_only([0, 3])]);
        let segments = highlight("abc", &groups, &["other"]);
        assert_eq!(classes(&segments), vec![("abc", Classification::HoverOnly)]);
        assert_eq!(dispatch(&segments[0]), Some(vec!["a".to_string()]));
    }

    #[test]
    fn value_only_is_never_key() {
        let groups = Groups::new().with("v", vec![Pair::value_only([1, 3])]);
        let segments = highlight("xyz!", &groups, NO_EMPHASIS);
        assert_eq!(segments[1].text, "yz");
        assert_eq!(segments[1].classification, Classification::ValueOnly);
    }

    #[test]
    fn offsets_count_characters() {
        let groups = Groups::new().with("g", vec![Pair::value_only([1, 3])]);
        let segments = highlight("aé日b", &groups, NO_EMPHASIS);
        assert_eq!(segments[1].text, "é日");
    }

    #[test]
    fn byte_offsets_map_to_characters() {
        let groups = Groups::new().with("g", vec![Pair::value_only([1, 6])]);
        let hl = Highlighter::new(HighlightOptions::new().with_unit(OffsetUnit::Bytes))
            .highlight("aé日b", &groups, NO_EMPHASIS)
            .unwrap();
        assert_eq!(hl.segments()[1].text, "é日");
        assert_eq!((hl.segments()[1].start, hl.segments()[1].stop), (1, 3));
    }

    #[test]
    fn byte_offsets_inside_a_character_snap_back() {
        let groups = Groups::new().with("g", vec![Pair::value_only([2, 4])]);
        let hl = Highlighter::new(HighlightOptions::new().with_unit(OffsetUnit::Bytes))
            .highlight("aé日b", &groups, NO_EMPHASIS)
            .unwrap();
        assert_eq!(hl.intervals()[0].start, 1);
        assert_eq!(hl.intervals()[0].stop, 2);
    }

    #[test]
    fn malformed_ranges_are_clamped_or_dropped() {
        let groups = Groups::new().with(
            "g",
            vec![
                Pair::value_only([-3, 2]),
                Pair::value_only([4, 99]),
                Pair::value_only([3, 1]),
            ],
        );
        let hl = Highlighter::default()
            .highlight("abcdef", &groups, NO_EMPHASIS)
            .unwrap();
        let bounds: Vec<_> = hl.intervals().iter().map(|i| (i.start, i.stop)).collect();
        assert_eq!(bounds, vec![(0, 2), (4, 6)]);
        let text: String = hl.segments().iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "abcdef");
    }

    #[test]
    fn reject_policy_reports_the_first_problem() {
        let reject = Highlighter::new(HighlightOptions::new().with_policy(MalformedPolicy::Reject));
        let cases = vec![
            (
                Pair::value_only([-1, 2]),
                HighlightError::NegativeOffset { group: "g".into(), offset: -1 },
            ),
            (
                Pair::value_only([0, 9]),
                HighlightError::OutOfBounds { group: "g".into(), offset: 9, len: 3 },
            ),
            (
                Pair::value_only([2, 1]),
                HighlightError::InvertedRange { group: "g".into(), start: 2, stop: 1 },
            ),
            (
                Pair::keyed([1, 1], [2, 3]),
                HighlightError::EmptyKeyedPair { group: "g".into() },
            ),
        ];
        for (pair, expected) in cases {
            let groups = Groups::new().with("g", vec![pair]);
            let err = reject.highlight("abc", &groups, NO_EMPHASIS).unwrap_err();
            assert_eq!(err, expected);
            assert_eq!(err.group(), "g");
        }
    }

    #[test]
    fn reject_policy_flags_split_characters() {
        let options = HighlightOptions::new()
            .with_unit(OffsetUnit::Bytes)
            .with_policy(MalformedPolicy::Reject);
        let groups = Groups::new().with("g", vec![Pair::value_only([0, 2])]);
        let err = Highlighter::new(options)
            .highlight("aé", &groups, NO_EMPHASIS)
            .unwrap_err();
        assert_eq!(err, HighlightError::NotCharBoundary { group: "g".into(), offset: 2 });
    }

    #[test]
    fn segment_lookup_by_offset() {
        let groups = Groups::new().with("g1", vec![Pair::keyed([0, 5], [6, 11])]);
        let hl = Highlighter::default()
            .highlight("hello world", &groups, NO_EMPHASIS)
            .unwrap();
        assert_eq!(hl.segment_at(0), Some(0));
        assert_eq!(hl.segment_at(5), Some(1));
        assert_eq!(hl.segment_at(10), Some(2));
        assert_eq!(hl.segment_at(11), None);
        assert_eq!(hl.dispatch(2), Some(vec!["g1".to_string()]));
        assert_eq!(hl.dispatch(1), None);
        let roles: Vec<_> = hl.covering_intervals(0).map(|i| i.role).collect();
        assert_eq!(roles, vec![Role::Key]);
    }

    #[test]
    fn zero_width_intervals_do_not_break_partition() {
        let groups = Groups::new().with("g", vec![Pair::value_only([2, 2]), Pair::value_only([2, 2])]);
        let hl = Highlighter::default()
            .highlight("abcd", &groups, NO_EMPHASIS)
            .unwrap();
        assert_eq!(hl.breakpoints(), &[0, 2, 4]);
        assert!(hl.segments().iter().all(|s| s.classification == Classification::None));
    }
}
