//! Per-segment coverage and its reduction to a single display class.

use std::collections::BTreeSet;

use super::interval::{Interval, Role};
use super::partition::segment_bounds;

/// How a segment should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Classification {
    /// No interval covers the segment.
    #[default]
    None,
    Key,
    Value,
    ValueOnly,
    /// Two or more emphasised intervals cover the segment.
    Overlap,
    /// Covered, but only by intervals outside the emphasis set.
    HoverOnly,
}

impl Classification {
    /// Whether the segment is drawn with a highlight colour.
    pub fn is_highlighted(self) -> bool {
        matches!(
            self,
            Classification::Key
                | Classification::Value
                | Classification::ValueOnly
                | Classification::Overlap
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::None => "none",
            Classification::Key => "key",
            Classification::Value => "value",
            Classification::ValueOnly => "valueOnly",
            Classification::Overlap => "overlap",
            Classification::HoverOnly => "hoverOnly",
        }
    }
}

impl From<Role> for Classification {
    fn from(role: Role) -> Self {
        match role {
            Role::Key => Classification::Key,
            Role::Value => Classification::Value,
            Role::ValueOnly => Classification::ValueOnly,
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduce a covering set to one classification.
///
/// Only emphasised intervals count toward overlap; a segment covered solely
/// by non-emphasised intervals stays hoverable but unstyled.
pub fn classify<'a>(covering: impl IntoIterator<Item = &'a Interval>) -> Classification {
    let mut covered = false;
    let mut emphasized_role = None;
    for interval in covering {
        covered = true;
        if interval.emphasized {
            if emphasized_role.is_some() {
                return Classification::Overlap;
            }
            emphasized_role = Some(interval.role);
        }
    }
    match emphasized_role {
        Some(role) => role.into(),
        None if covered => Classification::HoverOnly,
        None => Classification::None,
    }
}

/// Indices of the intervals covering each segment between `points`, each
/// list in ascending interval order.
///
/// Sweeps the segments left to right, admitting intervals by start and
/// retiring them by stop.
pub fn coverage(points: &[usize], intervals: &[Interval]) -> Vec<Vec<usize>> {
    let mut by_start: Vec<usize> = (0..intervals.len()).collect();
    by_start.sort_by_key(|&i| intervals[i].start);
    let mut by_stop = by_start.clone();
    by_stop.sort_by_key(|&i| intervals[i].stop);

    let mut active = BTreeSet::new();
    let (mut next_start, mut next_stop) = (0, 0);
    let mut out = Vec::with_capacity(points.len().saturating_sub(1));

    for (a, b) in segment_bounds(points) {
        while let Some(&i) = by_start.get(next_start) {
            if intervals[i].start > a {
                break;
            }
            active.insert(i);
            next_start += 1;
        }
        while let Some(&i) = by_stop.get(next_stop) {
            if intervals[i].stop > a {
                break;
            }
            active.remove(&i);
            next_stop += 1;
        }
        out.push(
            active
                .iter()
                .copied()
                .filter(|&i| intervals[i].covers(a, b))
                .collect(),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::partition::breakpoints;

    fn linear_coverage(points: &[usize], intervals: &[Interval]) -> Vec<Vec<usize>> {
        segment_bounds(points)
            .map(|(a, b)| {
                (0..intervals.len())
                    .filter(|&i| intervals[i].covers(a, b))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn classify_nothing_is_none() {
        assert_eq!(classify([]), Classification::None);
    }

    #[test]
    fn classify_single_emphasized_uses_role() {
        let v = Interval::new(0, 3, Role::ValueOnly);
        assert_eq!(classify([&v]), Classification::ValueOnly);
    }

    #[test]
    fn classify_single_muted_is_hover_only() {
        let k = Interval::new(0, 3, Role::Key).with_emphasis(false);
        assert_eq!(classify([&k]), Classification::HoverOnly);
    }

    #[test]
    fn classify_two_emphasized_is_overlap() {
        let a = Interval::new(0, 3, Role::Key);
        let b = Interval::new(0, 3, Role::Value);
        assert_eq!(classify([&a, &b]), Classification::Overlap);
    }

    #[test]
    fn classify_one_emphasized_among_muted_uses_its_role() {
        let a = Interval::new(0, 3, Role::Key).with_emphasis(false);
        let b = Interval::new(0, 3, Role::Value);
        let c = Interval::new(0, 3, Role::ValueOnly).with_emphasis(false);
        assert_eq!(classify([&a, &b, &c]), Classification::Value);
    }

    #[test]
    fn classify_all_muted_is_hover_only() {
        let a = Interval::new(0, 3, Role::Key).with_emphasis(false);
        let b = Interval::new(0, 3, Role::Value).with_emphasis(false);
        assert_eq!(classify([&a, &b]), Classification::HoverOnly);
    }

    #[test]
    fn coverage_matches_linear_scan() {
        let intervals = vec![
            Interval::new(0, 5, Role::Key),
            Interval::new(6, 11, Role::Value),
            Interval::new(2, 8, Role::ValueOnly),
            Interval::new(4, 4, Role::ValueOnly),
            Interval::new(0, 11, Role::ValueOnly),
        ];
        let points = breakpoints(12, &intervals);
        assert_eq!(coverage(&points, &intervals), linear_coverage(&points, &intervals));
    }

    #[test]
    fn coverage_keeps_interval_order() {
        // Later-starting interval listed first in input order.
        let intervals = vec![
            Interval::new(3, 6, Role::ValueOnly),
            Interval::new(0, 6, Role::ValueOnly),
        ];
        let points = breakpoints(6, &intervals);
        let cov = coverage(&points, &intervals);
        assert_eq!(cov, vec![vec![1], vec![0, 1]]);
    }

    #[test]
    fn coverage_of_empty_points_is_empty() {
        assert!(coverage(&[0], &[]).is_empty());
        assert!(coverage(&[], &[]).is_empty());
    }

    #[test]
    fn display_names() {
        assert_eq!(Classification::ValueOnly.to_string(), "valueOnly");
        assert_eq!(Classification::HoverOnly.as_str(), "hoverOnly");
        assert!(Classification::Overlap.is_highlighted());
        assert!(!Classification::HoverOnly.is_highlighted());
    }
}
