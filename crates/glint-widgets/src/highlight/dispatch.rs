//! Mapping an interaction on a segment back to the groups under it.

use super::interval::Interval;
use super::Segment;

/// Group keys of `intervals`, de-duplicated, in first-seen order.
pub fn covering_group_keys<'a>(intervals: impl IntoIterator<Item = &'a Interval>) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in intervals.into_iter().filter_map(|i| i.group.as_deref()) {
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

/// The keys to report for a click on `segment`, or `None` when nothing
/// covers it and no callback should fire.
pub fn dispatch(segment: &Segment) -> Option<Vec<String>> {
    if segment.covering_groups.is_empty() {
        None
    } else {
        Some(segment.covering_groups.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::classify::Classification;
    use crate::highlight::interval::Role;

    #[test]
    fn keys_are_deduplicated_in_first_seen_order() {
        let intervals = vec![
            Interval::new(0, 4, Role::Key).with_group("b"),
            Interval::new(0, 4, Role::Value).with_group("a"),
            Interval::new(0, 4, Role::Value).with_group("b"),
            Interval::new(0, 4, Role::ValueOnly),
        ];
        assert_eq!(covering_group_keys(&intervals), vec!["b", "a"]);
    }

    #[test]
    fn uncovered_segment_dispatches_nothing() {
        let segment = Segment {
            start: 0,
            stop: 3,
            text: "abc".into(),
            classification: Classification::None,
            covering: vec![],
            covering_groups: vec![],
        };
        assert_eq!(dispatch(&segment), None);
    }

    #[test]
    fn covered_segment_dispatches_keys() {
        let segment = Segment {
            start: 0,
            stop: 3,
            text: "abc".into(),
            classification: Classification::HoverOnly,
            covering: vec![0],
            covering_groups: vec!["g1".into()],
        };
        assert_eq!(dispatch(&segment), Some(vec!["g1".to_string()]));
    }
}
