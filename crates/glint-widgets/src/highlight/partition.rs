//! Breakpoint computation: the offsets at which coverage may change.

use super::interval::Interval;

/// Sorted, de-duplicated breakpoints for a text of `len` characters.
///
/// Always contains `0` and `len` (a single `0` for empty text). Coincident
/// interval boundaries collapse into one breakpoint.
pub fn breakpoints(len: usize, intervals: &[Interval]) -> Vec<usize> {
    let mut points = Vec::with_capacity(intervals.len() * 2 + 2);
    points.push(0);
    points.push(len);
    for interval in intervals {
        points.push(interval.start);
        points.push(interval.stop);
    }
    points.sort_unstable();
    points.dedup();
    points
}

/// The `[start, stop)` bounds of every segment between consecutive breakpoints.
pub fn segment_bounds(points: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    points.windows(2).map(|w| (w[0], w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::interval::Role;

    #[test]
    fn empty_text_without_intervals() {
        let points = breakpoints(0, &[]);
        assert_eq!(points, vec![0]);
        assert_eq!(segment_bounds(&points).count(), 0);
    }

    #[test]
    fn text_without_intervals_is_one_segment() {
        let points = breakpoints(11, &[]);
        assert_eq!(segment_bounds(&points).collect::<Vec<_>>(), vec![(0, 11)]);
    }

    #[test]
    fn coincident_boundaries_collapse() {
        let intervals = vec![
            Interval::new(0, 5, Role::Key),
            Interval::new(5, 11, Role::Value),
            Interval::new(5, 8, Role::ValueOnly),
        ];
        assert_eq!(breakpoints(11, &intervals), vec![0, 5, 8, 11]);
    }

    #[test]
    fn strictly_increasing() {
        let intervals = vec![
            Interval::new(6, 9, Role::Value),
            Interval::new(2, 4, Role::Key),
            Interval::new(2, 9, Role::ValueOnly),
        ];
        let points = breakpoints(10, &intervals);
        assert!(points.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(points, vec![0, 2, 4, 6, 9, 10]);
    }
}
