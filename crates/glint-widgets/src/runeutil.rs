//! Unicode-aware layout of highlighted segments into terminal rows.
//!
//! Text is wrapped at character granularity to a fixed column width, with
//! explicit newlines respected. Every laid-out run remembers the segment it
//! came from so a mouse position can be mapped back to a segment.

use unicode_width::UnicodeWidthChar;

use crate::highlight::Segment;

/// Display width of one character: tabs count as one column, other control
/// characters as zero.
pub fn char_width(c: char) -> u16 {
    if c == '\t' {
        return 1;
    }
    c.width().map_or(0, |w| w as u16)
}

/// Display width of a string.
pub fn display_width(s: &str) -> usize {
    s.chars().map(|c| char_width(c) as usize).sum()
}

/// A piece of one segment placed on a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Index of the source segment.
    pub segment: usize,
    pub text: String,
    /// Column of the first cell, relative to the row start.
    pub col: u16,
    pub width: u16,
}

/// One terminal row of laid-out text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub runs: Vec<Run>,
}

impl Row {
    /// The segment drawn at column `col`, if any.
    pub fn segment_at(&self, col: u16) -> Option<usize> {
        self.runs
            .iter()
            .find(|run| run.col <= col && col < run.col + run.width)
            .map(|run| run.segment)
    }

    pub fn width(&self) -> u16 {
        self.runs.last().map_or(0, |run| run.col + run.width)
    }

    fn push(&mut self, segment: usize, c: char, width: u16) {
        let text_char = if c == '\t' { ' ' } else { c };
        match self.runs.last_mut() {
            Some(run) if run.segment == segment => {
                run.text.push(text_char);
                run.width += width;
            }
            _ => {
                let col = self.width();
                self.runs.push(Run {
                    segment,
                    text: text_char.to_string(),
                    col,
                    width,
                });
            }
        }
    }
}

/// Lay out `segments` into rows at most `width` columns wide.
///
/// A character wider than the whole row still gets a row of its own. A zero
/// width yields no rows.
pub fn wrap_segments(segments: &[Segment], width: u16) -> Vec<Row> {
    if width == 0 {
        return Vec::new();
    }
    let mut rows = vec![Row::default()];
    for (index, segment) in segments.iter().enumerate() {
        for c in segment.text.chars() {
            if c == '\n' {
                rows.push(Row::default());
                continue;
            }
            let w = char_width(c);
            let Some(row) = rows.last_mut() else { continue };
            if row.width() > 0 && row.width() + w > width {
                rows.push(Row::default());
            }
            if let Some(row) = rows.last_mut() {
                row.push(index, c, w);
            }
        }
    }
    rows
}

/// Row index of the first cell drawn for segment `index`.
pub fn row_of_segment(rows: &[Row], index: usize) -> Option<usize> {
    rows.iter()
        .position(|row| row.runs.iter().any(|run| run.segment == index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::Classification;

    fn seg(start: usize, text: &str) -> Segment {
        Segment {
            start,
            stop: start + text.chars().count(),
            text: text.to_string(),
            classification: Classification::None,
            covering: vec![],
            covering_groups: vec![],
        }
    }

    fn row_texts(rows: &[Row]) -> Vec<String> {
        rows.iter()
            .map(|r| r.runs.iter().map(|run| run.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn widths() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('日'), 2);
        assert_eq!(char_width('\t'), 1);
        assert_eq!(display_width("a日b"), 4);
    }

    #[test]
    fn wraps_at_width_across_segments() {
        let segments = vec![seg(0, "hello"), seg(5, " "), seg(6, "world")];
        let rows = wrap_segments(&segments, 4);
        assert_eq!(row_texts(&rows), vec!["hell", "o wo", "rld"]);
        // Row 1 carries three runs, one per segment.
        let segs: Vec<_> = rows[1].runs.iter().map(|r| (r.segment, r.col)).collect();
        assert_eq!(segs, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn newlines_start_rows() {
        let rows = wrap_segments(&[seg(0, "ab\ncd\n")], 10);
        assert_eq!(row_texts(&rows), vec!["ab", "cd", ""]);
    }

    #[test]
    fn wide_chars_do_not_split() {
        let rows = wrap_segments(&[seg(0, "a日日")], 3);
        assert_eq!(row_texts(&rows), vec!["a日", "日"]);
        assert_eq!(rows[0].width(), 3);
    }

    #[test]
    fn zero_width_has_no_rows() {
        assert!(wrap_segments(&[seg(0, "abc")], 0).is_empty());
    }

    #[test]
    fn hit_testing_columns() {
        let segments = vec![seg(0, "ab"), seg(2, "日"), seg(3, "c")];
        let rows = wrap_segments(&segments, 10);
        assert_eq!(rows[0].segment_at(0), Some(0));
        assert_eq!(rows[0].segment_at(2), Some(1));
        assert_eq!(rows[0].segment_at(3), Some(1));
        assert_eq!(rows[0].segment_at(4), Some(2));
        assert_eq!(rows[0].segment_at(5), None);
        assert_eq!(row_of_segment(&rows, 2), Some(0));
        assert_eq!(row_of_segment(&rows, 9), None);
    }
}
