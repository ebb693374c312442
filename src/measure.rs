//! The text measurement capability the layout engine is driven by.

use crate::error::MeasureError;
use crate::font::TextStyle;
use crate::units::Mm;

const TABSIZE: usize = 4;

/// Measures and wraps text in a given style. Widths are returned in millimetres, the
/// same unit as the [`PageGeometry`](crate::pagesize::PageGeometry) being laid out.
///
/// Only [`measure_width`](TextMeasurer::measure_width) must be provided; the default
/// [`wrap_to_width`](TextMeasurer::wrap_to_width) is a greedy word wrap on top of it.
pub trait TextMeasurer {
    fn measure_width(&self, text: &str, style: &TextStyle) -> Result<Mm, MeasureError>;

    /// Split `text` into lines that each fit within `max_width`. Explicit newlines
    /// always start a new line (an empty source line stays an empty line), words are
    /// never hyphenated, and a single word wider than `max_width` is split between
    /// characters instead of overflowing.
    fn wrap_to_width(
        &self,
        text: &str,
        style: &TextStyle,
        max_width: Mm,
    ) -> Result<Vec<String>, MeasureError> {
        wrap_greedy(self, text, style, max_width)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure_width(&self, text: &str, style: &TextStyle) -> Result<Mm, MeasureError> {
        (**self).measure_width(text, style)
    }

    fn wrap_to_width(
        &self,
        text: &str,
        style: &TextStyle,
        max_width: Mm,
    ) -> Result<Vec<String>, MeasureError> {
        (**self).wrap_to_width(text, style, max_width)
    }
}

fn wrap_greedy<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    style: &TextStyle,
    max_width: Mm,
) -> Result<Vec<String>, MeasureError> {
    // normalize newlines and tabs
    let text = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', &" ".repeat(TABSIZE));

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();

        // the whitespace in front of each word is kept as written unless the line
        // breaks there
        for (gap, word) in words_with_gaps(paragraph) {
            let candidate = format!("{current}{gap}{word}");

            if measurer.measure_width(&candidate, style)? <= max_width {
                current = candidate;
                continue;
            }

            if current.trim().is_empty() {
                current.clear();
            } else {
                lines.push(std::mem::take(&mut current));
            }

            if measurer.measure_width(word, style)? <= max_width {
                current = word.to_string();
            } else {
                // no break point in the word, so split between characters
                let mut pieces = break_word(measurer, word, style, max_width)?;
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }

        lines.push(current);
    }

    Ok(lines)
}

/// Each word of `line` paired with the run of whitespace before it. Whitespace after
/// the last word is dropped.
fn words_with_gaps(line: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut rest = line;
    std::iter::from_fn(move || {
        let word_start = rest.find(|c: char| !c.is_whitespace())?;
        let (gap, tail) = rest.split_at(word_start);
        let word_end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let (word, tail) = tail.split_at(word_end);
        rest = tail;
        Some((gap, word))
    })
}

/// Split a word into pieces that each fit, keeping at least one character per piece
fn break_word<M: TextMeasurer + ?Sized>(
    measurer: &M,
    word: &str,
    style: &TextStyle,
    max_width: Mm,
) -> Result<Vec<String>, MeasureError> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        if piece.chars().count() > 1 && measurer.measure_width(&piece, style)? > max_width {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    Ok(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontFamily, FontWeight};
    use crate::units::Pt;

    /// Every character is exactly 1mm wide
    struct Monospace;

    impl TextMeasurer for Monospace {
        fn measure_width(&self, text: &str, _style: &TextStyle) -> Result<Mm, MeasureError> {
            Ok(Mm(text.chars().count() as f32))
        }
    }

    fn style() -> TextStyle {
        TextStyle::new(FontFamily::Courier, FontWeight::Normal, Pt(10.0))
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let lines = Monospace
            .wrap_to_width("the quick brown fox jumps", &style(), Mm(10.0))
            .expect("wraps");
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn keeps_whitespace_runs_within_a_line() {
        let lines = Monospace
            .wrap_to_width("Go  •  Rust", &style(), Mm(40.0))
            .expect("wraps");
        assert_eq!(lines, vec!["Go  •  Rust"]);
    }

    #[test]
    fn drops_whitespace_runs_at_line_breaks() {
        let lines = Monospace
            .wrap_to_width("Go  •  Rust   C", &style(), Mm(6.0))
            .expect("wraps");
        assert_eq!(lines, vec!["Go  •", "Rust", "C"]);

        let lines = Monospace
            .wrap_to_width("  indented text  ", &style(), Mm(12.0))
            .expect("wraps");
        assert_eq!(lines, vec!["  indented", "text"]);
    }

    #[test]
    fn honours_explicit_newlines() {
        let lines = Monospace
            .wrap_to_width("first\r\n\nsecond line", &style(), Mm(40.0))
            .expect("wraps");
        assert_eq!(lines, vec!["first", "", "second line"]);
    }

    #[test]
    fn splits_words_that_cannot_fit() {
        let lines = Monospace
            .wrap_to_width("ab abcdefghij", &style(), Mm(4.0))
            .expect("wraps");
        assert_eq!(lines, vec!["ab", "abcd", "efgh", "ij"]);
    }

    #[test]
    fn every_line_fits() {
        let text = lipsum::lipsum(120);
        let lines = Monospace
            .wrap_to_width(&text, &style(), Mm(35.0))
            .expect("wraps");
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 35));
        assert_eq!(
            lines.join(" ").split_whitespace().count(),
            text.split_whitespace().count()
        );
    }

    #[test]
    fn empty_text_is_a_single_empty_line() {
        let lines = Monospace.wrap_to_width("", &style(), Mm(10.0)).expect("wraps");
        assert_eq!(lines, vec![String::new()]);
    }
}
