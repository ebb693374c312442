//! Advance widths for the PDF standard fonts, taken from the Adobe font metrics that
//! ship with every conforming viewer.
//!
//! Widths are in 1/1000 em. The tables cover printable ASCII (0x20..=0x7E); the
//! handful of WinAnsi punctuation marks résumés actually use are listed separately,
//! and accented Latin letters are measured as their unaccented base letter (the
//! standard fonts draw them at the same advance).

use crate::error::MeasureError;
use crate::font::{FontFamily, FontWeight, TextStyle};
use crate::measure::TextMeasurer;
use crate::units::Mm;

/// Width used for anything the tables don't cover
const FALLBACK_WIDTH: u16 = 500;

#[rustfmt::skip]
static TIMES_ROMAN: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    // 0-9
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    // :    ;    <    =    >    ?    @
    278, 278, 564, 564, 564, 444, 921,
    // A-M
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    // N-Z
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    // [    \    ]    ^    _    `
    333, 278, 333, 469, 500, 333,
    // a-m
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    // n-z
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    // {    |    }    ~
    480, 200, 480, 541,
];

#[rustfmt::skip]
static TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 930,
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
    722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
    333, 278, 333, 581, 500, 333,
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
    556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
    394, 220, 394, 520,
];

#[rustfmt::skip]
static HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Metric-table [`TextMeasurer`] for the standard Times, Helvetica and Courier families.
/// It never fails for those; asking it to measure [`FontFamily::Embedded`] text is a
/// [`MeasureError::FontNotLoaded`].
#[derive(Debug, Default, Copy, Clone)]
pub struct StandardMetrics;

impl StandardMetrics {
    /// Advance width of one character, in 1/1000 em
    pub fn char_width(family: FontFamily, weight: FontWeight, ch: char) -> Option<u16> {
        let table = match (family, weight) {
            (FontFamily::Courier, _) => return Some(600),
            (FontFamily::Times, FontWeight::Normal) => &TIMES_ROMAN,
            (FontFamily::Times, FontWeight::Bold) => &TIMES_BOLD,
            (FontFamily::Helvetica, FontWeight::Normal) => &HELVETICA,
            (FontFamily::Helvetica, FontWeight::Bold) => &HELVETICA_BOLD,
            (FontFamily::Embedded, _) => return None,
        };

        let ch = base_letter(ch).unwrap_or(ch);
        let width = match ch {
            ' '..='~' => table[ch as usize - 0x20],
            '\u{a0}' => table[0],
            '•' => 350,
            '–' => 500,
            '—' => 1000,
            '‘' | '’' => 333,
            '“' | '”' => match family {
                FontFamily::Helvetica => 333,
                _ => 444,
            },
            '€' => match family {
                FontFamily::Helvetica => 556,
                _ => 500,
            },
            _ => FALLBACK_WIDTH,
        };
        Some(width)
    }
}

impl TextMeasurer for StandardMetrics {
    fn measure_width(&self, text: &str, style: &TextStyle) -> Result<Mm, MeasureError> {
        let mut units: u32 = 0;
        for ch in text.chars() {
            units += StandardMetrics::char_width(style.family, style.weight, ch).ok_or(
                MeasureError::FontNotLoaded {
                    family: style.family,
                    weight: style.weight,
                },
            )? as u32;
        }
        Ok((style.size * (units as f32 / 1000.0)).into())
    }
}

/// The unaccented letter an accented Latin-1 letter is drawn on top of
fn base_letter(ch: char) -> Option<char> {
    let base = match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}
