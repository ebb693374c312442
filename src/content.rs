//! Page content streams: turns the draw ops of one page into PDF operators.

use crate::error::CvError;
use crate::font::{FontBook, FontFamily, FontWeight};
use crate::layout::{DrawOp, Layout};
use crate::pagesize::PageGeometry;
use crate::units::{Mm, Pt};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

/// One font resource of the document and every character drawn with it
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FontSlot {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub chars: BTreeSet<char>,
}

/// The fonts a layout draws with. A font's index in the table is its slot, and the
/// page resource for slot `n` is named `/F{n}`.
#[derive(Debug, Default)]
pub(crate) struct FontTable {
    slots: Vec<FontSlot>,
}

impl FontTable {
    pub fn collect(layout: &Layout) -> FontTable {
        let mut used: BTreeMap<(FontFamily, FontWeight), BTreeSet<char>> = BTreeMap::new();
        for op in layout.ops.iter() {
            if let DrawOp::Text {
                content,
                font,
                weight,
                ..
            } = op
            {
                used.entry((*font, *weight))
                    .or_default()
                    .extend(content.chars());
            }
        }

        FontTable {
            slots: used
                .into_iter()
                .map(|((family, weight), chars)| FontSlot {
                    family,
                    weight,
                    chars,
                })
                .collect(),
        }
    }

    pub fn slot(&self, family: FontFamily, weight: FontWeight) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.family == family && s.weight == weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontSlot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

/// The WinAnsiEncoding byte for a character, if it has one
pub fn winansi_byte(ch: char) -> Option<u8> {
    let byte = match ch {
        ' '..='~' | '\u{A0}'..='\u{FF}' => ch as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// Hex string contents for `text` in the given font. Standard fonts get WinAnsi bytes,
/// with '?' standing in for anything the encoding lacks; embedded faces get 2-byte
/// glyph ids.
fn encode_text(
    text: &str,
    family: FontFamily,
    weight: FontWeight,
    fonts: &FontBook,
) -> Result<String, CvError> {
    if family == FontFamily::Embedded {
        let face = fonts.face(weight)?;
        return Ok(text
            .chars()
            .map(|ch| format!("{:04x}", face.glyph_or_fallback(ch)))
            .collect());
    }

    let mut missing: Vec<char> = Vec::new();
    let hex = text
        .chars()
        .map(|ch| {
            let byte = winansi_byte(ch).unwrap_or_else(|| {
                missing.push(ch);
                b'?'
            });
            format!("{byte:02x}")
        })
        .collect();
    if !missing.is_empty() {
        tracing::warn!(
            ?missing,
            ?family,
            "characters outside WinAnsiEncoding were replaced with '?'"
        );
    }
    Ok(hex)
}

/// Renders the ops of a single page (no [`DrawOp::PageBreak`]s) to an uncompressed
/// content stream, flipping the top-left millimetre coordinates of the layout to PDF's
/// bottom-left points
#[allow(clippy::write_with_newline)]
pub(crate) fn render_page(
    ops: &[DrawOp],
    geometry: &PageGeometry,
    table: &FontTable,
    fonts: &FontBook,
) -> Result<Vec<u8>, CvError> {
    let page_height: Pt = geometry.page_height.into();
    let flip = |y: Mm| page_height - Pt::from(y);

    let mut content: Vec<u8> = Vec::default();
    for op in ops.iter() {
        match op {
            DrawOp::Text {
                content: text,
                x,
                y,
                font,
                weight,
                size,
            } => {
                let slot = table
                    .slot(*font, *weight)
                    .ok_or(crate::error::MeasureError::FontNotLoaded {
                        family: *font,
                        weight: *weight,
                    })?;
                write!(&mut content, "BT\n")?;
                write!(&mut content, "/F{slot} {} Tf\n", size.0)?;
                write!(&mut content, "{} {} Td\n", Pt::from(*x).0, flip(*y).0)?;
                write!(
                    &mut content,
                    "<{}> Tj\n",
                    encode_text(text, *font, *weight, fonts)?
                )?;
                write!(&mut content, "ET\n")?;
            }
            DrawOp::Rule {
                x1,
                y,
                x2,
                thickness,
            } => {
                write!(&mut content, "{} w\n", Pt::from(*thickness).0)?;
                write!(&mut content, "{} {} m\n", Pt::from(*x1).0, flip(*y).0)?;
                write!(&mut content, "{} {} l\n", Pt::from(*x2).0, flip(*y).0)?;
                write!(&mut content, "S\n")?;
            }
            DrawOp::PageBreak => {}
        }
    }

    Ok(content)
}
