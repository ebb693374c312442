use crate::{
    error::MeasureError,
    measure::TextMeasurer,
    metrics::StandardMetrics,
    refs::{ObjectReferences, RefType},
    units::{Mm, Pt},
    CvError,
};
use id_arena::{Arena, Id};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The font families a résumé can be set in. The first three are the PDF standard
/// fonts, which every viewer ships with and which are measured from built-in metric
/// tables. `Embedded` refers to the TrueType faces registered in a [`FontBook`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Times,
    Helvetica,
    Courier,
    Embedded,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontFamily {
    /// The PostScript name of the standard Type1 font, or [None] for embedded faces
    pub fn base_font(self, weight: FontWeight) -> Option<&'static str> {
        match (self, weight) {
            (FontFamily::Times, FontWeight::Normal) => Some("Times-Roman"),
            (FontFamily::Times, FontWeight::Bold) => Some("Times-Bold"),
            (FontFamily::Helvetica, FontWeight::Normal) => Some("Helvetica"),
            (FontFamily::Helvetica, FontWeight::Bold) => Some("Helvetica-Bold"),
            (FontFamily::Courier, FontWeight::Normal) => Some("Courier"),
            (FontFamily::Courier, FontWeight::Bold) => Some("Courier-Bold"),
            (FontFamily::Embedded, _) => None,
        }
    }
}

/// Everything needed to measure or draw a run of text
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub size: Pt,
}

impl TextStyle {
    pub fn new(family: FontFamily, weight: FontWeight, size: Pt) -> TextStyle {
        TextStyle {
            family,
            weight,
            size,
        }
    }
}

/// A parsed TrueType / OpenType font. The whole font file is embedded in the generated
/// PDF, so large fonts may dramatically increase the size of the output.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, CvError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Obtain the full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph drawn for `ch`, falling back to the replacement character, then '?',
    /// then the font's .notdef glyph
    pub fn glyph_or_fallback(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    fn advance(&self, gid: u16) -> u16 {
        self.face
            .as_face_ref()
            .glyph_hor_advance(GlyphId(gid))
            .unwrap_or_default()
    }

    fn units_per_em(&self) -> f32 {
        self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the width of a given string of text given the font size
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let scaling = size / self.units_per_em();
        text.chars()
            .map(|ch| scaling * self.advance(self.glyph_or_fallback(ch)) as f32)
            .sum()
    }

    /// Writes the font as a Type0 font with a single Identity-H CID descendant. Only the
    /// glyphs for `used` characters are listed in the widths array and the ToUnicode
    /// map; the font program itself is embedded whole.
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        slot: usize,
        used: &BTreeSet<char>,
        writer: &mut Pdf,
    ) {
        let font_id = refs.gen(RefType::Font(slot));
        let cid_font_id = refs.gen(RefType::CidFont(slot));
        let descriptor_id = refs.gen(RefType::FontDescriptor(slot));
        let data_id = refs.gen(RefType::FontData(slot));
        let to_unicode_id = refs.gen(RefType::ToUnicode(slot));

        // gid -> the first char that maps onto it
        let mut glyphs: BTreeMap<u16, char> = BTreeMap::new();
        for &ch in used.iter() {
            glyphs.entry(self.glyph_or_fallback(ch)).or_insert(ch);
        }

        let base_font = format!("F{slot}");
        let scaling = 1000.0 / self.units_per_em();

        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        self.write_descriptor(descriptor_id, data_id, scaling, writer);

        let mut cid_font = writer.cid_font(cid_font_id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_font.as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(1000.0);
        let mut widths = cid_font.widths();
        for &gid in glyphs.keys() {
            widths.consecutive(gid, [self.advance(gid) as f32 * scaling]);
        }
        widths.finish();
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        cid_font.finish();

        let cmap = to_unicode_cmap(&glyphs);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(to_unicode_id, compressed.as_slice())
            .filter(pdf_writer::Filter::FlateDecode);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(base_font.as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }

    fn write_descriptor(&self, id: Ref, data_id: Ref, scaling: f32, writer: &mut Pdf) {
        let face = self.face.as_face_ref();
        let name = self.name().unwrap_or_else(|| "Embedded".to_string());
        let family = self.family().unwrap_or_else(|| name.clone());
        let bbox = face.global_bounding_box();

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.replace(' ', "").as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(0.0);
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(face.ascender() as f32 * scaling),
        );
        // TODO: read the real stem width from the CFF/glyf hinting data
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_id);
    }
}

fn to_unicode_cmap(glyphs: &BTreeMap<u16, char>) -> String {
    let mut map = String::from(
        "/CIDInit /ProcSet findresource begin\n12 dict begin\nbegincmap\n\
         /CIDSystemInfo\n<< /Registry (Adobe)\n/Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n/CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
    );

    // bfchar blocks hold at most 100 entries each
    let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
    for block in entries.chunks(100) {
        map.push_str(&format!("{} beginbfchar\n", block.len()));
        for (gid, ch) in block {
            let mut utf16 = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            map.push_str(&format!("<{gid:04x}> <{hex}>\n"));
        }
        map.push_str("endbfchar\n");
    }

    map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");
    map
}

/// TrueType faces for the [`FontFamily::Embedded`] family, one per weight. Measuring
/// any of the standard families is delegated to [`StandardMetrics`].
#[derive(Default)]
pub struct FontBook {
    pub fonts: Arena<Font>,
    regular: Option<Id<Font>>,
    bold: Option<Id<Font>>,
}

impl FontBook {
    pub fn new() -> FontBook {
        FontBook::default()
    }

    /// Register the face used for the given weight, replacing any earlier one
    pub fn insert(&mut self, weight: FontWeight, font: Font) -> Id<Font> {
        let id = self.fonts.alloc(font);
        match weight {
            FontWeight::Normal => self.regular = Some(id),
            FontWeight::Bold => self.bold = Some(id),
        }
        id
    }

    /// Load and register a face from disk
    pub fn load_file<P: AsRef<std::path::Path>>(
        &mut self,
        weight: FontWeight,
        path: P,
    ) -> Result<Id<Font>, CvError> {
        let bytes = std::fs::read(path.as_ref())?;
        let font = Font::load(bytes)?;
        tracing::debug!(path = %path.as_ref().display(), ?weight, "loaded embedded font");
        Ok(self.insert(weight, font))
    }

    /// The embedded face for a weight
    pub fn face(&self, weight: FontWeight) -> Result<&Font, MeasureError> {
        let id = match weight {
            FontWeight::Normal => self.regular,
            FontWeight::Bold => self.bold,
        };
        id.and_then(|id| self.fonts.get(id))
            .ok_or(MeasureError::FontNotLoaded {
                family: FontFamily::Embedded,
                weight,
            })
    }
}

impl TextMeasurer for FontBook {
    fn measure_width(&self, text: &str, style: &TextStyle) -> Result<Mm, MeasureError> {
        match style.family {
            FontFamily::Embedded => {
                let face = self.face(style.weight)?;
                Ok(face.width_of_text(text, style.size).into())
            }
            _ => StandardMetrics.measure_width(text, style),
        }
    }
}
