use crate::{
    content::{render_page, FontTable},
    error::CvError,
    font::FontBook,
    info::Info,
    layout::{DrawOp, Layout},
    refs::{ObjectReferences, RefType},
    units::Pt,
};
use pdf_writer::{Filter, Finish, Name, Pdf, Rect, Ref};
use std::io::Write;

/// A laid-out résumé on its way to PDF. Standard fonts are referenced by name; the
/// faces of the embedded family are taken from the [`FontBook`] the layout was
/// measured with.
pub struct Document<'f> {
    pub info: Option<Info>,
    pub layout: Layout,
    fonts: &'f FontBook,
}

impl<'f> Document<'f> {
    pub fn new(layout: Layout, fonts: &'f FontBook) -> Document<'f> {
        Document {
            info: None,
            layout,
            fonts,
        }
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Write the entire document to the writer. The whole PDF is rendered in memory
    /// first.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), CvError> {
        let Document {
            info,
            layout,
            fonts,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let pages: Vec<&[DrawOp]> = layout.pages().collect();
        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        let table = FontTable::collect(&layout);
        for (slot, font) in table.iter().enumerate() {
            match font.family.base_font(font.weight) {
                Some(base_font) => {
                    let id = refs.gen(RefType::Font(slot));
                    writer
                        .type1_font(id)
                        .base_font(Name(base_font.as_bytes()))
                        .encoding_predefined(Name(b"WinAnsiEncoding"));
                }
                None => fonts
                    .face(font.weight)?
                    .write(&mut refs, slot, &font.chars, &mut writer),
            }
        }
        let font_refs: Vec<(String, Ref)> = (0..table.len())
            .filter_map(|slot| {
                refs.get(RefType::Font(slot))
                    .map(|id| (format!("F{slot}"), id))
            })
            .collect();

        let geometry = &layout.geometry;
        let media_box = Rect::new(
            0.0,
            0.0,
            Pt::from(geometry.page_width).0,
            Pt::from(geometry.page_height).0,
        );

        for (page_index, (ops, id)) in pages.iter().zip(page_refs.iter()).enumerate() {
            let content = render_page(ops, geometry, &table, fonts)?;
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
                content.as_slice(),
                miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
            );
            let content_id = refs.gen(RefType::ContentForPage(page_index));
            writer
                .stream(content_id, compressed.as_slice())
                .filter(Filter::FlateDecode);

            let mut page = writer.page(*id);
            page.media_box(media_box);
            page.parent(page_tree_id);
            page.contents(content_id);
            let mut resources = page.resources();
            let mut resource_fonts = resources.fonts();
            for (name, font_id) in font_refs.iter() {
                resource_fonts.pair(Name(name.as_bytes()), *font_id);
            }
            resource_fonts.finish();
            resources.finish();
            page.finish();
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }

    /// [`Document::write`] into memory
    pub fn to_bytes(self) -> Result<Vec<u8>, CvError> {
        let mut bytes: Vec<u8> = Vec::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontFamily, FontWeight};
    use crate::pagesize::PageGeometry;
    use crate::units::Mm;

    fn layout(family: FontFamily) -> Layout {
        let text = |content: &str, weight| DrawOp::Text {
            content: content.to_string(),
            x: Mm(20.0),
            y: Mm(20.0),
            font: family,
            weight,
            size: Pt(10.0),
        };
        Layout {
            geometry: PageGeometry::new(Mm(210.0), Mm(297.0), Mm(20.0)).expect("valid"),
            ops: vec![
                text("Ana Souza", FontWeight::Bold),
                DrawOp::PageBreak,
                text("Go  •  Rust", FontWeight::Normal),
            ],
        }
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window == needle.as_bytes())
    }

    #[test]
    fn writes_one_pdf_page_per_layout_page() {
        let book = FontBook::new();
        let mut document = Document::new(layout(FontFamily::Times), &book);
        document.set_info(Info::for_resume("Ana Souza"));
        let bytes = document.to_bytes().expect("renders");

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, "/Count 2"));
        assert!(contains(&bytes, "/Times-Bold"));
        assert!(contains(&bytes, "/Times-Roman"));
        assert!(contains(&bytes, "/WinAnsiEncoding"));
        assert!(contains(&bytes, "/FlateDecode"));
        assert!(contains(&bytes, "CV - Ana Souza"));
    }

    #[test]
    fn embedded_family_embeds_the_faces() {
        let mut book = FontBook::new();
        book.insert(
            FontWeight::Normal,
            crate::font::Font::load(include_bytes!("../assets/DejaVuSansMono.ttf").to_vec())
                .expect("can load font"),
        );
        book.insert(
            FontWeight::Bold,
            crate::font::Font::load(
                include_bytes!("../assets/DejaVuSansMono-Bold.ttf").to_vec(),
            )
            .expect("can load font"),
        );
        let bytes = Document::new(layout(FontFamily::Embedded), &book)
            .to_bytes()
            .expect("renders");

        assert!(contains(&bytes, "/Type0"));
        assert!(contains(&bytes, "/Identity-H"));
        assert!(contains(&bytes, "/FontFile2"));
        assert!(!contains(&bytes, "/WinAnsiEncoding"));
    }

    #[test]
    fn embedded_family_without_faces_fails() {
        let book = FontBook::new();
        assert!(matches!(
            Document::new(layout(FontFamily::Embedded), &book).to_bytes(),
            Err(CvError::Measure(_))
        ));
    }
}
