//! From a résumé to a named PDF artifact: layout, PDF rendering, and hand-off to a sink.

use crate::config::TemplateConfig;
use crate::document::Document;
use crate::error::CvError;
use crate::font::{FontBook, FontWeight};
use crate::info::Info;
use crate::layout::layout_resume;
use crate::resume::{ResumeDocument, SectionVisibility};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where finished PDFs go
pub trait ArtifactSink {
    /// Store `bytes` under `filename`
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<(), CvError>;
}

/// Writes every artifact as a file inside one directory, creating it as needed
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: Into<PathBuf>>(dir: P) -> DirectorySink {
        DirectorySink { dir: dir.into() }
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<(), CvError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_of(filename);
        std::fs::write(&path, bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "wrote PDF");
        Ok(())
    }
}

/// Keeps artifacts in memory, in delivery order
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub artifacts: Vec<(String, Vec<u8>)>,
}

impl ArtifactSink for MemorySink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<(), CvError> {
        self.artifacts.push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}

/// `CV_{name}.pdf`, with every run of whitespace in the name collapsed to one underscore.
/// Path separators are replaced too so the name always stays a single file name.
pub fn export_filename(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        stem.push(if matches!(ch, '/' | '\\') { '_' } else { ch });
    }
    format!("CV_{stem}.pdf")
}

/// The faces for the embedded family named in the configuration, or an empty book when
/// the configuration only uses standard fonts
pub fn load_fonts(config: &TemplateConfig) -> Result<FontBook, CvError> {
    let mut book = FontBook::new();
    if let Some(embedded) = &config.embedded_fonts {
        book.load_file(FontWeight::Normal, &embedded.regular)?;
        book.load_file(FontWeight::Bold, &embedded.bold)?;
    }
    Ok(book)
}

/// Lay out and render a résumé to PDF bytes
pub fn render_pdf(
    document: &ResumeDocument,
    visibility: &SectionVisibility,
    config: &TemplateConfig,
    fonts: &FontBook,
) -> Result<Vec<u8>, CvError> {
    let layout = layout_resume(document, visibility, config.geometry()?, fonts, config)?;
    let mut pdf = Document::new(layout, fonts);
    pdf.set_info(Info::for_resume(&document.personal.name));
    pdf.to_bytes()
}

/// Render a résumé and deliver it to `sink` under its [`export_filename`]. Nothing is
/// delivered when layout or rendering fails. Returns the file name.
pub fn export<S: ArtifactSink + ?Sized>(
    document: &ResumeDocument,
    visibility: &SectionVisibility,
    config: &TemplateConfig,
    fonts: &FontBook,
    sink: &mut S,
) -> Result<String, CvError> {
    let bytes = render_pdf(document, visibility, config, fonts)?;
    let filename = export_filename(&document.personal.name);
    sink.deliver(&filename, &bytes)?;
    info!(%filename, bytes = bytes.len(), "exported résumé");
    Ok(filename)
}
