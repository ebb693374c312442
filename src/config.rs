//! Template configuration: page, typography and the fixed strings printed on the page.
//!
//! Every field has a default, so an empty TOML file (or none at all) gives the classic
//! ATS-friendly template: A4, 20mm margins, Times, Portuguese labels.

use crate::error::CvError;
use crate::font::{FontFamily, FontWeight, TextStyle};
use crate::pagesize::{self, PageGeometry};
use crate::resume::Proficiency;
use crate::units::{Mm, Pt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// One of the names understood by [`pagesize::by_name`]
    pub page_size: String,
    pub landscape: bool,
    pub margin: Mm,
    pub font: FontFamily,
    /// TrueType faces for [`FontFamily::Embedded`]
    pub embedded_fonts: Option<EmbeddedFonts>,
    pub name_size: Pt,
    pub heading_size: Pt,
    pub content_size: Pt,
    pub labels: Labels,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedFonts {
    pub regular: PathBuf,
    pub bold: PathBuf,
}

/// Fixed text printed around the document's own content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub objective: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub languages: String,
    pub certifications: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub profile: String,
    pub portfolio: String,
    /// End of a date range for an ongoing entry
    pub present: String,
    /// Joins a degree to its field of study
    pub field_joiner: String,
    pub basic: String,
    pub intermediate: String,
    pub advanced: String,
    pub fluent: String,
    pub native: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            page_size: "A4".to_string(),
            landscape: false,
            margin: Mm(20.0),
            font: FontFamily::Times,
            embedded_fonts: None,
            name_size: Pt(18.0),
            heading_size: Pt(14.0),
            content_size: Pt(10.0),
            labels: Labels::default(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            objective: "Objetivo Profissional".to_string(),
            experience: "Experiência Profissional".to_string(),
            education: "Formação Acadêmica".to_string(),
            skills: "Habilidades".to_string(),
            languages: "Idiomas".to_string(),
            certifications: "Certificações".to_string(),
            email: "E-mail: ".to_string(),
            phone: "Telefone: ".to_string(),
            location: "Localização: ".to_string(),
            profile: "LinkedIn: ".to_string(),
            portfolio: "Portfolio: ".to_string(),
            present: "Presente".to_string(),
            field_joiner: " em ".to_string(),
            basic: "Básico".to_string(),
            intermediate: "Intermediário".to_string(),
            advanced: "Avançado".to_string(),
            fluent: "Fluente".to_string(),
            native: "Nativo".to_string(),
        }
    }
}

impl Labels {
    pub fn proficiency(&self, level: Proficiency) -> &str {
        match level {
            Proficiency::Basic => &self.basic,
            Proficiency::Intermediate => &self.intermediate,
            Proficiency::Advanced => &self.advanced,
            Proficiency::Fluent => &self.fluent,
            Proficiency::Native => &self.native,
        }
    }
}

impl TemplateConfig {
    /// Read a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<TemplateConfig, CvError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: TemplateConfig = toml::from_str(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded template configuration");
        Ok(config)
    }

    /// The page the résumé is laid out on
    pub fn geometry(&self) -> Result<PageGeometry, CvError> {
        use pagesize::PageOrientation;

        let size = pagesize::by_name(&self.page_size)
            .ok_or_else(|| CvError::UnknownPageSize(self.page_size.clone()))?;
        let size = if self.landscape {
            size.landscape()
        } else {
            size.portrait()
        };
        PageGeometry::from_size(size, self.margin)
    }

    pub fn name_style(&self) -> TextStyle {
        TextStyle::new(self.font, FontWeight::Bold, self.name_size)
    }

    pub fn heading_style(&self) -> TextStyle {
        TextStyle::new(self.font, FontWeight::Bold, self.heading_size)
    }

    pub fn body_style(&self, weight: FontWeight) -> TextStyle {
        TextStyle::new(self.font, weight, self.content_size)
    }
}
