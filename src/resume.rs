//! The résumé document the engine lays out, as produced by the editing front-end.
//!
//! Everything deserializes from the camelCase JSON the front-end stores; the older key
//! names (`personalInfo`, `linkedin`, `current`, ...) are accepted as aliases and every
//! missing field falls back to its empty default.

use crate::date::YearMonth;
use serde::de::value::StrDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    #[serde(alias = "personalInfo")]
    pub personal: PersonalInfo,
    pub objective: String,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub languages: Vec<Language>,
    pub certifications: Vec<Certification>,
    pub additional_sections: Vec<AdditionalSection>,
}

/// Contact details. An empty string means the field is absent.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(alias = "linkedin")]
    pub profile_url: String,
    #[serde(alias = "portfolio")]
    pub portfolio_url: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(alias = "current")]
    pub is_current: bool,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(alias = "current")]
    pub is_current: bool,
    pub description: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Proficiency {
    #[serde(alias = "Básico")]
    Basic,
    #[serde(alias = "Intermediário")]
    Intermediate,
    #[serde(alias = "Avançado")]
    Advanced,
    #[serde(alias = "Fluente")]
    Fluent,
    #[serde(alias = "Nativo")]
    Native,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    #[serde(alias = "language")]
    pub language_name: String,
    #[serde(alias = "proficiency", deserialize_with = "blank_as_none")]
    pub proficiency_level: Option<Proficiency>,
}

/// The editor stores an unset proficiency as an empty string
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Proficiency>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(level) => {
            let level: StrDeserializer<'_, D::Error> = level.into_deserializer();
            Proficiency::deserialize(level).map(Some)
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub url: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalSection {
    pub title: String,
    pub content: Vec<String>,
}

/// Something with a start date and an optional end date, laid out as a dated entry
pub trait Dated {
    fn start_date(&self) -> &str;
    fn end_date(&self) -> &str;
    fn is_current(&self) -> bool;

    /// The end date to render. Current entries have none, whatever is stored.
    fn effective_end_date(&self) -> Option<&str> {
        if self.is_current() {
            None
        } else {
            Some(self.end_date())
        }
    }

    fn start_key(&self) -> Option<YearMonth> {
        YearMonth::parse(self.start_date())
    }
}

impl Dated for Experience {
    fn start_date(&self) -> &str {
        &self.start_date
    }

    fn end_date(&self) -> &str {
        &self.end_date
    }

    fn is_current(&self) -> bool {
        self.is_current
    }
}

impl Dated for Education {
    fn start_date(&self) -> &str {
        &self.start_date
    }

    fn end_date(&self) -> &str {
        &self.end_date
    }

    fn is_current(&self) -> bool {
        self.is_current
    }
}

/// Newest first. Entries without a parseable start date sort last; ties keep their
/// document order.
pub fn sort_by_start_descending<T: Dated>(entries: &mut [&T]) {
    entries.sort_by(|a, b| b.start_key().cmp(&a.start_key()));
}

impl ResumeDocument {
    /// Experiences that identify a company or a position, newest first
    pub fn listed_experiences(&self) -> Vec<&Experience> {
        let mut listed: Vec<&Experience> = self
            .experiences
            .iter()
            .filter(|e| !e.company.is_empty() || !e.position.is_empty())
            .collect();
        sort_by_start_descending(&mut listed);
        listed
    }

    /// Education entries that identify an institution or a degree, newest first
    pub fn listed_education(&self) -> Vec<&Education> {
        let mut listed: Vec<&Education> = self
            .education
            .iter()
            .filter(|e| !e.institution.is_empty() || !e.degree.is_empty())
            .collect();
        sort_by_start_descending(&mut listed);
        listed
    }

    /// Trimmed, non-empty skills in document order
    pub fn listed_skills(&self) -> Vec<&str> {
        non_blank(&self.skills)
    }

    pub fn listed_languages(&self) -> Vec<&Language> {
        self.languages
            .iter()
            .filter(|l| !l.language_name.is_empty())
            .collect()
    }

    pub fn listed_certifications(&self) -> Vec<&Certification> {
        self.certifications
            .iter()
            .filter(|c| !c.name.is_empty() || !c.issuer.is_empty())
            .collect()
    }

    /// Additional sections with at least one non-blank item, paired with those items
    pub fn listed_additional_sections(&self) -> Vec<(&AdditionalSection, Vec<&str>)> {
        self.additional_sections
            .iter()
            .map(|section| (section, non_blank(&section.content)))
            .filter(|(_, items)| !items.is_empty())
            .collect()
    }
}

impl Experience {
    pub fn listed_achievements(&self) -> Vec<&str> {
        non_blank(&self.achievements)
    }
}

fn non_blank(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect()
}

/// The sections a user can switch on and off
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Objective,
    Experience,
    Education,
    Skills,
    Languages,
    Certifications,
}

impl SectionKey {
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Objective,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Languages,
        SectionKey::Certifications,
    ];
}

/// Which sections to include. A section that is absent from the map, or mapped to
/// `false`, is left out together with its heading. Skills have no toggle in the editor
/// and are always shown.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionVisibility {
    sections: BTreeMap<SectionKey, bool>,
}

impl SectionVisibility {
    /// Every section switched on
    pub fn all() -> SectionVisibility {
        SectionVisibility {
            sections: SectionKey::ALL.iter().map(|&key| (key, true)).collect(),
        }
    }

    /// Switch a section on or off, modifying `self`
    pub fn set(&mut self, key: SectionKey, visible: bool) -> &mut Self {
        self.sections.insert(key, visible);
        self
    }

    pub fn is_visible(&self, key: SectionKey) -> bool {
        key == SectionKey::Skills || self.sections.get(&key).copied().unwrap_or(false)
    }
}
