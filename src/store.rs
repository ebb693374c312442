//! Saved résumés, kept together in one JSON file.

use crate::error::CvError;
use crate::resume::ResumeDocument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResume {
    pub id: Uuid,
    pub name: String,
    pub document: ResumeDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A [`SavedResume`] without its document, for listings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&SavedResume> for ResumeSummary {
    fn from(saved: &SavedResume) -> ResumeSummary {
        ResumeSummary {
            id: saved.id,
            name: saved.name.clone(),
            created_at: saved.created_at,
            updated_at: saved.updated_at,
        }
    }
}

/// Every operation reads the file afresh and writes it back whole. A file that doesn't
/// exist yet is an empty store.
#[derive(Debug, Clone)]
pub struct ResumeStore {
    path: PathBuf,
}

impl ResumeStore {
    pub fn open<P: Into<PathBuf>>(path: P) -> ResumeStore {
        ResumeStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<SavedResume>, CvError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no store file yet");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, resumes: &[SavedResume]) -> Result<(), CvError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(resumes)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Save under `name`, overwriting any résumé already saved under that name while
    /// keeping its id and creation time
    pub fn save(&self, name: &str, document: ResumeDocument) -> Result<SavedResume, CvError> {
        let mut resumes = self.read_all()?;
        let now = Utc::now();

        let saved = match resumes.iter_mut().find(|r| r.name == name) {
            Some(existing) => {
                existing.document = document;
                existing.updated_at = now;
                existing.clone()
            }
            None => {
                let saved = SavedResume {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    document,
                    created_at: now,
                    updated_at: now,
                };
                resumes.push(saved.clone());
                saved
            }
        };

        self.write_all(&resumes)?;
        info!(id = %saved.id, name, "saved résumé");
        Ok(saved)
    }

    pub fn load(&self, id: Uuid) -> Result<Option<SavedResume>, CvError> {
        Ok(self.read_all()?.into_iter().find(|r| r.id == id))
    }

    /// Like [`ResumeStore::load`], but a missing résumé is an error
    pub fn get(&self, id: Uuid) -> Result<SavedResume, CvError> {
        self.load(id)?.ok_or(CvError::NotFound(id))
    }

    /// Summaries of every saved résumé, most recently updated first
    pub fn list(&self) -> Result<Vec<ResumeSummary>, CvError> {
        let mut summaries: Vec<ResumeSummary> =
            self.read_all()?.iter().map(ResumeSummary::from).collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    /// Returns whether anything was deleted
    pub fn delete(&self, id: Uuid) -> Result<bool, CvError> {
        let mut resumes = self.read_all()?;
        let before = resumes.len();
        resumes.retain(|r| r.id != id);
        if resumes.len() == before {
            return Ok(false);
        }

        self.write_all(&resumes)?;
        info!(%id, "deleted résumé");
        Ok(true)
    }
}
