use crate::font::{FontFamily, FontWeight};
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum CvError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// A résumé document or the store file was not valid JSON
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    /// The template configuration was not valid TOML
    Toml(#[from] toml::de::Error),

    #[error("text measurement failed: {0}")]
    /// The text measurer could not measure or wrap text; the whole layout is abandoned
    Measure(#[from] MeasureError),

    #[error("invalid page geometry: {0}")]
    /// The page geometry cannot hold any content
    Geometry(String),

    #[error("unknown page size `{0}`")]
    /// The configuration named a page size that doesn't exist
    UnknownPageSize(String),

    #[error("no saved résumé with id {0}")]
    /// The store has no résumé under the requested id
    NotFound(uuid::Uuid),
}

/// Errors raised by a [`TextMeasurer`](crate::measure::TextMeasurer)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    #[error("no {weight:?} face loaded for the {family:?} font family")]
    FontNotLoaded {
        family: FontFamily,
        weight: FontWeight,
    },
}
