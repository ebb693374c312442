//! Lays a résumé out on fixed-size pages and writes it as a PDF.
//!
//! A [`ResumeDocument`] is paginated by the [`layout`] engine into a stream of positioned
//! draw ops, which [`Document`] turns into PDF bytes and [`export()`] hands to an
//! [`ArtifactSink`] under the conventional `CV_{name}.pdf` file name.

mod config;
pub use config::*;

mod content;

mod date;
pub use date::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod export;
pub use export::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Pagination of a résumé into positioned draw ops
pub mod layout;

mod measure;
pub use measure::*;

mod metrics;
pub use metrics::*;

/// Standard page sizes and the geometry of a laid-out page
pub mod pagesize;

pub(crate) mod refs;

mod resume;
pub use resume::*;

mod store;
pub use store::*;

mod units;
pub use units::*;
