//! Pagination of a résumé into positioned draw ops.
//!
//! [`Composer::compose`] walks the document top to bottom with a [`Cursor`], measuring
//! and wrapping text through a [`TextMeasurer`](crate::TextMeasurer) and
//! inserting a [`DrawOp::PageBreak`] whenever the next block would cross the bottom
//! margin. Sections reserve enough room for their heading, rule and first line, so a
//! heading is never left alone at the foot of a page.
//!
//! # Example
//!
//! ```
//! use cv_gen::layout::layout_resume;
//! use cv_gen::{ResumeDocument, SectionVisibility, StandardMetrics, TemplateConfig};
//!
//! let document: ResumeDocument = serde_json::from_str(
//!     r#"{ "personal": { "name": "Ana Souza" }, "skills": ["Go", "Rust"] }"#,
//! )
//! .expect("valid document");
//!
//! let config = TemplateConfig::default();
//! let layout = layout_resume(
//!     &document,
//!     &SectionVisibility::all(),
//!     config.geometry().expect("valid page"),
//!     &StandardMetrics,
//!     &config,
//! )
//! .expect("can lay out");
//!
//! assert_eq!(layout.page_count(), 1);
//! assert!(layout.texts().any(|t| t == "Go  •  Rust"));
//! ```

mod engine;
mod ops;

pub use engine::*;
pub use ops::*;
