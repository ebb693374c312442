//! Pre-defined page sizes and the page geometry the résumé is laid out on.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//! Use the [`PageOrientation`](crate::pagesize::PageOrientation) trait to convert between
//! portrait and landscape.
//!
//! # Example
//!
//! ```
//! use cv_gen::pagesize::{PageGeometry, A4};
//! use cv_gen::Mm;
//!
//! let geometry = PageGeometry::from_size(A4, Mm(20.0)).expect("valid geometry");
//! assert!((geometry.page_width.0 - 210.0).abs() < 0.01);
//! ```

use crate::error::CvError;
use crate::units::*;
use serde::{Deserialize, Serialize};

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

// north american sizes
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(13.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// Look up one of the pre-defined sizes by its (case-insensitive) name
pub fn by_name(name: &str) -> Option<PageSize> {
    match name.to_ascii_lowercase().as_str() {
        "letter" => Some(LETTER),
        "legal" => Some(LEGAL),
        "a4" => Some(A4),
        "a5" => Some(A5),
        _ => None,
    }
}

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

/// Below this much vertical room between the margins, a section heading, its rule and
/// the first entry of a section could not share a page.
pub const MIN_CONTENT_HEIGHT: Mm = Mm(40.0);

/// The fixed page the engine lays content out on. Coordinates derived from it are
/// measured from the top-left corner of the page, with the same margin on every side.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeometryFields")]
pub struct PageGeometry {
    pub page_width: Mm,
    pub page_height: Mm,
    pub margin: Mm,
}

/// Deserialized geometries go through [`PageGeometry::new`]
#[derive(Deserialize)]
struct GeometryFields {
    page_width: Mm,
    page_height: Mm,
    margin: Mm,
}

impl TryFrom<GeometryFields> for PageGeometry {
    type Error = CvError;

    fn try_from(fields: GeometryFields) -> Result<PageGeometry, CvError> {
        PageGeometry::new(fields.page_width, fields.page_height, fields.margin)
    }
}

impl PageGeometry {
    /// Validates and builds a geometry. All values must be positive, the margin must be
    /// less than half of each page dimension, and enough height must be left between
    /// the margins for [`MIN_CONTENT_HEIGHT`].
    pub fn new(page_width: Mm, page_height: Mm, margin: Mm) -> Result<PageGeometry, CvError> {
        if !(page_width.0 > 0.0 && page_height.0 > 0.0 && margin.0 > 0.0) {
            return Err(CvError::Geometry(format!(
                "page dimensions and margin must be positive (got {page_width} x {page_height}, margin {margin})"
            )));
        }
        if margin.0 * 2.0 >= page_width.0 || margin.0 * 2.0 >= page_height.0 {
            return Err(CvError::Geometry(format!(
                "margin {margin} must be less than half of the page ({page_width} x {page_height})"
            )));
        }
        if page_height - margin * 2.0 < MIN_CONTENT_HEIGHT {
            return Err(CvError::Geometry(format!(
                "only {} of vertical room between the margins, need at least {}",
                page_height - margin * 2.0,
                MIN_CONTENT_HEIGHT
            )));
        }

        Ok(PageGeometry {
            page_width,
            page_height,
            margin,
        })
    }

    /// Build a geometry from one of the pre-defined [`PageSize`]s
    pub fn from_size(size: PageSize, margin: Mm) -> Result<PageGeometry, CvError> {
        PageGeometry::new(size.0.into(), size.1.into(), margin)
    }

    /// The lowest y coordinate content may be placed at
    pub fn bottom(&self) -> Mm {
        self.page_height - self.margin
    }

    /// The right-hand edge of the content area
    pub fn right(&self) -> Mm {
        self.page_width - self.margin
    }

    /// Width available between the left and right margins
    pub fn content_width(&self) -> Mm {
        self.page_width - self.margin * 2.0
    }
}
