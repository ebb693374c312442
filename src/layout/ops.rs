use crate::font::{FontFamily, FontWeight};
use crate::pagesize::PageGeometry;
use crate::units::{Mm, Pt};

/// One positioned drawing instruction. Coordinates are millimetres from the top-left
/// corner of the current page; text is positioned by its baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        content: String,
        x: Mm,
        y: Mm,
        font: FontFamily,
        weight: FontWeight,
        size: Pt,
    },
    /// A horizontal line from `x1` to `x2`
    Rule { x1: Mm, y: Mm, x2: Mm, thickness: Mm },
    /// Everything after this goes on a new page
    PageBreak,
}

impl DrawOp {
    /// The vertical position of a text or rule op
    pub fn y(&self) -> Option<Mm> {
        match self {
            DrawOp::Text { y, .. } | DrawOp::Rule { y, .. } => Some(*y),
            DrawOp::PageBreak => None,
        }
    }

    /// The string drawn by a text op
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { content, .. } => Some(content.as_str()),
            _ => None,
        }
    }
}

/// Where the next line goes: a 1-based page number and the distance from the top of
/// that page
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: Mm,
}

impl Cursor {
    /// The top-left of the first page
    pub fn start(geometry: &PageGeometry) -> Cursor {
        Cursor {
            page: 1,
            y: geometry.margin,
        }
    }

    /// The same page, `by` further down
    pub fn advance(self, by: Mm) -> Cursor {
        Cursor {
            page: self.page,
            y: self.y + by,
        }
    }
}

/// A finished, paginated stream of draw ops
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub geometry: PageGeometry,
    pub ops: Vec<DrawOp>,
}

impl Layout {
    pub fn page_count(&self) -> usize {
        1 + self
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::PageBreak))
            .count()
    }

    /// The ops of each page, in order. Always yields at least one (possibly empty) page.
    pub fn pages(&self) -> impl Iterator<Item = &[DrawOp]> {
        self.ops.split(|op| matches!(op, DrawOp::PageBreak))
    }

    /// The text of every text op, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(DrawOp::text)
    }
}
