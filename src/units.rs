//! Length units used throughout the crate.
//!
//! Layout happens in millimetres measured from the top-left corner of the page, the
//! same way the page geometry is specified. Font sizes and everything written into the
//! PDF itself are in points (1/72 inch).

use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

const MM_PER_INCH: f32 = 25.4;
const PT_PER_INCH: f32 = 72.0;

/// PDF points (1/72 inch)
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
pub struct Pt(pub f32);

/// Millimetres
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
pub struct Mm(pub f32);

macro_rules! scalar_ops {
    ($unit:ident) => {
        impl Mul<f32> for $unit {
            type Output = $unit;

            fn mul(self, rhs: f32) -> $unit {
                $unit(self.0 * rhs)
            }
        }

        impl Div<f32> for $unit {
            type Output = $unit;

            fn div(self, rhs: f32) -> $unit {
                $unit(self.0 / rhs)
            }
        }
    };
}

scalar_ops!(Pt);
scalar_ops!(Mm);

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Pt {
        Pt(mm.0 * PT_PER_INCH / MM_PER_INCH)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Mm {
        Mm(pt.0 * MM_PER_INCH / PT_PER_INCH)
    }
}
