//! Screen pixel units used by touch samples and gesture feedback.
//!
//! Negative values are valid and appear as swipe deltas and feedback
//! offsets. The origin is the top-left corner of the screen, with x growing
//! to the right.
//!
//! ```
//! use carousel_ui::px::{Px, PxPosition};
//!
//! let start = PxPosition::new(Px(100), Px(40));
//! let end = PxPosition::new(Px(70), Px(42));
//!
//! assert_eq!(end.x.saturating_sub(start.x), Px(-30));
//! assert_eq!((-Px(15)).to_string(), "-15px");
//! ```

use std::{fmt, ops::Neg};

/// A signed screen pixel value.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// Saturating subtraction, so extreme coordinates cannot overflow a
    /// touch delta.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Px(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

impl Neg for Px {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Px(self.0.saturating_neg())
    }
}

/// A 2D position in screen pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PxPosition {
    /// Horizontal position.
    pub x: Px,
    /// Vertical position.
    pub y: Px,
}

impl PxPosition {
    /// Creates a position from x and y coordinates.
    pub const fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }
}
