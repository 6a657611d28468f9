use carousel_ui::Px;
use thiserror::Error;

/// Configuration errors rejected before they reach the carousel state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// A breakpoint asked for zero items per page.
    #[error("breakpoint at {min_width}px must show at least one item per page")]
    ZeroItemsPerPage {
        /// Minimum width of the offending rule.
        min_width: u32,
    },
    /// A gesture threshold was negative.
    #[error("gesture {name} must not be negative, got {value}")]
    NegativeGestureDistance {
        /// Name of the offending setting.
        name: &'static str,
        /// The rejected value.
        value: Px,
    },
}
