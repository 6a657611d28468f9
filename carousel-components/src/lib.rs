//! State core of a responsive, paginated slide carousel.
//!
//! The crate splits items into pages sized by the viewport width and keeps a
//! single page index consistent while resizes, clicks, swipes and autoplay
//! ticks compete to change it.
//!
//! - [`breakpoint`]: `min_width → items_per_page` rules.
//! - [`page_math`]: page counts and visible ranges.
//! - [`pagination`]: the page index and its command API.
//! - [`gesture`]: swipe recognition with visual feedback.
//! - [`autoplay`]: the wrapping autoplay timer.
//! - [`carousel`]: the controller wiring everything together.
//! - [`view`]: the snapshot renderers draw from.
//!
//! Rendering is left to the caller; see [`view::CarouselView`].

pub mod autoplay;
pub mod breakpoint;
pub mod carousel;
mod error;
pub mod gesture;
pub mod page_math;
pub mod pagination;
pub mod view;

pub use carousel::{Carousel, CarouselArgs, CarouselEvent, NavigationSource};
pub use error::CarouselError;
pub use pagination::NavigationCommand;
pub use view::CarouselView;
