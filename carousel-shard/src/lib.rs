//! Event-loop hosting for carousels.
//!
//! [`CarouselHost`] mounts a [`carousel_components::Carousel`] onto a
//! [`carousel_ui::Viewport`] and [`carousel_ui::GestureSurface`], drives its
//! autoplay deadline on a tokio task and publishes every resulting
//! [`carousel_components::CarouselView`] on a watch channel.

pub mod host;
mod tokio_runtime;

pub use host::{CarouselHandle, CarouselHost, HostError};
