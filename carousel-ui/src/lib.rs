//! Primitives shared by the carousel crates.
//!
//! - [`px`]: signed screen pixel units.
//! - [`listener`]: shared event targets and scoped [`Subscription`]s.
//! - [`viewport`]: the measured viewport and its resize stream.
//! - [`touch`]: touch events and gesture surfaces.
//!
//! Nothing in this crate knows about pages or slides; it only models the
//! environment a carousel listens to.

pub mod listener;
mod logging;
pub mod px;
pub mod touch;
pub mod viewport;

pub use listener::{EventTarget, ListenerKey, Subscription};
pub use logging::init_tracing;
pub use px::{Px, PxPosition};
pub use touch::{GestureSurface, TouchEvent, TouchPhase, TouchPoint};
pub use viewport::{ResizeEvent, Viewport};
