//! The viewport a carousel is laid out against.
//!
//! A [`Viewport`] remembers the last measured width and broadcasts a
//! [`ResizeEvent`] whenever a new width is reported. It is shared between
//! every carousel instance on the same window; each instance holds its own
//! [`Subscription`] so that unmounting one never affects another.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::listener::{EventTarget, Subscription};

/// Emitted when the viewport width changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent {
    /// New viewport width in pixels.
    pub width: u32,
}

/// Shared handle to a window-like viewport.
#[derive(Clone, Debug)]
pub struct Viewport {
    width: Arc<RwLock<Option<u32>>>,
    resize: EventTarget<ResizeEvent>,
}

impl Viewport {
    /// Creates a viewport that has not been measured yet.
    pub fn unmeasured() -> Self {
        Self {
            width: Arc::new(RwLock::new(None)),
            resize: EventTarget::new("viewport.resize"),
        }
    }

    /// Creates a viewport with a known initial width.
    pub fn with_width(width: u32) -> Self {
        let viewport = Self::unmeasured();
        *viewport.width.write() = Some(width);
        viewport
    }

    /// Returns the last measured width, if any.
    pub fn width(&self) -> Option<u32> {
        *self.width.read()
    }

    /// Reports a new width and notifies resize listeners.
    ///
    /// Listeners are notified even if the width did not change, matching
    /// platforms that fire resize on orientation or zoom changes.
    pub fn resize(&self, width: u32) {
        *self.width.write() = Some(width);
        let delivered = self.resize.dispatch(&ResizeEvent { width });
        trace!(width, delivered, "viewport resized");
    }

    /// Attaches a resize listener.
    #[must_use = "dropping the subscription detaches the listener immediately"]
    pub fn on_resize<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ResizeEvent) + Send + Sync + 'static,
    {
        self.resize.add_listener(listener)
    }

    /// Returns the number of attached resize listeners.
    pub fn resize_listener_count(&self) -> usize {
        self.resize.listener_count()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::unmeasured()
    }
}
