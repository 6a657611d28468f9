//! Touch events delivered by a gesture surface.

use smallvec::SmallVec;

use crate::{
    listener::EventTarget,
    px::{Px, PxPosition},
};

/// Phase of a touch interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// A finger went down.
    Start,
    /// A finger moved while down.
    Move,
    /// A finger was lifted.
    End,
    /// The platform aborted the interaction.
    Cancel,
}

/// One touch point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    /// Platform identifier of the touch.
    pub id: u64,
    /// Position in screen pixels.
    pub position: PxPosition,
}

/// A touch event with the points that changed in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchEvent {
    /// Phase of the interaction this event belongs to.
    pub phase: TouchPhase,
    /// Points that changed, in platform order.
    pub changed_touches: SmallVec<[TouchPoint; 2]>,
}

impl TouchEvent {
    /// Creates a single-point event at the given screen x coordinate.
    pub fn single(phase: TouchPhase, screen_x: i32) -> Self {
        let mut changed_touches = SmallVec::new();
        changed_touches.push(TouchPoint {
            id: 0,
            position: PxPosition::new(Px(screen_x), Px::ZERO),
        });
        Self {
            phase,
            changed_touches,
        }
    }

    /// Returns the screen x coordinate of the first changed touch.
    ///
    /// Further points are ignored; multi-touch is not disambiguated.
    pub fn primary_x(&self) -> Option<Px> {
        self.changed_touches.first().map(|point| point.position.x)
    }
}

/// A surface that emits touch events, such as the carousel's slide track.
pub type GestureSurface = EventTarget<TouchEvent>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_x_uses_first_point() {
        let mut event = TouchEvent::single(TouchPhase::Move, 80);
        event.changed_touches.push(TouchPoint {
            id: 1,
            position: PxPosition::new(Px(300), Px(10)),
        });
        assert_eq!(event.primary_x(), Some(Px(80)));
    }

    #[test]
    fn primary_x_without_points() {
        let event = TouchEvent {
            phase: TouchPhase::End,
            changed_touches: SmallVec::new(),
        };
        assert_eq!(event.primary_x(), None);
    }
}
