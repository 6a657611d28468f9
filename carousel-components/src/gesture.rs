//! Horizontal swipe recognition for touch surfaces.
//!
//! ## Usage
//!
//! Feed touch events from the slide track; a completed swipe is reported as a
//! [`SwipeDecision`] which maps onto a non-wrapping navigation command. While
//! the finger is down, [`GestureRecognizer::feedback_offset`] gives a small
//! fixed displacement hinting at the direction of the pending swipe.
//!
//! ```
//! use carousel_components::gesture::{GestureArgs, GestureRecognizer, SwipeDecision};
//! use carousel_ui::Px;
//!
//! let mut recognizer = GestureRecognizer::new(&GestureArgs::default());
//! recognizer.touch_start(Px(100));
//! assert_eq!(recognizer.touch_move(Px(80)), Px(-15));
//! assert_eq!(recognizer.touch_end(Px(70)), SwipeDecision::Left);
//! assert_eq!(recognizer.feedback_offset(), Px::ZERO);
//! ```
use carousel_ui::{Px, TouchEvent, TouchPhase};
use derive_setters::Setters;
use tracing::trace;

use crate::{error::CarouselError, pagination::NavigationCommand};

/// Default distance a finger must travel before a swipe is accepted.
pub const DEFAULT_MIN_DISTANCE: Px = Px(15);
/// Default displacement shown while a swipe is pending.
pub const DEFAULT_FEEDBACK_DISTANCE: Px = Px(15);

/// Swipe configuration.
#[derive(Clone, Debug, PartialEq, Eq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureArgs {
    /// Whether touch gestures are recognized at all.
    pub enabled: bool,
    /// Horizontal travel, exclusive, needed to count as a swipe.
    pub min_distance: Px,
    /// Magnitude of the feedback offset shown during a pending swipe.
    pub feedback_distance: Px,
}

impl GestureArgs {
    /// Rejects negative thresholds.
    pub fn validate(&self) -> Result<(), CarouselError> {
        for (name, value) in [
            ("min_distance", self.min_distance),
            ("feedback_distance", self.feedback_distance),
        ] {
            if value < Px::ZERO {
                return Err(CarouselError::NegativeGestureDistance { name, value });
            }
        }
        Ok(())
    }
}

impl Default for GestureArgs {
    fn default() -> Self {
        Self {
            enabled: true,
            min_distance: DEFAULT_MIN_DISTANCE,
            feedback_distance: DEFAULT_FEEDBACK_DISTANCE,
        }
    }
}

/// Outcome of a completed touch interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SwipeDecision {
    /// Travel stayed within the threshold.
    #[default]
    None,
    /// The finger moved left: show the next page.
    Left,
    /// The finger moved right: show the previous page.
    Right,
}

impl SwipeDecision {
    /// Navigation triggered by this decision. Swipes never wrap.
    pub fn navigation(self) -> Option<NavigationCommand> {
        match self {
            SwipeDecision::None => None,
            SwipeDecision::Left => Some(NavigationCommand::Next { wrap: false }),
            SwipeDecision::Right => Some(NavigationCommand::Prev { wrap: false }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GestureState {
    Idle,
    Tracking { start_x: Px, current_x: Px },
}

/// Idle → Tracking → Idle swipe state machine.
#[derive(Clone, Debug)]
pub struct GestureRecognizer {
    enabled: bool,
    min_distance: Px,
    feedback_distance: Px,
    state: GestureState,
    feedback_offset: Px,
}

impl GestureRecognizer {
    /// Creates an idle recognizer.
    pub fn new(args: &GestureArgs) -> Self {
        Self {
            enabled: args.enabled,
            min_distance: args.min_distance,
            feedback_distance: args.feedback_distance,
            state: GestureState::Idle,
            feedback_offset: Px::ZERO,
        }
    }

    /// Whether the recognizer reacts to touches.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a touch is currently being tracked.
    pub fn is_tracking(&self) -> bool {
        matches!(self.state, GestureState::Tracking { .. })
    }

    /// Current visual feedback offset; zero when idle.
    pub fn feedback_offset(&self) -> Px {
        self.feedback_offset
    }

    /// Routes a touch event by phase. Events without touch points are
    /// ignored.
    pub fn handle(&mut self, event: &TouchEvent) -> SwipeDecision {
        let Some(x) = event.primary_x() else {
            if event.phase == TouchPhase::Cancel {
                self.touch_cancel();
            }
            return SwipeDecision::None;
        };
        match event.phase {
            TouchPhase::Start => {
                self.touch_start(x);
                SwipeDecision::None
            }
            TouchPhase::Move => {
                self.touch_move(x);
                SwipeDecision::None
            }
            TouchPhase::End => self.touch_end(x),
            TouchPhase::Cancel => {
                self.touch_cancel();
                SwipeDecision::None
            }
        }
    }

    /// Starts tracking at `x`, restarting any interaction in progress.
    pub fn touch_start(&mut self, x: Px) {
        if !self.enabled {
            return;
        }
        self.state = GestureState::Tracking {
            start_x: x,
            current_x: x,
        };
        self.feedback_offset = Px::ZERO;
        trace!(%x, "touch start");
    }

    /// Updates the pending swipe and returns the new feedback offset.
    ///
    /// Feedback is purely visual and never navigates.
    pub fn touch_move(&mut self, x: Px) -> Px {
        let GestureState::Tracking { start_x, .. } = self.state else {
            return self.feedback_offset;
        };
        self.state = GestureState::Tracking {
            start_x,
            current_x: x,
        };
        self.feedback_offset = match self.classify(x.saturating_sub(start_x)) {
            SwipeDecision::None => Px::ZERO,
            SwipeDecision::Left => -self.feedback_distance,
            SwipeDecision::Right => self.feedback_distance,
        };
        self.feedback_offset
    }

    /// Finishes the interaction at `x` and reports the swipe.
    ///
    /// Feedback resets to zero whatever the outcome.
    pub fn touch_end(&mut self, x: Px) -> SwipeDecision {
        let GestureState::Tracking { start_x, current_x } = self.state else {
            return SwipeDecision::None;
        };
        self.state = GestureState::Idle;
        self.feedback_offset = Px::ZERO;

        let delta = x.saturating_sub(start_x);
        let decision = self.classify(delta);
        trace!(%start_x, %current_x, end_x = %x, %delta, ?decision, "touch end");
        decision
    }

    /// Abandons the interaction without navigating.
    pub fn touch_cancel(&mut self) {
        self.state = GestureState::Idle;
        self.feedback_offset = Px::ZERO;
    }

    fn classify(&self, delta: Px) -> SwipeDecision {
        if delta < -self.min_distance {
            SwipeDecision::Left
        } else if delta > self.min_distance {
            SwipeDecision::Right
        } else {
            SwipeDecision::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer() -> GestureRecognizer {
        GestureRecognizer::new(&GestureArgs::default())
    }

    fn swipe(recognizer: &mut GestureRecognizer, from: i32, to: i32) -> SwipeDecision {
        recognizer.touch_start(Px(from));
        recognizer.touch_end(Px(to))
    }

    #[test]
    fn feedback_then_swipe_left() {
        let mut recognizer = recognizer();
        recognizer.touch_start(Px(100));
        assert!(recognizer.is_tracking());
        assert_eq!(recognizer.touch_move(Px(80)), Px(-15));

        let decision = recognizer.touch_end(Px(70));
        assert_eq!(decision, SwipeDecision::Left);
        assert_eq!(
            decision.navigation(),
            Some(NavigationCommand::Next { wrap: false })
        );
        assert_eq!(recognizer.feedback_offset(), Px::ZERO);
        assert!(!recognizer.is_tracking());
    }

    #[test]
    fn feedback_is_reversible() {
        let mut recognizer = recognizer();
        recognizer.touch_start(Px(100));
        assert_eq!(recognizer.touch_move(Px(130)), Px(15));
        assert_eq!(recognizer.touch_move(Px(105)), Px::ZERO);
        assert_eq!(recognizer.touch_move(Px(60)), Px(-15));
        assert_eq!(recognizer.touch_end(Px(100)), SwipeDecision::None);
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut recognizer = recognizer();
        for delta in -15..=15 {
            assert_eq!(swipe(&mut recognizer, 200, 200 + delta), SwipeDecision::None);
        }
        assert_eq!(swipe(&mut recognizer, 200, 184), SwipeDecision::Left);
        assert_eq!(swipe(&mut recognizer, 200, 216), SwipeDecision::Right);
        assert_eq!(
            SwipeDecision::Right.navigation(),
            Some(NavigationCommand::Prev { wrap: false })
        );
    }

    #[test]
    fn end_uses_end_position_not_last_move() {
        let mut recognizer = recognizer();
        recognizer.touch_start(Px(100));
        recognizer.touch_move(Px(20));
        assert_eq!(recognizer.touch_end(Px(101)), SwipeDecision::None);
    }

    #[test]
    fn events_while_idle_are_ignored() {
        let mut recognizer = recognizer();
        assert_eq!(recognizer.touch_move(Px(0)), Px::ZERO);
        assert_eq!(recognizer.touch_end(Px(-500)), SwipeDecision::None);
    }

    #[test]
    fn cancel_discards_sample() {
        let mut recognizer = recognizer();
        recognizer.touch_start(Px(100));
        recognizer.touch_move(Px(10));
        recognizer.touch_cancel();
        assert_eq!(recognizer.feedback_offset(), Px::ZERO);
        assert_eq!(recognizer.touch_end(Px(0)), SwipeDecision::None);
    }

    #[test]
    fn restart_while_tracking_uses_new_origin() {
        let mut recognizer = recognizer();
        recognizer.touch_start(Px(100));
        recognizer.touch_start(Px(10));
        assert_eq!(recognizer.touch_end(Px(0)), SwipeDecision::None);
    }

    #[test]
    fn disabled_recognizer_never_tracks() {
        let mut recognizer = GestureRecognizer::new(&GestureArgs::default().enabled(false));
        recognizer.touch_start(Px(100));
        assert!(!recognizer.is_tracking());
        assert_eq!(recognizer.touch_move(Px(0)), Px::ZERO);
        assert_eq!(recognizer.touch_end(Px(0)), SwipeDecision::None);
    }

    #[test]
    fn handle_routes_phases() {
        let mut recognizer = GestureRecognizer::new(
            &GestureArgs::default()
                .min_distance(Px(30))
                .feedback_distance(Px(8)),
        );
        assert_eq!(
            recognizer.handle(&TouchEvent::single(TouchPhase::Start, 50)),
            SwipeDecision::None
        );
        recognizer.handle(&TouchEvent::single(TouchPhase::Move, 90));
        assert_eq!(recognizer.feedback_offset(), Px(8));
        assert_eq!(
            recognizer.handle(&TouchEvent::single(TouchPhase::End, 100)),
            SwipeDecision::Right
        );
    }

    #[test]
    fn zero_threshold_accepts_any_movement() {
        let mut recognizer = GestureRecognizer::new(&GestureArgs::default().min_distance(Px(0)));
        assert_eq!(swipe(&mut recognizer, 10, 10), SwipeDecision::None);
        assert_eq!(swipe(&mut recognizer, 10, 9), SwipeDecision::Left);
    }

    #[test]
    fn negative_thresholds_are_rejected() {
        let args = GestureArgs::default().feedback_distance(Px(-1));
        assert_eq!(
            args.validate(),
            Err(CarouselError::NegativeGestureDistance {
                name: "feedback_distance",
                value: Px(-1),
            })
        );
        assert!(GestureArgs::default().validate().is_ok());
    }
}
