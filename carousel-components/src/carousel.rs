//! Responsive paginated carousel state.
//!
//! ## Usage
//!
//! Drive a slide carousel from viewport, touch, click and timer events, and
//! render the resulting [`CarouselView`].
//!
//! ```
//! use std::time::Instant;
//!
//! use carousel_components::{
//!     breakpoint::BreakpointRule,
//!     carousel::{Carousel, CarouselArgs},
//! };
//!
//! let args = CarouselArgs::default()
//!     .breakpoints(BreakpointRule::from_pairs(&[(0, 2), (1024, 5)]).unwrap());
//! let mut carousel = Carousel::new(args, 5, Some(375), Instant::now()).unwrap();
//!
//! assert_eq!(carousel.page_count(), 3);
//! carousel.go_to(2);
//! assert_eq!(carousel.visible_range(), 4..6);
//!
//! carousel.resize(1280);
//! assert_eq!(carousel.page_count(), 1);
//! assert_eq!(carousel.current_page(), 0);
//! ```
use std::{num::NonZeroUsize, ops::Range, time::Instant};

use carousel_ui::{Px, TouchEvent};
use derive_setters::Setters;
use tracing::debug;

use crate::{
    autoplay::{AutoplayArgs, AutoplayScheduler},
    breakpoint::{BreakpointRule, BreakpointSet},
    error::CarouselError,
    gesture::{GestureArgs, GestureRecognizer},
    page_math,
    pagination::{NavigationCommand, PaginationState},
    view::{CarouselView, PresentationArgs},
};

/// Carousel configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselArgs {
    /// Breakpoint rules, in any order. Fixed once the carousel is created.
    pub breakpoints: Vec<BreakpointRule>,
    /// Autoplay behavior.
    pub autoplay: AutoplayArgs,
    /// Swipe recognition.
    pub gestures: GestureArgs,
    /// Which controls the view exposes.
    pub presentation: PresentationArgs,
}

impl CarouselArgs {
    /// Checks the settings the type system cannot.
    pub fn validate(&self) -> Result<(), CarouselError> {
        self.gestures.validate()
    }
}

/// Which input asked for a page change. Only used for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavigationSource {
    /// A pagination dot.
    Pagination,
    /// A prev/next button.
    Button,
    /// A completed swipe.
    Gesture,
    /// An autoplay tick.
    Autoplay,
    /// Application code.
    Programmatic,
}

/// Every input the carousel reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CarouselEvent {
    /// The viewport width changed.
    Resize {
        /// New width in pixels.
        width: u32,
    },
    /// Items were added or removed.
    ItemCountChanged(usize),
    /// A touch event from the gesture surface.
    Touch(TouchEvent),
    /// A navigation request.
    Navigate {
        /// Who asked.
        source: NavigationSource,
        /// What to do.
        command: NavigationCommand,
    },
    /// The pause/play control was pressed.
    ToggleAutoplayPause,
    /// The autoplay deadline may have passed.
    AutoplayDue,
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct Observed {
    current_page: usize,
    page_count: usize,
    items_per_page: NonZeroUsize,
    feedback_offset: Px,
    autoplay_paused: bool,
}

/// The carousel state core.
///
/// Page count, items per page and visible ranges are derived on every read,
/// and every change to their inputs reconciles the page index before
/// returning, so the index is never out of range for the page count.
#[derive(Clone, Debug)]
pub struct Carousel {
    args: CarouselArgs,
    breakpoints: BreakpointSet,
    viewport_width: Option<u32>,
    item_count: usize,
    pagination: PaginationState,
    gesture: GestureRecognizer,
    autoplay: AutoplayScheduler,
}

impl Carousel {
    /// Creates a carousel at page zero.
    ///
    /// The breakpoint is resolved immediately. Without a measured width the
    /// lowest breakpoint is used until the first resize.
    pub fn new(
        args: CarouselArgs,
        item_count: usize,
        viewport_width: Option<u32>,
        now: Instant,
    ) -> Result<Self, CarouselError> {
        args.validate()?;
        let breakpoints = BreakpointSet::normalize(args.breakpoints.iter().copied());
        let carousel = Self {
            breakpoints,
            viewport_width,
            item_count,
            pagination: PaginationState::new(),
            gesture: GestureRecognizer::new(&args.gestures),
            autoplay: AutoplayScheduler::new(&args.autoplay, now),
            args,
        };
        debug!(
            item_count,
            ?viewport_width,
            items_per_page = carousel.items_per_page().get(),
            page_count = carousel.page_count(),
            "carousel created"
        );
        Ok(carousel)
    }

    /// Applies one event and returns whether anything observable changed.
    #[tracing::instrument(level = "debug", skip(self, now))]
    pub fn handle_event(&mut self, event: CarouselEvent, now: Instant) -> bool {
        match event {
            CarouselEvent::Resize { width } => self.resize(width),
            CarouselEvent::ItemCountChanged(count) => self.set_item_count(count),
            CarouselEvent::Touch(touch) => self.touch(&touch),
            CarouselEvent::Navigate { source, command } => self.navigate(source, command),
            CarouselEvent::ToggleAutoplayPause => self.toggle_autoplay_pause(now),
            CarouselEvent::AutoplayDue => self.poll_autoplay(now),
        }
    }

    /// Re-resolves the breakpoint for a new viewport width.
    pub fn resize(&mut self, width: u32) -> bool {
        self.track(|carousel| {
            let before = carousel.active_breakpoint();
            carousel.viewport_width = Some(width);
            let after = carousel.active_breakpoint();
            if before != after {
                debug!(
                    width,
                    min_width = after.min_width,
                    items_per_page = after.items_per_page.get(),
                    "breakpoint changed"
                );
            }
            carousel.reconcile();
        })
    }

    /// Updates the number of items.
    pub fn set_item_count(&mut self, item_count: usize) -> bool {
        self.track(|carousel| {
            carousel.item_count = item_count;
            carousel.reconcile();
        })
    }

    /// Applies a navigation command from `source`.
    pub fn navigate(&mut self, source: NavigationSource, command: NavigationCommand) -> bool {
        let page_count = self.page_count();
        let changed = self.pagination.dispatch(command, page_count);
        debug!(
            ?source,
            ?command,
            page = self.pagination.current(),
            page_count,
            changed,
            "navigation"
        );
        changed
    }

    /// Jumps to `page`, as a pagination dot does.
    pub fn go_to(&mut self, page: usize) -> bool {
        self.navigate(NavigationSource::Pagination, NavigationCommand::GoTo(page))
    }

    /// Goes to the previous page without wrapping, as the prev button does.
    pub fn go_prev(&mut self) -> bool {
        self.navigate(
            NavigationSource::Button,
            NavigationCommand::Prev { wrap: false },
        )
    }

    /// Goes to the next page without wrapping, as the next button does.
    pub fn go_next(&mut self) -> bool {
        self.navigate(
            NavigationSource::Button,
            NavigationCommand::Next { wrap: false },
        )
    }

    /// Feeds a touch event to the swipe recognizer.
    ///
    /// Ignored while gestures are disabled.
    pub fn touch(&mut self, event: &TouchEvent) -> bool {
        if !self.gesture.is_enabled() {
            return false;
        }
        self.track(|carousel| {
            let decision = carousel.gesture.handle(event);
            if let Some(command) = decision.navigation() {
                carousel.navigate(NavigationSource::Gesture, command);
            }
        })
    }

    /// Toggles autoplay pause. Does nothing unless autoplay is enabled.
    pub fn toggle_autoplay_pause(&mut self, now: Instant) -> bool {
        self.autoplay.toggle_pause(now)
    }

    /// Advances one wrapping page per autoplay tick due at `now`.
    pub fn poll_autoplay(&mut self, now: Instant) -> bool {
        let ticks = self.autoplay.poll(now);
        let page_count = self.page_count();
        if ticks == 0 || page_count == 0 {
            return false;
        }
        // Wrapping advances are cyclic, so whole laps are no-ops.
        let steps = ticks as usize % page_count;
        let mut changed = false;
        for _ in 0..steps {
            changed |= self.navigate(
                NavigationSource::Autoplay,
                NavigationCommand::Next { wrap: true },
            );
        }
        changed
    }

    /// When autoplay next needs polling.
    pub fn next_autoplay_deadline(&self) -> Option<Instant> {
        self.autoplay.next_deadline()
    }

    /// Replaces the autoplay settings.
    pub fn set_autoplay_args(&mut self, autoplay: AutoplayArgs, now: Instant) {
        self.autoplay.reconfigure(&autoplay, now);
        self.args.autoplay = autoplay;
    }

    /// Replaces the gesture settings, abandoning any touch in progress.
    pub fn set_gesture_args(&mut self, gestures: GestureArgs) -> Result<(), CarouselError> {
        gestures.validate()?;
        self.gesture = GestureRecognizer::new(&gestures);
        self.args.gestures = gestures;
        Ok(())
    }

    /// Replaces the presentation settings.
    pub fn set_presentation_args(&mut self, presentation: PresentationArgs) {
        self.args.presentation = presentation;
    }

    /// Current configuration.
    pub fn args(&self) -> &CarouselArgs {
        &self.args
    }

    /// The normalized breakpoint set.
    pub fn breakpoints(&self) -> &BreakpointSet {
        &self.breakpoints
    }

    /// Last viewport width seen, if any.
    pub fn viewport_width(&self) -> Option<u32> {
        self.viewport_width
    }

    /// The breakpoint for the current width.
    pub fn active_breakpoint(&self) -> BreakpointRule {
        match self.viewport_width {
            Some(width) => self.breakpoints.resolve(width),
            None => self.breakpoints.lowest(),
        }
    }

    /// Items per page at the active breakpoint.
    pub fn items_per_page(&self) -> NonZeroUsize {
        self.active_breakpoint().items_per_page
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        page_math::page_count(self.item_count, self.items_per_page())
    }

    /// Current page index.
    pub fn current_page(&self) -> usize {
        self.pagination.current()
    }

    /// Item indices on the current page.
    pub fn visible_range(&self) -> Range<usize> {
        page_math::visible_range(self.current_page(), self.items_per_page())
    }

    /// Whether item `index` is on the current page.
    pub fn is_item_visible(&self, index: usize) -> bool {
        page_math::is_visible(index, self.current_page(), self.items_per_page())
    }

    /// Whether autoplay is paused by the user.
    pub fn autoplay_paused(&self) -> bool {
        self.autoplay.is_paused()
    }

    /// Whether autoplay ticks are being scheduled.
    pub fn autoplay_running(&self) -> bool {
        self.autoplay.is_running()
    }

    /// Whether touch gestures are recognized.
    pub fn gestures_enabled(&self) -> bool {
        self.gesture.is_enabled()
    }

    /// Live swipe feedback offset.
    pub fn feedback_offset(&self) -> Px {
        self.gesture.feedback_offset()
    }

    /// Builds the renderer snapshot.
    pub fn view(&self) -> CarouselView {
        CarouselView::of(self)
    }

    fn reconcile(&mut self) {
        let page_count = self.page_count();
        self.pagination.reconcile(page_count);
    }

    fn observed(&self) -> Observed {
        Observed {
            current_page: self.current_page(),
            page_count: self.page_count(),
            items_per_page: self.items_per_page(),
            feedback_offset: self.feedback_offset(),
            autoplay_paused: self.autoplay_paused(),
        }
    }

    fn track(&mut self, apply: impl FnOnce(&mut Self)) -> bool {
        let before = self.observed();
        apply(self);
        before != self.observed()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn args_deserialize_with_defaults() {
        let args: CarouselArgs = serde_json::from_str(
            r#"{
                "breakpoints": [[1024, 4], [768, 3]],
                "autoplay": { "enabled": true, "interval": 3000 },
                "gestures": { "min_distance": 30 }
            }"#,
        )
        .unwrap();

        assert_eq!(
            args.breakpoints,
            BreakpointRule::from_pairs(&[(1024, 4), (768, 3)]).unwrap()
        );
        assert!(args.autoplay.enabled);
        assert_eq!(args.autoplay.interval, Duration::from_millis(3_000));
        assert_eq!(args.gestures.min_distance, Px(30));
        assert_eq!(args.gestures.feedback_distance, Px(15));
        assert!(args.presentation.show_pagination);
    }

    #[test]
    fn zero_items_per_page_fails_to_deserialize() {
        let parsed: Result<CarouselArgs, _> = serde_json::from_str(r#"{ "breakpoints": [[0, 0]] }"#);
        assert!(parsed.is_err());
    }
}
