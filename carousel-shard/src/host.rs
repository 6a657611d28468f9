//! Mounting carousels onto a live viewport and gesture surface.
//!
//! ## Usage
//!
//! Mount a carousel, render every [`CarouselView`] it publishes and route
//! control clicks back through a [`CarouselHandle`].
//!
//! ```
//! use carousel_components::{breakpoint::BreakpointRule, carousel::CarouselArgs};
//! use carousel_shard::CarouselHost;
//! use carousel_ui::{GestureSurface, Viewport};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let viewport = Viewport::with_width(800);
//! let surface = GestureSurface::new("track.touch");
//! let args = CarouselArgs::default()
//!     .breakpoints(BreakpointRule::from_pairs(&[(0, 1), (768, 3)]).unwrap());
//!
//! let host = CarouselHost::mount(args, 7, &viewport, &surface).unwrap();
//! let mut views = host.subscribe();
//!
//! host.handle().go_next().unwrap();
//! views.changed().await.unwrap();
//! assert_eq!(views.borrow().current_page, 1);
//!
//! host.unmount();
//! assert_eq!(viewport.resize_listener_count(), 0);
//! # }
//! ```
use std::{future, io, time::Instant};

use carousel_components::{
    CarouselError,
    autoplay::AutoplayArgs,
    carousel::{Carousel, CarouselArgs, CarouselEvent, NavigationSource},
    gesture::GestureArgs,
    pagination::NavigationCommand,
    view::{CarouselView, PresentationArgs},
};
use carousel_ui::{GestureSurface, Subscription, TouchEvent, Viewport};
use thiserror::Error;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, warn};

use crate::tokio_runtime;

/// Errors reported by a mounted carousel.
#[derive(Debug, Error)]
pub enum HostError {
    /// The carousel arguments were rejected.
    #[error(transparent)]
    Config(#[from] CarouselError),
    /// No runtime was current and the shared one could not be started.
    #[error("failed to start the carousel runtime: {0}")]
    Runtime(#[from] io::Error),
    /// The host was unmounted and no longer accepts commands.
    #[error("carousel host has been unmounted")]
    Closed,
}

#[derive(Debug)]
enum HostCommand {
    Event(CarouselEvent),
    SetAutoplay(AutoplayArgs),
    SetGestures(GestureArgs),
    SetPresentation(PresentationArgs),
}

/// Cloneable sender for a mounted carousel.
///
/// Commands are applied in the order they are sent, interleaved with resize,
/// touch and autoplay events in arrival order.
#[derive(Clone, Debug)]
pub struct CarouselHandle {
    commands: mpsc::UnboundedSender<HostCommand>,
}

impl CarouselHandle {
    /// Queues an arbitrary carousel event.
    pub fn send(&self, event: CarouselEvent) -> Result<(), HostError> {
        self.command(HostCommand::Event(event))
    }

    /// Queues a navigation command from `source`.
    pub fn navigate(
        &self,
        source: NavigationSource,
        command: NavigationCommand,
    ) -> Result<(), HostError> {
        self.send(CarouselEvent::Navigate { source, command })
    }

    /// Jumps to `page`, as a pagination dot does.
    pub fn go_to(&self, page: usize) -> Result<(), HostError> {
        self.navigate(NavigationSource::Pagination, NavigationCommand::GoTo(page))
    }

    /// Previous page, without wrapping.
    pub fn go_prev(&self) -> Result<(), HostError> {
        self.navigate(
            NavigationSource::Button,
            NavigationCommand::Prev { wrap: false },
        )
    }

    /// Next page, without wrapping.
    pub fn go_next(&self) -> Result<(), HostError> {
        self.navigate(
            NavigationSource::Button,
            NavigationCommand::Next { wrap: false },
        )
    }

    /// Presses the pause/play control.
    pub fn toggle_autoplay_pause(&self) -> Result<(), HostError> {
        self.send(CarouselEvent::ToggleAutoplayPause)
    }

    /// Reports a new number of items.
    pub fn set_item_count(&self, item_count: usize) -> Result<(), HostError> {
        self.send(CarouselEvent::ItemCountChanged(item_count))
    }

    /// Replaces the autoplay settings.
    pub fn set_autoplay_args(&self, args: AutoplayArgs) -> Result<(), HostError> {
        self.command(HostCommand::SetAutoplay(args))
    }

    /// Replaces the presentation settings.
    pub fn set_presentation_args(&self, args: PresentationArgs) -> Result<(), HostError> {
        self.command(HostCommand::SetPresentation(args))
    }

    fn command(&self, command: HostCommand) -> Result<(), HostError> {
        self.commands.send(command).map_err(|_| HostError::Closed)
    }
}

/// A carousel mounted onto a viewport and gesture surface.
///
/// One task owns the [`Carousel`] and applies every event in arrival order;
/// the host itself only holds the listener subscriptions, the task handle and
/// the view channel. Dropping the host detaches both listeners and stops the
/// task, including any pending autoplay deadline.
#[derive(Debug)]
pub struct CarouselHost {
    handle: CarouselHandle,
    surface: GestureSurface,
    resize_subscription: Option<Subscription>,
    touch_subscription: Option<Subscription>,
    views: watch::Receiver<CarouselView>,
    task: JoinHandle<()>,
}

impl CarouselHost {
    /// Mounts a carousel with `item_count` items.
    ///
    /// Uses the current tokio runtime when there is one. The viewport's
    /// current width, if measured, selects the initial breakpoint.
    #[tracing::instrument(level = "debug", skip(args, viewport, surface))]
    pub fn mount(
        args: CarouselArgs,
        item_count: usize,
        viewport: &Viewport,
        surface: &GestureSurface,
    ) -> Result<Self, HostError> {
        args.validate()?;
        let runtime = tokio_runtime::handle()?;
        let gestures_enabled = args.gestures.enabled;
        let (commands, queue) = mpsc::unbounded_channel();
        let handle = CarouselHandle { commands };

        // Listen before reading the width so no resize falls in between.
        let resize_subscription = viewport.on_resize({
            let handle = handle.clone();
            move |event| {
                let _ = handle.send(CarouselEvent::Resize { width: event.width });
            }
        });
        let touch_subscription =
            gestures_enabled.then(|| Self::attach_touch(&handle, surface));

        let carousel = Carousel::new(args, item_count, viewport.width(), now())?;
        let (publisher, views) = watch::channel(carousel.view());
        let task = runtime.spawn(run(carousel, queue, publisher));
        debug!(gestures_enabled, "carousel host mounted");

        Ok(Self {
            handle,
            surface: surface.clone(),
            resize_subscription: Some(resize_subscription),
            touch_subscription,
            views,
            task,
        })
    }

    /// Returns a sender for navigation and configuration commands.
    pub fn handle(&self) -> CarouselHandle {
        self.handle.clone()
    }

    /// The most recently published view.
    pub fn view(&self) -> CarouselView {
        self.views.borrow().clone()
    }

    /// Subscribes to published views.
    pub fn subscribe(&self) -> watch::Receiver<CarouselView> {
        self.views.clone()
    }

    /// Replaces the gesture settings, attaching or detaching the touch
    /// listener to match.
    pub fn set_gesture_args(&mut self, args: GestureArgs) -> Result<(), HostError> {
        args.validate()?;
        let enabled = args.enabled;
        self.handle.command(HostCommand::SetGestures(args))?;
        match (enabled, self.touch_subscription.is_some()) {
            (true, false) => {
                self.touch_subscription = Some(Self::attach_touch(&self.handle, &self.surface));
            }
            (false, true) => self.touch_subscription = None,
            _ => {}
        }
        Ok(())
    }

    /// Tears the carousel down.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn attach_touch(handle: &CarouselHandle, surface: &GestureSurface) -> Subscription {
        let handle = handle.clone();
        surface.add_listener(move |event: &TouchEvent| {
            let _ = handle.send(CarouselEvent::Touch(event.clone()));
        })
    }

    fn teardown(&mut self) {
        let attached = self.resize_subscription.take().is_some();
        self.touch_subscription = None;
        self.task.abort();
        if attached {
            debug!("carousel host unmounted");
        }
    }
}

impl Drop for CarouselHost {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn run(
    mut carousel: Carousel,
    mut queue: mpsc::UnboundedReceiver<HostCommand>,
    publisher: watch::Sender<CarouselView>,
) {
    loop {
        let deadline = carousel.next_autoplay_deadline();
        let command = tokio::select! {
            biased;
            command = queue.recv() => match command {
                Some(command) => command,
                None => break,
            },
            _ = sleep_until(deadline) => HostCommand::Event(CarouselEvent::AutoplayDue),
        };
        if apply(&mut carousel, command, now()) {
            publisher.send_replace(carousel.view());
        }
    }
}

fn apply(carousel: &mut Carousel, command: HostCommand, now: Instant) -> bool {
    match command {
        HostCommand::Event(event) => carousel.handle_event(event, now),
        HostCommand::SetAutoplay(args) => {
            carousel.set_autoplay_args(args, now);
            true
        }
        HostCommand::SetGestures(args) => match carousel.set_gesture_args(args) {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "gesture settings rejected");
                false
            }
        },
        HostCommand::SetPresentation(args) => {
            carousel.set_presentation_args(args);
            true
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => future::pending().await,
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use carousel_components::breakpoint::BreakpointRule;
    use carousel_ui::{Px, TouchPhase};

    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    fn args(pairs: &[(u32, usize)]) -> CarouselArgs {
        CarouselArgs::default().breakpoints(BreakpointRule::from_pairs(pairs).unwrap())
    }

    fn fixtures(width: u32) -> (Viewport, GestureSurface) {
        (
            Viewport::with_width(width),
            GestureSurface::new("track.touch"),
        )
    }

    async fn next_view(views: &mut watch::Receiver<CarouselView>) -> CarouselView {
        views.changed().await.unwrap();
        views.borrow_and_update().clone()
    }

    #[tokio::test(start_paused = true)]
    async fn initial_view_uses_viewport_width() {
        let (viewport, surface) = fixtures(1280);
        let host =
            CarouselHost::mount(args(&[(0, 2), (1024, 5)]), 5, &viewport, &surface).unwrap();
        let view = host.view();
        assert_eq!(view.items_per_page, 5);
        assert_eq!(view.page_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn commands_apply_in_order() {
        let (viewport, surface) = fixtures(0);
        let host = CarouselHost::mount(args(&[(0, 2)]), 5, &viewport, &surface).unwrap();
        let mut views = host.subscribe();
        let handle = host.handle();

        handle.go_to(2).unwrap();
        handle.go_prev().unwrap();
        handle.go_next().unwrap();
        handle.go_next().unwrap();
        let view = next_view(&mut views).await;
        assert_eq!(view.current_page, 2);
        assert_eq!(view.visible_slides().collect::<Vec<_>>(), vec![4]);
    }

    #[tokio::test(start_paused = true)]
    async fn resize_reconciles_page_index() {
        let (viewport, surface) = fixtures(375);
        let host =
            CarouselHost::mount(args(&[(0, 2), (1024, 5)]), 5, &viewport, &surface).unwrap();
        let mut views = host.subscribe();

        host.handle().go_to(2).unwrap();
        assert_eq!(next_view(&mut views).await.current_page, 2);

        viewport.resize(1280);
        let view = next_view(&mut views).await;
        assert_eq!(view.page_count, 1);
        assert_eq!(view.current_page, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn swipe_on_surface_navigates() {
        let (viewport, surface) = fixtures(0);
        let host = CarouselHost::mount(args(&[(0, 1)]), 3, &viewport, &surface).unwrap();
        let mut views = host.subscribe();

        surface.dispatch(&TouchEvent::single(TouchPhase::Start, 200));
        surface.dispatch(&TouchEvent::single(TouchPhase::Move, 170));
        surface.dispatch(&TouchEvent::single(TouchPhase::End, 150));
        let view = next_view(&mut views).await;
        assert_eq!(view.current_page, 1);
        assert_eq!(view.feedback_offset, Px::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_advances_once_per_interval_and_wraps() {
        let (viewport, surface) = fixtures(0);
        let args = args(&[(0, 2)]).autoplay(AutoplayArgs::default().enabled(true).interval(SECOND));
        let host = CarouselHost::mount(args, 5, &viewport, &surface).unwrap();
        let mut views = host.subscribe();
        let start = tokio::time::Instant::now();

        assert_eq!(next_view(&mut views).await.current_page, 1);
        assert!(start.elapsed() >= SECOND);
        assert_eq!(next_view(&mut views).await.current_page, 2);
        assert_eq!(next_view(&mut views).await.current_page, 0);
        assert!(start.elapsed() >= SECOND * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn paused_autoplay_does_not_advance() {
        let (viewport, surface) = fixtures(0);
        let args = args(&[(0, 1)]).autoplay(AutoplayArgs::default().enabled(true).interval(SECOND));
        let host = CarouselHost::mount(args, 3, &viewport, &surface).unwrap();
        let mut views = host.subscribe();
        let handle = host.handle();

        handle.toggle_autoplay_pause().unwrap();
        let view = next_view(&mut views).await;
        assert_eq!(view.pause_button.map(|button| button.label), Some("Play"));

        tokio::time::sleep(SECOND * 5).await;
        handle.set_item_count(4).unwrap();
        let view = next_view(&mut views).await;
        assert_eq!(view.page_count, 4);
        assert_eq!(view.current_page, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn toggling_gestures_attaches_and_detaches_listener() {
        let (viewport, surface) = fixtures(0);
        let mut host = CarouselHost::mount(args(&[(0, 1)]), 3, &viewport, &surface).unwrap();
        let mut views = host.subscribe();
        assert_eq!(surface.listener_count(), 1);

        host.set_gesture_args(GestureArgs::default().enabled(false))
            .unwrap();
        assert_eq!(surface.listener_count(), 0);
        next_view(&mut views).await;

        surface.dispatch(&TouchEvent::single(TouchPhase::Start, 200));
        surface.dispatch(&TouchEvent::single(TouchPhase::End, 100));
        host.handle().set_item_count(4).unwrap();
        let view = next_view(&mut views).await;
        assert_eq!(view.page_count, 4);
        assert_eq!(view.current_page, 0);

        host.set_gesture_args(GestureArgs::default()).unwrap();
        assert_eq!(surface.listener_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_arguments_attach_nothing() {
        let (viewport, surface) = fixtures(0);
        let args = args(&[(0, 1)]).gestures(GestureArgs::default().min_distance(Px(-3)));
        let result = CarouselHost::mount(args, 3, &viewport, &surface);
        assert!(matches!(result, Err(HostError::Config(_))));
        assert_eq!(viewport.resize_listener_count(), 0);
        assert_eq!(surface.listener_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_detaches_everything() {
        let (viewport, surface) = fixtures(0);
        let args = args(&[(0, 1)]).autoplay(AutoplayArgs::default().enabled(true).interval(SECOND));
        let host = CarouselHost::mount(args, 3, &viewport, &surface).unwrap();
        let mut views = host.subscribe();
        let handle = host.handle();
        assert_eq!(viewport.resize_listener_count(), 1);
        assert_eq!(surface.listener_count(), 1);

        host.unmount();
        assert_eq!(viewport.resize_listener_count(), 0);
        assert_eq!(surface.listener_count(), 0);

        views.borrow_and_update();
        assert!(views.changed().await.is_err());
        assert!(matches!(handle.go_next(), Err(HostError::Closed)));
        viewport.resize(640);
    }

    #[tokio::test(start_paused = true)]
    async fn hosts_sharing_a_viewport_are_independent() {
        let (viewport, surface) = fixtures(0);
        let pairs = [(0, 1), (800, 3)];
        let first = CarouselHost::mount(args(&pairs), 6, &viewport, &surface).unwrap();
        let second = CarouselHost::mount(args(&pairs), 6, &viewport, &surface).unwrap();
        let mut views = second.subscribe();
        assert_eq!(viewport.resize_listener_count(), 2);

        drop(first);
        assert_eq!(viewport.resize_listener_count(), 1);

        viewport.resize(1024);
        let view = next_view(&mut views).await;
        assert_eq!(view.items_per_page, 3);
        assert_eq!(view.page_count, 2);
    }

    #[test]
    fn mounts_outside_a_runtime() {
        let (viewport, surface) = fixtures(0);
        let host = CarouselHost::mount(args(&[(0, 2)]), 4, &viewport, &surface).unwrap();
        assert_eq!(host.view().page_count, 2);
        drop(host);
        assert_eq!(viewport.resize_listener_count(), 0);
    }
}
