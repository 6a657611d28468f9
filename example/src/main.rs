//! Scripted carousel session.
//!
//! Mounts a product gallery on a simulated window, then resizes it, swipes
//! through it and lets autoplay run, logging each published view. Each step
//! queues its events before awaiting, so every logged view is the result of
//! exactly one step. Set `RUST_LOG=debug` to also see the controller's own
//! events.

use std::time::Duration;

use carousel_components::{
    CarouselView,
    autoplay::AutoplayArgs,
    breakpoint::BreakpointRule,
    carousel::CarouselArgs,
    view::{PaginationContent, PresentationArgs},
};
use carousel_shard::{CarouselHost, HostError};
use carousel_ui::{GestureSurface, TouchEvent, TouchPhase, Viewport};
use tokio::sync::watch;
use tracing::info;

const ITEMS: [&str; 7] = [
    "Lamp", "Chair", "Desk", "Shelf", "Rug", "Mirror", "Clock",
];

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    carousel_ui::init_tracing();

    let viewport = Viewport::with_width(375);
    let surface = GestureSurface::new("gallery.touch");
    let args = CarouselArgs::default()
        .breakpoints(BreakpointRule::from_pairs(&[(768, 3), (1024, 4)])?)
        .presentation(PresentationArgs::default().pagination_content(PaginationContent::Numeric));

    let host = CarouselHost::mount(args, ITEMS.len(), &viewport, &surface)?;
    let mut views = host.subscribe();
    let handle = host.handle();
    log_view("mounted", &host.view());

    viewport.resize(800);
    log_view("tablet width", &next(&mut views).await?);

    handle.go_to(2)?;
    log_view("third page", &next(&mut views).await?);

    viewport.resize(1280);
    log_view("desktop width", &next(&mut views).await?);

    viewport.resize(375);
    for (phase, x) in [
        (TouchPhase::Start, 300),
        (TouchPhase::Move, 260),
        (TouchPhase::End, 120),
    ] {
        surface.dispatch(&TouchEvent::single(phase, x));
    }
    log_view("swiped on phone", &next(&mut views).await?);

    handle.set_autoplay_args(
        AutoplayArgs::default()
            .enabled(true)
            .interval(Duration::from_millis(400)),
    )?;
    log_view("autoplay on", &next(&mut views).await?);

    for _ in 0..3 {
        log_view("autoplay", &next(&mut views).await?);
    }

    handle.toggle_autoplay_pause()?;
    log_view("paused", &next(&mut views).await?);

    host.unmount();
    info!(
        resize_listeners = viewport.resize_listener_count(),
        touch_listeners = surface.listener_count(),
        "unmounted"
    );
    Ok(())
}

async fn next(views: &mut watch::Receiver<CarouselView>) -> Result<CarouselView, HostError> {
    views.changed().await.map_err(|_| HostError::Closed)?;
    Ok(views.borrow_and_update().clone())
}

fn log_view(step: &str, view: &CarouselView) {
    let visible: Vec<&str> = view
        .visible_slides()
        .filter_map(|index| ITEMS.get(index).copied())
        .collect();
    let dots: String = view
        .pagination
        .iter()
        .map(|dot| if dot.active { format!("[{}]", dot.label) } else { dot.label.clone() })
        .collect::<Vec<_>>()
        .join(" ");
    info!(
        step,
        page = view.current_page,
        pages = view.page_count,
        per_page = view.items_per_page,
        ?visible,
        %dots,
        prev = view.prev_button.is_some(),
        next = view.next_button.is_some(),
        pause = view.pause_button.as_ref().map(|button| button.label),
        "view"
    );
}
