//! Headless view model consumed by renderers.
//!
//! A [`CarouselView`] is a plain snapshot: it lists the controls that should
//! exist, their labels and active states, and the track geometry. Renderers
//! draw it and route clicks back to the carousel's navigation operations.
use carousel_ui::Px;
use derive_setters::Setters;

use crate::carousel::Carousel;

/// What pagination dots display inside them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaginationContent {
    /// Dots are empty; only their label identifies the page.
    #[default]
    Empty,
    /// Dots show the one-based page number.
    Numeric,
}

/// Label and content of a prev/next button.
#[derive(Clone, Debug, PartialEq, Eq, Setters)]
#[setters(into)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavButtonArgs {
    /// Accessible label.
    pub label: String,
    /// Visible content.
    pub content: String,
}

impl NavButtonArgs {
    /// Defaults for the previous-page button.
    pub fn prev() -> Self {
        Self {
            label: "Previous slide".to_string(),
            content: "<".to_string(),
        }
    }

    /// Defaults for the next-page button.
    pub fn next() -> Self {
        Self {
            label: "Next slide".to_string(),
            content: ">".to_string(),
        }
    }
}

/// Which controls the view exposes.
#[derive(Clone, Debug, PartialEq, Eq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PresentationArgs {
    /// Whether one dot per page is shown.
    pub show_pagination: bool,
    /// What the dots display.
    pub pagination_content: PaginationContent,
    /// Whether prev/next buttons are shown.
    pub show_navigation: bool,
    /// Previous-page button.
    pub prev_button: NavButtonArgs,
    /// Next-page button.
    pub next_button: NavButtonArgs,
}

impl Default for PresentationArgs {
    fn default() -> Self {
        Self {
            show_pagination: true,
            pagination_content: PaginationContent::Empty,
            show_navigation: true,
            prev_button: NavButtonArgs::prev(),
            next_button: NavButtonArgs::next(),
        }
    }
}

/// One slide in the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideView {
    /// Index of the item.
    pub index: usize,
    /// Whether the item is on the current page. Hidden items stay mounted
    /// but are hidden from assistive technology.
    pub visible: bool,
}

/// One pagination dot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageDotView {
    /// Page this dot jumps to.
    pub page: usize,
    /// Accessible label, the one-based page number.
    pub label: String,
    /// Displayed content, if any.
    pub content: Option<String>,
    /// Whether this is the current page.
    pub active: bool,
}

/// A prev or next button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavButtonView {
    /// Accessible label.
    pub label: String,
    /// Visible content.
    pub content: String,
}

/// The pause/play toggle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PauseButtonView {
    /// Whether autoplay is paused.
    pub paused: bool,
    /// `"Play"` while paused, `"Pause"` while running.
    pub label: &'static str,
}

/// Snapshot of everything a renderer needs.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselView {
    /// Current page index.
    pub current_page: usize,
    /// Number of pages.
    pub page_count: usize,
    /// Items per page at the active breakpoint.
    pub items_per_page: usize,
    /// Slides in item order.
    pub slides: Vec<SlideView>,
    /// Pagination dots, empty when hidden.
    pub pagination: Vec<PageDotView>,
    /// Previous button, absent on the first page or when hidden.
    pub prev_button: Option<NavButtonView>,
    /// Next button, absent on the last page or when hidden.
    pub next_button: Option<NavButtonView>,
    /// Pause/play toggle, absent unless autoplay can run.
    pub pause_button: Option<PauseButtonView>,
    /// Horizontal track translation, in percent of the container width.
    pub track_offset_percent: f32,
    /// Flex basis of one slide, in percent of the container width.
    pub slide_basis_percent: f32,
    /// Transient gesture feedback displacement.
    pub feedback_offset: Px,
}

impl CarouselView {
    /// Builds the view for the carousel's current state.
    pub fn of(carousel: &Carousel) -> Self {
        let args = carousel.args();
        let presentation = &args.presentation;
        let current_page = carousel.current_page();
        let page_count = carousel.page_count();
        let items_per_page = carousel.items_per_page().get();

        let slides = (0..carousel.item_count())
            .map(|index| SlideView {
                index,
                visible: carousel.is_item_visible(index),
            })
            .collect();

        let pagination = if presentation.show_pagination {
            (0..page_count)
                .map(|page| {
                    let number = (page + 1).to_string();
                    PageDotView {
                        page,
                        content: (presentation.pagination_content == PaginationContent::Numeric)
                            .then(|| number.clone()),
                        label: number,
                        active: page == current_page,
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let nav_button = |button: &NavButtonArgs| NavButtonView {
            label: button.label.clone(),
            content: button.content.clone(),
        };
        let prev_button = (presentation.show_navigation && current_page != 0)
            .then(|| nav_button(&presentation.prev_button));
        let next_button = (presentation.show_navigation && current_page + 1 < page_count)
            .then(|| nav_button(&presentation.next_button));

        let pause_button = (args.autoplay.is_active() && args.autoplay.show_pause_button).then(|| {
            let paused = carousel.autoplay_paused();
            PauseButtonView {
                paused,
                label: if paused { "Play" } else { "Pause" },
            }
        });

        Self {
            current_page,
            page_count,
            items_per_page,
            slides,
            pagination,
            prev_button,
            next_button,
            pause_button,
            track_offset_percent: current_page as f32 * -100.0,
            slide_basis_percent: 100.0 / items_per_page as f32,
            feedback_offset: carousel.feedback_offset(),
        }
    }

    /// Indices of the slides on the current page.
    pub fn visible_slides(&self) -> impl Iterator<Item = usize> + '_ {
        self.slides
            .iter()
            .filter(|slide| slide.visible)
            .map(|slide| slide.index)
    }
}
