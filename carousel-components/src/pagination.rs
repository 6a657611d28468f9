//! The current-page state machine.
//!
//! [`PaginationState`] is the only owner of the page index. Every trigger
//! (pagination dots, prev/next buttons, swipes, autoplay) goes through
//! [`PaginationState::dispatch`], which clamps against the page count it is
//! given. The page count itself is never stored here; callers derive it from
//! the current inputs and pass it in.
use tracing::debug;

use crate::page_math::last_page;

/// A request to move to another page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavigationCommand {
    /// Jump to the given page, clamped into range.
    GoTo(usize),
    /// Advance one page. With `wrap`, the last page continues at the first.
    Next {
        /// Whether to wrap around at the last page.
        wrap: bool,
    },
    /// Go back one page. With `wrap`, the first page continues at the last.
    Prev {
        /// Whether to wrap around at the first page.
        wrap: bool,
    },
}

/// Owns the current page index.
///
/// Invariant: after any operation the index lies in `0..page_count`, or is
/// `0` when `page_count` is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaginationState {
    index: usize,
}

impl PaginationState {
    /// Creates the state at page zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current page index.
    pub fn current(&self) -> usize {
        self.index
    }

    /// Applies `command` and returns whether the index changed.
    pub fn dispatch(&mut self, command: NavigationCommand, page_count: usize) -> bool {
        let last = last_page(page_count);
        let target = match command {
            NavigationCommand::GoTo(page) => page.min(last),
            NavigationCommand::Next { wrap } => {
                if self.index < last {
                    self.index + 1
                } else if wrap {
                    0
                } else {
                    self.index
                }
            }
            NavigationCommand::Prev { wrap } => {
                if self.index > 0 {
                    self.index - 1
                } else if wrap {
                    last
                } else {
                    self.index
                }
            }
        };
        self.set(target.min(last))
    }

    /// Jumps to `page`, clamped into range.
    pub fn go_to(&mut self, page: usize, page_count: usize) -> bool {
        self.dispatch(NavigationCommand::GoTo(page), page_count)
    }

    /// Advances one page.
    pub fn next(&mut self, wrap: bool, page_count: usize) -> bool {
        self.dispatch(NavigationCommand::Next { wrap }, page_count)
    }

    /// Goes back one page.
    pub fn prev(&mut self, wrap: bool, page_count: usize) -> bool {
        self.dispatch(NavigationCommand::Prev { wrap }, page_count)
    }

    /// Clamps the index down after the page count changed.
    ///
    /// Must run before anything reads the index again.
    pub fn reconcile(&mut self, page_count: usize) -> bool {
        let last = last_page(page_count);
        if self.index <= last {
            return false;
        }
        debug!(from = self.index, to = last, page_count, "page index reconciled");
        self.set(last)
    }

    fn set(&mut self, index: usize) -> bool {
        if self.index == index {
            return false;
        }
        self.index = index;
        true
    }
}
