//! Pure page arithmetic.
//!
//! Page counts and visible ranges are always recomputed from their inputs so
//! they can never go stale relative to the item count or breakpoint.
use std::{num::NonZeroUsize, ops::Range};

/// Number of pages needed to show `item_count` items, `items_per_page` at a
/// time. Zero items means zero pages.
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use carousel_components::page_math::page_count;
///
/// let two = NonZeroUsize::new(2).unwrap();
/// assert_eq!(page_count(5, two), 3);
/// assert_eq!(page_count(0, two), 0);
/// ```
pub fn page_count(item_count: usize, items_per_page: NonZeroUsize) -> usize {
    item_count.div_ceil(items_per_page.get())
}

/// Item indices shown on `page`, as a half-open range.
///
/// The range is not clipped to the item count; the last page of an uneven
/// split simply contains fewer real items.
pub fn visible_range(page: usize, items_per_page: NonZeroUsize) -> Range<usize> {
    let per_page = items_per_page.get();
    let start = page.saturating_mul(per_page);
    let end = page.saturating_add(1).saturating_mul(per_page);
    start..end
}

/// Whether `item` is on `page`.
pub fn is_visible(item: usize, page: usize, items_per_page: NonZeroUsize) -> bool {
    visible_range(page, items_per_page).contains(&item)
}

/// Highest valid page index, or zero when there are no pages.
pub fn last_page(page_count: usize) -> usize {
    page_count.saturating_sub(1)
}
