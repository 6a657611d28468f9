//! Responsive breakpoints mapping viewport widths to items per page.
//!
//! ## Usage
//!
//! Show one slide on phones, three on tablets and four on desktops:
//!
//! ```
//! use carousel_components::breakpoint::{BreakpointRule, BreakpointSet};
//!
//! let rules = BreakpointRule::from_pairs(&[(768, 3), (1024, 4)]).unwrap();
//! let set = BreakpointSet::normalize(rules);
//!
//! assert_eq!(set.resolve(320).items_per_page.get(), 1);
//! assert_eq!(set.resolve(800).items_per_page.get(), 3);
//! assert_eq!(set.resolve(1920).items_per_page.get(), 4);
//! ```
use std::num::NonZeroUsize;

use smallvec::SmallVec;

use crate::error::CarouselError;

/// A single `min_width → items_per_page` rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(u32, usize)", into = "(u32, usize)")
)]
pub struct BreakpointRule {
    /// Smallest viewport width, in pixels, at which the rule applies.
    pub min_width: u32,
    /// How many items fit on one page at or above `min_width`.
    pub items_per_page: NonZeroUsize,
}

impl BreakpointRule {
    /// The rule synthesized when no rule covers width zero.
    pub const FALLBACK: Self = Self {
        min_width: 0,
        items_per_page: NonZeroUsize::MIN,
    };

    /// Creates a rule from an already validated item count.
    pub const fn new(min_width: u32, items_per_page: NonZeroUsize) -> Self {
        Self {
            min_width,
            items_per_page,
        }
    }

    /// Creates a rule, rejecting zero items per page.
    pub fn try_new(min_width: u32, items_per_page: usize) -> Result<Self, CarouselError> {
        NonZeroUsize::new(items_per_page)
            .map(|items_per_page| Self::new(min_width, items_per_page))
            .ok_or(CarouselError::ZeroItemsPerPage { min_width })
    }

    /// Converts `(min_width, items_per_page)` pairs into rules.
    pub fn from_pairs(pairs: &[(u32, usize)]) -> Result<Vec<Self>, CarouselError> {
        pairs
            .iter()
            .map(|&(min_width, items_per_page)| Self::try_new(min_width, items_per_page))
            .collect()
    }
}

impl TryFrom<(u32, usize)> for BreakpointRule {
    type Error = CarouselError;

    fn try_from((min_width, items_per_page): (u32, usize)) -> Result<Self, Self::Error> {
        Self::try_new(min_width, items_per_page)
    }
}

impl From<BreakpointRule> for (u32, usize) {
    fn from(rule: BreakpointRule) -> Self {
        (rule.min_width, rule.items_per_page.get())
    }
}

/// Breakpoint rules sorted ascending and unique by `min_width`.
///
/// A set always contains a rule for width zero, so [`BreakpointSet::resolve`]
/// is total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakpointSet {
    rules: SmallVec<[BreakpointRule; 4]>,
}

impl BreakpointSet {
    /// Sorts `rules`, drops duplicate widths and adds the zero-width fallback.
    ///
    /// When a width appears more than once, the rule supplied last wins.
    pub fn normalize(rules: impl IntoIterator<Item = BreakpointRule>) -> Self {
        let mut sorted: SmallVec<[BreakpointRule; 4]> = rules.into_iter().collect();
        // Stable, so equal widths keep their input order.
        sorted.sort_by_key(|rule| rule.min_width);

        let mut unique: SmallVec<[BreakpointRule; 4]> = SmallVec::with_capacity(sorted.len() + 1);
        for rule in sorted {
            match unique.last_mut() {
                Some(last) if last.min_width == rule.min_width => *last = rule,
                _ => unique.push(rule),
            }
        }

        if unique.first().is_none_or(|rule| rule.min_width != 0) {
            unique.insert(0, BreakpointRule::FALLBACK);
        }

        Self { rules: unique }
    }

    /// Returns the rule with the greatest `min_width` not exceeding `width`.
    pub fn resolve(&self, width: u32) -> BreakpointRule {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.min_width <= width)
            .copied()
            .unwrap_or(BreakpointRule::FALLBACK)
    }

    /// Returns the zero-width rule, used before the viewport is measured.
    pub fn lowest(&self) -> BreakpointRule {
        self.rules
            .first()
            .copied()
            .unwrap_or(BreakpointRule::FALLBACK)
    }

    /// Returns the normalized rules in ascending order.
    pub fn rules(&self) -> &[BreakpointRule] {
        &self.rules
    }
}

impl Default for BreakpointSet {
    fn default() -> Self {
        Self::normalize([])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pairs: &[(u32, usize)]) -> BreakpointSet {
        BreakpointSet::normalize(BreakpointRule::from_pairs(pairs).unwrap())
    }

    fn widths(set: &BreakpointSet) -> Vec<(u32, usize)> {
        set.rules().iter().map(|&rule| rule.into()).collect()
    }

    #[test]
    fn normalize_sorts_and_adds_fallback() {
        let set = set(&[(1024, 4), (768, 3)]);
        assert_eq!(widths(&set), vec![(0, 1), (768, 3), (1024, 4)]);
    }

    #[test]
    fn normalize_keeps_explicit_zero_rule() {
        let set = set(&[(600, 2), (0, 3)]);
        assert_eq!(widths(&set), vec![(0, 3), (600, 2)]);
    }

    #[test]
    fn normalize_last_duplicate_wins() {
        let set = set(&[(768, 2), (0, 1), (768, 5)]);
        assert_eq!(widths(&set), vec![(0, 1), (768, 5)]);
    }

    #[test]
    fn empty_input_is_single_item_pages() {
        let set = BreakpointSet::default();
        assert_eq!(widths(&set), vec![(0, 1)]);
        assert_eq!(set.resolve(0), BreakpointRule::FALLBACK);
        assert_eq!(set.resolve(u32::MAX), BreakpointRule::FALLBACK);
    }

    #[test]
    fn resolve_picks_greatest_width_not_above_viewport() {
        let sets = [
            set(&[]),
            set(&[(0, 2)]),
            set(&[(768, 3), (1024, 4)]),
            set(&[(1, 7), (2, 8), (500, 9), (501, 10)]),
        ];
        let probe_widths = [0, 1, 2, 3, 499, 500, 501, 767, 768, 769, 1023, 1024, 4096];

        for set in &sets {
            for &width in &probe_widths {
                let resolved = set.resolve(width);
                let expected = set
                    .rules()
                    .iter()
                    .filter(|rule| rule.min_width <= width)
                    .map(|rule| rule.min_width)
                    .max()
                    .unwrap();
                assert_eq!(resolved.min_width, expected, "width {width} in {set:?}");
                assert_eq!(
                    set.rules()
                        .iter()
                        .filter(|rule| rule.min_width == resolved.min_width)
                        .count(),
                    1
                );
            }
        }
    }

    #[test]
    fn zero_items_per_page_is_rejected() {
        assert_eq!(
            BreakpointRule::try_new(640, 0),
            Err(CarouselError::ZeroItemsPerPage { min_width: 640 })
        );
        assert!(BreakpointRule::from_pairs(&[(0, 1), (320, 0)]).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rules_deserialize_from_pairs() {
        let rules: Vec<BreakpointRule> = serde_json::from_str("[[768, 3], [1024, 4]]").unwrap();
        assert_eq!(rules, BreakpointRule::from_pairs(&[(768, 3), (1024, 4)]).unwrap());

        let rejected: Result<Vec<BreakpointRule>, _> = serde_json::from_str("[[768, 0]]");
        assert!(rejected.is_err());
    }
}
