//! Per-side price-level index: a direct-addressed array of `PriceLevel`
//! over the full price domain (design note (a) of the spec), plus a small
//! sorted vector of the prices that currently carry at least one live
//! order, so `best()`/`pop_best()` are O(1).
//!
//! The active-price container generalizes `original_source/sorted_array.h`
//! / `reverse_array.h`'s fixed-capacity sorted array into a `Vec` (the live
//! width of a real book is tens to low hundreds, never the full
//! `MAX_PRICE` domain). The insertion itself departs from those files:
//! `sorted_array.h::insert` does a backward linear scan, but `insert` below
//! binary-searches the sorted vector for the slot and shifts from there.

use common::{Price, Side};

use crate::config::MAX_PRICE;
use crate::price_level::PriceLevel;

/// One side of the book: every price in `[0, MAX_PRICE)` has a (possibly
/// empty) `PriceLevel` slot, and `active` lists the prices whose level is
/// currently non-empty, kept in ascending order.
pub struct PriceIndex {
    side: Side,
    levels: Box<[PriceLevel]>,
    /// Ascending order. Best is the back for Buy (max), the front for Sell
    /// (min).
    active: Vec<Price>,
}

impl PriceIndex {
    pub fn new(side: Side) -> Self {
        let mut levels = Vec::with_capacity(MAX_PRICE);
        levels.resize_with(MAX_PRICE, PriceLevel::new);
        Self {
            side,
            levels: levels.into_boxed_slice(),
            active: Vec::new(),
        }
    }

    #[inline]
    pub fn level(&self, price: Price) -> &PriceLevel {
        &self.levels[price as usize]
    }

    #[inline]
    pub fn level_mut(&mut self, price: Price) -> &mut PriceLevel {
        &mut self.levels[price as usize]
    }

    /// Best (price, level) pair in priority order, or `None` if this side
    /// is empty. O(1).
    pub fn best(&self) -> Option<Price> {
        match self.side {
            Side::Buy => self.active.last().copied(),
            Side::Sell => self.active.first().copied(),
        }
    }

    /// Removes the current best price from the active set. The level's
    /// contents are left untouched -- the caller has already drained them.
    pub fn pop_best(&mut self) {
        match self.side {
            Side::Buy => {
                self.active.pop();
            }
            Side::Sell => {
                if !self.active.is_empty() {
                    self.active.remove(0);
                }
            }
        }
    }

    /// Marks `price` active, inserting it into the sorted position if it
    /// isn't already present. Idempotent. O(k) for the typical small live
    /// width, O(n) worst case.
    pub fn insert(&mut self, price: Price) {
        match self.active.binary_search(&price) {
            Ok(_) => {}
            Err(pos) => self.active.insert(pos, price),
        }
    }

    /// Removes `price` from the active set (used when a non-best level
    /// empties via cancel). No-op if not present.
    pub fn remove(&mut self, price: Price) {
        if let Ok(pos) = self.active.binary_search(&price) {
            self.active.remove(pos);
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    #[cfg(debug_assertions)]
    pub fn active_prices(&self) -> &[Price] {
        &self.active
    }
}
