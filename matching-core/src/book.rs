//! The matching engine: `Book` ties the price index, order store, and
//! matching/resting algorithm together (spec §4.4).
//!
//! Grounded in `original_source/engine.cpp`'s `match_order` /
//! `process_orders` / `match_price_level` / `add_order` / `modify_order`,
//! rewritten against the direct-addressed price index instead of the
//! original's sliding buffer (which the design notes call out as
//! bug-prone and not worth reproducing here). The warn-and-drop logging on
//! out-of-domain/capacity paths reuses `common::logging::Logger` but has
//! no teacher precedent to match against -- the teacher's own matching
//! engine never logs at all.

use common::logging::{LogLevel, Logger};
use common::{EngineError, Order, OrderId, Price, Qty, Side};

use crate::config::{id_in_domain, price_in_domain, MAX_ORDERS_PER_LEVEL};
use crate::order_store::OrderStore;
use crate::price_index::PriceIndex;

/// A single-symbol limit order book. Owns all storage for one symbol;
/// construct one per symbol and keep each on its own thread -- there is no
/// interior synchronization.
pub struct Book {
    bids: PriceIndex,
    asks: PriceIndex,
    orders: OrderStore,
    logger: Logger,
}

impl Book {
    pub fn new() -> Self {
        Self {
            bids: PriceIndex::new(Side::Buy),
            asks: PriceIndex::new(Side::Sell),
            orders: OrderStore::new(),
            logger: Logger::with_level(LogLevel::Warn),
        }
    }

    #[inline]
    fn index(&self, side: Side) -> &PriceIndex {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    #[inline]
    fn index_mut(&mut self, side: Side) -> &mut PriceIndex {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Whether `working`'s price crosses `best_price` on the opposite side.
    /// Crosses are inclusive: equal prices match.
    #[inline]
    fn crosses(side: Side, working_price: Price, best_price: Price) -> bool {
        match side {
            Side::Buy => working_price >= best_price,
            Side::Sell => working_price <= best_price,
        }
    }

    /// Matches `incoming` against resting liquidity on the opposite side,
    /// then rests any residual quantity on `incoming`'s own side.
    ///
    /// Returns the number of distinct counter orders that contributed to a
    /// fill. Never panics on caller-supplied data; out-of-domain conditions
    /// are logged and the order is dropped rather than corrupting the book.
    pub fn match_order(&mut self, incoming: Order) -> u32 {
        if !id_in_domain(incoming.id) {
            self.logger
                .log_with_i64(LogLevel::Warn, "match_order: id out of domain", incoming.id as i64);
            return 0;
        }
        if !price_in_domain(incoming.price) {
            self.logger.log_with_i64(
                LogLevel::Warn,
                "match_order: price out of domain",
                incoming.price as i64,
            );
            return 0;
        }
        if incoming.quantity == 0 {
            return 0;
        }

        let mut working = incoming;
        let opposite_side = working.side.opposite();
        let mut match_count: u32 = 0;

        loop {
            if working.quantity == 0 {
                break;
            }
            let Some(best_price) = self.index(opposite_side).best() else {
                break;
            };
            if !Self::crosses(working.side, working.price, best_price) {
                break;
            }

            let level_emptied = self.drain_level(opposite_side, best_price, &mut working, &mut match_count);
            if level_emptied {
                self.index_mut(opposite_side).pop_best();
            }
        }

        if working.quantity > 0 {
            self.rest(working);
        }

        match_count
    }

    /// Drains the FIFO at `(opposite_side, price)` against `working` until
    /// either the level or `working`'s quantity is exhausted. Returns
    /// whether the level is now empty (and should be removed from the
    /// index).
    fn drain_level(
        &mut self,
        opposite_side: Side,
        price: Price,
        working: &mut Order,
        match_count: &mut u32,
    ) -> bool {
        loop {
            if working.quantity == 0 {
                return self.index(opposite_side).level(price).is_empty();
            }

            let level = self.index_mut(opposite_side).level_mut(price);
            let Some(&cid) = level.queue.front() else {
                return true;
            };

            if !self.orders.is_active(cid) {
                // Stale id left behind by a lazy removal path; drop it.
                level.queue.pop_front();
                continue;
            }

            let counter_qty = self.orders.get(cid).quantity;
            let trade = working.quantity.min(counter_qty);

            working.quantity -= trade;
            let remaining = counter_qty - trade;
            self.orders.set_quantity(cid, remaining);
            let level = self.index_mut(opposite_side).level_mut(price);
            level.volume -= trade;
            *match_count += 1;

            if remaining == 0 {
                self.orders.deactivate(cid);
                level.queue.pop_front();
            }

            if level.is_empty() {
                return true;
            }
        }
    }

    /// Rests the residual of `working` on its own side.
    fn rest(&mut self, working: Order) {
        let was_empty = self.index(working.side).level(working.price).is_empty();
        let level = self.index_mut(working.side).level_mut(working.price);

        if !level.queue.push_back(working.id) {
            self.logger.log_with_i64(
                LogLevel::Warn,
                "match_order: price level at capacity, order dropped",
                working.id as i64,
            );
            return;
        }
        level.volume += working.quantity;

        if was_empty {
            self.index_mut(working.side).insert(working.price);
        }
        self.orders.insert(working);
    }

    /// Sets the resting quantity of `id` to `new_quantity`. A no-op if `id`
    /// is not currently active (idempotent repeat-cancel). `new_quantity ==
    /// 0` removes the order and its queue slot (eager removal); any other
    /// value updates the quantity in place, preserving queue position and
    /// therefore time priority.
    pub fn modify_order_by_id(&mut self, id: OrderId, new_quantity: Qty) {
        if !id_in_domain(id) || !self.orders.is_active(id) {
            return;
        }

        let order = *self.orders.get(id);
        let delta = new_quantity as i32 - order.quantity as i32;
        let level = self.index_mut(order.side).level_mut(order.price);
        level.volume = (level.volume as i32 + delta) as Qty;

        if new_quantity > 0 {
            self.orders.set_quantity(id, new_quantity);
            return;
        }

        self.orders.deactivate(id);
        let level = self.index_mut(order.side).level_mut(order.price);
        level.queue.remove_by_id(&id);
        if level.is_empty() {
            self.index_mut(order.side).remove(order.price);
        }
    }

    /// Total live resting volume at `(side, price)`. O(1); zero if no level
    /// exists or the price is out of domain.
    pub fn get_volume_at_level(&self, side: Side, price: Price) -> Qty {
        if !price_in_domain(price) {
            return 0;
        }
        self.index(side).level(price).volume
    }

    /// Looks up the order record for `id`. `NotFound` if `id` is not
    /// currently an active resting order.
    pub fn lookup_order_by_id(&self, id: OrderId) -> Result<Order, EngineError> {
        if !id_in_domain(id) || !self.orders.is_active(id) {
            return Err(EngineError::NotFound { id });
        }
        Ok(*self.orders.get(id))
    }

    /// Whether `id` currently refers to a live resting order.
    pub fn order_exists(&self, id: OrderId) -> bool {
        id_in_domain(id) && self.orders.is_active(id)
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

/// Capacity of a single price level's FIFO, re-exported for callers that
/// size their own buffers against it.
pub const ORDERS_PER_LEVEL: usize = MAX_ORDERS_PER_LEVEL;

#[cfg(test)]
mod tests {
    use super::*;

    fn buy(id: OrderId, price: Price, qty: Qty) -> Order {
        Order::new(id, price, qty, Side::Buy)
    }
    fn sell(id: OrderId, price: Price, qty: Qty) -> Order {
        Order::new(id, price, qty, Side::Sell)
    }

    #[test]
    fn test_resting_with_no_cross() {
        let mut book = Book::new();
        assert_eq!(book.match_order(buy(50, 90, 10)), 0);
        assert_eq!(book.match_order(sell(51, 95, 10)), 0);
        assert_eq!(book.get_volume_at_level(Side::Buy, 90), 10);
        assert_eq!(book.get_volume_at_level(Side::Sell, 95), 10);
        assert!(book.order_exists(50));
        assert!(book.order_exists(51));
    }

    #[test]
    fn test_basic_partial_cross_and_modify() {
        let mut book = Book::new();
        assert_eq!(book.match_order(sell(200, 100, 10)), 0);
        assert_eq!(book.match_order(sell(201, 100, 20)), 0);
        assert_eq!(book.match_order(sell(202, 101, 15)), 0);

        book.modify_order_by_id(200, 5);
        assert_eq!(book.get_volume_at_level(Side::Sell, 100), 25);
        assert_eq!(book.get_volume_at_level(Side::Sell, 101), 15);
    }

    #[test]
    fn test_full_partial_fill_match_count() {
        let mut book = Book::new();
        assert_eq!(book.match_order(sell(32, 100, 4)), 0);
        assert_eq!(book.match_order(sell(33, 100, 6)), 0);
        assert_eq!(book.match_order(buy(34, 100, 8)), 2);

        assert!(!book.order_exists(32));
        assert!(book.order_exists(33));
        assert_eq!(book.lookup_order_by_id(33).unwrap().quantity, 2);
    }

    #[test]
    fn test_cross_price_sweep() {
        let mut book = Book::new();
        assert_eq!(book.match_order(sell(3, 90, 5)), 0);
        assert_eq!(book.match_order(sell(4, 95, 5)), 0);
        assert_eq!(book.match_order(buy(5, 100, 8)), 2);

        assert!(book.order_exists(4));
        assert_eq!(book.lookup_order_by_id(4).unwrap().quantity, 2);

        book.modify_order_by_id(4, 1);
        assert_eq!(book.lookup_order_by_id(4).unwrap().quantity, 1);

        book.modify_order_by_id(4, 0);
        assert!(!book.order_exists(4));
        assert_eq!(book.get_volume_at_level(Side::Sell, 95), 0);
    }

    #[test]
    fn test_volume_aggregation_across_prices() {
        let mut book = Book::new();
        book.match_order(buy(103, 100, 10));
        book.match_order(buy(104, 101, 5));
        assert_eq!(book.get_volume_at_level(Side::Buy, 100), 10);
        assert_eq!(book.get_volume_at_level(Side::Buy, 101), 5);
    }

    #[test]
    fn test_cancel_during_queue_traversal_is_skipped() {
        let mut book = Book::new();
        book.match_order(sell(10, 100, 5));
        book.match_order(sell(11, 100, 5));
        book.match_order(sell(12, 100, 5));

        book.modify_order_by_id(11, 0);

        let matches = book.match_order(buy(20, 100, 15));
        assert_eq!(matches, 2);
        assert!(!book.order_exists(10));
        assert!(!book.order_exists(11));
        assert!(!book.order_exists(12));
        assert_eq!(book.get_volume_at_level(Side::Buy, 100), 5);
    }

    #[test]
    fn test_empty_opposite_side_rests_full_quantity() {
        let mut book = Book::new();
        assert_eq!(book.match_order(buy(1, 50, 100)), 0);
        assert_eq!(book.get_volume_at_level(Side::Buy, 50), 100);
    }

    #[test]
    fn test_zero_quantity_incoming_is_noop() {
        let mut book = Book::new();
        assert_eq!(book.match_order(buy(1, 50, 0)), 0);
        assert!(!book.order_exists(1));
    }

    #[test]
    fn test_idempotent_cancel() {
        let mut book = Book::new();
        book.match_order(buy(7, 42, 10));
        book.modify_order_by_id(7, 0);
        book.modify_order_by_id(7, 0);
        assert!(!book.order_exists(7));
        assert_eq!(book.get_volume_at_level(Side::Buy, 42), 0);
    }

    #[test]
    fn test_round_trip_rest_then_cancel_restores_volumes() {
        let mut book = Book::new();
        book.match_order(buy(1, 10, 5));
        let before = book.get_volume_at_level(Side::Buy, 20);
        book.match_order(buy(2, 20, 7));
        book.modify_order_by_id(2, 0);
        assert_eq!(book.get_volume_at_level(Side::Buy, 20), before);
    }

    #[test]
    fn test_conservation_of_matched_quantity() {
        let mut book = Book::new();
        book.match_order(sell(1, 100, 10));
        book.match_order(sell(2, 100, 10));
        let before = book.get_volume_at_level(Side::Sell, 100);
        book.match_order(buy(3, 100, 15));
        let after = book.get_volume_at_level(Side::Sell, 100);
        assert_eq!(before - after, 15);
    }

    #[test]
    fn test_price_time_priority_within_level() {
        let mut book = Book::new();
        book.match_order(sell(1, 100, 5));
        book.match_order(sell(2, 100, 5));
        book.match_order(buy(3, 100, 5));
        // The earlier-arrived order (1) is filled first, order 2 untouched.
        assert!(!book.order_exists(1));
        assert!(book.order_exists(2));
    }

    #[test]
    fn test_out_of_domain_price_is_dropped_not_panicking() {
        let mut book = Book::new();
        assert_eq!(book.match_order(buy(1, Price::MAX, 10)), 0);
        assert!(!book.order_exists(1));
    }

    #[test]
    fn test_level_capacity_exceeded_is_logged_not_panicking() {
        let mut book = Book::new();
        for i in 0..(ORDERS_PER_LEVEL as u32) {
            book.match_order(buy(i, 10, 1));
        }
        // One more at the same price should be dropped, not panic.
        book.match_order(buy(ORDERS_PER_LEVEL as u32, 10, 1));
        assert_eq!(
            book.get_volume_at_level(Side::Buy, 10),
            ORDERS_PER_LEVEL as Qty
        );
    }
}
