//! Dense, id-indexed order table plus the `active` bit-vector (spec §4.3).
//!
//! The volume aggregate `vol[price][side]` is not a separate table here:
//! since the price index (§4.2) realizes "direct-addressed array over the
//! full price domain" (design note (a)), `vol[price][side]` and
//! `PriceLevel.volume` are the same memory -- see `book.rs::get_volume_at_level`.

use common::{Order, OrderId, Price, Qty, Side};

use crate::config::MAX_ORDERS;

/// `orders[0..MAX_ORDERS)` plus `active[0..MAX_ORDERS)`.
///
/// Invariant S1: `active[id]` is true iff order `id` is currently resting
/// on exactly one side at `orders[id].price`.
/// Invariant S2: an id appears at most once across all queues on both sides.
pub struct OrderStore {
    orders: Box<[Order; MAX_ORDERS]>,
    active: common::bitset::FixedBitSet<MAX_ORDERS>,
}

const EMPTY_ORDER: Order = Order::new(0, 0, 0, Side::Buy);

impl OrderStore {
    pub fn new() -> Self {
        Self {
            orders: Box::new([EMPTY_ORDER; MAX_ORDERS]),
            active: common::bitset::FixedBitSet::new(),
        }
    }

    #[inline]
    pub fn is_active(&self, id: OrderId) -> bool {
        self.active.get(id as usize)
    }

    /// Records `order` as a live resting entry.
    #[inline]
    pub fn insert(&mut self, order: Order) {
        self.orders[order.id as usize] = order;
        self.active.set(order.id as usize);
    }

    /// Returns the order record regardless of active state. Callers must
    /// check `is_active` first if liveness matters.
    #[inline]
    pub fn get(&self, id: OrderId) -> &Order {
        &self.orders[id as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: OrderId) -> &mut Order {
        &mut self.orders[id as usize]
    }

    /// Sets the resting quantity for `id` without touching side/price/id.
    #[inline]
    pub fn set_quantity(&mut self, id: OrderId, quantity: Qty) {
        self.orders[id as usize].quantity = quantity;
    }

    /// Destroys the resting entry: clears `active`. Does not touch the
    /// stored record (left as stale data; liveness is solely determined by
    /// the bit-vector).
    #[inline]
    pub fn deactivate(&mut self, id: OrderId) {
        self.active.clear(id as usize);
    }

    #[inline]
    pub fn side_of(&self, id: OrderId) -> Side {
        self.orders[id as usize].side
    }

    #[inline]
    pub fn price_of(&self, id: OrderId) -> Price {
        self.orders[id as usize].price
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_marks_active() {
        let mut store = OrderStore::new();
        assert!(!store.is_active(5));
        store.insert(Order::new(5, 100, 10, Side::Buy));
        assert!(store.is_active(5));
        assert_eq!(store.get(5).quantity, 10);
    }

    #[test]
    fn test_deactivate_clears_liveness_but_keeps_record() {
        let mut store = OrderStore::new();
        store.insert(Order::new(3, 50, 7, Side::Sell));
        store.deactivate(3);
        assert!(!store.is_active(3));
        assert_eq!(store.get(3).quantity, 7);
    }

    #[test]
    fn test_set_quantity() {
        let mut store = OrderStore::new();
        store.insert(Order::new(1, 10, 20, Side::Buy));
        store.set_quantity(1, 5);
        assert_eq!(store.get(1).quantity, 5);
    }

    #[test]
    fn test_side_and_price_accessors() {
        let mut store = OrderStore::new();
        store.insert(Order::new(9, 42, 1, Side::Sell));
        assert_eq!(store.side_of(9), Side::Sell);
        assert_eq!(store.price_of(9), 42);
    }
}
