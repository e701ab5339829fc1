//! Compile-time workload constants.
//!
//! Fixed at build/construction per the spec: no environment variables, no
//! CLI, no persistence. All storage the book allocates is sized from these.

use common::{OrderId, Price};

/// Dense id range the order store indexes directly: `[0, MAX_ORDERS)`.
pub const MAX_ORDERS: usize = 10_000;

/// Capacity of the FIFO queue at a single price level. Chosen as the next
/// power of two above `original_source/engine.hpp`'s `MAX_ORDERS_PER_LEVEL
/// = 496`, since the ring queue's wraparound mask requires a power of two.
pub const MAX_ORDERS_PER_LEVEL: usize = 512;

/// Upper bound (exclusive) on the price domain: `[0, MAX_PRICE)`.
pub const MAX_PRICE: usize = 8192;

/// Returns whether `id` is addressable in the order store.
#[inline]
pub const fn id_in_domain(id: OrderId) -> bool {
    (id as usize) < MAX_ORDERS
}

/// Returns whether `price` is addressable in the price index.
#[inline]
pub const fn price_in_domain(price: Price) -> bool {
    (price as usize) < MAX_PRICE
}
