// Typed error surface for the order book.
//
// The teacher workspace returns `Option`/`bool` at its own leaves and never
// needed a dedicated error enum; the rest of the retrieved matching-engine
// corpus overwhelmingly reaches for `thiserror` for exactly this, so that's
// what the book's one correctness-path error return uses.

use crate::types::{OrderId, Price};

/// Errors the order book can report.
///
/// Hot-path operations (`match_order`, `modify_order_by_id`,
/// `get_volume_at_level`) never surface these to the caller through a
/// `Result` — capacity and domain failures are logged and the offending
/// sub-step is dropped so the book stays consistent. Only the
/// correctness-path `lookup_order_by_id` returns one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("order {id} not found")]
    NotFound { id: OrderId },

    #[error("capacity exceeded: {reason}")]
    CapacityExceeded { reason: &'static str },

    #[error("price {price} out of domain")]
    OutOfDomain { price: Price },
}
