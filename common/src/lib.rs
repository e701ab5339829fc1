//! Shared low-level building blocks for the order book: core types, a
//! lock-free SPSC queue (cross-thread, used by the logger), a bounded
//! single-threaded ring queue (intra-thread, used by price levels), a
//! fixed-size bit-vector, the typed error surface, a low-latency logger,
//! and timing utilities.

pub mod bitset;
pub mod error;
pub mod lf_queue;
pub mod logging;
pub mod ring;
pub mod time;
pub mod types;

pub use error::EngineError;
pub use types::{Order, OrderId, Price, Qty, Side, INVALID_ORDER_ID};
