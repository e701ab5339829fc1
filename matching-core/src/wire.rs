//! Wire layout for an `Order` crossing the FFI boundary.
//!
//! `#[repr(C, packed)]` plus zerocopy traits, matching the wire-message
//! style of the teacher's `protocol.rs`. Layout (9 bytes total):
//! - id: u32 (4 bytes)
//! - price: u16 (2 bytes)
//! - quantity: u16 (2 bytes)
//! - side: u8 (1 byte) -- 0 = Buy, 1 = Sell

use zerocopy::{AsBytes, FromBytes, FromZeroes};

use common::{Order, OrderId, Price, Qty, Side};

#[repr(C, packed)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes, FromZeroes)]
pub struct OrderWire {
    pub id: OrderId,
    pub price: Price,
    pub quantity: Qty,
    pub side: u8,
}

/// Size of `OrderWire` in bytes.
pub const ORDER_WIRE_SIZE: usize = std::mem::size_of::<OrderWire>();

impl OrderWire {
    #[inline]
    pub fn from_order(order: Order) -> Self {
        Self {
            id: order.id,
            price: order.price,
            quantity: order.quantity,
            side: order.side.as_wire(),
        }
    }

    /// Decodes into an `Order`. `None` if `side` is not a recognized value.
    #[inline]
    pub fn to_order(&self) -> Option<Order> {
        let side = Side::from_wire(self.side)?;
        Some(Order::new(self.id, self.price, self.quantity, side))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        AsBytes::as_bytes(self)
    }

    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Option<&Self> {
        FromBytes::ref_from(bytes)
    }
}
