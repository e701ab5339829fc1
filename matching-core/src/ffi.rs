//! `extern "C"` surface for embedding the engine in a host harness that
//! isn't Rust, mirroring `original_source/engine.hpp`'s contract:
//! `create_orderbook`, `match_order`, `modify_order_by_id`,
//! `get_volume_at_level`, `lookup_order_by_id`, `order_exists`.
//!
//! Orders cross the boundary via [`OrderWire`](crate::wire::OrderWire)
//! rather than the C struct layout directly, since the caller may be in any
//! language that can produce 9 packed bytes.

use std::ptr;

use common::{Price, Side};

use crate::book::Book;
use crate::wire::OrderWire;

/// Allocates a new, empty book on the heap and returns an opaque handle.
/// The caller owns the returned pointer and must eventually pass it to
/// [`destroy_book`].
#[no_mangle]
pub extern "C" fn create_book() -> *mut Book {
    Box::into_raw(Box::new(Book::new()))
}

/// Frees a book previously returned by [`create_book`]. Passing `null` is a
/// no-op; passing a pointer not obtained from `create_book`, or passing the
/// same pointer twice, is undefined behavior.
///
/// # Safety
/// `book` must be either null or a pointer obtained from `create_book` that
/// has not already been freed.
#[no_mangle]
pub unsafe extern "C" fn destroy_book(book: *mut Book) {
    if !book.is_null() {
        drop(Box::from_raw(book));
    }
}

/// Matches `incoming` against `book` and returns the number of distinct
/// counter orders that contributed to a fill. Returns 0 (and leaves the
/// book untouched) if `book` is null.
///
/// # Safety
/// `book` must be either null or a valid pointer from `create_book`.
#[no_mangle]
pub unsafe extern "C" fn match_order(book: *mut Book, incoming: OrderWire) -> u32 {
    let Some(book) = book.as_mut() else { return 0 };
    let Some(order) = incoming.to_order() else { return 0 };
    book.match_order(order)
}

/// Sets the resting quantity of `order_id` in `book`. `new_quantity == 0`
/// removes the order. No-op if `book` is null or `order_id` is not active.
///
/// # Safety
/// `book` must be either null or a valid pointer from `create_book`.
#[no_mangle]
pub unsafe extern "C" fn modify_order_by_id(book: *mut Book, order_id: u32, new_quantity: u16) {
    if let Some(book) = book.as_mut() {
        book.modify_order_by_id(order_id, new_quantity);
    }
}

/// Total resting volume at `(side, price)`. Returns 0 if `book` is null.
///
/// # Safety
/// `book` must be either null or a valid pointer from `create_book`.
#[no_mangle]
pub unsafe extern "C" fn get_volume_at_level(book: *const Book, side: u8, price: Price) -> u32 {
    let Some(book) = book.as_ref() else { return 0 };
    let Some(side) = Side::from_wire(side) else { return 0 };
    book.get_volume_at_level(side, price) as u32
}

/// Writes the order record for `order_id` into `*out` and returns `true`,
/// or returns `false` (leaving `*out` untouched) if `book` is null, `out` is
/// null, or `order_id` is not currently active.
///
/// # Safety
/// `book` must be either null or a valid pointer from `create_book`. `out`
/// must be either null or a valid, aligned pointer to a writable `OrderWire`.
#[no_mangle]
pub unsafe extern "C" fn lookup_order_by_id(book: *const Book, order_id: u32, out: *mut OrderWire) -> bool {
    if out.is_null() {
        return false;
    }
    let Some(book) = book.as_ref() else { return false };
    match book.lookup_order_by_id(order_id) {
        Ok(order) => {
            ptr::write(out, OrderWire::from_order(order));
            true
        }
        Err(_) => false,
    }
}

/// Whether `order_id` currently refers to a live resting order. Returns
/// `false` if `book` is null.
///
/// # Safety
/// `book` must be either null or a valid pointer from `create_book`.
#[no_mangle]
pub unsafe extern "C" fn order_exists(book: *const Book, order_id: u32) -> bool {
    match book.as_ref() {
        Some(book) => book.order_exists(order_id),
        None => false,
    }
}
