#![forbid(unsafe_code)]

//! Enums shared between the reconciler service and its storage types.

mod enums;

pub use enums::{CardBrand, OrderStatus, TransactionType};
