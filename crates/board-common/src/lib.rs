//! Shared domain types for the order board.
//!
//! Kept free of any view or host concerns so that both the board core and
//! any host binding (CLI replay, a browser shell) agree on the same shapes.

pub mod messages;
pub mod models;

pub use messages::BoardMessage;
pub use models::{BoardSnapshot, Column, ColumnView, Order, OrderId};
