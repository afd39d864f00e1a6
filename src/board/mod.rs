//! Order board: a kanban of restaurant orders over a headless document.
//!
//! ## Overview
//!
//! Orders live in an in-memory `OrderStore`. Every user action arrives as a
//! `DomEvent`, is routed by `BoardApp::dispatch` to one handler, and the
//! handler updates the store first and the view second. The view is reached
//! only through the `BoardView` trait; `DomView` implements it over the
//! `Document` arena in `dom.rs`.
//!
//! ## Module Map
//!
//! ```text
//! ┌──────────┐ DomEvent ┌──────────────────────────────────────────────────┐
//! │  Script  │ ───────> │  app.rs  (BoardApp, Bindings, dispatch)          │
//! │ (replay) │          │    ├─ overlay.rs  (add/help toggles, edit close) │
//! └──────────┘          │    ├─ forms.rs    (add, edit, delete)            │
//!                       │    └─ drag.rs     (dragstart/over/end)           │
//!                       │         │                                        │
//!                       │         │ store first, view second               │
//!                       │         v                                        │
//!                       │  state.rs  (OrderStore, DragState)               │
//!                       │  view.rs   (BoardView trait, DomView)            │
//!                       │    ├─ html.rs    (scaffold, element lookup)      │
//!                       │    └─ dom.rs     (Document, mutation records)    │
//!                       │  events.rs (DomEvent, DataTransfer)              │
//!                       └──────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod dom;
pub mod drag;
pub mod events;
pub mod forms;
pub mod html;
pub mod overlay;
pub mod state;
pub mod view;

use board_common::BoardMessage;

use crate::errors::BoardError;

/// Result of one handler run: the change-feed entries it produced.
pub type Outcome = Result<Vec<BoardMessage>, BoardError>;

pub use app::{BoardApp, Bindings, Dispatch, Handler};
pub use state::OrderStore;
pub use view::{BoardView, DomView};
