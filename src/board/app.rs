//! Application context and event dispatch.
//!
//! `BoardApp` owns the store, the view and the binding table. Construction
//! order is fixed: store, then view, then bindings. `dispatch` bubbles an
//! event from its target and runs the first bound handler; propagation stops
//! there. Handler errors are logged and swallowed.

use board_common::BoardMessage;
use tracing::{debug, trace, warn};

use super::dom::{Document, NodeId};
use super::drag;
use super::events::{DomEvent, EventKind};
use super::forms;
use super::html::Html;
use super::overlay;
use super::state::OrderStore;
use super::view::{BoardView, DomView};
use crate::board_config::BoardToml;
use crate::errors::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    AddToggle,
    AddSubmit,
    EditOpen,
    EditCancel,
    EditSubmit,
    Delete,
    HelpToggle,
    DragStart,
    DragOver,
    DragEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub node: NodeId,
    pub kind: EventKind,
    pub handler: Handler,
}

#[derive(Debug, Clone, Default)]
pub struct Bindings {
    entries: Vec<Binding>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, node: NodeId, kind: EventKind, handler: Handler) -> &mut Self {
        self.entries.push(Binding {
            node,
            kind,
            handler,
        });
        self
    }

    /// The board's standard wiring.
    pub fn standard(html: &Html) -> Self {
        let mut bindings = Self::new();
        bindings
            .bind(html.add_open, EventKind::Click, Handler::AddToggle)
            .bind(html.add_cancel, EventKind::Click, Handler::AddToggle)
            .bind(html.add_form, EventKind::Submit, Handler::AddSubmit)
            .bind(html.edit_cancel, EventKind::Click, Handler::EditCancel)
            .bind(html.edit_delete, EventKind::Click, Handler::Delete)
            .bind(html.edit_form, EventKind::Submit, Handler::EditSubmit)
            .bind(html.help_open, EventKind::Click, Handler::HelpToggle)
            .bind(html.help_cancel, EventKind::Click, Handler::HelpToggle)
            .bind(html.board, EventKind::Click, Handler::EditOpen)
            .bind(html.board, EventKind::DragOver, Handler::DragOver);
        for (_, column) in html.columns() {
            bindings
                .bind(column, EventKind::DragStart, Handler::DragStart)
                .bind(column, EventKind::DragEnd, Handler::DragEnd);
        }
        bindings
    }

    pub fn find(&self, node: NodeId, kind: EventKind) -> Option<Handler> {
        self.entries
            .iter()
            .find(|b| b.node == node && b.kind == kind)
            .map(|b| b.handler)
    }
}

/// What happened to one dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub handler: Option<Handler>,
    pub default_prevented: bool,
    /// Change-feed entries the handler produced.
    pub messages: usize,
}

pub struct BoardApp<V: BoardView> {
    store: OrderStore,
    view: V,
    bindings: Bindings,
    feed: Vec<BoardMessage>,
}

impl<V: BoardView> BoardApp<V> {
    pub fn new(store: OrderStore, view: V, bindings: Bindings) -> Self {
        debug!(bindings = bindings.entries.len(), "board wired");
        Self {
            store,
            view,
            bindings,
            feed: Vec::new(),
        }
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn dispatch(&mut self, event: &mut DomEvent) -> Dispatch {
        let path = event
            .composed_path
            .clone()
            .unwrap_or_else(|| self.view.event_path(event.target));
        let Some(handler) = path
            .iter()
            .find_map(|node| self.bindings.find(*node, event.kind))
        else {
            trace!(kind = event.kind.as_str(), "no binding on event path");
            return Dispatch {
                handler: None,
                default_prevented: event.default_prevented(),
                messages: 0,
            };
        };

        let result = self.run(handler, event);
        let messages = match result {
            Ok(messages) => messages,
            Err(err) => {
                log_rejection(handler, &err);
                Vec::new()
            }
        };

        let count = messages.len();
        self.feed.extend(messages);
        Dispatch {
            handler: Some(handler),
            default_prevented: event.default_prevented(),
            messages: count,
        }
    }

    fn run(&mut self, handler: Handler, event: &mut DomEvent) -> super::Outcome {
        let store = &mut self.store;
        let view = &mut self.view;
        match handler {
            Handler::AddToggle => {
                overlay::on_add_toggle(view);
                Ok(Vec::new())
            }
            Handler::HelpToggle => {
                overlay::on_help_toggle(view);
                Ok(Vec::new())
            }
            Handler::EditCancel => {
                overlay::on_edit_cancel(view);
                Ok(Vec::new())
            }
            Handler::AddSubmit => forms::on_add_submit(store, view, event),
            Handler::EditOpen => forms::on_edit_open(store, view, event),
            Handler::EditSubmit => forms::on_edit_submit(store, view, event),
            Handler::Delete => forms::on_delete(store, view),
            Handler::DragStart => drag::on_drag_start(store, view, event),
            Handler::DragOver => drag::on_drag_over(store, view, event),
            Handler::DragEnd => drag::on_drag_end(store, view, event),
        }
    }

    /// Change-feed entries recorded since the last drain.
    pub fn messages(&self) -> &[BoardMessage] {
        &self.feed
    }

    pub fn drain_messages(&mut self) -> Vec<BoardMessage> {
        std::mem::take(&mut self.feed)
    }
}

fn log_rejection(handler: Handler, err: &BoardError) {
    if err.is_silent() {
        debug!(?handler, error = %err, "handler skipped");
    } else {
        warn!(?handler, error = %err, "handler rejected event");
    }
}

impl BoardApp<DomView> {
    /// Wire a board over an existing document.
    pub fn with_document(doc: Document, config: &BoardToml) -> Result<Self, BoardError> {
        let store = OrderStore::new();
        let view = DomView::new(doc, config)?;
        let bindings = Bindings::standard(view.html());
        Ok(Self::new(store, view, bindings))
    }

    /// Wire a board over the standard scaffold.
    pub fn from_config(config: &BoardToml) -> Result<Self, BoardError> {
        Self::with_document(super::html::scaffold(config), config)
    }

    pub fn html(&self) -> Html {
        *self.view.html()
    }

    pub fn document(&self) -> &Document {
        self.view.document()
    }
}
