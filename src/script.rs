//! Scripted replay of user gestures against a fresh board.
//!
//! A script is a JSON document with a list of high-level steps. Each step is
//! expanded into the DOM events a browser would fire and dispatched through
//! `BoardApp`, so replay exercises exactly the same handlers as a host would.
//!
//! ```json
//! {
//!   "steps": [
//!     { "action": "add", "title": "Burger", "table": "4" },
//!     { "action": "drag", "order": "Burger", "to": "served" }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use board_common::{Column, OrderId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::board::dom::NodeId;
use crate::board::events::DomEvent;
use crate::board::overlay::Overlay;
use crate::board::{BoardApp, BoardView, DomView};
use crate::board_config::BoardToml;
use crate::errors::BoardError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Click the add button.
    ToggleAdd,
    /// Click the help button.
    ToggleHelp,
    CancelAdd,
    CancelHelp,
    CancelEdit,
    /// Open the add overlay if needed, fill the form and submit it.
    Add {
        title: String,
        #[serde(default)]
        table: String,
    },
    /// Drag the order titled `order` onto `to`, or off every column when
    /// `to` is absent.
    Drag {
        order: String,
        #[serde(default)]
        to: Option<Column>,
    },
    /// Click the card of the order titled `order`.
    OpenEdit { order: String },
    /// Overwrite the given edit fields and submit the edit form.
    Edit {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        table: Option<String>,
        #[serde(default)]
        column: Option<String>,
    },
    /// Click the delete button of the edit overlay.
    Delete,
    /// Click the element with this id.
    Click { element: String },
}

impl Step {
    pub fn action(&self) -> &'static str {
        match self {
            Step::ToggleAdd => "toggle_add",
            Step::ToggleHelp => "toggle_help",
            Step::CancelAdd => "cancel_add",
            Step::CancelHelp => "cancel_help",
            Step::CancelEdit => "cancel_edit",
            Step::Add { .. } => "add",
            Step::Drag { .. } => "drag",
            Step::OpenEdit { .. } => "open_edit",
            Step::Edit { .. } => "edit",
            Step::Delete => "delete",
            Step::Click { .. } => "click",
        }
    }
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid script {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse script JSON")
    }
}

/// Drives a `BoardApp` from script steps.
pub struct Replayer {
    app: BoardApp<DomView>,
}

impl Replayer {
    pub fn new(config: &BoardToml) -> Result<Self, BoardError> {
        Ok(Self {
            app: BoardApp::from_config(config)?,
        })
    }

    pub fn app(&self) -> &BoardApp<DomView> {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut BoardApp<DomView> {
        &mut self.app
    }

    /// Replay every step in order, stopping at the first step that cannot be
    /// expressed as events.
    pub fn run(&mut self, script: &Script) -> Result<(), BoardError> {
        for (index, step) in script.steps.iter().enumerate() {
            debug!(step = index + 1, action = step.action(), "replaying step");
            self.apply(step).map_err(|err| match err {
                BoardError::InvalidScript(msg) => {
                    BoardError::InvalidScript(format!("step {}: {}", index + 1, msg))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    pub fn apply(&mut self, step: &Step) -> Result<(), BoardError> {
        let html = self.app.html();
        match step {
            Step::ToggleAdd => self.click(html.add_open),
            Step::ToggleHelp => self.click(html.help_open),
            Step::CancelAdd => self.click(html.add_cancel),
            Step::CancelHelp => self.click(html.help_cancel),
            Step::CancelEdit => self.click(html.edit_cancel),
            Step::Add { title, table } => {
                if !self.app.view().is_overlay_open(Overlay::Add) {
                    self.click(html.add_open);
                }
                let doc = self.app.view_mut().document_mut();
                doc.set_value(html.add_title, title);
                doc.set_value(html.add_table, table);
                self.app.dispatch(&mut DomEvent::submit(html.add_form));
            }
            Step::Drag { order, to } => {
                let id = self.find_order(order)?;
                self.drag(&id, *to)?;
            }
            Step::OpenEdit { order } => {
                let id = self.find_order(order)?;
                let card = self.card(&id)?;
                let target = self
                    .app
                    .document()
                    .children(card)
                    .first()
                    .copied()
                    .unwrap_or(card);
                self.click(target);
            }
            Step::Edit {
                title,
                table,
                column,
            } => {
                let doc = self.app.view_mut().document_mut();
                if let Some(title) = title {
                    doc.set_value(html.edit_title, title);
                }
                if let Some(table) = table {
                    doc.set_value(html.edit_table, table);
                }
                if let Some(column) = column {
                    doc.set_value(html.edit_column, column);
                }
                self.app.dispatch(&mut DomEvent::submit(html.edit_form));
            }
            Step::Delete => self.click(html.edit_delete),
            Step::Click { element } => {
                let node = self
                    .app
                    .document()
                    .get_element_by_id(element)
                    .ok_or_else(|| {
                        BoardError::InvalidScript(format!("no element with id '{}'", element))
                    })?;
                self.click(node);
            }
        }
        Ok(())
    }

    fn click(&mut self, node: NodeId) {
        self.app.dispatch(&mut DomEvent::click(node));
    }

    /// One drag gesture: dragstart on the card, dragover on the target
    /// column's first child (or the board), dragend on the card. The payload
    /// is carried from event to event like a browser's `dataTransfer`.
    fn drag(&mut self, id: &OrderId, to: Option<Column>) -> Result<(), BoardError> {
        let card = self.card(id)?;
        let html = self.app.html();
        let over = match to {
            Some(column) => {
                let container = html.column(column);
                self.app
                    .document()
                    .children(container)
                    .first()
                    .copied()
                    .unwrap_or(container)
            }
            None => html.board,
        };

        let mut start = DomEvent::drag_start(card);
        self.app.dispatch(&mut start);
        let transfer = start.data_transfer;
        self.app
            .dispatch(&mut DomEvent::drag_over(over, transfer.clone()));
        self.app.dispatch(&mut DomEvent::drag_end(card, transfer));
        Ok(())
    }

    fn card(&self, id: &OrderId) -> Result<NodeId, BoardError> {
        self.app
            .view()
            .card(id)
            .ok_or_else(|| BoardError::InvalidScript(format!("no card for order {}", id)))
    }

    /// Oldest order with this exact title.
    fn find_order(&self, title: &str) -> Result<OrderId, BoardError> {
        Column::ALL
            .iter()
            .flat_map(|column| self.app.store().orders_in(*column))
            .filter(|order| order.title == title)
            .min_by(|a, b| a.created_at.cmp(&b.created_at))
            .map(|order| order.id.clone())
            .ok_or_else(|| BoardError::InvalidScript(format!("no order titled '{}'", title)))
    }
}
