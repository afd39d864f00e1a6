//! Named element handle and board scaffolding.
//!
//! `Html` resolves every element the handlers touch by its `id` attribute
//! once, at wiring time. `scaffold` builds the standard board tree for
//! headless hosts (CLI replay, tests); a browser host ships its own markup.

use board_common::Column;

use super::dom::{Document, NodeId};
use super::overlay::Overlay;
use crate::board_config::{BoardToml, ElementsConfig};
use crate::errors::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Html {
    pub board: NodeId,
    pub column_ordered: NodeId,
    pub column_preparing: NodeId,
    pub column_served: NodeId,
    pub add_overlay: NodeId,
    pub add_form: NodeId,
    pub add_title: NodeId,
    pub add_table: NodeId,
    pub add_open: NodeId,
    pub add_cancel: NodeId,
    pub edit_overlay: NodeId,
    pub edit_form: NodeId,
    pub edit_title: NodeId,
    pub edit_table: NodeId,
    pub edit_id: NodeId,
    pub edit_column: NodeId,
    pub edit_cancel: NodeId,
    pub edit_delete: NodeId,
    pub help_overlay: NodeId,
    pub help_open: NodeId,
    pub help_cancel: NodeId,
}

impl Html {
    /// Look up every named element. Fails on the first missing id.
    pub fn resolve(doc: &Document, elements: &ElementsConfig) -> Result<Self, BoardError> {
        let find = |id: &str| {
            doc.get_element_by_id(id)
                .ok_or_else(|| BoardError::ElementNotFound { id: id.to_string() })
        };

        Ok(Self {
            board: find(&elements.board)?,
            column_ordered: find(&elements.column_ordered)?,
            column_preparing: find(&elements.column_preparing)?,
            column_served: find(&elements.column_served)?,
            add_overlay: find(&elements.add_overlay)?,
            add_form: find(&elements.add_form)?,
            add_title: find(&elements.add_title)?,
            add_table: find(&elements.add_table)?,
            add_open: find(&elements.add_open)?,
            add_cancel: find(&elements.add_cancel)?,
            edit_overlay: find(&elements.edit_overlay)?,
            edit_form: find(&elements.edit_form)?,
            edit_title: find(&elements.edit_title)?,
            edit_table: find(&elements.edit_table)?,
            edit_id: find(&elements.edit_id)?,
            edit_column: find(&elements.edit_column)?,
            edit_cancel: find(&elements.edit_cancel)?,
            edit_delete: find(&elements.edit_delete)?,
            help_overlay: find(&elements.help_overlay)?,
            help_open: find(&elements.help_open)?,
            help_cancel: find(&elements.help_cancel)?,
        })
    }

    pub fn column(&self, column: Column) -> NodeId {
        match column {
            Column::Ordered => self.column_ordered,
            Column::Preparing => self.column_preparing,
            Column::Served => self.column_served,
        }
    }

    pub fn columns(&self) -> [(Column, NodeId); 3] {
        Column::ALL.map(|c| (c, self.column(c)))
    }

    pub fn overlay(&self, overlay: Overlay) -> NodeId {
        match overlay {
            Overlay::Add => self.add_overlay,
            Overlay::Edit => self.edit_overlay,
            Overlay::Help => self.help_overlay,
        }
    }
}

fn child(doc: &mut Document, parent: NodeId, tag: &str, id: Option<&str>) -> NodeId {
    let node = doc.create_element(tag);
    if let Some(id) = id {
        doc.set_id(node, id);
    }
    doc.append_child(parent, node);
    node
}

/// Build the standard board markup: three column containers inside the
/// board, plus hidden add, edit and help overlays with their forms.
pub fn scaffold(config: &BoardToml) -> Document {
    let el = &config.elements;
    let mut doc = Document::new();
    let body = doc.root();

    let toolbar = child(&mut doc, body, "header", None);
    let add_open = child(&mut doc, toolbar, "button", Some(el.add_open.as_str()));
    doc.set_text(add_open, "New order");
    let help_open = child(&mut doc, toolbar, "button", Some(el.help_open.as_str()));
    doc.set_text(help_open, "Help");

    let board = child(&mut doc, body, "main", Some(el.board.as_str()));
    for column in Column::ALL {
        let container = child(&mut doc, board, "section", Some(el.column(column)));
        doc.set_data(container, &config.markers.column, column.as_str());
        let heading = child(&mut doc, container, "h2", None);
        doc.set_text(heading, column.title());
    }

    let add_overlay = child(&mut doc, body, "div", Some(el.add_overlay.as_str()));
    doc.set_hidden(add_overlay, true);
    let add_form = child(&mut doc, add_overlay, "form", Some(el.add_form.as_str()));
    child(&mut doc, add_form, "input", Some(el.add_title.as_str()));
    child(&mut doc, add_form, "input", Some(el.add_table.as_str()));
    let add_cancel = child(&mut doc, add_form, "button", Some(el.add_cancel.as_str()));
    doc.set_text(add_cancel, "Cancel");

    let edit_overlay = child(&mut doc, body, "div", Some(el.edit_overlay.as_str()));
    doc.set_hidden(edit_overlay, true);
    let edit_form = child(&mut doc, edit_overlay, "form", Some(el.edit_form.as_str()));
    child(&mut doc, edit_form, "input", Some(el.edit_title.as_str()));
    child(&mut doc, edit_form, "input", Some(el.edit_table.as_str()));
    let edit_id = child(&mut doc, edit_form, "input", Some(el.edit_id.as_str()));
    doc.set_hidden(edit_id, true);
    child(&mut doc, edit_form, "select", Some(el.edit_column.as_str()));
    let edit_cancel = child(&mut doc, edit_form, "button", Some(el.edit_cancel.as_str()));
    doc.set_text(edit_cancel, "Cancel");
    let edit_delete = child(&mut doc, edit_form, "button", Some(el.edit_delete.as_str()));
    doc.set_text(edit_delete, "Delete");

    let help_overlay = child(&mut doc, body, "div", Some(el.help_overlay.as_str()));
    doc.set_hidden(help_overlay, true);
    let help_text = child(&mut doc, help_overlay, "p", None);
    doc.set_text(
        help_text,
        "Drag a card between columns to update it. Click a card to edit or delete it.",
    );
    let help_cancel = child(&mut doc, help_overlay, "button", Some(el.help_cancel.as_str()));
    doc.set_text(help_cancel, "Close");

    doc
}
