//! Add, edit and delete handlers behind the overlay forms.

use board_common::{BoardMessage, Column, OrderId};
use tracing::{debug, warn};

use super::Outcome;
use super::events::DomEvent;
use super::overlay::Overlay;
use super::state::OrderStore;
use super::view::{BoardView, EditForm};
use crate::errors::BoardError;

/// Create an order from the add form. New orders always land in `ordered`.
pub fn on_add_submit<V: BoardView>(
    store: &mut OrderStore,
    view: &mut V,
    event: &mut DomEvent,
) -> Outcome {
    event.prevent_default();

    let form = view.read_add_form();
    let order = store.new_order(&form.title, &form.table);
    store.insert(order.clone());
    view.create_card(&order);
    view.clear_add_form();
    view.set_overlay_open(Overlay::Add, false);

    debug!(order_id = %order.id, title = %order.title, table = %order.table, "order created");
    Ok(vec![BoardMessage::OrderCreated { order }])
}

/// Open the edit overlay for the order under the click, pre-filled.
pub fn on_edit_open<V: BoardView>(store: &OrderStore, view: &mut V, event: &DomEvent) -> Outcome {
    let path = event
        .composed_path
        .clone()
        .unwrap_or_else(|| view.event_path(event.target));
    let id = view
        .nearest_order(&path)
        .ok_or_else(|| BoardError::MissingMarker {
            key: "order_id".to_string(),
        })?;
    let order = store
        .get(&id)
        .ok_or_else(|| BoardError::OrderNotFound { id: id.to_string() })?;

    view.fill_edit_form(order);
    view.set_overlay_open(Overlay::Edit, true);
    debug!(order_id = %id, "edit overlay opened");
    Ok(Vec::new())
}

fn edit_target(form: &EditForm) -> Result<OrderId, BoardError> {
    if form.id.is_empty() {
        return Err(BoardError::MissingMarker {
            key: "edit_id".to_string(),
        });
    }
    Ok(OrderId::from(form.id.as_str()))
}

/// Overwrite the order from the edit form. Title and table pass through as
/// typed; an unrecognised column rejects the whole edit.
pub fn on_edit_submit<V: BoardView>(
    store: &mut OrderStore,
    view: &mut V,
    event: &mut DomEvent,
) -> Outcome {
    event.prevent_default();

    let form = view.read_edit_form();
    let id = edit_target(&form)?;
    let column = form.column.parse::<Column>().map_err(|message| {
        warn!(order_id = %id, column = %form.column, "edit rejected: unknown column");
        BoardError::InvalidColumn {
            column: form.column.clone(),
            message,
        }
    })?;

    let order = store
        .get_mut(&id)
        .ok_or_else(|| BoardError::OrderNotFound { id: id.to_string() })?;
    let from_column = order.column;
    order.title = form.title;
    order.table = form.table;
    order.column = column;
    order.touch();
    let updated = order.clone();

    view.update_card(&updated);
    let mut messages = vec![BoardMessage::OrderUpdated {
        order: updated.clone(),
    }];
    if from_column != column {
        if !view.move_card(&id, column) {
            debug!(order_id = %id, column = %column, "card missing, view not moved");
        }
        messages.push(BoardMessage::OrderMoved {
            order_id: id.clone(),
            from_column,
            to_column: column,
        });
    }
    view.set_overlay_open(Overlay::Edit, false);

    debug!(order_id = %id, column = %column, "order updated");
    Ok(messages)
}

/// Delete the order named by the edit form's hidden id.
pub fn on_delete<V: BoardView>(store: &mut OrderStore, view: &mut V) -> Outcome {
    let id = edit_target(&view.read_edit_form())?;
    store
        .remove(&id)
        .ok_or_else(|| BoardError::OrderNotFound { id: id.to_string() })?;

    if !view.remove_card(&id) {
        debug!(order_id = %id, "card already absent");
    }
    view.clear_edit_form();
    view.set_overlay_open(Overlay::Edit, false);

    debug!(order_id = %id, "order deleted");
    Ok(vec![BoardMessage::OrderDeleted { order_id: id }])
}
