//! Drag-and-drop controller: turns a drag gesture into a column reassignment.
//!
//! dragstart puts the order id in the drag payload, dragover tracks the
//! hovered column, dragend applies the move. The hovered column lives in
//! `OrderStore::dragging` and is cleared at dragend whatever the outcome.

use board_common::{BoardMessage, Column, OrderId};
use tracing::{debug, trace};

use super::Outcome;
use super::events::{DomEvent, TEXT_PLAIN};
use super::state::{DragState, OrderStore};
use super::view::BoardView;
use crate::errors::BoardError;

fn event_path<V: BoardView>(view: &V, event: &DomEvent) -> Vec<super::dom::NodeId> {
    event
        .composed_path
        .clone()
        .unwrap_or_else(|| view.event_path(event.target))
}

pub fn on_drag_start<V: BoardView>(
    store: &mut OrderStore,
    view: &V,
    event: &mut DomEvent,
) -> Outcome {
    let id = view
        .order_marker(event.target)
        .ok_or_else(|| BoardError::MissingMarker {
            key: "order_id".to_string(),
        })?;

    event.data_transfer.set_data(TEXT_PLAIN, id.as_str());
    debug!(order_id = %id, "drag started");
    store.dragging = DragState {
        id: Some(id),
        over: None,
    };
    Ok(Vec::new())
}

/// Resolve the hovered column: the first element on the event path carrying
/// the column marker.
pub fn resolve_column<V: BoardView>(view: &V, event: &DomEvent) -> Result<Column, BoardError> {
    let path = event_path(view, event);
    let raw = view
        .nearest_column_marker(&path)
        .ok_or_else(|| BoardError::MissingMarker {
            key: "column".to_string(),
        })?;
    raw.parse::<Column>()
        .map_err(|message| BoardError::InvalidColumn {
            column: raw,
            message,
        })
}

pub fn on_drag_over<V: BoardView>(
    store: &mut OrderStore,
    view: &mut V,
    event: &mut DomEvent,
) -> Outcome {
    event.prevent_default();

    let column = resolve_column(view, event)?;
    if store.dragging.over != Some(column) {
        trace!(column = %column, "drag over column");
        store.dragging.over = Some(column);
        view.highlight_column(Some(column));
    }
    Ok(Vec::new())
}

pub fn on_drag_end<V: BoardView>(
    store: &mut OrderStore,
    view: &mut V,
    event: &mut DomEvent,
) -> Outcome {
    view.highlight_column(None);
    let drag = store.reset_dragging();

    let id = event
        .data_transfer
        .get_data(TEXT_PLAIN)
        .filter(|v| !v.is_empty())
        .map(OrderId::from)
        .ok_or_else(|| BoardError::MissingMarker {
            key: "order_id".to_string(),
        })?;

    let Some(to_column) = drag.over else {
        debug!(order_id = %id, "drag ended outside any column");
        return Ok(Vec::new());
    };

    let Some(from_column) = store.move_order(&id, to_column)? else {
        debug!(order_id = %id, column = %to_column, "drag ended on current column");
        return Ok(Vec::new());
    };

    if !view.move_card(&id, to_column) {
        debug!(order_id = %id, column = %to_column, "card missing, view not moved");
    }
    debug!(order_id = %id, from = %from_column, to = %to_column, "order moved");
    Ok(vec![BoardMessage::OrderMoved {
        order_id: id,
        from_column,
        to_column,
    }])
}
