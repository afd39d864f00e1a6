use std::collections::HashMap;

use board_common::{BoardSnapshot, Column, ColumnView, Order, OrderId};

use crate::errors::BoardError;

/// Transient drag indicator, only meaningful between dragstart and dragend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    pub id: Option<OrderId>,
    pub over: Option<Column>,
}

impl DragState {
    pub fn is_active(&self) -> bool {
        self.id.is_some() || self.over.is_some()
    }
}

/// In-memory order store: the single source of truth for the board.
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: HashMap<OrderId, Order>,
    pub dragging: DragState,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh order in the `ordered` column with an id that no live
    /// order uses. Does not insert it.
    pub fn new_order(&self, title: &str, table: &str) -> Order {
        let mut id = OrderId::generate();
        while self.orders.contains_key(&id) {
            id = OrderId::generate();
        }
        Order::new(id, title, table)
    }

    pub fn insert(&mut self, order: Order) -> Option<Order> {
        self.orders.insert(order.id.clone(), order)
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.get(id)
    }

    pub fn get_mut(&mut self, id: &OrderId) -> Option<&mut Order> {
        self.orders.get_mut(id)
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.orders.contains_key(id)
    }

    pub fn remove(&mut self, id: &OrderId) -> Option<Order> {
        self.orders.remove(id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// Orders in `column`, oldest first.
    pub fn orders_in(&self, column: Column) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self
            .orders
            .values()
            .filter(|o| o.column == column)
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        orders
    }

    /// Reassign an order's column. Returns the previous column, or `None`
    /// when the order already sits in `column`.
    pub fn move_order(&mut self, id: &OrderId, column: Column) -> Result<Option<Column>, BoardError> {
        let order = self
            .orders
            .get_mut(id)
            .ok_or_else(|| BoardError::OrderNotFound { id: id.to_string() })?;
        if order.column == column {
            return Ok(None);
        }
        let from = order.column;
        order.column = column;
        order.touch();
        Ok(Some(from))
    }

    pub fn reset_dragging(&mut self) -> DragState {
        std::mem::take(&mut self.dragging)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            columns: Column::ALL
                .iter()
                .map(|&name| ColumnView {
                    name,
                    orders: self.orders_in(name).into_iter().cloned().collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(titles: &[&str]) -> (OrderStore, Vec<OrderId>) {
        let mut store = OrderStore::new();
        let mut ids = Vec::new();
        for title in titles {
            let order = store.new_order(title, "1");
            ids.push(order.id.clone());
            store.insert(order);
        }
        (store, ids)
    }

    #[test]
    fn test_new_order_is_not_inserted() {
        let store = OrderStore::new();
        let order = store.new_order("T1", "5");
        assert_eq!(order.column, Column::Ordered);
        assert!(store.is_empty());
    }

    #[test]
    fn test_new_order_ids_are_unique() {
        let (store, ids) = store_with(&["a", "b", "c", "d"]);
        assert_eq!(store.len(), 4);
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
    }

    #[test]
    fn test_move_order() {
        let (mut store, ids) = store_with(&["a"]);
        let from = store.move_order(&ids[0], Column::Served).unwrap();
        assert_eq!(from, Some(Column::Ordered));
        assert_eq!(store.get(&ids[0]).unwrap().column, Column::Served);

        let again = store.move_order(&ids[0], Column::Served).unwrap();
        assert_eq!(again, None);
    }

    #[test]
    fn test_move_unknown_order() {
        let mut store = OrderStore::new();
        let err = store
            .move_order(&OrderId::from("ghost"), Column::Served)
            .unwrap_err();
        assert!(matches!(err, BoardError::OrderNotFound { .. }));
    }

    #[test]
    fn test_snapshot_groups_by_column() {
        let (mut store, ids) = store_with(&["a", "b", "c"]);
        store.move_order(&ids[1], Column::Preparing).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.columns.len(), 3);
        assert_eq!(snapshot.total(), 3);
        assert_eq!(snapshot.column(Column::Ordered).unwrap().orders.len(), 2);
        let preparing = &snapshot.column(Column::Preparing).unwrap().orders;
        assert_eq!(preparing.len(), 1);
        assert_eq!(preparing[0].title, "b");
        assert!(snapshot.column(Column::Served).unwrap().orders.is_empty());
    }

    #[test]
    fn test_reset_dragging() {
        let mut store = OrderStore::new();
        store.dragging.id = Some(OrderId::from("o1"));
        store.dragging.over = Some(Column::Served);
        assert!(store.dragging.is_active());

        let previous = store.reset_dragging();
        assert_eq!(previous.over, Some(Column::Served));
        assert_eq!(store.dragging, DragState::default());
        assert!(!store.dragging.is_active());
    }
}
