//! The view collaborator.
//!
//! `BoardView` is everything the handlers need from the host: marker lookups
//! along an event path, card placement, column highlight, overlay
//! visibility and form access. `DomView` implements it over the headless
//! [`Document`]; a browser host would implement it over the real DOM.

use std::collections::HashSet;

use board_common::{Column, Order, OrderId};

use super::dom::{Document, NodeId};
use super::html::{self, Html};
use super::overlay::Overlay;
use super::state::OrderStore;
use crate::board_config::{BoardToml, MarkersConfig, ViewConfig};
use crate::errors::BoardError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub title: String,
    pub table: String,
}

/// Raw edit form contents. `column` is unparsed; the handler decides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub id: String,
    pub title: String,
    pub table: String,
    pub column: String,
}

pub trait BoardView {
    /// Bubble-order path for events that carry no composed path.
    fn event_path(&self, target: NodeId) -> Vec<NodeId>;

    /// Order id marker on exactly this element.
    fn order_marker(&self, node: NodeId) -> Option<OrderId>;

    /// Nearest order id marker along `path`.
    fn nearest_order(&self, path: &[NodeId]) -> Option<OrderId>;

    /// Raw value of the nearest column marker along `path`.
    fn nearest_column_marker(&self, path: &[NodeId]) -> Option<String>;

    fn create_card(&mut self, order: &Order);

    /// Refresh a card's text from the order.
    fn update_card(&mut self, order: &Order);

    /// Move a card into `column`'s container. `false` if the card is missing
    /// or already there.
    fn move_card(&mut self, id: &OrderId, column: Column) -> bool;

    /// `false` if no card with this id exists.
    fn remove_card(&mut self, id: &OrderId) -> bool;

    /// Highlight `column` and clear every other column; `None` clears all.
    fn highlight_column(&mut self, column: Option<Column>);

    fn is_overlay_open(&self, overlay: Overlay) -> bool;

    fn set_overlay_open(&mut self, overlay: Overlay, open: bool);

    /// Flip visibility and return the new state.
    fn toggle_overlay(&mut self, overlay: Overlay) -> bool {
        let open = !self.is_overlay_open(overlay);
        self.set_overlay_open(overlay, open);
        open
    }

    fn read_add_form(&self) -> AddForm;

    fn clear_add_form(&mut self);

    fn fill_edit_form(&mut self, order: &Order);

    fn read_edit_form(&self) -> EditForm;

    fn clear_edit_form(&mut self);
}

/// `BoardView` over the headless document.
#[derive(Debug, Clone)]
pub struct DomView {
    doc: Document,
    html: Html,
    markers: MarkersConfig,
    view: ViewConfig,
}

impl DomView {
    pub fn new(doc: Document, config: &BoardToml) -> Result<Self, BoardError> {
        let html = Html::resolve(&doc, &config.elements)?;
        Ok(Self {
            doc,
            html,
            markers: config.markers.clone(),
            view: config.view.clone(),
        })
    }

    /// View over the standard scaffolded board.
    pub fn scaffolded(config: &BoardToml) -> Result<Self, BoardError> {
        Self::new(html::scaffold(config), config)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Card element for an order, by id lookup.
    pub fn card(&self, id: &OrderId) -> Option<NodeId> {
        self.doc
            .get_element_by_id(id.as_str())
            .filter(|node| self.doc.data(*node, &self.markers.order_id) == Some(id.as_str()))
    }

    fn cards_in(&self, container: NodeId) -> Vec<OrderId> {
        self.doc
            .children(container)
            .iter()
            .filter_map(|node| self.order_marker(*node))
            .collect()
    }

    /// Card ids per column container, in document order.
    pub fn placement(&self) -> Vec<(Column, Vec<OrderId>)> {
        self.html
            .columns()
            .iter()
            .map(|(column, node)| (*column, self.cards_in(*node)))
            .collect()
    }

    pub fn card_column(&self, id: &OrderId) -> Option<Column> {
        let parent = self.doc.parent(self.card(id)?)?;
        self.html
            .columns()
            .iter()
            .find(|(_, node)| *node == parent)
            .map(|(column, _)| *column)
    }

    /// Columns currently carrying the highlight class.
    pub fn highlighted(&self) -> Vec<Column> {
        self.html
            .columns()
            .iter()
            .filter(|(_, node)| self.doc.has_class(*node, &self.view.highlight_class))
            .map(|(column, _)| *column)
            .collect()
    }

    /// Whether every order is rendered exactly once, under its own column,
    /// and no container holds a card without an order.
    pub fn placement_matches(&self, store: &OrderStore) -> bool {
        let mut rendered = 0;
        for (column, ids) in self.placement() {
            for id in &ids {
                match store.get(id) {
                    Some(order) if order.column == column => rendered += 1,
                    _ => return false,
                }
            }
        }
        rendered == store.len()
    }

    /// Re-project the view from the store. Returns the number of fixes.
    pub fn reconcile(&mut self, store: &OrderStore) -> usize {
        let mut fixes = 0;

        let live: HashSet<&OrderId> = store.orders().map(|o| &o.id).collect();
        for (_, ids) in self.placement() {
            for id in ids {
                if !live.contains(&id) && self.remove_card(&id) {
                    fixes += 1;
                }
            }
        }

        for order in store.orders() {
            match self.card_column(&order.id) {
                None => {
                    self.create_card(order);
                    fixes += 1;
                }
                Some(column) if column != order.column => {
                    self.move_card(&order.id, order.column);
                    fixes += 1;
                }
                Some(_) => {}
            }
        }

        if fixes > 0 {
            tracing::debug!(fixes, "reconciled board view");
        }
        fixes
    }
}

impl BoardView for DomView {
    fn event_path(&self, target: NodeId) -> Vec<NodeId> {
        self.doc.composed_path(target)
    }

    fn order_marker(&self, node: NodeId) -> Option<OrderId> {
        self.doc
            .data(node, &self.markers.order_id)
            .filter(|v| !v.is_empty())
            .map(OrderId::from)
    }

    fn nearest_order(&self, path: &[NodeId]) -> Option<OrderId> {
        self.doc
            .nearest_data(path, &self.markers.order_id)
            .map(|(_, value)| value)
            .filter(|v| !v.is_empty())
            .map(OrderId::from)
    }

    fn nearest_column_marker(&self, path: &[NodeId]) -> Option<String> {
        self.doc
            .nearest_data(path, &self.markers.column)
            .map(|(_, value)| value.to_string())
    }

    fn create_card(&mut self, order: &Order) {
        if self.card(&order.id).is_some() {
            self.update_card(order);
            self.move_card(&order.id, order.column);
            return;
        }

        let card = self.doc.create_element("article");
        self.doc.set_id(card, order.id.as_str());
        self.doc
            .set_data(card, &self.markers.order_id, order.id.as_str());
        self.doc.add_class(card, &self.view.card_class);
        let title = self.doc.create_element("h3");
        let table = self.doc.create_element("p");
        self.doc.append_child(card, title);
        self.doc.append_child(card, table);

        self.doc.append_child(self.html.column(order.column), card);
        self.update_card(order);
    }

    fn update_card(&mut self, order: &Order) {
        let Some(card) = self.card(&order.id) else {
            return;
        };
        let children = self.doc.children(card).to_vec();
        if let Some(title) = children.first() {
            self.doc.set_text(*title, &order.title);
        }
        if let Some(table) = children.get(1) {
            self.doc.set_text(*table, &format!("Table {}", order.table));
        }
    }

    fn move_card(&mut self, id: &OrderId, column: Column) -> bool {
        let Some(card) = self.card(id) else {
            return false;
        };
        let container = self.html.column(column);
        if self.doc.parent(card) == Some(container) {
            return false;
        }
        self.doc.append_child(container, card)
    }

    fn remove_card(&mut self, id: &OrderId) -> bool {
        match self.card(id) {
            Some(card) => self.doc.remove(card),
            None => false,
        }
    }

    fn highlight_column(&mut self, column: Option<Column>) {
        for (candidate, node) in self.html.columns() {
            if Some(candidate) == column {
                self.doc.add_class(node, &self.view.highlight_class);
            } else {
                self.doc.remove_class(node, &self.view.highlight_class);
            }
        }
    }

    fn is_overlay_open(&self, overlay: Overlay) -> bool {
        !self.doc.is_hidden(self.html.overlay(overlay))
    }

    fn set_overlay_open(&mut self, overlay: Overlay, open: bool) {
        self.doc.set_hidden(self.html.overlay(overlay), !open);
    }

    fn read_add_form(&self) -> AddForm {
        AddForm {
            title: self.doc.value(self.html.add_title).to_string(),
            table: self.doc.value(self.html.add_table).to_string(),
        }
    }

    fn clear_add_form(&mut self) {
        self.doc.set_value(self.html.add_title, "");
        self.doc.set_value(self.html.add_table, "");
    }

    fn fill_edit_form(&mut self, order: &Order) {
        self.doc.set_value(self.html.edit_title, &order.title);
        self.doc.set_value(self.html.edit_table, &order.table);
        self.doc.set_value(self.html.edit_id, order.id.as_str());
        self.doc
            .set_value(self.html.edit_column, order.column.as_str());
    }

    fn read_edit_form(&self) -> EditForm {
        EditForm {
            id: self.doc.value(self.html.edit_id).to_string(),
            title: self.doc.value(self.html.edit_title).to_string(),
            table: self.doc.value(self.html.edit_table).to_string(),
            column: self.doc.value(self.html.edit_column).to_string(),
        }
    }

    fn clear_edit_form(&mut self) {
        for node in [
            self.html.edit_id,
            self.html.edit_title,
            self.html.edit_table,
            self.html.edit_column,
        ] {
            self.doc.set_value(node, "");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::dom::Mutation;

    fn view() -> DomView {
        DomView::scaffolded(&BoardToml::default()).unwrap()
    }

    fn order(id: &str, column: Column) -> Order {
        let mut order = Order::new(OrderId::from(id), "Burger", "5");
        order.column = column;
        order
    }

    #[test]
    fn test_create_card_renders_under_column() {
        let mut view = view();
        let o1 = order("o1", Column::Preparing);
        view.create_card(&o1);

        let card = view.card(&o1.id).unwrap();
        assert_eq!(view.card_column(&o1.id), Some(Column::Preparing));
        assert_eq!(view.document().data(card, "id"), Some("o1"));
        assert!(view.document().has_class(card, "card"));
        let children = view.document().children(card);
        assert_eq!(view.document().text(children[0]), "Burger");
        assert_eq!(view.document().text(children[1]), "Table 5");
    }

    #[test]
    fn test_create_card_twice_does_not_duplicate() {
        let mut view = view();
        let mut o1 = order("o1", Column::Ordered);
        view.create_card(&o1);
        o1.column = Column::Served;
        view.create_card(&o1);

        let placement = view.placement();
        let total: usize = placement.iter().map(|(_, ids)| ids.len()).sum();
        assert_eq!(total, 1);
        assert_eq!(view.card_column(&o1.id), Some(Column::Served));
    }

    #[test]
    fn test_move_card_records_one_move() {
        let mut view = view();
        let o1 = order("o1", Column::Ordered);
        view.create_card(&o1);
        view.document_mut().record_mutations(true);

        assert!(view.move_card(&o1.id, Column::Served));
        assert!(!view.move_card(&o1.id, Column::Served));
        assert!(!view.move_card(&OrderId::from("ghost"), Column::Served));

        let mutations = view.document().mutations();
        assert_eq!(mutations.len(), 1);
        assert!(matches!(mutations[0], Mutation::Moved { .. }));
    }

    #[test]
    fn test_remove_card() {
        let mut view = view();
        let o1 = order("o1", Column::Ordered);
        view.create_card(&o1);
        assert!(view.remove_card(&o1.id));
        assert!(!view.remove_card(&o1.id));
        assert_eq!(view.card(&o1.id), None);
    }

    #[test]
    fn test_card_lookup_ignores_unmarked_elements_with_same_id() {
        let mut view = view();
        let board = view.html().board;
        let doc = view.document_mut();
        let stray = doc.create_element("div");
        doc.set_id(stray, "o1");
        doc.append_child(board, stray);

        assert_eq!(view.card(&OrderId::from("o1")), None);
        assert!(!view.remove_card(&OrderId::from("o1")));
    }

    #[test]
    fn test_highlight_single_column() {
        let mut view = view();
        view.highlight_column(Some(Column::Preparing));
        assert_eq!(view.highlighted(), vec![Column::Preparing]);
        view.highlight_column(Some(Column::Served));
        assert_eq!(view.highlighted(), vec![Column::Served]);
        view.highlight_column(None);
        assert!(view.highlighted().is_empty());
    }

    #[test]
    fn test_toggle_overlay_twice_restores_visibility() {
        let mut view = view();
        for overlay in Overlay::ALL {
            let before = view.is_overlay_open(overlay);
            view.toggle_overlay(overlay);
            assert_ne!(view.is_overlay_open(overlay), before);
            view.toggle_overlay(overlay);
            assert_eq!(view.is_overlay_open(overlay), before);
        }
    }

    #[test]
    fn test_edit_form_round_trip() {
        let mut view = view();
        let o1 = order("o1", Column::Served);
        view.fill_edit_form(&o1);
        assert_eq!(
            view.read_edit_form(),
            EditForm {
                id: "o1".into(),
                title: "Burger".into(),
                table: "5".into(),
                column: "served".into(),
            }
        );
        view.clear_edit_form();
        assert_eq!(view.read_edit_form(), EditForm::default());
    }

    #[test]
    fn test_reconcile_repairs_divergence() {
        let mut store = OrderStore::new();
        let a = store.new_order("a", "1");
        let b = store.new_order("b", "2");
        store.insert(a.clone());
        store.insert(b.clone());

        let mut view = view();
        view.create_card(&a);
        view.create_card(&order("stray", Column::Served));
        store.move_order(&a.id, Column::Preparing).unwrap();
        assert!(!view.placement_matches(&store));

        // b missing, a misplaced, stray removed
        assert_eq!(view.reconcile(&store), 3);
        assert!(view.placement_matches(&store));
        assert_eq!(view.reconcile(&store), 0);
    }

    #[test]
    fn test_nearest_markers() {
        let mut view = view();
        let o1 = order("o1", Column::Preparing);
        view.create_card(&o1);
        let card = view.card(&o1.id).unwrap();
        let title = view.document().children(card)[0];
        let path = view.event_path(title);

        assert_eq!(view.nearest_order(&path), Some(o1.id.clone()));
        assert_eq!(view.nearest_column_marker(&path).as_deref(), Some("preparing"));
        assert_eq!(view.order_marker(title), None);
        assert_eq!(view.order_marker(card), Some(o1.id));
    }
}
