use std::collections::BTreeMap;

use super::dom::NodeId;

/// Payload format the drag controller uses for the order id.
pub const TEXT_PLAIN: &str = "text/plain";

/// Drag payload shared by every event of one drag gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    items: BTreeMap<String, String>,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, format: &str, data: &str) {
        self.items.insert(format.to_string(), data.to_string());
    }

    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.items.get(format).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    DragStart,
    DragOver,
    DragEnd,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::DragStart => "dragstart",
            Self::DragOver => "dragover",
            Self::DragEnd => "dragend",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: NodeId,
    /// Path reported by the host (`composedPath()`), when it provides one.
    pub composed_path: Option<Vec<NodeId>>,
    pub data_transfer: DataTransfer,
    default_prevented: bool,
}

impl DomEvent {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            composed_path: None,
            data_transfer: DataTransfer::default(),
            default_prevented: false,
        }
    }

    pub fn click(target: NodeId) -> Self {
        Self::new(EventKind::Click, target)
    }

    pub fn submit(form: NodeId) -> Self {
        Self::new(EventKind::Submit, form)
    }

    pub fn drag_start(target: NodeId) -> Self {
        Self::new(EventKind::DragStart, target)
    }

    pub fn drag_over(target: NodeId, transfer: DataTransfer) -> Self {
        Self::new(EventKind::DragOver, target).with_transfer(transfer)
    }

    pub fn drag_end(target: NodeId, transfer: DataTransfer) -> Self {
        Self::new(EventKind::DragEnd, target).with_transfer(transfer)
    }

    pub fn with_transfer(mut self, transfer: DataTransfer) -> Self {
        self.data_transfer = transfer;
        self
    }

    pub fn with_composed_path(mut self, path: Vec<NodeId>) -> Self {
        self.composed_path = Some(path);
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::dom::Document;

    #[test]
    fn test_data_transfer() {
        let mut dt = DataTransfer::new();
        assert_eq!(dt.get_data(TEXT_PLAIN), None);
        dt.set_data(TEXT_PLAIN, "o1");
        assert_eq!(dt.get_data(TEXT_PLAIN), Some("o1"));
        dt.set_data(TEXT_PLAIN, "o2");
        assert_eq!(dt.get_data(TEXT_PLAIN), Some("o2"));
    }

    #[test]
    fn test_prevent_default() {
        let doc = Document::new();
        let mut event = DomEvent::submit(doc.root());
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
        assert_eq!(event.kind.as_str(), "submit");
    }

    #[test]
    fn test_drag_events_carry_transfer() {
        let doc = Document::new();
        let mut dt = DataTransfer::new();
        dt.set_data(TEXT_PLAIN, "o9");
        let event = DomEvent::drag_end(doc.root(), dt);
        assert_eq!(event.kind, EventKind::DragEnd);
        assert_eq!(event.data_transfer.get_data(TEXT_PLAIN), Some("o9"));
        assert!(event.composed_path.is_none());
    }
}
