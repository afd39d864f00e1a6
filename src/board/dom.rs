//! Headless element tree.
//!
//! A small arena standing in for the browser document: elements carry an
//! `id` attribute, a dataset, a class list, a `hidden` flag, a form `value`
//! and text. Shadow roots hang off a host element and are only reachable
//! through the composed path.
//!
//! Structural changes can be recorded as [`Mutation`]s, mirroring a
//! `MutationObserver` watching `childList`. Recording is off until a caller
//! asks for it. Slots of removed elements are reused, so a `NodeId` is only
//! meaningful while its element is attached or held.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    Inserted { node: NodeId, parent: NodeId },
    Moved { node: NodeId, from: NodeId, to: NodeId },
    Removed { node: NodeId, parent: NodeId },
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    id: Option<String>,
    dataset: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    hidden: bool,
    value: String,
    text: String,
    parent: Option<NodeId>,
    /// Set on shadow roots only.
    host: Option<NodeId>,
    shadow: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    free: Vec<usize>,
    root: NodeId,
    ids: HashMap<String, NodeId>,
    recording: bool,
    mutations: Vec<Mutation>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Element::new("body"))],
            free: Vec::new(),
            root: NodeId(0),
            ids: HashMap::new(),
            recording: false,
            mutations: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    #[cfg(test)]
    pub(crate) fn slots(&self) -> usize {
        self.nodes.len()
    }

    /// Create a detached element, reusing a freed slot when one exists.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let el = Some(Element::new(tag));
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = el;
                NodeId(slot)
            }
            None => {
                self.nodes.push(el);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Attach a shadow root to `host`. The root has no parent; its composed
    /// path continues at the host.
    /// Returns `None` if `host` is gone or already has a shadow root.
    pub fn attach_shadow(&mut self, host: NodeId) -> Option<NodeId> {
        if self.element(host)?.shadow.is_some() {
            return None;
        }
        let shadow = self.create_element("#shadow-root");
        if let Some(el) = self.element_mut(shadow) {
            el.host = Some(host);
        }
        if let Some(el) = self.element_mut(host) {
            el.shadow = Some(shadow);
        }
        Some(shadow)
    }

    // ── Attributes ───────────────────────────────────────────────────

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        let Some(el) = self.element_mut(node) else {
            return;
        };
        let previous = el.id.replace(id.to_string());
        if let Some(previous) = previous
            && self.ids.get(&previous) == Some(&node)
        {
            self.ids.remove(&previous);
        }
        self.ids.insert(id.to_string(), node);
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied().filter(|n| self.contains(*n))
    }

    pub fn data(&self, node: NodeId, key: &str) -> Option<&str> {
        self.element(node)?.dataset.get(key).map(String::as_str)
    }

    pub fn set_data(&mut self, node: NodeId, key: &str, value: &str) {
        if let Some(el) = self.element_mut(node) {
            el.dataset.insert(key.to_string(), value.to_string());
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            el.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            el.classes.remove(class);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|el| el.classes.contains(class))
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|el| el.hidden)
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if let Some(el) = self.element_mut(node) {
            el.hidden = hidden;
        }
    }

    pub fn value(&self, node: NodeId) -> &str {
        self.element(node).map(|el| el.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(el) = self.element_mut(node) {
            el.value = value.to_string();
        }
    }

    pub fn text(&self, node: NodeId) -> &str {
        self.element(node).map(|el| el.text.as_str()).unwrap_or("")
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.element_mut(node) {
            el.text = text.to_string();
        }
    }

    // ── Tree ─────────────────────────────────────────────────────────

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.element(node)
            .map(|el| el.children.as_slice())
            .unwrap_or(&[])
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.composed_path(node).contains(&ancestor)
    }

    /// Append `child` as the last child of `parent`, detaching it from its
    /// current parent first. Returns `false` when either node is gone or the
    /// append would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            return false;
        }
        if self.is_ancestor_or_self(child, parent) {
            return false;
        }

        let previous = self.parent(child);
        if let Some(old) = previous
            && let Some(el) = self.element_mut(old)
        {
            el.children.retain(|c| *c != child);
        }
        if let Some(el) = self.element_mut(parent) {
            el.children.push(child);
        }
        if let Some(el) = self.element_mut(child) {
            el.parent = Some(parent);
        }

        self.record(match previous {
            Some(from) => Mutation::Moved {
                node: child,
                from,
                to: parent,
            },
            None => Mutation::Inserted {
                node: child,
                parent,
            },
        });
        true
    }

    /// Remove `node` and its subtree, shadow trees included, freeing their
    /// slots. Returns `false` if it was already gone.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.root || !self.contains(node) {
            return false;
        }
        let parent = self.parent(node);
        if let Some(p) = parent
            && let Some(el) = self.element_mut(p)
        {
            el.children.retain(|c| *c != node);
        }

        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(el) = self.nodes.get_mut(current.0).and_then(Option::take) {
                if let Some(id) = el.id
                    && self.ids.get(&id) == Some(&current)
                {
                    self.ids.remove(&id);
                }
                stack.extend(el.children);
                stack.extend(el.shadow);
                self.free.push(current.0);
            }
        }

        if let Some(parent) = parent {
            self.record(Mutation::Removed { node, parent });
        }
        true
    }

    /// Target-to-root path within the target's own tree; stops at a shadow
    /// root.
    pub fn path(&self, target: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            if !self.contains(node) {
                break;
            }
            path.push(node);
            current = self.parent(node);
        }
        path
    }

    /// Target-to-root path crossing shadow roots into their hosts, in bubble
    /// order.
    pub fn composed_path(&self, target: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            let Some(el) = self.element(node) else {
                break;
            };
            path.push(node);
            current = el.parent.or(el.host);
        }
        path
    }

    /// First node in `path` carrying the dataset key, with its value.
    pub fn nearest_data<'a>(&'a self, path: &[NodeId], key: &str) -> Option<(NodeId, &'a str)> {
        path.iter()
            .find_map(|node| self.data(*node, key).map(|value| (*node, value)))
    }

    // ── Mutation records ─────────────────────────────────────────────

    /// Turn recording on or off. Either way the log starts empty.
    pub fn record_mutations(&mut self, on: bool) {
        self.recording = on;
        self.mutations.clear();
    }

    fn record(&mut self, mutation: Mutation) {
        if self.recording {
            self.mutations.push(mutation);
        }
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn moves(&self) -> usize {
        self.mutations
            .iter()
            .filter(|m| matches!(m, Mutation::Moved { .. }))
            .count()
    }
}
