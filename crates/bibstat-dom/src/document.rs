//! Document - element tree plus event delivery
//!
//! Property accessors tolerate unknown ids: reads return the "absent"
//! value and writes return `false` without touching anything.

use crate::events::Listeners;
use crate::{
    DomEvent, DomTree, ElementData, EventType, Handler, HandlerId, NodeId, Selector, SelectorError,
};

/// A live page
#[derive(Debug, Default)]
pub struct Document {
    tree: DomTree,
    listeners: Listeners,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    // === Construction ===

    /// Create an element with attributes and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.tree.create_element(tag);
        if let Some(el) = self.tree.element_mut(id) {
            for (name, value) in attrs {
                el.set_attr(name, value);
            }
        }
        self.tree.append_child(parent, id);
        id
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.tree.create_text(text);
        self.tree.append_child(parent, id);
        id
    }

    /// Detach a node from the page. Its listeners stay registered but it
    /// no longer matches queries.
    pub fn remove(&mut self, id: NodeId) {
        self.tree.detach(id);
    }

    // === Queries ===

    /// Whether `id` is an element attached to this page
    pub fn contains(&self, id: NodeId) -> bool {
        self.tree.element(id).is_some() && self.tree.is_connected(id)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.tree.element(id)
    }

    /// Connected elements matching `selector`, in document order
    pub fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|&id| self.tree.element(id).is_some_and(|el| selector.matches(el)))
            .collect()
    }

    pub fn query(&self, selector: &Selector) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    /// Parse `selector` and query with it
    pub fn select(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        Ok(self.query_all(&Selector::parse(selector)?))
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.tree.element(n).is_some_and(|el| el.id() == Some(id)))
    }

    // === Element state ===

    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.tree.element(id).is_some_and(|el| el.disabled)
    }

    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) -> bool {
        self.with_element(id, |el| el.disabled = disabled)
    }

    pub fn is_checked(&self, id: NodeId) -> bool {
        self.tree.element(id).is_some_and(|el| el.checked)
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> bool {
        self.with_element(id, |el| el.checked = checked)
    }

    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.tree.element(id).map(|el| el.value.as_str())
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) -> bool {
        self.with_element(id, |el| el.value = value.to_string())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.tree.element(id).and_then(|el| el.get_attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        self.with_element(id, |el| el.set_attr(name, value))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.tree.element(id).is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        self.toggle_class(id, class, Some(true))
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        self.toggle_class(id, class, Some(false))
    }

    /// Toggle or force a class; returns false if `id` is not an element
    pub fn toggle_class(&mut self, id: NodeId, class: &str, force: Option<bool>) -> bool {
        self.with_element(id, |el| {
            el.toggle_class(class, force);
        })
    }

    pub fn text_content(&self, id: NodeId) -> String {
        self.tree.text_content(id)
    }

    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> bool {
        if self.tree.element(id).is_none() {
            return false;
        }
        self.tree.set_text_content(id, text);
        true
    }

    fn with_element(&mut self, id: NodeId, f: impl FnOnce(&mut ElementData)) -> bool {
        match self.tree.element_mut(id) {
            Some(el) => {
                f(el);
                true
            }
            None => {
                tracing::trace!("no element {:?}, skipping update", id);
                false
            }
        }
    }

    // === Events ===

    pub fn add_listener(
        &mut self,
        target: NodeId,
        event_type: EventType,
        handler: Handler,
    ) -> HandlerId {
        self.listeners.add(target, event_type, handler)
    }

    pub fn remove_listener(&mut self, target: NodeId, id: HandlerId) -> bool {
        self.listeners.remove(target, id)
    }

    pub fn listener_count(&self, target: NodeId) -> usize {
        self.listeners.count(target)
    }

    /// Run every handler registered on `target` for `event_type`.
    /// Returns the number of handlers invoked.
    ///
    /// A handler that is already running further up the stack is skipped.
    pub fn dispatch(&mut self, target: NodeId, event_type: EventType) -> usize {
        let event = DomEvent::new(event_type, target);
        let mut invoked = 0;
        for handler in self.listeners.snapshot(target, event_type) {
            match handler.try_borrow_mut() {
                Ok(mut f) => {
                    (&mut *f)(self, &event);
                    invoked += 1;
                }
                Err(_) => {
                    tracing::warn!(
                        "skipping re-entrant {} handler on {:?}",
                        event_type.as_str(),
                        target
                    );
                }
            }
        }
        invoked
    }

    // === User actions ===
    //
    // These mirror what a browser does for a real user: the element is
    // updated first, then the corresponding events fire. Disabled
    // controls ignore user input.

    /// Click a checkbox into the given state. Fires `change` only if the
    /// state actually changed.
    pub fn user_set_checked(&mut self, id: NodeId, checked: bool) -> bool {
        if !self.contains(id) || self.is_disabled(id) || self.is_checked(id) == checked {
            return false;
        }
        self.set_checked(id, checked);
        self.dispatch(id, EventType::Click);
        self.dispatch(id, EventType::Change);
        true
    }

    /// Type text one key at a time, firing `input` and `keyup` per key
    pub fn user_type(&mut self, id: NodeId, text: &str) -> bool {
        if !self.contains(id) || self.is_disabled(id) {
            return false;
        }
        for ch in text.chars() {
            self.with_element(id, |el| el.value.push(ch));
            self.dispatch(id, EventType::Input);
            self.dispatch(id, EventType::KeyUp);
        }
        true
    }

    /// Paste text at the end of the current value
    pub fn user_paste(&mut self, id: NodeId, text: &str) -> bool {
        if !self.contains(id) || self.is_disabled(id) {
            return false;
        }
        self.with_element(id, |el| el.value.push_str(text));
        self.dispatch(id, EventType::Paste);
        self.dispatch(id, EventType::Input);
        true
    }

    /// Commit an edited value (focus leaves the control)
    pub fn user_commit(&mut self, id: NodeId) -> bool {
        if !self.contains(id) || self.is_disabled(id) {
            return false;
        }
        self.dispatch(id, EventType::Change);
        true
    }
}
