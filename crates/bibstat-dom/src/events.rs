//! DOM Events
//!
//! Per-element listener registration. Handlers receive the document
//! mutably so they can read and update live element state.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{Document, NodeId};

/// Event types delivered to form controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Change,
    Paste,
    KeyUp,
    Input,
    Click,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::Paste => "paste",
            Self::KeyUp => "keyup",
            Self::Input => "input",
            Self::Click => "click",
        }
    }
}

/// Event as seen by a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomEvent {
    pub event_type: EventType,
    pub target: NodeId,
}

impl DomEvent {
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self { event_type, target }
    }
}

/// Registered handler id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub u64);

/// Shared event handler. The same handler may be registered for several
/// event types or targets.
pub type Handler = Rc<RefCell<dyn FnMut(&mut Document, &DomEvent)>>;

/// Wrap a closure as a [`Handler`]
pub fn handler<F>(f: F) -> Handler
where
    F: FnMut(&mut Document, &DomEvent) + 'static,
{
    Rc::new(RefCell::new(f))
}

/// Listener table keyed by target and event type
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    by_target: HashMap<(NodeId, EventType), Vec<(HandlerId, Handler)>>,
}

impl Listeners {
    pub(crate) fn add(
        &mut self,
        target: NodeId,
        event_type: EventType,
        handler: Handler,
    ) -> HandlerId {
        self.next_id += 1;
        let id = HandlerId(self.next_id);
        self.by_target
            .entry((target, event_type))
            .or_default()
            .push((id, handler));
        id
    }

    /// Remove a handler from every event type of `target`
    pub(crate) fn remove(&mut self, target: NodeId, id: HandlerId) -> bool {
        let mut removed = false;
        self.by_target.retain(|(t, _), list| {
            if *t == target {
                let before = list.len();
                list.retain(|(h, _)| *h != id);
                removed |= list.len() != before;
            }
            !list.is_empty()
        });
        removed
    }

    /// Snapshot of the handlers for one dispatch, in registration order
    pub(crate) fn snapshot(&self, target: NodeId, event_type: EventType) -> Vec<Handler> {
        self.by_target
            .get(&(target, event_type))
            .map(|list| list.iter().map(|(_, h)| Rc::clone(h)).collect())
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, target: NodeId) -> usize {
        self.by_target
            .iter()
            .filter(|((t, _), _)| *t == target)
            .map(|(_, list)| list.len())
            .sum()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("next_id", &self.next_id)
            .field("targets", &self.by_target.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove_across_event_types() {
        let mut listeners = Listeners::default();
        let target = NodeId(3);
        let h = handler(|_, _| {});
        let id = listeners.add(target, EventType::Change, Rc::clone(&h));
        let other = listeners.add(target, EventType::KeyUp, h);
        assert_ne!(id, other);
        assert_eq!(listeners.count(target), 2);

        assert!(listeners.remove(target, id));
        assert_eq!(listeners.count(target), 1);
        assert!(!listeners.remove(target, id));
        assert!(listeners.snapshot(target, EventType::Change).is_empty());
    }

    #[test]
    fn test_event_names() {
        assert_eq!(EventType::KeyUp.as_str(), "keyup");
        assert_eq!(EventType::Paste.as_str(), "paste");
    }
}
