//! bibstat DOM - live element tree
//!
//! Arena-backed element tree that page widgets query and mutate. Element
//! state (disabled, checked, value, classes) lives here and nowhere else;
//! widgets recompute from it on every call.

mod classlist;
mod document;
mod events;
mod node;
mod selector;
mod tree;

pub use classlist::ClassList;
pub use document::Document;
pub use events::{DomEvent, EventType, Handler, HandlerId, handler};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use selector::{CompoundSelector, PseudoClass, Selector, SelectorError};
pub use tree::{Children, DomTree};

/// Node identifier (index into the tree arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The document node
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this id points at a node slot
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
