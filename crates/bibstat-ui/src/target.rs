//! Element targets
//!
//! Widgets are handed the elements they operate on, either as a known node
//! or as a selector evaluated against the live page on every call.

use bibstat_dom::{Document, NodeId, Selector};

use crate::{Result, UiError};

/// Reference to zero or more page elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Node(NodeId),
    Selector(Selector),
}

impl Target {
    pub fn parse(selector: &str) -> Result<Self> {
        Selector::parse(selector)
            .map(Self::Selector)
            .map_err(|source| UiError::Selector {
                selector: selector.to_string(),
                source,
            })
    }

    /// Elements currently attached to the page, in document order
    pub fn resolve(&self, doc: &Document) -> Vec<NodeId> {
        match self {
            Self::Node(id) if doc.contains(*id) => vec![*id],
            Self::Node(_) => Vec::new(),
            Self::Selector(selector) => doc.query_all(selector),
        }
    }

    /// The element, if exactly one is attached
    pub fn resolve_one(&self, doc: &Document) -> Option<NodeId> {
        match self.resolve(doc).as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }
}

impl From<NodeId> for Target {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<Selector> for Target {
    fn from(selector: Selector) -> Self {
        Self::Selector(selector)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node(id) => write!(f, "{:?}", id),
            Self::Selector(selector) => write!(f, "{}", selector),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_one_requires_exactly_one() {
        let mut doc = Document::new();
        let a = doc.append_element(doc.root(), "input", &[("class", "amount")]);
        let target = Target::parse(".amount").unwrap();
        assert_eq!(target.resolve_one(&doc), Some(a));

        doc.append_element(doc.root(), "input", &[("class", "amount")]);
        assert_eq!(target.resolve(&doc).len(), 2);
        assert_eq!(target.resolve_one(&doc), None);
    }

    #[test]
    fn test_detached_node_resolves_to_nothing() {
        let mut doc = Document::new();
        let a = doc.append_element(doc.root(), "input", &[]);
        let target = Target::from(a);
        assert_eq!(target.resolve(&doc), vec![a]);
        doc.remove(a);
        assert!(target.resolve(&doc).is_empty());
    }

    #[test]
    fn test_parse_error_names_selector() {
        let err = Target::parse("div p").unwrap_err();
        assert!(err.to_string().contains("div p"));
    }
}
