//! DOM Node
//!
//! Nodes link to each other through `NodeId`s into the owning arena rather
//! than through pointers.

use crate::{ClassList, NodeId};

/// DOM Node - links plus payload
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Element-specific data
///
/// `disabled`, `checked` and `value` are live properties. The matching
/// content attributes only seed them when set, the way a parsed page does.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    pub attrs: Vec<Attribute>,
    pub classes: ClassList,
    pub disabled: bool,
    pub checked: bool,
    pub value: String,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            classes: ClassList::new(),
            disabled: false,
            checked: false,
            value: String::new(),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, syncing the cached class list and seeding
    /// form control properties.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "class" => self.classes = ClassList::parse(value),
            "disabled" => self.disabled = true,
            "checked" => self.checked = true,
            "value" => self.value = value.to_string(),
            _ => {}
        }

        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
            attr.value = value.to_string();
        } else {
            self.attrs.push(Attribute {
                name,
                value: value.to_string(),
            });
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|a| a.name != name);
        match name {
            "class" => self.classes = ClassList::new(),
            "disabled" => self.disabled = false,
            "checked" => self.checked = false,
            _ => {}
        }
        self.attrs.len() != before
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_attr("name")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Toggle or force a class, keeping the `class` attribute in step.
    /// Returns the new membership.
    pub fn toggle_class(&mut self, class: &str, force: Option<bool>) -> bool {
        let present = self.classes.toggle(class, force);
        let value = self.classes.value();
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == "class") {
            attr.value = value;
        } else if !value.is_empty() {
            self.attrs.push(Attribute {
                name: "class".to_string(),
                value,
            });
        }
        present
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_seeds_properties() {
        let mut el = ElementData::new("INPUT");
        el.set_attr("type", "checkbox");
        el.set_attr("checked", "");
        el.set_attr("class", "select-one row");

        assert_eq!(el.tag, "input");
        assert!(el.checked);
        assert!(el.has_class("select-one"));
        assert_eq!(el.get_attr("type"), Some("checkbox"));
    }

    #[test]
    fn test_remove_attr_clears_property() {
        let mut el = ElementData::new("button");
        el.set_attr("disabled", "disabled");
        assert!(el.disabled);
        assert!(el.remove_attr("disabled"));
        assert!(!el.disabled);
        assert!(!el.remove_attr("disabled"));
    }

    #[test]
    fn test_set_attr_overwrites() {
        let mut el = ElementData::new("input");
        el.set_attr("name", "a");
        el.set_attr("name", "b");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.name(), Some("b"));
    }

    #[test]
    fn test_toggle_class_rewrites_attribute() {
        let mut el = ElementData::new("span");
        el.set_attr("class", "selected-single hidden");
        assert!(!el.toggle_class("hidden", None));
        assert_eq!(el.get_attr("class"), Some("selected-single"));
        assert!(el.toggle_class("hidden", Some(true)));
        assert_eq!(el.get_attr("class"), Some("selected-single hidden"));

        let mut bare = ElementData::new("button");
        bare.toggle_class("disabled", Some(true));
        assert_eq!(bare.get_attr("class"), Some("disabled"));
    }
}
