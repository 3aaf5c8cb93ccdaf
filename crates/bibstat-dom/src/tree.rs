//! DOM Tree (arena-based allocation)

use crate::{ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree
///
/// Slot 0 is always the document node. Removed nodes stay in the arena
/// detached; they are no longer connected and never match queries.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Append `child` as the last child of `parent`, detaching it from
    /// any previous position first.
    ///
    /// Ignored when `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        if self.is_inclusive_ancestor(child, parent) {
            tracing::trace!("{:?} is an ancestor of {:?}, not appending", child, parent);
            return;
        }
        self.detach(child);

        let prev_last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev_last;
            node.next_sibling = NodeId::NONE;
        }
        if prev_last.is_valid() {
            self.nodes[prev_last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Whether `ancestor` is `id` or lies on its parent chain
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = id;
        for _ in 0..=self.nodes.len() {
            if current == ancestor {
                return true;
            }
            match self.get(current) {
                Some(node) if node.parent.is_valid() => current = node.parent,
                _ => return false,
            }
        }
        false
    }

    /// Unlink a node (and its subtree) from its parent
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// All descendants in document order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            out.push(current);
            let before = stack.len();
            stack.extend(self.children(current).map(|(c, _)| c));
            stack[before..].reverse();
        }
        out
    }

    /// Whether the node is attached (transitively) to the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        // Parent chains are acyclic; the bound guards against corruption.
        for _ in 0..=self.nodes.len() {
            if current == NodeId::ROOT {
                return true;
            }
            match self.get(current) {
                Some(node) if node.parent.is_valid() => current = node.parent,
                _ => return false,
            }
        }
        false
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    /// Replace all children of `id` with a single text node
    ///
    /// A lone existing text child is rewritten in place, so repeated label
    /// updates do not grow the arena.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        let Some(node) = self.get(id) else {
            return;
        };
        let first = node.first_child;
        if !text.is_empty() && first.is_valid() && first == node.last_child {
            if let Some(NodeData::Text(content)) = self.get_mut(first).map(|n| &mut n.data) {
                content.clear();
                content.push_str(text);
                return;
            }
        }
        let children: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        for child in children {
            self.detach(child);
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node);
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}
