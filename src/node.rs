//! Internal node implementation for the radix tree.
//!
//! A `Node` is either a branch point or a leaf. Leaves always hang off their
//! owning branch through an empty edge label and carry the full key
//! together with its value. Parent links are plain handles and never own
//! anything.

use crate::arena::Handle;
use crate::order::EdgeOrder;

#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    /// Key segment consumed on the edge from the parent to this node.
    pub label: K,

    /// Offset at which `label` starts inside every key passing through here.
    pub depth: usize,

    /// The stored entry. Present exactly when this node is a leaf.
    pub entry: Option<(K, V)>,

    /// Children sorted by the map's edge order, keyed by their labels.
    pub children: Vec<(K, Handle)>,

    pub parent: Option<Handle>,
}

impl<K, V> Node<K, V> {
    /// Creates a branch node without children.
    pub fn branch(label: K, depth: usize, parent: Option<Handle>) -> Self {
        Node {
            label,
            depth,
            entry: None,
            children: Vec::new(),
            parent,
        }
    }

    /// Creates a leaf holding `key` and `value`.
    pub fn leaf(label: K, depth: usize, parent: Handle, key: K, value: V) -> Self {
        Node {
            label,
            depth,
            entry: Some((key, value)),
            children: Vec::new(),
            parent: Some(parent),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.entry.is_some()
    }

    pub fn first_child(&self) -> Option<Handle> {
        self.children.first().map(|&(_, child)| child)
    }

    /// Returns the child that follows `child` in edge order.
    pub fn child_after(&self, child: Handle) -> Option<Handle> {
        let position = self.children.iter().position(|&(_, h)| h == child)?;
        self.children.get(position + 1).map(|&(_, h)| h)
    }

    pub fn child<O: EdgeOrder<K>>(&self, label: &K, order: &O) -> Option<Handle> {
        self.search(label, order).ok().map(|i| self.children[i].1)
    }

    /// Adds a child under `label`, replacing any child already stored there.
    pub fn insert_child<O: EdgeOrder<K>>(&mut self, label: K, child: Handle, order: &O) {
        match self.search(&label, order) {
            Ok(i) => self.children[i] = (label, child),
            Err(i) => self.children.insert(i, (label, child)),
        }
    }

    pub fn remove_child<O: EdgeOrder<K>>(&mut self, label: &K, order: &O) -> Option<Handle> {
        let i = self.search(label, order).ok()?;
        Some(self.children.remove(i).1)
    }

    fn search<O: EdgeOrder<K>>(&self, label: &K, order: &O) -> Result<usize, usize> {
        self.children
            .binary_search_by(|(existing, _)| order.compare(existing, label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{Natural, Reversed};

    fn handles() -> (Handle, Handle, Handle) {
        (Handle::from_index(1), Handle::from_index(2), Handle::from_index(3))
    }

    #[test]
    fn test_branch_and_leaf() {
        let root: Node<String, u32> = Node::branch(String::new(), 0, None);
        assert!(!root.is_leaf());
        assert!(root.parent.is_none());
        assert!(root.children.is_empty());

        let parent = Handle::from_index(0);
        let leaf = Node::leaf(String::new(), 3, parent, "car".to_string(), 7);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.parent, Some(parent));
        assert_eq!(leaf.entry, Some(("car".to_string(), 7)));
    }

    #[test]
    fn test_children_follow_order() {
        let (a, b, c) = handles();
        let mut node: Node<String, ()> = Node::branch(String::new(), 0, None);
        node.insert_child("t".to_string(), a, &Natural);
        node.insert_child(String::new(), b, &Natural);
        node.insert_child("d".to_string(), c, &Natural);

        let labels: Vec<&str> = node.children.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["", "d", "t"]);
        assert_eq!(node.first_child(), Some(b));
        assert_eq!(node.child_after(b), Some(c));
        assert_eq!(node.child_after(c), Some(a));
        assert_eq!(node.child_after(a), None);
    }

    #[test]
    fn test_reversed_order() {
        let (a, b, _) = handles();
        let mut node: Node<String, ()> = Node::branch(String::new(), 0, None);
        let order = Reversed(Natural);
        node.insert_child(String::new(), a, &order);
        node.insert_child("x".to_string(), b, &order);
        assert_eq!(node.first_child(), Some(b));
        assert_eq!(node.child(&String::new(), &order), Some(a));
    }

    #[test]
    fn test_insert_replaces_and_remove() {
        let (a, b, _) = handles();
        let mut node: Node<String, ()> = Node::branch(String::new(), 0, None);
        node.insert_child("ab".to_string(), a, &Natural);
        node.insert_child("ab".to_string(), b, &Natural);
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.child(&"ab".to_string(), &Natural), Some(b));

        assert_eq!(node.remove_child(&"ab".to_string(), &Natural), Some(b));
        assert_eq!(node.remove_child(&"ab".to_string(), &Natural), None);
        assert!(node.children.is_empty());
    }
}
