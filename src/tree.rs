//! The main map implementation.
//!
//! This module contains [`RadixMap`], which owns every node of the tree and is
//! the only place where the tree's shape changes.

use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;

use crate::arena::{Arena, Handle};
use crate::cursor::{Cursor, CursorMut, Iter, Keys, Values};
use crate::key::RadixKey;
use crate::matches::Matches;
use crate::node::Node;
use crate::order::{EdgeOrder, Natural};
use crate::Error;

/// A mutable radix tree (PATRICIA trie) map.
///
/// Keys are sequences implementing [`RadixKey`]. Shared prefixes are stored
/// once, on edges that carry whole key segments. Siblings are kept in the order
/// given by `O`, which also determines iteration order; with the default
/// [`Natural`] order, entries are visited in lexicographic key order.
///
/// Inserting a key that is already present never replaces the stored value.
///
/// # Examples
///
/// ```
/// use radix_map::RadixMap;
///
/// let mut map = RadixMap::new();
/// map.insert("car".to_string(), 1);
/// map.insert("cart".to_string(), 2);
/// map.insert("dog".to_string(), 3);
///
/// let matches: Vec<_> = map.prefix_match(&"ca".to_string()).map(|(k, _)| k.as_str()).collect();
/// assert_eq!(matches, ["car", "cart"]);
///
/// let longest = map.longest_match(&"cartoon".to_string());
/// assert_eq!(longest.key().map(String::as_str), Some("cart"));
/// ```
#[derive(Clone)]
pub struct RadixMap<K, V, O = Natural> {
    pub(crate) nodes: Arena<Node<K, V>>,

    /// Created by the first insertion. Never merged away or turned into a leaf.
    pub(crate) root: Option<Handle>,

    /// The number of entries stored in the map.
    size: usize,

    order: O,
}

impl<K, V> RadixMap<K, V, Natural> {
    /// Creates an empty map using the natural order of the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_map::RadixMap;
    ///
    /// let map = RadixMap::<String, i32>::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_order(Natural)
    }
}

impl<K, V, O> RadixMap<K, V, O> {
    /// Creates an empty map whose siblings are ordered by `order`.
    pub fn with_order(order: O) -> Self {
        RadixMap {
            nodes: Arena::new(),
            root: None,
            size: 0,
            order,
        }
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every entry and the root.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.size = 0;
    }

    /// Returns the edge order used by this map.
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Returns a cursor at the first entry, or the end cursor if the map is
    /// empty.
    pub fn begin(&self) -> Cursor<'_, K, V, O> {
        Cursor::new(self, self.first_leaf())
    }

    /// Returns the end cursor, which points at no entry.
    pub fn end(&self) -> Cursor<'_, K, V, O> {
        Cursor::new(self, None)
    }

    /// Returns a mutable cursor at the first entry.
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V, O> {
        let first = self.first_leaf();
        CursorMut::new(self, first)
    }

    /// Iterates over the entries in edge order.
    pub fn iter(&self) -> Iter<'_, K, V, O> {
        Iter::new(self.begin(), self.size)
    }

    pub fn keys(&self) -> Keys<'_, K, V, O> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V, O> {
        Values::new(self.iter())
    }

    /// Returns the first entry in edge order.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.begin().key_value()
    }

    pub(crate) fn first_leaf(&self) -> Option<Handle> {
        if self.size == 0 {
            return None;
        }
        self.root.and_then(|root| self.descend_first(root))
    }

    /// Follows first children down from `node` to a leaf.
    pub(crate) fn descend_first(&self, mut node: Handle) -> Option<Handle> {
        loop {
            let current = self.nodes.get(node);
            if current.is_leaf() {
                return Some(node);
            }
            match current.first_child() {
                Some(child) => node = child,
                None => {
                    assert!(
                        Some(node) == self.root,
                        "non-root branch at depth {} has no children",
                        current.depth
                    );
                    return None;
                }
            }
        }
    }

    /// Returns the leaf that follows `leaf` in edge order.
    pub(crate) fn next_leaf(&self, leaf: Handle) -> Option<Handle> {
        let mut child = leaf;
        loop {
            let parent = self.nodes.get(child).parent?;
            if let Some(sibling) = self.nodes.get(parent).child_after(child) {
                return self.descend_first(sibling);
            }
            child = parent;
        }
    }

    pub(crate) fn entry(&self, leaf: Handle) -> (&K, &V) {
        match &self.nodes.get(leaf).entry {
            Some((key, value)) => (key, value),
            None => panic!("handle does not point at a leaf"),
        }
    }

    pub(crate) fn entry_mut(&mut self, leaf: Handle) -> (&K, &mut V) {
        match &mut self.nodes.get_mut(leaf).entry {
            Some((key, value)) => (&*key, value),
            None => panic!("handle does not point at a leaf"),
        }
    }
}

impl<K, V, O> RadixMap<K, V, O>
where
    K: RadixKey,
    O: EdgeOrder<K>,
{
    /// Walks down from `node`, which sits at `depth`, as far as `key` matches
    /// the stored structure.
    ///
    /// The result is the leaf holding `key`, the node whose edge label only
    /// partially matches `key`, or the deepest node whose children offer no
    /// continuation.
    fn find_node(&self, key: &K, mut node: Handle, mut depth: usize) -> Handle {
        'walk: loop {
            let current = self.nodes.get(node);
            if current.children.is_empty() {
                return node;
            }

            let remaining = key.length().saturating_sub(depth);
            for (label, child) in &current.children {
                let is_leaf = self.nodes.get(*child).is_leaf();
                if remaining == 0 {
                    if is_leaf {
                        return *child;
                    }
                    continue;
                }

                if !is_leaf && key.unit_eq(depth, label, 0) {
                    let label_len = label.length();
                    if key.substr(depth, label_len) != *label {
                        return *child;
                    }
                    node = *child;
                    depth += label_len;
                    continue 'walk;
                }
            }

            return node;
        }
    }

    fn find_leaf(&self, key: &K) -> Option<Handle> {
        let node = self.find_node(key, self.root?, 0);
        if self.nodes.get(node).is_leaf() {
            Some(node)
        } else {
            None
        }
    }

    /// Returns a cursor at the entry for `key`, or the end cursor.
    pub fn find(&self, key: &K) -> Cursor<'_, K, V, O> {
        Cursor::new(self, self.find_leaf(key))
    }

    /// Returns a mutable cursor at the entry for `key`, or the end cursor.
    pub fn cursor_mut_at(&mut self, key: &K) -> CursorMut<'_, K, V, O> {
        let leaf = self.find_leaf(key);
        CursorMut::new(self, leaf)
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_map::RadixMap;
    ///
    /// let mut map = RadixMap::new();
    /// map.insert(b"key".to_vec(), 42);
    ///
    /// assert_eq!(map.get(&b"key".to_vec()), Some(&42));
    /// assert_eq!(map.get(&b"ke".to_vec()), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find_leaf(key).map(|leaf| self.entry(leaf))
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let leaf = self.find_leaf(key)?;
        Some(self.entry_mut(leaf).1)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_leaf(key).is_some()
    }

    /// Inserts `key` with `value` unless `key` is already present.
    ///
    /// Returns a cursor at the entry for `key` and whether an insertion took
    /// place. An existing value is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_map::RadixMap;
    ///
    /// let mut map = RadixMap::new();
    /// let (_, inserted) = map.insert("alpha".to_string(), 1);
    /// assert!(inserted);
    ///
    /// let (cursor, inserted) = map.insert("alpha".to_string(), 2);
    /// assert!(!inserted);
    /// assert_eq!(cursor.value(), Some(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Cursor<'_, K, V, O>, bool) {
        let (leaf, inserted) = self.insert_entry(key, value);
        (Cursor::new(self, Some(leaf)), inserted)
    }

    /// Returns the value for `key`, inserting `V::default()` first if needed.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let leaf = match self.find_leaf(&key) {
            Some(leaf) => leaf,
            None => self.insert_entry(key, V::default()).0,
        };
        self.entry_mut(leaf).1
    }

    fn insert_entry(&mut self, key: K, value: V) -> (Handle, bool) {
        let root = match self.root {
            Some(root) => root,
            None => {
                let root = self.nodes.alloc(Node::branch(key.empty(), 0, None));
                self.root = Some(root);
                root
            }
        };

        let node = self.find_node(&key, root, 0);
        let found = self.nodes.get(node);
        if found.is_leaf() {
            return (node, false);
        }

        let extends_label =
            node == root || key.substr(found.depth, found.label.length()) == found.label;
        let leaf = if extends_label {
            self.append(node, key, value)
        } else {
            self.split(node, key, value)
        };
        self.size += 1;
        (leaf, true)
    }

    /// Hangs `key` below `parent`, whose full path is a prefix of `key`.
    fn append(&mut self, parent: Handle, key: K, value: V) -> Handle {
        let boundary = {
            let parent = self.nodes.get(parent);
            parent.depth + parent.label.length()
        };
        let residual = key
            .length()
            .checked_sub(boundary)
            .expect("appended key is shorter than its parent's path");

        #[cfg(feature = "tracing")]
        tracing::trace!(depth = boundary, residual, "append");

        if residual == 0 {
            return self.attach_leaf(parent, boundary, key, value);
        }
        let branch = self.attach_branch(parent, key.substr(boundary, residual), boundary);
        self.attach_leaf(branch, boundary + residual, key, value)
    }

    /// Splits the edge into `node` where `key` diverges from its label.
    fn split(&mut self, node: Handle, key: K, value: V) -> Handle {
        let (parent, depth, label) = {
            let node = self.nodes.get(node);
            let parent = node.parent.expect("cannot split the root");
            (parent, node.depth, node.label.clone())
        };
        let label_len = label.length();
        let remaining = key.length() - depth;
        let common = key.common_prefix_len(depth, &label);
        assert!(common > 0, "split at depth {} shares no prefix with its edge", depth);
        assert!(common < label_len, "split at depth {} matches the whole edge", depth);

        #[cfg(feature = "tracing")]
        tracing::debug!(depth, common, label_len, "split");

        self.nodes.get_mut(parent).remove_child(&label, &self.order);
        let fork = self.attach_branch(parent, label.substr(0, common), depth);

        let suffix = label.substr(common, label_len - common);
        {
            let node = self.nodes.get_mut(node);
            node.label = suffix.clone();
            node.depth = depth + common;
            node.parent = Some(fork);
        }
        self.nodes.get_mut(fork).insert_child(suffix, node, &self.order);

        let boundary = depth + common;
        if common == remaining {
            return self.attach_leaf(fork, boundary, key, value);
        }
        let branch = self.attach_branch(fork, key.substr(boundary, remaining - common), boundary);
        self.attach_leaf(branch, key.length(), key, value)
    }

    fn attach_branch(&mut self, parent: Handle, label: K, depth: usize) -> Handle {
        let branch = self
            .nodes
            .alloc(Node::branch(label.clone(), depth, Some(parent)));
        self.nodes
            .get_mut(parent)
            .insert_child(label, branch, &self.order);
        branch
    }

    fn attach_leaf(&mut self, parent: Handle, depth: usize, key: K, value: V) -> Handle {
        let label = key.empty();
        let leaf = self
            .nodes
            .alloc(Node::leaf(label.clone(), depth, parent, key, value));
        self.nodes.get_mut(parent).insert_child(label, leaf, &self.order);
        leaf
    }

    /// Removes the entry for `key`. Returns whether anything was removed.
    pub fn erase(&mut self, key: &K) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Removes the entry for `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry for `key` and returns the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let leaf = self.find_leaf(key)?;
        Some(self.remove_leaf(leaf))
    }

    /// Removes every entry whose key satisfies `pred`. Returns how many were
    /// removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_map::RadixMap;
    ///
    /// let mut map: RadixMap<String, u32> =
    ///     vec![("tmp1", 1), ("keep", 2), ("tmp2", 3)]
    ///         .into_iter()
    ///         .map(|(k, v)| (k.to_string(), v))
    ///         .collect();
    ///
    /// assert_eq!(map.remove_if(|key| key.starts_with("tmp")), 2);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&K) -> bool,
    {
        let mut removed = 0;
        let mut current = self.first_leaf();
        while let Some(leaf) = current {
            current = self.next_leaf(leaf);
            if pred(self.entry(leaf).0) {
                self.remove_leaf(leaf);
                removed += 1;
            }
        }
        removed
    }

    /// Detaches `leaf` and restores the compression invariant above it.
    ///
    /// Only leaves are handed out to callers, and only branches are freed or
    /// relabeled here, so handles to other leaves stay valid.
    pub(crate) fn remove_leaf(&mut self, leaf: Handle) -> (K, V) {
        let node = self.nodes.take(leaf);
        let parent = node.parent.expect("leaf without a parent");
        self.nodes
            .get_mut(parent)
            .remove_child(&node.label, &self.order);
        self.size -= 1;
        self.compress(parent);
        node.entry.expect("removed node is not a leaf")
    }

    /// Single compression pass after a leaf below `parent` was removed.
    fn compress(&mut self, parent: Handle) {
        if Some(parent) == self.root {
            return;
        }

        let candidate = match self.nodes.get(parent).children.len() {
            0 => {
                let branch = self.nodes.take(parent);
                let grandparent = branch.parent.expect("branch without a parent");

                #[cfg(feature = "tracing")]
                tracing::trace!(depth = branch.depth, "remove empty branch");

                self.nodes
                    .get_mut(grandparent)
                    .remove_child(&branch.label, &self.order);
                grandparent
            }
            1 => parent,
            _ => return,
        };
        if Some(candidate) == self.root {
            return;
        }

        let only_child = {
            let candidate = self.nodes.get(candidate);
            match candidate.children.as_slice() {
                [(_, child)] => *child,
                _ => return,
            }
        };
        if self.nodes.get(only_child).is_leaf() {
            return;
        }
        self.merge(candidate, only_child);
    }

    /// Folds `branch` into its only child by concatenating their labels.
    fn merge(&mut self, branch: Handle, child: Handle) {
        let branch = self.nodes.take(branch);
        let grandparent = branch.parent.expect("merged branch without a parent");

        #[cfg(feature = "tracing")]
        tracing::debug!(depth = branch.depth, "merge");

        self.nodes
            .get_mut(grandparent)
            .remove_child(&branch.label, &self.order);

        let label = {
            let child = self.nodes.get_mut(child);
            child.label = branch.label.concat(&child.label);
            child.depth = branch.depth;
            child.parent = Some(grandparent);
            child.label.clone()
        };
        self.nodes
            .get_mut(grandparent)
            .insert_child(label, child, &self.order);
    }

    /// Returns every entry that has `key` as a literal prefix.
    pub fn prefix_match(&self, key: &K) -> Matches<'_, K, V, O> {
        match self.match_root(key) {
            Some(node) => {
                let node_ref = self.nodes.get(node);
                let len = key.length().saturating_sub(node_ref.depth);
                if key.substr(node_ref.depth, len) == node_ref.label.substr(0, len) {
                    Matches::new(self, node)
                } else {
                    Matches::empty(self)
                }
            }
            None => Matches::empty(self),
        }
    }

    /// Returns every entry below the node the walk for `key` lands on.
    ///
    /// Unlike [`prefix_match`](Self::prefix_match), the final edge is not
    /// verified against `key`, so this answers "which entries share my path
    /// through the tree" and may include keys that `key` is not a prefix of.
    pub fn greedy_match(&self, key: &K) -> Matches<'_, K, V, O> {
        match self.match_root(key) {
            Some(node) => Matches::new(self, node),
            None => Matches::empty(self),
        }
    }

    fn match_root(&self, key: &K) -> Option<Handle> {
        let node = self.find_node(key, self.root?, 0);
        let found = self.nodes.get(node);
        if found.is_leaf() {
            found.parent
        } else {
            Some(node)
        }
    }

    /// Returns a cursor at the longest stored key that is a prefix of `key`,
    /// or the end cursor if there is none.
    pub fn longest_match(&self, key: &K) -> Cursor<'_, K, V, O> {
        Cursor::new(self, self.longest_leaf(key))
    }

    fn longest_leaf(&self, key: &K) -> Option<Handle> {
        let node = self.find_node(key, self.root?, 0);
        let found = self.nodes.get(node);
        if found.is_leaf() {
            return Some(node);
        }

        let mut current = if key.substr(found.depth, found.label.length()) == found.label {
            Some(node)
        } else {
            found.parent
        };

        let empty = key.empty();
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if let Some(child) = node.child(&empty, &self.order) {
                if self.nodes.get(child).is_leaf() {
                    return Some(child);
                }
            }
            current = node.parent;
        }
        None
    }

    /// Verifies the structural invariants of the whole tree.
    ///
    /// This walks every node and is meant for tests and debugging. It reports
    /// the first violation found.
    pub fn check_structure(&self) -> Result<(), Error> {
        let root = match self.root {
            Some(root) => root,
            None if self.size == 0 => return Ok(()),
            None => {
                return Err(Error::SizeMismatch {
                    expected: self.size,
                    found: 0,
                })
            }
        };

        let root_node = self.nodes.get(root);
        if root_node.is_leaf()
            || root_node.parent.is_some()
            || root_node.depth != 0
            || root_node.label.length() != 0
        {
            return Err(Error::MalformedRoot);
        }

        let mut leaves = 0;
        let mut reachable = 0;
        let mut stack = vec![(root, root_node.label.clone())];
        while let Some((handle, path)) = stack.pop() {
            reachable += 1;
            let node = self.nodes.get(handle);
            let depth = node.depth;

            if node.is_leaf() {
                leaves += 1;
                let stored = node.entry.as_ref().map(|(key, _)| key);
                if node.label.length() != 0
                    || !node.children.is_empty()
                    || stored != Some(&path)
                    || path.length() != depth
                {
                    return Err(Error::MisplacedLeaf { depth });
                }
                continue;
            }

            if handle != root {
                if node.label.length() == 0 {
                    return Err(Error::EmptyLabel { depth });
                }
                match node.children.as_slice() {
                    [] => return Err(Error::EmptyBranch { depth }),
                    [(_, only)] if !self.nodes.get(*only).is_leaf() => {
                        return Err(Error::UncompressedChain { depth })
                    }
                    _ => {}
                }
            }

            let child_depth = depth + node.label.length();
            for (i, (label, child)) in node.children.iter().enumerate() {
                let child_node = self.nodes.get(*child);
                if child_node.label != *label {
                    return Err(Error::LabelMismatch { depth: child_depth });
                }
                if child_node.parent != Some(handle) || child_node.depth != child_depth {
                    return Err(Error::BrokenLink { depth: child_depth });
                }
                if let Some((next, _)) = node.children.get(i + 1) {
                    if self.order.compare(label, next) != std::cmp::Ordering::Less {
                        return Err(Error::Unordered { depth: child_depth });
                    }
                }
                let overlaps = node.children[..i].iter().any(|(earlier, _)| {
                    earlier.length() > 0 && label.length() > 0 && label.unit_eq(0, earlier, 0)
                });
                if overlaps {
                    return Err(Error::OverlappingSiblings { depth: child_depth });
                }
                stack.push((*child, path.concat(&child_node.label)));
            }
        }

        if leaves != self.size {
            return Err(Error::SizeMismatch {
                expected: self.size,
                found: leaves,
            });
        }
        if reachable != self.nodes.len() {
            return Err(Error::UnreachableNodes {
                allocated: self.nodes.len(),
                reachable,
            });
        }
        Ok(())
    }
}

impl<K, V> Default for RadixMap<K, V, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, O> fmt::Debug for RadixMap<K, V, O>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, O> PartialEq for RadixMap<K, V, O>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, O> Eq for RadixMap<K, V, O> {}

impl<K, V, O> Index<&K> for RadixMap<K, V, O>
where
    K: RadixKey,
    O: EdgeOrder<K>,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, O> Extend<(K, V)> for RadixMap<K, V, O>
where
    K: RadixKey,
    O: EdgeOrder<K>,
{
    /// Inserts every pair. Keys already present keep their value.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert_entry(key, value);
        }
    }
}

impl<K, V, O> FromIterator<(K, V)> for RadixMap<K, V, O>
where
    K: RadixKey,
    O: EdgeOrder<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = RadixMap::with_order(O::default());
        map.extend(iter);
        map
    }
}

impl<'a, K, V, O> IntoIterator for &'a RadixMap<K, V, O> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
