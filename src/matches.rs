//! Subtree iteration for prefix queries.
//!
//! [`Matches`] visits every leaf below one node in pre-order, following the
//! map's edge order at each branch.

use std::fmt;
use std::iter::FusedIterator;

use crate::arena::Handle;
use crate::order::Natural;
use crate::tree::RadixMap;

/// The entries found by [`RadixMap::prefix_match`] or
/// [`RadixMap::greedy_match`].
///
/// # Examples
///
/// ```
/// use radix_map::RadixMap;
///
/// let mut map = RadixMap::new();
/// for key in ["hello", "help", "world"] {
///     map.insert(key.to_string(), key.len());
/// }
///
/// let found: Vec<_> = map.prefix_match(&"hel".to_string()).collect();
/// assert_eq!(found, [(&"hello".to_string(), &5), (&"help".to_string(), &4)]);
/// assert_eq!(map.prefix_match(&"x".to_string()).count(), 0);
/// ```
pub struct Matches<'a, K, V, O = Natural> {
    map: &'a RadixMap<K, V, O>,

    /// Nodes still to visit. The next one is on top.
    stack: Vec<Handle>,
}

impl<'a, K, V, O> Matches<'a, K, V, O> {
    pub(crate) fn new(map: &'a RadixMap<K, V, O>, node: Handle) -> Self {
        Matches {
            map,
            stack: vec![node],
        }
    }

    pub(crate) fn empty(map: &'a RadixMap<K, V, O>) -> Self {
        Matches {
            map,
            stack: Vec::new(),
        }
    }
}

impl<K, V, O> Clone for Matches<'_, K, V, O> {
    fn clone(&self) -> Self {
        Matches {
            map: self.map,
            stack: self.stack.clone(),
        }
    }
}

impl<'a, K, V, O> Iterator for Matches<'a, K, V, O> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        while let Some(handle) = self.stack.pop() {
            let node = map.nodes.get(handle);
            if let Some((key, value)) = &node.entry {
                return Some((key, value));
            }
            self.stack
                .extend(node.children.iter().rev().map(|&(_, child)| child));
        }
        None
    }
}

impl<K, V, O> FusedIterator for Matches<'_, K, V, O> {}

impl<K: fmt::Debug, V: fmt::Debug, O> fmt::Debug for Matches<'_, K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
