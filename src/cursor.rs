//! Positions inside a [`RadixMap`] and the iterators built on them.
//!
//! A cursor points either at a leaf or at the end of the map. Stepping forward
//! climbs to the nearest ancestor with a following sibling and descends that
//! sibling to its first leaf.

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

use crate::arena::Handle;
use crate::order::Natural;
use crate::tree::RadixMap;

/// A read-only position in a [`RadixMap`].
///
/// Returned by [`RadixMap::find`], [`RadixMap::begin`], [`RadixMap::end`],
/// [`RadixMap::insert`] and [`RadixMap::longest_match`].
pub struct Cursor<'a, K, V, O = Natural> {
    map: &'a RadixMap<K, V, O>,
    leaf: Option<Handle>,
}

impl<'a, K, V, O> Cursor<'a, K, V, O> {
    pub(crate) fn new(map: &'a RadixMap<K, V, O>, leaf: Option<Handle>) -> Self {
        Cursor { map, leaf }
    }

    /// Returns `true` if the cursor is past the last entry.
    pub fn is_end(&self) -> bool {
        self.leaf.is_none()
    }

    pub fn key(&self) -> Option<&'a K> {
        self.key_value().map(|(key, _)| key)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.key_value().map(|(_, value)| value)
    }

    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        let map = self.map;
        self.leaf.map(|leaf| map.entry(leaf))
    }

    /// Advances to the next entry. The end cursor stays at the end.
    pub fn move_next(&mut self) {
        if let Some(leaf) = self.leaf {
            self.leaf = self.map.next_leaf(leaf);
        }
    }

    /// Returns the entry after the current one without moving.
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        let mut next = *self;
        next.move_next();
        next.key_value()
    }
}

impl<K, V, O> Clone for Cursor<'_, K, V, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, O> Copy for Cursor<'_, K, V, O> {}

impl<K, V, O> PartialEq for Cursor<'_, K, V, O> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.map, other.map) && self.leaf == other.leaf
    }
}

impl<K, V, O> Eq for Cursor<'_, K, V, O> {}

impl<K: fmt::Debug, V: fmt::Debug, O> fmt::Debug for Cursor<'_, K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key_value()).finish()
    }
}

/// A position in a [`RadixMap`] that can modify the entry it points at.
///
/// # Examples
///
/// ```
/// use radix_map::RadixMap;
///
/// let mut map: RadixMap<String, i32> =
///     vec![("a", 1), ("b", -2), ("c", 3)].into_iter().map(|(k, v)| (k.to_string(), v)).collect();
///
/// let mut cursor = map.begin_mut();
/// while let Some(&value) = cursor.value() {
///     if value < 0 {
///         cursor.remove_current();
///     } else {
///         cursor.move_next();
///     }
/// }
/// assert_eq!(map.len(), 2);
/// ```
pub struct CursorMut<'a, K, V, O = Natural> {
    map: &'a mut RadixMap<K, V, O>,
    leaf: Option<Handle>,
}

impl<'a, K, V, O> CursorMut<'a, K, V, O> {
    pub(crate) fn new(map: &'a mut RadixMap<K, V, O>, leaf: Option<Handle>) -> Self {
        CursorMut { map, leaf }
    }

    pub fn is_end(&self) -> bool {
        self.leaf.is_none()
    }

    pub fn key(&self) -> Option<&K> {
        self.leaf.map(|leaf| self.map.entry(leaf).0)
    }

    pub fn value(&self) -> Option<&V> {
        self.leaf.map(|leaf| self.map.entry(leaf).1)
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        let leaf = self.leaf?;
        Some(self.map.entry_mut(leaf).1)
    }

    pub fn move_next(&mut self) {
        if let Some(leaf) = self.leaf {
            self.leaf = self.map.next_leaf(leaf);
        }
    }

    /// Returns a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, K, V, O> {
        Cursor::new(&*self.map, self.leaf)
    }
}

impl<'a, K, V, O> CursorMut<'a, K, V, O>
where
    K: crate::RadixKey,
    O: crate::EdgeOrder<K>,
{
    /// Removes the current entry and moves to the one after it.
    ///
    /// Returns `None` without changing anything if the cursor is at the end.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        let leaf = self.leaf?;
        self.leaf = self.map.next_leaf(leaf);
        Some(self.map.remove_leaf(leaf))
    }
}

/// An iterator over the entries of a [`RadixMap`] in edge order.
pub struct Iter<'a, K, V, O = Natural> {
    cursor: Cursor<'a, K, V, O>,
    remaining: usize,
}

impl<'a, K, V, O> Iter<'a, K, V, O> {
    pub(crate) fn new(cursor: Cursor<'a, K, V, O>, remaining: usize) -> Self {
        Iter { cursor, remaining }
    }
}

impl<K, V, O> Clone for Iter<'_, K, V, O> {
    fn clone(&self) -> Self {
        Iter {
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, O> Iterator for Iter<'a, K, V, O> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor.key_value()?;
        self.cursor.move_next();
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, O> ExactSizeIterator for Iter<'_, K, V, O> {}

impl<K, V, O> FusedIterator for Iter<'_, K, V, O> {}

/// An iterator over the keys of a [`RadixMap`].
pub struct Keys<'a, K, V, O = Natural> {
    inner: Iter<'a, K, V, O>,
}

impl<'a, K, V, O> Keys<'a, K, V, O> {
    pub(crate) fn new(inner: Iter<'a, K, V, O>) -> Self {
        Keys { inner }
    }
}

impl<'a, K, V, O> Iterator for Keys<'a, K, V, O> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, O> ExactSizeIterator for Keys<'_, K, V, O> {}

/// An iterator over the values of a [`RadixMap`].
pub struct Values<'a, K, V, O = Natural> {
    inner: Iter<'a, K, V, O>,
}

impl<'a, K, V, O> Values<'a, K, V, O> {
    pub(crate) fn new(inner: Iter<'a, K, V, O>) -> Self {
        Values { inner }
    }
}

impl<'a, K, V, O> Iterator for Values<'a, K, V, O> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, O> ExactSizeIterator for Values<'_, K, V, O> {}
