//! Ordering policies for sibling edge labels.
//!
//! The order decides where a child is stored among its siblings and therefore
//! the order in which entries are visited. It must be a strict weak order and a
//! pure function of the two labels.

use std::cmp::Ordering;
use std::fmt;

/// Compares two edge labels.
pub trait EdgeOrder<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The natural `Ord` ordering of the key type. This is the default.
///
/// For strings and byte vectors the empty label sorts first, so a stored key
/// is visited before any of its extensions and iteration is lexicographic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> EdgeOrder<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Reverses another order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<O>(pub O);

impl<K: ?Sized, O: EdgeOrder<K>> EdgeOrder<K> for Reversed<O> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Orders labels with a comparison function.
///
/// ```
/// use radix_map::{OrderBy, RadixMap};
///
/// // Shorter labels first, ties broken lexicographically.
/// let order = OrderBy(|a: &String, b: &String| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
/// let mut map = RadixMap::with_order(order);
/// map.insert("b".to_string(), 1);
/// map.insert("aa".to_string(), 2);
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, ["b", "aa"]);
/// ```
#[derive(Clone, Copy, Default)]
pub struct OrderBy<F>(pub F);

impl<K: ?Sized, F: Fn(&K, &K) -> Ordering> EdgeOrder<K> for OrderBy<F> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for OrderBy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OrderBy(..)")
    }
}
