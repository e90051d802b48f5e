//! Defines the sequence operations the tree needs from its key type.
//!
//! The tree never looks inside a key directly. Everything it does is expressed
//! with [`RadixKey::length`], [`RadixKey::substr`] and [`RadixKey::concat`]; the
//! remaining methods have default implementations built on those three and
//! exist so that implementors can provide faster versions.

/// A sliceable, concatenable, measurable sequence usable as a map key.
///
/// Positions and lengths are counted in *units* of the sequence: elements for
/// vectors and slices, `char`s for strings. `substr` clamps its arguments the
/// same way `std::string::substr` does: an offset past the end yields an empty
/// sequence and a length past the end is truncated.
pub trait RadixKey: Clone + Eq {
    /// Returns the number of units in the sequence.
    fn length(&self) -> usize;

    /// Returns `len` units starting at `offset`, clamped to the sequence.
    fn substr(&self, offset: usize, len: usize) -> Self;

    /// Returns `self` followed by `other`.
    fn concat(&self, other: &Self) -> Self;

    /// Returns the empty sequence of this key type.
    fn empty(&self) -> Self {
        self.substr(0, 0)
    }

    /// Returns whether the unit at `offset` equals the unit of `other` at
    /// `other_offset`. Out-of-range positions never compare equal.
    fn unit_eq(&self, offset: usize, other: &Self, other_offset: usize) -> bool {
        offset < self.length()
            && other_offset < other.length()
            && self.substr(offset, 1) == other.substr(other_offset, 1)
    }

    /// Counts how many leading units of `label` match `self` from `offset` on.
    fn common_prefix_len(&self, offset: usize, label: &Self) -> usize {
        let mut count = 0;
        while count < label.length() && self.unit_eq(offset + count, label, count) {
            count += 1;
        }
        count
    }
}

fn clamp(total: usize, offset: usize, len: usize) -> (usize, usize) {
    let start = offset.min(total);
    let end = start.saturating_add(len).min(total);
    (start, end)
}

/// Byte range of the chars `offset..offset + len` of `s`, clamped.
fn char_range(s: &str, offset: usize, len: usize) -> (usize, usize) {
    let mut boundaries = s
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()));
    let start = boundaries.nth(offset).unwrap_or(s.len());
    let end = if len == 0 {
        start
    } else {
        boundaries.nth(len - 1).unwrap_or(s.len())
    };
    (start, end)
}

fn common_chars(key: &str, offset: usize, label: &str) -> usize {
    key.chars()
        .skip(offset)
        .zip(label.chars())
        .take_while(|(a, b)| a == b)
        .count()
}

impl RadixKey for String {
    fn length(&self) -> usize {
        self.chars().count()
    }

    fn substr(&self, offset: usize, len: usize) -> Self {
        let (start, end) = char_range(self, offset, len);
        self[start..end].to_string()
    }

    fn concat(&self, other: &Self) -> Self {
        let mut joined = String::with_capacity(self.len() + other.len());
        joined.push_str(self);
        joined.push_str(other);
        joined
    }

    fn unit_eq(&self, offset: usize, other: &Self, other_offset: usize) -> bool {
        match (self.chars().nth(offset), other.chars().nth(other_offset)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    fn common_prefix_len(&self, offset: usize, label: &Self) -> usize {
        common_chars(self, offset, label)
    }
}

impl RadixKey for Box<str> {
    fn length(&self) -> usize {
        self.chars().count()
    }

    fn substr(&self, offset: usize, len: usize) -> Self {
        let (start, end) = char_range(self, offset, len);
        self[start..end].into()
    }

    fn concat(&self, other: &Self) -> Self {
        let mut joined = String::with_capacity(self.len() + other.len());
        joined.push_str(self);
        joined.push_str(other);
        joined.into_boxed_str()
    }

    fn common_prefix_len(&self, offset: usize, label: &Self) -> usize {
        common_chars(self, offset, label)
    }
}

fn common_units<T: Eq>(key: &[T], offset: usize, label: &[T]) -> usize {
    key.iter()
        .skip(offset)
        .zip(label)
        .take_while(|(a, b)| a == b)
        .count()
}

impl<T: Clone + Eq> RadixKey for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }

    fn substr(&self, offset: usize, len: usize) -> Self {
        let (start, end) = clamp(self.len(), offset, len);
        self[start..end].to_vec()
    }

    fn concat(&self, other: &Self) -> Self {
        let mut joined = Vec::with_capacity(self.len() + other.len());
        joined.extend_from_slice(self);
        joined.extend_from_slice(other);
        joined
    }

    fn unit_eq(&self, offset: usize, other: &Self, other_offset: usize) -> bool {
        match (self.get(offset), other.get(other_offset)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    fn common_prefix_len(&self, offset: usize, label: &Self) -> usize {
        common_units(self, offset, label)
    }
}

impl<T: Clone + Eq> RadixKey for Box<[T]> {
    fn length(&self) -> usize {
        self.len()
    }

    fn substr(&self, offset: usize, len: usize) -> Self {
        let (start, end) = clamp(self.len(), offset, len);
        self[start..end].into()
    }

    fn concat(&self, other: &Self) -> Self {
        self.iter().chain(other.iter()).cloned().collect()
    }

    fn common_prefix_len(&self, offset: usize, label: &Self) -> usize {
        common_units(self, offset, label)
    }
}
