//! Slot storage for tree nodes.
//!
//! Nodes refer to each other through [`Handle`]s rather than owning pointers, so
//! splitting and merging only rewrites indices. Freed slots are recycled.

use std::num::NonZeroU32;

/// Stable index of a node inside an [`Arena`].
///
/// The value is stored off by one so that `Option<Handle>` is the same size as
/// `Handle`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZeroU32);

impl Handle {
    pub(crate) const MAX: usize = (u32::MAX - 1) as usize;

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        match NonZeroU32::new((index + 1) as u32) {
            Some(raw) => Handle(raw),
            None => unreachable!("`index + 1` is never zero"),
        }
    }

    #[inline]
    pub(crate) fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live elements.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.to_index()] = Some(element);
            handle
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()]
            .as_ref()
            .expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()]
            .as_mut()
            .expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Removes the element, making its handle available for reuse.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()]
            .take()
            .expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;
    use std::mem::size_of;

    #[test]
    fn test_handle_niche() {
        assert_eq!(size_of::<Handle>(), size_of::<Option<Handle>>());
    }

    #[test]
    fn test_handle_round_trip() {
        for index in [0, 1, 17, Handle::MAX] {
            assert_eq!(Handle::from_index(index).to_index(), index);
        }
    }

    #[test]
    #[should_panic(expected = "`Handle::from_index()` - `index` > `Handle::MAX`!")]
    fn test_invalid_handle() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    #[test]
    fn test_take_recycles_slot() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        assert_eq!(arena.len(), 2);

        assert_eq!(arena.take(a), "a");
        assert_eq!(arena.len(), 1);

        let c = arena.alloc("c");
        assert_eq!(c, a);
        assert_eq!(*arena.get(b), "b");
        assert_eq!(*arena.get(c), "c");
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn test_get_after_take() {
        let mut arena = Arena::new();
        let a = arena.alloc(1u32);
        arena.take(a);
        arena.get(a);
    }

    quickcheck! {
        // Interleaved allocations and removals behave like a keyed model.
        fn prop_arena_matches_model(ops: Vec<(bool, u32)>) -> bool {
            let mut arena = Arena::new();
            let mut model: Vec<(Handle, u32)> = Vec::new();

            for (alloc, value) in ops {
                if alloc || model.is_empty() {
                    model.push((arena.alloc(value), value));
                } else {
                    let (handle, expected) = model.swap_remove(value as usize % model.len());
                    if arena.take(handle) != expected {
                        return false;
                    }
                }
            }

            arena.len() == model.len()
                && model.iter().all(|&(handle, value)| *arena.get(handle) == value)
        }
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new();
        arena.alloc(1u8);
        arena.alloc(2u8);
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.alloc(3u8).to_index(), 0);
        *arena.get_mut(Handle::from_index(0)) += 1;
        assert_eq!(*arena.get(Handle::from_index(0)), 4);
    }
}
