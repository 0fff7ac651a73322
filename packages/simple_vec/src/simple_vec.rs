use std::any::type_name;
use std::cmp::{self, Ordering};
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::sync::atomic::{self, AtomicU64};
use std::{fmt, mem, slice};

use crate::{Error, OwnedBuffer, Position, ReserveProxy, Result};

/// An owned, contiguous, growable array of `T`.
///
/// The array keeps `len()` live values at the front of an [`OwnedBuffer`] with `capacity()`
/// slots. When a mutation needs more room than the buffer has, a new buffer is built, the live
/// values are moved into it and the new buffer is swapped in. Growth doubles the capacity (or
/// goes straight to the required size if that is larger), so a sequence of pushes costs
/// amortized O(1) per push.
///
/// Slots beyond `len()` hold leftover values. Growth, [`pop()`][Self::pop] and
/// [`erase()`][Self::erase] leave `T::default()` there; [`clear()`][Self::clear] and a
/// shrinking [`resize()`][Self::resize] leave the old values in place until they are
/// overwritten or the array is dropped.
///
/// # Element requirements
///
/// Operations that may grow the storage or reset a slot require `T: Default`, because every
/// slot of the buffer always holds a value. Deep copies require `T: Clone`.
///
/// # Positions
///
/// [`insert()`][Self::insert] and [`erase()`][Self::erase] take a [`Position`], obtained from
/// [`begin()`][Self::begin], [`end()`][Self::end] or [`position()`][Self::position]. A position
/// is invalidated by any operation that changes the capacity. See [`Position`] for details.
///
/// # Examples
///
/// ```
/// use simple_vec::{SimpleVec, simple_vec};
///
/// let mut numbers = simple_vec![1, 2, 3];
///
/// numbers.push(4);
/// numbers.insert(numbers.begin(), 0);
/// numbers.erase(numbers.position(2));
///
/// assert_eq!(numbers, [0, 1, 3, 4]);
/// assert_eq!(numbers.at(10).ok(), None);
/// ```
pub struct SimpleVec<T> {
    buffer: OwnedBuffer<T>,
    len: usize,

    /// Identifies the current buffer. Changes every time the buffer is reallocated, which is
    /// what invalidates previously issued positions.
    generation: u64,
}

/// Generation 0 is reserved for arrays that have never allocated a buffer.
fn next_generation() -> u64 {
    static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

    NEXT_GENERATION.fetch_add(1, atomic::Ordering::Relaxed)
}

impl<T> SimpleVec<T> {
    /// Creates an empty array. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: OwnedBuffer::empty(),
            len: 0,
            generation: 0,
        }
    }

    fn from_buffer(buffer: OwnedBuffer<T>, len: usize) -> Self {
        debug_assert!(len <= buffer.capacity());

        Self {
            buffer,
            len,
            generation: next_generation(),
        }
    }

    pub(crate) fn into_parts(self) -> (OwnedBuffer<T>, usize) {
        let Self { buffer, len, .. } = self;
        (buffer, len)
    }

    /// The number of live elements.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of slots allocated, live or not.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The live elements as a slice.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.buffer
            .as_slice()
            .get(..self.len)
            .expect("len never exceeds capacity")
    }

    /// The live elements as a mutable slice.
    #[must_use]
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buffer
            .as_mut_slice()
            .get_mut(..self.len)
            .expect("len never exceeds capacity")
    }

    /// Iterates over the live elements, front to back.
    ///
    /// The iterator borrows the array, so no capacity-changing operation can happen while it
    /// is alive.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates mutably over the live elements, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index >= self.len()`.
    pub fn at(&self, index: usize) -> Result<&T> {
        self.as_slice().get(index).ok_or(Error::OutOfRange {
            index,
            len: self.len,
        })
    }

    /// Returns the element at `index` for modification.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index >= self.len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;

        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Sets the length to zero. Capacity is unchanged and no values are dropped until their
    /// slots are reused or the array is dropped.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Exchanges the contents of two arrays in O(1) without allocating.
    ///
    /// Positions issued by either array are not valid for the other afterwards.
    pub fn swap(&mut self, other: &mut Self) {
        self.buffer.swap(&mut other.buffer);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.generation, &mut other.generation);
    }

    /// The position of the first element, or [`end()`][Self::end] if the array is empty.
    #[must_use]
    pub fn begin(&self) -> Position {
        Position::new(0, self.generation)
    }

    /// The position one past the last element.
    #[must_use]
    pub fn end(&self) -> Position {
        Position::new(self.len, self.generation)
    }

    /// The position of the element at `index`. `index == len()` gives [`end()`][Self::end].
    ///
    /// # Panics
    ///
    /// Panics if `index > self.len()`.
    #[must_use]
    pub fn position(&self, index: usize) -> Position {
        assert!(
            index <= self.len,
            "position {index} is beyond the end of a SimpleVec of {} with length {}",
            type_name::<T>(),
            self.len
        );

        Position::new(index, self.generation)
    }

    fn check_position(&self, position: Position, operation: &str) {
        debug_assert!(
            position.generation() == self.generation,
            "{operation}() received a position that was invalidated by a reallocation of a SimpleVec of {}",
            type_name::<T>()
        );
    }

    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    #[cfg(debug_assertions)]
    fn integrity_check(&self) {
        assert!(
            self.len <= self.buffer.capacity(),
            "len {} exceeds capacity {} in SimpleVec of {}",
            self.len,
            self.buffer.capacity(),
            type_name::<T>()
        );

        assert!(
            self.generation != 0 || self.buffer.is_empty(),
            "SimpleVec of {} owns a buffer but was never assigned a generation",
            type_name::<T>()
        );
    }
}

impl<T: Default> SimpleVec<T> {
    /// Creates an array of `len` default values, with capacity equal to `len`.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self::from_buffer(OwnedBuffer::new(len), len)
    }

    /// Creates an empty array with exactly `capacity` slots reserved.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_buffer(OwnedBuffer::new(capacity), 0)
    }

    /// Ensures the capacity is at least `new_capacity`.
    ///
    /// If the array already has that much capacity, this does nothing. Otherwise exactly
    /// `new_capacity` slots are allocated and the live elements are moved over. The length is
    /// unchanged.
    pub fn reserve(&mut self, new_capacity: usize) {
        #[cfg(debug_assertions)]
        self.integrity_check();

        if new_capacity <= self.capacity() {
            return;
        }

        self.reallocate(new_capacity);
    }

    /// Changes the length to `new_len`.
    ///
    /// Newly exposed elements are `T::default()`. If `new_len` exceeds the capacity, the
    /// capacity grows to at least double its previous value, preserving all existing elements.
    pub fn resize(&mut self, new_len: usize) {
        #[cfg(debug_assertions)]
        self.integrity_check();

        if new_len <= self.len {
            self.len = new_len;
            return;
        }

        if new_len <= self.capacity() {
            self.buffer
                .as_mut_slice()
                .get_mut(self.len..new_len)
                .expect("guarded by len < new_len <= capacity")
                .fill_with(T::default);
        } else {
            // Every slot past the moved elements in a fresh buffer is already a default value.
            self.grow_for(new_len);
        }

        self.len = new_len;
    }

    /// Appends `value` to the end of the array, growing the capacity if the array is full.
    pub fn push(&mut self, value: T) {
        #[cfg(debug_assertions)]
        self.integrity_check();

        let new_len = self.len.checked_add(1).expect("length overflowed usize");
        self.grow_for(new_len);

        // SAFETY: We just ensured that capacity >= len + 1.
        let slot = unsafe { self.buffer.get_unchecked_mut(self.len) };
        *slot = value;

        self.len = new_len;
    }

    /// Removes the last element and returns it, leaving `T::default()` in the vacated slot.
    ///
    /// Returns `None` and does nothing if the array is empty.
    pub fn pop(&mut self) -> Option<T> {
        #[cfg(debug_assertions)]
        self.integrity_check();

        let new_len = self.len.checked_sub(1)?;

        // SAFETY: new_len < len <= capacity.
        let slot = unsafe { self.buffer.get_unchecked_mut(new_len) };
        let value = mem::take(slot);

        self.len = new_len;
        Some(value)
    }

    /// Inserts `value` immediately before `position`, shifting every later element one slot
    /// towards the end. Returns the position of the inserted element.
    ///
    /// `position` may be [`end()`][Self::end], which appends. If the array is full, the
    /// capacity doubles first (or becomes 1 if it was 0); the returned position is valid for
    /// the new storage.
    ///
    /// # Panics
    ///
    /// Panics if `position` is beyond the end of the array. In debug builds, also panics if
    /// `position` was invalidated by an earlier reallocation.
    pub fn insert(&mut self, position: Position, value: T) -> Position {
        #[cfg(debug_assertions)]
        self.integrity_check();

        self.check_position(position, "insert");

        let index = position.index();
        assert!(
            index <= self.len,
            "insert() position {index} is beyond the end of a SimpleVec of {} with length {}",
            type_name::<T>(),
            self.len
        );

        let new_len = self.len.checked_add(1).expect("length overflowed usize");
        self.grow_for(new_len);

        // The value goes into the first free slot and is then rotated into place, which moves
        // the shifted elements tail-first so nothing is overwritten.
        let shifted = self
            .buffer
            .as_mut_slice()
            .get_mut(index..new_len)
            .expect("guarded by index <= len < new_len <= capacity");

        *shifted
            .last_mut()
            .expect("range contains at least the free slot") = value;

        shifted.rotate_right(1);

        self.len = new_len;
        Position::new(index, self.generation)
    }

    /// Removes the element at `position`, shifting every later element one slot towards the
    /// start. Returns a position with the same index, which now names the element that
    /// followed the removed one (or [`end()`][Self::end] if the last element was removed).
    ///
    /// # Panics
    ///
    /// Panics if the array is empty or `position` does not name a live element. In debug
    /// builds, also panics if `position` was invalidated by an earlier reallocation.
    pub fn erase(&mut self, position: Position) -> Position {
        #[cfg(debug_assertions)]
        self.integrity_check();

        self.check_position(position, "erase");

        let index = position.index();
        assert!(
            index < self.len,
            "erase() position {index} does not name an element of a SimpleVec of {} with length {}",
            type_name::<T>(),
            self.len
        );

        let shifted = self
            .buffer
            .as_mut_slice()
            .get_mut(index..self.len)
            .expect("guarded by index < len <= capacity");

        shifted.rotate_left(1);

        // The erased value is now in the last live slot.
        let vacated = shifted
            .last_mut()
            .expect("range contains at least the erased element");
        drop(mem::take(vacated));

        self.len = self
            .len
            .checked_sub(1)
            .expect("guarded by index < len above");

        Position::new(index, self.generation)
    }

    /// Makes room for at least `required` elements, preferring to double the capacity.
    ///
    /// This is the one growth policy shared by every operation that grows on demand.
    fn grow_for(&mut self, required: usize) {
        let capacity = self.capacity();

        if required <= capacity {
            return;
        }

        self.reallocate(cmp::max(required, capacity.saturating_mul(2)));
    }

    /// Moves the live elements into a new buffer of exactly `new_capacity` slots.
    ///
    /// The new buffer is fully built before the old one is touched, so if allocation fails
    /// the array is unchanged.
    fn reallocate(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= self.len);

        let mut new_buffer = OwnedBuffer::new(new_capacity);

        new_buffer
            .as_mut_slice()
            .get_mut(..self.len)
            .expect("guarded by new_capacity >= len")
            .swap_with_slice(self.as_mut_slice());

        // The old block, now holding default values and stale leftovers, is released here.
        self.buffer.swap(&mut new_buffer);
        self.generation = next_generation();
    }
}

impl<T: Clone> SimpleVec<T> {
    /// Creates an array of `len` copies of `value`, with capacity equal to `len`.
    ///
    /// `value` itself is moved into the last slot; the others are clones of it.
    #[must_use]
    pub fn from_elem(len: usize, value: T) -> Self {
        let last_index = len.saturating_sub(1);
        let mut value = Some(value);

        let buffer = OwnedBuffer::from_fn(len, |index| {
            if index == last_index {
                value.take().expect("the last slot is filled exactly once")
            } else {
                value
                    .clone()
                    .expect("the value is only taken for the last slot")
            }
        });

        Self::from_buffer(buffer, len)
    }
}

impl<T> Default for SimpleVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SimpleVec<T> {
    fn clone(&self) -> Self {
        let mut source = self.iter();

        let buffer = OwnedBuffer::from_fn(self.len, |_| {
            source
                .next()
                .expect("source has exactly len elements")
                .clone()
        });

        Self::from_buffer(buffer, self.len)
    }

    fn clone_from(&mut self, source: &Self) {
        // Build the copy first so a panicking clone leaves `self` untouched.
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T> Deref for SimpleVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for SimpleVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for SimpleVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        assert!(
            !self.is_empty(),
            "indexed into an empty SimpleVec of {}",
            type_name::<T>()
        );

        self.as_slice().get(index).unwrap_or_else(|| {
            panic!(
                "index {index} out of bounds in SimpleVec of {} with length {}",
                type_name::<T>(),
                self.len
            )
        })
    }
}

impl<T> IndexMut<usize> for SimpleVec<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        assert!(
            !self.is_empty(),
            "indexed into an empty SimpleVec of {}",
            type_name::<T>()
        );

        let len = self.len;

        self.as_mut_slice().get_mut(index).unwrap_or_else(|| {
            panic!(
                "index {index} out of bounds in SimpleVec of {} with length {len}",
                type_name::<T>()
            )
        })
    }
}

impl<T, const N: usize> From<[T; N]> for SimpleVec<T> {
    fn from(values: [T; N]) -> Self {
        let mut values = values.into_iter();

        let buffer = OwnedBuffer::from_fn(N, |_| {
            values.next().expect("array has exactly N elements")
        });

        Self::from_buffer(buffer, N)
    }
}

impl<T: Clone> From<&[T]> for SimpleVec<T> {
    fn from(values: &[T]) -> Self {
        let mut values = values.iter();
        let len = values.len();

        let buffer = OwnedBuffer::from_fn(len, |_| {
            values
                .next()
                .expect("slice has exactly len elements")
                .clone()
        });

        Self::from_buffer(buffer, len)
    }
}

impl<T: Default> From<ReserveProxy> for SimpleVec<T> {
    fn from(proxy: ReserveProxy) -> Self {
        Self::with_capacity(proxy.capacity())
    }
}

impl<T: Default> FromIterator<T> for SimpleVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}

impl<T: Default> Extend<T> for SimpleVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();

        let (lower_bound, _) = iter.size_hint();
        self.grow_for(self.len.saturating_add(lower_bound));

        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + Default + 'a> Extend<&'a T> for SimpleVec<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a, T> IntoIterator for &'a SimpleVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SimpleVec<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: PartialEq> PartialEq for SimpleVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SimpleVec<T> {}

impl<T: PartialEq> PartialEq<[T]> for SimpleVec<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for SimpleVec<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for SimpleVec<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for SimpleVec<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for SimpleVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for SimpleVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;
    use crate::simple_vec;

    assert_impl_all!(SimpleVec<u32>: Send, Sync, Clone, Default);
    assert_not_impl_any!(SimpleVec<Rc<u32>>: Send, Sync);

    /// Counts how many times values sharing the same counter have been dropped.
    #[derive(Default)]
    struct Tracked {
        drops: Option<Rc<Cell<usize>>>,
    }

    impl Tracked {
        fn new(drops: &Rc<Cell<usize>>) -> Self {
            Self {
                drops: Some(Rc::clone(drops)),
            }
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            if let Some(drops) = &self.drops {
                drops.set(drops.get().checked_add(1).unwrap());
            }
        }
    }

    #[test]
    fn smoke_test() {
        let mut items = SimpleVec::new();

        items.push(1);
        items.push(2);
        items.push(3);

        assert_eq!(items.len(), 3);
        assert_eq!(items.capacity(), 4);
        assert_eq!(items[1], 2);

        assert_eq!(items.pop(), Some(3));
        assert_eq!(items, [1, 2]);
    }

    #[test]
    fn new_does_not_allocate() {
        let items = SimpleVec::<String>::new();

        assert_eq!(items.len(), 0);
        assert_eq!(items.capacity(), 0);
        assert!(items.is_empty());
        assert_eq!(items.generation, 0);
    }

    #[test]
    fn with_len_fills_with_defaults() {
        for len in [0, 1, 7, 64] {
            let items = SimpleVec::<u32>::with_len(len);

            assert_eq!(items.len(), len);
            assert_eq!(items.capacity(), len);
            assert!(items.iter().all(|item| *item == 0));
        }
    }

    #[test]
    fn from_elem_fills_with_value() {
        let items = SimpleVec::from_elem(3, "x".to_string());

        assert_eq!(items.len(), 3);
        assert_eq!(items.capacity(), 3);
        assert!(items.iter().all(|item| item == "x"));
    }

    #[test]
    fn from_elem_zero_len_is_empty() {
        let items = SimpleVec::from_elem(0, 42_u8);

        assert!(items.is_empty());
        assert_eq!(items.capacity(), 0);
    }

    #[test]
    fn from_elem_moves_value_into_last_slot() {
        #[derive(Clone)]
        struct Counted(Rc<Cell<usize>>);

        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.set(self.0.get().checked_add(1).unwrap());
            }
        }

        let drops = Rc::new(Cell::new(0));

        let items = SimpleVec::from_elem(4, Counted(Rc::clone(&drops)));
        assert_eq!(drops.get(), 0);

        drop(items);
        assert_eq!(drops.get(), 4);
    }

    #[test]
    fn literal_list_keeps_order() {
        let items = simple_vec![10, 20, 30];

        assert_eq!(items.len(), 3);
        assert_eq!(items.capacity(), 3);
        assert_eq!(items.as_slice(), &[10, 20, 30]);
    }

    #[test]
    fn from_slice_copies() {
        let source = ["a".to_string(), "b".to_string()];
        let items = SimpleVec::from(source.as_slice());

        assert_eq!(items, source);
        assert_eq!(items.capacity(), 2);
    }

    #[test]
    fn from_reserve_proxy_reserves_without_len() {
        let items = SimpleVec::<u64>::from(crate::reserve(10));

        assert_eq!(items.capacity(), 10);
        assert_eq!(items.len(), 0);
    }

    #[test]
    fn at_checks_bounds() {
        let mut items = simple_vec![1, 2, 3];

        assert_eq!(items.at(2), Ok(&3));
        assert_eq!(items.at(3), Err(Error::OutOfRange { index: 3, len: 3 }));

        *items.at_mut(0).unwrap() = 100;
        assert_eq!(items[0], 100);
        assert!(items.at_mut(3).is_err());
    }

    #[test]
    fn at_on_empty_fails() {
        let items = SimpleVec::<u8>::new();

        assert_eq!(items.at(0), Err(Error::OutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn at_past_len_fails_even_within_capacity() {
        let items = SimpleVec::<u8>::with_capacity(8);

        assert!(items.at(0).is_err());
    }

    #[test]
    #[should_panic]
    fn index_into_empty_panics() {
        let items = SimpleVec::<u8>::with_capacity(8);

        _ = items[0];
    }

    #[test]
    #[should_panic]
    fn index_past_len_panics() {
        let mut items = simple_vec![1, 2];
        items.clear();
        items.push(5);

        _ = items[1];
    }

    #[test]
    fn index_mut_writes() {
        let mut items = simple_vec![1, 2];

        items[1] = 20;

        assert_eq!(items, [1, 20]);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut items = simple_vec![1, 2, 3];

        items.clear();

        assert!(items.is_empty());
        assert_eq!(items.capacity(), 3);
    }

    #[test]
    fn clear_keeps_values_until_dropped() {
        let drops = Rc::new(Cell::new(0));
        let mut items = SimpleVec::new();

        items.push(Tracked::new(&drops));
        items.push(Tracked::new(&drops));

        items.clear();
        assert_eq!(drops.get(), 0);

        // Reusing a slot drops the stale value in it.
        items.push(Tracked::default());
        assert_eq!(drops.get(), 1);

        drop(items);
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn reserve_smaller_is_noop() {
        let mut items = simple_vec![1, 2, 3];
        let ptr = items.as_ptr();

        items.reserve(2);
        items.reserve(3);

        assert_eq!(items.capacity(), 3);
        assert_eq!(items.as_ptr(), ptr);
    }

    #[test]
    fn reserve_grows_exactly() {
        let mut items = simple_vec![1, 2, 3];

        items.reserve(10);

        assert_eq!(items.capacity(), 10);
        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    fn reserve_then_push_does_not_reallocate() {
        let mut items = SimpleVec::new();
        items.reserve(100);

        let ptr = items.as_ptr();

        for value in 0..100 {
            items.push(value);
            assert_eq!(items.capacity(), 100);
        }

        assert_eq!(items.as_ptr(), ptr);
    }

    #[test]
    fn resize_shrink_keeps_capacity() {
        let mut items = simple_vec![1, 2, 3, 4];

        items.resize(2);

        assert_eq!(items, [1, 2]);
        assert_eq!(items.capacity(), 4);
    }

    #[test]
    fn resize_within_capacity_resets_exposed_slots() {
        let mut items = simple_vec![1, 2, 3, 4];

        items.resize(1);
        items.resize(3);

        assert_eq!(items, [1, 0, 0]);
        assert_eq!(items.capacity(), 4);
    }

    #[test]
    fn resize_beyond_capacity_doubles() {
        let mut items = simple_vec![1, 2, 3];

        items.resize(4);

        assert_eq!(items, [1, 2, 3, 0]);
        assert_eq!(items.capacity(), 6);
    }

    #[test]
    fn resize_far_beyond_capacity_uses_requested_len() {
        let mut items = simple_vec![1, 2];

        items.resize(10);

        assert_eq!(items.len(), 10);
        assert_eq!(items.capacity(), 10);
        assert_eq!(items.as_slice().get(..3), Some([1, 2, 0].as_slice()));
    }

    #[test]
    fn resize_leaves_defaults_past_len() {
        let mut items = simple_vec![7_u8];

        items.resize(3);
        assert_eq!(items.capacity(), 3);

        // Everything beyond len in the grown buffer is a default value.
        items.resize(2);
        items.reserve(3);
        assert_eq!(items.buffer.as_slice(), &[7, 0, 0]);
    }

    #[test]
    fn push_grows_by_doubling() {
        let mut items = SimpleVec::new();
        let mut capacities = Vec::new();

        for value in 0..9 {
            items.push(value);
            capacities.push(items.capacity());
        }

        assert_eq!(capacities, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
        assert!(items.iter().copied().eq(0..9));
    }

    #[test]
    fn push_moves_existing_values_on_growth() {
        let drops = Rc::new(Cell::new(0));
        let mut items = SimpleVec::new();

        for _ in 0..5 {
            items.push(Tracked::new(&drops));
        }

        // Growth moves values, it never drops live ones.
        assert_eq!(drops.get(), 0);
        assert_eq!(items.len(), 5);

        drop(items);
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn pop_empty_is_noop() {
        let mut items = SimpleVec::<u32>::new();

        assert_eq!(items.pop(), None);
        assert_eq!(items.len(), 0);
        assert_eq!(items.capacity(), 0);
    }

    #[test]
    fn pop_resets_vacated_slot() {
        let mut items = simple_vec!["a".to_string(), "b".to_string()];

        assert_eq!(items.pop().as_deref(), Some("b"));

        assert_eq!(items.len(), 1);
        assert_eq!(items.buffer.as_slice(), &["a".to_string(), String::new()]);
    }

    #[test]
    fn insert_at_begin() {
        let mut items = simple_vec![1, 2, 3];

        let inserted = items.insert(items.begin(), 0);

        assert_eq!(inserted.index(), 0);
        assert_eq!(items, [0, 1, 2, 3]);
    }

    #[test]
    fn insert_at_end_appends() {
        let mut items = simple_vec![1, 2, 3];

        let inserted = items.insert(items.end(), 4);

        assert_eq!(inserted.index(), 3);
        assert_eq!(items, [1, 2, 3, 4]);
    }

    #[test]
    fn insert_in_middle_with_spare_capacity() {
        let mut items = SimpleVec::with_capacity(8);
        items.extend([1, 2, 4, 5]);
        let ptr = items.as_ptr();

        let inserted = items.insert(items.position(2), 3);

        assert_eq!(inserted.index(), 2);
        assert_eq!(items, [1, 2, 3, 4, 5]);
        assert_eq!(items.capacity(), 8);
        assert_eq!(items.as_ptr(), ptr);
    }

    #[test]
    fn insert_into_full_doubles() {
        let mut items = simple_vec![1, 2, 3, 4];

        let inserted = items.insert(items.position(1), 9);

        assert_eq!(items[inserted.index()], 9);
        assert_eq!(items, [1, 9, 2, 3, 4]);
        assert_eq!(items.capacity(), 8);
    }

    #[test]
    fn insert_into_empty_allocates_one() {
        let mut items = SimpleVec::new();

        items.insert(items.begin(), "only");

        assert_eq!(items, ["only"]);
        assert_eq!(items.capacity(), 1);
    }

    #[test]
    fn insert_returned_position_is_usable() {
        let mut items = simple_vec![1, 2, 3];

        // The array grows here, the returned position belongs to the new storage.
        let inserted = items.insert(items.begin(), 0);
        items.erase(inserted);

        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    #[should_panic]
    fn insert_past_end_panics() {
        let mut items = SimpleVec::<u8>::with_capacity(4);
        let past_end = items.end().next();

        items.insert(past_end, 1);
    }

    #[test]
    fn erase_in_middle() {
        let mut items = simple_vec![1, 2, 3];

        let next = items.erase(items.position(1));

        assert_eq!(items, [1, 3]);
        assert_eq!(next.index(), 1);
        assert_eq!(items[next.index()], 3);
        assert_eq!(items.capacity(), 3);
    }

    #[test]
    fn erase_last_returns_end() {
        let mut items = simple_vec![1, 2, 3];

        let next = items.erase(items.position(2));

        assert_eq!(next, items.end());
        assert_eq!(items, [1, 2]);
    }

    #[test]
    fn erase_drops_erased_value() {
        let drops = Rc::new(Cell::new(0));
        let mut items = SimpleVec::new();

        items.push(Tracked::new(&drops));
        items.push(Tracked::default());

        items.erase(items.begin());

        assert_eq!(drops.get(), 1);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn erase_all_from_front() {
        let mut items = simple_vec![1, 2, 3, 4];

        let mut position = items.begin();
        while !items.is_empty() {
            position = items.erase(position);
        }

        assert_eq!(position, items.end());
        assert_eq!(items.capacity(), 4);
    }

    #[test]
    #[should_panic]
    fn erase_end_panics() {
        let mut items = simple_vec![1, 2, 3];

        items.erase(items.end());
    }

    #[test]
    #[should_panic]
    fn erase_on_empty_panics() {
        let mut items = SimpleVec::<u8>::new();

        items.erase(items.begin());
    }

    #[test]
    #[should_panic]
    fn position_past_end_panics() {
        let items = simple_vec![1, 2, 3];

        _ = items.position(4);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic]
    fn stale_position_panics_in_debug() {
        let mut items = simple_vec![1, 2];
        let begin = items.begin();

        // Full, so this reallocates.
        items.push(3);

        items.erase(begin);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic]
    fn foreign_position_panics_in_debug() {
        let mut a = simple_vec![1, 2];
        let b = simple_vec![1, 2];

        a.erase(b.begin());
    }

    #[test]
    fn position_survives_non_reallocating_mutation() {
        let mut items = SimpleVec::with_capacity(4);
        items.push(1);

        let begin = items.begin();
        items.push(2);
        items.insert(items.end(), 3);

        items.erase(begin);

        assert_eq!(items, [2, 3]);
    }

    #[test]
    fn swap_exchanges_everything() {
        let mut a = simple_vec![1, 2, 3];
        let mut b = SimpleVec::with_capacity(10);
        b.push(9);

        a.swap(&mut b);

        assert_eq!(a, [9]);
        assert_eq!(a.capacity(), 10);
        assert_eq!(b, [1, 2, 3]);
        assert_eq!(b.capacity(), 3);
    }

    #[test]
    fn swap_twice_restores() {
        let mut a = simple_vec![1, 2, 3];
        let mut b = simple_vec![4];
        let (a_ptr, b_ptr) = (a.as_ptr(), b.as_ptr());

        a.swap(&mut b);
        a.swap(&mut b);

        assert_eq!(a, [1, 2, 3]);
        assert_eq!(b, [4]);
        assert_eq!(a.as_ptr(), a_ptr);
        assert_eq!(b.as_ptr(), b_ptr);
    }

    #[test]
    fn clone_is_deep_and_trimmed() {
        let mut original = SimpleVec::with_capacity(10);
        original.extend(["a".to_string(), "b".to_string()]);

        let mut copy = original.clone();

        assert_eq!(copy, original);
        assert_eq!(copy.capacity(), 2);

        copy[0].push('!');
        assert_eq!(original[0], "a");
        assert_eq!(copy[0], "a!");
    }

    #[test]
    fn clone_from_replaces_contents() {
        let source = simple_vec![1, 2, 3];
        let mut target = simple_vec![9, 9, 9, 9, 9];

        target.clone_from(&source);

        assert_eq!(target, source);
        assert_eq!(target.capacity(), 3);

        target.push(4);
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn clone_from_panic_leaves_target_untouched() {
        #[derive(Debug, PartialEq, Eq)]
        struct Fragile(u32);

        impl Clone for Fragile {
            fn clone(&self) -> Self {
                assert!(self.0 != 13, "refusing to clone 13");
                Self(self.0)
            }
        }

        let source = simple_vec![Fragile(1), Fragile(13)];
        let mut target = simple_vec![Fragile(5)];

        let result = catch_unwind(AssertUnwindSafe(|| target.clone_from(&source)));

        assert!(result.is_err());
        assert_eq!(target, [Fragile(5)]);
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut source = simple_vec![1, 2, 3];
        let ptr = source.as_ptr();

        let moved = mem::take(&mut source);

        assert_eq!(moved, [1, 2, 3]);
        assert_eq!(moved.as_ptr(), ptr);
        assert!(source.is_empty());
        assert_eq!(source.capacity(), 0);

        // The source is still fully usable.
        source.push(4);
        assert_eq!(source, [4]);
    }

    #[test]
    fn equality() {
        let a = simple_vec![1, 2, 3];
        let b = simple_vec![1, 2, 3];
        let mut c = SimpleVec::with_capacity(16);
        c.extend([1, 2, 3]);

        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_eq!(b, c);
        assert_eq!(a, c);

        assert_ne!(a, simple_vec![1, 2]);
        assert_ne!(a, simple_vec![1, 2, 4]);
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(simple_vec![1, 2] < simple_vec![1, 2, 3]);
        assert!(simple_vec![1, 3] > simple_vec![1, 2, 9]);
        assert!(simple_vec![1, 2] <= simple_vec![1, 2]);
        assert!(simple_vec![1, 2] >= simple_vec![1, 2]);
        assert!(SimpleVec::<u8>::new() < simple_vec![0]);
        assert_eq!(simple_vec![2].cmp(&simple_vec![1, 5]), Ordering::Greater);
    }

    #[test]
    fn hash_matches_equality() {
        let mut set = HashSet::new();

        set.insert(simple_vec![1, 2]);
        let mut other = SimpleVec::with_capacity(5);
        other.extend([1, 2]);

        assert!(set.contains(&other));
    }

    #[test]
    fn extend_with_references() {
        let mut items = simple_vec![1];

        items.extend(&[2, 3]);

        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    fn collect_from_iterator() {
        let items: SimpleVec<u32> = (1..=5).collect();

        assert_eq!(items, [1, 2, 3, 4, 5]);
        assert_eq!(items.capacity(), 5);
    }

    #[test]
    fn iterates_by_reference() {
        let mut items = simple_vec![1, 2, 3];

        for item in &mut items {
            *item *= 10;
        }

        let mut sum = 0;
        for item in &items {
            sum += item;
        }

        assert_eq!(sum, 60);
    }

    #[test]
    fn slice_methods_through_deref() {
        let mut items = simple_vec![3, 1, 2];

        items.sort_unstable();

        assert_eq!(items.first(), Some(&1));
        assert_eq!(items.last(), Some(&3));
        assert!(items.contains(&2));
    }

    #[test]
    fn debug_lists_live_elements() {
        let mut items = SimpleVec::with_capacity(4);
        items.extend([1, 2]);

        assert_eq!(format!("{items:?}"), "[1, 2]");
    }

    #[test]
    fn zero_sized_elements() {
        let mut items = SimpleVec::new();

        for _ in 0..100 {
            items.push(());
        }

        assert_eq!(items.len(), 100);
        assert_eq!(items.pop(), Some(()));
        assert_eq!(items.len(), 99);
    }
}
