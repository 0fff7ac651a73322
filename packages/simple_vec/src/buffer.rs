use std::alloc::{Layout, alloc, dealloc, handle_alloc_error};
use std::any::type_name;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::ptr::{self, NonNull};
use std::{fmt, mem, slice};

use scopeguard::ScopeGuard;

/// A fixed-capacity heap block of `T` with exactly one owner.
///
/// This is the backing storage of a [`SimpleVec`][crate::SimpleVec]. Every one of the
/// `capacity` slots always holds an initialized value: the block is filled when it is created
/// and every slot is dropped when the buffer is dropped. The buffer has no notion of which
/// slots are "live" - that bookkeeping belongs to the owning container.
///
/// The buffer never resizes itself. To change capacity, the owner builds a new buffer and
/// [`swap()`][Self::swap]s it in, which is O(1) and cannot fail.
///
/// A zero-capacity buffer (or a buffer of a zero-sized type) owns no allocation.
///
/// # Examples
///
/// ```
/// use simple_vec::OwnedBuffer;
///
/// let mut a = OwnedBuffer::from_fn(3, |index| index * 10);
/// let mut b = OwnedBuffer::<usize>::new(1);
///
/// a.swap(&mut b);
///
/// assert_eq!(a.as_slice(), &[0]);
/// assert_eq!(b.as_slice(), &[0, 10, 20]);
/// ```
pub struct OwnedBuffer<T> {
    first_slot_ptr: NonNull<T>,
    capacity: usize,

    // We own the slots and drop them, which dropck needs to know about.
    _owns: PhantomData<T>,
}

impl<T> OwnedBuffer<T> {
    /// Creates a buffer that owns no allocation and has zero capacity.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            first_slot_ptr: NonNull::dangling(),
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Creates a buffer of `capacity` slots, filling slot `index` with `f(index)`.
    ///
    /// If `f` panics, the slots written so far are dropped and the block is released before
    /// the panic continues.
    ///
    /// # Panics
    ///
    /// Panics if the total size of the block would overflow `isize`.
    #[must_use]
    pub fn from_fn(capacity: usize, mut f: impl FnMut(usize) -> T) -> Self {
        let layout = Self::layout(capacity);

        let first_slot_ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            // SAFETY: The layout is valid for the target type and not zero-sized.
            let raw = unsafe { alloc(layout) };
            NonNull::new(raw.cast::<T>()).unwrap_or_else(|| handle_alloc_error(layout))
        };

        let mut initialized = scopeguard::guard(0_usize, move |initialized| {
            // SAFETY: The first `initialized` slots were written below and nobody else
            // has seen them yet.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    first_slot_ptr.as_ptr(),
                    initialized,
                ));
            }

            release(first_slot_ptr, layout);
        });

        for index in 0..capacity {
            let value = f(index);

            // SAFETY: `index < capacity`, so the slot is inside the block, and it has not been
            // written yet so there is nothing to drop.
            unsafe {
                first_slot_ptr.add(index).write(value);
            }

            *initialized = index
                .checked_add(1)
                .expect("guarded by index < capacity <= usize::MAX");
        }

        ScopeGuard::into_inner(initialized);

        Self {
            first_slot_ptr,
            capacity,
            _owns: PhantomData,
        }
    }

    /// The number of slots in the buffer.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the buffer has zero slots.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Returns a shared reference to the slot at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `index < self.capacity()`.
    #[must_use]
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(
            index < self.capacity,
            "slot {index} out of bounds in OwnedBuffer of {} with capacity {}",
            type_name::<T>(),
            self.capacity
        );

        // SAFETY: The caller guarantees the slot is inside the block and all slots are
        // initialized for the lifetime of the buffer.
        unsafe { self.first_slot_ptr.add(index).as_ref() }
    }

    /// Returns an exclusive reference to the slot at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `index < self.capacity()`.
    #[must_use]
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(
            index < self.capacity,
            "slot {index} out of bounds in OwnedBuffer of {} with capacity {}",
            type_name::<T>(),
            self.capacity
        );

        // SAFETY: The caller guarantees the slot is inside the block, all slots are
        // initialized and we hold `&mut self`, so the reference is exclusive.
        unsafe { self.first_slot_ptr.add(index).as_mut() }
    }

    /// All slots of the buffer.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: The pointer is valid (or dangling with zero size) for `capacity` initialized
        // slots for as long as `self` is borrowed.
        unsafe { slice::from_raw_parts(self.first_slot_ptr.as_ptr(), self.capacity) }
    }

    /// All slots of the buffer, mutably.
    #[must_use]
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: As in `as_slice()`, plus `&mut self` makes the slice exclusive.
        unsafe { slice::from_raw_parts_mut(self.first_slot_ptr.as_ptr(), self.capacity) }
    }

    /// The raw pointer to the first slot. Dangling if the buffer owns no allocation.
    #[must_use]
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.first_slot_ptr.as_ptr()
    }

    /// The raw mutable pointer to the first slot. Dangling if the buffer owns no allocation.
    #[must_use]
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.first_slot_ptr.as_ptr()
    }

    /// Exchanges the blocks owned by `self` and `other`. Never allocates and never panics.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    #[must_use]
    fn layout(capacity: usize) -> Layout {
        Layout::array::<T>(capacity).unwrap_or_else(|_| {
            panic!(
                "capacity overflow: {capacity} slots of {} do not fit in memory",
                type_name::<T>()
            )
        })
    }
}

impl<T: Default> OwnedBuffer<T> {
    /// Creates a buffer of `capacity` slots, each holding `T::default()`.
    ///
    /// # Panics
    ///
    /// Panics if the total size of the block would overflow `isize`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::from_fn(capacity, |_| T::default())
    }
}

fn release<T>(first_slot_ptr: NonNull<T>, layout: Layout) {
    if layout.size() == 0 {
        return;
    }

    // SAFETY: A non-zero-sized block is only ever obtained from `alloc()` with this layout.
    unsafe {
        dealloc(first_slot_ptr.as_ptr().cast(), layout);
    }
}

impl<T> Default for OwnedBuffer<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Drop for OwnedBuffer<T> {
    fn drop(&mut self) {
        let first_slot_ptr = self.first_slot_ptr;
        let layout = Self::layout(self.capacity);

        // The block is released even if dropping one of the values panics.
        let _release = scopeguard::guard((), move |()| release(first_slot_ptr, layout));

        // SAFETY: Every slot is initialized and we are the only owner, so each value is
        // dropped exactly once here.
        unsafe {
            ptr::drop_in_place(self.as_mut_slice());
        }
    }
}

impl<T> Index<usize> for OwnedBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.as_slice().get(index).unwrap_or_else(|| {
            panic!(
                "slot {index} out of bounds in OwnedBuffer of {} with capacity {}",
                type_name::<T>(),
                self.capacity
            )
        })
    }
}

impl<T> IndexMut<usize> for OwnedBuffer<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let capacity = self.capacity;

        self.as_mut_slice().get_mut(index).unwrap_or_else(|| {
            panic!(
                "slot {index} out of bounds in OwnedBuffer of {} with capacity {capacity}",
                type_name::<T>()
            )
        })
    }
}

impl<T> fmt::Debug for OwnedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedBuffer")
            .field("first_slot_ptr", &self.first_slot_ptr)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

// SAFETY: The raw pointer is an exclusively owned heap block, nothing about it is tied to the
// creating thread, so the buffer can move between threads whenever the values can.
unsafe impl<T: Send> Send for OwnedBuffer<T> {}

// SAFETY: Shared access only ever hands out `&T`, so sharing the buffer is as safe as
// sharing the values.
unsafe impl<T: Sync> Sync for OwnedBuffer<T> {}
