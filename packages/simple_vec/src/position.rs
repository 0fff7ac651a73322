/// A handle to a slot in the live range of a specific [`SimpleVec`][crate::SimpleVec].
///
/// Positions are what [`SimpleVec::insert()`][crate::SimpleVec::insert] and
/// [`SimpleVec::erase()`][crate::SimpleVec::erase] operate on. You obtain one from
/// [`begin()`][crate::SimpleVec::begin], [`end()`][crate::SimpleVec::end] or
/// [`position()`][crate::SimpleVec::position] and may step it with [`next()`][Self::next],
/// [`prev()`][Self::prev] and [`offset()`][Self::offset].
///
/// # Invalidation
///
/// A position stays valid until the next operation that changes the capacity of the array it
/// came from: [`reserve()`][crate::SimpleVec::reserve] that grows, a growing
/// [`resize()`][crate::SimpleVec::resize], or a [`push()`][crate::SimpleVec::push] or
/// [`insert()`][crate::SimpleVec::insert] that has to grow. Operations that shift elements
/// without reallocating keep positions valid but change which element they name.
///
/// In debug builds, passing a position to an array whose storage has since been reallocated
/// panics. Release builds do not check this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    index: usize,

    /// Which buffer of the owning array this position was created against.
    generation: u64,
}

impl Position {
    #[must_use]
    pub(crate) fn new(index: usize, generation: u64) -> Self {
        Self { index, generation }
    }

    /// The offset of the position from the start of the array.
    #[must_use]
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// The position one slot further from the start.
    ///
    /// # Panics
    ///
    /// Panics if the index would overflow `usize`.
    #[must_use]
    pub fn next(self) -> Self {
        self.offset(1)
    }

    /// The position one slot closer to the start.
    ///
    /// # Panics
    ///
    /// Panics if the position is already at the start.
    #[must_use]
    pub fn prev(self) -> Self {
        Self {
            index: self
                .index
                .checked_sub(1)
                .expect("cannot step a position back from the start of the array"),
            ..self
        }
    }

    /// The position `count` slots further from the start.
    ///
    /// # Panics
    ///
    /// Panics if the index would overflow `usize`.
    #[must_use]
    pub fn offset(self, count: usize) -> Self {
        Self {
            index: self
                .index
                .checked_add(count)
                .expect("position index overflowed usize"),
            ..self
        }
    }
}
