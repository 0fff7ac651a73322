/// A request to create a [`SimpleVec`][crate::SimpleVec] with capacity reserved up front.
///
/// Created by [`reserve()`]. Converting it into a `SimpleVec` allocates exactly the requested
/// capacity and leaves the array empty.
///
/// # Examples
///
/// ```
/// use simple_vec::{SimpleVec, reserve};
///
/// let items = SimpleVec::<String>::from(reserve(16));
///
/// assert_eq!(items.capacity(), 16);
/// assert!(items.is_empty());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct ReserveProxy {
    capacity: usize,
}

impl ReserveProxy {
    /// The capacity this request asks for.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Creates a [`ReserveProxy`] asking for `capacity` slots.
#[inline]
pub fn reserve(capacity: usize) -> ReserveProxy {
    ReserveProxy { capacity }
}
