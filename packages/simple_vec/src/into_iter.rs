use std::iter::FusedIterator;
use std::mem;

use crate::{OwnedBuffer, SimpleVec};

/// An iterator that moves the elements out of a [`SimpleVec`].
///
/// Created by the [`IntoIterator`] implementation of [`SimpleVec`]. Each yielded slot is left
/// holding `T::default()`; elements that are never yielded are dropped with the iterator.
#[derive(Debug)]
pub struct IntoIter<T> {
    buffer: OwnedBuffer<T>,

    /// Index of the next element to yield from the front.
    front: usize,

    /// One past the index of the next element to yield from the back.
    back: usize,
}

impl<T: Default> IntoIter<T> {
    fn take_at(&mut self, index: usize) -> T {
        debug_assert!(index < self.back);

        // SAFETY: Only called with front <= index < back <= capacity.
        mem::take(unsafe { self.buffer.get_unchecked_mut(index) })
    }
}

impl<T: Default> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        let index = self.front;
        self.front = index
            .checked_add(1)
            .expect("guarded by front < back above");

        Some(self.take_at(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .back
            .checked_sub(self.front)
            .expect("front never passes back");

        (remaining, Some(remaining))
    }
}

impl<T: Default> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back = self
            .back
            .checked_sub(1)
            .expect("guarded by front < back above");

        Some(self.take_at(self.back))
    }
}

impl<T: Default> ExactSizeIterator for IntoIter<T> {}

impl<T: Default> FusedIterator for IntoIter<T> {}

impl<T: Default> IntoIterator for SimpleVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let (buffer, len) = self.into_parts();

        IntoIter {
            buffer,
            front: 0,
            back: len,
        }
    }
}
