#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! An owned, contiguous, growable array built on top of an exclusively owned raw buffer.
//!
//! This package provides [`SimpleVec`], a dynamic array with explicit capacity management,
//! and [`OwnedBuffer`], the fixed-capacity heap block it stores its elements in.
//!
//! # Key Features
//!
//! - **Amortized O(1) growth**: Capacity doubles when the array is full, starting from 1.
//! - **Explicit capacity control**: [`SimpleVec::reserve()`], [`SimpleVec::resize()`] and the
//!   [`reserve()`] request object for reserve-only construction.
//! - **Position-based editing**: [`SimpleVec::insert()`] and [`SimpleVec::erase()`] operate on
//!   [`Position`] handles, with a debug-build check against positions that were invalidated by
//!   a reallocation.
//! - **Checked access**: [`SimpleVec::at()`] reports out-of-range indexes as an [`Error`]
//!   instead of panicking.
//! - **Value semantics**: deep [`Clone`], O(1) [`SimpleVec::swap()`], equality, lexicographic
//!   ordering and hashing over the live elements.
//!
//! # Examples
//!
//! ```
//! use simple_vec::{SimpleVec, reserve, simple_vec};
//!
//! let mut names = SimpleVec::<String>::from(reserve(4));
//! assert_eq!(names.capacity(), 4);
//!
//! names.push("Bob".to_string());
//! names.push("Charlie".to_string());
//! names.insert(names.begin(), "Alice".to_string());
//!
//! assert_eq!(names.len(), 3);
//! assert_eq!(names[0], "Alice");
//! assert!(names.at(3).is_err());
//!
//! let copy = names.clone();
//! names.erase(names.position(1));
//!
//! assert_eq!(names, ["Alice", "Charlie"]);
//! assert_eq!(copy.len(), 3);
//! assert!(names > copy);
//! ```
//!
//! # Thread safety
//!
//! [`SimpleVec<T>`] is [`Send`] if `T` is [`Send`] and [`Sync`] if `T` is [`Sync`]. Mutation
//! requires exclusive access, so sharing an array between threads for modification requires
//! external synchronization such as a `Mutex`.

mod buffer;
mod error;
mod into_iter;
mod position;
mod reserve;
mod simple_vec;

pub use buffer::*;
pub use error::Error;
pub(crate) use error::Result;
pub use into_iter::*;
pub use position::*;
pub use reserve::*;
pub use simple_vec::*;

/// Creates a [`SimpleVec`] from a list of values, or from a value and a length.
///
/// The array's capacity equals the number of elements.
///
/// ```
/// use simple_vec::simple_vec;
///
/// let listed = simple_vec![1, 2, 3];
/// assert_eq!(listed, [1, 2, 3]);
///
/// let repeated = simple_vec!["x"; 2];
/// assert_eq!(repeated, ["x", "x"]);
/// ```
#[macro_export]
macro_rules! simple_vec {
    () => {
        $crate::SimpleVec::new()
    };
    ($value:expr; $len:expr) => {
        $crate::SimpleVec::from_elem($len, $value)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::SimpleVec::from([$($value),+])
    };
}
