use thiserror::Error;

/// Errors returned by the checked accessors of [`SimpleVec`][crate::SimpleVec].
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The caller asked for an element at an index that is not less than the current length.
    #[error("index {index} is out of range for a SimpleVec of length {len}")]
    OutOfRange {
        /// The index that was requested.
        index: usize,

        /// The length of the array at the time of the request.
        len: usize,
    },
}

/// A specialized `Result` type for `simple_vec` operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
