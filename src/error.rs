use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by fallible `BlockList` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
