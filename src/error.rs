use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/*
 * Errors reported by the index-based container operations.
 * Running out of memory is not represented here: the global allocator
 * aborts in that case.
 */
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("index {index} out of range for length {length}")]
    OutOfRange { index: usize, length: usize },
}

impl Error {
    /*
     * Build an OutOfRange error and report it, replacing the old
     * "Out of bounds" console message.
     */
    pub(crate) fn out_of_range(index: usize, length: usize) -> Self {
        tracing::warn!(index, length, "out of bounds");
        Error::OutOfRange { index, length }
    }
}
