use thiserror::Error;

/// The error type for fallible list and cursor operations.
///
/// Every operation checks its preconditions before touching any link, so a
/// returned error always means the list is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ListError {
    /// The index is outside the range accepted by the operation: `0..len` for
    /// reads, writes and removals, `0..=len` for insertions and cursors.
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// A cursor was stepped past either end of the list.
    #[error("no element in the requested direction")]
    NoSuchElement,
    /// `set` or `remove` was called on a cursor that has not returned an
    /// element since it was created or last mutated.
    #[error("the cursor has no last returned element")]
    IllegalState,
    /// The first or last element of an empty list was requested.
    #[error("the list is empty")]
    EmptyList,
}

impl ListError {
    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        trace_event!(index, len, "index out of range");
        ListError::IndexOutOfRange { index, len }
    }
}

/// A `Result` alias defaulting to [`ListError`].
pub type Result<T, E = ListError> = std::result::Result<T, E>;
