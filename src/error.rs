use thiserror::Error;

/// Error types for `StrictVec` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum StrictVecError {
    /// A required vector argument was absent
    #[error("Null passed to {operation} but non-null argument expected")]
    NullArgument {
        /// Name of the operation that received the absent argument
        operation: &'static str,
    },
    /// Index is outside the valid range for the operation
    #[error("Index out of range: index {index} is beyond vector length {length}")]
    IndexOutOfRange {
        /// Index that was accessed
        index: usize,
        /// Current length of the vector
        length: usize,
    },
    /// Requested capacity in bytes is not representable
    #[error("Capacity overflow: {capacity} elements of {element_size} bytes exceed the addressable size")]
    CapacityOverflow {
        /// Requested capacity in elements
        capacity: usize,
        /// Size of one element in bytes
        element_size: usize,
    },
    /// The allocator returned no memory
    #[error("Out of memory: failed to allocate {bytes} bytes")]
    OutOfMemory {
        /// Number of bytes requested from the allocator
        bytes: usize,
    },
    /// `grow` was asked for less than the current capacity
    #[error("Shrinking not supported: capacity {capacity} cannot shrink to {requested}")]
    ShrinkNotSupported {
        /// Current capacity in elements
        capacity: usize,
        /// Requested capacity in elements
        requested: usize,
    },
    /// The buffer pointers are inconsistent
    #[error("Corrupted vector state: {reason}")]
    CorruptedState {
        /// Which consistency rule was broken
        reason: &'static str,
    },
    /// Operation requires at least one element
    #[error("Cannot pop from empty vector")]
    EmptyContainer,
}

impl StrictVecError {
    /// Returns `true` for conditions that no policy can suppress.
    #[must_use]
    pub fn is_always_fatal(&self) -> bool {
        matches!(
            self,
            StrictVecError::OutOfMemory { .. }
                | StrictVecError::ShrinkNotSupported { .. }
                | StrictVecError::CorruptedState { .. }
                | StrictVecError::EmptyContainer
        )
    }
}
