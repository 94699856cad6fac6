//! `StrictVec`: a contiguous growable array with an explicit failure policy.
//!
//! `StrictVec` stores plain `Copy` elements in a single owned heap buffer and
//! tracks it with three pointers (`begin`, `end`, `end_of_storage`). Length
//! and capacity are derived from those pointers, never stored separately.
//!
//! # Performance Characteristics
//!
//! - `push()`: O(1) amortized, capacity doubles when full
//! - `pop()`, `get()`, `set()`, `clear()`: O(1)
//! - `insert()`, `delete()`: O(n - index), elements are shifted in place
//! - `grow()`: one reallocation to an exact capacity
//! - `duplicate_from()`: one allocation of the source *capacity* plus one copy
//! - Iteration walks the buffer directly
//!
//! Capacity never shrinks. An unallocated vector (`StrictVec::new()`) owns no
//! memory; the first `push` allocates [`DEFAULT_CAPACITY`] slots.
//!
//! # Failure Policy
//!
//! Every operation exists twice:
//!
//! - `try_*` methods return `Result<_, StrictVecError>` and change nothing on error.
//! - Plain methods hand errors to the vector's [`ErrorPolicy`]. Null, out-of-bounds
//!   and overflow conditions may be configured as no-ops; everything else is fatal.
//!
//! ```
//! use strictvec::StrictVec;
//!
//! let mut numbers: StrictVec<i32> = StrictVec::new();
//! numbers.push(10);
//! numbers.push(20);
//! numbers.push(30);
//! numbers.push(40);
//! numbers.push(50);
//!
//! assert_eq!(numbers.get(0), 10);
//! assert_eq!(numbers.get(numbers.len() - 1), 50);
//!
//! numbers.insert(2, 25);
//! assert_eq!(numbers.as_slice(), &[10, 20, 25, 30, 40, 50]);
//!
//! assert_eq!(numbers.pop(), 50);
//! numbers.delete(1);
//! numbers.set(0, 99);
//! assert_eq!(numbers.as_slice(), &[99, 25, 30, 40]);
//!
//! numbers.clear();
//! assert_eq!(numbers.len(), 0);
//! assert_eq!(numbers.capacity(), 8);
//!
//! numbers.free();
//! assert!(!numbers.is_allocated());
//! ```
//!
//! The checked tier reports the same conditions as values:
//!
//! ```
//! use strictvec::{StrictVec, StrictVecError};
//!
//! let mut vec: StrictVec<u8> = StrictVec::with_capacity(10);
//! assert_eq!(
//!     vec.try_get(0),
//!     Err(StrictVecError::IndexOutOfRange { index: 0, length: 0 })
//! );
//! assert_eq!(
//!     vec.try_grow(5),
//!     Err(StrictVecError::ShrinkNotSupported { capacity: 10, requested: 5 })
//! );
//! assert_eq!(vec.try_pop(), Err(StrictVecError::EmptyContainer));
//! ```
//!
//! # Custom Allocators
//!
//! A [`RawAllocator`] supplies the reallocating and deallocating halves
//! together. Allocation failure is always fatal.
//!
//! # Threading
//!
//! `StrictVec` is single-threaded: it is neither `Send` nor `Sync`.

pub mod alloc;
mod core;
mod error;
mod iter;
pub mod ops;
pub mod policy;

// Re-export public types and traits
pub use crate::alloc::{Global, RawAllocator};
pub use crate::core::{StrictVec, DEFAULT_CAPACITY, GROWTH_FACTOR};
pub use error::StrictVecError;
pub use iter::StrictVecIter;
pub use policy::{abort_with, catch_fatal, ErrorPolicy, Lenient, Strict, Unwind};
