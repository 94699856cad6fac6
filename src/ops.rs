//! Procedural interface over `StrictVec`.
//!
//! Each function takes the vector as an `Option`, so callers holding a
//! possibly-absent vector (for example across an FFI boundary) get the
//! policy's null handling: an absent vector is fatal unless
//! `P::SUPPRESS_NULL` is set, in which case the call does nothing and value
//! returning calls yield `T::default()`.
//!
//! ```
//! use strictvec::{ops, Lenient, StrictVec};
//!
//! let mut vec: StrictVec<i32, Lenient> = StrictVec::new();
//! ops::push(Some(&mut vec), 42);
//! ops::push(None::<&mut StrictVec<i32, Lenient>>, 13); // ignored
//! assert_eq!(ops::size(&vec), 1);
//! assert_eq!(ops::get(Some(&vec), 0), 42);
//! ```

use crate::alloc::RawAllocator;
use crate::core::StrictVec;
use crate::error::StrictVecError;
use crate::policy::{resolve, ErrorPolicy};

fn null_argument<P: ErrorPolicy>(operation: &'static str) {
    resolve::<P>(StrictVecError::NullArgument { operation });
}

/// Number of live elements.
#[must_use]
pub fn size<T: Copy, P: ErrorPolicy, A: RawAllocator>(vec: &StrictVec<T, P, A>) -> usize {
    vec.len()
}

/// Number of allocated slots.
#[must_use]
pub fn capacity<T: Copy, P: ErrorPolicy, A: RawAllocator>(vec: &StrictVec<T, P, A>) -> usize {
    vec.capacity()
}

pub fn init<T: Copy, P: ErrorPolicy, A: RawAllocator>(
    vec: Option<&mut StrictVec<T, P, A>>,
    capacity: usize,
) {
    match vec {
        Some(vec) => vec.init(capacity),
        None => null_argument::<P>("init"),
    }
}

pub fn free<T: Copy, P: ErrorPolicy, A: RawAllocator>(vec: Option<&mut StrictVec<T, P, A>>) {
    match vec {
        Some(vec) => vec.free(),
        None => null_argument::<P>("free"),
    }
}

pub fn grow<T: Copy, P: ErrorPolicy, A: RawAllocator>(
    vec: Option<&mut StrictVec<T, P, A>>,
    desired: usize,
) {
    match vec {
        Some(vec) => vec.grow(desired),
        None => null_argument::<P>("grow"),
    }
}

pub fn push<T: Copy, P: ErrorPolicy, A: RawAllocator>(
    vec: Option<&mut StrictVec<T, P, A>>,
    value: T,
) {
    match vec {
        Some(vec) => vec.push(value),
        None => null_argument::<P>("push"),
    }
}

pub fn pop<T: Copy + Default, P: ErrorPolicy, A: RawAllocator>(
    vec: Option<&mut StrictVec<T, P, A>>,
) -> T {
    match vec {
        Some(vec) => vec.pop(),
        None => {
            null_argument::<P>("pop");
            T::default()
        }
    }
}

pub fn get<T: Copy + Default, P: ErrorPolicy, A: RawAllocator>(
    vec: Option<&StrictVec<T, P, A>>,
    index: usize,
) -> T {
    match vec {
        Some(vec) => vec.get(index),
        None => {
            null_argument::<P>("get");
            T::default()
        }
    }
}

pub fn set<T: Copy, P: ErrorPolicy, A: RawAllocator>(
    vec: Option<&mut StrictVec<T, P, A>>,
    index: usize,
    value: T,
) {
    match vec {
        Some(vec) => vec.set(index, value),
        None => null_argument::<P>("set"),
    }
}

pub fn insert<T: Copy, P: ErrorPolicy, A: RawAllocator>(
    vec: Option<&mut StrictVec<T, P, A>>,
    index: usize,
    value: T,
) {
    match vec {
        Some(vec) => vec.insert(index, value),
        None => null_argument::<P>("insert"),
    }
}

pub fn delete<T: Copy, P: ErrorPolicy, A: RawAllocator>(
    vec: Option<&mut StrictVec<T, P, A>>,
    index: usize,
) {
    match vec {
        Some(vec) => vec.delete(index),
        None => null_argument::<P>("delete"),
    }
}

/// Copies `src` into `dest`; either being absent is a null argument.
pub fn duplicate<T: Copy, P: ErrorPolicy, A: RawAllocator>(
    dest: Option<&mut StrictVec<T, P, A>>,
    src: Option<&StrictVec<T, P, A>>,
) {
    match (dest, src) {
        (Some(dest), Some(src)) => dest.duplicate_from(src),
        _ => null_argument::<P>("duplicate"),
    }
}

pub fn clear<T: Copy, P: ErrorPolicy, A: RawAllocator>(vec: Option<&mut StrictVec<T, P, A>>) {
    match vec {
        Some(vec) => vec.clear(),
        None => null_argument::<P>("clear"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{catch_fatal, Lenient, Unwind};

    type Quiet = StrictVec<i32, Lenient>;
    type Loud = StrictVec<i32, Unwind>;

    #[test]
    fn test_present_vector_delegates() {
        let mut vec = Loud::new();
        push(Some(&mut vec), 1);
        push(Some(&mut vec), 3);
        insert(Some(&mut vec), 1, 2);
        assert_eq!(vec.as_slice(), &[1, 2, 3]);
        assert_eq!(pop(Some(&mut vec)), 3);
        assert_eq!(size(&vec), 2);
        assert_eq!(capacity(&vec), 8);
    }

    #[test]
    fn test_absent_vector_is_fatal_by_default() {
        let result = catch_fatal(|| push(None::<&mut Loud>, 1));
        assert_eq!(
            result,
            Err(StrictVecError::NullArgument { operation: "push" })
        );

        let result = catch_fatal(|| get(None::<&Loud>, 0));
        assert_eq!(result, Err(StrictVecError::NullArgument { operation: "get" }));
    }

    #[test]
    fn test_absent_vector_ignored_when_suppressed() {
        init(None::<&mut Quiet>, 4);
        grow(None::<&mut Quiet>, 4);
        push(None::<&mut Quiet>, 4);
        set(None::<&mut Quiet>, 0, 4);
        insert(None::<&mut Quiet>, 0, 4);
        delete(None::<&mut Quiet>, 0);
        clear(None::<&mut Quiet>);
        free(None::<&mut Quiet>);
        assert_eq!(pop(None::<&mut Quiet>), 0);
        assert_eq!(get(None::<&Quiet>, 3), 0);
    }

    #[test]
    fn test_duplicate_with_absent_side() {
        let src = Quiet::new();
        duplicate(None, Some(&src));

        let result = catch_fatal(|| {
            let mut dest = Loud::new();
            duplicate(Some(&mut dest), None);
        });
        assert_eq!(
            result,
            Err(StrictVecError::NullArgument {
                operation: "duplicate"
            })
        );
    }
}
