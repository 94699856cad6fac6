use std::iter::FusedIterator;
use std::slice;

use crate::alloc::{Global, RawAllocator};
use crate::core::StrictVec;
use crate::policy::ErrorPolicy;

/// Iterator over the elements of a `StrictVec`
///
/// Walks the buffer from `begin` to `end` directly, without per-element
/// bounds checks. This iterator implements `Clone`.
#[derive(Clone, Debug)]
pub struct StrictVecIter<'a, T> {
    inner: slice::Iter<'a, T>,
}

impl<'a, T> StrictVecIter<'a, T> {
    pub(crate) fn new(elements: &'a [T]) -> Self {
        Self {
            inner: elements.iter(),
        }
    }

    /// Remaining elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &'a [T] {
        self.inner.as_slice()
    }
}

impl<'a, T> Iterator for StrictVecIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for StrictVecIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for StrictVecIter<'_, T> {}

impl<T> FusedIterator for StrictVecIter<'_, T> {}

impl<'a, T: Copy, P: ErrorPolicy, A: RawAllocator> IntoIterator for &'a StrictVec<T, P, A> {
    type Item = &'a T;
    type IntoIter = StrictVecIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Copy, P: ErrorPolicy, A: RawAllocator> IntoIterator for &'a mut StrictVec<T, P, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: Copy, P: ErrorPolicy, A: RawAllocator> Extend<T> for StrictVec<T, P, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a, P: ErrorPolicy, A: RawAllocator> Extend<&'a T> for StrictVec<T, P, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for value in iter {
            self.push(*value);
        }
    }
}

impl<T: Copy, P: ErrorPolicy> FromIterator<T> for StrictVec<T, P, Global> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}
