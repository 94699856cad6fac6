use std::alloc::Layout;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

use crate::alloc::{Global, RawAllocator};
use crate::error::StrictVecError;
use crate::iter::StrictVecIter;
use crate::policy::{resolve, ErrorPolicy, Strict};

/// Capacity given to an unallocated vector by its first `push`.
pub const DEFAULT_CAPACITY: usize = 8;
/// Multiplier applied to the capacity when `push` or `insert` runs out of room.
pub const GROWTH_FACTOR: usize = 2;

/// A contiguous growable array over a single owned heap buffer.
///
/// The buffer is tracked by three pointers: `begin`, `end` (one past the last
/// element) and `end_of_storage` (one past the last slot). Length and
/// capacity are derived from them. Either all three are null (the
/// unallocated state, which is also the `new()` state) or none is.
///
/// Failures of the plain methods are handled by the policy `P`; the `try_`
/// methods report them as `Err` and leave the vector untouched.
pub struct StrictVec<T: Copy, P: ErrorPolicy = Strict, A: RawAllocator = Global> {
    begin: *mut T,
    end: *mut T,
    end_of_storage: *mut T,
    alloc: A,
    policy: PhantomData<P>,
}

impl<T: Copy, P: ErrorPolicy> StrictVec<T, P, Global> {
    /// Creates an unallocated vector using the global allocator.
    #[must_use]
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates a vector and allocates room for exactly `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut vec = Self::new();
        vec.init(capacity);
        vec
    }
}

impl<T: Copy, P: ErrorPolicy> Default for StrictVec<T, P, Global> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, P: ErrorPolicy, A: RawAllocator> StrictVec<T, P, A> {
    const ELEMENT_SIZE: usize = {
        assert!(
            mem::size_of::<T>() != 0,
            "zero-sized element types are not supported"
        );
        mem::size_of::<T>()
    };

    /// Creates an unallocated vector that will draw memory from `alloc`.
    #[must_use]
    pub const fn new_in(alloc: A) -> Self {
        Self {
            begin: ptr::null_mut(),
            end: ptr::null_mut(),
            end_of_storage: ptr::null_mut(),
            alloc,
            policy: PhantomData,
        }
    }

    fn distance(from: *mut T, to: *mut T) -> usize {
        (to as usize).wrapping_sub(from as usize) / Self::ELEMENT_SIZE
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        Self::distance(self.begin, self.end)
    }

    /// Number of allocated element slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        Self::distance(self.begin, self.end_of_storage)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Returns `true` once a buffer has been allocated.
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        !self.begin.is_null()
    }

    #[must_use]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Raw pointer to the first slot, or null when unallocated.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.begin
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        if self.begin.is_null() {
            return &[];
        }
        // SAFETY: `begin..end` holds `len()` initialized elements of one live allocation.
        unsafe { slice::from_raw_parts(self.begin, self.len()) }
    }

    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.begin.is_null() {
            return &mut [];
        }
        // SAFETY: as in `as_slice`, and `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.begin, self.len()) }
    }

    /// Returns an iterator walking the elements in buffer order.
    #[must_use]
    pub fn iter(&self) -> StrictVecIter<'_, T> {
        StrictVecIter::new(self.as_slice())
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Verifies the buffer invariants: all pointers null or none, and
    /// `begin <= end <= end_of_storage`.
    ///
    /// # Errors
    ///
    /// Returns `StrictVecError::CorruptedState` if an invariant is broken.
    pub fn check_invariants(&self) -> Result<(), StrictVecError> {
        if self.begin.is_null() {
            if self.end.is_null() && self.end_of_storage.is_null() {
                return Ok(());
            }
            return Err(StrictVecError::CorruptedState {
                reason: "buffer pointers are partially null",
            });
        }
        if self.end.is_null() || self.end_of_storage.is_null() {
            return Err(StrictVecError::CorruptedState {
                reason: "buffer pointers are partially null",
            });
        }
        if self.begin > self.end || self.end > self.end_of_storage {
            return Err(StrictVecError::CorruptedState {
                reason: "buffer pointers are out of order",
            });
        }
        Ok(())
    }

    fn layout_for(capacity: usize) -> Result<Layout, StrictVecError> {
        let overflow = || StrictVecError::CapacityOverflow {
            capacity,
            element_size: Self::ELEMENT_SIZE,
        };
        let bytes = capacity.checked_mul(Self::ELEMENT_SIZE).ok_or_else(overflow)?;
        Layout::from_size_align(bytes, mem::align_of::<T>()).map_err(|_| overflow())
    }

    fn grown_capacity(capacity: usize) -> Result<usize, StrictVecError> {
        capacity
            .checked_mul(GROWTH_FACTOR)
            .ok_or(StrictVecError::CapacityOverflow {
                capacity: usize::MAX,
                element_size: Self::ELEMENT_SIZE,
            })
    }

    /// The live block and its layout, if any.
    fn current_block(&self) -> Result<Option<(NonNull<u8>, Layout)>, StrictVecError> {
        let Some(begin) = NonNull::new(self.begin) else {
            return Ok(None);
        };
        let layout = Self::layout_for(self.capacity()).map_err(|_| StrictVecError::CorruptedState {
            reason: "capacity does not describe a valid allocation",
        })?;
        Ok(Some((begin.cast(), layout)))
    }

    fn allocate(
        &self,
        current: Option<(NonNull<u8>, Layout)>,
        layout: Layout,
    ) -> Result<*mut T, StrictVecError> {
        // SAFETY: `current` comes from `current_block`, so it was produced by
        // `self.alloc` with that layout. `layout` is non-empty because every
        // caller requests at least one slot of a non-zero-sized type.
        let block = unsafe { self.alloc.reallocate(current, layout) };
        block
            .map(|block| block.as_ptr().cast::<T>())
            .ok_or(StrictVecError::OutOfMemory {
                bytes: layout.size(),
            })
    }

    fn release_block(&self, block: Option<(NonNull<u8>, Layout)>) {
        if let Some((ptr, layout)) = block {
            // SAFETY: the block was detached from this vector by the caller and
            // is deallocated exactly once.
            unsafe { self.alloc.deallocate(ptr, layout) };
            tracing::trace!(bytes = layout.size(), "vector buffer released");
        }
    }

    fn reset(&mut self) {
        self.begin = ptr::null_mut();
        self.end = ptr::null_mut();
        self.end_of_storage = ptr::null_mut();
    }

    /// Allocates exactly `capacity` slots for an unallocated vector.
    ///
    /// A zero `capacity` leaves the vector unallocated.
    ///
    /// # Errors
    ///
    /// - `StrictVecError::CorruptedState` if any buffer pointer is already set
    /// - `StrictVecError::CapacityOverflow` if `capacity` bytes are not representable
    /// - `StrictVecError::OutOfMemory` if the allocator fails
    pub fn try_init(&mut self, capacity: usize) -> Result<(), StrictVecError> {
        if !self.begin.is_null() || !self.end.is_null() || !self.end_of_storage.is_null() {
            return Err(StrictVecError::CorruptedState {
                reason: "init requires an unallocated vector",
            });
        }
        if capacity == 0 {
            return Ok(());
        }

        let layout = Self::layout_for(capacity)?;
        let begin = self.allocate(None, layout)?;

        self.begin = begin;
        self.end = begin;
        // SAFETY: the block holds exactly `capacity` slots.
        self.end_of_storage = unsafe { begin.add(capacity) };
        tracing::trace!(capacity, "vector buffer allocated");
        Ok(())
    }

    /// Sets the capacity to exactly `desired`, keeping every element.
    ///
    /// # Errors
    ///
    /// - `StrictVecError::CapacityOverflow` if `desired` bytes are not representable
    /// - `StrictVecError::ShrinkNotSupported` if `desired` is below the current capacity
    /// - `StrictVecError::OutOfMemory` if the allocator fails
    /// - `StrictVecError::CorruptedState` if the buffer invariants are broken
    pub fn try_grow(&mut self, desired: usize) -> Result<(), StrictVecError> {
        self.check_invariants()?;
        let layout = Self::layout_for(desired)?;

        let capacity = self.capacity();
        if capacity == desired {
            return Ok(());
        }
        if capacity > desired {
            return Err(StrictVecError::ShrinkNotSupported {
                capacity,
                requested: desired,
            });
        }

        let size = self.len();
        let current = self.current_block()?;
        let begin = self.allocate(current, layout)?;

        self.begin = begin;
        // SAFETY: the new block holds `desired` slots and `size <= capacity < desired`.
        unsafe {
            self.end = begin.add(size);
            self.end_of_storage = begin.add(desired);
        }
        tracing::trace!(from = capacity, to = desired, "vector buffer reallocated");
        Ok(())
    }

    /// Appends `value`, allocating `DEFAULT_CAPACITY` slots on first use and
    /// doubling the capacity when full.
    ///
    /// # Errors
    ///
    /// Propagates the errors of `try_init` and `try_grow`.
    pub fn try_push(&mut self, value: T) -> Result<(), StrictVecError> {
        self.check_invariants()?;
        if self.begin.is_null() {
            self.try_init(DEFAULT_CAPACITY)?;
        }
        if self.len() >= self.capacity() {
            self.try_grow(Self::grown_capacity(self.capacity())?)?;
        }

        // SAFETY: `end < end_of_storage` after the growth above.
        unsafe {
            self.end.write(value);
            self.end = self.end.add(1);
        }
        Ok(())
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns `StrictVecError::EmptyContainer` if the vector is empty.
    pub fn try_pop(&mut self) -> Result<T, StrictVecError> {
        self.check_invariants()?;
        if self.begin == self.end {
            return Err(StrictVecError::EmptyContainer);
        }

        // SAFETY: the vector is non-empty, so `end - 1` is a live element.
        unsafe {
            self.end = self.end.sub(1);
            Ok(self.end.read())
        }
    }

    /// Returns a copy of the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `StrictVecError::IndexOutOfRange` if `index >= len()`.
    pub fn try_get(&self, index: usize) -> Result<T, StrictVecError> {
        self.check_invariants()?;
        let length = self.len();
        if index >= length {
            return Err(StrictVecError::IndexOutOfRange { index, length });
        }
        // SAFETY: `index < len()`.
        Ok(unsafe { *self.begin.add(index) })
    }

    /// Overwrites the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `StrictVecError::IndexOutOfRange` if `index >= len()`.
    pub fn try_set(&mut self, index: usize, value: T) -> Result<(), StrictVecError> {
        self.check_invariants()?;
        let length = self.len();
        if index >= length {
            return Err(StrictVecError::IndexOutOfRange { index, length });
        }
        // SAFETY: `index < len()`.
        unsafe { *self.begin.add(index) = value };
        Ok(())
    }

    /// Inserts `value` at `index`, shifting later elements one slot right.
    ///
    /// `index == len()` appends. When full, the capacity becomes
    /// `max(capacity, 1) * GROWTH_FACTOR`.
    ///
    /// # Errors
    ///
    /// Returns `StrictVecError::IndexOutOfRange` if `index > len()`, and
    /// propagates the errors of `try_grow`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), StrictVecError> {
        self.check_invariants()?;
        let size = self.len();
        if index > size {
            return Err(StrictVecError::IndexOutOfRange {
                index,
                length: size,
            });
        }

        let capacity = self.capacity();
        if size >= capacity {
            self.try_grow(Self::grown_capacity(capacity.max(1))?)?;
        }

        // SAFETY: `index <= size < capacity`, so the shifted range and the
        // written slot stay inside the buffer. `ptr::copy` handles the overlap.
        unsafe {
            let slot = self.begin.add(index);
            if slot != self.end {
                ptr::copy(slot, slot.add(1), size - index);
            }
            slot.write(value);
            self.end = self.end.add(1);
        }
        Ok(())
    }

    /// Removes the element at `index`, shifting later elements one slot left.
    ///
    /// Removing the last element only moves `end`. Capacity is kept.
    ///
    /// # Errors
    ///
    /// Returns `StrictVecError::IndexOutOfRange` if `index >= len()`.
    pub fn try_delete(&mut self, index: usize) -> Result<(), StrictVecError> {
        self.check_invariants()?;
        let size = self.len();
        if index >= size {
            return Err(StrictVecError::IndexOutOfRange {
                index,
                length: size,
            });
        }

        // SAFETY: `index < size`, so `index + 1..size` are live elements.
        unsafe {
            if index + 1 != size {
                let slot = self.begin.add(index);
                ptr::copy(slot.add(1), slot, size - index - 1);
            }
            self.end = self.end.sub(1);
        }
        Ok(())
    }

    /// Replaces the contents of `self` with an independent copy of `src`,
    /// matching both its elements and its capacity.
    ///
    /// A buffer already owned by `self` is released once the copy is in place.
    ///
    /// # Errors
    ///
    /// Returns `StrictVecError::OutOfMemory` if the allocator fails (`self` is
    /// left unchanged), or `StrictVecError::CorruptedState` if either vector
    /// is inconsistent.
    pub fn try_duplicate_from(&mut self, src: &Self) -> Result<(), StrictVecError> {
        src.check_invariants()?;
        self.check_invariants()?;

        let previous = self.current_block()?;
        let capacity = src.capacity();
        if capacity == 0 {
            self.reset();
            self.release_block(previous);
            return Ok(());
        }

        let layout = Self::layout_for(capacity)?;
        let begin = self.allocate(None, layout)?;
        let size = src.len();

        // SAFETY: the fresh block holds `capacity >= size` slots and cannot
        // overlap `src`, which owns a different live block.
        unsafe {
            ptr::copy_nonoverlapping(src.begin, begin, size);
            self.begin = begin;
            self.end = begin.add(size);
            self.end_of_storage = begin.add(capacity);
        }
        self.release_block(previous);
        Ok(())
    }

    /// Drops every element while keeping the capacity.
    ///
    /// # Errors
    ///
    /// Returns `StrictVecError::CorruptedState` if the buffer invariants are broken.
    pub fn try_clear(&mut self) -> Result<(), StrictVecError> {
        self.check_invariants()?;
        self.end = self.begin;
        Ok(())
    }

    /// Releases the buffer and returns to the unallocated state.
    ///
    /// # Errors
    ///
    /// Returns `StrictVecError::CorruptedState` if the buffer invariants are broken.
    pub fn try_free(&mut self) -> Result<(), StrictVecError> {
        self.check_invariants()?;
        let block = self.current_block()?;
        self.reset();
        self.release_block(block);
        Ok(())
    }

    /// Allocates exactly `capacity` slots. See [`Self::try_init`].
    pub fn init(&mut self, capacity: usize) {
        if let Err(error) = self.try_init(capacity) {
            resolve::<P>(error);
        }
    }

    /// Sets the capacity to exactly `desired`. See [`Self::try_grow`].
    ///
    /// Shrinking is always fatal, whatever the policy.
    pub fn grow(&mut self, desired: usize) {
        if let Err(error) = self.try_grow(desired) {
            resolve::<P>(error);
        }
    }

    /// Appends `value`. See [`Self::try_push`].
    ///
    /// When the policy suppresses a capacity overflow, the value is discarded.
    pub fn push(&mut self, value: T) {
        if let Err(error) = self.try_push(value) {
            resolve::<P>(error);
        }
    }

    /// Removes and returns the last element.
    ///
    /// Popping an empty vector is always fatal.
    pub fn pop(&mut self) -> T {
        self.try_pop().unwrap_or_else(|error| P::fatal(error))
    }

    /// Returns a copy of the element at `index`, or `T::default()` when the
    /// policy suppresses an out-of-range index.
    pub fn get(&self, index: usize) -> T
    where
        T: Default,
    {
        self.try_get(index).unwrap_or_else(|error| {
            resolve::<P>(error);
            T::default()
        })
    }

    pub fn set(&mut self, index: usize, value: T) {
        if let Err(error) = self.try_set(index, value) {
            resolve::<P>(error);
        }
    }

    /// Inserts `value` at `index`. See [`Self::try_insert`].
    pub fn insert(&mut self, index: usize, value: T) {
        if let Err(error) = self.try_insert(index, value) {
            resolve::<P>(error);
        }
    }

    /// Removes the element at `index`. See [`Self::try_delete`].
    pub fn delete(&mut self, index: usize) {
        if let Err(error) = self.try_delete(index) {
            resolve::<P>(error);
        }
    }

    /// Copies `src` into `self`. See [`Self::try_duplicate_from`].
    pub fn duplicate_from(&mut self, src: &Self) {
        if let Err(error) = self.try_duplicate_from(src) {
            resolve::<P>(error);
        }
    }

    pub fn clear(&mut self) {
        if let Err(error) = self.try_clear() {
            resolve::<P>(error);
        }
    }

    /// Releases the buffer. Calling it again is a no-op.
    pub fn free(&mut self) {
        if let Err(error) = self.try_free() {
            resolve::<P>(error);
        }
    }
}

impl<T: Copy, P: ErrorPolicy, A: RawAllocator> Drop for StrictVec<T, P, A> {
    fn drop(&mut self) {
        // A corrupted buffer is leaked rather than handed to the allocator.
        if self.check_invariants().is_err() {
            return;
        }
        if let Ok(block) = self.current_block() {
            self.reset();
            self.release_block(block);
        }
    }
}

impl<T: Copy, P: ErrorPolicy, A: RawAllocator + Clone> Clone for StrictVec<T, P, A> {
    fn clone(&self) -> Self {
        let mut dest = Self::new_in(self.alloc.clone());
        dest.duplicate_from(self);
        dest
    }

    fn clone_from(&mut self, source: &Self) {
        self.duplicate_from(source);
    }
}

impl<T: Copy + fmt::Debug, P: ErrorPolicy, A: RawAllocator> fmt::Debug for StrictVec<T, P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrictVec")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("elements", &self.as_slice())
            .finish()
    }
}

impl<T: Copy + PartialEq, P: ErrorPolicy, A: RawAllocator> PartialEq for StrictVec<T, P, A> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Copy + Eq, P: ErrorPolicy, A: RawAllocator> Eq for StrictVec<T, P, A> {}
