//! Allocator seam for `StrictVec` buffers.
//!
//! A custom allocator replaces both the allocating and the deallocating half
//! at once: [`RawAllocator`] has no provided methods, so an implementation
//! always supplies the pair together.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

/// Allocator/deallocator pair used for a vector's single heap buffer.
///
/// # Safety
///
/// Implementations must return either `None` or a pointer to a block that is
/// valid for reads and writes of `new_layout.size()` bytes and aligned to
/// `new_layout.align()`. When reallocating, the first
/// `min(old.size(), new_layout.size())` bytes of the old block must be
/// preserved, and a failed reallocation must leave the old block untouched.
pub unsafe trait RawAllocator {
    /// Allocates a fresh block when `current` is `None`, otherwise resizes
    /// the block described by `current`.
    ///
    /// Returns `None` on allocation failure.
    ///
    /// # Safety
    ///
    /// `current`, when present, must describe a block previously returned by
    /// this allocator and not yet deallocated. `new_layout` must have a
    /// non-zero size and the same alignment as the current block.
    unsafe fn reallocate(
        &self,
        current: Option<(NonNull<u8>, Layout)>,
        new_layout: Layout,
    ) -> Option<NonNull<u8>>;

    /// Releases a block.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator with `layout`, and not
    /// already deallocated.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The process-wide allocator from `std::alloc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Global;

unsafe impl RawAllocator for Global {
    unsafe fn reallocate(
        &self,
        current: Option<(NonNull<u8>, Layout)>,
        new_layout: Layout,
    ) -> Option<NonNull<u8>> {
        let raw = match current {
            None => alloc::alloc(new_layout),
            Some((ptr, old_layout)) => alloc::realloc(ptr.as_ptr(), old_layout, new_layout.size()),
        };
        NonNull::new(raw)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        alloc::dealloc(ptr.as_ptr(), layout);
    }
}
