//! Growable backing store for one message's wire bytes.
//!
//! Every byte of a message — start line, headers, body — lives in a single
//! contiguous arena, so the wire form is always available without a separate
//! encode pass. All fields reference the arena through offset-based spans:
//! growth may move the allocation, so absolute addresses are never held
//! across a mutating call.

use crate::protocol::AllocError;
use tracing::trace;

/// Initial arena capacity for serializer-built messages.
pub(crate) const INIT_ARENA_SIZE: usize = 100;

/// A growable byte buffer with explicit, recoverable growth.
///
/// The used length is `data.len()`; capacity only grows, by doubling, and
/// never shrinks. A failed growth leaves the arena untouched.
#[derive(Debug)]
pub(crate) struct Arena {
    data: Vec<u8>,
}

impl Arena {
    /// Creates an arena with at least `capacity` bytes reserved.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity).map_err(|source| AllocError::new(capacity, source))?;
        Ok(Self { data })
    }

    /// Ensures capacity for `additional` bytes beyond the used length,
    /// doubling the current capacity until it fits.
    ///
    /// On failure nothing changes: the used length and the prior capacity
    /// both remain valid.
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        let needed = match self.data.len().checked_add(additional) {
            Some(needed) => needed,
            // cannot ever fit; let Vec report the capacity overflow
            None => {
                return match self.data.try_reserve_exact(additional) {
                    Ok(()) => Ok(()),
                    Err(source) => Err(AllocError::new(additional, source)),
                };
            }
        };

        if needed <= self.data.capacity() {
            return Ok(());
        }

        let mut target = self.data.capacity().max(1);
        while target < needed {
            target = target.saturating_mul(2);
        }

        self.data
            .try_reserve_exact(target - self.data.len())
            .map_err(|source| AllocError::new(additional, source))?;

        trace!(capacity = self.data.capacity(), used = self.data.len(), "arena grown");
        Ok(())
    }

    /// Appends `bytes` at the end of the used region.
    ///
    /// Space must have been reserved beforehand.
    pub(crate) fn extend_from_slice(&mut self, bytes: &[u8]) {
        debug_assert!(self.data.len() + bytes.len() <= self.data.capacity());
        self.data.extend_from_slice(bytes);
    }

    /// Moves the byte range `[from, used_len)` forward by `by` bytes,
    /// extending the used length and opening a gap at `from` for insertion.
    ///
    /// The caller must have reserved `by` bytes and is expected to overwrite
    /// the gap immediately.
    pub(crate) fn shift_right(&mut self, from: usize, by: usize) {
        let old_len = self.data.len();
        debug_assert!(from <= old_len);
        debug_assert!(old_len + by <= self.data.capacity());
        self.data.resize(old_len + by, 0);
        self.data.copy_within(from..old_len, from + by);
    }

    /// Overwrites an in-bounds range starting at `offset`.
    pub(crate) fn write_at(&mut self, offset: usize, bytes: &[u8]) {
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// The used length: bytes written so far, not the allocated capacity.
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub(crate) fn into_vec(self) -> Vec<u8> {
        self.data
    }
}
