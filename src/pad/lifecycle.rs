//! Pad lifecycle: creation, restore, allocation and erasure.
//!
//! A [`Pad`] is the exclusive owner of a conversation's key material. Each
//! device drives one cursor through [`Pad::consume`] and learns about the
//! other one only from received messages via [`Pad::update_peer_consumption`].
//!
//! # Security
//! - **Zeroization**: key material lives in a `Zeroizing` buffer.
//! - **Usage Enforcement**: all allocations are mediated by [`Cursors`].
//! - **Forward Secrecy**: used ranges can be erased with [`Pad::zero_bytes_at`].

use zeroize::Zeroizing;

use super::{burn::burn_slice, Cursors, PadError, PadSize, Role};
use crate::entropy::{extract_expand, EntropySource};

/// Shared one-time key material plus its two consumption cursors.
pub struct Pad {
    data: Zeroizing<Vec<u8>>,
    cursors: Cursors,
}

impl Pad {
    /// Creates a fresh pad of class `size`, mixing `entropy` with bytes from `source`.
    pub fn create(
        entropy: &[u8],
        size: PadSize,
        source: &mut dyn EntropySource,
    ) -> Result<Self, PadError> {
        let mut data = Zeroizing::new(vec![0u8; size.bytes()]);
        extract_expand(entropy, source, &mut data).map_err(|_| PadError::EntropyFailure)?;
        log::info!("created {:?} pad ({} bytes)", size, data.len());
        Ok(Self {
            cursors: Cursors::new(data.len() as u64),
            data,
        })
    }

    /// Creates a pad of `size_bytes`, which must match a supported class.
    ///
    /// # Errors
    /// Returns `PadError::InvalidSize` for unsupported sizes.
    pub fn create_with_size(
        entropy: &[u8],
        size_bytes: usize,
        source: &mut dyn EntropySource,
    ) -> Result<Self, PadError> {
        Self::create(entropy, PadSize::from_bytes(size_bytes)?, source)
    }

    /// Reconstructs a pad from persisted bytes and cursor state.
    ///
    /// Any length is accepted here: restored pads include ones received through
    /// a ceremony and test fixtures.
    ///
    /// # Errors
    /// Returns `PadError::InvalidState` if `consumed_front + consumed_back > bytes.len()`.
    pub fn restore(
        bytes: Vec<u8>,
        consumed_front: u64,
        consumed_back: u64,
    ) -> Result<Self, PadError> {
        let data = Zeroizing::new(bytes);
        let cursors = Cursors::restore(data.len() as u64, consumed_front, consumed_back)?;
        Ok(Self { data, cursors })
    }

    /// True iff `length` bytes can currently be allocated for `role`.
    pub fn can_send(&self, length: u64, _role: Role) -> bool {
        length <= self.cursors.remaining()
    }

    /// Largest allocation `role` could make right now.
    pub fn available_for_sending(&self, _role: Role) -> u64 {
        self.cursors.remaining()
    }

    /// Offset where the next allocation for `role` begins.
    pub fn next_send_offset(&self, role: Role) -> u64 {
        self.cursors.next_offset(role)
    }

    /// Allocates `length` bytes from `role`'s end of the pad.
    ///
    /// The returned slice is never handed out again by this pad.
    ///
    /// # Errors
    /// * `PadError::Exhausted` if `length > remaining()`.
    pub fn consume(&mut self, length: u64, role: Role) -> Result<&[u8], PadError> {
        let start = self.cursors.consume(length, role)?;
        log::trace!("{:?} consumed {} bytes at offset {}", role, length, start);
        // Cursor invariant keeps the range inside the buffer.
        let start = start as usize;
        Ok(&self.data[start..start + length as usize])
    }

    /// Raises the cursor owned by `peer_role` to `consumed_amount`, never lowering it.
    ///
    /// Stale or replayed reports are ignored.
    ///
    /// # Errors
    /// Returns `PadError::InvalidState` if the report would overlap the other cursor.
    pub fn update_peer_consumption(
        &mut self,
        peer_role: Role,
        consumed_amount: u64,
    ) -> Result<(), PadError> {
        let before = self.cursors.consumed_by(peer_role);
        match self.cursors.advance_to(peer_role, consumed_amount) {
            Ok(true) => {
                log::trace!("{:?} cursor advanced {} -> {}", peer_role, before, consumed_amount);
                Ok(())
            }
            Ok(false) => {
                if consumed_amount < before {
                    log::debug!(
                        "ignoring stale {:?} consumption report {} (cursor at {})",
                        peer_role,
                        consumed_amount,
                        before
                    );
                }
                Ok(())
            }
            Err(e) => {
                log::warn!("rejected {:?} consumption report: {}", peer_role, e);
                Err(e)
            }
        }
    }

    /// Overwrites `[offset, offset + length)` with zeros. Cursors are unaffected.
    ///
    /// Returns `false` (and changes nothing) if the range is out of bounds.
    pub fn zero_bytes_at(&mut self, offset: u64, length: u64) -> bool {
        match Self::range(offset, length, self.data.len()) {
            Some((start, end)) => {
                burn_slice(&mut self.data[start..end]);
                true
            }
            None => {
                log::warn!(
                    "zero_bytes_at out of bounds: offset {} length {} (pad {})",
                    offset,
                    length,
                    self.data.len()
                );
                false
            }
        }
    }

    /// Borrows `[offset, offset + length)` without touching the cursors.
    pub fn bytes_at(&self, offset: u64, length: u64) -> Option<&[u8]> {
        Self::range(offset, length, self.data.len()).map(|(start, end)| &self.data[start..end])
    }

    /// Destroys all key material. Cursors are left as they were.
    pub fn wipe(&mut self) {
        burn_slice(&mut self.data);
        log::info!("pad wiped ({} bytes)", self.data.len());
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn total_size(&self) -> u64 {
        self.cursors.total()
    }

    pub fn consumed_front(&self) -> u64 {
        self.cursors.front()
    }

    pub fn consumed_back(&self) -> u64 {
        self.cursors.back()
    }

    pub fn remaining(&self) -> u64 {
        self.cursors.remaining()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    pub fn cursors(&self) -> &Cursors {
        &self.cursors
    }

    fn range(offset: u64, length: u64, len: usize) -> Option<(usize, usize)> {
        let end = offset.checked_add(length)?;
        if end > len as u64 {
            return None;
        }
        Some((offset as usize, end as usize))
    }
}

impl std::fmt::Debug for Pad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pad")
            .field("data", &"[REDACTED]")
            .field("cursors", &self.cursors)
            .finish()
    }
}
