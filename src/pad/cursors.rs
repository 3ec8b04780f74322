//! Bidirectional Consumption Cursors.
//!
//! Tracks how many bytes each role has consumed from its end of the pad.
//! Both counters only ever grow, and their sum never exceeds the pad length.
//!
//! # Security
//! - **Bounds Checking**: `front + back <= total` is checked before every mutation.
//! - **Monotonicity**: a cursor never decreases, so no byte is handed out twice.

use super::{PadError, Role};

/// Consumption state of a pad: two counters growing toward each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursors {
    total: u64,
    front: u64,
    back: u64,
}

impl Cursors {
    /// Fresh cursors for a pad of `total` bytes.
    pub fn new(total: u64) -> Self {
        Self { total, front: 0, back: 0 }
    }

    /// Cursors restored from persisted state.
    ///
    /// # Errors
    /// Returns `PadError::InvalidState` if `front + back > total`.
    pub fn restore(total: u64, front: u64, back: u64) -> Result<Self, PadError> {
        let cursors = Self { total, front, back };
        cursors.check(front, back)?;
        Ok(cursors)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn front(&self) -> u64 {
        self.front
    }

    pub fn back(&self) -> u64 {
        self.back
    }

    /// Bytes not yet claimed by either role.
    pub fn remaining(&self) -> u64 {
        // Invariant guarantees no underflow.
        self.total - self.front - self.back
    }

    /// Cursor value owned by `role`.
    pub fn consumed_by(&self, role: Role) -> u64 {
        match role {
            Role::Initiator => self.front,
            Role::Responder => self.back,
        }
    }

    /// Offset at which the next allocation for `role` starts.
    pub fn next_offset(&self, role: Role) -> u64 {
        match role {
            Role::Initiator => self.front,
            Role::Responder => self.total - self.back,
        }
    }

    /// Reserves `amount` bytes for `role` and returns the start offset of the range.
    ///
    /// # Errors
    /// Returns `PadError::Exhausted` if `amount > remaining()`; state is left unchanged.
    pub fn consume(&mut self, amount: u64, role: Role) -> Result<u64, PadError> {
        let remaining = self.remaining();
        if amount > remaining {
            return Err(PadError::Exhausted { requested: amount, remaining });
        }
        let start = match role {
            Role::Initiator => {
                let start = self.front;
                self.front += amount;
                start
            }
            Role::Responder => {
                self.back += amount;
                self.total - self.back
            }
        };
        Ok(start)
    }

    /// Raises the cursor owned by `role` to `consumed`, never lowering it.
    ///
    /// Returns `true` if the cursor moved.
    ///
    /// # Errors
    /// Returns `PadError::InvalidState` if the raised cursor would overlap the other one.
    pub fn advance_to(&mut self, role: Role, consumed: u64) -> Result<bool, PadError> {
        if consumed <= self.consumed_by(role) {
            return Ok(false);
        }
        match role {
            Role::Initiator => {
                self.check(consumed, self.back)?;
                self.front = consumed;
            }
            Role::Responder => {
                self.check(self.front, consumed)?;
                self.back = consumed;
            }
        }
        Ok(true)
    }

    fn check(&self, front: u64, back: u64) -> Result<(), PadError> {
        match front.checked_add(back) {
            Some(sum) if sum <= self.total => Ok(()),
            _ => Err(PadError::InvalidState { front, back, total: self.total }),
        }
    }
}
