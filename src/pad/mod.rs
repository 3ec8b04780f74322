//! One-Time Pad Allocation.
//!
//! This module owns the shared key material of a conversation and the two
//! consumption cursors that keep the Initiator's and the Responder's
//! allocations apart.
//!
//! # Components
//! - `lifecycle`: Creation, restore, allocation and erasure of a [`Pad`].
//! - `cursors`: The two-cursor value type carrying the non-overlap invariant.
//! - `size`: Supported pad size classes.
//! - `burn`: Irreversible destruction of key material.
//!
//! # Layout
//! ```text
//!  0                                                        total_size
//!  |==== Initiator ====>|........ remaining ........|<=== Responder ===|
//!       consumed_front                                  consumed_back
//! ```
//!
//! # Security Guarantees
//! - **No Overlap**: every allocation checks `front + back <= total_size` first.
//! - **Monotonic Peer Cursor**: stale peer reports never roll a cursor back.
//! - **Zeroization**: key material is zeroized on drop, wipe, or targeted erasure.

pub mod burn;
pub mod cursors;
pub mod lifecycle;
pub mod size;

pub use cursors::Cursors;
pub use lifecycle::Pad;
pub use size::PadSize;

/// Which end of the pad a device allocates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Allocates upward from offset 0.
    Initiator,
    /// Allocates downward from offset `total_size`.
    Responder,
}

impl Role {
    /// The structurally opposite role.
    pub fn peer(self) -> Role {
        match self {
            Role::Initiator => Role::Responder,
            Role::Responder => Role::Initiator,
        }
    }
}

/// Errors related to pad operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PadError {
    /// Not enough unconsumed bytes for the requested allocation.
    #[error("pad exhausted: requested {requested} bytes, {remaining} remaining")]
    Exhausted { requested: u64, remaining: u64 },
    /// Cursor state is inconsistent with the pad length.
    #[error("invalid pad state: front {front} + back {back} exceeds {total}")]
    InvalidState { front: u64, back: u64, total: u64 },
    /// Requested size is not one of the supported classes.
    #[error("unsupported pad size: {0} bytes")]
    InvalidSize(usize),
    /// The secure random source failed.
    #[error("entropy source failed")]
    EntropyFailure,
}
