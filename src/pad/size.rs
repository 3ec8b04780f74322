//! Pad size classes.
//!
//! Pads come in a few discrete sizes so that the size itself reveals little
//! about the conversation and the ceremony frame count stays predictable.

use super::PadError;

/// Supported pad sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PadSize {
    /// 32 KiB.
    Tiny,
    /// 64 KiB.
    Small,
    /// 128 KiB.
    Medium,
    /// 256 KiB.
    Large,
    /// 512 KiB.
    Huge,
    /// 1 MiB.
    Max,
}

impl PadSize {
    /// All classes, smallest first.
    pub const ALL: [PadSize; 6] = [
        PadSize::Tiny,
        PadSize::Small,
        PadSize::Medium,
        PadSize::Large,
        PadSize::Huge,
        PadSize::Max,
    ];

    /// Size of the class in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            PadSize::Tiny => 32 * 1024,
            PadSize::Small => 64 * 1024,
            PadSize::Medium => 128 * 1024,
            PadSize::Large => 256 * 1024,
            PadSize::Huge => 512 * 1024,
            PadSize::Max => 1024 * 1024,
        }
    }

    /// Maps an exact byte count back to its class.
    ///
    /// # Errors
    /// Returns `PadError::InvalidSize` for any other length.
    pub fn from_bytes(len: usize) -> Result<Self, PadError> {
        Self::ALL
            .into_iter()
            .find(|class| class.bytes() == len)
            .ok_or(PadError::InvalidSize(len))
    }
}
