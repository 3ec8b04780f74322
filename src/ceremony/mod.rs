//! Fountain Ceremony Transfer.
//!
//! Moves a freshly generated pad from one device to another over a one-way,
//! lossy visual channel (an animated QR code). The displaying side runs a
//! [`FountainGenerator`] in a loop; the scanning side feeds whatever it
//! captures into a [`FountainReceiver`] until it reports completion.
//!
//! # Pipeline
//! ```text
//! metadata + pad -> payload -> [scramble] -> source blocks -> frames
//! frames -> decoder -> source blocks -> [unscramble] -> payload -> metadata + pad
//! ```
//!
//! # Components
//! - `payload` / `metadata`: Checksummed serialization of what is transferred.
//! - `scramble`: Optional passphrase layer around the payload.
//! - `schedule`: Seeded, reproducible choice of blocks per frame.
//! - `frame`: Wire format of a single frame.
//! - `decoder`: Incremental elimination over received frames.
//! - `generator` / `receiver`: The two ends.

mod codec;
pub mod decoder;
pub mod frame;
pub mod generator;
pub mod metadata;
pub mod payload;
pub mod receiver;
pub mod schedule;
pub mod scramble;

pub use generator::FountainGenerator;
pub use metadata::{CeremonyMetadata, NotificationPrefs};
pub use receiver::{CeremonyResult, FountainReceiver};

use crate::config::ConfigError;
use crate::derive::DeriveError;
use crate::entropy::EntropyError;

/// Errors from the ceremony transfer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CeremonyError {
    /// A frame was malformed or belongs to another session; drop it and continue.
    #[error("invalid frame: {0}")]
    InvalidFrame(&'static str),
    /// The payload was scrambled under a different passphrase, or only one
    /// side configured one.
    #[error("passphrase mismatch")]
    PassphraseMismatch,
    /// The decoded payload failed its integrity check.
    #[error("payload checksum mismatch")]
    ChecksumMismatch,
    #[error("invalid payload: {0}")]
    InvalidPayload(&'static str),
    /// Not enough frames have been received yet.
    #[error("payload not decoded yet")]
    NotDecoded,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Entropy(#[from] EntropyError),
    #[error(transparent)]
    Passphrase(#[from] DeriveError),
}
