//! Deterministic derivations over pad bytes.
//!
//! Both devices hold identical pad bytes after a ceremony, so anything derived
//! from them agrees without a handshake:
//! - `mnemonic`: short word sequence read aloud to confirm the transfer.
//! - `tokens`: conversation id, relay auth token and burn token.
//! - `passphrase`: gate for the optional ceremony scrambling passphrase.

pub mod mnemonic;
pub mod passphrase;
pub mod tokens;
pub mod wordlist;

pub use mnemonic::{generate_mnemonic, DEFAULT_WORD_COUNT};
pub use passphrase::validate_passphrase;
pub use tokens::{
    derive_all_tokens, derive_auth_token, derive_burn_token, derive_conversation_id, AuthTokens,
};

/// Errors from derivation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeriveError {
    /// Word count outside what the fixed prefix can supply.
    #[error("word count {0} not supported (1..={max})", max = mnemonic::MAX_WORD_COUNT)]
    InvalidWordCount(usize),
    /// Pad too short to supply the requested bits.
    #[error("pad too short: need {needed} bytes, have {actual}")]
    PadTooShort { needed: usize, actual: usize },
    /// Passphrase shorter than the minimum.
    #[error("passphrase too short ({0} bytes)")]
    PassphraseTooShort(usize),
    /// Passphrase longer than the maximum.
    #[error("passphrase too long ({0} bytes)")]
    PassphraseTooLong(usize),
    /// Passphrase contains a byte outside printable ASCII.
    #[error("passphrase contains non-printable byte at position {0}")]
    PassphraseNotPrintable(usize),
}
