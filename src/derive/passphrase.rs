//! Ceremony passphrase validation.
//!
//! The passphrase is only ever scrypt input, never key material itself.

use super::DeriveError;

pub const MIN_PASSPHRASE_LEN: usize = 4;
pub const MAX_PASSPHRASE_LEN: usize = 64;

/// Accepts 4 to 64 bytes of printable ASCII (space through tilde).
pub fn validate_passphrase(passphrase: &str) -> Result<(), DeriveError> {
    let bytes = passphrase.as_bytes();
    if bytes.len() < MIN_PASSPHRASE_LEN {
        return Err(DeriveError::PassphraseTooShort(bytes.len()));
    }
    if bytes.len() > MAX_PASSPHRASE_LEN {
        return Err(DeriveError::PassphraseTooLong(bytes.len()));
    }
    match bytes.iter().position(|b| !(0x20..=0x7E).contains(b)) {
        Some(pos) => Err(DeriveError::PassphraseNotPrintable(pos)),
        None => Ok(()),
    }
}
