#![forbid(unsafe_code)]

//! One-time-pad encryption over pad slices.
//!
//! The authenticated form lays a key slice out as
//! `auth_subkey(64) || enc_subkey(plaintext_len)` and produces
//! `type(1) || XOR(enc_subkey, plaintext) || HMAC-SHA256(auth_subkey, type || body)(32)`.
//! The tag is checked before any plaintext is produced; plain XOR is malleable.

use zeroize::Zeroizing;

use super::mac::{self, MAC_KEY_LEN, MAC_LEN};
use super::xor::xor;
use super::{CipherError, MessageType};

/// Key bytes reserved for the one-time authentication sub-key.
pub const AUTH_KEY_LEN: usize = MAC_KEY_LEN;

/// Length of the authentication tag appended to each message.
pub const TAG_LEN: usize = MAC_LEN;

const TYPE_LEN: usize = 1;

/// Pad bytes the authenticated cipher needs for a plaintext of `plaintext_len` bytes.
pub const fn calculate_pad_consumption(plaintext_len: usize) -> usize {
    AUTH_KEY_LEN + plaintext_len
}

/// Size of the authenticated ciphertext for a plaintext of `plaintext_len` bytes.
pub const fn ciphertext_len(plaintext_len: usize) -> usize {
    TYPE_LEN + plaintext_len + TAG_LEN
}

/// Plain OTP encryption. Requires `key.len() == plaintext.len()`.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
    if key.len() != plaintext.len() {
        return Err(CipherError::KeyLengthMismatch {
            expected: plaintext.len(),
            actual: key.len(),
        });
    }
    let mut out = vec![0u8; plaintext.len()];
    xor(plaintext, key, &mut out);
    Ok(out)
}

/// Plain OTP decryption via the same XOR path as encryption.
pub fn decrypt(key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
    encrypt(key, ciphertext)
}

/// Authenticated OTP encryption.
///
/// `key` must be exactly `calculate_pad_consumption(plaintext.len())` bytes.
pub fn encrypt_authenticated(
    key: &[u8],
    message_type: MessageType,
    plaintext: &[u8],
) -> Result<Vec<u8>, CipherError> {
    let (auth_key, enc_key) = split_key(key, plaintext.len())?;
    let type_byte = [message_type.as_byte()];

    let mut out = Vec::with_capacity(ciphertext_len(plaintext.len()));
    out.extend_from_slice(&type_byte);
    out.resize(TYPE_LEN + plaintext.len(), 0);
    xor(plaintext, enc_key, &mut out[TYPE_LEN..]);

    let tag = mac::tag(auth_key, &[out.as_slice()]);
    out.extend_from_slice(&tag);
    Ok(out)
}

/// Authenticated OTP decryption: verify (constant time), then decrypt.
///
/// # Errors
/// * `CipherError::DecryptionFailed` if the tag does not verify; no plaintext is produced.
/// * `CipherError::KeyLengthMismatch` if `key` does not cover the body.
pub fn decrypt_authenticated(
    key: &[u8],
    ciphertext: &[u8],
) -> Result<(MessageType, Zeroizing<Vec<u8>>), CipherError> {
    if ciphertext.len() < TYPE_LEN + TAG_LEN {
        return Err(CipherError::Truncated);
    }
    let (signed, tag) = ciphertext.split_at(ciphertext.len() - TAG_LEN);
    let body = &signed[TYPE_LEN..];
    let (auth_key, enc_key) = split_key(key, body.len())?;

    if !mac::verify(auth_key, &[signed], tag) {
        log::warn!("message authentication failed ({} byte body)", body.len());
        return Err(CipherError::DecryptionFailed);
    }
    let message_type = MessageType::try_from(signed[0])?;

    let mut plaintext = Zeroizing::new(vec![0u8; body.len()]);
    xor(body, enc_key, &mut plaintext);
    Ok((message_type, plaintext))
}

fn split_key(key: &[u8], body_len: usize) -> Result<(&[u8; AUTH_KEY_LEN], &[u8]), CipherError> {
    let expected = calculate_pad_consumption(body_len);
    if key.len() != expected {
        return Err(CipherError::KeyLengthMismatch {
            expected,
            actual: key.len(),
        });
    }
    let (auth, enc) = key.split_at(AUTH_KEY_LEN);
    let auth = auth
        .try_into()
        .map_err(|_| CipherError::KeyLengthMismatch { expected, actual: key.len() })?;
    Ok((auth, enc))
}
