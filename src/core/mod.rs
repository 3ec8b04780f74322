//! One-time-pad cipher primitives.
//!
//! - `xor`: constant-time XOR of data with key bytes.
//! - `mac`: HMAC-SHA256 tags keyed with one-time authentication sub-keys.
//! - `otp_engine`: plain and authenticated OTP encryption over pad slices.

pub mod mac;
pub mod otp_engine;
pub mod xor;

pub use otp_engine::{
    calculate_pad_consumption, decrypt, decrypt_authenticated, encrypt, encrypt_authenticated,
    AUTH_KEY_LEN, TAG_LEN,
};

/// Errors returned by the OTP cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CipherError {
    /// Key slice length does not match what the operation requires.
    #[error("key length {actual} does not match required {expected}")]
    KeyLengthMismatch { expected: usize, actual: usize },
    /// Ciphertext too short to contain a type byte and a tag.
    #[error("ciphertext truncated")]
    Truncated,
    /// Authentication tag did not verify.
    #[error("decryption failed")]
    DecryptionFailed,
    /// Tag verified but the type byte names no known message type.
    #[error("unknown message type 0x{0:02x}")]
    InvalidMessageType(u8),
}

/// Kind of payload carried by an authenticated message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MessageType {
    Text = 0x01,
    Image = 0x02,
    /// Peer requests destruction of the conversation.
    Burn = 0x03,
    ReadReceipt = 0x04,
}

impl MessageType {
    pub const ALL: [MessageType; 4] = [
        MessageType::Text,
        MessageType::Image,
        MessageType::Burn,
        MessageType::ReadReceipt,
    ];

    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MessageType {
    type Error = CipherError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(MessageType::Text),
            0x02 => Ok(MessageType::Image),
            0x03 => Ok(MessageType::Burn),
            0x04 => Ok(MessageType::ReadReceipt),
            other => Err(CipherError::InvalidMessageType(other)),
        }
    }
}
