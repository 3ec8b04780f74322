//! One side of a conversation: a pad bound to the local role.
//!
//! [`Conversation::seal`] allocates key bytes from the local end of the pad,
//! encrypts and erases them. [`Conversation::open`] decrypts with key bytes from
//! the peer's end, then moves the peer cursor past them and erases them too,
//! so a replayed ciphertext meets zeroed key bytes and fails authentication.

use zeroize::Zeroizing;

use crate::core::{
    calculate_pad_consumption, decrypt_authenticated, encrypt_authenticated, CipherError,
    MessageType, AUTH_KEY_LEN,
};
use crate::pad::{Pad, PadError, Role};

/// Errors from sealing or opening messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConversationError {
    #[error(transparent)]
    Pad(#[from] PadError),
    #[error(transparent)]
    Cipher(#[from] CipherError),
    /// The key range of a received message is outside the pad or inside our own region.
    #[error("key range at offset {offset} (+{length}) not usable for receiving")]
    InvalidKeyRange { offset: u64, length: u64 },
}

/// An encrypted message and the pad offset of its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    pub offset: u64,
    pub ciphertext: Vec<u8>,
}

pub struct Conversation {
    pad: Pad,
    role: Role,
}

impl Conversation {
    pub fn new(pad: Pad, role: Role) -> Self {
        Self { pad, role }
    }

    /// Encrypts `plaintext` with fresh key bytes from the local end.
    ///
    /// # Errors
    /// Returns `PadError::Exhausted` (wrapped) if the message does not fit.
    pub fn seal(
        &mut self,
        message_type: MessageType,
        plaintext: &[u8],
    ) -> Result<SealedMessage, ConversationError> {
        let needed = calculate_pad_consumption(plaintext.len()) as u64;
        let offset = match self.role {
            Role::Initiator => self.pad.next_send_offset(Role::Initiator),
            Role::Responder => self.pad.next_send_offset(Role::Responder).saturating_sub(needed),
        };
        let key = self.pad.consume(needed, self.role)?;
        let ciphertext = encrypt_authenticated(key, message_type, plaintext)?;
        self.pad.zero_bytes_at(offset, needed);
        Ok(SealedMessage { offset, ciphertext })
    }

    /// Authenticates and decrypts a message sealed by the peer.
    ///
    /// # Errors
    /// * `ConversationError::InvalidKeyRange` if the key range cannot belong to the peer.
    /// * `CipherError::DecryptionFailed` (wrapped) for forged, corrupted or replayed messages.
    pub fn open(
        &mut self,
        offset: u64,
        ciphertext: &[u8],
    ) -> Result<(MessageType, Zeroizing<Vec<u8>>), ConversationError> {
        let body_len = ciphertext
            .len()
            .checked_sub(1 + crate::core::TAG_LEN)
            .ok_or(CipherError::Truncated)?;
        let length = calculate_pad_consumption(body_len) as u64;
        let invalid = ConversationError::InvalidKeyRange { offset, length };
        let end = offset.checked_add(length).ok_or(invalid)?;
        let total = self.pad.total_size();
        let outside_own = match self.role {
            Role::Initiator => offset >= self.pad.consumed_front(),
            Role::Responder => end <= total - self.pad.consumed_back(),
        };
        if end > total || !outside_own {
            return Err(invalid);
        }

        let key = self.pad.bytes_at(offset, length).ok_or(invalid)?;
        let (message_type, plaintext) = decrypt_authenticated(key, ciphertext)?;

        let peer = self.role.peer();
        let peer_consumed = match peer {
            Role::Initiator => end,
            Role::Responder => total - offset,
        };
        self.pad.update_peer_consumption(peer, peer_consumed)?;
        self.pad.zero_bytes_at(offset, length);
        Ok((message_type, plaintext))
    }

    /// Largest plaintext that still fits in the unclaimed region.
    pub fn capacity_for_message(&self) -> u64 {
        self.pad
            .available_for_sending(self.role)
            .saturating_sub(AUTH_KEY_LEN as u64)
    }

    /// Destroys the key material. The conversation cannot send or receive afterwards.
    pub fn burn(&mut self) {
        self.pad.wipe();
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn pad(&self) -> &Pad {
        &self.pad
    }

    pub fn into_pad(self) -> Pad {
        self.pad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(len: usize) -> (Conversation, Conversation) {
        let bytes: Vec<u8> = (0..len).map(|i| (i * 13 % 256) as u8).collect();
        (
            Conversation::new(Pad::restore(bytes.clone(), 0, 0).unwrap(), Role::Initiator),
            Conversation::new(Pad::restore(bytes, 0, 0).unwrap(), Role::Responder),
        )
    }

    #[test]
    fn test_exchange_both_directions() {
        let (mut alice, mut bob) = pair(4096);

        let hello = alice.seal(MessageType::Text, b"hello bob").unwrap();
        assert_eq!(hello.offset, 0);
        let (ty, text) = bob.open(hello.offset, &hello.ciphertext).unwrap();
        assert_eq!((ty, text.as_slice()), (MessageType::Text, &b"hello bob"[..]));
        assert_eq!(bob.pad().consumed_front(), 64 + 9);

        let reply = bob.seal(MessageType::ReadReceipt, b"ok").unwrap();
        assert_eq!(reply.offset, 4096 - 66);
        let (ty, text) = alice.open(reply.offset, &reply.ciphertext).unwrap();
        assert_eq!((ty, text.as_slice()), (MessageType::ReadReceipt, &b"ok"[..]));
        assert_eq!(alice.pad().consumed_back(), 66);

        assert_eq!(alice.pad().cursors(), bob.pad().cursors());
    }

    #[test]
    fn test_key_bytes_erased_after_use() {
        let (mut alice, mut bob) = pair(1024);
        let sealed = alice.seal(MessageType::Text, b"forward secrecy").unwrap();
        let used = (64 + 15) as u64;
        assert!(alice.pad().bytes_at(0, used).unwrap().iter().all(|&b| b == 0));
        bob.open(sealed.offset, &sealed.ciphertext).unwrap();
        assert!(bob.pad().bytes_at(0, used).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_replay_fails() {
        let (mut alice, mut bob) = pair(1024);
        let sealed = alice.seal(MessageType::Burn, b"").unwrap();
        bob.open(sealed.offset, &sealed.ciphertext).unwrap();
        assert_eq!(
            bob.open(sealed.offset, &sealed.ciphertext),
            Err(ConversationError::Cipher(CipherError::DecryptionFailed))
        );
    }

    #[test]
    fn test_out_of_order_delivery() {
        let (mut alice, mut bob) = pair(2048);
        let first = alice.seal(MessageType::Text, b"one").unwrap();
        let second = alice.seal(MessageType::Text, b"two").unwrap();

        assert_eq!(bob.open(second.offset, &second.ciphertext).unwrap().1.as_slice(), b"two");
        let front = bob.pad().consumed_front();
        assert_eq!(bob.open(first.offset, &first.ciphertext).unwrap().1.as_slice(), b"one");
        assert_eq!(bob.pad().consumed_front(), front);
    }

    #[test]
    fn test_rejects_keys_from_own_region() {
        let (mut alice, _) = pair(1024);
        let mine = alice.seal(MessageType::Text, b"mine").unwrap();
        assert!(matches!(
            alice.open(mine.offset, &mine.ciphertext),
            Err(ConversationError::InvalidKeyRange { .. })
        ));
        assert!(matches!(
            alice.open(1000, &[0u8; 64]),
            Err(ConversationError::InvalidKeyRange { .. })
        ));
        assert_eq!(
            alice.open(500, &[0u8; 10]),
            Err(ConversationError::Cipher(CipherError::Truncated))
        );
    }

    #[test]
    fn test_forgery_does_not_move_cursor() {
        let (mut alice, mut bob) = pair(1024);
        let mut sealed = alice.seal(MessageType::Text, b"pay 10").unwrap();
        sealed.ciphertext[3] ^= 0x01;
        assert!(bob.open(sealed.offset, &sealed.ciphertext).is_err());
        assert_eq!(bob.pad().consumed_front(), 0);
    }

    #[test]
    fn test_capacity_and_exhaustion() {
        let (mut alice, _) = pair(200);
        assert_eq!(alice.capacity_for_message(), 136);
        alice.seal(MessageType::Text, &[7u8; 36]).unwrap();
        assert_eq!(alice.capacity_for_message(), 36);
        alice.seal(MessageType::Text, &[1u8; 36]).unwrap();
        assert_eq!(alice.capacity_for_message(), 0);
        assert!(matches!(
            alice.seal(MessageType::Text, &[]),
            Err(ConversationError::Pad(PadError::Exhausted { requested: 64, remaining: 0 }))
        ));
    }

    #[test]
    fn test_burn_wipes_pad() {
        let (mut alice, _) = pair(256);
        alice.burn();
        assert!(alice.pad().as_bytes().iter().all(|&b| b == 0));
        assert_eq!(alice.into_pad().total_size(), 256);
    }
}
