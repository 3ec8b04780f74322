//! Ephemeral messaging core.
//!
//! Shared one-time pads split between two devices, moved between them by a
//! fountain-coded QR ceremony, and spent by an authenticated OTP cipher.
//!
//! # Modules
//! - `pad`: Two-cursor pad allocator.
//! - `ceremony`: Fountain generator and receiver for the pad transfer.
//! - `derive`: Mnemonic, token and passphrase derivation from pad bytes.
//! - `core`: Authenticated one-time-pad cipher.
//! - `conversation`: Allocator and cipher bound to one role.
//! - `entropy`: Randomness sources and pad material expansion.
//! - `config`: Ceremony configuration.

pub mod ceremony;
pub mod config;
pub mod conversation;
pub mod core;
pub mod derive;
pub mod entropy;
pub mod pad;

pub use ceremony::{CeremonyError, CeremonyMetadata, CeremonyResult, FountainGenerator, FountainReceiver};
pub use config::{CeremonyConfig, ConfigError, KdfParams};
pub use conversation::{Conversation, ConversationError, SealedMessage};
pub use crate::core::{CipherError, MessageType};
pub use derive::{AuthTokens, DeriveError};
pub use entropy::{EntropyError, EntropySource};
pub use pad::{Pad, PadError, PadSize, Role};

/// Library version as `0x00MMmmpp`.
#[no_mangle]
pub extern "C" fn ephemeral_core_version() -> u32 {
    0x000400
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::CustomSource;

    #[test]
    fn test_version_matches_manifest() {
        let expected = env!("CARGO_PKG_VERSION")
            .split('.')
            .map(|p| p.parse::<u32>().unwrap())
            .fold(0, |acc, p| (acc << 8) | p);
        assert_eq!(ephemeral_core_version(), expected);
    }

    /// Pad creation, ceremony transfer, verbal check and a message each way.
    #[test]
    fn test_end_to_end_conversation() {
        let mut os = CustomSource::from_bytes(&[0x42; entropy::SYSTEM_SEED_LEN]);
        let pad = Pad::create(b"camera noise", PadSize::Tiny, &mut os).unwrap();

        let config = CeremonyConfig {
            block_size: 256,
            kdf: KdfParams { log_n: 4, r: 8, p: 1 },
            ..Default::default()
        };
        let mut seed = CustomSource::from_bytes(&[0, 0, 1, 0]);
        seed.add_bytes(&[9; ceremony::scramble::SALT_LEN]);
        let metadata = CeremonyMetadata::default();
        let generator =
            FountainGenerator::new(&metadata, pad.as_bytes(), &config, Some("tango"), &mut seed)
                .unwrap();
        let mut receiver = FountainReceiver::new(Some("tango"), &config).unwrap();
        let mut index = 0u32;
        while !receiver.add_frame(&generator.generate_frame(index)).unwrap() {
            index += 1;
        }
        let received = receiver.take_result().unwrap();
        assert_eq!(received.metadata, metadata);

        let words = derive::generate_mnemonic(pad.as_bytes(), config.mnemonic_words).unwrap();
        assert_eq!(words, derive::generate_mnemonic(&received.pad_bytes, 6).unwrap());
        assert_eq!(
            derive::derive_all_tokens(pad.as_bytes()),
            derive::derive_all_tokens(&received.pad_bytes)
        );

        let mut initiator = Conversation::new(pad, Role::Initiator);
        let mut responder = Conversation::new(
            Pad::restore(received.pad_bytes.to_vec(), 0, 0).unwrap(),
            Role::Responder,
        );
        let sealed = initiator.seal(MessageType::Text, b"see you at noon").unwrap();
        let (_, text) = responder.open(sealed.offset, &sealed.ciphertext).unwrap();
        assert_eq!(text.as_slice(), b"see you at noon");
        let sealed = responder.seal(MessageType::Burn, b"").unwrap();
        assert_eq!(initiator.open(sealed.offset, &sealed.ciphertext).unwrap().0, MessageType::Burn);
    }
}
