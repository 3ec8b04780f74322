//! Configuration for the ceremony and derivation layers.
//!
//! Populated by the host application and passed to the generator and receiver.
//! Both sides of a ceremony must agree on `kdf`; `block_size` only needs to be
//! set on the displaying side since every frame carries it.

use crate::derive::mnemonic::MAX_WORD_COUNT;

/// Smallest frame body. At this size even a 1 MiB pad, scrambled and with
/// metadata, stays within `MAX_BLOCK_COUNT` source blocks.
pub const MIN_BLOCK_SIZE: usize = 256;
pub const MAX_BLOCK_SIZE: usize = 2048;

/// Errors from configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("block size {0} outside {min}..={max}", min = MIN_BLOCK_SIZE, max = MAX_BLOCK_SIZE)]
    BlockSize(usize),
    #[error("invalid scrypt parameters: {0}")]
    Kdf(String),
    #[error("mnemonic word count {0} outside 1..={max}", max = MAX_WORD_COUNT)]
    MnemonicWords(usize),
}

/// Main configuration structure for ceremonies.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CeremonyConfig {
    /// Bytes of payload per fountain frame (before header and check bytes),
    /// within `MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE`. Every supported pad size
    /// encodes at any valid block size.
    pub block_size: usize,

    /// Passphrase stretching parameters.
    pub kdf: KdfParams,

    /// Words read aloud for verification.
    pub mnemonic_words: usize,
}

impl Default for CeremonyConfig {
    fn default() -> Self {
        Self {
            block_size: 512,
            kdf: KdfParams::default(),
            mnemonic_words: crate::derive::DEFAULT_WORD_COUNT,
        }
    }
}

impl CeremonyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE).contains(&self.block_size) {
            return Err(ConfigError::BlockSize(self.block_size));
        }
        if self.mnemonic_words == 0 || self.mnemonic_words > MAX_WORD_COUNT {
            return Err(ConfigError::MnemonicWords(self.mnemonic_words));
        }
        self.kdf.to_scrypt().map(|_| ())
    }
}

/// Scrypt parameters for the passphrase scrambling layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KdfParams {
    /// log2 of the CPU/memory cost N.
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl Default for KdfParams {
    // N=32768 (2^15), r=8, p=1: tolerable on mid-range phones.
    fn default() -> Self {
        Self { log_n: 15, r: 8, p: 1 }
    }
}

impl KdfParams {
    pub fn to_scrypt(self) -> Result<scrypt::Params, ConfigError> {
        scrypt::Params::new(self.log_n, self.r, self.p, scrypt::Params::RECOMMENDED_LEN)
            .map_err(|e| ConfigError::Kdf(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(CeremonyConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_block_size() {
        let config = CeremonyConfig { block_size: 8, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::BlockSize(8)));
        let config = CeremonyConfig { block_size: MIN_BLOCK_SIZE - 1, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::BlockSize(MIN_BLOCK_SIZE - 1)));
        let config = CeremonyConfig { block_size: MIN_BLOCK_SIZE, ..Default::default() };
        assert_eq!(config.validate(), Ok(()));
        let config = CeremonyConfig { block_size: 4096, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::BlockSize(4096)));
    }

    #[test]
    fn test_rejects_word_count() {
        let config = CeremonyConfig { mnemonic_words: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::MnemonicWords(0)));
    }

    #[test]
    fn test_rejects_bad_kdf() {
        let config = CeremonyConfig {
            kdf: KdfParams { log_n: 70, r: 8, p: 1 },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Kdf(_))));
    }
}
