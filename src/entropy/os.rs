//! Operating system CSPRNG source.

use rand_core::{OsRng, RngCore};

use super::{EntropyError, EntropySource};

/// Entropy from the platform CSPRNG (`getrandom`).
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn name(&self) -> &'static str {
        "OsRng"
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        OsRng.try_fill_bytes(dest).map_err(|e| {
            log::warn!("system random source failed: {e}");
            EntropyError::Unavailable
        })
    }
}
