//! Entropy collection and pad material expansion.
//!
//! Fresh pads are never taken straight from a single source. Caller-supplied
//! entropy (camera noise, touch timings) is mixed with the operating system's
//! CSPRNG through an extract-then-expand step, so the pad stays strong as long
//! as either input is.
//!
//! # Design
//! - **Extract**: BLAKE3 in derive-key mode compresses both inputs into a 32-byte PRK.
//! - **Expand**: BLAKE3 keyed XOF stretches the PRK to the requested length.
//! - **Pluggable**: sources implement [`EntropySource`]; tests inject fixed bytes.

pub mod custom;
pub mod os;

pub use custom::CustomSource;
pub use os::OsEntropy;

use zeroize::Zeroizing;

const EXTRACT_CONTEXT: &str = "ephemeral-core 2024-06 pad extract";
const EXPAND_LABEL: &[u8] = b"ephemeral-core pad expand v1";

/// Bytes drawn from the secure source for every extraction.
pub const SYSTEM_SEED_LEN: usize = 64;

/// Error types for entropy collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EntropyError {
    /// The operating system RNG could not be read.
    #[error("system random source unavailable")]
    Unavailable,
    /// A buffered source ran out of bytes.
    #[error("entropy source exhausted")]
    Exhausted,
}

/// A trait for entropy sources.
pub trait EntropySource {
    /// Returns a unique identifier for the source.
    fn name(&self) -> &'static str;

    /// Fills `dest` with random bytes from the source.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

/// Mixes `entropy` with fresh bytes from `source` and expands the result into `out`.
pub fn extract_expand(
    entropy: &[u8],
    source: &mut dyn EntropySource,
    out: &mut [u8],
) -> Result<(), EntropyError> {
    let mut system = Zeroizing::new([0u8; SYSTEM_SEED_LEN]);
    source.fill(&mut *system)?;

    let mut extractor = blake3::Hasher::new_derive_key(EXTRACT_CONTEXT);
    extractor.update(&*system);
    extractor.update(&(entropy.len() as u64).to_be_bytes());
    extractor.update(entropy);
    let prk = Zeroizing::new(<[u8; 32]>::from(extractor.finalize()));

    let mut expander = blake3::Hasher::new_keyed(&prk);
    expander.update(EXPAND_LABEL);
    expander.update(&(out.len() as u64).to_be_bytes());
    expander.finalize_xof().fill(out);

    log::trace!("expanded {} pad bytes from source {}", out.len(), source.name());
    Ok(())
}
