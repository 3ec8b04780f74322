//! Passphrase scrambling of the ceremony payload.
//!
//! Wraps the payload before fountain encoding so that a recording of every
//! frame is useless without the passphrase.
//!
//! # Scheme
//! 1. **KDF**: scrypt(passphrase, salt) -> master key (MK)
//! 2. **Derivation**:
//!    - EncKey = BLAKE3_KDF(MK, context = SCRAMBLE_ENC_CONTEXT)
//!    - TagKey = BLAKE3_KDF(MK, context = SCRAMBLE_TAG_CONTEXT)
//! 3. **Scramble**: XOR(payload, BLAKE3_XOF(EncKey))
//! 4. **Tag**: BLAKE3_Keyed(TagKey, salt || scrambled)
//! 5. **Format**: `[Salt (16)] [Tag (32)] [Scrambled (...)]`

use zeroize::Zeroizing;

use super::CeremonyError;
use crate::config::KdfParams;
use crate::core::xor::xor_in_place;
use crate::entropy::EntropySource;

pub const SALT_LEN: usize = 16;
pub const TAG_LEN: usize = 32;

/// Bytes added by scrambling.
pub const OVERHEAD: usize = SALT_LEN + TAG_LEN;

const SCRAMBLE_ENC_CONTEXT: &str = "ephemeral-core 2024-06 ceremony scramble enc";
const SCRAMBLE_TAG_CONTEXT: &str = "ephemeral-core 2024-06 ceremony scramble tag";

/// Scrambles `payload` under `passphrase` with a fresh salt from `source`.
pub fn scramble(
    payload: &[u8],
    passphrase: &str,
    kdf: &KdfParams,
    source: &mut dyn EntropySource,
) -> Result<Vec<u8>, CeremonyError> {
    let mut salt = [0u8; SALT_LEN];
    source.fill(&mut salt)?;

    let (enc_key, tag_key) = derive_keys(passphrase, &salt, kdf)?;

    let mut out = Vec::with_capacity(OVERHEAD + payload.len());
    out.extend_from_slice(&salt);
    out.extend_from_slice(&[0u8; TAG_LEN]);
    out.extend_from_slice(payload);
    apply_keystream(&enc_key, &mut out[OVERHEAD..]);

    let tag = compute_tag(&tag_key, &salt, &out[OVERHEAD..]);
    out[SALT_LEN..OVERHEAD].copy_from_slice(tag.as_bytes());
    Ok(out)
}

/// Reverses [`scramble`].
///
/// # Errors
/// Returns `CeremonyError::PassphraseMismatch` if the tag does not verify.
pub fn unscramble(
    scrambled: &[u8],
    passphrase: &str,
    kdf: &KdfParams,
) -> Result<Zeroizing<Vec<u8>>, CeremonyError> {
    if scrambled.len() < OVERHEAD {
        return Err(CeremonyError::InvalidPayload("scrambled payload truncated"));
    }
    let (salt, rest) = scrambled.split_at(SALT_LEN);
    let (stored_tag, body) = rest.split_at(TAG_LEN);

    let (enc_key, tag_key) = derive_keys(passphrase, salt, kdf)?;

    let mut expected = [0u8; TAG_LEN];
    expected.copy_from_slice(stored_tag);
    // blake3::Hash equality is constant time.
    if compute_tag(&tag_key, salt, body) != blake3::Hash::from(expected) {
        log::warn!("ceremony passphrase did not verify");
        return Err(CeremonyError::PassphraseMismatch);
    }

    let mut plain = Zeroizing::new(body.to_vec());
    apply_keystream(&enc_key, &mut plain);
    Ok(plain)
}

fn derive_keys(
    passphrase: &str,
    salt: &[u8],
    kdf: &KdfParams,
) -> Result<(Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>), CeremonyError> {
    let params = kdf.to_scrypt()?;
    let mut mk = Zeroizing::new([0u8; 32]);
    scrypt::scrypt(passphrase.as_bytes(), salt, &params, &mut *mk)
        .map_err(|_| CeremonyError::InvalidPayload("scrypt output length"))?;
    Ok((
        derive_subkey(&mk, SCRAMBLE_ENC_CONTEXT),
        derive_subkey(&mk, SCRAMBLE_TAG_CONTEXT),
    ))
}

fn derive_subkey(mk: &[u8; 32], context: &str) -> Zeroizing<[u8; 32]> {
    Zeroizing::new(blake3::derive_key(context, mk))
}

fn apply_keystream(key: &[u8; 32], data: &mut [u8]) {
    let mut keystream = Zeroizing::new(vec![0u8; data.len()]);
    blake3::Hasher::new_keyed(key).finalize_xof().fill(&mut keystream);
    xor_in_place(data, &keystream);
}

fn compute_tag(key: &[u8; 32], salt: &[u8], body: &[u8]) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new_keyed(key);
    hasher.update(salt);
    hasher.update(body);
    hasher.finalize()
}
