//! Ceremony payload: metadata plus pad bytes, sealed with a BLAKE3 checksum.
//!
//! Layout: `magic "EPC1" | metadata | pad_len u32 | pad | BLAKE3(everything before)`.
//! The checksum catches a decode that went wrong anywhere upstream.

use zeroize::Zeroizing;

use super::codec::Reader;
use super::{CeremonyError, CeremonyMetadata};

const MAGIC: &[u8; 4] = b"EPC1";
const CHECKSUM_LEN: usize = 32;

/// Serializes `metadata` and `pad_bytes` into a checksummed payload.
pub fn encode_payload(
    metadata: &CeremonyMetadata,
    pad_bytes: &[u8],
) -> Result<Zeroizing<Vec<u8>>, CeremonyError> {
    let pad_len = u32::try_from(pad_bytes.len())
        .map_err(|_| CeremonyError::InvalidPayload("pad too large"))?;

    let mut out = Zeroizing::new(Vec::with_capacity(
        MAGIC.len() + 16 + metadata.relay_url.len() + pad_bytes.len() + CHECKSUM_LEN,
    ));
    out.extend_from_slice(MAGIC);
    metadata.encode_into(&mut out)?;
    out.extend_from_slice(&pad_len.to_be_bytes());
    out.extend_from_slice(pad_bytes);
    let checksum = blake3::hash(&out);
    out.extend_from_slice(checksum.as_bytes());
    Ok(out)
}

/// Verifies the checksum and splits a payload back into metadata and pad bytes.
///
/// # Errors
/// * `CeremonyError::ChecksumMismatch` if the trailing checksum does not match.
/// * `CeremonyError::InvalidPayload` if a checksummed payload is malformed.
pub fn decode_payload(
    bytes: &[u8],
) -> Result<(CeremonyMetadata, Zeroizing<Vec<u8>>), CeremonyError> {
    if bytes.len() < MAGIC.len() + CHECKSUM_LEN {
        return Err(CeremonyError::ChecksumMismatch);
    }
    let (body, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    let mut expected = [0u8; CHECKSUM_LEN];
    expected.copy_from_slice(checksum);
    // blake3::Hash equality is constant time.
    if blake3::hash(body) != blake3::Hash::from(expected) {
        return Err(CeremonyError::ChecksumMismatch);
    }

    let mut reader = Reader::new(body);
    if reader.take(MAGIC.len()) != Some(&MAGIC[..]) {
        return Err(CeremonyError::InvalidPayload("bad magic"));
    }
    let metadata = CeremonyMetadata::decode_from(&mut reader)?;
    let pad_len = reader
        .u32()
        .ok_or(CeremonyError::InvalidPayload("pad length truncated"))? as usize;
    let pad = reader
        .take(pad_len)
        .ok_or(CeremonyError::InvalidPayload("pad truncated"))?;
    if reader.remaining() != 0 {
        return Err(CeremonyError::InvalidPayload("trailing bytes"));
    }
    Ok((metadata, Zeroizing::new(pad.to_vec())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (CeremonyMetadata, Vec<u8>) {
        let metadata = CeremonyMetadata {
            relay_url: "https://relay.example/v1".into(),
            ..Default::default()
        };
        (metadata, (0..300u32).map(|i| (i * 7) as u8).collect())
    }

    #[test]
    fn test_payload_roundtrip() {
        let (metadata, pad) = sample();
        let bytes = encode_payload(&metadata, &pad).unwrap();
        assert_eq!(&bytes[..4], b"EPC1");
        let (m, p) = decode_payload(&bytes).unwrap();
        assert_eq!(m, metadata);
        assert_eq!(p.as_slice(), pad.as_slice());
    }

    #[test]
    fn test_corruption_detected() {
        let (metadata, pad) = sample();
        let bytes = encode_payload(&metadata, &pad).unwrap();
        for i in [0, 5, 40, bytes.len() - 1] {
            let mut corrupted = bytes.to_vec();
            corrupted[i] ^= 0x10;
            assert_eq!(
                decode_payload(&corrupted).map(|_| ()),
                Err(CeremonyError::ChecksumMismatch)
            );
        }
        assert_eq!(
            decode_payload(&bytes[..bytes.len() - 1]).map(|_| ()),
            Err(CeremonyError::ChecksumMismatch)
        );
        assert_eq!(decode_payload(&[]).map(|_| ()), Err(CeremonyError::ChecksumMismatch));
    }

    #[test]
    fn test_well_checksummed_garbage_is_invalid() {
        let mut forged = b"NOPE".to_vec();
        let checksum = blake3::hash(&forged);
        forged.extend_from_slice(checksum.as_bytes());
        assert_eq!(
            decode_payload(&forged).map(|_| ()),
            Err(CeremonyError::InvalidPayload("bad magic"))
        );
    }
}
