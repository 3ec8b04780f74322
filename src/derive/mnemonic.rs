//! Verbal verification mnemonic.
//!
//! Reads `word_count * 9` bits, big-endian, from the first [`PREFIX_LEN`]
//! bytes of the pad and maps each 9-bit group through [`WORDLIST`]. Two
//! devices holding the same pad read out the same words; a corrupted prefix
//! changes at least one word.

use super::wordlist::WORDLIST;
use super::DeriveError;

/// Bytes of the pad that feed the mnemonic.
pub const PREFIX_LEN: usize = 32;

pub const BITS_PER_WORD: usize = 9;

pub const DEFAULT_WORD_COUNT: usize = 6;

/// Most words the fixed prefix can supply.
pub const MAX_WORD_COUNT: usize = PREFIX_LEN * 8 / BITS_PER_WORD;

/// Derives `word_count` words from the pad prefix.
///
/// # Errors
/// * `DeriveError::InvalidWordCount` if `word_count` is 0 or above [`MAX_WORD_COUNT`].
/// * `DeriveError::PadTooShort` if the pad cannot supply the needed bits.
pub fn generate_mnemonic(
    pad_bytes: &[u8],
    word_count: usize,
) -> Result<Vec<&'static str>, DeriveError> {
    if word_count == 0 || word_count > MAX_WORD_COUNT {
        return Err(DeriveError::InvalidWordCount(word_count));
    }
    let needed = (word_count * BITS_PER_WORD).div_ceil(8);
    if pad_bytes.len() < needed {
        return Err(DeriveError::PadTooShort { needed, actual: pad_bytes.len() });
    }

    let words = (0..word_count)
        .map(|i| WORDLIST[read_bits(pad_bytes, i * BITS_PER_WORD, BITS_PER_WORD)])
        .collect();
    Ok(words)
}

/// Space-joined form for display.
pub fn mnemonic_phrase(pad_bytes: &[u8], word_count: usize) -> Result<String, DeriveError> {
    Ok(generate_mnemonic(pad_bytes, word_count)?.join(" "))
}

// Big-endian bit read: bit 0 is the MSB of byte 0.
fn read_bits(bytes: &[u8], start: usize, count: usize) -> usize {
    (start..start + count).fold(0usize, |acc, bit| {
        let value = (bytes[bit / 8] >> (7 - bit % 8)) & 1;
        (acc << 1) | value as usize
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // 0x00 0x80 -> bits 000000001 | 0000000... -> indices 1, 0
        let mut pad = vec![0u8; 32];
        pad[1] = 0x80;
        let words = generate_mnemonic(&pad, 2).unwrap();
        assert_eq!(words, vec![WORDLIST[1], WORDLIST[0]]);

        let ones = vec![0xFFu8; 32];
        assert_eq!(generate_mnemonic(&ones, 6).unwrap(), vec![WORDLIST[511]; 6]);
    }

    #[test]
    fn test_deterministic() {
        let pad: Vec<u8> = (0..64).map(|i| (i * 37 % 251) as u8).collect();
        let a = generate_mnemonic(&pad, DEFAULT_WORD_COUNT).unwrap();
        let b = generate_mnemonic(&pad.clone(), DEFAULT_WORD_COUNT).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 6);
    }

    #[test]
    fn test_any_consumed_bit_flip_changes_a_word() {
        let pad: Vec<u8> = (0..64).map(|i| (i * 91 % 256) as u8).collect();
        let base = generate_mnemonic(&pad, DEFAULT_WORD_COUNT).unwrap();
        for bit in 0..DEFAULT_WORD_COUNT * BITS_PER_WORD {
            let mut flipped = pad.clone();
            flipped[bit / 8] ^= 0x80 >> (bit % 8);
            let words = generate_mnemonic(&flipped, DEFAULT_WORD_COUNT).unwrap();
            assert_ne!(words, base, "bit {bit} did not change the mnemonic");
        }
    }

    #[test]
    fn test_bounds() {
        assert_eq!(generate_mnemonic(&[0u8; 32], 0), Err(DeriveError::InvalidWordCount(0)));
        assert_eq!(
            generate_mnemonic(&[0u8; 32], MAX_WORD_COUNT + 1),
            Err(DeriveError::InvalidWordCount(MAX_WORD_COUNT + 1))
        );
        assert_eq!(
            generate_mnemonic(&[0u8; 6], 6),
            Err(DeriveError::PadTooShort { needed: 7, actual: 6 })
        );
        assert!(generate_mnemonic(&[0u8; 32], MAX_WORD_COUNT).is_ok());
    }

    #[test]
    fn test_phrase() {
        let phrase = mnemonic_phrase(&[0u8; 32], 3).unwrap();
        let first = WORDLIST[0];
        assert_eq!(phrase, format!("{first} {first} {first}"));
    }
}
