//! Irreversible key material destruction.
//!
//! Used for the full pad wipe on burn and for forward-secrecy erasure of the
//! byte ranges a message has already used.

use zeroize::Zeroize;

/// Irreversibly overwrites `slice` with zeros.
#[inline(never)]
pub fn burn_slice(slice: &mut [u8]) {
    slice.zeroize();
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burn_slice() {
        let mut secret = vec![0xCA, 0xFE, 0xBA, 0xBE];
        burn_slice(&mut secret[1..3]);
        assert_eq!(secret, vec![0xCA, 0, 0, 0xBE]);
    }
}
