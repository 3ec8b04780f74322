#![forbid(unsafe_code)]
// One-time HMAC-SHA256 authentication.
// - The 64-byte key fills exactly one SHA-256 block; it is never reused.
// - Verification goes through `Mac::verify_slice`, which compares in constant time.

use hmac::digest::generic_array::GenericArray;
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const MAC_KEY_LEN: usize = 64;
pub const MAC_LEN: usize = 32;

type HmacSha256 = Hmac<Sha256>;

fn keyed(mac_key: &[u8; MAC_KEY_LEN], parts: &[&[u8]]) -> HmacSha256 {
    // A 64-byte key is exactly one SHA-256 block, the HMAC native key size.
    let mut mac = <HmacSha256 as Mac>::new(GenericArray::from_slice(mac_key));
    for part in parts {
        mac.update(part);
    }
    mac
}

/// Tag over the concatenation of `parts`.
pub fn tag(mac_key: &[u8; MAC_KEY_LEN], parts: &[&[u8]]) -> [u8; MAC_LEN] {
    keyed(mac_key, parts).finalize().into_bytes().into()
}

/// Constant-time check of `expected` against the tag over `parts`.
pub fn verify(mac_key: &[u8; MAC_KEY_LEN], parts: &[&[u8]], expected: &[u8]) -> bool {
    keyed(mac_key, parts).verify_slice(expected).is_ok()
}
