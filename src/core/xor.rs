#![forbid(unsafe_code)]
// Constant-time XOR engine.
// - Processes data in 8-byte words followed by a byte tail.
// - No secret-dependent branching; length checks are enforced at callers.

/// XOR `input` with `key`, writing into `out`.
/// Requires: `out.len() == input.len()` and `key.len() >= input.len()`.
#[inline(always)]
pub fn xor(input: &[u8], key: &[u8], out: &mut [u8]) {
    let len = out.len();
    let words = len / 8 * 8;

    for ((o, a), b) in out[..words]
        .chunks_exact_mut(8)
        .zip(input[..words].chunks_exact(8))
        .zip(key[..words].chunks_exact(8))
    {
        let mut wa = [0u8; 8];
        let mut wb = [0u8; 8];
        wa.copy_from_slice(a);
        wb.copy_from_slice(b);
        let x = u64::from_ne_bytes(wa) ^ u64::from_ne_bytes(wb);
        o.copy_from_slice(&x.to_ne_bytes());
    }

    for i in words..len {
        out[i] = input[i] ^ key[i];
    }
}

/// XOR `other` into `acc` in place. Requires `other.len() >= acc.len()`.
#[inline(always)]
pub fn xor_in_place(acc: &mut [u8], other: &[u8]) {
    for (a, b) in acc.iter_mut().zip(other) {
        *a ^= *b;
    }
}
