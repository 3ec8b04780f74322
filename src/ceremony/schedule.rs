//! Systematic random linear coding schedule over GF(2).
//!
//! Frame `i < K` carries source block `i` verbatim. Every later (repair) frame
//! XORs a pseudo-random subset of the source blocks in which each block is
//! included independently with probability one half. The subset is a pure
//! function of `(seed, index, K)`: ChaCha8 seeded with `seed << 32 | index`, so
//! generator and receiver agree without exchanging anything but the header.
//!
//! Dense rows let the elimination decoder finish from any `K + c` frames with
//! probability about `1 - 2^-c`, whatever mix of systematic and repair frames
//! was caught.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Coding schedule of one ceremony.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodingSchedule {
    seed: u32,
    block_count: usize,
}

impl CodingSchedule {
    pub fn new(seed: u32, block_count: usize) -> Self {
        Self { seed, block_count }
    }

    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// True if frame `index` carries a single source block verbatim.
    pub fn is_systematic(&self, index: u32) -> bool {
        (index as usize) < self.block_count
    }

    /// Sorted, distinct source block indices combined into frame `index`.
    pub fn neighbors(&self, index: u32) -> Vec<usize> {
        let k = self.block_count;
        if self.is_systematic(index) {
            return vec![index as usize];
        }

        let mut rng = ChaCha8Rng::seed_from_u64((u64::from(self.seed) << 32) | u64::from(index));
        // An empty row carries nothing; draw again from the same stream.
        loop {
            let mut picked = Vec::with_capacity(k / 2 + 8);
            let mut word = 0u64;
            for block in 0..k {
                if block % 64 == 0 {
                    word = rng.next_u64();
                }
                if word & 1 == 1 {
                    picked.push(block);
                }
                word >>= 1;
            }
            if !picked.is_empty() {
                return picked;
            }
        }
    }
}
