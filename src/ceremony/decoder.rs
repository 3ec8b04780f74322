//! Incremental GF(2) decoder.
//!
//! Every accepted frame is one linear equation over the source blocks. Rows
//! are kept in echelon form keyed by their lowest set column; a new row is
//! reduced against existing pivots and either becomes a new pivot or turns
//! out to be redundant. Once `K` pivots exist, back-substitution yields the
//! source blocks. Any `K` linearly independent frames decode, in any order.

use zeroize::Zeroizing;

use crate::core::xor::xor_in_place;

struct Row {
    coeffs: Vec<u64>,
    data: Zeroizing<Vec<u8>>,
}

impl Row {
    fn lowest_set(&self) -> Option<usize> {
        self.coeffs
            .iter()
            .enumerate()
            .find(|(_, &w)| w != 0)
            .map(|(i, w)| i * 64 + w.trailing_zeros() as usize)
    }

    fn is_set(&self, col: usize) -> bool {
        self.coeffs[col / 64] & (1 << (col % 64)) != 0
    }

    fn eliminate(&mut self, pivot: &Row) {
        for (a, b) in self.coeffs.iter_mut().zip(&pivot.coeffs) {
            *a ^= *b;
        }
        xor_in_place(&mut self.data, &pivot.data);
    }
}

/// Decoding state for `block_count` source blocks of `block_size` bytes.
pub struct Decoder {
    block_count: usize,
    block_size: usize,
    pivots: Vec<Option<Row>>,
    rank: usize,
}

impl Decoder {
    pub fn new(block_count: usize, block_size: usize) -> Self {
        Self {
            block_count,
            block_size,
            pivots: (0..block_count).map(|_| None).collect(),
            rank: 0,
        }
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn block_count(&self) -> usize {
        self.block_count
    }

    pub fn is_complete(&self) -> bool {
        self.rank == self.block_count
    }

    /// Adds the equation `XOR(blocks[neighbors]) == data`.
    ///
    /// Returns `true` if it raised the rank, `false` if it was redundant.
    /// Callers guarantee `neighbors` are in range and `data.len() == block_size`.
    pub fn add(&mut self, neighbors: &[usize], data: &[u8]) -> bool {
        if self.is_complete() {
            return false;
        }
        let mut row = Row {
            coeffs: vec![0u64; self.block_count.div_ceil(64)],
            data: Zeroizing::new(data.to_vec()),
        };
        for &col in neighbors {
            row.coeffs[col / 64] ^= 1 << (col % 64);
        }

        while let Some(col) = row.lowest_set() {
            match &self.pivots[col] {
                Some(pivot) => row.eliminate(pivot),
                None => {
                    self.pivots[col] = Some(row);
                    self.rank += 1;
                    log::trace!("decoder rank {}/{}", self.rank, self.block_count);
                    return true;
                }
            }
        }
        false
    }

    /// Concatenated source blocks once every pivot is known.
    pub fn reconstruct(&self) -> Option<Zeroizing<Vec<u8>>> {
        if !self.is_complete() {
            return None;
        }
        let b = self.block_size;
        let mut out = Zeroizing::new(vec![0u8; self.block_count * b]);
        for col in (0..self.block_count).rev() {
            let row = self.pivots[col].as_ref()?;
            let mut block = Zeroizing::new(row.data.to_vec());
            // Pivot rows only reference higher columns, which are already solved.
            for j in col + 1..self.block_count {
                if row.is_set(j) {
                    xor_in_place(&mut block, &out[j * b..(j + 1) * b]);
                }
            }
            out[col * b..(col + 1) * b].copy_from_slice(&block);
        }
        Some(out)
    }
}
