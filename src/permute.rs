//! Deterministic coefficient selection.
//!
//! The carrier cells are visited in a pseudo-random order produced by a Fisher-Yates shuffle
//! driven by a ChaCha20 generator seeded with [`rand::SeedableRng::seed_from_u64`]. The shuffle is
//! part of the watermark format: the embedder and extractor must generate exactly the same
//! permutation, or every recovered bit is noise.
//!
//! # Cross-platform portability
//!
//! The swap index is drawn with `gen_range` over `u32` rather than `usize`, so the generator
//! consumes the same amount of entropy per step on 32 and 64 bit targets.

use log::warn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::payload::PAYLOAD_BITS;

/// Largest number of cells that can be shuffled; every swap index must fit in a `u32`.
pub const MAX_CELLS: u64 = 1 << 32;

/// Permutation of `0..len`, shuffled with the portable Fisher-Yates variant.
///
/// # Panics
/// If `len` exceeds [`MAX_CELLS`].
pub fn permutation(len: usize, seed: u64) -> Vec<usize> {
    assert!(
        len as u64 <= MAX_CELLS,
        "cannot permute {len} cells, the limit is {MAX_CELLS}"
    );
    let mut indices: Vec<usize> = (0..len).collect();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    for i in (1..len).rev() {
        let j = rng.gen_range(0..=(i as u32)) as usize;
        indices.swap(i, j);
    }
    indices
}

/// Assignment of carrier cells to payload bits.
///
/// Each bit owns a contiguous, disjoint slice of the permutation. Cells past the last group are
/// never touched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitGroups {
    indices: Vec<usize>,
    group_size: usize,
}

impl BitGroups {
    /// Create the groups for a carrier with `carrier_len` cells.
    pub fn new(carrier_len: usize, seed: u64, max_group_size: usize) -> Self {
        let group_size = Self::group_size_for(carrier_len, max_group_size);
        if group_size == 0 {
            warn!(
                "carrier of {carrier_len} cells is too small to hold {PAYLOAD_BITS} bits, \
                 nothing will be embedded"
            );
        }
        BitGroups {
            indices: permutation(carrier_len, seed),
            group_size,
        }
    }

    /// Cells per bit, `min(carrier_len / 32, max_group_size)`.
    pub fn group_size_for(carrier_len: usize, max_group_size: usize) -> usize {
        (carrier_len / PAYLOAD_BITS).min(max_group_size)
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// The permutation the groups are taken from.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Flat carrier indices belonging to `bit`.
    pub fn group(&self, bit: usize) -> &[usize] {
        assert!(bit < PAYLOAD_BITS, "bit index {bit} out of range");
        &self.indices[bit * self.group_size..(bit + 1) * self.group_size]
    }

    /// Iterate over the groups in bit order.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        (0..PAYLOAD_BITS).map(move |bit| self.group(bit))
    }
}
