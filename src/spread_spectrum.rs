//! Spread spectrum modulation of the payload bits onto a carrier subband.
//!
//! Every bit is spread over a group of carrier cells. Embedding adds `+strength` to each cell of
//! the group for a one and `-strength` for a zero. Extraction sums the cells of each group and
//! takes the sign; content of the cover image that is uncorrelated with the selection averages
//! out in the sum.
//!
//! There is no notion of confidence: the extractor always returns a full set of bits, also for
//! images that never carried a watermark.

use log::debug;

use crate::payload::{Bits, PAYLOAD_BITS};
use crate::permute::BitGroups;
use crate::ycbcr::Luma32FImage;

/// Adds payload bits to a carrier.
#[derive(Clone, Debug)]
pub struct Embedder {
    strength: f32,
    seed: u64,
    max_group_size: usize,
}

impl Embedder {
    pub fn new(strength: f32, seed: u64, max_group_size: usize) -> Self {
        Embedder {
            strength,
            seed,
            max_group_size,
        }
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Return a copy of the carrier with the bits embedded.
    ///
    /// Embedding into an already marked carrier adds to the existing bias.
    pub fn inject(&self, carrier: &Luma32FImage, bits: &Bits) -> Luma32FImage {
        let mut carrier = carrier.clone();
        let groups = BitGroups::new(carrier.len(), self.seed, self.max_group_size);
        debug!(
            "embedding {PAYLOAD_BITS} bits into {}x{} carrier, {} cells per bit",
            carrier.width(),
            carrier.height(),
            groups.group_size()
        );
        Self::embed_bits(&mut carrier, &groups, self.strength, bits);
        carrier
    }

    /// Modify the cells of each group according to its bit.
    fn embed_bits(coefficients: &mut [f32], groups: &BitGroups, strength: f32, bits: &Bits) {
        for (group, bit) in groups.iter().zip(bits.iter()) {
            let change = if *bit { strength } else { -strength };
            for index in group {
                coefficients[*index] += change;
            }
        }
    }
}

/// Recovers payload bits from a carrier.
#[derive(Clone, Debug)]
pub struct Extractor {
    seed: u64,
    max_group_size: usize,
}

impl Extractor {
    pub fn new(seed: u64, max_group_size: usize) -> Self {
        Extractor {
            seed,
            max_group_size,
        }
    }

    /// Sum of the carrier cells in each bit group.
    pub fn correlate(&self, carrier: &Luma32FImage) -> [f32; PAYLOAD_BITS] {
        let groups = BitGroups::new(carrier.len(), self.seed, self.max_group_size);
        Self::group_sums(carrier, &groups)
    }

    /// Recover the bits, a bit is one if its group sums to strictly more than zero.
    pub fn recover(&self, carrier: &Luma32FImage) -> Bits {
        let sums = self.correlate(carrier);
        let margin = sums.iter().map(|s| s.abs()).fold(f32::INFINITY, f32::min);
        debug!(
            "recovered bits from {}x{} carrier, smallest correlation magnitude {margin}",
            carrier.width(),
            carrier.height()
        );
        sums.map(|s| s > 0.0)
    }

    fn group_sums(coefficients: &[f32], groups: &BitGroups) -> [f32; PAYLOAD_BITS] {
        let mut sums = [0f32; PAYLOAD_BITS];
        for (sum, group) in sums.iter_mut().zip(groups.iter()) {
            *sum = group.iter().map(|index| coefficients[*index]).sum();
        }
        sums
    }
}
