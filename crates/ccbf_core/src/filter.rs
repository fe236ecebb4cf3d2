//! Capacity-sized Bloom filter over FNV-1 chained bit positions.
//!
//! Sizing keeps the truncating casts of the stored format: `k as u8` and
//! `m as u64` drop the fractional part, so the realized false-positive rate
//! is slightly worse than requested for small capacities.
use std::fmt;

use crate::bits::BitVector;
use crate::hash::positions;

#[derive(Clone, Debug)]
pub struct BloomFilter {
    hash_rounds: u8,
    bit_count: u64,
    bits: BitVector,
    inserted: u64,
    insert_collisions: u64,
}

impl BloomFilter {
    /// Optimal `m`/`k` for `expected_elements` at `target_fpr`.
    ///
    /// Expects `expected_elements > 0` and `0 < target_fpr < 1`; other inputs
    /// produce a degenerate filter rather than an error.
    pub fn create(expected_elements: f64, target_fpr: f64) -> Self {
        let ln2 = std::f64::consts::LN_2;
        let m = -(expected_elements * target_fpr.ln()) / (ln2 * ln2);
        let k = m / expected_elements * ln2;
        tracing::debug!(expected_elements, target_fpr, m, k, "sizing bloom filter");
        Self::new(k as u8, m as u64)
    }

    /// Empty filter with explicit parameters.
    pub fn new(hash_rounds: u8, bit_count: u64) -> Self {
        Self {
            hash_rounds,
            bit_count,
            bits: BitVector::zeroed(bit_count),
            inserted: 0,
            insert_collisions: 0,
        }
    }

    /// Rebuild from stored parts. A bitmap shorter than `ceil(bit_count / 8)`
    /// is zero-extended so every position stays addressable.
    pub fn from_parts(hash_rounds: u8, bit_count: u64, mut bitmap: Vec<u8>) -> Self {
        let need = bit_count.div_ceil(8) as usize;
        if bitmap.len() < need { bitmap.resize(need, 0); }
        Self {
            hash_rounds,
            bit_count,
            bits: BitVector::from_bytes(bitmap),
            inserted: 0,
            insert_collisions: 0,
        }
    }

    pub fn insert(&mut self, word: &[u8]) {
        if self.bit_count == 0 { return; }
        let mut fresh = false;
        for pos in positions(word, self.hash_rounds, self.bit_count) {
            fresh |= self.bits.set(pos);
        }
        self.inserted += 1;
        if !fresh { self.insert_collisions += 1; }
    }

    /// `false` means definitely absent; `true` means probably present.
    pub fn query(&self, word: &[u8]) -> bool {
        if self.bit_count == 0 { return true; }
        positions(word, self.hash_rounds, self.bit_count).all(|pos| self.bits.test(pos))
    }

    pub fn hash_rounds(&self) -> u8 { self.hash_rounds }
    pub fn bit_count(&self) -> u64 { self.bit_count }
    pub fn inserted(&self) -> u64 { self.inserted }
    pub fn insert_collisions(&self) -> u64 { self.insert_collisions }
    pub fn bitmap(&self) -> &[u8] { self.bits.as_bytes() }
    pub fn ones(&self) -> u64 { self.bits.count_ones() }

    /// `(ones / bit_count) ^ k`, the chance a random absent word passes.
    pub fn estimated_fpr(&self) -> f64 {
        if self.bit_count == 0 { return 1.0; }
        let fill = self.ones() as f64 / self.bit_count as f64;
        fill.powi(self.hash_rounds as i32)
    }
}

impl fmt::Display for BloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "hash rounds:        {}", self.hash_rounds)?;
        writeln!(f, "bit count:          {}", self.bit_count)?;
        writeln!(f, "bitmap bytes:       {}", self.bitmap().len())?;
        writeln!(f, "bits set:           {}", self.ones())?;
        writeln!(f, "inserted elements:  {}", self.inserted)?;
        writeln!(f, "insert collisions:  {}", self.insert_collisions)?;
        write!(f, "estimated fp rate:  {:.6}", self.estimated_fpr())
    }
}
