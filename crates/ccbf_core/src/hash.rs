//! FNV-1 (multiply, then xor) and the round chaining used to derive bit positions.
//!
//! Round 0 hashes the word itself; every later round hashes the little-endian
//! bytes of the previous digest. Stored filters depend on this exact sequence.

use crate::consts::{FNV_OFFSET_BASIS, FNV_PRIME};

#[inline]
pub fn digest(bytes: &[u8]) -> u64 {
    let mut h = FNV_OFFSET_BASIS;
    for &b in bytes {
        h = h.wrapping_mul(FNV_PRIME);
        h ^= b as u64;
    }
    h
}

#[inline]
pub fn next_seed(h: u64) -> [u8; 8] { h.to_le_bytes() }

/// Yields exactly `rounds` digests for one word.
#[derive(Clone, Debug)]
pub struct HashChain<'a> {
    word: &'a [u8],
    prev: Option<u64>,
    left: u8,
}

impl<'a> HashChain<'a> {
    pub fn new(word: &'a [u8], rounds: u8) -> Self {
        Self { word, prev: None, left: rounds }
    }
}

impl Iterator for HashChain<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.left == 0 { return None; }
        self.left -= 1;
        let h = match self.prev {
            None => digest(self.word),
            Some(p) => digest(&next_seed(p)),
        };
        self.prev = Some(h);
        Some(h)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.left as usize, Some(self.left as usize))
    }
}

impl ExactSizeIterator for HashChain<'_> {}

/// Bit positions for `word`; `bit_count` must be non-zero.
#[inline]
pub fn positions(word: &[u8], rounds: u8, bit_count: u64) -> impl Iterator<Item = u64> + '_ {
    HashChain::new(word, rounds).map(move |h| h % bit_count)
}
