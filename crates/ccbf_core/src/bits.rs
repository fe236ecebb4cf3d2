//! Fixed-length packed bit storage. Byte = position / 8, bit = position % 8, LSB first.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitVector {
    bytes: Box<[u8]>,
}

impl BitVector {
    /// Zeroed vector able to address at least `len_bits` bits.
    pub fn zeroed(len_bits: u64) -> Self {
        let bytes = len_bits.div_ceil(8) as usize;
        Self { bytes: vec![0u8; bytes].into_boxed_slice() }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes: bytes.into_boxed_slice() }
    }

    /// Returns true if the bit was clear before.
    #[inline]
    pub fn set(&mut self, position: u64) -> bool {
        let idx = (position / 8) as usize; let mask = 1u8 << (position & 7);
        let was_clear = self.bytes[idx] & mask == 0;
        self.bytes[idx] |= mask;
        was_clear
    }

    #[inline]
    pub fn test(&self, position: u64) -> bool {
        let idx = (position / 8) as usize; let mask = 1u8 << (position & 7);
        self.bytes[idx] & mask != 0
    }

    pub fn len_bits(&self) -> u64 { self.bytes.len() as u64 * 8 }

    pub fn count_ones(&self) -> u64 {
        self.bytes.iter().map(|b| b.count_ones() as u64).sum()
    }

    pub fn as_bytes(&self) -> &[u8] { &self.bytes }
}
