// crates/ccbf_core/src/consts.rs

pub const MAGIC: &[u8; 4] = b"CCBF";
pub const VERSION: u16 = 1;

/// magic(4) + version(2) + hash_rounds(2) + bit_count(8)
pub const HDR_SIZE: usize = 16;

pub const FNV_OFFSET_BASIS: u64 = 14695981039346656037;
pub const FNV_PRIME: u64 = 1099511628211;

pub const DEFAULT_CAPACITY: f64 = 470_000.0;
pub const DEFAULT_ERROR_RATE: f64 = 0.001;
pub const DEFAULT_FILTER_PATH: &str = "tmp/words.bf";

const _: () = { assert!(MAGIC.len() + 2 + 2 + 8 == HDR_SIZE); };
