pub mod consts;
pub mod errors;
pub mod hash;
pub mod bits;
pub mod filter;
pub mod codec;
pub mod config;
pub mod wordlist;
pub mod spell;
pub mod accuracy;

pub use accuracy::AccuracyReport;
pub use bits::BitVector;
pub use codec::{decode, encode, load, save};
pub use config::FilterConfig;
pub use errors::{CcbfError, Result};
pub use filter::BloomFilter;
pub use hash::{digest, HashChain};
pub use spell::{misspelled, SpellReport};
