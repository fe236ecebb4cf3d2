//! Seed word lists: one word per line, `\n` or `\r\n` terminated.
use crate::config::FilterConfig;
use crate::errors::{CcbfError, Result};
use crate::filter::BloomFilter;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Raw bytes of each line, terminator stripped. Blank lines are yielded as empty words.
pub fn read_words<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Vec<u8>>> {
    reader.split(b'\n').map(|line| {
        let mut line = line?;
        if line.last() == Some(&b'\r') { line.pop(); }
        Ok(line)
    })
}

pub fn build_from_reader<R: BufRead>(reader: R, cfg: &FilterConfig) -> Result<BloomFilter> {
    let mut bf = BloomFilter::create(cfg.capacity, cfg.error_rate);
    for word in read_words(reader) {
        bf.insert(&word?);
    }
    tracing::info!(
        words = bf.inserted(),
        k = bf.hash_rounds(),
        m = bf.bit_count(),
        collisions = bf.insert_collisions(),
        "filter built"
    );
    Ok(bf)
}

pub fn build_from_path(path: impl AsRef<Path>, cfg: &FilterConfig) -> Result<BloomFilter> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|source| CcbfError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    build_from_reader(BufReader::new(f), cfg)
}
