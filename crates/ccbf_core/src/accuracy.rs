//! Empirical error rates: insert a random half of a word list, query all of it.
use crate::config::FilterConfig;
use crate::errors::Result;
use crate::filter::BloomFilter;
use crate::wordlist::read_words;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::io::BufRead;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccuracyReport {
    pub words: u64,
    pub inserted: u64,
    pub held_out: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    /// Over held-out words only.
    pub false_positive_rate: f64,
    pub estimated_fpr: f64,
}

/// Duplicate words keep the fate of their first occurrence.
pub fn measure<I, R>(words: I, cfg: &FilterConfig, rng: &mut R) -> AccuracyReport
where
    I: IntoIterator<Item = Vec<u8>>,
    R: Rng,
{
    let mut bf = BloomFilter::create(cfg.capacity, cfg.error_rate);
    let mut seen = HashSet::new();
    let mut truth: Vec<(Vec<u8>, bool)> = Vec::new();
    for w in words {
        if !seen.insert(w.clone()) { continue; }
        let keep = rng.random::<u32>() < u32::MAX / 2;
        if keep { bf.insert(&w); }
        truth.push((w, keep));
    }

    let (mut fp, mut fneg) = (0u64, 0u64);
    for (w, did_insert) in &truth {
        match (did_insert, bf.query(w)) {
            (false, true) => fp += 1,
            (true, false) => fneg += 1,
            _ => {}
        }
    }
    let words = truth.len() as u64;
    let held_out = words - bf.inserted();
    let rate = if held_out > 0 { fp as f64 / held_out as f64 } else { 0.0 };
    tracing::info!(words, inserted = bf.inserted(), fp, fneg, rate, "accuracy measured");
    AccuracyReport {
        words,
        inserted: bf.inserted(),
        held_out,
        false_positives: fp,
        false_negatives: fneg,
        false_positive_rate: rate,
        estimated_fpr: bf.estimated_fpr(),
    }
}

pub fn measure_reader<B: BufRead, R: Rng>(
    reader: B,
    cfg: &FilterConfig,
    rng: &mut R,
) -> Result<AccuracyReport> {
    let words = read_words(reader).collect::<Result<Vec<_>>>()?;
    Ok(measure(words, cfg, rng))
}
