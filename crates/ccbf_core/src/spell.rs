use crate::filter::BloomFilter;
use std::fmt;

/// Words the filter has definitely never seen, in input order.
pub fn misspelled<'a, I, S>(bf: &BloomFilter, words: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    words
        .into_iter()
        .map(|w| w.as_ref())
        .filter(|w| !bf.query(w.as_bytes()))
        .collect()
}

pub struct SpellReport<'a> {
    pub wrong: Vec<&'a str>,
}

impl fmt::Display for SpellReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wrong.is_empty() {
            return write!(f, "No words were spelt wrong!");
        }
        write!(f, "These words were spelt wrong:")?;
        for w in &self.wrong {
            write!(f, "\n\t{w}")?;
        }
        Ok(())
    }
}
