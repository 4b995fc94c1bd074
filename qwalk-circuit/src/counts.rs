//! Measurement histograms.

use std::collections::BTreeMap;
use std::fmt;

/// Shot counts over a classical register.
///
/// Keys are outcome integers with bit `c` holding clbit `c`. Bit-string
/// views print clbit 0 last, the same way the measured register is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counts {
    num_clbits: usize,
    counts: BTreeMap<u64, usize>,
}

impl Counts {
    pub fn new(num_clbits: usize) -> Self {
        Counts {
            num_clbits,
            counts: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, outcome: u64) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    pub fn shots(&self) -> usize {
        self.counts.values().sum()
    }

    /// Count for `outcome`, zero if it was never observed.
    pub fn count(&self, outcome: u64) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Lookup by bit string. Unobserved or malformed keys give `None`.
    pub fn get(&self, bitstring: &str) -> Option<usize> {
        if bitstring.len() != self.num_clbits || !bitstring.bytes().all(|b| b == b'0' || b == b'1') {
            return None;
        }
        let outcome = u64::from_str_radix(bitstring, 2).ok()?;
        self.counts.get(&outcome).copied()
    }

    /// Dense histogram with one bin per possible outcome.
    pub fn histogram(&self) -> Vec<usize> {
        (0..1u64 << self.num_clbits).map(|k| self.count(k)).collect()
    }

    pub fn most_frequent(&self) -> Option<(u64, usize)> {
        self.counts
            .iter()
            .max_by_key(|&(&k, &v)| (v, std::cmp::Reverse(k)))
            .map(|(&k, &v)| (k, v))
    }

    pub fn bitstring(&self, outcome: u64) -> String {
        format!("{:0width$b}", outcome, width = self.num_clbits)
    }

    /// Observed outcomes as (bit string, count) in ascending outcome order.
    pub fn iter(&self) -> impl Iterator<Item = (String, usize)> + '_ {
        self.counts.iter().map(move |(&k, &v)| (self.bitstring(k), v))
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}': {}", key, count)?;
        }
        write!(f, "}}")
    }
}
