//! Text rows of the sweep output.
//!
//! A row is the five parameter strings followed by one right-justified hit
//! count per node outcome, 0000 through 1111:
//!
//! ```text
//! 0 00 0000 0000   1011      9   7   8 ... 907   6   8   7   9
//! ```
//!
//! Outcomes that were never observed are written as 0.

use std::fmt;

use qwalk_circuit::counts::Counts;

use crate::errors::{Result, WalkError};
use crate::params::{WalkParams, NODE_BITS};

/// Number of histogram columns per row.
pub const NUM_BINS: usize = 1 << NODE_BITS;

/// Narrowest count column.
pub const MIN_COLUMN_WIDTH: usize = 4;

/// Column layout, for documentation only; never written to the data file.
pub const ROW_LAYOUT: &str = "\
|      Init string        |   |Target|  |                   Number of hits for each state                               |
<aux> <coin> <node> <theta>   <target>   0000 0001 0010 0011 0100 0101 0110 0111 1000 1001 1010 1011 1100 1101 1110 1111";

/// Count column width that keeps `shots` hits aligned.
pub fn column_width(shots: usize) -> usize {
    shots.to_string().len().max(MIN_COLUMN_WIDTH)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramRow {
    pub params: WalkParams,
    pub bins: [usize; NUM_BINS],
    pub width: usize,
}

impl HistogramRow {
    pub fn from_counts(params: WalkParams, counts: &Counts, shots: usize) -> Self {
        let mut bins = [0usize; NUM_BINS];
        for (outcome, bin) in bins.iter_mut().enumerate() {
            *bin = counts.count(outcome as u64);
        }
        HistogramRow {
            params,
            bins,
            width: column_width(shots),
        }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    /// Parse a row written by [`HistogramRow`]'s `Display`.
    ///
    /// `line` is the 1-based line number used in error messages.
    pub fn parse(text: &str, line: usize) -> Result<Self> {
        let malformed = |reason: String| WalkError::MalformedRow { line, reason };

        let mut fields = text.split_whitespace();
        let mut next = |name: &str| {
            fields
                .next()
                .ok_or_else(|| malformed(format!("missing {} field", name)))
        };
        let aux = next("aux")?;
        let coin = next("coin")?;
        let node = next("node")?;
        let theta = next("theta")?;
        let target = next("target")?;
        let params = WalkParams::parse(aux, coin, node, theta, target)
            .map_err(|e| malformed(e.to_string()))?;

        let prefix = format!("{} {} {} {}   {}   ", aux, coin, node, theta, target);
        let body = text
            .strip_prefix(prefix.as_str())
            .ok_or_else(|| malformed("parameter columns are not in the expected layout".to_string()))?;
        if body.is_empty() || body.len() % NUM_BINS != 0 {
            return Err(malformed(format!(
                "expected {} equal-width count columns, got {} characters",
                NUM_BINS,
                body.len()
            )));
        }
        let width = body.len() / NUM_BINS;
        if width < MIN_COLUMN_WIDTH || !body.is_ascii() {
            return Err(malformed(format!("count columns are {} wide", width)));
        }

        let mut bins = [0usize; NUM_BINS];
        for (k, bin) in bins.iter_mut().enumerate() {
            let column = &body[k * width..(k + 1) * width];
            *bin = column
                .trim_start()
                .parse()
                .map_err(|_| malformed(format!("column {} is not a count: '{}'", k, column)))?;
        }

        Ok(HistogramRow { params, bins, width })
    }
}

impl fmt::Display for HistogramRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.params;
        write!(f, "{} {} {} {}   {}   ", p.aux, p.coin, p.node, p.theta, p.target)?;
        for count in &self.bins {
            write!(f, "{:>width$}", count, width = self.width)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(u64, usize)]) -> Counts {
        let mut c = Counts::new(4);
        for &(outcome, n) in entries {
            for _ in 0..n {
                c.record(outcome);
            }
        }
        c
    }

    #[test]
    fn test_row_layout() {
        let params = WalkParams::parse("0", "01", "0010", "1111", "1011").unwrap();
        let row = HistogramRow::from_counts(params, &counts(&[(0b1011, 1000), (0, 24)]), 1024);
        let text = row.to_string();
        assert!(text.starts_with("0 01 0010 1111   1011     24   0   0"));
        assert!(text.ends_with("1000   0   0   0   0"));
        assert_eq!(text.len(), 24 + 16 * 4);
    }

    #[test]
    fn test_unobserved_bins_are_zero() {
        let params = WalkParams::from_index(0).unwrap();
        let row = HistogramRow::from_counts(params, &Counts::new(4), 1024);
        assert_eq!(row.bins, [0; NUM_BINS]);
        assert_eq!(row.total(), 0);
    }

    #[test]
    fn test_full_column_of_1024_still_parses() {
        let params = WalkParams::from_index(12345).unwrap();
        let row = HistogramRow::from_counts(params, &counts(&[(7, 1024)]), 1024);
        let text = row.to_string();
        assert!(text.contains("   01024   0"));
        let parsed = HistogramRow::parse(&text, 1).unwrap();
        assert_eq!(parsed, row);
        assert_eq!(parsed.total(), 1024);
    }

    #[test]
    fn test_wide_columns_for_large_shot_counts() {
        assert_eq!(column_width(1024), 4);
        assert_eq!(column_width(20000), 5);
        let params = WalkParams::from_index(1).unwrap();
        let row = HistogramRow::from_counts(params, &counts(&[(3, 12)]), 20000);
        assert_eq!(HistogramRow::parse(&row.to_string(), 9).unwrap().width, 5);
    }

    #[test]
    fn test_parse_rejects_damaged_rows() {
        let params = WalkParams::from_index(77).unwrap();
        let good = HistogramRow::from_counts(params, &counts(&[(1, 5)]), 1024).to_string();

        let truncated = &good[..good.len() - 2];
        assert!(matches!(
            HistogramRow::parse(truncated, 3),
            Err(WalkError::MalformedRow { line: 3, .. })
        ));
        let respaced = good.replacen("   ", " ", 1);
        assert!(HistogramRow::parse(&respaced, 4).is_err());
        let garbage = good.replace("   5", "  x5");
        assert!(HistogramRow::parse(&garbage, 5).is_err());
        assert!(HistogramRow::parse("0 00 0000", 6).is_err());
    }
}
