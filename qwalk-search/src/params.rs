//! Parameter space of the sweep.
//!
//! One combination fixes the 11-bit initial register (aux, coin, node, theta)
//! and the 4-bit marked node. The 15-bit combination index concatenates them
//! in that order, so counting the index upwards reproduces the nested loop
//! aux → coin → node → theta → target with target innermost.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::errors::{Result, WalkError};

pub const AUX_BITS: u8 = 1;
pub const COIN_BITS: u8 = 2;
pub const NODE_BITS: u8 = 4;
pub const THETA_BITS: u8 = 4;
pub const TARGET_BITS: u8 = 4;

/// Number of parameter combinations (2^15).
pub const NUM_COMBINATIONS: usize = 1 << (AUX_BITS + COIN_BITS + NODE_BITS + THETA_BITS + TARGET_BITS);

/// A fixed-width binary string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString {
    value: u16,
    width: u8,
}

impl BitString {
    pub fn new(value: u16, width: u8) -> Result<Self> {
        if width == 0 || width > 16 || (width < 16 && value >> width != 0) {
            return Err(WalkError::InvalidBits {
                text: value.to_string(),
                width,
            });
        }
        Ok(BitString { value, width })
    }

    pub fn parse(text: &str, width: u8) -> Result<Self> {
        let invalid = || WalkError::InvalidBits {
            text: text.to_string(),
            width,
        };
        if text.len() != width as usize || !text.chars().all(|c| c == '0' || c == '1') {
            return Err(invalid());
        }
        let value = u16::from_str_radix(text, 2).map_err(|_| invalid())?;
        BitString::new(value, width)
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    /// Whether position `i` of the printed string (0 = leftmost) is `'1'`.
    /// Positions past the end read as `false`.
    pub fn char_is_one(&self, i: usize) -> bool {
        let width = self.width as usize;
        i < width && (self.value >> (width - 1 - i)) & 1 == 1
    }

    fn mask(width: u8, bits: usize) -> u16 {
        (bits & ((1usize << width) - 1)) as u16
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.width as usize)
    }
}

/// Parses without a known width; the width is the string length.
impl FromStr for BitString {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self> {
        let width = u8::try_from(s.len()).unwrap_or(0);
        BitString::parse(s, width)
    }
}

/// One point of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WalkParams {
    pub aux: BitString,
    pub coin: BitString,
    pub node: BitString,
    pub theta: BitString,
    pub target: BitString,
}

impl WalkParams {
    /// Build from the five fields as printed, e.g. `("0", "01", "1100", "0000", "1011")`.
    pub fn parse(aux: &str, coin: &str, node: &str, theta: &str, target: &str) -> Result<Self> {
        Ok(WalkParams {
            aux: BitString::parse(aux, AUX_BITS)?,
            coin: BitString::parse(coin, COIN_BITS)?,
            node: BitString::parse(node, NODE_BITS)?,
            theta: BitString::parse(theta, THETA_BITS)?,
            target: BitString::parse(target, TARGET_BITS)?,
        })
    }

    pub fn from_index(index: usize) -> Result<Self> {
        if index >= NUM_COMBINATIONS {
            return Err(WalkError::IndexOutOfRange(index));
        }
        let mut rest = index;
        let mut take = |width: u8| {
            let bits = BitString {
                value: BitString::mask(width, rest),
                width,
            };
            rest >>= width;
            bits
        };
        let target = take(TARGET_BITS);
        let theta = take(THETA_BITS);
        let node = take(NODE_BITS);
        let coin = take(COIN_BITS);
        let aux = take(AUX_BITS);
        Ok(WalkParams {
            aux,
            coin,
            node,
            theta,
            target,
        })
    }

    pub fn index(&self) -> usize {
        (self.init_index() << TARGET_BITS) | self.target.value as usize
    }

    /// Initial register label: aux, coin, node, theta concatenated.
    ///
    /// Read little-endian, theta lands on qubits 0–3, node on 4–7, coin on
    /// 8–9 and aux on 10.
    pub fn init_label(&self) -> String {
        format!("{}{}{}{}", self.aux, self.coin, self.node, self.theta)
    }

    pub fn init_index(&self) -> usize {
        let mut index = self.aux.value as usize;
        for field in [&self.coin, &self.node, &self.theta] {
            index = (index << field.width) | field.value as usize;
        }
        index
    }
}

impl fmt::Display for WalkParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "aux={} coin={} node={} theta={} target={}",
            self.aux, self.coin, self.node, self.theta, self.target
        )
    }
}

/// A contiguous slice of the sweep, in sweep order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpace {
    range: Range<usize>,
}

impl ParameterSpace {
    pub fn full() -> Self {
        ParameterSpace {
            range: 0..NUM_COMBINATIONS,
        }
    }

    pub fn range(start: usize, end: usize) -> Result<Self> {
        if start > end || end > NUM_COMBINATIONS {
            return Err(WalkError::InvalidRange { start, end });
        }
        Ok(ParameterSpace { range: start..end })
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// The sub-range left after skipping the first `done` combinations.
    pub fn skip(&self, done: usize) -> ParameterSpace {
        let start = (self.range.start + done).min(self.range.end);
        ParameterSpace {
            range: start..self.range.end,
        }
    }

    pub fn indices(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = WalkParams> {
        // indices are always below NUM_COMBINATIONS
        self.range.clone().filter_map(|k| WalkParams::from_index(k).ok())
    }
}

impl Default for ParameterSpace {
    fn default() -> Self {
        Self::full()
    }
}
