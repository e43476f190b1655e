//! Canonical itemsets of order 1 to 3
//!
//! Members are stored sorted so that permutations of the same keys compare
//! equal and hash identically.

use crate::encoder::EncodedKey;
use std::fmt;

/// Highest itemset order mined
pub const MAX_ORDER: usize = 3;

/// Unordered set of 1..=3 distinct encoded keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Itemset {
    len: u8,
    keys: [EncodedKey; MAX_ORDER],
}

impl Itemset {
    /// Order-1 itemset
    pub fn single(a: EncodedKey) -> Self {
        Self {
            len: 1,
            keys: [a, 0, 0],
        }
    }

    /// Order-2 itemset; argument order is irrelevant
    pub fn pair(a: EncodedKey, b: EncodedKey) -> Self {
        debug_assert_ne!(a, b, "itemset members must be distinct");
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self {
            len: 2,
            keys: [lo, hi, 0],
        }
    }

    /// Order-3 itemset; argument order is irrelevant
    pub fn triple(a: EncodedKey, b: EncodedKey, c: EncodedKey) -> Self {
        let mut keys = [a, b, c];
        keys.sort_unstable();
        debug_assert!(
            keys[0] != keys[1] && keys[1] != keys[2],
            "itemset members must be distinct"
        );
        Self { len: 3, keys }
    }

    /// Build from 1..=3 keys, or `None` for any other length
    pub fn from_keys(keys: &[EncodedKey]) -> Option<Self> {
        match *keys {
            [a] => Some(Self::single(a)),
            [a, b] => Some(Self::pair(a, b)),
            [a, b, c] => Some(Self::triple(a, b, c)),
            _ => None,
        }
    }

    /// Number of members
    pub fn order(&self) -> usize {
        self.len as usize
    }

    /// Members in ascending key order
    pub fn keys(&self) -> &[EncodedKey] {
        &self.keys[..self.order()]
    }

    pub fn contains(&self, key: EncodedKey) -> bool {
        self.keys().contains(&key)
    }

    /// All subsets one order lower (empty for singles)
    pub fn subsets(&self) -> Vec<Itemset> {
        match *self.keys() {
            [a, b] => vec![Self::single(a), Self::single(b)],
            [a, b, c] => vec![Self::pair(a, b), Self::pair(a, c), Self::pair(b, c)],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, key) in self.keys().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", key)?;
        }
        write!(f, "}}")
    }
}
