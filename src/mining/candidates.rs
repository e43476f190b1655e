// Per-row candidate generation for orders 2 and 3
//
// Only keys carried forward at order 1 take part. Order-3 candidates are
// further gated on order-2 carry-forward membership (downward closure).
// Membership checks are O(1): a dense key mask for singles and an FNV hash
// set for pairs.

use crate::config::ClosureCheck;
use crate::encoder::EncodedKey;
use crate::itemset::Itemset;
use fnv::FnvHashSet;

/// Builds the candidate itemsets contained in one encoded row
pub trait CandidateGenerator: Sync {
    /// Itemset order produced
    fn order(&self) -> usize;

    /// Upper bound on distinct candidates across all rows
    fn capacity_hint(&self) -> usize;

    /// Append the candidates contained in `row` to `out`
    fn candidates(&self, row: &[EncodedKey], out: &mut Vec<Itemset>);
}

/// Dense membership mask over encoded keys
#[derive(Debug, Clone, Default)]
pub struct KeyMask {
    bits: Vec<bool>,
    len: usize,
}

impl KeyMask {
    /// Mask containing the keys of the given order-1 itemsets
    pub fn from_singles<'a>(singles: impl IntoIterator<Item = &'a Itemset>) -> Self {
        let mut mask = Self::default();
        for set in singles {
            if let [key] = *set.keys() {
                mask.insert(key);
            }
        }
        mask
    }

    pub fn insert(&mut self, key: EncodedKey) {
        let idx = key as usize;
        if idx >= self.bits.len() {
            self.bits.resize(idx + 1, false);
        }
        if !self.bits[idx] {
            self.bits[idx] = true;
            self.len += 1;
        }
    }

    #[inline]
    pub fn contains(&self, key: EncodedKey) -> bool {
        self.bits.get(key as usize).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn choose(n: usize, k: usize) -> usize {
    match k {
        2 => n.saturating_mul(n.saturating_sub(1)) / 2,
        3 => n
            .saturating_mul(n.saturating_sub(1))
            .saturating_mul(n.saturating_sub(2))
            / 6,
        _ => n,
    }
}

/// Every unordered pair of viable keys in a row
#[derive(Debug)]
pub struct PairCandidates<'a> {
    viable: &'a KeyMask,
}

impl<'a> PairCandidates<'a> {
    pub fn new(viable: &'a KeyMask) -> Self {
        Self { viable }
    }
}

impl CandidateGenerator for PairCandidates<'_> {
    fn order(&self) -> usize {
        2
    }

    fn capacity_hint(&self) -> usize {
        choose(self.viable.len(), 2)
    }

    fn candidates(&self, row: &[EncodedKey], out: &mut Vec<Itemset>) {
        for (i, &a) in row.iter().enumerate() {
            if !self.viable.contains(a) {
                continue;
            }
            for &b in &row[i + 1..] {
                if self.viable.contains(b) {
                    out.push(Itemset::pair(a, b));
                }
            }
        }
    }
}

/// Triples of viable keys whose subset pairs were carried forward at order 2
#[derive(Debug)]
pub struct TripleCandidates<'a> {
    viable: &'a KeyMask,
    pairs: &'a FnvHashSet<Itemset>,
    check: ClosureCheck,
}

impl<'a> TripleCandidates<'a> {
    pub fn new(viable: &'a KeyMask, pairs: &'a FnvHashSet<Itemset>, check: ClosureCheck) -> Self {
        Self {
            viable,
            pairs,
            check,
        }
    }
}

impl CandidateGenerator for TripleCandidates<'_> {
    fn order(&self) -> usize {
        3
    }

    fn capacity_hint(&self) -> usize {
        self.pairs
            .len()
            .saturating_mul(self.viable.len())
            .min(choose(self.viable.len(), 3))
    }

    fn candidates(&self, row: &[EncodedKey], out: &mut Vec<Itemset>) {
        for (i, &a) in row.iter().enumerate() {
            if !self.viable.contains(a) {
                continue;
            }
            for (j, &b) in row.iter().enumerate().skip(i + 1) {
                if !self.viable.contains(b) || !self.pairs.contains(&Itemset::pair(a, b)) {
                    continue;
                }
                for &c in &row[j + 1..] {
                    if !self.viable.contains(c) {
                        continue;
                    }
                    let closed = match self.check {
                        ClosureCheck::FirstPair => true,
                        ClosureCheck::AllPairs => {
                            self.pairs.contains(&Itemset::pair(a, c))
                                && self.pairs.contains(&Itemset::pair(b, c))
                        }
                    };
                    if closed {
                        out.push(Itemset::triple(a, b, c));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(keys: &[EncodedKey]) -> KeyMask {
        let mut mask = KeyMask::default();
        for &k in keys {
            mask.insert(k);
        }
        mask
    }

    #[test]
    fn test_key_mask() {
        let m = mask(&[1, 5, 5]);
        assert_eq!(m.len(), 2);
        assert!(m.contains(5));
        assert!(!m.contains(2));
        assert!(!m.contains(1000));
        assert!(KeyMask::default().is_empty());

        let singles = [Itemset::single(3), Itemset::pair(1, 2)];
        let from = KeyMask::from_singles(singles.iter());
        assert_eq!(from.len(), 1);
        assert!(from.contains(3));
    }

    #[test]
    fn test_pairs_skip_non_viable_keys() {
        let viable = mask(&[0, 2, 3]);
        let generator = PairCandidates::new(&viable);
        let mut out = Vec::new();
        generator.candidates(&[0, 1, 2, 3], &mut out);

        assert_eq!(
            out,
            vec![Itemset::pair(0, 2), Itemset::pair(0, 3), Itemset::pair(2, 3)]
        );
        assert_eq!(generator.capacity_hint(), 3);
        assert_eq!(generator.order(), 2);
    }

    #[test]
    fn test_triples_all_pairs_check() {
        let viable = mask(&[0, 1, 2]);
        // (1,2) was not carried forward
        let pairs: FnvHashSet<Itemset> = [Itemset::pair(0, 1), Itemset::pair(0, 2)]
            .into_iter()
            .collect();

        let strict = TripleCandidates::new(&viable, &pairs, ClosureCheck::AllPairs);
        let mut out = Vec::new();
        strict.candidates(&[0, 1, 2], &mut out);
        assert!(out.is_empty());

        let minimal = TripleCandidates::new(&viable, &pairs, ClosureCheck::FirstPair);
        minimal.candidates(&[0, 1, 2], &mut out);
        assert_eq!(out, vec![Itemset::triple(0, 1, 2)]);
    }

    #[test]
    fn test_triples_emitted_when_closed() {
        let viable = mask(&[0, 1, 2, 3]);
        let pairs: FnvHashSet<Itemset> = [
            Itemset::pair(0, 1),
            Itemset::pair(0, 2),
            Itemset::pair(1, 2),
            Itemset::pair(0, 3),
        ]
        .into_iter()
        .collect();

        let generator = TripleCandidates::new(&viable, &pairs, ClosureCheck::AllPairs);
        let mut out = Vec::new();
        generator.candidates(&[0, 1, 2, 3], &mut out);
        assert_eq!(out, vec![Itemset::triple(0, 1, 2)]);
        assert_eq!(generator.order(), 3);
    }

    #[test]
    fn test_choose() {
        assert_eq!(choose(4, 2), 6);
        assert_eq!(choose(5, 3), 10);
        assert_eq!(choose(1, 2), 0);
        assert_eq!(choose(0, 3), 0);
    }
}
