// Row scan: accumulates total and outlier counts per candidate itemset
//
// Slots are assigned in first-seen order. The parallel path counts
// contiguous row partitions into local tables and merges them in
// partition order, which reproduces the sequential slot assignment.

use crate::encoder::{EncodedKey, EncodedRows};
use crate::itemset::Itemset;
use crate::mining::candidates::CandidateGenerator;
use crate::outlier::OutlierFlags;
use fnv::FnvHashMap;
use std::ops::Range;

/// Presizing stops here; larger tables grow on demand
const PREALLOCATION_LIMIT: usize = 1 << 20;

/// Candidate → slot index with per-slot counters
#[derive(Debug, Clone, Default)]
pub struct CountTable {
    index: FnvHashMap<Itemset, usize>,
    itemsets: Vec<Itemset>,
    counts: Vec<usize>,
    outlier_counts: Vec<usize>,
}

impl CountTable {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(PREALLOCATION_LIMIT);
        Self {
            index: FnvHashMap::with_capacity_and_hasher(capacity, Default::default()),
            itemsets: Vec::with_capacity(capacity),
            counts: Vec::with_capacity(capacity),
            outlier_counts: Vec::with_capacity(capacity),
        }
    }

    /// Dense table for order 1: slot `k` holds the counts of key `k`
    pub fn from_dense_singles(counts: Vec<usize>, outlier_counts: Vec<usize>) -> Self {
        debug_assert_eq!(counts.len(), outlier_counts.len());
        let itemsets: Vec<Itemset> = (0..counts.len() as EncodedKey)
            .map(Itemset::single)
            .collect();
        let index = itemsets
            .iter()
            .enumerate()
            .map(|(slot, &set)| (set, slot))
            .collect();
        Self {
            index,
            itemsets,
            counts,
            outlier_counts,
        }
    }

    fn slot(&mut self, set: Itemset) -> usize {
        if let Some(&slot) = self.index.get(&set) {
            return slot;
        }
        let slot = self.itemsets.len();
        self.index.insert(set, slot);
        self.itemsets.push(set);
        self.counts.push(0);
        self.outlier_counts.push(0);
        slot
    }

    /// Count one occurrence of `set`
    pub fn record(&mut self, set: Itemset, is_outlier: bool) {
        self.add(set, 1, usize::from(is_outlier));
    }

    fn add(&mut self, set: Itemset, count: usize, outlier_count: usize) {
        let slot = self.slot(set);
        self.counts[slot] += count;
        self.outlier_counts[slot] += outlier_count;
    }

    /// Fold another table in; its new itemsets get slots after ours, in its order
    pub fn merge(&mut self, other: CountTable) {
        for ((set, count), outlier_count) in other
            .itemsets
            .into_iter()
            .zip(other.counts)
            .zip(other.outlier_counts)
        {
            self.add(set, count, outlier_count);
        }
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    pub fn slot_of(&self, set: &Itemset) -> Option<usize> {
        self.index.get(set).copied()
    }

    /// Itemsets in slot order
    pub fn itemsets(&self) -> &[Itemset] {
        &self.itemsets
    }

    pub fn count(&self, slot: usize) -> usize {
        self.counts[slot]
    }

    pub fn outlier_count(&self, slot: usize) -> usize {
        self.outlier_counts[slot]
    }
}

/// Count every encoded key (order 1) into dense per-key arrays
pub fn count_singles(rows: &EncodedRows, flags: &OutlierFlags, num_keys: usize) -> CountTable {
    let mut counts = vec![0usize; num_keys];
    let mut outlier_counts = vec![0usize; num_keys];

    for (i, row) in rows.iter().enumerate() {
        let is_outlier = flags.is_outlier(i);
        for &key in row {
            counts[key as usize] += 1;
            if is_outlier {
                outlier_counts[key as usize] += 1;
            }
        }
    }

    CountTable::from_dense_singles(counts, outlier_counts)
}

fn count_range<G: CandidateGenerator + ?Sized>(
    rows: &EncodedRows,
    flags: &OutlierFlags,
    generator: &G,
    range: Range<usize>,
    capacity: usize,
) -> CountTable {
    let mut table = CountTable::with_capacity(capacity);
    let mut candidates = Vec::new();

    for i in range {
        candidates.clear();
        generator.candidates(rows.row(i), &mut candidates);
        let is_outlier = flags.is_outlier(i);
        for &set in &candidates {
            table.record(set, is_outlier);
        }
    }

    table
}

/// Count the candidates `generator` produces over all rows
///
/// With `threads > 1` rows are split into contiguous partitions counted on
/// scoped worker threads. The merged table is identical to a sequential
/// scan, slot order included.
pub fn count_candidates<G: CandidateGenerator + ?Sized>(
    rows: &EncodedRows,
    flags: &OutlierFlags,
    generator: &G,
    threads: usize,
) -> CountTable {
    let num_rows = rows.len();
    let capacity = generator.capacity_hint();

    if threads <= 1 || num_rows < threads * 2 {
        return count_range(rows, flags, generator, 0..num_rows, capacity);
    }

    let chunk = num_rows.div_ceil(threads);
    let partitions: Vec<Range<usize>> = (0..num_rows)
        .step_by(chunk)
        .map(|start| start..(start + chunk).min(num_rows))
        .collect();
    let local_capacity = capacity / partitions.len();

    let scoped = crossbeam::scope(|scope| {
        let handles: Vec<_> = partitions
            .into_iter()
            .map(|range| {
                scope.spawn(move |_| count_range(rows, flags, generator, range, local_capacity))
            })
            .collect();

        let mut merged: Option<CountTable> = None;
        for handle in handles {
            let local = match handle.join() {
                Ok(local) => local,
                Err(payload) => std::panic::resume_unwind(payload),
            };
            match merged.as_mut() {
                Some(table) => table.merge(local),
                None => merged = Some(local),
            }
        }
        merged.unwrap_or_default()
    });

    match scoped {
        Ok(table) => table,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}
