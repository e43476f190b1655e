// Per-order mining state: counts plus the saved / carried-forward partition

use crate::itemset::Itemset;
use crate::mining::classify::{Classification, Thresholds};
use crate::mining::counter::CountTable;
use fnv::FnvHashSet;
use std::time::Duration;

/// Total and outlier row counts of one itemset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemsetStats {
    pub count: usize,
    pub outlier_count: usize,
}

/// Counted and classified itemsets of a single order
///
/// Immutable once built; the next order only reads its carried-forward set.
#[derive(Debug, Clone, Default)]
pub struct OrderState {
    order: usize,
    table: CountTable,
    saved: FnvHashSet<Itemset>,
    carried_forward: FnvHashSet<Itemset>,
    num_pruned: usize,
    elapsed: Duration,
}

impl OrderState {
    /// Classify every itemset of a fully merged count table
    pub fn classify(
        order: usize,
        table: CountTable,
        thresholds: &Thresholds,
        elapsed: Duration,
    ) -> Self {
        let mut saved = FnvHashSet::default();
        let mut carried_forward = FnvHashSet::default();
        let mut num_pruned = 0;

        for (slot, &set) in table.itemsets().iter().enumerate() {
            match thresholds.classify(table.count(slot), table.outlier_count(slot)) {
                Classification::Pruned => num_pruned += 1,
                Classification::Saved => {
                    saved.insert(set);
                }
                Classification::CarriedForward => {
                    carried_forward.insert(set);
                }
            }
        }

        Self {
            order,
            table,
            saved,
            carried_forward,
            num_pruned,
            elapsed,
        }
    }

    /// State for an order that was not mined
    pub fn empty(order: usize) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Itemsets meeting both thresholds
    pub fn saved(&self) -> &FnvHashSet<Itemset> {
        &self.saved
    }

    /// Itemsets meeting support but not the risk ratio
    pub fn carried_forward(&self) -> &FnvHashSet<Itemset> {
        &self.carried_forward
    }

    pub fn num_pruned(&self) -> usize {
        self.num_pruned
    }

    /// Distinct itemsets seen in at least one row
    pub fn num_observed(&self) -> usize {
        self.table.len()
    }

    /// Time spent counting this order
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Observed itemsets in first-seen order
    pub fn observed(&self) -> &[Itemset] {
        self.table.itemsets()
    }

    /// Saved itemsets in first-seen order
    pub fn saved_in_order(&self) -> impl Iterator<Item = &Itemset> + '_ {
        self.observed()
            .iter()
            .filter(move |set| self.saved.contains(*set))
    }

    pub fn stats(&self, set: &Itemset) -> Option<ItemsetStats> {
        self.table.slot_of(set).map(|slot| ItemsetStats {
            count: self.table.count(slot),
            outlier_count: self.table.outlier_count(slot),
        })
    }

    /// Classification of an observed itemset, `None` if it was never a candidate
    pub fn classification(&self, set: &Itemset) -> Option<Classification> {
        self.table.slot_of(set)?;
        Some(if self.saved.contains(set) {
            Classification::Saved
        } else if self.carried_forward.contains(set) {
            Classification::CarriedForward
        } else {
            Classification::Pruned
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_partitions_table() {
        let mut table = CountTable::default();
        // pair(0,1): 4 rows, 3 outliers -> saved
        for flag in [true, true, true, false] {
            table.record(Itemset::pair(0, 1), flag);
        }
        // pair(0,2): 5 rows, 3 outliers -> carried forward (ratio 2.0)
        for flag in [true, true, true, false, false] {
            table.record(Itemset::pair(0, 2), flag);
        }
        // pair(1,2): 2 rows, 0 outliers -> pruned
        for _ in 0..2 {
            table.record(Itemset::pair(1, 2), false);
        }

        let thresholds = Thresholds::new(3, 0.3, 0.5, 2.0);
        let state = OrderState::classify(2, table, &thresholds, Duration::from_millis(3));

        assert_eq!(state.order(), 2);
        assert_eq!(state.num_observed(), 3);
        assert_eq!(state.num_pruned(), 1);
        assert!(state.saved().contains(&Itemset::pair(0, 1)));
        assert!(state.carried_forward().contains(&Itemset::pair(0, 2)));
        assert_eq!(
            state.classification(&Itemset::pair(1, 2)),
            Some(Classification::Pruned)
        );
        assert_eq!(state.classification(&Itemset::pair(3, 4)), None);
        assert_eq!(
            state.stats(&Itemset::pair(0, 2)),
            Some(ItemsetStats {
                count: 5,
                outlier_count: 3
            })
        );
        assert_eq!(
            state.saved_in_order().collect::<Vec<_>>(),
            vec![&Itemset::pair(0, 1)]
        );
        assert_eq!(state.elapsed(), Duration::from_millis(3));
    }

    #[test]
    fn test_empty_state() {
        let state = OrderState::empty(3);
        assert_eq!(state.order(), 3);
        assert_eq!(state.num_observed(), 0);
        assert!(state.saved().is_empty());
        assert!(state.carried_forward().is_empty());
    }
}
