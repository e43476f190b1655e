// Itemset Counting & Pruning Engine
//
// Apriori-style mining limited to orders 1..=3. Each order is counted over
// all rows, then every observed itemset is classified as pruned (too few
// outlier rows), saved (enriched enough to explain the outliers) or carried
// forward (frequent but not enriched). Only carried-forward itemsets seed
// the next order's candidates.
//
// Orders 2 and 3 share one routine, `mine_order`, parameterized by a
// `CandidateGenerator`; order 1 counts keys directly into dense arrays.

mod candidates;
mod classify;
mod counter;
mod order;

pub use candidates::{CandidateGenerator, KeyMask, PairCandidates, TripleCandidates};
pub use classify::{risk_ratio, Classification, Thresholds};
pub use counter::{count_candidates, count_singles, CountTable};
pub use order::{ItemsetStats, OrderState};

use crate::config::ClosureCheck;
use crate::encoder::EncodedRows;
use crate::itemset::MAX_ORDER;
use crate::outlier::OutlierFlags;
use std::time::Instant;

/// Count and classify order 1
pub fn mine_singles(
    rows: &EncodedRows,
    flags: &OutlierFlags,
    num_keys: usize,
    thresholds: &Thresholds,
) -> OrderState {
    tracing::debug!("Processing order 1 over {} encoded categories", num_keys);
    let start = Instant::now();
    let table = count_singles(rows, flags, num_keys);
    let elapsed = start.elapsed();
    tracing::debug!("Counted order 1 in: {:?}", elapsed);

    let state = OrderState::classify(1, table, thresholds, elapsed);
    log_partition(&state);
    state
}

/// Count and classify the candidates of one higher order
pub fn mine_order<G: CandidateGenerator + ?Sized>(
    rows: &EncodedRows,
    flags: &OutlierFlags,
    generator: &G,
    thresholds: &Thresholds,
    threads: usize,
) -> OrderState {
    let order = generator.order();
    tracing::debug!(
        "Processing order {} (capacity hint {}, threads {})",
        order,
        generator.capacity_hint(),
        threads
    );
    let start = Instant::now();
    let table = count_candidates(rows, flags, generator, threads);
    let elapsed = start.elapsed();
    tracing::debug!("Counted order {} in: {:?}", order, elapsed);

    let state = OrderState::classify(order, table, thresholds, elapsed);
    log_partition(&state);
    state
}

/// Mine orders 1, 2 and 3 in sequence
///
/// Returns one state per order, index `k - 1` for order `k`. When nothing
/// is flagged as outlier no itemset can be enriched, so orders 2 and 3 are
/// left empty.
pub fn mine_all(
    rows: &EncodedRows,
    flags: &OutlierFlags,
    num_keys: usize,
    thresholds: &Thresholds,
    closure_check: ClosureCheck,
    threads: usize,
) -> Vec<OrderState> {
    let mut orders = Vec::with_capacity(MAX_ORDER);
    let singles = mine_singles(rows, flags, num_keys, thresholds);

    if flags.num_outliers() == 0 {
        tracing::info!("No outliers flagged; skipping orders 2 and 3");
        orders.push(singles);
        orders.push(OrderState::empty(2));
        orders.push(OrderState::empty(3));
        return orders;
    }

    let viable = KeyMask::from_singles(singles.carried_forward());
    let pairs = mine_order(rows, flags, &PairCandidates::new(&viable), thresholds, threads);
    let triples = mine_order(
        rows,
        flags,
        &TripleCandidates::new(&viable, pairs.carried_forward(), closure_check),
        thresholds,
        threads,
    );

    orders.push(singles);
    orders.push(pairs);
    orders.push(triples);
    orders
}

fn log_partition(state: &OrderState) {
    tracing::debug!("Itemsets Saved: {}", state.saved().len());
    tracing::debug!("Itemsets Pruned: {}", state.num_pruned());
    tracing::debug!("Itemsets Next: {}", state.carried_forward().len());
}
