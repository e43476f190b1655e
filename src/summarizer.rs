//! Batch outlier summarizer: encode, flag, mine orders 1..=3, assemble
//!
//! # Example
//! ```
//! use rasgo::{AprioriSummarizer, DataFrame, SummarizerConfig};
//!
//! let mut frame = DataFrame::new();
//! let os = ["linux", "linux", "linux", "linux", "mac", "mac", "mac", "mac", "mac", "mac"];
//! frame
//!     .add_string_column("os", os.iter().map(|s| s.to_string()).collect())
//!     .unwrap();
//! frame
//!     .add_double_column("score", vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
//!     .unwrap();
//!
//! let config = SummarizerConfig::new(vec!["os".to_string()], "score")
//!     .with_min_outlier_support(0.5)
//!     .with_min_risk_ratio(2.0);
//! let mut summarizer = AprioriSummarizer::new(config);
//! summarizer.process(&frame).unwrap();
//!
//! let explanation = summarizer.results().unwrap();
//! assert_eq!(explanation.records.len(), 1);
//! assert_eq!(explanation.records[0].value_of("os"), Some("linux"));
//! assert_eq!(explanation.records[0].matched_row_count, 4);
//! ```

use crate::config::SummarizerConfig;
use crate::encoder::AttributeEncoder;
use crate::error::{ExplainError, Result};
use crate::explanation::{AttributeValue, Explanation, ExplanationRecord};
use crate::frame::DataFrame;
use crate::itemset::{Itemset, MAX_ORDER};
use crate::mining::{self, risk_ratio, OrderState, Thresholds};
use crate::outlier::OutlierFlags;
use crate::predicate::OutlierPredicate;
use std::cmp::Ordering;
use std::time::{Duration, Instant};

/// Aggregates fixed at the start of a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub num_rows: usize,
    pub num_outliers: usize,
    pub base_rate: f64,
    /// Minimum outlier rows an itemset needs to avoid pruning
    pub support_count: usize,
    pub min_risk_ratio: f64,
    /// Distinct `(column, value)` pairs encoded
    pub encoded_categories: usize,
    pub encoding_time: Duration,
    /// Counting time of orders 1, 2 and 3
    pub order_timings: [Duration; MAX_ORDER],
}

impl RunStats {
    /// Counting time summed over all orders
    pub fn mining_time(&self) -> Duration {
        self.order_timings.iter().sum()
    }
}

/// Everything a completed `process` call produced
#[derive(Debug)]
struct MiningRun {
    encoder: AttributeEncoder,
    stats: RunStats,
    orders: Vec<OrderState>,
}

/// Explains outliers by mining over-represented attribute combinations
pub struct AprioriSummarizer {
    config: SummarizerConfig,
    predicate: Option<Box<dyn OutlierPredicate>>,
    run: Option<MiningRun>,
}

impl std::fmt::Debug for AprioriSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AprioriSummarizer")
            .field("config", &self.config)
            .field("custom_predicate", &self.predicate.is_some())
            .field("run", &self.run)
            .finish()
    }
}

impl AprioriSummarizer {
    pub fn new(config: SummarizerConfig) -> Self {
        Self {
            config,
            predicate: None,
            run: None,
        }
    }

    /// Use a custom predicate instead of `config.predicate`
    pub fn with_predicate<P: OutlierPredicate + 'static>(mut self, predicate: P) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Mine `frame`, replacing the results of any previous run
    ///
    /// On error no results are kept: [`Self::results`] then reports
    /// [`ExplainError::NotProcessed`].
    pub fn process(&mut self, frame: &DataFrame) -> Result<()> {
        self.run = None;
        self.config.validate()?;

        let columns = frame.string_columns(&self.config.attributes)?;
        let scores = frame.double_column(&self.config.outlier_column)?;

        let predicate: &dyn OutlierPredicate = match &self.predicate {
            Some(custom) => custom.as_ref(),
            None => &self.config.predicate,
        };
        let flags = OutlierFlags::compute(scores, predicate)?;

        let thresholds = Thresholds::new(
            flags.num_outliers(),
            flags.base_rate(),
            self.config.min_outlier_support,
            self.config.min_risk_ratio,
        );
        tracing::info!("Outliers: {}", flags.num_outliers());
        tracing::info!("Outlier Rate of: {}", flags.base_rate());
        tracing::info!("Min Support Count: {}", thresholds.support_count);
        tracing::info!("Min Risk Ratio: {}", thresholds.min_risk_ratio);

        let mut encoder = AttributeEncoder::new(self.config.attributes.clone());
        let start = Instant::now();
        let rows = encoder.encode(&columns)?;
        let encoding_time = start.elapsed();
        tracing::debug!("Encoded in: {:?}", encoding_time);
        tracing::debug!("Encoded Categories: {}", encoder.len());

        let orders = mining::mine_all(
            &rows,
            &flags,
            encoder.len(),
            &thresholds,
            self.config.closure_check,
            self.config.threads,
        );
        for state in &orders {
            tracing::info!(
                "Order {} Explanations: {}",
                state.order(),
                state.saved().len()
            );
        }

        let mut order_timings = [Duration::ZERO; MAX_ORDER];
        for (slot, state) in order_timings.iter_mut().zip(&orders) {
            *slot = state.elapsed();
        }

        let stats = RunStats {
            num_rows: flags.num_rows(),
            num_outliers: flags.num_outliers(),
            base_rate: flags.base_rate(),
            support_count: thresholds.support_count,
            min_risk_ratio: thresholds.min_risk_ratio,
            encoded_categories: encoder.len(),
            encoding_time,
            order_timings,
        };

        self.run = Some(MiningRun {
            encoder,
            stats,
            orders,
        });
        Ok(())
    }

    /// Decode and score the saved itemsets of the last run
    ///
    /// Records are grouped by order (1, 2, 3); within an order they are
    /// sorted by descending lift, then descending support, then conditions.
    pub fn results(&self) -> Result<Explanation> {
        let run = self.run.as_ref().ok_or(ExplainError::NotProcessed)?;
        let stats = &run.stats;

        let mut records = Vec::new();
        for state in &run.orders {
            let mut order_records = state
                .saved_in_order()
                .map(|set| build_record(run, state, set))
                .collect::<Result<Vec<_>>>()?;
            order_records.sort_by(compare_records);
            records.extend(order_records);
        }

        Ok(Explanation {
            records,
            num_inliers: stats.num_rows - stats.num_outliers,
            num_outliers: stats.num_outliers,
            creation_time_ms: stats.mining_time().as_millis() as u64,
        })
    }

    /// `process` followed by `results`
    pub fn explain(&mut self, frame: &DataFrame) -> Result<Explanation> {
        self.process(frame)?;
        self.results()
    }

    /// Aggregates of the last successful run
    pub fn run_stats(&self) -> Option<&RunStats> {
        self.run.as_ref().map(|run| &run.stats)
    }

    /// Mining state of order `k` (1..=3) from the last successful run
    pub fn order(&self, k: usize) -> Option<&OrderState> {
        let run = self.run.as_ref()?;
        k.checked_sub(1).and_then(|idx| run.orders.get(idx))
    }

    /// Encoder of the last successful run, for decoding itemsets
    pub fn encoder(&self) -> Option<&AttributeEncoder> {
        self.run.as_ref().map(|run| &run.encoder)
    }
}

fn build_record(run: &MiningRun, state: &OrderState, set: &Itemset) -> Result<ExplanationRecord> {
    let counts = state
        .stats(set)
        .ok_or_else(|| ExplainError::MissingCounts {
            itemset: set.to_string(),
        })?;

    let mut keyed = Vec::with_capacity(set.order());
    for &key in set.keys() {
        let column = run.encoder.column_of(key)?;
        let item = AttributeValue {
            column: run.encoder.column_name_of(key)?.to_string(),
            value: run.encoder.value_of(key)?.to_string(),
        };
        keyed.push((column, item));
    }
    keyed.sort_by_key(|(column, _)| *column);

    let num_outliers = run.stats.num_outliers;
    Ok(ExplanationRecord {
        items: keyed.into_iter().map(|(_, item)| item).collect(),
        matched_row_count: counts.count,
        outlier_count: counts.outlier_count,
        support: counts.outlier_count as f64 / num_outliers as f64,
        lift: risk_ratio(counts.outlier_count, counts.count, run.stats.base_rate),
    })
}

fn compare_records(a: &ExplanationRecord, b: &ExplanationRecord) -> Ordering {
    b.lift
        .total_cmp(&a.lift)
        .then_with(|| b.support.total_cmp(&a.support))
        .then_with(|| a.items.cmp(&b.items))
}
