//! Rasgo - outlier explanation by attribute-combination mining
//!
//! Given a table of categorical attributes and a numeric outlier score,
//! this library finds the attribute values, pairs and triples that are
//! over-represented among outlier rows compared with the whole table.
//! Mining is Apriori-style: each order is counted, itemsets with too little
//! outlier support are pruned, sufficiently enriched ones are saved as
//! explanations, and the rest seed the next order.

pub mod cli;
pub mod config;
pub mod csv_output;
pub mod encoder;
pub mod error;
pub mod explanation;
pub mod frame;
pub mod itemset;
pub mod mining;
pub mod outlier;
pub mod predicate;
pub mod summarizer;

pub use config::{ClosureCheck, SummarizerConfig};
pub use encoder::{AttributeEncoder, EncodedKey, EncodedRows};
pub use error::{ExplainError, Result};
pub use explanation::{AttributeValue, Explanation, ExplanationRecord};
pub use frame::DataFrame;
pub use itemset::Itemset;
pub use outlier::OutlierFlags;
pub use predicate::{CompareOp, OutlierPredicate, ScorePredicate};
pub use summarizer::{AprioriSummarizer, RunStats};
