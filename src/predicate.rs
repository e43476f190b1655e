//! Outlier predicates over the numeric score column
//!
//! Any `Fn(f64) -> bool` closure is a predicate. [`ScorePredicate`] is the
//! serializable form used by configuration files and the CLI:
//! a comparison operator and a cutoff, written as `"> 3.0"` or `"!= 0"`.

use crate::error::{ExplainError, PredicateError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Decides whether a numeric outlier score marks its row as an outlier
pub trait OutlierPredicate: Send + Sync {
    fn is_outlier(&self, value: f64) -> Result<bool, PredicateError>;
}

impl<F> OutlierPredicate for F
where
    F: Fn(f64) -> bool + Send + Sync,
{
    fn is_outlier(&self, value: f64) -> Result<bool, PredicateError> {
        Ok(self(value))
    }
}

/// Adapter for predicates that can fail
pub struct FallibleFn<F>(pub F);

impl<F> OutlierPredicate for FallibleFn<F>
where
    F: Fn(f64) -> Result<bool, PredicateError> + Send + Sync,
{
    fn is_outlier(&self, value: f64) -> Result<bool, PredicateError> {
        (self.0)(value)
    }
}

/// Comparison operator of a [`ScorePredicate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl CompareOp {
    fn symbol(self) -> &'static str {
        match self {
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Ge),
            "<" => Some(CompareOp::Lt),
            "<=" => Some(CompareOp::Le),
            "==" => Some(CompareOp::Eq),
            "!=" => Some(CompareOp::Ne),
            _ => None,
        }
    }
}

/// `score <op> cutoff` predicate
///
/// # Example
/// ```
/// use rasgo::predicate::{OutlierPredicate, ScorePredicate};
///
/// let predicate = ScorePredicate::from_expr(">= 2.5").unwrap();
/// assert!(predicate.is_outlier(2.5).unwrap());
/// assert!(!predicate.is_outlier(1.0).unwrap());
/// assert_eq!(predicate.to_string(), ">= 2.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScorePredicate {
    pub op: CompareOp,
    pub cutoff: f64,
}

impl ScorePredicate {
    pub fn new(op: CompareOp, cutoff: f64) -> Self {
        Self { op, cutoff }
    }

    /// Parse an expression like `"> 3"`, `"<=-1.5"` or `"!= 0"`
    pub fn from_expr(expr: &str) -> Result<Self, ExplainError> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| {
            Regex::new(r"^\s*(>=|<=|==|!=|>|<)\s*(\S+)\s*$").expect("static regex is valid")
        });

        let caps = pattern.captures(expr).ok_or_else(|| {
            ExplainError::InvalidPredicate(format!(
                "'{}': expected OP VALUE with OP one of > >= < <= == !=",
                expr
            ))
        })?;

        let op = CompareOp::from_symbol(&caps[1])
            .ok_or_else(|| ExplainError::InvalidPredicate(expr.to_string()))?;
        let cutoff: f64 = caps[2].parse().map_err(|_| {
            ExplainError::InvalidPredicate(format!("'{}': '{}' is not a number", expr, &caps[2]))
        })?;
        if !cutoff.is_finite() {
            return Err(ExplainError::InvalidPredicate(format!(
                "'{}': cutoff must be finite",
                expr
            )));
        }

        Ok(Self { op, cutoff })
    }

    /// Evaluate against one score
    pub fn matches(&self, value: f64) -> bool {
        match self.op {
            CompareOp::Gt => value > self.cutoff,
            CompareOp::Ge => value >= self.cutoff,
            CompareOp::Lt => value < self.cutoff,
            CompareOp::Le => value <= self.cutoff,
            CompareOp::Eq => value == self.cutoff,
            CompareOp::Ne => value != self.cutoff,
        }
    }
}

impl Default for ScorePredicate {
    /// Any non-zero score is an outlier
    fn default() -> Self {
        Self::new(CompareOp::Ne, 0.0)
    }
}

impl OutlierPredicate for ScorePredicate {
    fn is_outlier(&self, value: f64) -> Result<bool, PredicateError> {
        Ok(self.matches(value))
    }
}

impl fmt::Display for ScorePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op.symbol(), self.cutoff)
    }
}

impl FromStr for ScorePredicate {
    type Err = ExplainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_expr(s)
    }
}

impl TryFrom<String> for ScorePredicate {
    type Error = ExplainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_expr(&value)
    }
}

impl From<ScorePredicate> for String {
    fn from(predicate: ScorePredicate) -> Self {
        predicate.to_string()
    }
}
