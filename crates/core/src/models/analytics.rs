use serde::{Deserialize, Serialize};

use super::budget::BucketKey;

/// Summary of the budget ledger against monthly income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    /// Monthly net income the plan allocates
    pub income: f64,

    /// Per-bucket totals, in display order
    pub buckets: Vec<BucketTotal>,

    pub total_allocated: f64,

    /// income - total_allocated (negative when over-allocated)
    pub unallocated: f64,

    pub safety_net: SafetyNet,

    /// Emergency fund plus investments
    pub net_liquid_assets: f64,
}

impl BudgetSummary {
    #[must_use]
    pub fn bucket(&self, key: BucketKey) -> Option<&BucketTotal> {
        self.buckets.iter().find(|b| b.key == key)
    }

    /// Fixed costs above 60% of income.
    #[must_use]
    pub fn fixed_costs_in_danger(&self) -> bool {
        self.bucket(BucketKey::Fixed)
            .map(|b| b.status == BenchmarkStatus::TooHigh)
            .unwrap_or(false)
    }
}

/// One bucket's total and how it compares to its benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketTotal {
    pub key: BucketKey,
    pub amount: f64,
    /// Share of income in percent (0 when income is not positive)
    pub percent_of_income: f64,
    /// Human-readable target range, e.g. "50-60%"
    pub target: String,
    pub status: BenchmarkStatus,
}

/// Benchmark verdict for a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BenchmarkStatus {
    /// Fixed costs within limit
    Healthy,
    /// Fixed costs over limit
    TooHigh,
    /// Bucket meets its minimum share
    Good,
    /// Bucket below its minimum share
    Low,
}

impl std::fmt::Display for BenchmarkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BenchmarkStatus::Healthy => write!(f, "Healthy"),
            BenchmarkStatus::TooHigh => write!(f, "Too High"),
            BenchmarkStatus::Good => write!(f, "Good"),
            BenchmarkStatus::Low => write!(f, "Low"),
        }
    }
}

/// Emergency-fund coverage of fixed costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyNet {
    /// Months of fixed costs the fund should cover
    pub target: f64,
    pub current: f64,
    /// Shortfall, never negative
    pub gap: f64,
    /// Months the current fund covers (0 with no fixed costs)
    pub runway_months: f64,
    /// Months of savings contributions needed to close the gap;
    /// `None` when nothing is allocated to savings
    pub months_to_safety: Option<u32>,
    pub fully_funded: bool,
}
