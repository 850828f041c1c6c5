use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::amount::lenient;

/// One of the four Conscious Spending Plan buckets income is allocated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BucketKey {
    /// Rent, bills, debt minimums
    Fixed,
    /// Retirement and index funds
    Invest,
    /// Short-term savings goals
    Savings,
    /// Spending money
    GuiltFree,
}

impl BucketKey {
    /// All buckets in display order.
    pub const ALL: [BucketKey; 4] = [
        BucketKey::Fixed,
        BucketKey::Invest,
        BucketKey::Savings,
        BucketKey::GuiltFree,
    ];

    /// Key used in the persisted JSON blob.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BucketKey::Fixed => "fixed",
            BucketKey::Invest => "invest",
            BucketKey::Savings => "savings",
            BucketKey::GuiltFree => "guiltFree",
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            BucketKey::Fixed => "Fixed Costs",
            BucketKey::Invest => "Investments",
            BucketKey::Savings => "Savings Goals",
            BucketKey::GuiltFree => "Guilt-Free Play",
        }
    }
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single line in a budget bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    #[serde(default = "new_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Monthly amount
    #[serde(default, deserialize_with = "lenient")]
    pub amount: f64,
}

impl BudgetItem {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            amount,
        }
    }

    /// Build an item with a caller-chosen id (used for the seeded defaults).
    pub fn with_id(id: impl Into<String>, name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
        }
    }
}

/// The four buckets and their items. Item order is display order only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(default)]
    pub fixed: Vec<BudgetItem>,
    #[serde(default)]
    pub invest: Vec<BudgetItem>,
    #[serde(default)]
    pub savings: Vec<BudgetItem>,
    #[serde(default)]
    pub guilt_free: Vec<BudgetItem>,
}

impl Budget {
    /// Starter buckets seeded on first use.
    #[must_use]
    pub fn starter() -> Self {
        Self {
            fixed: vec![BudgetItem::with_id("def-1", "Accommodation (Rent/Mortgage)", 0.0)],
            invest: vec![BudgetItem::with_id("def-2", "Index Funds / 401k", 0.0)],
            savings: vec![BudgetItem::with_id("def-3", "Emergency Fund Contribution", 0.0)],
            guilt_free: vec![BudgetItem::with_id("def-4", "Dining Out / Social", 0.0)],
        }
    }

    #[must_use]
    pub fn items(&self, key: BucketKey) -> &[BudgetItem] {
        match key {
            BucketKey::Fixed => &self.fixed,
            BucketKey::Invest => &self.invest,
            BucketKey::Savings => &self.savings,
            BucketKey::GuiltFree => &self.guilt_free,
        }
    }

    pub fn items_mut(&mut self, key: BucketKey) -> &mut Vec<BudgetItem> {
        match key {
            BucketKey::Fixed => &mut self.fixed,
            BucketKey::Invest => &mut self.invest,
            BucketKey::Savings => &mut self.savings,
            BucketKey::GuiltFree => &mut self.guilt_free,
        }
    }

    /// Sum of the monthly amounts in one bucket.
    #[must_use]
    pub fn bucket_total(&self, key: BucketKey) -> f64 {
        self.items(key).iter().map(|i| i.amount).sum()
    }

    /// Sum across every bucket.
    #[must_use]
    pub fn total_allocated(&self) -> f64 {
        BucketKey::ALL.iter().map(|k| self.bucket_total(*k)).sum()
    }
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
