use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::amount::lenient;
use super::budget::new_id;

/// An interest-bearing balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    #[serde(default = "new_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "lenient")]
    pub balance: f64,

    /// Annual percentage rate (e.g. 24.0 for 24% APR)
    #[serde(default, deserialize_with = "lenient")]
    pub rate: f64,

    #[serde(default, deserialize_with = "lenient")]
    pub min_payment: f64,
}

impl Debt {
    pub fn new(name: impl Into<String>, balance: f64, rate: f64, min_payment: f64) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            balance,
            rate,
            min_payment,
        }
    }
}

/// Which debt receives the extra payment each month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayoffStrategy {
    /// Highest rate first
    #[default]
    Avalanche,
    /// Lowest balance first
    Snowball,
}

impl std::fmt::Display for PayoffStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayoffStrategy::Avalanche => write!(f, "Avalanche"),
            PayoffStrategy::Snowball => write!(f, "Snowball"),
        }
    }
}

/// Total outstanding balance after a given month.
///
/// The balance is unrounded; rounding for charts is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceSample {
    pub month: u32,
    pub balance: f64,
}

/// When a single debt was cleared and what it cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoff {
    pub id: String,
    pub name: String,
    /// Month (1-based) in which the balance reached zero; `None` if never
    pub paid_off_month: Option<u32>,
    pub interest_paid: f64,
}

/// Outcome of a payoff simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffResult {
    /// Months until every balance is zero, or the cap when `capped` is set
    pub months_to_payoff: u32,

    /// Chart samples every few months plus the final month
    pub balance_history: Vec<BalanceSample>,

    /// The month cap was hit before all balances cleared.
    /// Payoff is indeterminate, not a failure.
    pub capped: bool,

    pub total_interest: f64,

    /// Per-debt outcome, in input order
    pub debts: Vec<DebtPayoff>,
}

impl PayoffResult {
    /// Calendar date on which the last balance clears, counted from `from`.
    /// `None` when the simulation was capped.
    #[must_use]
    pub fn debt_free_date(&self, from: NaiveDate) -> Option<NaiveDate> {
        if self.capped {
            return None;
        }
        from.checked_add_months(Months::new(self.months_to_payoff))
    }

    /// Look up the payoff record for a debt by id.
    #[must_use]
    pub fn payoff_for(&self, id: &str) -> Option<&DebtPayoff> {
        self.debts.iter().find(|d| d.id == id)
    }
}
