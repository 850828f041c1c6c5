use serde::{Deserialize, Serialize};

use super::amount::lenient;
use super::budget::{new_id, Budget};
use super::debt::Debt;
use crate::storage::migration::CURRENT_SCHEMA_VERSION;

/// The persisted root record. Everything in here is serialized as one JSON
/// blob under a single storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProfile {
    /// Schema version the blob was written with (see `storage::migration`)
    #[serde(default)]
    pub schema_version: u16,

    /// Display-only currency symbol (e.g. "$", "£")
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Monthly net pay (In-Hand)
    #[serde(default, deserialize_with = "lenient")]
    pub income: f64,

    /// Annual gross pay (CTC)
    #[serde(default, deserialize_with = "lenient")]
    pub ctc: f64,

    #[serde(default = "Budget::starter")]
    pub budget: Budget,

    #[serde(default)]
    pub assets: Assets,

    #[serde(default)]
    pub debts: Vec<Debt>,

    /// Free-text reflection; nothing is computed from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rich_life: Option<RichLife>,
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for FinancialProfile {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            currency: default_currency(),
            income: 0.0,
            ctc: 0.0,
            budget: Budget::starter(),
            assets: Assets::default(),
            debts: Vec::new(),
            rich_life: None,
        }
    }
}

/// Liquid assets and savings goals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assets {
    #[serde(default, deserialize_with = "lenient")]
    pub emergency_fund: f64,

    #[serde(default, deserialize_with = "lenient")]
    pub investments: f64,

    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl Assets {
    /// Emergency fund plus investments.
    #[must_use]
    pub fn net_liquid(&self) -> f64 {
        self.emergency_fund + self.investments
    }
}

/// A named savings goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default = "new_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "lenient")]
    pub current: f64,

    #[serde(default, deserialize_with = "lenient")]
    pub target: f64,
}

impl Goal {
    pub fn new(name: impl Into<String>, current: f64, target: f64) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            current,
            target,
        }
    }

    /// Fraction of the target reached, clamped to `[0, 1]`.
    /// Zero when the target is not positive.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.target > 0.0 {
            (self.current / self.target).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// "Rich life" vision statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RichLife {
    #[serde(default)]
    pub love: String,
    #[serde(default)]
    pub hate: String,
    #[serde(default)]
    pub statement: String,
}

/// A shallow, per-field update to a [`FinancialProfile`].
///
/// Every `Some` field replaces the corresponding profile field wholesale;
/// `None` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub currency: Option<String>,
    pub income: Option<f64>,
    pub ctc: Option<f64>,
    pub budget: Option<Budget>,
    pub assets: Option<Assets>,
    pub debts: Option<Vec<Debt>>,
    pub rich_life: Option<Option<RichLife>>,
}

impl ProfilePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &ProfilePatch::default()
    }

    /// Shallow-merge this patch into `profile`.
    pub fn merge_into(self, profile: &mut FinancialProfile) {
        if let Some(currency) = self.currency {
            profile.currency = currency;
        }
        if let Some(income) = self.income {
            profile.income = income;
        }
        if let Some(ctc) = self.ctc {
            profile.ctc = ctc;
        }
        if let Some(budget) = self.budget {
            profile.budget = budget;
        }
        if let Some(assets) = self.assets {
            profile.assets = assets;
        }
        if let Some(debts) = self.debts {
            profile.debts = debts;
        }
        if let Some(rich_life) = self.rich_life {
            profile.rich_life = rich_life;
        }
    }
}
