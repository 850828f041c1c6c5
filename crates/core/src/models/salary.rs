use serde::{Deserialize, Serialize};

use super::budget::new_id;

/// How a deduction's `value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeductionMode {
    /// Percentage of gross pay
    Percent,
    /// Fixed monthly amount
    Fixed,
}

impl std::fmt::Display for DeductionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeductionMode::Percent => write!(f, "Percent"),
            DeductionMode::Fixed => write!(f, "Fixed"),
        }
    }
}

/// Direction of a salary solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SalaryMode {
    /// Input is annual gross; solve for monthly net
    #[default]
    Forward,
    /// Input is target monthly net; solve for annual gross
    Reverse,
}

/// One line of the deduction stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionItem {
    pub id: String,
    pub name: String,
    pub mode: DeductionMode,
    pub value: f64,
}

impl DeductionItem {
    pub fn percent(name: impl Into<String>, value: f64) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            mode: DeductionMode::Percent,
            value,
        }
    }

    pub fn fixed(name: impl Into<String>, value: f64) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            mode: DeductionMode::Fixed,
            value,
        }
    }

    fn preset(id: &str, name: &str, mode: DeductionMode, value: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            mode,
            value,
        }
    }
}

/// A deduction together with the monthly amount it takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionLine {
    pub item: DeductionItem,
    pub monthly_amount: f64,
}

/// Result of resolving a salary through a deduction stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBreakdown {
    pub gross_annual: f64,
    pub monthly_gross: f64,
    pub monthly_net: f64,
    pub total_deductions_monthly: f64,
    pub breakdown: Vec<DeductionLine>,
    /// `false` when a reverse solve has no answer (percent deductions
    /// total 100% or more); gross is reported as 0 in that case
    pub feasible: bool,
}

impl SalaryBreakdown {
    #[must_use]
    pub fn net_annual(&self) -> f64 {
        self.monthly_net * 12.0
    }

    /// Share of monthly gross taken by one item, in percent.
    /// Zero when there is no gross to compare against.
    #[must_use]
    pub fn share_of_gross(&self, id: &str) -> f64 {
        if self.monthly_gross <= 0.0 {
            return 0.0;
        }
        self.breakdown
            .iter()
            .find(|l| l.item.id == id)
            .map(|l| l.monthly_amount / self.monthly_gross * 100.0)
            .unwrap_or(0.0)
    }
}

/// Regions with illustrative default deduction stacks.
/// The rates are starting points, not real tax tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    #[default]
    Usa,
    Uk,
    India,
    Europe,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Usa, Region::Uk, Region::India, Region::Europe];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Region::Usa => "United States",
            Region::Uk => "United Kingdom",
            Region::India => "India",
            Region::Europe => "Europe",
        }
    }

    #[must_use]
    pub fn currency(&self) -> &'static str {
        match self {
            Region::Usa => "$",
            Region::Uk => "£",
            Region::India => "₹",
            Region::Europe => "€",
        }
    }

    #[must_use]
    pub fn default_deductions(&self) -> Vec<DeductionItem> {
        use DeductionMode::{Fixed, Percent};
        match self {
            Region::Usa => vec![
                DeductionItem::preset("fed", "Federal Tax", Percent, 22.0),
                DeductionItem::preset("state", "State Tax", Percent, 5.0),
                DeductionItem::preset("fica", "FICA (SS/Medicare)", Percent, 7.65),
                DeductionItem::preset("401k", "401k Contribution", Percent, 5.0),
                DeductionItem::preset("health", "Health Insurance", Fixed, 200.0),
            ],
            Region::Uk => vec![
                DeductionItem::preset("tax", "Income Tax", Percent, 20.0),
                DeductionItem::preset("ni", "National Insurance", Percent, 10.0),
                DeductionItem::preset("pension", "Pension", Percent, 5.0),
            ],
            Region::India => vec![
                DeductionItem::preset("epf", "EPF", Fixed, 1800.0),
                DeductionItem::preset("it", "Income Tax (TDS)", Percent, 15.0),
                DeductionItem::preset("pt", "Professional Tax", Fixed, 200.0),
            ],
            Region::Europe => vec![
                DeductionItem::preset("it", "Income Tax", Percent, 30.0),
                DeductionItem::preset("ss", "Social Security", Percent, 10.0),
            ],
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
