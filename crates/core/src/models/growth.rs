use serde::{Deserialize, Serialize};

/// Inputs to a compound-growth projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthInputs {
    pub current_portfolio: f64,
    pub monthly_contribution: f64,
    /// Annual return in percent (8.0 = 8%)
    pub annual_return_rate: f64,
    pub target_amount: f64,
}

impl Default for GrowthInputs {
    fn default() -> Self {
        Self {
            current_portfolio: 0.0,
            monthly_contribution: 500.0,
            annual_return_rate: 8.0,
            target_amount: 1_000_000.0,
        }
    }
}

/// Portfolio value at the start of a projection year.
///
/// The amount is unrounded; rounding for charts is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthSample {
    /// Year index, 0 = today
    pub year: u32,
    pub amount: f64,
}

/// Year-by-year projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthProjection {
    /// One sample per year, year 0 through the horizon inclusive
    pub history: Vec<GrowthSample>,

    /// First year whose recorded amount meets the target; `None` if the
    /// target is not reached within the horizon
    pub years_to_target: Option<u32>,
}

impl GrowthProjection {
    #[must_use]
    pub fn target_reached(&self) -> bool {
        self.years_to_target.is_some()
    }

    /// Relabel samples with calendar years starting at `start_year`.
    #[must_use]
    pub fn calendar_years(&self, start_year: i32) -> Vec<(i32, f64)> {
        self.history
            .iter()
            .map(|s| (start_year + s.year as i32, s.amount))
            .collect()
    }

    /// Value at the end of the horizon.
    #[must_use]
    pub fn final_amount(&self) -> f64 {
        self.history.last().map(|s| s.amount).unwrap_or(0.0)
    }
}
