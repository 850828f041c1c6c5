use crate::models::growth::{GrowthInputs, GrowthProjection, GrowthSample};
use crate::models::settings::PlannerConfig;

/// Year-by-year compound growth of a portfolio with fixed contributions.
///
/// Growth compounds annually. A year's twelve contributions are added after
/// that year's return, so they start earning the following year.
pub struct GrowthService {
    horizon_years: u32,
}

impl GrowthService {
    pub fn new() -> Self {
        Self::with_config(&PlannerConfig::default())
    }

    pub fn with_config(config: &PlannerConfig) -> Self {
        Self {
            horizon_years: config.growth_horizon_years,
        }
    }

    /// Project the portfolio over the horizon (horizon + 1 samples).
    ///
    /// Each sample is recorded before that year's growth is applied.
    #[must_use]
    pub fn project(&self, inputs: &GrowthInputs) -> GrowthProjection {
        let mut balance = inputs.current_portfolio;
        let mut history = Vec::with_capacity(self.horizon_years as usize + 1);
        let mut years_to_target = None;

        for year in 0..=self.horizon_years {
            history.push(GrowthSample {
                year,
                amount: balance,
            });

            if years_to_target.is_none() && balance >= inputs.target_amount {
                years_to_target = Some(year);
            }

            balance = balance * (1.0 + inputs.annual_return_rate / 100.0)
                + inputs.monthly_contribution * 12.0;
        }

        GrowthProjection {
            history,
            years_to_target,
        }
    }
}

impl Default for GrowthService {
    fn default() -> Self {
        Self::new()
    }
}
