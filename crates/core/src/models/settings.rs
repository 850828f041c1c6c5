/// Planner tunables. Nothing here is persisted; the defaults match the
/// behaviour users have always seen.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Key the profile blob is stored under.
    pub storage_key: String,

    /// Hard stop for the debt payoff simulation (30 years).
    pub max_payoff_months: u32,

    /// Balance history is sampled every this many months.
    pub history_interval_months: u32,

    /// Growth projection horizon in years; samples = horizon + 1.
    pub growth_horizon_years: u32,

    /// Safety net size in months of fixed costs.
    pub safety_net_months: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            storage_key: "open-budget-data".to_string(),
            max_payoff_months: 360,
            history_interval_months: 6,
            growth_horizon_years: 30,
            safety_net_months: 6,
        }
    }
}
