use crate::models::analytics::{BenchmarkStatus, BucketTotal, BudgetSummary, SafetyNet};
use crate::models::budget::{Budget, BucketKey};
use crate::models::profile::FinancialProfile;
use crate::models::settings::PlannerConfig;

/// Fixed costs above this share of income are flagged.
const FIXED_MAX_PERCENT: f64 = 60.0;

/// Benchmark targets per bucket: (label, minimum share of income).
fn benchmark(key: BucketKey) -> (&'static str, f64) {
    match key {
        BucketKey::Fixed => ("50-60%", 50.0),
        BucketKey::Invest => ("10%", 10.0),
        BucketKey::Savings => ("5-10%", 5.0),
        BucketKey::GuiltFree => ("20-35%", 20.0),
    }
}

/// Analyses the Conscious Spending Plan ledger: bucket totals, benchmark
/// scorecard, safety net coverage. Also formats the ledger for spreadsheets.
///
/// Pure business logic over a profile snapshot.
pub struct BudgetService {
    safety_net_months: u32,
}

impl BudgetService {
    pub fn new() -> Self {
        Self::with_config(&PlannerConfig::default())
    }

    pub fn with_config(config: &PlannerConfig) -> Self {
        Self {
            safety_net_months: config.safety_net_months,
        }
    }

    /// Summarise the ledger against the profile's monthly income.
    #[must_use]
    pub fn summarize(&self, profile: &FinancialProfile) -> BudgetSummary {
        let income = profile.income;
        let buckets = BucketKey::ALL
            .iter()
            .map(|&key| {
                let amount = profile.budget.bucket_total(key);
                let percent_of_income = if income > 0.0 {
                    amount / income * 100.0
                } else {
                    0.0
                };
                let (target, _) = benchmark(key);
                BucketTotal {
                    key,
                    amount,
                    percent_of_income,
                    target: target.to_string(),
                    status: Self::status(key, percent_of_income),
                }
            })
            .collect();

        let total_allocated = profile.budget.total_allocated();

        BudgetSummary {
            income,
            buckets,
            total_allocated,
            unallocated: income - total_allocated,
            safety_net: self.safety_net(&profile.budget, profile.assets.emergency_fund),
            net_liquid_assets: profile.assets.net_liquid(),
        }
    }

    /// Benchmark verdict for one bucket at a given share of income.
    #[must_use]
    pub fn status(key: BucketKey, percent_of_income: f64) -> BenchmarkStatus {
        match key {
            BucketKey::Fixed if percent_of_income <= FIXED_MAX_PERCENT => BenchmarkStatus::Healthy,
            BucketKey::Fixed => BenchmarkStatus::TooHigh,
            _ if percent_of_income >= benchmark(key).1 => BenchmarkStatus::Good,
            _ => BenchmarkStatus::Low,
        }
    }

    /// How well the emergency fund covers fixed costs.
    #[must_use]
    pub fn safety_net(&self, budget: &Budget, emergency_fund: f64) -> SafetyNet {
        let fixed = budget.bucket_total(BucketKey::Fixed);
        let savings = budget.bucket_total(BucketKey::Savings);
        let target = fixed * f64::from(self.safety_net_months);
        let gap = (target - emergency_fund).max(0.0);

        let months_to_safety = if savings > 0.0 {
            Some((gap / savings).ceil() as u32)
        } else {
            None
        };

        let runway_months = if fixed > 0.0 {
            emergency_fund / fixed
        } else {
            0.0
        };

        SafetyNet {
            target,
            current: emergency_fund,
            gap,
            runway_months,
            months_to_safety,
            fully_funded: emergency_fund >= target && target > 0.0,
        }
    }

    /// Tab-separated ledger for pasting into a spreadsheet.
    ///
    /// Columns: Category, Item, Amount. Categories are upper-cased bucket keys
    /// in display order.
    #[must_use]
    pub fn ledger_tsv(budget: &Budget) -> String {
        let mut tsv = String::from("Category\tItem\tAmount\n");
        for key in BucketKey::ALL {
            let category = key.as_str().to_uppercase();
            for item in budget.items(key) {
                // tabs or newlines in a name would shift the columns
                let name = item.name.replace(['\t', '\n', '\r'], " ");
                tsv.push_str(&format!("{category}\t{name}\t{}\n", item.amount));
            }
        }
        tsv
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}
