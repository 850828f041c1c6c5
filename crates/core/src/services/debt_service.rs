use std::cmp::Ordering;

use crate::models::debt::{BalanceSample, Debt, DebtPayoff, PayoffResult, PayoffStrategy};
use crate::models::settings::PlannerConfig;

/// Month-by-month amortization of several debts under a payoff strategy.
///
/// Each month every open debt accrues interest and pays its own minimum.
/// A debt cleared by its minimum that month frees its full minimum payment,
/// which joins the extra payment for that month only. The pooled amount then
/// goes to the single highest-priority debt still open. The loop stops when
/// all balances are zero or after `max_payoff_months`.
pub struct DebtService {
    max_months: u32,
    history_interval: u32,
}

/// Mutable per-debt state for one simulation run.
struct Running<'a> {
    debt: &'a Debt,
    balance: f64,
    interest_paid: f64,
    paid_off_month: Option<u32>,
}

impl Running<'_> {
    fn is_open(&self) -> bool {
        self.balance > 0.0
    }
}

impl DebtService {
    pub fn new() -> Self {
        Self::with_config(&PlannerConfig::default())
    }

    pub fn with_config(config: &PlannerConfig) -> Self {
        Self {
            max_months: config.max_payoff_months,
            history_interval: config.history_interval_months,
        }
    }

    /// Run the payoff simulation.
    #[must_use]
    pub fn simulate(
        &self,
        debts: &[Debt],
        strategy: PayoffStrategy,
        extra_payment: f64,
    ) -> PayoffResult {
        let mut running: Vec<Running> = debts
            .iter()
            .map(|debt| Running {
                debt,
                balance: debt.balance,
                interest_paid: 0.0,
                paid_off_month: None,
            })
            .collect();

        let mut month = 0u32;
        let mut history = Vec::new();

        while running.iter().any(Running::is_open) && month < self.max_months {
            month += 1;
            let mut monthly_budget = extra_payment;

            for r in running.iter_mut().filter(|r| r.is_open()) {
                let interest = r.balance * (r.debt.rate / 100.0 / 12.0);
                r.balance += interest;
                r.interest_paid += interest;

                let payment = r.balance.min(r.debt.min_payment);
                r.balance -= payment;

                if r.balance <= 0.0 {
                    r.balance = 0.0;
                    r.paid_off_month = Some(month);
                    monthly_budget += r.debt.min_payment;
                }
            }

            let mut open: Vec<usize> = (0..running.len())
                .filter(|&i| running[i].is_open())
                .collect();
            // sort_by is stable: ties keep input order
            open.sort_by(|&a, &b| Self::priority(strategy, &running[a], &running[b]));

            if let Some(&target) = open.first() {
                let r = &mut running[target];
                let payment = r.balance.min(monthly_budget);
                r.balance -= payment;
                if r.balance <= 0.0 {
                    r.balance = 0.0;
                    r.paid_off_month = Some(month);
                }
            }

            let remaining: f64 = running.iter().map(|r| r.balance.max(0.0)).sum();
            let done = !running.iter().any(Running::is_open);
            let sample_due = self.history_interval > 0 && month % self.history_interval == 0;
            if sample_due || done {
                history.push(BalanceSample {
                    month,
                    balance: remaining,
                });
            }
        }

        let capped = running.iter().any(Running::is_open);
        if capped {
            log::warn!(
                "Debt payoff simulation hit the {}-month cap with balances remaining",
                self.max_months
            );
        }

        let total_interest = running.iter().map(|r| r.interest_paid).sum();
        let per_debt = running
            .into_iter()
            .map(|r| DebtPayoff {
                id: r.debt.id.clone(),
                name: r.debt.name.clone(),
                paid_off_month: r.paid_off_month,
                interest_paid: r.interest_paid,
            })
            .collect();

        PayoffResult {
            months_to_payoff: month,
            balance_history: history,
            capped,
            total_interest,
            debts: per_debt,
        }
    }

    /// Order two open debts: `Less` means `a` is paid first.
    fn priority(strategy: PayoffStrategy, a: &Running, b: &Running) -> Ordering {
        match strategy {
            PayoffStrategy::Avalanche => b
                .debt
                .rate
                .partial_cmp(&a.debt.rate)
                .unwrap_or(Ordering::Equal),
            PayoffStrategy::Snowball => a
                .balance
                .partial_cmp(&b.balance)
                .unwrap_or(Ordering::Equal),
        }
    }
}

impl Default for DebtService {
    fn default() -> Self {
        Self::new()
    }
}
