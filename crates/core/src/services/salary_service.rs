use crate::errors::CoreError;
use crate::models::salary::{
    DeductionItem, DeductionLine, DeductionMode, SalaryBreakdown, SalaryMode,
};

/// Converts between annual gross and monthly net pay through a stack of
/// percentage and fixed deductions.
///
/// Pure business logic: the caller owns the deduction stack and passes it in.
pub struct SalaryService;

impl SalaryService {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a salary.
    ///
    /// - `Forward`: `amount` is annual gross.
    /// - `Reverse`: `amount` is the target monthly net.
    ///
    /// Fixed deductions are monthly amounts. A reverse solve with percent
    /// deductions totalling 100% or more has no answer and reports a gross of
    /// zero with `feasible = false`.
    #[must_use]
    pub fn resolve(
        &self,
        amount: f64,
        mode: SalaryMode,
        items: &[DeductionItem],
    ) -> SalaryBreakdown {
        let total_percent = Self::total_percent(items);
        let total_fixed_annual = Self::total_fixed_monthly(items) * 12.0;

        let mut feasible = true;
        let (gross_annual, net_annual) = match mode {
            SalaryMode::Forward => {
                let gross_annual = amount;
                let deductions = gross_annual * (total_percent / 100.0) + total_fixed_annual;
                (gross_annual, (gross_annual - deductions).max(0.0))
            }
            SalaryMode::Reverse => {
                let target_net_annual = amount * 12.0;
                let retention_rate = 1.0 - total_percent / 100.0;
                let gross_annual = if retention_rate <= 0.0 {
                    feasible = false;
                    0.0
                } else {
                    (target_net_annual + total_fixed_annual) / retention_rate
                };
                (gross_annual, target_net_annual)
            }
        };

        let monthly_gross = gross_annual / 12.0;
        let monthly_net = net_annual / 12.0;

        let breakdown = items
            .iter()
            .map(|item| {
                let monthly_amount = match item.mode {
                    DeductionMode::Fixed => item.value,
                    DeductionMode::Percent => monthly_gross * (item.value / 100.0),
                };
                DeductionLine {
                    item: item.clone(),
                    monthly_amount,
                }
            })
            .collect();

        SalaryBreakdown {
            gross_annual,
            monthly_gross,
            monthly_net,
            total_deductions_monthly: monthly_gross - monthly_net,
            breakdown,
            feasible,
        }
    }

    /// Sum of all percent-mode deductions.
    #[must_use]
    pub fn total_percent(items: &[DeductionItem]) -> f64 {
        items
            .iter()
            .filter(|i| i.mode == DeductionMode::Percent)
            .map(|i| i.value)
            .sum()
    }

    /// Sum of all fixed-mode deductions (monthly).
    #[must_use]
    pub fn total_fixed_monthly(items: &[DeductionItem]) -> f64 {
        items
            .iter()
            .filter(|i| i.mode == DeductionMode::Fixed)
            .map(|i| i.value)
            .sum()
    }

    /// Flip one item between percent and fixed, keeping the money it takes
    /// the same at the current `monthly_gross`. The new value is rounded to
    /// two decimals.
    ///
    /// Returns `Ok(false)` and leaves the stack untouched when
    /// `monthly_gross` is zero, since there is no basis for the conversion.
    pub fn toggle_mode(
        &self,
        items: &mut [DeductionItem],
        id: &str,
        monthly_gross: f64,
    ) -> Result<bool, CoreError> {
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::not_found("deduction", id))?;

        if monthly_gross == 0.0 {
            return Ok(false);
        }

        match item.mode {
            DeductionMode::Percent => {
                item.mode = DeductionMode::Fixed;
                item.value = round2(monthly_gross * (item.value / 100.0));
            }
            DeductionMode::Fixed => {
                item.mode = DeductionMode::Percent;
                item.value = round2(item.value / monthly_gross * 100.0);
            }
        }
        Ok(true)
    }

    // ── Stack editing ───────────────────────────────────────────────

    /// Append a blank percent deduction and return its id.
    pub fn add_item(&self, items: &mut Vec<DeductionItem>) -> String {
        let item = DeductionItem::percent("New Deduction", 0.0);
        let id = item.id.clone();
        items.push(item);
        id
    }

    /// Replace an item's name and value in place (mode is changed only via
    /// [`toggle_mode`](Self::toggle_mode) or [`set_mode`](Self::set_mode)).
    pub fn update_item(
        &self,
        items: &mut [DeductionItem],
        id: &str,
        name: Option<String>,
        value: Option<f64>,
    ) -> Result<(), CoreError> {
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::not_found("deduction", id))?;
        if let Some(name) = name {
            item.name = name;
        }
        if let Some(value) = value {
            item.value = value;
        }
        Ok(())
    }

    /// Change an item's mode without converting its value.
    pub fn set_mode(
        &self,
        items: &mut [DeductionItem],
        id: &str,
        mode: DeductionMode,
    ) -> Result<(), CoreError> {
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::not_found("deduction", id))?;
        item.mode = mode;
        Ok(())
    }

    /// Remove an item and return it.
    pub fn remove_item(
        &self,
        items: &mut Vec<DeductionItem>,
        id: &str,
    ) -> Result<DeductionItem, CoreError> {
        let idx = items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CoreError::not_found("deduction", id))?;
        Ok(items.remove(idx))
    }
}

impl Default for SalaryService {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
