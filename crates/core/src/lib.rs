pub mod errors;
pub mod models;
pub mod services;
pub mod storage;
pub mod store;

use chrono::NaiveDate;
use models::{
    analytics::BudgetSummary,
    budget::{BucketKey, BudgetItem},
    debt::{Debt, PayoffResult, PayoffStrategy},
    growth::{GrowthInputs, GrowthProjection},
    profile::{FinancialProfile, Goal, ProfilePatch, RichLife},
    salary::{DeductionItem, SalaryBreakdown, SalaryMode},
    settings::PlannerConfig,
};
use services::{
    budget_service::BudgetService, debt_service::DebtService, growth_service::GrowthService,
    salary_service::SalaryService,
};
use storage::kv::{KeyValueStore, MemoryStore};
use storage::manager::StorageManager;
use store::{ProfileStore, SubscriptionId};

use errors::CoreError;

/// Main entry point for the Open Budget core library.
/// Holds the profile state, its backing store and the calculators.
///
/// Calculators always run against an explicit snapshot of the profile; only
/// the mutation methods here touch the [`ProfileStore`].
#[must_use]
pub struct OpenBudget {
    config: PlannerConfig,
    store: ProfileStore,
    backend: Box<dyn KeyValueStore>,
    salary_service: SalaryService,
    debt_service: DebtService,
    growth_service: GrowthService,
    budget_service: BudgetService,
}

impl std::fmt::Debug for OpenBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenBudget")
            .field("config", &self.config)
            .field("debts", &self.store.snapshot().debts.len())
            .field("goals", &self.store.snapshot().assets.goals.len())
            .field("dirty", &self.store.has_unsaved_changes())
            .finish()
    }
}

impl OpenBudget {
    /// Load (or create) the profile held in `backend`.
    pub fn open(backend: Box<dyn KeyValueStore>) -> Result<Self, CoreError> {
        Self::open_with_config(backend, PlannerConfig::default())
    }

    pub fn open_with_config(
        backend: Box<dyn KeyValueStore>,
        config: PlannerConfig,
    ) -> Result<Self, CoreError> {
        let store = ProfileStore::load(backend.as_ref(), &config.storage_key)?;
        Ok(Self::build(config, store, backend))
    }

    /// A fresh default profile backed by memory only.
    pub fn in_memory() -> Self {
        let config = PlannerConfig::default();
        Self::build(config, ProfileStore::default(), Box::new(MemoryStore::new()))
    }

    // ── State ───────────────────────────────────────────────────────

    /// The current working profile.
    #[must_use]
    pub fn profile(&self) -> &FinancialProfile {
        self.store.snapshot()
    }

    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Apply a shallow patch to the working profile.
    pub fn apply(&mut self, patch: ProfilePatch) -> &FinancialProfile {
        self.store.apply(patch)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FinancialProfile) + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Persist the working profile.
    pub fn commit(&mut self) -> Result<(), CoreError> {
        self.store.commit(self.backend.as_mut(), &self.config.storage_key)
    }

    /// Revert to the last committed profile.
    pub fn discard(&mut self) {
        self.store.discard();
    }

    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.store.has_unsaved_changes()
    }

    /// Delete all stored data and return to the default profile.
    pub fn reset(&mut self) -> Result<(), CoreError> {
        self.store.reset(self.backend.as_mut(), &self.config.storage_key)
    }

    // ── Salary ──────────────────────────────────────────────────────

    #[must_use]
    pub fn resolve_salary(
        &self,
        amount: f64,
        mode: SalaryMode,
        items: &[DeductionItem],
    ) -> SalaryBreakdown {
        self.salary_service.resolve(amount, mode, items)
    }

    /// Flip a deduction between percent and fixed at the given monthly gross.
    /// Returns `Ok(false)` when the gross is zero and nothing changed.
    pub fn toggle_deduction_mode(
        &self,
        items: &mut [DeductionItem],
        id: &str,
        monthly_gross: f64,
    ) -> Result<bool, CoreError> {
        self.salary_service.toggle_mode(items, id, monthly_gross)
    }

    /// Use a resolved salary as the budget's income: sets CTC, monthly
    /// income and currency in one patch.
    pub fn use_salary_in_budget(
        &mut self,
        salary: &SalaryBreakdown,
        currency: impl Into<String>,
    ) -> &FinancialProfile {
        self.store.apply(ProfilePatch {
            ctc: Some(salary.gross_annual),
            income: Some(salary.monthly_net),
            currency: Some(currency.into()),
            ..Default::default()
        })
    }

    // ── Debts ───────────────────────────────────────────────────────

    /// Simulate paying off the profile's debts.
    #[must_use]
    pub fn simulate_payoff(&self, strategy: PayoffStrategy, extra_payment: f64) -> PayoffResult {
        self.debt_service
            .simulate(&self.store.snapshot().debts, strategy, extra_payment)
    }

    /// Add a debt and return its id.
    pub fn add_debt(&mut self, debt: Debt) -> String {
        let id = debt.id.clone();
        let mut debts = self.store.snapshot().debts.clone();
        debts.push(debt);
        self.store.apply(ProfilePatch {
            debts: Some(debts),
            ..Default::default()
        });
        id
    }

    /// Replace the debt with the same id.
    pub fn update_debt(&mut self, debt: Debt) -> Result<(), CoreError> {
        let mut debts = self.store.snapshot().debts.clone();
        let slot = debts
            .iter_mut()
            .find(|d| d.id == debt.id)
            .ok_or_else(|| CoreError::not_found("debt", &debt.id))?;
        *slot = debt;
        self.store.apply(ProfilePatch {
            debts: Some(debts),
            ..Default::default()
        });
        Ok(())
    }

    pub fn remove_debt(&mut self, id: &str) -> Result<Debt, CoreError> {
        let mut debts = self.store.snapshot().debts.clone();
        let idx = debts
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| CoreError::not_found("debt", id))?;
        let removed = debts.remove(idx);
        self.store.apply(ProfilePatch {
            debts: Some(debts),
            ..Default::default()
        });
        Ok(removed)
    }

    // ── Growth ──────────────────────────────────────────────────────

    #[must_use]
    pub fn project_growth(&self, inputs: &GrowthInputs) -> GrowthProjection {
        self.growth_service.project(inputs)
    }

    /// Growth inputs seeded with the profile's current investments.
    #[must_use]
    pub fn growth_inputs(
        &self,
        monthly_contribution: f64,
        annual_return_rate: f64,
        target_amount: f64,
    ) -> GrowthInputs {
        GrowthInputs {
            current_portfolio: self.store.snapshot().assets.investments,
            monthly_contribution,
            annual_return_rate,
            target_amount,
        }
    }

    // ── Budget ledger ───────────────────────────────────────────────

    #[must_use]
    pub fn budget_summary(&self) -> BudgetSummary {
        self.budget_service.summarize(self.store.snapshot())
    }

    /// Tab-separated ledger for spreadsheet pasting.
    #[must_use]
    pub fn ledger_tsv(&self) -> String {
        BudgetService::ledger_tsv(&self.store.snapshot().budget)
    }

    /// Add an item to a bucket and return its id.
    pub fn add_budget_item(&mut self, key: BucketKey, item: BudgetItem) -> String {
        let id = item.id.clone();
        let mut budget = self.store.snapshot().budget.clone();
        budget.items_mut(key).push(item);
        self.store.apply(ProfilePatch {
            budget: Some(budget),
            ..Default::default()
        });
        id
    }

    /// Replace the item with the same id in `key`.
    pub fn update_budget_item(&mut self, key: BucketKey, item: BudgetItem) -> Result<(), CoreError> {
        let mut budget = self.store.snapshot().budget.clone();
        let slot = budget
            .items_mut(key)
            .iter_mut()
            .find(|i| i.id == item.id)
            .ok_or_else(|| CoreError::not_found(key.as_str(), &item.id))?;
        *slot = item;
        self.store.apply(ProfilePatch {
            budget: Some(budget),
            ..Default::default()
        });
        Ok(())
    }

    pub fn remove_budget_item(&mut self, key: BucketKey, id: &str) -> Result<BudgetItem, CoreError> {
        let mut budget = self.store.snapshot().budget.clone();
        let items = budget.items_mut(key);
        let idx = items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CoreError::not_found(key.as_str(), id))?;
        let removed = items.remove(idx);
        self.store.apply(ProfilePatch {
            budget: Some(budget),
            ..Default::default()
        });
        Ok(removed)
    }

    // ── Assets & goals ──────────────────────────────────────────────

    pub fn set_emergency_fund(&mut self, amount: f64) {
        let mut assets = self.store.snapshot().assets.clone();
        assets.emergency_fund = amount;
        self.store.apply(ProfilePatch {
            assets: Some(assets),
            ..Default::default()
        });
    }

    pub fn set_investments(&mut self, amount: f64) {
        let mut assets = self.store.snapshot().assets.clone();
        assets.investments = amount;
        self.store.apply(ProfilePatch {
            assets: Some(assets),
            ..Default::default()
        });
    }

    pub fn add_goal(&mut self, goal: Goal) -> String {
        let id = goal.id.clone();
        let mut assets = self.store.snapshot().assets.clone();
        assets.goals.push(goal);
        self.store.apply(ProfilePatch {
            assets: Some(assets),
            ..Default::default()
        });
        id
    }

    pub fn update_goal(&mut self, goal: Goal) -> Result<(), CoreError> {
        let mut assets = self.store.snapshot().assets.clone();
        let slot = assets
            .goals
            .iter_mut()
            .find(|g| g.id == goal.id)
            .ok_or_else(|| CoreError::not_found("goal", &goal.id))?;
        *slot = goal;
        self.store.apply(ProfilePatch {
            assets: Some(assets),
            ..Default::default()
        });
        Ok(())
    }

    pub fn remove_goal(&mut self, id: &str) -> Result<Goal, CoreError> {
        let mut assets = self.store.snapshot().assets.clone();
        let idx = assets
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| CoreError::not_found("goal", id))?;
        let removed = assets.goals.remove(idx);
        self.store.apply(ProfilePatch {
            assets: Some(assets),
            ..Default::default()
        });
        Ok(removed)
    }

    // ── Profile fields ──────────────────────────────────────────────

    pub fn set_income(&mut self, income: f64) {
        self.store.apply(ProfilePatch {
            income: Some(income),
            ..Default::default()
        });
    }

    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.store.apply(ProfilePatch {
            currency: Some(currency.into()),
            ..Default::default()
        });
    }

    pub fn set_rich_life(&mut self, vision: RichLife) {
        self.store.apply(ProfilePatch {
            rich_life: Some(Some(vision)),
            ..Default::default()
        });
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// The working profile as pretty JSON.
    pub fn export_json(&self) -> Result<String, CoreError> {
        StorageManager::export_json(self.store.snapshot())
    }

    /// Suggested file name for an export made on `date`.
    #[must_use]
    pub fn export_file_name(date: NaiveDate) -> String {
        StorageManager::export_file_name(date)
    }

    /// Replace the whole profile with an imported backup and persist it.
    ///
    /// Nothing changes if the file is rejected or cannot be written.
    pub fn import_json(&mut self, json: &str) -> Result<(), CoreError> {
        let imported = match StorageManager::parse_import(json) {
            Ok(profile) => profile,
            Err(e) => {
                log::warn!("Import discarded: {e}");
                return Err(e);
            }
        };

        let previous = self.store.snapshot().clone();
        self.store.replace(imported);
        if let Err(e) = self.commit() {
            self.store.replace(previous);
            return Err(e);
        }
        log::info!("Imported profile replaced current data");
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(config: PlannerConfig, store: ProfileStore, backend: Box<dyn KeyValueStore>) -> Self {
        Self {
            salary_service: SalaryService::new(),
            debt_service: DebtService::with_config(&config),
            growth_service: GrowthService::with_config(&config),
            budget_service: BudgetService::with_config(&config),
            config,
            store,
            backend,
        }
    }
}
