use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use open_budget_core::errors::CoreError;
use open_budget_core::models::budget::{BucketKey, BudgetItem};
use open_budget_core::models::debt::{Debt, PayoffStrategy};
use open_budget_core::models::profile::{FinancialProfile, Goal, ProfilePatch, RichLife};
use open_budget_core::models::salary::{DeductionItem, Region, SalaryMode};
use open_budget_core::storage::kv::{FileStore, KeyValueStore, MemoryStore};
use open_budget_core::storage::manager::StorageManager;
use open_budget_core::store::ProfileStore;
use open_budget_core::OpenBudget;

const KEY: &str = "open-budget-data";

fn open_dir(dir: &std::path::Path) -> OpenBudget {
    OpenBudget::open(Box::new(FileStore::open(dir).unwrap())).unwrap()
}

fn income_patch(income: f64) -> ProfilePatch {
    ProfilePatch {
        income: Some(income),
        ..Default::default()
    }
}

// ═══════════════════════════════════════════════════════════════════
// ProfileStore — subscriptions
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_store_notifies_subscribers_with_new_state() {
    let mut store = ProfileStore::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |p| sink.borrow_mut().push(p.income));

    store.apply(income_patch(1_000.0));
    store.apply(income_patch(2_000.0));

    assert_eq!(*seen.borrow(), vec![1_000.0, 2_000.0]);
}

#[test]
fn test_store_unsubscribe_stops_notifications() {
    let mut store = ProfileStore::default();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

    store.apply(income_patch(1.0));
    assert!(store.unsubscribe(id));
    store.apply(income_patch(2.0));

    assert_eq!(*calls.borrow(), 1);
    assert!(!store.unsubscribe(id));
}

#[test]
fn test_store_empty_patch_is_silent() {
    let mut store = ProfileStore::default();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    store.subscribe(move |_| *counter.borrow_mut() += 1);

    store.apply(ProfilePatch::default());

    assert_eq!(*calls.borrow(), 0);
    assert!(!store.has_unsaved_changes());
}

#[test]
fn test_store_patch_is_shallow() {
    let mut store = ProfileStore::default();
    let before = store.snapshot().clone();
    store.apply(ProfilePatch {
        currency: Some("€".into()),
        ..Default::default()
    });
    let after = store.snapshot();
    assert_eq!(after.currency, "€");
    assert_eq!(after.budget, before.budget);
    assert_eq!(after.assets, before.assets);
    assert_eq!(after.income, before.income);
}

#[test]
fn test_store_rich_life_can_be_cleared() {
    let mut store = ProfileStore::default();
    store.apply(ProfilePatch {
        rich_life: Some(Some(RichLife {
            love: "Travel".into(),
            hate: "Commuting".into(),
            statement: "Spend on trips, cut the car".into(),
        })),
        ..Default::default()
    });
    assert!(store.snapshot().rich_life.is_some());
    store.apply(ProfilePatch {
        rich_life: Some(None),
        ..Default::default()
    });
    assert!(store.snapshot().rich_life.is_none());
}

// ═══════════════════════════════════════════════════════════════════
// ProfileStore — save boundary
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_store_apply_does_not_persist() {
    let mut backend = MemoryStore::new();
    let mut store = ProfileStore::load(&backend, KEY).unwrap();
    store.apply(income_patch(3_000.0));

    assert!(store.has_unsaved_changes());
    assert!(backend.is_empty());

    store.commit(&mut backend, KEY).unwrap();
    assert!(!store.has_unsaved_changes());
    assert_eq!(store.committed().income, 3_000.0);
    let saved = StorageManager::load(&backend, KEY).unwrap().unwrap();
    assert_eq!(saved.income, 3_000.0);
}

#[test]
fn test_store_discard_rolls_back_and_notifies() {
    let mut backend = MemoryStore::new();
    let mut store = ProfileStore::load(&backend, KEY).unwrap();
    store.apply(income_patch(3_000.0));
    store.commit(&mut backend, KEY).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |p| sink.borrow_mut().push(p.income));

    store.apply(income_patch(9_999.0));
    store.discard();

    assert_eq!(store.snapshot().income, 3_000.0);
    assert_eq!(*seen.borrow(), vec![9_999.0, 3_000.0]);
    assert!(!store.has_unsaved_changes());
}

#[test]
fn test_store_discard_without_changes_is_silent() {
    let mut store = ProfileStore::default();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    store.subscribe(move |_| *counter.borrow_mut() += 1);
    store.discard();
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn test_store_loads_defaults_when_empty() {
    let backend = MemoryStore::new();
    let store = ProfileStore::load(&backend, KEY).unwrap();
    assert_eq!(store.snapshot(), &FinancialProfile::default());
}

#[test]
fn test_store_loads_defaults_when_malformed() {
    let mut backend = MemoryStore::new();
    backend.set(KEY, "{ this is not json").unwrap();
    let store = ProfileStore::load(&backend, KEY).unwrap();
    assert_eq!(store.snapshot(), &FinancialProfile::default());
    // the unreadable blob stays until the next commit
    assert_eq!(backend.get(KEY).unwrap().as_deref(), Some("{ this is not json"));
}

#[test]
fn test_store_migrates_legacy_blob_on_load() {
    let mut backend = MemoryStore::new();
    backend
        .set(KEY, r#"{"income":"2500","wealth":{"emergencyFund":400}}"#)
        .unwrap();
    let store = ProfileStore::load(&backend, KEY).unwrap();
    assert_eq!(store.snapshot().income, 2_500.0);
    assert_eq!(store.snapshot().assets.emergency_fund, 400.0);
    assert_eq!(store.snapshot().schema_version, 2);
}

#[test]
fn test_store_reset_clears_backend() {
    let mut backend = MemoryStore::new();
    let mut store = ProfileStore::load(&backend, KEY).unwrap();
    store.apply(income_patch(7_000.0));
    store.commit(&mut backend, KEY).unwrap();

    store.reset(&mut backend, KEY).unwrap();

    assert!(backend.is_empty());
    assert_eq!(store.snapshot(), &FinancialProfile::default());
    assert!(!store.has_unsaved_changes());
}

// ═══════════════════════════════════════════════════════════════════
// OpenBudget — persistence (native only)
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_open_budget_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut app = open_dir(dir.path());
        app.set_income(4_200.0);
        app.set_currency("£");
        app.add_debt(Debt::new("Card", 2_000.0, 19.0, 60.0));
        app.commit().unwrap();
    }
    let app = open_dir(dir.path());
    assert_eq!(app.profile().income, 4_200.0);
    assert_eq!(app.profile().currency, "£");
    assert_eq!(app.profile().debts.len(), 1);
    assert!(dir.path().join(format!("{KEY}.json")).exists());
}

#[test]
fn test_open_budget_uncommitted_edits_are_lost() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut app = open_dir(dir.path());
        app.set_income(4_200.0);
        assert!(app.has_unsaved_changes());
    }
    let app = open_dir(dir.path());
    assert_eq!(app.profile().income, 0.0);
}

#[test]
fn test_open_budget_reset_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = open_dir(dir.path());
    app.set_income(1_000.0);
    app.commit().unwrap();
    app.reset().unwrap();

    assert!(!dir.path().join(format!("{KEY}.json")).exists());
    assert_eq!(app.profile(), &FinancialProfile::default());
}

// ═══════════════════════════════════════════════════════════════════
// OpenBudget — import / export
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_export_then_import_restores_profile() {
    let mut app = OpenBudget::in_memory();
    app.set_income(5_000.0);
    app.add_goal(Goal::new("Japan trip", 800.0, 4_000.0));
    app.add_budget_item(BucketKey::Invest, BudgetItem::new("Pension top-up", 250.0));
    let exported = app.export_json().unwrap();
    let snapshot = app.profile().clone();

    app.reset().unwrap();
    assert_ne!(app.profile(), &snapshot);

    app.import_json(&exported).unwrap();
    assert_eq!(app.profile(), &snapshot);
    assert!(!app.has_unsaved_changes());
}

#[test]
fn test_import_replaces_wholesale_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = open_dir(dir.path());
    app.add_debt(Debt::new("Loan", 9_000.0, 7.0, 180.0));
    app.set_emergency_fund(2_500.0);
    app.commit().unwrap();

    app.import_json(r#"{ "income": 3100 }"#).unwrap();
    assert_eq!(app.profile().income, 3_100.0);
    assert!(app.profile().debts.is_empty());
    assert_eq!(app.profile().assets.emergency_fund, 0.0);

    let reopened = open_dir(dir.path());
    assert_eq!(reopened.profile(), app.profile());
}

#[test]
fn test_rejected_import_leaves_state_untouched() {
    let mut app = OpenBudget::in_memory();
    app.set_income(5_000.0);
    app.commit().unwrap();
    app.set_currency("€");
    let before = app.profile().clone();

    for bad in ["not json", "[]", r#"{ "assets": {} }"#, r#"{ "schemaVersion": 9, "income": 1 }"#] {
        let err = app.import_json(bad).unwrap_err();
        assert!(matches!(err, CoreError::ImportRejected(_)), "input {bad:?}");
        assert_eq!(app.profile(), &before);
    }
    assert!(app.has_unsaved_changes());
}

#[test]
fn test_import_notifies_subscribers() {
    let mut app = OpenBudget::in_memory();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    app.subscribe(move |p| sink.borrow_mut().push(p.income));

    app.import_json(r#"{ "income": 1234 }"#).unwrap();
    assert_eq!(*seen.borrow(), vec![1_234.0]);
}

#[test]
fn test_export_file_name() {
    let date = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
    assert_eq!(OpenBudget::export_file_name(date), "open-budget-2025-11-30.json");
}

// ═══════════════════════════════════════════════════════════════════
// OpenBudget — collection editing
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_debt_crud() {
    let mut app = OpenBudget::in_memory();
    let id = app.add_debt(Debt::new("Car", 12_000.0, 6.0, 250.0));

    let mut edited = app.profile().debts[0].clone();
    edited.balance = 11_500.0;
    app.update_debt(edited).unwrap();
    assert_eq!(app.profile().debts[0].balance, 11_500.0);

    let removed = app.remove_debt(&id).unwrap();
    assert_eq!(removed.name, "Car");
    assert!(app.profile().debts.is_empty());

    let err = app.remove_debt(&id).unwrap_err();
    assert!(matches!(err, CoreError::ItemNotFound { .. }));
    assert!(app.update_debt(removed).is_err());
}

#[test]
fn test_budget_item_crud() {
    let mut app = OpenBudget::in_memory();
    let id = app.add_budget_item(BucketKey::GuiltFree, BudgetItem::new("Concerts", 80.0));
    assert!(app.profile().budget.guilt_free.iter().any(|i| i.id == id));

    app.update_budget_item(BucketKey::GuiltFree, BudgetItem::with_id(id.clone(), "Gigs", 95.0))
        .unwrap();
    let item = app.profile().budget.guilt_free.iter().find(|i| i.id == id).unwrap();
    assert_eq!(item.name, "Gigs");
    assert_eq!(item.amount, 95.0);

    // wrong bucket
    let err = app.remove_budget_item(BucketKey::Fixed, &id).unwrap_err();
    match err {
        CoreError::ItemNotFound { collection, .. } => assert_eq!(collection, "fixed"),
        other => panic!("unexpected error: {other}"),
    }

    app.remove_budget_item(BucketKey::GuiltFree, &id).unwrap();
    assert!(!app.profile().budget.guilt_free.iter().any(|i| i.id == id));
}

#[test]
fn test_goal_crud() {
    let mut app = OpenBudget::in_memory();
    let id = app.add_goal(Goal::new("Bike", 100.0, 1_000.0));

    let mut goal = app.profile().assets.goals[0].clone();
    goal.current = 600.0;
    app.update_goal(goal).unwrap();
    assert_eq!(app.profile().assets.goals[0].progress(), 0.6);

    app.remove_goal(&id).unwrap();
    assert!(app.remove_goal(&id).is_err());
}

#[test]
fn test_set_rich_life() {
    let mut app = OpenBudget::in_memory();
    app.set_rich_life(RichLife {
        love: "Books".into(),
        hate: "Subscriptions".into(),
        statement: String::new(),
    });
    assert_eq!(app.profile().rich_life.as_ref().unwrap().love, "Books");
}

// ═══════════════════════════════════════════════════════════════════
// Full Integration Tests
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_full_flow_salary_into_budget() {
    let mut app = OpenBudget::in_memory();
    let stack = vec![
        DeductionItem::percent("Federal Tax", 22.0),
        DeductionItem::percent("FICA", 7.65),
        DeductionItem::fixed("Health Insurance", 200.0),
    ];
    let salary = app.resolve_salary(80_000.0, SalaryMode::Forward, &stack);
    app.use_salary_in_budget(&salary, Region::Usa.currency());

    let p = app.profile();
    assert_eq!(p.ctc, 80_000.0);
    assert!((p.income - 4_490.0).abs() < 1e-6);
    assert_eq!(p.currency, "$");

    let summary = app.budget_summary();
    assert!((summary.income - 4_490.0).abs() < 1e-6);
    assert!((summary.unallocated - (4_490.0 - summary.total_allocated)).abs() < 1e-9);
}

#[test]
fn test_full_flow_toggle_deduction() {
    let app = OpenBudget::in_memory();
    let mut stack = Region::Usa.default_deductions();
    let salary = app.resolve_salary(60_000.0, SalaryMode::Forward, &stack);
    let id = stack[0].id.clone();

    assert!(app.toggle_deduction_mode(&mut stack, &id, salary.monthly_gross).unwrap());
    let after = app.resolve_salary(60_000.0, SalaryMode::Forward, &stack);
    assert!((after.monthly_net - salary.monthly_net).abs() < 0.01);
}

#[test]
fn test_full_flow_debt_plan() {
    let mut app = OpenBudget::in_memory();
    app.add_debt(Debt::new("Credit Card", 5_000.0, 24.0, 150.0));
    app.add_debt(Debt::new("Student Loan", 15_000.0, 6.0, 200.0));

    let plan = app.simulate_payoff(PayoffStrategy::Avalanche, 300.0);
    assert_eq!(plan.months_to_payoff, 42);
    assert!(!plan.capped);

    let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    assert_eq!(plan.debt_free_date(start), NaiveDate::from_ymd_opt(2028, 7, 15));
}

#[test]
fn test_full_flow_growth_from_investments() {
    let mut app = OpenBudget::in_memory();
    app.set_investments(50_000.0);
    let inputs = app.growth_inputs(0.0, 10.0, 100_000.0);
    assert_eq!(inputs.current_portfolio, 50_000.0);

    let projection = app.project_growth(&inputs);
    assert_eq!(projection.years_to_target, Some(8));
    assert_eq!(projection.history.len(), 31);
}

#[test]
fn test_full_flow_safety_net_and_ledger() {
    let mut app = OpenBudget::in_memory();
    app.set_income(5_000.0);
    let fixed = app.profile().budget.fixed.clone();
    for item in fixed {
        app.remove_budget_item(BucketKey::Fixed, &item.id).unwrap();
    }
    let savings = app.profile().budget.savings.clone();
    for item in savings {
        app.remove_budget_item(BucketKey::Savings, &item.id).unwrap();
    }
    app.add_budget_item(BucketKey::Fixed, BudgetItem::new("Rent", 2_000.0));
    app.add_budget_item(BucketKey::Savings, BudgetItem::new("Rainy day", 500.0));
    app.set_emergency_fund(3_000.0);

    let net = app.budget_summary().safety_net;
    assert_eq!(net.target, 12_000.0);
    assert_eq!(net.months_to_safety, Some(18));

    let tsv = app.ledger_tsv();
    assert!(tsv.starts_with("Category\tItem\tAmount\n"));
    assert!(tsv.contains("FIXED\tRent\t2000\n"));
    assert!(tsv.contains("SAVINGS\tRainy day\t500\n"));
}

#[test]
fn test_full_flow_custom_config() {
    use open_budget_core::models::settings::PlannerConfig;

    let config = PlannerConfig {
        storage_key: "household".into(),
        growth_horizon_years: 10,
        ..Default::default()
    };
    let dir = tempfile::tempdir().unwrap();
    let mut app =
        OpenBudget::open_with_config(Box::new(FileStore::open(dir.path()).unwrap()), config).unwrap();
    app.set_income(10.0);
    app.commit().unwrap();

    assert!(dir.path().join("household.json").exists());
    let projection = app.project_growth(&app.growth_inputs(100.0, 5.0, 1e9));
    assert_eq!(projection.history.len(), 11);
}
