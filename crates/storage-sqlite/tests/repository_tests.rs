//! Integration tests for the SQLite repositories, run against a fresh
//! database file per test.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Arc;

use moneta_core::categories::{CategoryKind, CategoryRepositoryTrait, NewCategory};
use moneta_core::holdings::{
    HoldingKind, HoldingRepositoryTrait, HoldingUpdate, NewHolding, SettlementWrite,
};
use moneta_core::ledger::{LedgerDirection, LedgerFilter, LedgerRepositoryTrait, NewLedgerEntry};
use moneta_core::errors::{DatabaseError, Error};
use moneta_storage_sqlite::budgets::BudgetRepository;
use moneta_storage_sqlite::categories::CategoryRepository;
use moneta_storage_sqlite::holdings::HoldingRepository;
use moneta_storage_sqlite::ledger::LedgerRepository;
use moneta_storage_sqlite::tasks::TaskRepository;
use moneta_storage_sqlite::{create_pool, init, run_migrations, spawn_writer};

struct TestDb {
    _dir: tempfile::TempDir,
    holdings: HoldingRepository,
    ledger: LedgerRepository,
    categories: CategoryRepository,
    budgets: BudgetRepository,
    tasks: TaskRepository,
}

fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("moneta.db");
    let db_path = init(db_path.to_str().unwrap()).expect("init");
    let pool = create_pool(&db_path).expect("pool");
    run_migrations(&pool).expect("migrations");
    let writer = spawn_writer(pool.clone());

    TestDb {
        holdings: HoldingRepository::new(pool.clone(), writer.clone()),
        ledger: LedgerRepository::new(pool.clone(), writer.clone()),
        categories: CategoryRepository::new(pool.clone(), writer.clone()),
        budgets: BudgetRepository::new(pool.clone(), writer.clone()),
        tasks: TaskRepository::new(pool, writer),
        _dir: dir,
    }
}

fn new_holding(name: &str, kind: HoldingKind, value: rust_decimal::Decimal) -> NewHolding {
    NewHolding {
        id: None,
        name: name.to_string(),
        kind,
        value,
        quantity: None,
        buy_price: None,
        current_price: None,
        coin_ref: None,
        unit_denominated: false,
        description: None,
    }
}

#[tokio::test]
async fn holding_crud_round_trip() {
    let db = setup();

    let created = db
        .holdings
        .create(new_holding("Savings", HoldingKind::Cash, dec!(1_500_000)))
        .await
        .unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.value, dec!(1_500_000));
    assert_eq!(created.kind, HoldingKind::Cash);

    let fetched = db.holdings.get_by_id(&created.id).unwrap();
    assert_eq!(fetched.name, "Savings");

    let updated = db
        .holdings
        .update(HoldingUpdate {
            id: Some(created.id.clone()),
            name: "Emergency fund".to_string(),
            kind: HoldingKind::Cash,
            value: dec!(2_000_000),
            quantity: None,
            buy_price: None,
            current_price: None,
            coin_ref: None,
            unit_denominated: false,
            description: Some("3 months of expenses".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "Emergency fund");
    assert_eq!(updated.value, dec!(2_000_000));
    assert_eq!(updated.created_at, created.created_at);

    let deleted = db.holdings.delete(&created.id).await.unwrap();
    assert_eq!(deleted, 1);
    assert!(matches!(
        db.holdings.get_by_id(&created.id),
        Err(Error::Database(DatabaseError::NotFound(_)))
    ));
}

#[tokio::test]
async fn holdings_list_sorts_by_value_descending() {
    let db = setup();
    for (name, value) in [("small", dec!(10)), ("large", dec!(1000)), ("mid", dec!(500))] {
        db.holdings
            .create(new_holding(name, HoldingKind::Cash, value))
            .await
            .unwrap();
    }

    let listed = db.holdings.list(None).unwrap();
    let names: Vec<&str> = listed.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["large", "mid", "small"]);
}

#[tokio::test]
async fn holdings_list_filters_by_kind() {
    let db = setup();
    db.holdings
        .create(new_holding("loan", HoldingKind::Debt, dec!(100)))
        .await
        .unwrap();
    db.holdings
        .create(new_holding("wallet", HoldingKind::Cash, dec!(50)))
        .await
        .unwrap();

    let debts = db.holdings.list(Some(HoldingKind::Debt)).unwrap();
    assert_eq!(debts.len(), 1);
    assert_eq!(debts[0].name, "loan");
}

#[tokio::test]
async fn unit_holding_preserves_decimal_fields() {
    let db = setup();
    let created = db
        .holdings
        .create(NewHolding {
            id: None,
            name: "ETH position".to_string(),
            kind: HoldingKind::Crypto,
            value: dec!(60_000_000),
            quantity: Some(dec!(2)),
            buy_price: Some(dec!(25_000_000)),
            current_price: Some(dec!(30_000_000)),
            coin_ref: Some("ethereum".to_string()),
            unit_denominated: false,
            description: None,
        })
        .await
        .unwrap();

    let fetched = db.holdings.get_by_id(&created.id).unwrap();
    assert_eq!(fetched.quantity, Some(dec!(2)));
    assert_eq!(fetched.buy_price, Some(dec!(25_000_000)));
    assert_eq!(fetched.current_price, Some(dec!(30_000_000)));
    assert_eq!(fetched.coin_ref.as_deref(), Some("ethereum"));
}

#[tokio::test]
async fn settlement_writes_holding_and_ledger_together() {
    let db = setup();
    let holding = db
        .holdings
        .create(new_holding("Car loan", HoldingKind::Debt, dec!(1_000_000)))
        .await
        .unwrap();
    let category = db
        .categories
        .create(NewCategory {
            id: None,
            name: "Debt payment".to_string(),
            kind: CategoryKind::Expense,
        })
        .await
        .unwrap();

    let (updated, entry) = db
        .holdings
        .apply_settlement(
            SettlementWrite {
                holding_id: holding.id.clone(),
                new_value: dec!(0),
                new_quantity: None,
            },
            Some(NewLedgerEntry {
                id: None,
                direction: LedgerDirection::Expense,
                amount: dec!(1_000_000),
                category_id: Some(category.id.clone()),
                holding_id: Some(holding.id.clone()),
                description: Some("Pay Car loan (Full)".to_string()),
                date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            }),
        )
        .await
        .unwrap();

    assert_eq!(updated.value, dec!(0));
    let entry = entry.expect("ledger entry inserted");
    assert_eq!(entry.amount, dec!(1_000_000));

    let stored = db.ledger.get_by_id(&entry.id).unwrap();
    assert_eq!(stored.direction, LedgerDirection::Expense);
    assert_eq!(stored.holding_id.as_deref(), Some(holding.id.as_str()));
}

#[tokio::test]
async fn settlement_rolls_back_when_ledger_insert_fails() {
    let db = setup();
    let holding = db
        .holdings
        .create(new_holding("Car loan", HoldingKind::Debt, dec!(1_000_000)))
        .await
        .unwrap();

    // Nonexistent category violates the foreign key, failing the insert
    // after the holding update ran inside the same transaction.
    let result = db
        .holdings
        .apply_settlement(
            SettlementWrite {
                holding_id: holding.id.clone(),
                new_value: dec!(0),
                new_quantity: None,
            },
            Some(NewLedgerEntry {
                id: None,
                direction: LedgerDirection::Expense,
                amount: dec!(1_000_000),
                category_id: Some("missing-category".to_string()),
                holding_id: Some(holding.id.clone()),
                description: None,
                date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            }),
        )
        .await;
    assert!(result.is_err());

    // The holding write must have rolled back with it.
    let stored = db.holdings.get_by_id(&holding.id).unwrap();
    assert_eq!(stored.value, dec!(1_000_000));
    assert!(db.ledger.list(&LedgerFilter::default()).unwrap().is_empty());
}

#[tokio::test]
async fn ledger_filters_and_ordering() {
    let db = setup();
    let category = db
        .categories
        .create(NewCategory {
            id: None,
            name: "Groceries".to_string(),
            kind: CategoryKind::Expense,
        })
        .await
        .unwrap();

    let d = |day| NaiveDate::from_ymd_opt(2026, 8, day).unwrap();
    for (amount, day, dir) in [
        (dec!(100), 1, LedgerDirection::Expense),
        (dec!(200), 15, LedgerDirection::Income),
        (dec!(300), 31, LedgerDirection::Expense),
    ] {
        db.ledger
            .create(NewLedgerEntry {
                id: None,
                direction: dir,
                amount,
                category_id: Some(category.id.clone()),
                holding_id: None,
                description: None,
                date: d(day),
            })
            .await
            .unwrap();
    }

    let all = db.ledger.list(&LedgerFilter::default()).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].date, d(31)); // most recent first

    let expenses = db
        .ledger
        .list(&LedgerFilter {
            direction: Some(LedgerDirection::Expense),
            ..LedgerFilter::default()
        })
        .unwrap();
    assert_eq!(expenses.len(), 2);

    let mid_month = db.ledger.list(&LedgerFilter::range(d(10), d(20))).unwrap();
    assert_eq!(mid_month.len(), 1);
    assert_eq!(mid_month[0].amount, dec!(200));

    let capped = db
        .ledger
        .list(&LedgerFilter {
            limit: Some(2),
            ..LedgerFilter::default()
        })
        .unwrap();
    assert_eq!(capped.len(), 2);
}

#[tokio::test]
async fn category_delete_is_restricted_while_referenced() {
    let db = setup();
    let category = db
        .categories
        .create(NewCategory {
            id: None,
            name: "Groceries".to_string(),
            kind: CategoryKind::Expense,
        })
        .await
        .unwrap();
    db.ledger
        .create(NewLedgerEntry {
            id: None,
            direction: LedgerDirection::Expense,
            amount: dec!(10),
            category_id: Some(category.id.clone()),
            holding_id: None,
            description: None,
            date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        })
        .await
        .unwrap();

    let err = db.categories.delete(&category.id).await.unwrap_err();
    assert!(matches!(err, Error::Database(_)));
    assert!(db.categories.get_by_id(&category.id).is_ok());
}

#[tokio::test]
async fn deleting_a_holding_detaches_its_ledger_entries() {
    let db = setup();
    let holding = db
        .holdings
        .create(new_holding("Wallet", HoldingKind::Cash, dec!(100)))
        .await
        .unwrap();
    let entry = db
        .ledger
        .create(NewLedgerEntry {
            id: None,
            direction: LedgerDirection::Expense,
            amount: dec!(10),
            category_id: None,
            holding_id: Some(holding.id.clone()),
            description: None,
            date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        })
        .await
        .unwrap();

    db.holdings.delete(&holding.id).await.unwrap();

    let stored = db.ledger.get_by_id(&entry.id).unwrap();
    assert!(stored.holding_id.is_none());
}

#[tokio::test]
async fn task_board_round_trip() {
    use moneta_core::tasks::{NewTask, TaskPriority, TaskRepositoryTrait, TaskStatus};

    let db = setup();
    let task = db
        .tasks
        .create(NewTask {
            id: None,
            title: "Review subscriptions".to_string(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::High,
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1),
        })
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::Todo);

    let moved = db
        .tasks
        .set_status(&task.id, TaskStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(moved.status, TaskStatus::InProgress);
    assert!(moved.updated_at >= task.updated_at);

    let listed = db.tasks.list().unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn budget_round_trip() {
    use moneta_core::budgets::{BudgetPeriod, BudgetRepositoryTrait, BudgetUpdate, NewBudget};

    let db = setup();
    let category = db
        .categories
        .create(NewCategory {
            id: None,
            name: "Food".to_string(),
            kind: CategoryKind::Expense,
        })
        .await
        .unwrap();

    let budget = db
        .budgets
        .create(NewBudget {
            id: None,
            category_id: category.id.clone(),
            amount: dec!(2_000_000),
            period: BudgetPeriod::Monthly,
        })
        .await
        .unwrap();
    assert_eq!(budget.amount, dec!(2_000_000));

    let updated = db
        .budgets
        .update(BudgetUpdate {
            id: Some(budget.id.clone()),
            amount: dec!(2_500_000),
            period: BudgetPeriod::Monthly,
        })
        .await
        .unwrap();
    assert_eq!(updated.amount, dec!(2_500_000));
    assert_eq!(updated.category_id, category.id);

    assert_eq!(db.budgets.delete(&budget.id).await.unwrap(), 1);
}
