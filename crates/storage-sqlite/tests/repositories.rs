//! Repository integration tests against a real temporary database.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use contas_core::cards::{CardRepositoryTrait, NewCard};
use contas_core::categories::{CategoryDeleteStatus, CategoryRepositoryTrait, NewCategory};
use contas_core::expenses::{ExpenseRepositoryTrait, NewExpense};
use contas_core::goals::{GoalRepositoryTrait, NewContribution, NewGoal};

use contas_storage_sqlite::cards::CardRepository;
use contas_storage_sqlite::categories::CategoryRepository;
use contas_storage_sqlite::db::{self, write_actor, DbPool, WriteHandle};
use contas_storage_sqlite::expenses::ExpenseRepository;
use contas_storage_sqlite::goals::GoalRepository;

struct TestDb {
    // dropped last; deletes the database files
    _dir: TempDir,
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

fn setup() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("contas.db").to_string_lossy().to_string();
    let pool = db::create_pool(&db_path).unwrap();
    db::run_migrations(&pool).unwrap();
    let writer = write_actor::spawn_writer((*pool).clone());
    TestDb {
        _dir: dir,
        pool,
        writer,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_expense(category_id: &str, card_id: Option<&str>) -> NewExpense {
    NewExpense {
        id: None,
        name: "Mercado do mês".to_string(),
        note: Some("compra grande".to_string()),
        amount: dec!(1234.56),
        responsible: Some("Eu".to_string()),
        expense_date: date(2024, 3, 5),
        is_installment: false,
        installment_count: Some(1),
        installment_amount: None,
        category_id: category_id.to_string(),
        card_id: card_id.map(|c| c.to_string()),
    }
}

#[tokio::test]
async fn test_category_soft_delete_when_referenced() {
    let db = setup();
    let categories = CategoryRepository::new(db.pool.clone(), db.writer.clone());
    let expenses = ExpenseRepository::new(db.pool.clone(), db.writer.clone());

    let used = categories
        .create_category(NewCategory {
            id: None,
            name: "Mercado".to_string(),
        })
        .await
        .unwrap();
    let unused = categories
        .create_category(NewCategory {
            id: None,
            name: "Lazer".to_string(),
        })
        .await
        .unwrap();

    expenses.create_expense(new_expense(&used.id, None)).await.unwrap();

    let status = categories
        .delete_or_deactivate_category(&used.id)
        .await
        .unwrap();
    assert_eq!(status, CategoryDeleteStatus::SoftDeleted);
    let reloaded = categories.get_category_by_id(&used.id).unwrap().unwrap();
    assert!(!reloaded.is_active);
    // hidden from the picker, still resolvable for history
    assert!(categories
        .get_active_categories()
        .unwrap()
        .iter()
        .all(|c| c.id != used.id));

    let status = categories
        .delete_or_deactivate_category(&unused.id)
        .await
        .unwrap();
    assert_eq!(status, CategoryDeleteStatus::Deleted);
    assert!(categories.get_category_by_id(&unused.id).unwrap().is_none());
}

#[tokio::test]
async fn test_category_unique_name() {
    let db = setup();
    let categories = CategoryRepository::new(db.pool.clone(), db.writer.clone());

    categories
        .create_category(NewCategory {
            id: None,
            name: "Mercado".to_string(),
        })
        .await
        .unwrap();
    let duplicate = categories
        .create_category(NewCategory {
            id: None,
            name: "Mercado".to_string(),
        })
        .await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_expense_roundtrip_preserves_amounts_and_dates() {
    let db = setup();
    let categories = CategoryRepository::new(db.pool.clone(), db.writer.clone());
    let cards = CardRepository::new(db.pool.clone(), db.writer.clone());
    let expenses = ExpenseRepository::new(db.pool.clone(), db.writer.clone());

    let category = categories
        .create_category(NewCategory {
            id: None,
            name: "Eletrônicos".to_string(),
        })
        .await
        .unwrap();
    let card = cards
        .create_card(NewCard {
            id: None,
            name: "Nubank".to_string(),
            closing_day: 10,
        })
        .await
        .unwrap();

    let mut payload = new_expense(&category.id, Some(&card.id));
    payload.is_installment = true;
    payload.installment_count = Some(3);
    payload.installment_amount = Some(dec!(411.52));
    payload.amount = dec!(1234.56);
    let created = expenses.create_expense(payload).await.unwrap();

    let reloaded = expenses.get_expense_by_id(&created.id).unwrap().unwrap();
    assert_eq!(reloaded.amount, dec!(1234.56));
    assert_eq!(reloaded.installment_amount, Some(dec!(411.52)));
    assert_eq!(reloaded.expense_date, date(2024, 3, 5));
    assert_eq!(reloaded.installment_count, 3);
    assert_eq!(reloaded.card_id.as_deref(), Some(card.id.as_str()));

    let for_card = expenses.get_expenses_for_card(&card.id).unwrap();
    assert_eq!(for_card.len(), 1);
    assert_eq!(expenses.count_for_category(&category.id).unwrap(), 1);

    let deleted = expenses.delete_expense(&created.id).await.unwrap();
    assert_eq!(deleted, 1);
    assert!(expenses.get_expense_by_id(&created.id).unwrap().is_none());
}

#[tokio::test]
async fn test_card_deactivation_filtering() {
    let db = setup();
    let cards = CardRepository::new(db.pool.clone(), db.writer.clone());

    let card = cards
        .create_card(NewCard {
            id: None,
            name: "Visa".to_string(),
            closing_day: 31,
        })
        .await
        .unwrap();
    assert!(card.is_active);

    let updated = cards.set_card_active(&card.id, false).await.unwrap();
    assert!(!updated.is_active);
    assert!(cards.get_cards(false).unwrap().is_empty());
    assert_eq!(cards.get_cards(true).unwrap().len(), 1);
}

#[tokio::test]
async fn test_goal_contributions_cascade_on_delete() {
    let db = setup();
    let goals = GoalRepository::new(db.pool.clone(), db.writer.clone());

    let goal = goals
        .insert_new_goal(NewGoal {
            id: None,
            name: "Viagem".to_string(),
            target_amount: dec!(5000.00),
            target_date: date(2025, 12, 1),
        })
        .await
        .unwrap();

    goals
        .insert_contribution(
            &goal.id,
            NewContribution {
                id: None,
                amount: dec!(50.00),
                responsible: "Eu".to_string(),
                contribution_date: date(2024, 6, 1),
            },
        )
        .await
        .unwrap();
    goals
        .insert_contribution(
            &goal.id,
            NewContribution {
                id: None,
                amount: dec!(25.50),
                responsible: "Ana".to_string(),
                contribution_date: date(2024, 6, 15),
            },
        )
        .await
        .unwrap();

    assert_eq!(goals.load_contributions().unwrap().len(), 2);

    goals.delete_goal(&goal.id).await.unwrap();
    assert!(goals.load_goals().unwrap().is_empty());
    assert!(goals.load_contributions().unwrap().is_empty());
}
