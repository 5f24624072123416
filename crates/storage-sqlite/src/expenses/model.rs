//! Database models for expenses.
//!
//! Amounts and dates are stored as `Text` and parsed tolerantly on load.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use contas_core::expenses::Expense;

use crate::utils::{parse_date, parse_decimal};

/// Database model for expenses
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
// updates are full replacements: a cleared note or card must persist as NULL
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDB {
    pub id: String,
    pub name: String,
    pub note: Option<String>,
    pub amount: String,
    pub responsible: String,
    pub expense_date: String,
    pub is_installment: bool,
    pub installment_count: i32,
    pub installment_amount: Option<String>,
    pub category_id: String,
    pub card_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ExpenseDB> for Expense {
    fn from(db: ExpenseDB) -> Self {
        Self {
            amount: parse_decimal(&db.amount, "amount"),
            expense_date: parse_date(&db.expense_date, "expense_date"),
            installment_amount: db
                .installment_amount
                .as_deref()
                .map(|v| parse_decimal(v, "installment_amount")),
            id: db.id,
            name: db.name,
            note: db.note,
            responsible: db.responsible,
            is_installment: db.is_installment,
            installment_count: db.installment_count,
            category_id: db.category_id,
            card_id: db.card_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Expense> for ExpenseDB {
    fn from(domain: Expense) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            note: domain.note,
            amount: domain.amount.to_string(),
            responsible: domain.responsible,
            expense_date: domain.expense_date.to_string(),
            is_installment: domain.is_installment,
            installment_count: domain.installment_count,
            installment_amount: domain.installment_amount.map(|v| v.to_string()),
            category_id: domain.category_id,
            card_id: domain.card_id,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
