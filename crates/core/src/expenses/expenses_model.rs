//! Expense domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::categories::Category;
use crate::constants::UNCATEGORIZED_LABEL;

/// Canonical unit of spend.
///
/// `amount` is always the total purchase value. For installment purchases it
/// equals `installment_count * installment_amount`; the service recomputes it
/// from those two fields so the invariant cannot be bypassed.
///
/// A `card_id` of `None` means a debit/cash transaction, booked on
/// `expense_date` directly and never installment-expanded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub name: String,
    pub note: Option<String>,
    pub amount: Decimal,
    pub responsible: String,
    pub expense_date: NaiveDate,
    pub is_installment: bool,
    pub installment_count: i32,
    pub installment_amount: Option<Decimal>,
    pub category_id: String,
    pub card_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input model for creating a new expense.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub id: Option<String>,
    pub name: String,
    pub note: Option<String>,
    pub amount: Decimal,
    pub responsible: Option<String>,
    pub expense_date: NaiveDate,
    #[serde(default)]
    pub is_installment: bool,
    pub installment_count: Option<i32>,
    pub installment_amount: Option<Decimal>,
    pub category_id: String,
    pub card_id: Option<String>,
}

/// Full-replacement update payload (the edit form submits every field).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub name: String,
    pub note: Option<String>,
    pub amount: Decimal,
    pub responsible: Option<String>,
    pub expense_date: NaiveDate,
    #[serde(default)]
    pub is_installment: bool,
    pub installment_count: Option<i32>,
    pub installment_amount: Option<Decimal>,
    pub category_id: String,
    pub card_id: Option<String>,
}

/// One dated, valued instance contributed by an expense: the expense itself,
/// or one of its installments.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub expense_id: String,
    pub date: NaiveDate,
    pub value: Decimal,
    /// 1-based index within the purchase
    pub installment_index: i32,
    pub installment_count: i32,
    pub category_id: String,
    pub card_id: Option<String>,
    pub responsible: String,
}

/// Category data embedded in an expense view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

/// Card data embedded in an expense view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardRef {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

/// Shape the presentation layer consumes: one row of the monthly table,
/// statement listing, or chart input.
///
/// For an installment occurrence `value` is the per-installment amount and
/// `current_installment` its 1-based index; for a direct expense `value` is
/// the total and `current_installment` is absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseView {
    pub id: String,
    pub name: String,
    pub note: Option<String>,
    pub value: Decimal,
    pub responsible: String,
    pub category: CategoryRef,
    pub card: Option<CardRef>,
    pub date: NaiveDate,
    pub is_installment: bool,
    pub installment_count: i32,
    pub installment_value: Option<Decimal>,
    pub current_installment: Option<i32>,
}

impl ExpenseView {
    /// Builds the presentation row for one occurrence of `expense`.
    /// A category that can no longer be resolved keeps its id but is labeled
    /// with the uncategorized sentinel.
    pub fn compose(
        expense: &Expense,
        date: NaiveDate,
        value: Decimal,
        current_installment: Option<i32>,
        category: Option<&Category>,
        card: Option<&Card>,
    ) -> Self {
        ExpenseView {
            id: expense.id.clone(),
            name: expense.name.clone(),
            note: expense.note.clone(),
            value,
            responsible: expense.responsible.clone(),
            category: category
                .map(|c| CategoryRef {
                    id: c.id.clone(),
                    name: c.name.clone(),
                })
                .unwrap_or_else(|| CategoryRef {
                    id: expense.category_id.clone(),
                    name: UNCATEGORIZED_LABEL.to_string(),
                }),
            card: card.map(|c| CardRef {
                id: c.id.clone(),
                name: c.name.clone(),
                is_active: c.is_active,
            }),
            date,
            is_installment: expense.is_installment,
            installment_count: expense.installment_count,
            installment_value: expense.installment_amount,
            current_installment,
        }
    }
}

/// Filter over the payment source of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[default]
    All,
    /// Debit/cash: no card attached
    Debit,
    /// Any credit card
    Card,
}

impl PaymentType {
    pub fn matches(&self, has_card: bool) -> bool {
        match self {
            PaymentType::All => true,
            PaymentType::Debit => !has_card,
            PaymentType::Card => has_card,
        }
    }
}
