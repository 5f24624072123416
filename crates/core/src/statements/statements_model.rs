//! Billing-period and statement models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expenses::{CardRef, ExpenseView};

/// The closed date interval covered by one statement.
///
/// `end` is the statement's closing date; `start` is the day after the
/// previous closing. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BillingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BillingPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// One card's statement for one billing cycle.
///
/// `period_end` doubles as the closing date shown in the "fecha em dd/MM"
/// label. The whole struct is a pure derivation of the expense snapshot it
/// was built from; nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    pub card: CardRef,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub occurrences: Vec<ExpenseView>,
    pub total: Decimal,
}
