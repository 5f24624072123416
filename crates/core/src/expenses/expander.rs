//! Installment expansion: maps an expense onto the occurrences it generates.
//!
//! Expansion is a pure function of the expense. Re-expanding the same record
//! always yields the same list, so edits to the installment count or the
//! purchase date regenerate the occurrence set by construction; nothing is
//! ever materialized.

use crate::expenses::expenses_model::{Expense, Occurrence};
use crate::utils::add_months;

/// Produces every occurrence an expense contributes.
///
/// A direct expense yields exactly one occurrence on its own date, valued at
/// the total. An installment purchase yields `installment_count` occurrences,
/// one per month starting at the purchase date, each valued at the
/// per-installment amount. Occurrence `k` is dated `k - 1` months after the
/// purchase, with the day-of-month clamped to the target month.
pub fn expand(expense: &Expense) -> Vec<Occurrence> {
    if !expense.is_installment {
        return vec![Occurrence {
            expense_id: expense.id.clone(),
            date: expense.expense_date,
            value: expense.amount,
            installment_index: 1,
            installment_count: 1,
            category_id: expense.category_id.clone(),
            card_id: expense.card_id.clone(),
            responsible: expense.responsible.clone(),
        }];
    }

    let per_installment = expense.installment_amount.unwrap_or(expense.amount);
    (1..=expense.installment_count)
        .map(|index| Occurrence {
            expense_id: expense.id.clone(),
            date: add_months(expense.expense_date, (index - 1) as u32),
            value: per_installment,
            installment_index: index,
            installment_count: expense.installment_count,
            category_id: expense.category_id.clone(),
            card_id: expense.card_id.clone(),
            responsible: expense.responsible.clone(),
        })
        .collect()
}
