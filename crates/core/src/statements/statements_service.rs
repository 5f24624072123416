use crate::cards::{Card, CardRepositoryTrait};
use crate::categories::{Category, CategoryRepositoryTrait};
use crate::constants::RESPONSIBLE_ALL;
use crate::errors::{DatabaseError, Error, Result};
use crate::expenses::{
    expander, CardRef, Expense, ExpenseRepositoryTrait, ExpenseView, Occurrence,
};
use crate::statements::billing::{preview_period, resolve_period};
use crate::statements::statements_model::{BillingPeriod, Statement};
use crate::utils::round2;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

/// Collects the occurrences of a card's expenses that fall inside a billing
/// period, optionally narrowed to one responsible ("Todos" bypasses the
/// filter). Pure over its inputs.
pub fn statement_occurrences(
    card: &Card,
    expenses: &[Expense],
    period: &BillingPeriod,
    responsible: Option<&str>,
) -> Vec<Occurrence> {
    expenses
        .iter()
        .filter(|e| e.card_id.as_deref() == Some(card.id.as_str()))
        .flat_map(|e| expander::expand(e))
        .filter(|o| period.contains(o.date))
        .filter(|o| match responsible {
            None => true,
            Some(r) if r == RESPONSIBLE_ALL => true,
            Some(r) => o.responsible == r,
        })
        .collect()
}

/// Sums occurrence values, rounded to display precision.
pub fn statement_total(occurrences: &[Occurrence]) -> Decimal {
    round2(occurrences.iter().map(|o| o.value).sum())
}

/// Trait for statement service operations
pub trait StatementServiceTrait: Send + Sync {
    /// The statement whose closing date falls in `(year, month)`.
    fn get_statement(
        &self,
        card_id: &str,
        year: i32,
        month: u32,
        responsible: Option<&str>,
    ) -> Result<Statement>;

    /// The next statement to close relative to `today` (the KPI preview).
    fn get_upcoming_statement(&self, card_id: &str, today: NaiveDate) -> Result<Statement>;
}

pub struct StatementService {
    card_repo: Arc<dyn CardRepositoryTrait>,
    expense_repo: Arc<dyn ExpenseRepositoryTrait>,
    category_repo: Arc<dyn CategoryRepositoryTrait>,
}

impl StatementService {
    pub fn new(
        card_repo: Arc<dyn CardRepositoryTrait>,
        expense_repo: Arc<dyn ExpenseRepositoryTrait>,
        category_repo: Arc<dyn CategoryRepositoryTrait>,
    ) -> Self {
        StatementService {
            card_repo,
            expense_repo,
            category_repo,
        }
    }

    fn load_card(&self, card_id: &str) -> Result<Card> {
        self.card_repo.get_card_by_id(card_id)?.ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!(
                "Card '{}' not found",
                card_id
            )))
        })
    }

    fn build(
        &self,
        card: Card,
        period: BillingPeriod,
        responsible: Option<&str>,
    ) -> Result<Statement> {
        let expenses = self.expense_repo.get_expenses_for_card(&card.id)?;
        let occurrences = statement_occurrences(&card, &expenses, &period, responsible);
        let total = statement_total(&occurrences);

        let categories: HashMap<String, Category> = self
            .category_repo
            .get_all_categories()?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        let by_id: HashMap<&str, &Expense> =
            expenses.iter().map(|e| (e.id.as_str(), e)).collect();

        let mut views: Vec<ExpenseView> = occurrences
            .iter()
            .filter_map(|occurrence| {
                by_id.get(occurrence.expense_id.as_str()).map(|expense| {
                    let current_installment = expense
                        .is_installment
                        .then_some(occurrence.installment_index);
                    ExpenseView::compose(
                        expense,
                        occurrence.date,
                        occurrence.value,
                        current_installment,
                        categories.get(&expense.category_id),
                        Some(&card),
                    )
                })
            })
            .collect();
        views.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(Statement {
            card: CardRef {
                id: card.id,
                name: card.name,
                is_active: card.is_active,
            },
            period_start: period.start,
            period_end: period.end,
            occurrences: views,
            total,
        })
    }
}

impl StatementServiceTrait for StatementService {
    fn get_statement(
        &self,
        card_id: &str,
        year: i32,
        month: u32,
        responsible: Option<&str>,
    ) -> Result<Statement> {
        debug!("Building statement for card {} {}-{:02}", card_id, year, month);
        let card = self.load_card(card_id)?;
        let period = resolve_period(card.closing_day, year, month)?;
        self.build(card, period, responsible)
    }

    fn get_upcoming_statement(&self, card_id: &str, today: NaiveDate) -> Result<Statement> {
        let card = self.load_card(card_id)?;
        let period = preview_period(card.closing_day, today)?;
        self.build(card, period, None)
    }
}
