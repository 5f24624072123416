use crate::cards::{Card, CardRepositoryTrait};
use crate::categories::{Category, CategoryRepositoryTrait};
use crate::constants::DEFAULT_RESPONSIBLE;
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::expenses::expander;
use crate::expenses::expenses_model::{
    Expense, ExpenseUpdate, ExpenseView, NewExpense, PaymentType,
};
use crate::expenses::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::utils::add_months;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

pub struct ExpenseService {
    expense_repo: Arc<dyn ExpenseRepositoryTrait>,
    category_repo: Arc<dyn CategoryRepositoryTrait>,
    card_repo: Arc<dyn CardRepositoryTrait>,
}

/// Half-open calendar-month interval `[first, first_of_next)`.
fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "invalid month {}-{:02}",
            year, month
        )))
    })?;
    Ok((start, add_months(start, 1)))
}

impl ExpenseService {
    pub fn new(
        expense_repo: Arc<dyn ExpenseRepositoryTrait>,
        category_repo: Arc<dyn CategoryRepositoryTrait>,
        card_repo: Arc<dyn CardRepositoryTrait>,
    ) -> Self {
        ExpenseService {
            expense_repo,
            category_repo,
            card_repo,
        }
    }

    fn reference_maps(&self) -> Result<(HashMap<String, Category>, HashMap<String, Card>)> {
        let categories = self
            .category_repo
            .get_all_categories()?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        let cards = self
            .card_repo
            .get_cards(true)?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        Ok((categories, cards))
    }

    fn view(
        &self,
        expense: &Expense,
        date: NaiveDate,
        value: Decimal,
        current_installment: Option<i32>,
        categories: &HashMap<String, Category>,
        cards: &HashMap<String, Card>,
    ) -> ExpenseView {
        ExpenseView::compose(
            expense,
            date,
            value,
            current_installment,
            categories.get(&expense.category_id),
            expense.card_id.as_deref().and_then(|id| cards.get(id)),
        )
    }

    /// Applies the validation rules and normalizes the payload: responsible
    /// defaults, installment fields cleared for direct expenses, and the
    /// total recomputed as `count * per-installment` so the invariant holds
    /// no matter what the client sent.
    fn normalize(&self, mut new_expense: NewExpense) -> Result<NewExpense> {
        new_expense.name = new_expense.name.trim().to_string();
        if new_expense.name.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if new_expense.category_id.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "category".to_string(),
            )));
        }
        new_expense.responsible = match new_expense.responsible {
            Some(r) if !r.trim().is_empty() => Some(r.trim().to_string()),
            _ => Some(DEFAULT_RESPONSIBLE.to_string()),
        };

        if new_expense.is_installment {
            let count = new_expense.installment_count.unwrap_or(0);
            if count <= 0 {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "installment count must be positive".to_string(),
                )));
            }
            let per_installment = new_expense.installment_amount.ok_or_else(|| {
                Error::Validation(ValidationError::MissingField(
                    "installmentValue".to_string(),
                ))
            })?;
            if per_installment <= Decimal::ZERO {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "installment value must be positive".to_string(),
                )));
            }
            if new_expense.card_id.is_none() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "installment purchases require a card".to_string(),
                )));
            }
            new_expense.installment_count = Some(count);
            new_expense.amount = per_installment * Decimal::from(count);
        } else {
            if new_expense.amount <= Decimal::ZERO {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "amount must be positive".to_string(),
                )));
            }
            new_expense.installment_count = Some(1);
            new_expense.installment_amount = None;
        }
        Ok(new_expense)
    }

    /// Referenced category and card must exist; surfacing this before the
    /// insert keeps foreign-key failures out of the user's face.
    fn check_references(&self, category_id: &str, card_id: Option<&str>) -> Result<()> {
        if self.category_repo.get_category_by_id(category_id)?.is_none() {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Category '{}' not found",
                category_id
            ))));
        }
        if let Some(card_id) = card_id {
            if self.card_repo.get_card_by_id(card_id)?.is_none() {
                return Err(Error::Database(DatabaseError::NotFound(format!(
                    "Card '{}' not found",
                    card_id
                ))));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    fn get_month_expenses(
        &self,
        year: i32,
        month: u32,
        payment_type: PaymentType,
    ) -> Result<Vec<ExpenseView>> {
        debug!(
            "Listing expenses for {}-{:02} ({:?})",
            year, month, payment_type
        );
        let (start, end) = month_bounds(year, month)?;
        let expenses = self.expense_repo.get_all_expenses()?;
        let (categories, cards) = self.reference_maps()?;

        let mut views = Vec::new();
        for expense in &expenses {
            if !payment_type.matches(expense.card_id.is_some()) {
                continue;
            }
            for occurrence in expander::expand(expense) {
                if occurrence.date >= start && occurrence.date < end {
                    let current_installment =
                        expense.is_installment.then_some(occurrence.installment_index);
                    views.push(self.view(
                        expense,
                        occurrence.date,
                        occurrence.value,
                        current_installment,
                        &categories,
                        &cards,
                    ));
                }
            }
        }
        views.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(views)
    }

    fn get_active_installment_purchases(&self, year: i32, month: u32) -> Result<Vec<ExpenseView>> {
        let (start, end) = month_bounds(year, month)?;
        let expenses = self.expense_repo.get_all_expenses()?;
        let (categories, cards) = self.reference_maps()?;

        let mut views = Vec::new();
        for expense in expenses.iter().filter(|e| e.is_installment) {
            if let Some(occurrence) = expander::expand(expense)
                .into_iter()
                .find(|o| o.date >= start && o.date < end)
            {
                // Reported once per purchase with the total value; the index
                // tells the user which installment the month carries.
                views.push(self.view(
                    expense,
                    expense.expense_date,
                    expense.amount,
                    Some(occurrence.installment_index),
                    &categories,
                    &cards,
                ));
            }
        }
        views.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(views)
    }

    async fn create_expense(&self, new_expense: NewExpense) -> Result<ExpenseView> {
        let new_expense = self.normalize(new_expense)?;
        self.check_references(&new_expense.category_id, new_expense.card_id.as_deref())?;

        let expense = self.expense_repo.create_expense(new_expense).await?;
        let (categories, cards) = self.reference_maps()?;
        Ok(self.view(
            &expense,
            expense.expense_date,
            expense.amount,
            None,
            &categories,
            &cards,
        ))
    }

    async fn update_expense(&self, id: &str, update: ExpenseUpdate) -> Result<ExpenseView> {
        let existing = self
            .expense_repo
            .get_expense_by_id(id)?
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!("Expense '{}' not found", id)))
            })?;

        let normalized = self.normalize(NewExpense {
            id: None,
            name: update.name,
            note: update.note,
            amount: update.amount,
            responsible: update.responsible,
            expense_date: update.expense_date,
            is_installment: update.is_installment,
            installment_count: update.installment_count,
            installment_amount: update.installment_amount,
            category_id: update.category_id,
            card_id: update.card_id,
        })?;
        self.check_references(&normalized.category_id, normalized.card_id.as_deref())?;

        let merged = Expense {
            id: existing.id,
            name: normalized.name,
            note: normalized.note,
            amount: normalized.amount,
            responsible: normalized.responsible.unwrap_or_else(|| DEFAULT_RESPONSIBLE.to_string()),
            expense_date: normalized.expense_date,
            is_installment: normalized.is_installment,
            installment_count: normalized.installment_count.unwrap_or(1),
            installment_amount: normalized.installment_amount,
            category_id: normalized.category_id,
            card_id: normalized.card_id,
            created_at: existing.created_at,
            updated_at: existing.updated_at,
        };

        let expense = self.expense_repo.update_expense(merged).await?;
        let (categories, cards) = self.reference_maps()?;
        Ok(self.view(
            &expense,
            expense.expense_date,
            expense.amount,
            None,
            &categories,
            &cards,
        ))
    }

    async fn delete_expense(&self, id: &str) -> Result<usize> {
        let deleted = self.expense_repo.delete_expense(id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Expense '{}' not found",
                id
            ))));
        }
        Ok(deleted)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// In-memory repositories shared by the service tests in this crate.
    pub(crate) struct FakeExpenseRepo {
        pub expenses: Mutex<Vec<Expense>>,
    }

    pub(crate) struct FakeCategoryRepo {
        pub categories: Vec<Category>,
    }

    pub(crate) struct FakeCardRepo {
        pub cards: Vec<Card>,
    }

    pub(crate) fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            is_active: true,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            updated_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    pub(crate) fn card(id: &str, name: &str, closing_day: u32) -> Card {
        Card {
            id: id.to_string(),
            name: name.to_string(),
            closing_day,
            is_active: true,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            updated_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[async_trait]
    impl ExpenseRepositoryTrait for FakeExpenseRepo {
        fn get_all_expenses(&self) -> Result<Vec<Expense>> {
            Ok(self.expenses.lock().unwrap().clone())
        }

        fn get_expense_by_id(&self, id: &str) -> Result<Option<Expense>> {
            Ok(self
                .expenses
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == id)
                .cloned())
        }

        fn get_expenses_for_card(&self, card_id: &str) -> Result<Vec<Expense>> {
            Ok(self
                .expenses
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.card_id.as_deref() == Some(card_id))
                .cloned()
                .collect())
        }

        fn count_for_category(&self, category_id: &str) -> Result<i64> {
            Ok(self
                .expenses
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.category_id == category_id)
                .count() as i64)
        }

        async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense> {
            let expense = Expense {
                id: new_expense.id.unwrap_or_else(|| "exp-new".to_string()),
                name: new_expense.name,
                note: new_expense.note,
                amount: new_expense.amount,
                responsible: new_expense
                    .responsible
                    .unwrap_or_else(|| DEFAULT_RESPONSIBLE.to_string()),
                expense_date: new_expense.expense_date,
                is_installment: new_expense.is_installment,
                installment_count: new_expense.installment_count.unwrap_or(1),
                installment_amount: new_expense.installment_amount,
                category_id: new_expense.category_id,
                card_id: new_expense.card_id,
                created_at: "2024-01-01T00:00:00+00:00".to_string(),
                updated_at: "2024-01-01T00:00:00+00:00".to_string(),
            };
            self.expenses.lock().unwrap().push(expense.clone());
            Ok(expense)
        }

        async fn update_expense(&self, expense: Expense) -> Result<Expense> {
            let mut expenses = self.expenses.lock().unwrap();
            if let Some(slot) = expenses.iter_mut().find(|e| e.id == expense.id) {
                *slot = expense.clone();
            }
            Ok(expense)
        }

        async fn delete_expense(&self, id: &str) -> Result<usize> {
            let mut expenses = self.expenses.lock().unwrap();
            let before = expenses.len();
            expenses.retain(|e| e.id != id);
            Ok(before - expenses.len())
        }
    }

    #[async_trait]
    impl CategoryRepositoryTrait for FakeCategoryRepo {
        fn get_active_categories(&self) -> Result<Vec<Category>> {
            Ok(self.categories.iter().filter(|c| c.is_active).cloned().collect())
        }

        fn get_all_categories(&self) -> Result<Vec<Category>> {
            Ok(self.categories.clone())
        }

        fn get_category_by_id(&self, id: &str) -> Result<Option<Category>> {
            Ok(self.categories.iter().find(|c| c.id == id).cloned())
        }

        fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
            Ok(self.categories.iter().find(|c| c.name == name).cloned())
        }

        async fn create_category(
            &self,
            _new_category: crate::categories::NewCategory,
        ) -> Result<Category> {
            unimplemented!("not exercised by these tests")
        }

        async fn reactivate_category(&self, _id: &str) -> Result<Category> {
            unimplemented!("not exercised by these tests")
        }

        async fn delete_or_deactivate_category(
            &self,
            _id: &str,
        ) -> Result<crate::categories::CategoryDeleteStatus> {
            unimplemented!("not exercised by these tests")
        }
    }

    #[async_trait]
    impl CardRepositoryTrait for FakeCardRepo {
        fn get_cards(&self, include_inactive: bool) -> Result<Vec<Card>> {
            Ok(self
                .cards
                .iter()
                .filter(|c| include_inactive || c.is_active)
                .cloned()
                .collect())
        }

        fn get_card_by_id(&self, id: &str) -> Result<Option<Card>> {
            Ok(self.cards.iter().find(|c| c.id == id).cloned())
        }

        async fn create_card(&self, _new_card: crate::cards::NewCard) -> Result<Card> {
            unimplemented!("not exercised by these tests")
        }

        async fn set_card_active(&self, _id: &str, _active: bool) -> Result<Card> {
            unimplemented!("not exercised by these tests")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn direct_expense(id: &str, amount: Decimal, when: NaiveDate, card: Option<&str>) -> Expense {
        Expense {
            id: id.to_string(),
            name: format!("Gasto {}", id),
            note: None,
            amount,
            responsible: "Eu".to_string(),
            expense_date: when,
            is_installment: false,
            installment_count: 1,
            installment_amount: None,
            category_id: "cat-1".to_string(),
            card_id: card.map(|c| c.to_string()),
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            updated_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn installment(id: &str, per: Decimal, count: i32, when: NaiveDate, card: &str) -> Expense {
        let mut e = direct_expense(id, per * Decimal::from(count), when, Some(card));
        e.is_installment = true;
        e.installment_count = count;
        e.installment_amount = Some(per);
        e
    }

    fn service_with(expenses: Vec<Expense>) -> ExpenseService {
        ExpenseService::new(
            Arc::new(FakeExpenseRepo {
                expenses: Mutex::new(expenses),
            }),
            Arc::new(FakeCategoryRepo {
                categories: vec![category("cat-1", "Mercado")],
            }),
            Arc::new(FakeCardRepo {
                cards: vec![card("card-1", "Nubank", 10)],
            }),
        )
    }

    #[test]
    fn test_month_listing_mixes_direct_and_installment_occurrences() {
        let service = service_with(vec![
            direct_expense("exp-1", dec!(50.00), date(2024, 3, 5), None),
            // purchased in January, 3 installments: the March occurrence is #3
            installment("exp-2", dec!(100.00), 3, date(2024, 1, 15), "card-1"),
            direct_expense("exp-3", dec!(80.00), date(2024, 2, 28), None),
        ]);

        let views = service
            .get_month_expenses(2024, 3, PaymentType::All)
            .unwrap();

        assert_eq!(views.len(), 2);
        // newest first
        assert_eq!(views[0].id, "exp-2");
        assert_eq!(views[0].date, date(2024, 3, 15));
        assert_eq!(views[0].value, dec!(100.00));
        assert_eq!(views[0].current_installment, Some(3));
        assert_eq!(views[1].id, "exp-1");
        assert_eq!(views[1].value, dec!(50.00));
        assert_eq!(views[1].current_installment, None);
    }

    #[test]
    fn test_month_listing_payment_type_filter() {
        let service = service_with(vec![
            direct_expense("exp-1", dec!(50.00), date(2024, 3, 5), None),
            direct_expense("exp-2", dec!(70.00), date(2024, 3, 8), Some("card-1")),
        ]);

        let debit = service
            .get_month_expenses(2024, 3, PaymentType::Debit)
            .unwrap();
        assert_eq!(debit.len(), 1);
        assert_eq!(debit[0].id, "exp-1");
        assert!(debit[0].card.is_none());

        let card_only = service
            .get_month_expenses(2024, 3, PaymentType::Card)
            .unwrap();
        assert_eq!(card_only.len(), 1);
        assert_eq!(card_only[0].id, "exp-2");
        assert_eq!(card_only[0].card.as_ref().unwrap().name, "Nubank");
    }

    #[test]
    fn test_month_listing_rejects_invalid_month() {
        let service = service_with(vec![]);
        assert!(service.get_month_expenses(2024, 13, PaymentType::All).is_err());
    }

    #[test]
    fn test_active_installment_purchases_report_totals() {
        let service = service_with(vec![installment(
            "exp-1",
            dec!(100.00),
            3,
            date(2024, 1, 15),
            "card-1",
        )]);

        let purchases = service.get_active_installment_purchases(2024, 2).unwrap();
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].value, dec!(300.00));
        assert_eq!(purchases[0].current_installment, Some(2));

        // purchase exhausted by April
        assert!(service
            .get_active_installment_purchases(2024, 4)
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_create_expense_recomputes_installment_total() {
        let service = service_with(vec![]);

        let view = service
            .create_expense(NewExpense {
                id: None,
                name: "Notebook".to_string(),
                note: None,
                amount: dec!(1.00), // client-sent total is not trusted
                responsible: None,
                expense_date: date(2024, 5, 10),
                is_installment: true,
                installment_count: Some(10),
                installment_amount: Some(dec!(250.00)),
                category_id: "cat-1".to_string(),
                card_id: Some("card-1".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(view.value, dec!(2500.00));
        assert_eq!(view.responsible, DEFAULT_RESPONSIBLE);
    }

    #[tokio::test]
    async fn test_create_expense_rejects_non_positive_installments() {
        let service = service_with(vec![]);

        for (count, per) in [(Some(0), Some(dec!(10.00))), (Some(3), Some(dec!(0.00)))] {
            let result = service
                .create_expense(NewExpense {
                    id: None,
                    name: "Notebook".to_string(),
                    note: None,
                    amount: dec!(100.00),
                    responsible: None,
                    expense_date: date(2024, 5, 10),
                    is_installment: true,
                    installment_count: count,
                    installment_amount: per,
                    category_id: "cat-1".to_string(),
                    card_id: Some("card-1".to_string()),
                })
                .await;
            assert!(matches!(result, Err(Error::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_create_expense_unknown_category() {
        let service = service_with(vec![]);

        let result = service
            .create_expense(NewExpense {
                id: None,
                name: "Almoço".to_string(),
                note: None,
                amount: dec!(35.00),
                responsible: None,
                expense_date: date(2024, 5, 10),
                is_installment: false,
                installment_count: None,
                installment_amount: None,
                category_id: "cat-missing".to_string(),
                card_id: None,
            })
            .await;
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_delete_expense_unknown_id() {
        let service = service_with(vec![]);
        assert!(service.delete_expense("missing").await.is_err());
    }
}
