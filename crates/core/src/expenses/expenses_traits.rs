use crate::errors::Result;
use crate::expenses::expenses_model::{
    Expense, ExpenseUpdate, ExpenseView, NewExpense, PaymentType,
};
use async_trait::async_trait;

/// Trait for expense repository operations
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    /// Every stored expense. Aggregations work on this snapshot; installment
    /// purchases are expanded on read, never stored per occurrence.
    fn get_all_expenses(&self) -> Result<Vec<Expense>>;

    /// Get an expense by ID
    fn get_expense_by_id(&self, id: &str) -> Result<Option<Expense>>;

    /// Expenses charged to one card
    fn get_expenses_for_card(&self, card_id: &str) -> Result<Vec<Expense>>;

    /// Number of expenses attached to a category
    fn count_for_category(&self, category_id: &str) -> Result<i64>;

    /// Create a new expense (the payload is already validated/normalized)
    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense>;

    /// Persist a fully merged expense record
    async fn update_expense(&self, expense: Expense) -> Result<Expense>;

    /// Delete an expense
    async fn delete_expense(&self, id: &str) -> Result<usize>;
}

/// Trait for expense service operations
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    /// All of a calendar month's occurrences (direct expenses plus the
    /// installments falling in it), newest first, category/card embedded.
    fn get_month_expenses(
        &self,
        year: i32,
        month: u32,
        payment_type: PaymentType,
    ) -> Result<Vec<ExpenseView>>;

    /// Installment purchases with an occurrence inside the month, each
    /// reported once with its current installment index and total value.
    fn get_active_installment_purchases(&self, year: i32, month: u32) -> Result<Vec<ExpenseView>>;

    async fn create_expense(&self, new_expense: NewExpense) -> Result<ExpenseView>;

    async fn update_expense(&self, id: &str, update: ExpenseUpdate) -> Result<ExpenseView>;

    async fn delete_expense(&self, id: &str) -> Result<usize>;
}
