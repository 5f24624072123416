use contas_core::constants::DEFAULT_RESPONSIBLE;
use contas_core::expenses::{Expense, ExpenseRepositoryTrait, NewExpense};
use contas_core::Result;

use super::model::ExpenseDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::expenses;
use crate::utils::now_rfc3339;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct ExpenseRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ExpenseRepository { pool, writer }
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    fn get_all_expenses(&self) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses::table
            .order(expenses::expense_date.desc())
            .load::<ExpenseDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    fn get_expense_by_id(&self, id: &str) -> Result<Option<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let row = expenses::table
            .find(id)
            .first::<ExpenseDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Expense::from))
    }

    fn get_expenses_for_card(&self, card_id: &str) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses::table
            .filter(expenses::card_id.eq(card_id))
            .order(expenses::expense_date.desc())
            .load::<ExpenseDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    fn count_for_category(&self, category_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(expenses::table
            .filter(expenses::category_id.eq(category_id))
            .count()
            .get_result(&mut conn)
            .map_err(StorageError::from)?)
    }

    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let now = now_rfc3339();
                let row = ExpenseDB {
                    id: new_expense
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: new_expense.name,
                    note: new_expense.note,
                    amount: new_expense.amount.to_string(),
                    responsible: new_expense
                        .responsible
                        .unwrap_or_else(|| DEFAULT_RESPONSIBLE.to_string()),
                    expense_date: new_expense.expense_date.to_string(),
                    is_installment: new_expense.is_installment,
                    installment_count: new_expense.installment_count.unwrap_or(1),
                    installment_amount: new_expense
                        .installment_amount
                        .map(|v| v.to_string()),
                    category_id: new_expense.category_id,
                    card_id: new_expense.card_id,
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result = diesel::insert_into(expenses::table)
                    .values(&row)
                    .returning(ExpenseDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Expense::from(result))
            })
            .await
    }

    async fn update_expense(&self, expense: Expense) -> Result<Expense> {
        let id_owned = expense.id.clone();
        let mut row = ExpenseDB::from(expense);
        row.updated_at = now_rfc3339();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                diesel::update(expenses::table.find(&id_owned))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result = expenses::table
                    .find(&id_owned)
                    .first::<ExpenseDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Expense::from(result))
            })
            .await
    }

    async fn delete_expense(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(expenses::table.find(&id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
