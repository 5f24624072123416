use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{Datelike, Local};
use contas_core::expenses::{ExpenseUpdate, ExpenseView, NewExpense, PaymentType};
use serde::Deserialize;

#[derive(Deserialize)]
struct MonthQuery {
    year: i32,
    month: u32,
    #[serde(default)]
    payment_type: PaymentType,
}

#[derive(Deserialize)]
struct InstallmentsQuery {
    year: Option<i32>,
    month: Option<u32>,
}

async fn get_expenses(
    Query(query): Query<MonthQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ExpenseView>>> {
    let expenses =
        state
            .expense_service
            .get_month_expenses(query.year, query.month, query.payment_type)?;
    Ok(Json(expenses))
}

async fn get_installments(
    Query(query): Query<InstallmentsQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ExpenseView>>> {
    // defaults to the current month, matching the "active installments" tab
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());
    let purchases = state
        .expense_service
        .get_active_installment_purchases(year, month)?;
    Ok(Json(purchases))
}

async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(expense): Json<NewExpense>,
) -> ApiResult<(StatusCode, Json<ExpenseView>)> {
    let created = state.expense_service.create_expense(expense).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<ExpenseUpdate>,
) -> ApiResult<Json<ExpenseView>> {
    let updated = state.expense_service.update_expense(&id, update).await?;
    Ok(Json(updated))
}

async fn delete_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.expense_service.delete_expense(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(get_expenses).post(create_expense))
        .route("/expenses/installments", get(get_installments))
        .route(
            "/expenses/{id}",
            axum::routing::put(update_expense).delete(delete_expense),
        )
}
