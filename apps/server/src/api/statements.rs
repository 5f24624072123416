use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Local;
use contas_core::statements::Statement;
use serde::Deserialize;

#[derive(Deserialize)]
struct StatementQuery {
    year: i32,
    month: u32,
    responsible: Option<String>,
}

async fn get_statement(
    Path(card_id): Path<String>,
    Query(query): Query<StatementQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Statement>> {
    let statement = state.statement_service.get_statement(
        &card_id,
        query.year,
        query.month,
        query.responsible.as_deref(),
    )?;
    Ok(Json(statement))
}

async fn get_upcoming_statement(
    Path(card_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Statement>> {
    let today = Local::now().date_naive();
    let statement = state
        .statement_service
        .get_upcoming_statement(&card_id, today)?;
    Ok(Json(statement))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/statements/{card_id}", get(get_statement))
        .route("/statements/{card_id}/upcoming", get(get_upcoming_statement))
}
