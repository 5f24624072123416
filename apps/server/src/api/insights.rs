use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use contas_core::expenses::PaymentType;
use contas_core::insights::{MonthSummary, SpendingBucket};
use serde::Deserialize;

#[derive(Deserialize)]
struct CategoryBreakdownQuery {
    year: i32,
    month: u32,
    #[serde(default)]
    source: PaymentType,
    card_id: Option<String>,
    responsible: Option<String>,
}

#[derive(Deserialize)]
struct MonthQuery {
    year: i32,
    month: u32,
}

async fn get_category_breakdown(
    Query(query): Query<CategoryBreakdownQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SpendingBucket>>> {
    let buckets = state.insight_service.get_category_breakdown(
        query.year,
        query.month,
        query.source,
        query.card_id.as_deref(),
        query.responsible.as_deref(),
    )?;
    Ok(Json(buckets))
}

async fn get_responsible_breakdown(
    Query(query): Query<MonthQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SpendingBucket>>> {
    let buckets = state
        .insight_service
        .get_responsible_breakdown(query.year, query.month)?;
    Ok(Json(buckets))
}

async fn get_month_summary(
    Query(query): Query<MonthQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MonthSummary>> {
    let summary = state
        .insight_service
        .get_month_summary(query.year, query.month)?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/insights/categories", get(get_category_breakdown))
        .route("/insights/responsibles", get(get_responsible_breakdown))
        .route("/insights/summary", get(get_month_summary))
}
