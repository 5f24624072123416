use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use contas_core::categories::{Category, CategoryDeleteOutcome};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCategoryPayload {
    name: String,
}

async fn get_categories(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.category_service.get_categories()?;
    Ok(Json(categories))
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCategoryPayload>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = state.category_service.create_category(payload.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn delete_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CategoryDeleteOutcome>> {
    let outcome = state.category_service.delete_category(&id).await?;
    Ok(Json(outcome))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(get_categories).post(create_category))
        .route("/categories/{id}", axum::routing::delete(delete_category))
}
