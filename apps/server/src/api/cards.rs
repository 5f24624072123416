use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use contas_core::cards::{Card, NewCard};
use serde::Deserialize;

#[derive(Deserialize)]
struct ListCardsQuery {
    #[serde(default)]
    include_inactive: bool,
}

async fn get_cards(
    Query(query): Query<ListCardsQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Card>>> {
    let cards = state.card_service.get_cards(query.include_inactive)?;
    Ok(Json(cards))
}

async fn create_card(
    State(state): State<Arc<AppState>>,
    Json(card): Json<NewCard>,
) -> ApiResult<(StatusCode, Json<Card>)> {
    let card = state.card_service.create_card(card).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

async fn deactivate_card(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Card>> {
    let card = state.card_service.deactivate_card(&id).await?;
    Ok(Json(card))
}

async fn reactivate_card(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Card>> {
    let card = state.card_service.reactivate_card(&id).await?;
    Ok(Json(card))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cards", get(get_cards).post(create_card))
        .route("/cards/{id}", delete(deactivate_card))
        .route("/cards/{id}/reactivate", post(reactivate_card))
}
