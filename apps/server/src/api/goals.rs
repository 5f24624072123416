use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use contas_core::goals::{Contribution, Goal, GoalView, NewContribution, NewGoal};

async fn get_goals(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<GoalView>>> {
    let goals = state.goal_service.get_goals()?;
    Ok(Json(goals))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Json(goal): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let goal = state.goal_service.create_goal(goal).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.goal_service.delete_goal(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_contribution(
    Path(goal_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(contribution): Json<NewContribution>,
) -> ApiResult<(StatusCode, Json<Contribution>)> {
    let contribution = state
        .goal_service
        .add_contribution(&goal_id, contribution)
        .await?;
    Ok((StatusCode::CREATED, Json(contribution)))
}

async fn delete_contribution(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.goal_service.delete_contribution(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route("/goals/{id}", delete(delete_goal))
        .route("/goals/{id}/contributions", post(add_contribution))
        .route("/contributions/{id}", delete(delete_contribution))
}
