use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::main_lib::AppState;

pub mod cards;
pub mod categories;
pub mod expenses;
pub mod goals;
pub mod health;
pub mod insights;
pub mod statements;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .merge(health::router())
        .merge(categories::router())
        .merge(cards::router())
        .merge(expenses::router())
        .merge(statements::router())
        .merge(insights::router())
        .merge(goals::router());

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
