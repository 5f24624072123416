use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use contas_core::{
    cards::{CardService, CardServiceTrait},
    categories::{CategoryService, CategoryServiceTrait},
    expenses::{ExpenseService, ExpenseServiceTrait},
    goals::{GoalService, GoalServiceTrait},
    insights::{InsightService, InsightServiceTrait},
    statements::{StatementService, StatementServiceTrait},
};
use contas_storage_sqlite::{
    cards::CardRepository,
    categories::CategoryRepository,
    db::{self, write_actor},
    expenses::ExpenseRepository,
    goals::GoalRepository,
};

pub struct AppState {
    pub category_service: Arc<dyn CategoryServiceTrait + Send + Sync>,
    pub card_service: Arc<dyn CardServiceTrait + Send + Sync>,
    pub expense_service: Arc<dyn ExpenseServiceTrait + Send + Sync>,
    pub statement_service: Arc<dyn StatementServiceTrait + Send + Sync>,
    pub insight_service: Arc<dyn InsightServiceTrait + Send + Sync>,
    pub goal_service: Arc<dyn GoalServiceTrait + Send + Sync>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("CONTAS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.data_dir)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let category_repo = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let card_repo = Arc::new(CardRepository::new(pool.clone(), writer.clone()));
    let expense_repo = Arc::new(ExpenseRepository::new(pool.clone(), writer.clone()));
    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));

    let category_service = Arc::new(CategoryService::new(category_repo.clone()));
    let card_service = Arc::new(CardService::new(card_repo.clone()));
    let expense_service = Arc::new(ExpenseService::new(
        expense_repo.clone(),
        category_repo.clone(),
        card_repo.clone(),
    ));
    let statement_service = Arc::new(StatementService::new(
        card_repo.clone(),
        expense_repo.clone(),
        category_repo.clone(),
    ));
    let insight_service = Arc::new(InsightService::new(expense_service.clone()));
    let goal_service = Arc::new(GoalService::new(goal_repo));

    Ok(Arc::new(AppState {
        category_service,
        card_service,
        expense_service,
        statement_service,
        insight_service,
        goal_service,
        db_path,
    }))
}
