//! Application state wiring: repositories, services, and tracing.

use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use moneta_core::{
    budgets::{BudgetService, BudgetServiceTrait},
    categories::{CategoryService, CategoryServiceTrait},
    constants::BASE_CURRENCY,
    dashboard::{DashboardService, DashboardServiceTrait},
    holdings::{HoldingService, HoldingServiceTrait},
    ledger::{LedgerService, LedgerServiceTrait},
    pricing::{CoinGeckoProvider, PriceProviderTrait},
    tasks::{TaskService, TaskServiceTrait},
};
use moneta_storage_sqlite::{
    budgets::BudgetRepository, categories::CategoryRepository, db, holdings::HoldingRepository,
    ledger::LedgerRepository, tasks::TaskRepository,
};

pub struct AppState {
    pub holding_service: Arc<dyn HoldingServiceTrait>,
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub task_service: Arc<dyn TaskServiceTrait>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("MONETA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
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
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(pool.clone());

    let holding_repository = Arc::new(HoldingRepository::new(pool.clone(), writer.clone()));
    let ledger_repository = Arc::new(LedgerRepository::new(pool.clone(), writer.clone()));
    let category_repository = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let budget_repository = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let task_repository = Arc::new(TaskRepository::new(pool, writer));

    let price_provider: Arc<dyn PriceProviderTrait> = Arc::new(CoinGeckoProvider::new(
        config.price_feed_url.clone(),
        BASE_CURRENCY,
    ));

    let holding_service = Arc::new(HoldingService::new(
        holding_repository.clone(),
        category_repository.clone(),
        price_provider,
    ));
    let ledger_service = Arc::new(LedgerService::new(
        ledger_repository.clone(),
        category_repository.clone(),
        holding_repository.clone(),
    ));
    let category_service = Arc::new(CategoryService::new(category_repository.clone()));
    let budget_service = Arc::new(BudgetService::new(
        budget_repository,
        category_repository.clone(),
        ledger_repository.clone(),
    ));
    let task_service = Arc::new(TaskService::new(task_repository));
    let dashboard_service = Arc::new(DashboardService::new(
        holding_repository,
        ledger_repository,
        category_repository,
    ));

    Ok(Arc::new(AppState {
        holding_service,
        ledger_service,
        category_service,
        budget_service,
        task_service,
        dashboard_service,
        db_path,
    }))
}
