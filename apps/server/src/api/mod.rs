//! API routers. Handlers are thin wrappers that delegate to the core
//! services: DTO conversion and status-code mapping only.

mod budgets;
mod categories;
mod dashboard;
mod health;
mod holdings;
mod ledger;
mod tasks;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api_routes = Router::new()
        .merge(holdings::router())
        .merge(ledger::router())
        .merge(categories::router())
        .merge(budgets::router())
        .merge(tasks::router())
        .merge(dashboard::router())
        .merge(health::router())
        .with_state(state);

    let cors = match config
        .cors_origin
        .as_deref()
        .and_then(|origin| origin.parse::<HeaderValue>().ok())
    {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
