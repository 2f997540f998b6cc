//! REST API endpoints for budgets and their monthly progress.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Local;

use crate::{error::ApiResult, main_lib::AppState};
use moneta_core::budgets::{Budget, BudgetProgress, BudgetUpdate, NewBudget};

async fn list_budgets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Budget>>> {
    let budgets = state.budget_service.list_budgets()?;
    Ok(Json(budgets))
}

/// GET /budgets/progress - budgets joined with the current month's
/// spending in their categories.
async fn budget_progress(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BudgetProgress>>> {
    let today = Local::now().date_naive();
    let progress = state.budget_service.get_budget_progress(today)?;
    Ok(Json(progress))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Json(new_budget): Json<NewBudget>,
) -> ApiResult<Json<Budget>> {
    let budget = state.budget_service.create_budget(new_budget).await?;
    Ok(Json(budget))
}

async fn update_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut budget_update): Json<BudgetUpdate>,
) -> ApiResult<Json<Budget>> {
    budget_update.id = Some(id);
    let budget = state.budget_service.update_budget(budget_update).await?;
    Ok(Json(budget))
}

async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.budget_service.delete_budget(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/progress", get(budget_progress))
        .route(
            "/budgets/{id}",
            axum::routing::put(update_budget).delete(delete_budget),
        )
}
