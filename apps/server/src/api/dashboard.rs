//! REST API endpoints for the dashboard and reports.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use moneta_core::constants::DEFAULT_REPORT_MONTHS;
use moneta_core::dashboard::{
    CategoryBreakdownItem, DashboardSummary, MonthlyReportPoint, NetWorthSummary,
};
use moneta_core::ledger::LedgerDirection;
use moneta_core::utils::{month_bounds, month_start_back};

async fn dashboard_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DashboardSummary>> {
    let today = Local::now().date_naive();
    let summary = state.dashboard_service.get_summary(today)?;
    Ok(Json(summary))
}

async fn net_worth(State(state): State<Arc<AppState>>) -> ApiResult<Json<NetWorthSummary>> {
    let summary = state.dashboard_service.get_net_worth()?;
    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonthlyQuery {
    months: Option<u32>,
}

async fn monthly_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MonthlyQuery>,
) -> ApiResult<Json<Vec<MonthlyReportPoint>>> {
    let today = Local::now().date_naive();
    let months = query.months.unwrap_or(DEFAULT_REPORT_MONTHS);
    let points = state.dashboard_service.get_monthly_report(today, months)?;
    Ok(Json(points))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BreakdownQuery {
    direction: Option<LedgerDirection>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

/// GET /reports/categories - per-category totals over a window; defaults
/// to expenses across the last six months.
async fn category_breakdown(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BreakdownQuery>,
) -> ApiResult<Json<Vec<CategoryBreakdownItem>>> {
    let today = Local::now().date_naive();
    let direction = query.direction.unwrap_or(LedgerDirection::Expense);
    let from = query
        .from
        .unwrap_or_else(|| month_start_back(today, DEFAULT_REPORT_MONTHS - 1));
    let to = query.to.unwrap_or_else(|| month_bounds(today).1);
    let items = state
        .dashboard_service
        .get_category_breakdown(direction, from, to)?;
    Ok(Json(items))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard/summary", get(dashboard_summary))
        .route("/dashboard/net-worth", get(net_worth))
        .route("/reports/monthly", get(monthly_report))
        .route("/reports/categories", get(category_breakdown))
}
