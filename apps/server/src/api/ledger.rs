//! REST API endpoints for ledger entries. No update route: entries are
//! immutable after creation.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use moneta_core::ledger::{LedgerDirection, LedgerEntry, LedgerFilter, NewLedgerEntry};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    direction: Option<LedgerDirection>,
    category_id: Option<String>,
    holding_id: Option<String>,
    limit: Option<i64>,
}

async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<LedgerEntry>>> {
    let filter = LedgerFilter {
        from: query.from,
        to: query.to,
        direction: query.direction,
        category_id: query.category_id,
        holding_id: query.holding_id,
        limit: query.limit,
    };
    let entries = state.ledger_service.list_entries(&filter)?;
    Ok(Json(entries))
}

async fn get_entry(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<LedgerEntry>> {
    let entry = state.ledger_service.get_entry(&id)?;
    Ok(Json(entry))
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(new_entry): Json<NewLedgerEntry>,
) -> ApiResult<Json<LedgerEntry>> {
    let entry = state.ledger_service.create_entry(new_entry).await?;
    Ok(Json(entry))
}

async fn delete_entry(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.ledger_service.delete_entry(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ledger", get(list_entries).post(create_entry))
        .route("/ledger/{id}", get(get_entry).delete(delete_entry))
}
