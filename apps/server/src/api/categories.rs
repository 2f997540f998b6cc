//! REST API endpoints for transaction categories.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use moneta_core::categories::{Category, CategoryKind, CategoryUpdate, NewCategory};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    kind: Option<CategoryKind>,
}

async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.category_service.list_categories(query.kind)?;
    Ok(Json(categories))
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(new_category): Json<NewCategory>,
) -> ApiResult<Json<Category>> {
    let category = state.category_service.create_category(new_category).await?;
    Ok(Json(category))
}

async fn update_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut category_update): Json<CategoryUpdate>,
) -> ApiResult<Json<Category>> {
    category_update.id = Some(id);
    let category = state.category_service.update_category(category_update).await?;
    Ok(Json(category))
}

/// DELETE /categories/:id - 409 while ledger entries or budgets still
/// reference the category.
async fn delete_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.category_service.delete_category(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Category>> {
    let category = state.category_service.get_category(&id)?;
    Ok(Json(category))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}
