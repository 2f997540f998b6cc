//! REST API endpoints for holdings: CRUD, price refresh, and settlement.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use moneta_core::holdings::{
    Holding, HoldingKind, HoldingUpdate, HoldingValuation, NewHolding, PaymentInput,
    SettlementMode, SettlementOutcome, SettlementRequest,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    kind: Option<HoldingKind>,
}

async fn list_holdings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Holding>>> {
    let holdings = state.holding_service.list_holdings(query.kind)?;
    Ok(Json(holdings))
}

async fn get_holding(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Holding>> {
    let holding = state.holding_service.get_holding(&id)?;
    Ok(Json(holding))
}

async fn get_holding_valuation(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HoldingValuation>> {
    let holding = state.holding_service.get_holding(&id)?;
    Ok(Json(holding.valuation()))
}

async fn create_holding(
    State(state): State<Arc<AppState>>,
    Json(new_holding): Json<NewHolding>,
) -> ApiResult<Json<Holding>> {
    let holding = state.holding_service.create_holding(new_holding).await?;
    Ok(Json(holding))
}

async fn update_holding(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut holding_update): Json<HoldingUpdate>,
) -> ApiResult<Json<Holding>> {
    holding_update.id = Some(id);
    let holding = state.holding_service.update_holding(holding_update).await?;
    Ok(Json(holding))
}

async fn delete_holding(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.holding_service.delete_holding(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /holdings/:id/refresh-price - pulls the coin price from the feed
/// and recomputes the derived value. 502 on feed failure; stored state is
/// untouched in that case.
async fn refresh_price(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Holding>> {
    let holding = state.holding_service.refresh_price(&id).await?;
    Ok(Json(holding))
}

/// Settlement request body, mirroring the settlement dialog: payment type
/// (full/partial), the input unit for partial payments, and the optional
/// transaction recording.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettleHoldingRequest {
    payment_type: PaymentType,
    #[serde(default)]
    input_unit: InputUnit,
    amount: Option<Decimal>,
    record_transaction: bool,
    category_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
enum PaymentType {
    Full,
    Partial,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
enum InputUnit {
    #[default]
    Currency,
    Units,
}

impl SettleHoldingRequest {
    fn into_core(self) -> anyhow::Result<SettlementRequest> {
        let mode = match self.payment_type {
            PaymentType::Full => SettlementMode::Full,
            PaymentType::Partial => {
                let amount = self
                    .amount
                    .ok_or_else(|| anyhow::anyhow!("Partial settlement requires an amount"))?;
                let input = match self.input_unit {
                    InputUnit::Currency => PaymentInput::Currency(amount),
                    InputUnit::Units => PaymentInput::Units(amount),
                };
                SettlementMode::Partial(input)
            }
        };
        Ok(SettlementRequest {
            mode,
            record_transaction: self.record_transaction,
            category_id: self.category_id,
        })
    }
}

/// POST /holdings/:id/settle - applies a full or partial payment against
/// a debt/receivable holding.
async fn settle_holding(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SettleHoldingRequest>,
) -> ApiResult<Json<SettlementOutcome>> {
    let core_request = request.into_core()?;
    let outcome = state.holding_service.settle_holding(&id, core_request).await?;
    Ok(Json(outcome))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/holdings", get(list_holdings).post(create_holding))
        .route(
            "/holdings/{id}",
            get(get_holding).put(update_holding).delete(delete_holding),
        )
        .route("/holdings/{id}/valuation", get(get_holding_valuation))
        .route("/holdings/{id}/refresh-price", post(refresh_price))
        .route("/holdings/{id}/settle", post(settle_holding))
}
