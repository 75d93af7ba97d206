use axum::extract::State;
use axum::Json;

use crate::api::types::ApiContext;
use crate::risk::RiskRules;

/// `GET /api/risk-rules` returns the active rules in evaluation order.
pub async fn list(State(ctx): State<ApiContext>) -> Json<RiskRules> {
    Json(ctx.flow.rules().clone())
}
