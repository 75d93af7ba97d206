use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::RiskLevel;

#[derive(Debug, Deserialize)]
pub struct LogSymptomRequest {
    pub symptom: String,
}

#[derive(Debug, Serialize)]
pub struct LogSymptomResponse {
    pub symptom: String,
    pub risk_level: RiskLevel,
    pub logged_at: DateTime<Utc>,
    pub message: String,
}

/// `POST /api/patients/:patient_id/symptoms` classifies and appends a symptom.
pub async fn log(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
    request: Result<Json<LogSymptomRequest>, JsonRejection>,
) -> Result<Json<LogSymptomResponse>, ApiError> {
    let Json(request) = request?;
    let entry = ctx
        .run(move |flow| flow.log_symptom(&patient_id, &request.symptom))
        .await?;
    Ok(Json(LogSymptomResponse {
        message: format!(
            "Symptom logged successfully with {} risk level.",
            entry.risk_level
        ),
        symptom: entry.symptom_text,
        risk_level: entry.risk_level,
        logged_at: entry.logged_at,
    }))
}
