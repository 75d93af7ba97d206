//! Patient record endpoints.
//!
//! - `GET /api/patients/:patient_id/records`: summary, history and trend.
//!   An unknown patient is a normal `200` with `"status": "not_found"`.
//! - `GET /api/patients/:patient_id/trend.svg`: the risk trend chart.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::care_flow::{LoadOutcome, NOT_FOUND_MESSAGE};
use crate::models::DischargeSummary;
use crate::report::{HistoryRow, TrendPoint};

const NO_SYMPTOMS_MESSAGE: &str = "No symptoms have been logged for this patient yet.";

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordsResponse {
    Found {
        summary: Option<DischargeSummary>,
        history: Vec<HistoryRow>,
        trend: Vec<TrendPoint>,
    },
    NotFound {
        message: &'static str,
    },
}

pub async fn load(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<RecordsResponse>, ApiError> {
    let outcome = ctx.run(move |flow| flow.load_records(&patient_id)).await?;
    Ok(Json(match outcome {
        LoadOutcome::NotFound => RecordsResponse::NotFound {
            message: NOT_FOUND_MESSAGE,
        },
        LoadOutcome::Found(records) => RecordsResponse::Found {
            summary: records.summary,
            history: records.history,
            trend: records.trend,
        },
    }))
}

pub async fn trend_svg(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Response, ApiError> {
    let svg = ctx
        .run(move |flow| flow.trend_chart(&patient_id))
        .await?
        .ok_or_else(|| ApiError::NotFound(NO_SYMPTOMS_MESSAGE.into()))?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}
