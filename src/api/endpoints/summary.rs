//! Discharge summary endpoints.
//!
//! - `POST /api/patients/:patient_id/summary/preview`: upload a PDF (multipart
//!   field `file`), get the simplified text and a preview id. Nothing is saved.
//! - `POST /api/patients/:patient_id/summary`: confirm a preview and save it.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::care_flow::SummaryPreview;
use crate::models::DischargeSummary;

/// Multipart field carrying the PDF.
const FILE_FIELD: &str = "file";

pub const SUMMARY_SAVED_MESSAGE: &str = "Your simplified summary has been successfully saved!";

pub async fn preview(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<SummaryPreview>, ApiError> {
    let mut document: Option<Vec<u8>> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            document = Some(field.bytes().await?.to_vec());
        }
    }
    let document = document.ok_or_else(|| {
        ApiError::BadRequest("No file provided. Attach the PDF in the `file` field.".into())
    })?;

    let preview = ctx
        .run(move |flow| flow.prepare_summary(&patient_id, &document))
        .await?;
    Ok(Json(preview))
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub preview_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    #[serde(flatten)]
    pub summary: DischargeSummary,
    pub message: &'static str,
}

pub async fn confirm(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
    request: Result<Json<ConfirmRequest>, JsonRejection>,
) -> Result<Json<ConfirmResponse>, ApiError> {
    let Json(request) = request?;
    let summary = ctx
        .run(move |flow| flow.confirm_summary(&patient_id, &request.preview_id))
        .await?;
    Ok(Json(ConfirmResponse {
        summary,
        message: SUMMARY_SAVED_MESSAGE,
    }))
}
