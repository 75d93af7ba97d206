//! Patient-facing actions: simplify and save a discharge summary, log a
//! symptom, load records and chart the risk trend.
//!
//! Every action starts from the raw identifier the patient typed. Nothing
//! touches the extractor, the simplifier or the store until that identifier
//! has passed [`sanitize`].

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{DatabaseError, RecordStore};
use crate::models::{sanitize, DischargeSummary, PatientId, SymptomLogEntry, PATIENT_ID_RULES};
use crate::pipeline::extraction::{check_document, megabytes, ExtractionError, PdfExtractor};
use crate::pipeline::simplify::{SimplifyError, Simplifier};
use crate::preview_cache::PreviewCache;
use crate::report::{history_rows, render_trend_svg, trend_points, HistoryRow, TrendPoint};
use crate::risk::RiskRules;

pub const NOT_FOUND_MESSAGE: &str =
    "No health data found for this Patient ID. Please check the ID or log some data first.";

pub const SIMPLIFICATION_FAILED_MESSAGE: &str =
    "We couldn't simplify the summary at the moment. Please try again.";

pub const STORE_FAILED_MESSAGE: &str =
    "We couldn't access your records at the moment. Please try again.";

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

/// Input problems the patient can fix. Raised before any side effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", PATIENT_ID_RULES)]
    InvalidPatientId,

    #[error("The uploaded file is empty. Please choose your discharge summary PDF.")]
    EmptyDocument,

    #[error("The uploaded file is not a PDF. Please upload your discharge summary as a PDF.")]
    NotAPdf,

    #[error(
        "PDF is too large ({} MB). Please upload a file under {} MB.",
        mb(.size_bytes),
        mb(.limit_bytes)
    )]
    DocumentTooLarge { size_bytes: usize, limit_bytes: usize },

    /// The detail is for logs only; the message stays generic.
    #[error("We couldn't read this PDF. Please check the file and try again.")]
    UnreadableDocument(String),

    #[error("No readable text was found in this PDF. Scanned images are not supported.")]
    NoExtractableText,

    #[error("Please enter your symptom in the text box.")]
    EmptySymptom,

    #[error("This summary preview has expired or belongs to another Patient ID. Please simplify the summary again.")]
    UnknownPreview,
}

impl ValidationError {
    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPatientId => "INVALID_PATIENT_ID",
            Self::EmptyDocument => "EMPTY_DOCUMENT",
            Self::NotAPdf => "NOT_A_PDF",
            Self::DocumentTooLarge { .. } => "DOCUMENT_TOO_LARGE",
            Self::UnreadableDocument(_) => "UNREADABLE_DOCUMENT",
            Self::NoExtractableText => "NO_EXTRACTABLE_TEXT",
            Self::EmptySymptom => "EMPTY_SYMPTOM",
            Self::UnknownPreview => "UNKNOWN_PREVIEW",
        }
    }
}

impl From<ExtractionError> for ValidationError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::EmptyUpload => Self::EmptyDocument,
            ExtractionError::NotAPdf => Self::NotAPdf,
            ExtractionError::TooLarge {
                size_bytes,
                limit_bytes,
            } => Self::DocumentTooLarge {
                size_bytes,
                limit_bytes,
            },
            ExtractionError::PdfParsing(detail) => Self::UnreadableDocument(detail),
            ExtractionError::NoText => Self::NoExtractableText,
        }
    }
}

#[derive(Error, Debug)]
pub enum CareFlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{}", SIMPLIFICATION_FAILED_MESSAGE)]
    Simplification(#[source] SimplifyError),

    #[error("{}", STORE_FAILED_MESSAGE)]
    Store(#[from] DatabaseError),
}

impl From<ExtractionError> for CareFlowError {
    fn from(err: ExtractionError) -> Self {
        Self::Validation(err.into())
    }
}

// ═══════════════════════════════════════════════════════════
// Outcomes
// ═══════════════════════════════════════════════════════════

/// A successful simplification waiting for the patient to confirm the save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryPreview {
    pub preview_id: Uuid,
    pub simplified_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientRecords {
    pub summary: Option<DischargeSummary>,
    /// Newest first.
    pub history: Vec<HistoryRow>,
    /// Oldest first.
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored for this identifier. Informational, not a failure.
    NotFound,
    Found(PatientRecords),
}

// ═══════════════════════════════════════════════════════════
// CareFlow
// ═══════════════════════════════════════════════════════════

pub struct CareFlow {
    store: Arc<dyn RecordStore>,
    simplifier: Arc<dyn Simplifier>,
    extractor: Arc<dyn PdfExtractor>,
    rules: RiskRules,
    previews: Mutex<PreviewCache>,
    max_document_bytes: usize,
}

impl CareFlow {
    pub fn new(
        store: Arc<dyn RecordStore>,
        simplifier: Arc<dyn Simplifier>,
        extractor: Arc<dyn PdfExtractor>,
        rules: RiskRules,
        max_document_bytes: usize,
    ) -> Self {
        Self {
            store,
            simplifier,
            extractor,
            rules,
            previews: Mutex::new(PreviewCache::new()),
            max_document_bytes,
        }
    }

    pub fn rules(&self) -> &RiskRules {
        &self.rules
    }

    pub fn max_document_bytes(&self) -> usize {
        self.max_document_bytes
    }

    /// Check, extract and simplify a discharge summary. Nothing is persisted;
    /// the returned preview must be confirmed with [`Self::confirm_summary`].
    pub fn prepare_summary(
        &self,
        raw_patient_id: &str,
        document: &[u8],
    ) -> Result<SummaryPreview, CareFlowError> {
        let patient_id = require_patient_id(raw_patient_id)?;
        check_document(document, self.max_document_bytes).inspect_err(|e| {
            tracing::info!(size_bytes = document.len(), reason = %e, "Document rejected");
        })?;

        let started = Instant::now();
        let extracted = self.extractor.extract_text(document).inspect_err(|e| {
            tracing::warn!(size_bytes = document.len(), error = %e, "Text extraction failed");
        })?;
        tracing::info!(
            pages = extracted.page_count,
            chars = extracted.text.chars().count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Document text extracted"
        );

        let simplified = self.simplifier.simplify(&extracted.text).map_err(|e| {
            tracing::error!(error = %e, "Summary simplification failed");
            CareFlowError::Simplification(e)
        })?;

        let preview_id = self
            .previews()
            .insert(patient_id, extracted.text, simplified.clone());
        tracing::info!(%preview_id, "Summary preview ready");

        Ok(SummaryPreview {
            preview_id,
            simplified_text: simplified,
        })
    }

    /// Persist a previously prepared preview, replacing any earlier summary.
    pub fn confirm_summary(
        &self,
        raw_patient_id: &str,
        preview_id: &Uuid,
    ) -> Result<DischargeSummary, CareFlowError> {
        let patient_id = require_patient_id(raw_patient_id)?;
        let pending = self
            .previews()
            .take(preview_id, &patient_id)
            .ok_or(ValidationError::UnknownPreview)?;

        let summary = DischargeSummary {
            original_text: pending.original_text.clone(),
            simplified_text: pending.simplified_text.clone(),
            created_at: Utc::now(),
        };
        if let Err(e) = self.store.save_summary(&patient_id, &summary) {
            tracing::error!(error = %e, "Saving summary failed");
            // The preview stays confirmable after a failed save.
            self.previews().restore(*preview_id, pending);
            return Err(e.into());
        }
        tracing::info!(%preview_id, "Simplified summary saved");
        Ok(summary)
    }

    /// Classify and append a symptom report. There is no confirmation step.
    pub fn log_symptom(
        &self,
        raw_patient_id: &str,
        symptom_text: &str,
    ) -> Result<SymptomLogEntry, CareFlowError> {
        let patient_id = require_patient_id(raw_patient_id)?;
        let symptom_text = symptom_text.trim();
        if symptom_text.is_empty() {
            return Err(ValidationError::EmptySymptom.into());
        }

        let entry = SymptomLogEntry {
            symptom_text: symptom_text.to_string(),
            risk_level: self.rules.classify(symptom_text),
            logged_at: Utc::now(),
        };
        self.store
            .append_symptom(&patient_id, &entry)
            .inspect_err(|e| tracing::error!(error = %e, "Logging symptom failed"))?;
        tracing::info!(
            risk = entry.risk_level.as_str(),
            chars = symptom_text.chars().count(),
            "Symptom logged"
        );
        Ok(entry)
    }

    pub fn load_records(&self, raw_patient_id: &str) -> Result<LoadOutcome, CareFlowError> {
        let patient_id = require_patient_id(raw_patient_id)?;
        let data = self
            .store
            .load_patient_data(&patient_id)
            .inspect_err(|e| tracing::error!(error = %e, "Loading records failed"))?;

        let Some(data) = data else {
            tracing::info!("No records for patient");
            return Ok(LoadOutcome::NotFound);
        };
        tracing::info!(
            has_summary = data.summary.is_some(),
            symptoms = data.symptoms.len(),
            "Records loaded"
        );
        Ok(LoadOutcome::Found(PatientRecords {
            history: history_rows(&data.symptoms),
            trend: trend_points(&data.symptoms),
            summary: data.summary,
        }))
    }

    /// SVG risk trend, or `None` when the patient has no symptom entries.
    pub fn trend_chart(&self, raw_patient_id: &str) -> Result<Option<String>, CareFlowError> {
        let patient_id = require_patient_id(raw_patient_id)?;
        let data = self.store.load_patient_data(&patient_id)?;
        Ok(data
            .filter(|d| !d.symptoms.is_empty())
            .map(|d| render_trend_svg(&trend_points(&d.symptoms))))
    }

    fn previews(&self) -> MutexGuard<'_, PreviewCache> {
        // Cache entries stay consistent even if a holder panicked.
        self.previews
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn mb(bytes: &usize) -> String {
    megabytes(*bytes)
}

fn require_patient_id(raw: &str) -> Result<PatientId, ValidationError> {
    sanitize(raw).ok_or_else(|| {
        tracing::info!("Rejected invalid patient identifier");
        ValidationError::InvalidPatientId
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
