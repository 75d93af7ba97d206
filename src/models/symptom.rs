use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::RiskLevel;
use super::summary::DischargeSummary;

/// One classified symptom report. Entries are appended, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomLogEntry {
    pub symptom_text: String,
    pub risk_level: RiskLevel,
    pub logged_at: DateTime<Utc>,
}

/// Everything stored for one patient. Either part may be missing because
/// summaries and symptoms are stored independently.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PatientData {
    pub summary: Option<DischargeSummary>,
    pub symptoms: Vec<SymptomLogEntry>,
}

impl PatientData {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.symptoms.is_empty()
    }
}
