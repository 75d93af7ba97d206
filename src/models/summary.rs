use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discharge summary stored for a patient. One per patient, last write wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DischargeSummary {
    pub original_text: String,
    pub simplified_text: String,
    pub created_at: DateTime<Utc>,
}
