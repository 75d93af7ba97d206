//! Record store capability and its SQLite implementation.
//!
//! The care flow depends only on [`RecordStore`]; any backing store that can
//! overwrite a summary, append a symptom and load both by patient can stand in.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use super::repository::{get_summary, get_symptom_logs, insert_symptom_log, upsert_summary};
use super::sqlite::{open_database, open_memory_database};
use super::DatabaseError;
use crate::models::{DischargeSummary, PatientData, PatientId, SymptomLogEntry};

/// Persistence for discharge summaries and symptom logs, keyed by patient.
pub trait RecordStore: Send + Sync {
    /// Replace any existing summary for `patient_id`.
    fn save_summary(
        &self,
        patient_id: &PatientId,
        summary: &DischargeSummary,
    ) -> Result<(), DatabaseError>;

    /// Add an entry to the patient's symptom log. Earlier entries are untouched.
    fn append_symptom(
        &self,
        patient_id: &PatientId,
        entry: &SymptomLogEntry,
    ) -> Result<(), DatabaseError>;

    /// Everything stored for `patient_id`, or `None` when nothing is stored.
    fn load_patient_data(&self, patient_id: &PatientId)
        -> Result<Option<PatientData>, DatabaseError>;
}

/// SQLite-backed store. One connection, serialized behind a mutex.
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        let conn = open_database(path)?;
        tracing::info!(path = %path.display(), "Record store opened");
        Ok(Self::from_connection(conn))
    }

    pub fn in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::from_connection(open_memory_database()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DatabaseError> {
        self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)
    }
}

impl RecordStore for SqliteRecordStore {
    fn save_summary(
        &self,
        patient_id: &PatientId,
        summary: &DischargeSummary,
    ) -> Result<(), DatabaseError> {
        let conn = self.lock()?;
        upsert_summary(&conn, patient_id, summary)
    }

    fn append_symptom(
        &self,
        patient_id: &PatientId,
        entry: &SymptomLogEntry,
    ) -> Result<(), DatabaseError> {
        let conn = self.lock()?;
        let row_id = insert_symptom_log(&conn, patient_id, entry)?;
        tracing::debug!(%row_id, risk = entry.risk_level.as_str(), "Symptom entry appended");
        Ok(())
    }

    fn load_patient_data(
        &self,
        patient_id: &PatientId,
    ) -> Result<Option<PatientData>, DatabaseError> {
        let conn = self.lock()?;
        let data = PatientData {
            summary: get_summary(&conn, patient_id)?,
            symptoms: get_symptom_logs(&conn, patient_id)?,
        };
        Ok((!data.is_empty()).then_some(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sanitize, RiskLevel};
    use chrono::{Duration, TimeZone, Utc};

    fn store() -> SqliteRecordStore {
        SqliteRecordStore::in_memory().unwrap()
    }

    fn summary(text: &str) -> DischargeSummary {
        DischargeSummary {
            original_text: "Rest and hydrate. Return if fever persists.".into(),
            simplified_text: text.into(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
        }
    }

    fn entry(text: &str, level: RiskLevel, minutes: i64) -> SymptomLogEntry {
        SymptomLogEntry {
            symptom_text: text.into(),
            risk_level: level,
            logged_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    #[test]
    fn load_unknown_patient_is_none() {
        let store = store();
        let id = sanitize("nobody_here").unwrap();
        assert!(store.load_patient_data(&id).unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips_summary() {
        let store = store();
        let id = sanitize("patient_42").unwrap();
        let record = summary("- Rest\n- Drink water");
        store.save_summary(&id, &record).unwrap();

        let data = store.load_patient_data(&id).unwrap().unwrap();
        assert_eq!(data.summary, Some(record));
        assert!(data.symptoms.is_empty());
    }

    #[test]
    fn consecutive_loads_are_identical() {
        let store = store();
        let id = sanitize("patient_42").unwrap();
        store.save_summary(&id, &summary("- Rest")).unwrap();
        store
            .append_symptom(&id, &entry("mild pain", RiskLevel::High, 0))
            .unwrap();

        let first = store.load_patient_data(&id).unwrap();
        let second = store.load_patient_data(&id).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn appends_accumulate() {
        let store = store();
        let id = sanitize("patient_42").unwrap();
        let a = entry("tired", RiskLevel::Medium, 0);
        let b = entry("all good", RiskLevel::Low, 5);
        store.append_symptom(&id, &a).unwrap();
        store.append_symptom(&id, &b).unwrap();

        let data = store.load_patient_data(&id).unwrap().unwrap();
        assert_eq!(data.symptoms, vec![a, b]);
        assert!(data.summary.is_none());
    }

    #[test]
    fn symptoms_without_summary_are_found() {
        let store = store();
        let id = sanitize("patient_42").unwrap();
        store
            .append_symptom(&id, &entry("dizzy", RiskLevel::Medium, 0))
            .unwrap();
        let data = store.load_patient_data(&id).unwrap().unwrap();
        assert!(data.summary.is_none());
        assert_eq!(data.symptoms.len(), 1);
    }

    #[test]
    fn on_disk_store_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("records.db");
        let id = sanitize("patient_42").unwrap();
        {
            let store = SqliteRecordStore::open(&path).unwrap();
            store.save_summary(&id, &summary("- Walk daily")).unwrap();
        }
        let reopened = SqliteRecordStore::open(&path).unwrap();
        let data = reopened.load_patient_data(&id).unwrap().unwrap();
        assert_eq!(data.summary.unwrap().simplified_text, "- Walk daily");
    }
}
