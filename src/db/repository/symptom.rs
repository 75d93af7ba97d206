use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp};
use crate::db::DatabaseError;
use crate::models::{PatientId, RiskLevel, SymptomLogEntry};

/// Append a symptom entry to the patient's log. Returns the generated row id.
pub fn insert_symptom_log(
    conn: &Connection,
    patient_id: &PatientId,
    entry: &SymptomLogEntry,
) -> Result<Uuid, DatabaseError> {
    let id = Uuid::new_v4();
    conn.execute(
        "INSERT INTO symptom_logs (id, patient_id, symptom_text, risk_level, logged_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            id.to_string(),
            patient_id.as_str(),
            entry.symptom_text,
            entry.risk_level.as_str(),
            format_timestamp(&entry.logged_at),
        ],
    )?;
    Ok(id)
}

/// All symptom entries for a patient, oldest first (ties in insertion order).
pub fn get_symptom_logs(
    conn: &Connection,
    patient_id: &PatientId,
) -> Result<Vec<SymptomLogEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT symptom_text, risk_level, logged_at
         FROM symptom_logs WHERE patient_id = ?1
         ORDER BY logged_at ASC, seq ASC",
    )?;

    let rows = stmt.query_map(params![patient_id.as_str()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut entries = Vec::new();
    for row in rows {
        let (symptom_text, risk_level, logged_at) = row?;
        entries.push(SymptomLogEntry {
            symptom_text,
            risk_level: RiskLevel::from_str(&risk_level)?,
            logged_at: parse_timestamp("logged_at", &logged_at)?,
        });
    }
    Ok(entries)
}
