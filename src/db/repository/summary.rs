use rusqlite::{params, Connection, OptionalExtension};

use super::{format_timestamp, parse_timestamp};
use crate::db::DatabaseError;
use crate::models::{DischargeSummary, PatientId};

/// Insert or replace the patient's discharge summary (last write wins).
pub fn upsert_summary(
    conn: &Connection,
    patient_id: &PatientId,
    summary: &DischargeSummary,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO discharge_summaries (patient_id, original_text, simplified_text, created_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(patient_id) DO UPDATE SET
            original_text = excluded.original_text,
            simplified_text = excluded.simplified_text,
            created_at = excluded.created_at",
        params![
            patient_id.as_str(),
            summary.original_text,
            summary.simplified_text,
            format_timestamp(&summary.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_summary(
    conn: &Connection,
    patient_id: &PatientId,
) -> Result<Option<DischargeSummary>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT original_text, simplified_text, created_at
             FROM discharge_summaries WHERE patient_id = ?1",
            params![patient_id.as_str()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((original_text, simplified_text, created_at)) => Ok(Some(DischargeSummary {
            original_text,
            simplified_text,
            created_at: parse_timestamp("created_at", &created_at)?,
        })),
        None => Ok(None),
    }
}
