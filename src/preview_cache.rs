//! Simplified summaries waiting for the patient's save confirmation.
//!
//! A preview is created only after a successful simplification, so the save
//! path can never persist an empty or failed result. Previews live in memory,
//! are bound to the patient they were made for, and expire.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::models::PatientId;

/// Previews older than this are discarded.
const DEFAULT_PREVIEW_TTL: Duration = Duration::from_secs(30 * 60);

/// Upper bound on concurrently held previews; the oldest is evicted first.
const DEFAULT_PREVIEW_CAPACITY: usize = 256;

/// A simplification awaiting confirmation.
#[derive(Debug, Clone)]
pub struct PendingSummary {
    pub patient_id: PatientId,
    pub original_text: String,
    pub simplified_text: String,
    created: Instant,
}

pub struct PreviewCache {
    entries: HashMap<Uuid, PendingSummary>,
    ttl: Duration,
    capacity: usize,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_PREVIEW_TTL, DEFAULT_PREVIEW_CAPACITY)
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Store a preview and return its id.
    pub fn insert(
        &mut self,
        patient_id: PatientId,
        original_text: String,
        simplified_text: String,
    ) -> Uuid {
        self.sweep_expired();
        while self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, pending)| pending.created)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    self.entries.remove(&id);
                    tracing::debug!(preview_id = %id, "Evicted oldest summary preview");
                }
                None => break,
            }
        }

        let id = Uuid::new_v4();
        self.entries.insert(
            id,
            PendingSummary {
                patient_id,
                original_text,
                simplified_text,
                created: Instant::now(),
            },
        );
        id
    }

    /// Remove and return the preview if it exists, is fresh and belongs to
    /// `patient_id`. A preview requested by another patient stays in place.
    pub fn take(&mut self, preview_id: &Uuid, patient_id: &PatientId) -> Option<PendingSummary> {
        let pending = self.entries.get(preview_id)?;
        if pending.created.elapsed() >= self.ttl {
            self.entries.remove(preview_id);
            return None;
        }
        if &pending.patient_id != patient_id {
            return None;
        }
        self.entries.remove(preview_id)
    }

    /// Put a taken preview back under its original id. It keeps its original
    /// expiry; an already expired preview is dropped.
    pub fn restore(&mut self, preview_id: Uuid, pending: PendingSummary) {
        if pending.created.elapsed() < self.ttl {
            self.entries.insert(preview_id, pending);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sweep_expired(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, pending| pending.created.elapsed() < ttl);
    }
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sanitize;

    fn pid(raw: &str) -> PatientId {
        sanitize(raw).unwrap()
    }

    #[test]
    fn take_returns_inserted_preview_once() {
        let mut cache = PreviewCache::new();
        let id = cache.insert(pid("patient_42"), "orig".into(), "- simple".into());

        let pending = cache.take(&id, &pid("patient_42")).unwrap();
        assert_eq!(pending.original_text, "orig");
        assert_eq!(pending.simplified_text, "- simple");
        assert!(cache.take(&id, &pid("patient_42")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn other_patient_cannot_take_preview() {
        let mut cache = PreviewCache::new();
        let id = cache.insert(pid("patient_42"), "orig".into(), "- simple".into());

        assert!(cache.take(&id, &pid("patient_43")).is_none());
        assert!(cache.take(&id, &pid("patient_42")).is_some());
    }

    #[test]
    fn unknown_preview_is_none() {
        let mut cache = PreviewCache::new();
        assert!(cache.take(&Uuid::new_v4(), &pid("patient_42")).is_none());
    }

    #[test]
    fn expired_preview_is_dropped() {
        let mut cache = PreviewCache::with_limits(Duration::ZERO, 8);
        let id = cache.insert(pid("patient_42"), "orig".into(), "- simple".into());
        assert!(cache.take(&id, &pid("patient_42")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn restored_preview_can_be_taken_again() {
        let mut cache = PreviewCache::new();
        let id = cache.insert(pid("patient_42"), "orig".into(), "- simple".into());

        let pending = cache.take(&id, &pid("patient_42")).unwrap();
        cache.restore(id, pending);
        let again = cache.take(&id, &pid("patient_42")).unwrap();
        assert_eq!(again.simplified_text, "- simple");
    }

    #[test]
    fn restore_skips_expired_preview() {
        let mut cache = PreviewCache::new();
        let id = cache.insert(pid("patient_42"), "orig".into(), "- simple".into());
        let pending = cache.take(&id, &pid("patient_42")).unwrap();

        let mut strict = PreviewCache::with_limits(Duration::ZERO, 8);
        strict.restore(id, pending);
        assert!(strict.is_empty());
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut cache = PreviewCache::with_limits(DEFAULT_PREVIEW_TTL, 2);
        let first = cache.insert(pid("patient_1"), "a".into(), "a".into());
        std::thread::sleep(Duration::from_millis(2));
        let second = cache.insert(pid("patient_2"), "b".into(), "b".into());
        std::thread::sleep(Duration::from_millis(2));
        let third = cache.insert(pid("patient_3"), "c".into(), "c".into());

        assert_eq!(cache.len(), 2);
        assert!(cache.take(&first, &pid("patient_1")).is_none());
        assert!(cache.take(&second, &pid("patient_2")).is_some());
        assert!(cache.take(&third, &pid("patient_3")).is_some());
    }
}
