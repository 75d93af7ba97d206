//! Patient identifier sanitizer.
//!
//! A `PatientId` can only be obtained through [`sanitize`], so every store
//! operation that takes one is guaranteed a key that cannot reach outside
//! the patient's own record space.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Letters, digits, underscore and hyphen; 3 to 64 characters.
static PATIENT_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{3,64}$").expect("Invalid patient id regex pattern")
});

/// User-facing explanation shown when an identifier is rejected.
pub const PATIENT_ID_RULES: &str =
    "Invalid Patient ID. Use 3–64 characters: letters, numbers, '-' or '_' only.";

/// Validated patient identifier, the sole key for a patient's records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim `raw` and accept it only if it fully matches the identifier pattern.
///
/// Rejection is a normal outcome, so this returns `None` rather than an error.
pub fn sanitize(raw: &str) -> Option<PatientId> {
    let trimmed = raw.trim();
    if PATIENT_ID_PATTERN.is_match(trimmed) {
        Some(PatientId(trimmed.to_string()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_characters() {
        for raw in ["abc", "patient_42", "A-B_c-9", "___", "---"] {
            let id = sanitize(raw).unwrap();
            assert_eq!(id.as_str(), raw);
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let id = sanitize("  patient_42\n").unwrap();
        assert_eq!(id.as_str(), "patient_42");
    }

    #[test]
    fn rejects_too_short() {
        assert!(sanitize("").is_none());
        assert!(sanitize("a").is_none());
        assert!(sanitize("ab").is_none());
        assert!(sanitize("  ab  ").is_none());
    }

    #[test]
    fn length_boundaries() {
        assert!(sanitize(&"x".repeat(3)).is_some());
        assert!(sanitize(&"x".repeat(64)).is_some());
        assert!(sanitize(&"x".repeat(65)).is_none());
    }

    #[test]
    fn rejects_characters_outside_class() {
        for raw in [
            "patient 42",
            "../etc/passwd",
            "abc/def",
            "abc.def",
            "abc$",
            "päti",
            "abc\0def",
            "id;DROP TABLE",
            "abc\ndef",
        ] {
            assert!(sanitize(raw).is_none(), "should reject {raw:?}");
        }
    }

    #[test]
    fn every_allowed_character_passes() {
        let alphabet: String = ('a'..='z')
            .chain('A'..='Z')
            .chain('0'..='9')
            .chain(['_', '-'])
            .collect();
        assert_eq!(alphabet.len(), 64);
        assert_eq!(sanitize(&alphabet).unwrap().as_str(), alphabet);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = sanitize("patient_42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"patient_42\"");
        assert_eq!(id.to_string(), "patient_42");
    }
}
