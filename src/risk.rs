//! Keyword-based symptom risk classification.
//!
//! Rules are evaluated in order and the first rule with a keyword contained in
//! the lower-cased description decides the level. Descriptions matching no rule
//! are `Low`. Matching is purely lexical: "no pain" still contains "pain".

use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::RiskLevel;

const HIGH_KEYWORDS: &[&str] = &["fever", "pain", "bleeding", "shortness of breath"];
const MEDIUM_KEYWORDS: &[&str] = &["tired", "dizzy", "nausea"];

static DEFAULT_RULES: LazyLock<RiskRules> = LazyLock::new(RiskRules::default);

#[derive(Error, Debug)]
pub enum RiskRuleError {
    #[error("Cannot read risk rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid risk rules JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Risk rule {index} ({level}) has no keywords")]
    EmptyRule { index: usize, level: RiskLevel },

    #[error("Risk rule {index} ({level}) contains a blank keyword")]
    BlankKeyword { index: usize, level: RiskLevel },
}

/// One classification rule: any keyword present selects `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRule {
    pub level: RiskLevel,
    pub keywords: Vec<String>,
}

impl RiskRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw.as_str()))
    }
}

/// Ordered rule list, first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RiskRules {
    rules: Vec<RiskRule>,
}

impl Default for RiskRules {
    fn default() -> Self {
        let rule = |level, keywords: &[&str]| RiskRule {
            level,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        };
        Self {
            rules: vec![
                rule(RiskLevel::High, HIGH_KEYWORDS),
                rule(RiskLevel::Medium, MEDIUM_KEYWORDS),
            ],
        }
    }
}

impl RiskRules {
    /// Build a rule set, normalizing keywords to lower case.
    pub fn new(rules: Vec<RiskRule>) -> Result<Self, RiskRuleError> {
        let mut normalized = Vec::with_capacity(rules.len());
        for (index, rule) in rules.into_iter().enumerate() {
            if rule.keywords.is_empty() {
                return Err(RiskRuleError::EmptyRule {
                    index,
                    level: rule.level,
                });
            }
            let mut keywords = Vec::with_capacity(rule.keywords.len());
            for keyword in rule.keywords {
                let keyword = keyword.trim().to_lowercase();
                if keyword.is_empty() {
                    return Err(RiskRuleError::BlankKeyword {
                        index,
                        level: rule.level,
                    });
                }
                keywords.push(keyword);
            }
            normalized.push(RiskRule {
                level: rule.level,
                keywords,
            });
        }
        Ok(Self { rules: normalized })
    }

    /// Parse a JSON array of `{"level": "High", "keywords": [...]}` objects.
    pub fn from_json(json: &str) -> Result<Self, RiskRuleError> {
        let rules: Vec<RiskRule> = serde_json::from_str(json)?;
        Self::new(rules)
    }

    pub fn load(path: &Path) -> Result<Self, RiskRuleError> {
        let json = std::fs::read_to_string(path)?;
        let rules = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), rules = rules.len(), "Loaded risk rules");
        Ok(rules)
    }

    pub fn rules(&self) -> &[RiskRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn classify(&self, symptom_text: &str) -> RiskLevel {
        let lowered = symptom_text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.level)
            .unwrap_or(RiskLevel::Low)
    }
}

/// Classify with the built-in rule set.
pub fn classify(symptom_text: &str) -> RiskLevel {
    DEFAULT_RULES.classify(symptom_text)
}
