//! Runtime configuration, read from `RC_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::extraction::DEFAULT_MAX_DOCUMENT_BYTES;
use crate::pipeline::simplify::{
    ChatCompletionsClient, LlmClient, MockLlmClient, OllamaClient, SimplifyError,
    DEFAULT_CHAT_MODEL, DEFAULT_TEMPERATURE, GROQ_BASE_URL, OLLAMA_LOCAL_URL,
};

/// Application-level constants
pub const APP_NAME: &str = "Recovery Companion";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1:8b";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

/// Canned reply of the `mock` backend.
const MOCK_SIMPLIFICATION: &str =
    "- This is a mock simplification.\n- Configure RC_LLM_BACKEND for real output.";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown LLM backend {0:?} (expected openai, ollama or mock)")]
    UnknownBackend(String),

    #[error("The openai backend needs an API key: set RC_LLM_API_KEY or GROQ_API_KEY")]
    MissingApiKey,

    #[error("Cannot determine home directory; set RC_DATABASE_PATH")]
    NoHomeDir,
}

/// Default log filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "recovery_companion=info,tower_http=warn"
}

/// `~/RecoveryCompanion/`, user-visible on all platforms.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("RecoveryCompanion"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    /// Any OpenAI-compatible `/chat/completions` endpoint (Groq by default).
    OpenAi,
    Ollama,
    Mock,
}

impl std::str::FromStr for LlmBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "groq" => Ok(Self::OpenAi),
            "ollama" => Ok(Self::Ollama),
            "mock" => Ok(Self::Mock),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub backend: LlmBackend,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Construct the client for the configured backend.
    pub fn build_client(&self) -> Result<Box<dyn LlmClient>, SimplifyError> {
        let client: Box<dyn LlmClient> = match self.backend {
            LlmBackend::OpenAi => Box::new(ChatCompletionsClient::new(
                &self.base_url,
                self.api_key.clone(),
                &self.model,
                self.temperature,
                self.timeout_secs,
            )?),
            LlmBackend::Ollama => Box::new(OllamaClient::new(
                &self.base_url,
                &self.model,
                self.temperature,
                self.timeout_secs,
            )?),
            LlmBackend::Mock => Box::new(MockLlmClient::new(MOCK_SIMPLIFICATION)),
        };
        Ok(client)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
    pub max_document_bytes: usize,
    pub risk_rules_path: Option<PathBuf>,
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = parse_var("RC_BIND_ADDR", get("RC_BIND_ADDR"))?
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8501)));

        let database_path = match get("RC_DATABASE_PATH") {
            Some(path) => PathBuf::from(path),
            None => app_data_dir()
                .ok_or(ConfigError::NoHomeDir)?
                .join("records.db"),
        };

        let max_mb = parse_var::<u64>("RC_MAX_DOCUMENT_MB", get("RC_MAX_DOCUMENT_MB"))?;
        let max_document_bytes = match max_mb {
            Some(0) => {
                return Err(ConfigError::InvalidValue {
                    var: "RC_MAX_DOCUMENT_MB",
                    value: "0".into(),
                    reason: "must be at least 1".into(),
                })
            }
            Some(mb) => usize::try_from(mb)
                .ok()
                .and_then(|mb| mb.checked_mul(1024 * 1024))
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: "RC_MAX_DOCUMENT_MB",
                    value: mb.to_string(),
                    reason: "too large".into(),
                })?,
            None => DEFAULT_MAX_DOCUMENT_BYTES,
        };

        let risk_rules_path = get("RC_RISK_RULES").map(PathBuf::from);

        let backend = match get("RC_LLM_BACKEND") {
            Some(raw) => raw.parse()?,
            None => LlmBackend::OpenAi,
        };
        let api_key = get("RC_LLM_API_KEY").or_else(|| get("GROQ_API_KEY"));
        if backend == LlmBackend::OpenAi && api_key.is_none() {
            return Err(ConfigError::MissingApiKey);
        }
        let (default_url, default_model) = match backend {
            LlmBackend::OpenAi => (GROQ_BASE_URL, DEFAULT_CHAT_MODEL),
            LlmBackend::Ollama => (OLLAMA_LOCAL_URL, DEFAULT_OLLAMA_MODEL),
            LlmBackend::Mock => ("", "mock"),
        };

        let temperature = parse_var::<f32>("RC_LLM_TEMPERATURE", get("RC_LLM_TEMPERATURE"))?
            .unwrap_or(DEFAULT_TEMPERATURE);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                var: "RC_LLM_TEMPERATURE",
                value: temperature.to_string(),
                reason: "must be between 0 and 2".into(),
            });
        }

        let llm = LlmConfig {
            backend,
            base_url: get("RC_LLM_BASE_URL").unwrap_or_else(|| default_url.to_string()),
            model: get("RC_LLM_MODEL").unwrap_or_else(|| default_model.to_string()),
            api_key,
            temperature,
            timeout_secs: parse_var("RC_LLM_TIMEOUT_SECS", get("RC_LLM_TIMEOUT_SECS"))?
                .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS),
        };

        Ok(Self {
            bind_addr,
            database_path,
            max_document_bytes,
            risk_rules_path,
            llm,
        })
    }
}

fn parse_var<T>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| {
            raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
                var,
                value: raw.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
