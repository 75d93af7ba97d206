pub mod api;
pub mod care_flow;
pub mod config;
pub mod db;
pub mod models;
pub mod pipeline;
pub mod preview_cache;
pub mod report;
pub mod risk;

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::care_flow::CareFlow;
use crate::config::AppConfig;
use crate::db::{DatabaseError, SqliteRecordStore};
use crate::pipeline::extraction::PdfTextExtractor;
use crate::pipeline::simplify::{LlmSimplifier, SimplifyError};
use crate::risk::{RiskRuleError, RiskRules};

/// Anything that stops the companion from starting.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Cannot open record store: {0}")]
    Store(#[from] DatabaseError),

    #[error("Cannot load risk rules: {0}")]
    RiskRules(#[from] RiskRuleError),

    #[error("Cannot set up simplification backend: {0}")]
    LlmClient(#[from] SimplifyError),

    #[error("Cannot start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Cannot serve on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Wire the adapters from configuration into a [`CareFlow`].
///
/// Runs outside the async runtime: the blocking HTTP client used by the
/// simplification backends must not be created on an async worker.
pub fn build_care_flow(config: &AppConfig) -> Result<CareFlow, StartupError> {
    let store = SqliteRecordStore::open(&config.database_path)?;

    let rules = match &config.risk_rules_path {
        Some(path) => RiskRules::load(path)?,
        None => RiskRules::default(),
    };

    let client = config.llm.build_client()?;
    tracing::info!(
        backend = ?config.llm.backend,
        model = client.model(),
        "Simplification backend ready"
    );

    Ok(CareFlow::new(
        Arc::new(store),
        Arc::new(LlmSimplifier::new(client)),
        Arc::new(PdfTextExtractor),
        rules,
        config.max_document_bytes,
    ))
}

pub fn run() -> Result<(), StartupError> {
    init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    let flow = Arc::new(build_care_flow(&config)?);

    let runtime = tokio::runtime::Runtime::new().map_err(StartupError::Runtime)?;
    let addr = config.bind_addr;
    runtime
        .block_on(api::serve_until_shutdown(flow.clone(), addr))
        .map_err(|source| StartupError::Bind { addr, source })?;

    // Shut the runtime down before the last `CareFlow` reference goes away.
    drop(runtime);
    drop(flow);
    Ok(())
}
