//! Shared API state.

use std::sync::Arc;

use crate::api::error::ApiError;
use crate::care_flow::{CareFlow, CareFlowError};

/// Handler state. Cheap to clone.
#[derive(Clone)]
pub struct ApiContext {
    pub flow: Arc<CareFlow>,
}

impl ApiContext {
    pub fn new(flow: Arc<CareFlow>) -> Self {
        Self { flow }
    }

    /// Run a care-flow action on the blocking pool. SQLite, PDF parsing and
    /// the simplification HTTP call must stay off the async workers.
    pub async fn run<T, F>(&self, action: F) -> Result<T, ApiError>
    where
        F: FnOnce(&CareFlow) -> Result<T, CareFlowError> + Send + 'static,
        T: Send + 'static,
    {
        let flow = self.flow.clone();
        tokio::task::spawn_blocking(move || action(&flow))
            .await
            .map_err(|e| ApiError::Internal(format!("blocking task failed: {e}")))?
            .map_err(ApiError::from)
    }
}
