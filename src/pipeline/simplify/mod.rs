//! Discharge summary simplification through a text-generation service.
//!
//! `Simplifier` is the capability the care flow depends on. `LlmSimplifier`
//! implements it by sending a fixed instructional preamble plus the document
//! text to any `LlmClient` backend.

pub mod ollama;
pub mod openai;
pub mod prompt;
pub mod simplifier;
pub mod types;

pub use ollama::*;
pub use openai::*;
pub use prompt::*;
pub use simplifier::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimplifyError {
    #[error("Text generation service is not reachable at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Text generation service returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Text generation service returned no usable content")]
    EmptyResponse,

    #[error("Document text is empty")]
    EmptyInput,
}

/// Map a transport error the same way for every HTTP backend.
pub(crate) fn map_transport_error(
    err: reqwest::Error,
    base_url: &str,
    timeout_secs: u64,
) -> SimplifyError {
    if err.is_connect() {
        SimplifyError::Connection(base_url.to_string())
    } else if err.is_timeout() {
        SimplifyError::Timeout(timeout_secs)
    } else {
        SimplifyError::HttpClient(err.to_string())
    }
}

/// Keep service error bodies short; they end up in logs.
pub(crate) fn truncate_body(body: String) -> String {
    const MAX_ERROR_BODY_CHARS: usize = 512;
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        body
    } else {
        let mut cut: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::net::SocketAddr;

    /// Serve `router` on an ephemeral local port from its own runtime thread,
    /// so blocking clients can call it from a plain `#[test]`.
    pub(crate) fn spawn_stub(router: axum::Router) -> String {
        let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, router).await.unwrap();
            });
        });
        format!("http://{}", rx.recv().unwrap())
    }

    /// A local URL with nothing listening on it.
    pub(crate) fn unused_local_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }
}
