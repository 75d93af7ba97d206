use super::SimplifyError;

/// A text-generation backend bound to one model.
pub trait LlmClient: Send + Sync {
    /// Send a single user prompt and return the first generated response.
    fn generate(&self, prompt: &str) -> Result<String, SimplifyError>;

    /// Model name, for logging.
    fn model(&self) -> &str;
}

/// Turns discharge-summary text into patient-friendly text.
pub trait Simplifier: Send + Sync {
    fn simplify(&self, document_text: &str) -> Result<String, SimplifyError>;
}
