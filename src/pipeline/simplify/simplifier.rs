use std::time::Instant;

use super::prompt::build_simplify_prompt;
use super::types::{LlmClient, Simplifier};
use super::SimplifyError;

/// `Simplifier` backed by an `LlmClient`.
///
/// Returns the generated text verbatim; a blank response is an error so that
/// nothing empty ever reaches the save path.
pub struct LlmSimplifier {
    client: Box<dyn LlmClient>,
}

impl LlmSimplifier {
    pub fn new(client: Box<dyn LlmClient>) -> Self {
        Self { client }
    }
}

impl Simplifier for LlmSimplifier {
    fn simplify(&self, document_text: &str) -> Result<String, SimplifyError> {
        if document_text.trim().is_empty() {
            return Err(SimplifyError::EmptyInput);
        }

        let prompt = build_simplify_prompt(document_text);
        let started = Instant::now();
        let response = self.client.generate(&prompt)?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if response.trim().is_empty() {
            tracing::warn!(model = self.client.model(), elapsed_ms, "Empty simplification");
            return Err(SimplifyError::EmptyResponse);
        }

        tracing::info!(
            model = self.client.model(),
            input_chars = document_text.len(),
            output_chars = response.len(),
            elapsed_ms,
            "Summary simplified"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::simplify::MockLlmClient;
    use std::sync::{Arc, Mutex};

    /// Records every prompt it receives.
    struct RecordingClient {
        prompts: Arc<Mutex<Vec<String>>>,
        response: String,
    }

    impl LlmClient for RecordingClient {
        fn generate(&self, prompt: &str) -> Result<String, SimplifyError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.response.clone())
        }

        fn model(&self) -> &str {
            "recording"
        }
    }

    struct FailingClient;

    impl LlmClient for FailingClient {
        fn generate(&self, _prompt: &str) -> Result<String, SimplifyError> {
            Err(SimplifyError::Connection("http://localhost:1".into()))
        }

        fn model(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn returns_response_verbatim() {
        let simplifier = LlmSimplifier::new(Box::new(MockLlmClient::new("  - Rest\n- Hydrate\n")));
        assert_eq!(
            simplifier.simplify("Rest and hydrate.").unwrap(),
            "  - Rest\n- Hydrate\n"
        );
    }

    #[test]
    fn sends_preamble_then_document() {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let simplifier = LlmSimplifier::new(Box::new(RecordingClient {
            prompts: prompts.clone(),
            response: "- ok".into(),
        }));
        simplifier.simplify("Take ibuprofen twice daily.").unwrap();

        let sent = prompts.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], build_simplify_prompt("Take ibuprofen twice daily."));
    }

    #[test]
    fn blank_response_is_error() {
        let simplifier = LlmSimplifier::new(Box::new(MockLlmClient::new(" \n ")));
        assert!(matches!(
            simplifier.simplify("text"),
            Err(SimplifyError::EmptyResponse)
        ));
    }

    #[test]
    fn blank_input_skips_service() {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let simplifier = LlmSimplifier::new(Box::new(RecordingClient {
            prompts: prompts.clone(),
            response: "- ok".into(),
        }));
        assert!(matches!(
            simplifier.simplify("   "),
            Err(SimplifyError::EmptyInput)
        ));
        assert!(prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn service_failure_propagates() {
        let simplifier = LlmSimplifier::new(Box::new(FailingClient));
        assert!(matches!(
            simplifier.simplify("text"),
            Err(SimplifyError::Connection(_))
        ));
    }
}
