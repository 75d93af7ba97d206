/// Fixed instructions sent ahead of every document.
pub const SIMPLIFY_PREAMBLE: &str = "You are a healthcare assistant. Simplify the following hospital \
discharge summary so that it is easy for the patient to understand. Return only the most relevant \
information in clear, concise bullet points. Avoid medical jargon. Do NOT include any unnecessary \
commentary or explanations. Maintain a professional, calm, and encouraging tone. Ensure the summary \
is actionable and easy to read.";

/// Preamble, a blank line, then the document text.
pub fn build_simplify_prompt(document_text: &str) -> String {
    format!("{SIMPLIFY_PREAMBLE}\n\n{document_text}")
}
