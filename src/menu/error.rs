use thiserror::Error;

/// Internal failure taxonomy of the generation pipeline. None of these
/// reach the caller: the orchestrator absorbs them into the fallback path.
#[derive(Debug, Error)]
pub enum GenerationFailure {
    #[error("AI provider is not configured")]
    NotConfigured,
    #[error("AI provider request failed: {0}")]
    Provider(String),
    #[error("could not extract a menu from the provider response: {0}")]
    Extraction(String),
    #[error("provider response failed validation: {0}")]
    Validation(String),
}

impl GenerationFailure {
    /// Warning attached to the persisted menu when the fallback is used.
    pub fn warning(&self) -> String {
        format!("{self}; a built-in sample menu was saved instead")
    }
}
