mod openai;

pub use openai::OpenAiCompatibleClient;

use axum::async_trait;

/// Generative-text collaborator. One prompt in, raw completion text out.
/// The output is untrusted: it may wrap the JSON payload in prose or fences.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}
