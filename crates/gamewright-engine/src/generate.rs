//! Upstream text-generation boundary.

use async_trait::async_trait;

/// The model call that produces raw candidate text.
///
/// Prompt construction and the generation backend live outside this engine;
/// the pipeline only needs `prompt in, free-form text out`. Implementations
/// are expected to be remote calls, so failures are ordinary `Err`s here and
/// become rejected design outcomes in the pipeline.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}
