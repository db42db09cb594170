use crate::model::LlmResponse;
use async_trait::async_trait;

/// Completion backend for the semantic judge. Implementations return
/// the reply text unmodified; the judge extracts exactly one numeral
/// from it, so any wrapping or reformatting would corrupt the score.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        context: Option<&[String]>,
    ) -> anyhow::Result<LlmResponse>;
    fn provider_name(&self) -> &'static str;
}

pub mod openai;
