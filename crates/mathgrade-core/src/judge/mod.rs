use crate::providers::llm::LlmClient;
use crate::storage::judge_cache::JudgeCache;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Clone, Debug)]
pub struct JudgeRuntimeConfig {
    pub provider: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub refresh: bool,
}

impl Default for JudgeRuntimeConfig {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            model: "gpt-4.1".into(),
            temperature: 0.1,
            max_tokens: 10,
            timeout: Duration::from_secs(15),
            refresh: false,
        }
    }
}

/// External equivalence judge. Called only when deterministic scoring is
/// inconclusive; every failure mode (timeout, transport error, reply
/// without a numeral) degrades to a score of 0.0 so the deterministic
/// pipeline can never be crashed by the remote side.
#[derive(Clone)]
pub struct SemanticJudge {
    config: JudgeRuntimeConfig,
    client: Arc<dyn LlmClient>,
    cache: Option<JudgeCache>,
}

impl SemanticJudge {
    pub fn new(
        config: JudgeRuntimeConfig,
        client: Arc<dyn LlmClient>,
        cache: Option<JudgeCache>,
    ) -> Self {
        Self {
            config,
            client,
            cache,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Score mathematical equivalence of two answers in [0, 1].
    pub async fn judge(&self, expected: &str, actual: &str) -> f64 {
        match self.try_judge(expected, actual).await {
            Ok(score) => score,
            Err(_) => 0.0,
        }
    }

    async fn try_judge(&self, expected: &str, actual: &str) -> anyhow::Result<f64> {
        let key = self.cache_key(expected, actual);

        if !self.config.refresh {
            if let Some(cache) = &self.cache {
                // a broken cache must not block the live call
                if let Ok(Some(score)) = cache.get(&key) {
                    return Ok(score);
                }
            }
        }

        let prompt = build_prompt(expected, actual);
        let resp = timeout(self.config.timeout, self.client.complete(&prompt, None)).await??;

        let score = parse_score(&resp.text)
            .ok_or_else(|| anyhow::anyhow!("judge reply has no numeral: {:?}", resp.text))?;

        if let Some(cache) = &self.cache {
            // a failed cache write must not discard a live score
            let _ = cache.put(&key, &self.config.provider, &self.config.model, score);
        }

        Ok(score)
    }

    fn cache_key(&self, expected: &str, actual: &str) -> String {
        let raw = format!(
            "{}|{}|{}|{}|{}|{}",
            self.config.provider,
            self.config.model,
            self.config.temperature,
            self.config.max_tokens,
            expected,
            actual
        );
        sha256_hex(&raw)
    }
}

fn build_prompt(expected: &str, actual: &str) -> String {
    format!(
        "As a mathematics expert, evaluate whether these two mathematical answers are equivalent:\n\
         \n\
         Expected Answer: {}\n\
         Actual Answer: {}\n\
         \n\
         Consider:\n\
         - Mathematical equivalence (e.g., 1/2 = 0.5 = 50%)\n\
         - Different but valid representations\n\
         - Rounding differences within reasonable bounds\n\
         - Unit conversions\n\
         \n\
         Respond with only a score from 0.0 to 1.0, where:\n\
         - 1.0 = Mathematically equivalent\n\
         - 0.8-0.9 = Very close (minor formatting/rounding differences)\n\
         - 0.5-0.7 = Partially correct\n\
         - 0.0-0.4 = Incorrect\n\
         \n\
         Score:",
        expected, actual
    )
}

/// First floating-point or integer token of the reply, clamped to [0, 1].
pub fn parse_score(text: &str) -> Option<f64> {
    let re = Regex::new(r"\d+\.\d+|\d+").unwrap();
    let m = re.find(text)?;
    let v: f64 = m.as_str().parse().ok()?;
    Some(v.clamp(0.0, 1.0))
}

fn sha256_hex(s: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut h = Sha256::new();
    h.update(s.as_bytes());
    hex::encode(h.finalize())
}
