use async_trait::async_trait;
use mathgrade_core::metrics_api::{Metric, MetricResult};
use mathgrade_core::model::EvalCase;

const FINAL_ANSWER_VOCAB: &[&str] = &[
    "answer",
    "solution",
    "result",
    "therefore",
    "thus",
    "final",
    "conclusion",
    "equals",
    "=",
    "is",
];

const STEP_VOCAB: &[&str] = &[
    "step",
    "first",
    "second",
    "next",
    "then",
    "now",
    "calculate",
    "substitute",
    "solve",
    "simplify",
    "factor",
];

const EXPLANATION_VOCAB: &[&str] = &[
    "because",
    "since",
    "due to",
    "reason",
    "explain",
    "why",
    "how",
    "method",
    "approach",
    "concept",
    "principle",
];

const REASONING_VOCAB: &[&str] = &[
    "theorem",
    "formula",
    "equation",
    "property",
    "rule",
    "law",
    "identity",
    "relationship",
    "pattern",
];

/// Structural completeness of a worked solution: weighted presence
/// checks over the raw output, not the extracted answer. Final answer
/// 0.4, steps 0.3, explanation 0.2, formal reasoning 0.1.
pub struct CompletenessMetric {
    threshold: f64,
}

impl CompletenessMetric {
    pub fn new(threshold: f64) -> anyhow::Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!(
                "config error: completeness threshold {} out of range [0, 1]",
                threshold
            );
        }
        Ok(Self { threshold })
    }
}

#[async_trait]
impl Metric for CompletenessMetric {
    fn name(&self) -> &'static str {
        "completeness"
    }

    async fn measure(&self, case: &EvalCase) -> MetricResult {
        let text = case.actual.to_lowercase();

        let mut score = 0.0;
        let mut components = Vec::new();

        for (vocab, weight, label) in [
            (FINAL_ANSWER_VOCAB, 0.4, "final answer"),
            (STEP_VOCAB, 0.3, "solution steps"),
            (EXPLANATION_VOCAB, 0.2, "explanation"),
            (REASONING_VOCAB, 0.1, "mathematical reasoning"),
        ] {
            if vocab.iter().any(|w| text.contains(w)) {
                score += weight;
                components.push(label);
            }
        }

        let reason = format!(
            "Solution completeness: {:.2}. Contains: {}",
            score,
            if components.is_empty() {
                "minimal components".to_string()
            } else {
                components.join(", ")
            }
        );

        MetricResult {
            score,
            passed: score >= self.threshold,
            reason,
        }
    }
}
