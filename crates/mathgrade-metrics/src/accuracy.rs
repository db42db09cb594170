use async_trait::async_trait;
use mathgrade_core::extract::extract_answer;
use mathgrade_core::judge::SemanticJudge;
use mathgrade_core::metrics_api::{Metric, MetricResult};
use mathgrade_core::model::EvalCase;
use mathgrade_core::normalize::normalize;
use mathgrade_core::similarity::similarity_score;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AccuracyConfig {
    pub threshold: f64,
    pub strict_matching: bool,
    pub use_judge: bool,
}

impl Default for AccuracyConfig {
    fn default() -> Self {
        Self {
            threshold: 0.9,
            strict_matching: false,
            use_judge: true,
        }
    }
}

/// Answer-equivalence metric: extract the final answer, canonicalize
/// both sides, run the deterministic similarity ladder, and only when
/// that is inconclusive (< 0.8) ask the semantic judge. The
/// deterministic score is a floor; the judge can raise it, never lower
/// it.
pub struct AccuracyMetric {
    config: AccuracyConfig,
    judge: Option<Arc<SemanticJudge>>,
}

impl AccuracyMetric {
    pub fn new(config: AccuracyConfig, judge: Option<Arc<SemanticJudge>>) -> anyhow::Result<Self> {
        if !(0.0..=1.0).contains(&config.threshold) {
            anyhow::bail!(
                "config error: accuracy threshold {} out of range [0, 1]",
                config.threshold
            );
        }
        Ok(Self { config, judge })
    }
}

#[async_trait]
impl Metric for AccuracyMetric {
    fn name(&self) -> &'static str {
        "accuracy"
    }

    async fn measure(&self, case: &EvalCase) -> MetricResult {
        let actual_clean = extract_answer(&case.actual);
        let expected_norm = normalize(&case.expected);
        let actual_norm = normalize(&actual_clean);

        let mut score = if self.config.strict_matching {
            if expected_norm == actual_norm {
                1.0
            } else {
                0.0
            }
        } else {
            similarity_score(&expected_norm, &actual_norm)
        };

        if !self.config.strict_matching && score < 0.8 && self.config.use_judge {
            if let Some(judge) = &self.judge {
                score = score.max(judge.judge(&case.expected, &actual_clean).await);
            }
        }

        MetricResult {
            score,
            passed: score >= self.config.threshold,
            reason: band_reason(&case.expected, &actual_clean, score),
        }
    }
}

fn band_reason(expected: &str, actual: &str, score: f64) -> String {
    let band = if score >= 0.95 {
        "Excellent"
    } else if score >= 0.8 {
        "Good"
    } else if score >= 0.5 {
        "Partial"
    } else {
        "Poor"
    };
    format!(
        "{} match (score: {:.2}). Expected: '{}', Got: '{}'",
        band, score, expected, actual
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(expected: &str, actual: &str) -> EvalCase {
        EvalCase {
            id: "t".into(),
            expected: expected.into(),
            actual: actual.into(),
            context: None,
        }
    }

    fn metric(strict: bool) -> AccuracyMetric {
        AccuracyMetric::new(
            AccuracyConfig {
                threshold: 0.9,
                strict_matching: strict,
                use_judge: false,
            },
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn labelled_answer_matches_exactly() {
        let r = metric(false).measure(&case("4", "The final answer: 4")).await;
        assert_eq!(r.score, 1.0);
        assert!(r.passed);
        assert!(r.reason.starts_with("Excellent match"));
    }

    #[tokio::test]
    async fn degree_symbol_matches_spelled_units() {
        let r = metric(false).measure(&case("90 degrees", "90°")).await;
        assert_eq!(r.score, 1.0);
        assert!(r.passed);
    }

    #[tokio::test]
    async fn symbolic_vs_decimal_scores_low_without_judge() {
        let r = metric(false).measure(&case("3.14159", "π")).await;
        assert!(r.score < 0.8, "got {}", r.score);
        assert!(!r.passed);
        assert!(r.reason.starts_with("Poor match"));
    }

    #[tokio::test]
    async fn strict_mode_requires_exact_normalized_equality() {
        let m = metric(true);
        let r = m.measure(&case("90 degrees", "90°")).await;
        assert_eq!(r.score, 1.0);

        let r = m.measure(&case("4", "about 4 or so")).await;
        assert_eq!(r.score, 0.0);
        assert!(!r.passed);
    }

    #[tokio::test]
    async fn judge_raises_but_never_lowers() {
        use async_trait::async_trait;
        use mathgrade_core::judge::JudgeRuntimeConfig;
        use mathgrade_core::model::LlmResponse;
        use mathgrade_core::providers::llm::LlmClient;

        struct Fixed(&'static str);
        #[async_trait]
        impl LlmClient for Fixed {
            async fn complete(
                &self,
                _prompt: &str,
                _context: Option<&[String]>,
            ) -> anyhow::Result<LlmResponse> {
                Ok(LlmResponse {
                    text: self.0.into(),
                    provider: "fixed".into(),
                    model: "fixed".into(),
                })
            }
            fn provider_name(&self) -> &'static str {
                "fixed"
            }
        }

        let judge =
            SemanticJudge::new(JudgeRuntimeConfig::default(), Arc::new(Fixed("0.95")), None);
        let m = AccuracyMetric::new(
            AccuracyConfig {
                threshold: 0.9,
                strict_matching: false,
                use_judge: true,
            },
            Some(Arc::new(judge)),
        )
        .unwrap();

        // deterministic score is ~0 here; judge lifts it to 0.95
        let r = m.measure(&case("1/2", "0.5")).await;
        assert_eq!(r.score, 0.95);
        assert!(r.passed);

        // judge replying lower than the deterministic floor changes nothing
        let low = SemanticJudge::new(JudgeRuntimeConfig::default(), Arc::new(Fixed("0.1")), None);
        let m = AccuracyMetric::new(
            AccuracyConfig {
                threshold: 0.9,
                strict_matching: false,
                use_judge: true,
            },
            Some(Arc::new(low)),
        )
        .unwrap();
        let r = m.measure(&case("total 100", "answer 103")).await;
        assert!(r.score >= 0.8 - 1e-9, "got {}", r.score);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let res = AccuracyMetric::new(
            AccuracyConfig {
                threshold: 1.5,
                strict_matching: false,
                use_judge: false,
            },
            None,
        );
        assert!(res.is_err());
    }
}
