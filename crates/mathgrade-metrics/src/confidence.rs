use async_trait::async_trait;
use mathgrade_core::metrics_api::{Metric, MetricResult};
use mathgrade_core::model::EvalCase;
use regex::Regex;

const CONFIDENCE_PATTERNS: &[&str] = &[
    r"confidence\s*:?\s*(\d+(?:\.\d+)?)",
    r"(\d+(?:\.\d+)?)\s*%?\s*confident",
    r"certainty\s*:?\s*(\d+(?:\.\d+)?)",
];

/// Self-reported confidence check. Any stated confidence earns a +0.2
/// bonus on top of the stated value (capped at 1.0); this rewards
/// self-reporting, it is not a calibration check. Absent confidence
/// defaults to 0.5.
pub struct ConfidenceMetric {
    threshold: f64,
}

impl ConfidenceMetric {
    pub fn new(threshold: f64) -> anyhow::Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!(
                "config error: confidence threshold {} out of range [0, 1]",
                threshold
            );
        }
        Ok(Self { threshold })
    }
}

#[async_trait]
impl Metric for ConfidenceMetric {
    fn name(&self) -> &'static str {
        "confidence"
    }

    async fn measure(&self, case: &EvalCase) -> MetricResult {
        let (score, reason) = match extract_confidence(&case.actual) {
            None => (0.5, "No confidence score provided".to_string()),
            Some(confidence) => (
                (confidence + 0.2).min(1.0),
                format!("Confidence score provided: {}", confidence),
            ),
        };

        MetricResult {
            score,
            passed: score >= self.threshold,
            reason,
        }
    }
}

/// Values above 1 are read as percentages.
fn extract_confidence(text: &str) -> Option<f64> {
    let text = text.to_lowercase();
    for pattern in CONFIDENCE_PATTERNS {
        let re = Regex::new(pattern).unwrap();
        if let Some(caps) = re.captures(&text) {
            if let Ok(mut value) = caps[1].parse::<f64>() {
                if value > 1.0 {
                    value /= 100.0;
                }
                return Some(value);
            }
        }
    }
    None
}
