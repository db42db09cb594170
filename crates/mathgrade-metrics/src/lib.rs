use std::sync::Arc;

use mathgrade_core::judge::SemanticJudge;
use mathgrade_core::metrics_api::Metric;
use mathgrade_core::model::Settings;

pub mod accuracy;
pub mod completeness;
pub mod confidence;

pub use accuracy::{AccuracyConfig, AccuracyMetric};
pub use completeness::CompletenessMetric;
pub use confidence::ConfidenceMetric;

/// Standard metric set, thresholds taken from suite settings where
/// given. Accuracy runs first so its score becomes the row score.
pub fn default_metrics(
    settings: &Settings,
    judge: Option<Arc<SemanticJudge>>,
) -> anyhow::Result<Vec<Arc<dyn Metric>>> {
    let accuracy_cfg = AccuracyConfig {
        threshold: settings.accuracy_threshold.unwrap_or(0.9),
        strict_matching: settings.strict_matching.unwrap_or(false),
        use_judge: judge.is_some(),
    };
    Ok(vec![
        Arc::new(AccuracyMetric::new(accuracy_cfg, judge)?),
        Arc::new(CompletenessMetric::new(
            settings.completeness_threshold.unwrap_or(0.7),
        )?),
        Arc::new(ConfidenceMetric::new(
            settings.confidence_threshold.unwrap_or(0.7),
        )?),
    ])
}
