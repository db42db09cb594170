use crate::model::EvalCase;
use async_trait::async_trait;

/// Outcome of one (metric, case) evaluation. `passed` always equals
/// `score >= threshold` for the metric that produced it.
#[derive(Debug, Clone)]
pub struct MetricResult {
    pub score: f64,
    pub passed: bool,
    pub reason: String,
}

#[async_trait]
pub trait Metric: Send + Sync {
    fn name(&self) -> &'static str;

    /// Score one case. Infallible by design: a metric that crashes the
    /// evaluation run is worse than one that reports a low score, so
    /// every internal failure degrades to a score instead of an error.
    async fn measure(&self, case: &EvalCase) -> MetricResult;
}
