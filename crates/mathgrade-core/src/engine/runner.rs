use crate::metrics_api::Metric;
use crate::model::{CaseResultRow, CaseStatus, EvalCase, EvalConfig};
use crate::report::RunArtifacts;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Batch driver: applies every metric to every case, up to `parallel`
/// cases in flight at once. Cases are independent, so no ordering or
/// shared state exists between them; a case that errors (task panic)
/// degrades to an Error row and never discards the rows already
/// completed.
pub struct Runner {
    pub metrics: Vec<Arc<dyn Metric>>,
}

impl Runner {
    pub async fn run_suite(&self, cfg: &EvalConfig) -> anyhow::Result<RunArtifacts> {
        let started_at = chrono::Utc::now();
        let parallel = cfg.settings.parallel.unwrap_or(4).max(1);
        let sem = Arc::new(Semaphore::new(parallel));
        let mut handles = Vec::new();

        for case in cfg.cases.iter() {
            let permit = sem.clone().acquire_owned().await?;
            let metrics = self.metrics.clone();
            let case = case.clone();
            let case_id = case.id.clone();
            let h = tokio::spawn(async move {
                let _permit = permit;
                run_case(&metrics, &case).await
            });
            handles.push((case_id, h));
        }

        let mut rows = Vec::new();
        for (case_id, h) in handles {
            let row = match h.await {
                Ok(row) => row,
                Err(e) => CaseResultRow {
                    case_id,
                    status: CaseStatus::Error,
                    score: None,
                    message: format!("join error: {}", e),
                    expected: String::new(),
                    actual: String::new(),
                    details: serde_json::json!({}),
                    duration_ms: None,
                },
            };
            rows.push(row);
        }

        let finished_at = chrono::Utc::now();
        Ok(RunArtifacts {
            suite: cfg.suite.clone(),
            started_at,
            finished_at,
            summary: crate::report::summarize(&rows),
            results: rows,
        })
    }
}

async fn run_case(metrics: &[Arc<dyn Metric>], case: &EvalCase) -> CaseResultRow {
    let start = std::time::Instant::now();

    let mut details = serde_json::json!({ "metrics": {} });
    let mut failed: Vec<&'static str> = Vec::new();
    let mut score: Option<f64> = None;

    for m in metrics {
        let r = m.measure(case).await;
        details["metrics"][m.name()] = serde_json::json!({
            "score": r.score, "passed": r.passed, "reason": r.reason
        });
        // the row score is the first metric's (accuracy when using the
        // default metric set)
        if score.is_none() {
            score = Some(r.score);
        }
        if !r.passed {
            failed.push(m.name());
        }
    }

    let status = if failed.is_empty() {
        CaseStatus::Pass
    } else {
        CaseStatus::Fail
    };
    let message = if failed.is_empty() {
        "ok".to_string()
    } else {
        format!("failed: {}", failed.join(", "))
    };

    CaseResultRow {
        case_id: case.id.clone(),
        status,
        score,
        message,
        expected: case.expected.clone(),
        actual: case.actual.clone(),
        details,
        duration_ms: Some(start.elapsed().as_millis() as u64),
    }
}
