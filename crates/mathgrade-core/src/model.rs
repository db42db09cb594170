use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    pub version: u32,
    pub suite: String,
    #[serde(default)]
    pub settings: Settings,
    pub cases: Vec<EvalCase>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub parallel: Option<usize>,
    pub judge_timeout_seconds: Option<u64>,
    pub strict_matching: Option<bool>,
    pub accuracy_threshold: Option<f64>,
    pub completeness_threshold: Option<f64>,
    pub confidence_threshold: Option<f64>,
}

/// One corpus item: a reference answer paired with the raw solver output
/// captured for it. Owned by the runner; metrics only borrow it for the
/// duration of a `measure` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    pub id: String,
    pub expected: String,
    pub actual: String,
    #[serde(default)]
    pub context: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Pass,
    Fail,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResultRow {
    pub case_id: String,
    pub status: CaseStatus,
    pub score: Option<f64>,
    pub message: String,
    pub expected: String,
    pub actual: String,
    #[serde(default)]
    pub details: serde_json::Value,
    pub duration_ms: Option<u64>,
}
