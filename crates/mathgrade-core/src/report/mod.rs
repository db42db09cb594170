use crate::model::{CaseResultRow, CaseStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod console;
pub mod csv;
pub mod json;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunArtifacts {
    pub suite: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub summary: RunSummary,
    pub results: Vec<CaseResultRow>,
}

/// Aggregate statistics over a run, computed from the result rows, not
/// by the metrics themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_cases: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub exact_matches: usize,
    pub partial_matches: usize,
    pub no_matches: usize,
    pub exact_accuracy: f64,
    pub partial_accuracy: f64,
    pub average_answer_length: f64,
    pub average_expected_length: f64,
}

pub fn summarize(rows: &[CaseResultRow]) -> RunSummary {
    let total = rows.len();

    let mut passed = 0;
    let mut failed = 0;
    let mut errored = 0;
    let mut exact = 0;
    let mut partial = 0;
    let mut answer_len_sum = 0usize;
    let mut expected_len_sum = 0usize;

    for row in rows {
        match row.status {
            CaseStatus::Pass => passed += 1,
            CaseStatus::Fail => failed += 1,
            CaseStatus::Error => errored += 1,
        }

        let expected = row.expected.trim().to_lowercase();
        let actual = row.actual.trim().to_lowercase();
        answer_len_sum += actual.len();
        expected_len_sum += expected.len();

        if expected == actual {
            exact += 1;
        } else if (!expected.is_empty() && actual.contains(&expected))
            || (!actual.is_empty() && expected.contains(&actual))
            || numerically_equivalent(&expected, &actual)
        {
            partial += 1;
        }
    }

    let pct = |n: usize| {
        if total == 0 {
            0.0
        } else {
            n as f64 / total as f64 * 100.0
        }
    };
    let avg = |sum: usize| {
        if total == 0 {
            0.0
        } else {
            sum as f64 / total as f64
        }
    };

    RunSummary {
        total_cases: total,
        passed,
        failed,
        errored,
        exact_matches: exact,
        partial_matches: partial,
        no_matches: total - exact - partial,
        exact_accuracy: pct(exact),
        partial_accuracy: pct(exact + partial),
        average_answer_length: avg(answer_len_sum),
        average_expected_length: avg(expected_len_sum),
    }
}

fn numerically_equivalent(expected: &str, actual: &str) -> bool {
    match (
        crate::similarity::first_numeral(expected),
        crate::similarity::first_numeral(actual),
    ) {
        (Some(a), Some(b)) => (a - b).abs() < 0.01,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, status: CaseStatus, expected: &str, actual: &str) -> CaseResultRow {
        CaseResultRow {
            case_id: id.into(),
            status,
            score: Some(1.0),
            message: "ok".into(),
            expected: expected.into(),
            actual: actual.into(),
            details: serde_json::json!({}),
            duration_ms: Some(1),
        }
    }

    #[test]
    fn counts_exact_partial_and_miss() {
        let rows = vec![
            row("a", CaseStatus::Pass, "4", "4"),
            row("b", CaseStatus::Pass, "90 degrees", "it is 90 degrees"),
            row("c", CaseStatus::Fail, "12", "12.005 roughly"),
            row("d", CaseStatus::Fail, "blue", "seven"),
        ];
        let s = summarize(&rows);
        assert_eq!(s.total_cases, 4);
        assert_eq!(s.exact_matches, 1);
        assert_eq!(s.partial_matches, 2);
        assert_eq!(s.no_matches, 1);
        assert_eq!(s.exact_accuracy, 25.0);
        assert_eq!(s.partial_accuracy, 75.0);
        assert_eq!(s.passed, 2);
        assert_eq!(s.failed, 2);
    }

    #[test]
    fn empty_run() {
        let s = summarize(&[]);
        assert_eq!(s.total_cases, 0);
        assert_eq!(s.exact_accuracy, 0.0);
    }
}
