use crate::model::{CaseResultRow, CaseStatus};
use std::path::Path;

/// Per-case summary table for spreadsheet analysis. Hand-rolled writer;
/// fields containing commas, quotes or newlines are quoted.
pub fn write_csv(results: &[CaseResultRow], out: &Path) -> anyhow::Result<()> {
    let mut body = String::new();
    body.push_str("case_id,status,score,expected,actual,answer_length,expected_length\n");

    for r in results {
        let status = match r.status {
            CaseStatus::Pass => "pass",
            CaseStatus::Fail => "fail",
            CaseStatus::Error => "error",
        };
        let score = r
            .score
            .map(|s| format!("{:.4}", s))
            .unwrap_or_default();
        body.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            escape(&r.case_id),
            status,
            score,
            escape(r.expected.trim()),
            escape(r.actual.trim()),
            r.actual.trim().len(),
            r.expected.trim().len(),
        ));
    }

    std::fs::write(out, body)?;
    Ok(())
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_fields_with_commas() {
        assert_eq!(escape("3, 4"), "\"3, 4\"");
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn writes_header_and_rows() {
        let rows = vec![CaseResultRow {
            case_id: "a".into(),
            status: CaseStatus::Pass,
            score: Some(1.0),
            message: "ok".into(),
            expected: "4".into(),
            actual: "4".into(),
            details: serde_json::json!({}),
            duration_ms: Some(1),
        }];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.csv");
        write_csv(&rows, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let mut lines = raw.lines();
        assert!(lines.next().unwrap().starts_with("case_id,"));
        assert_eq!(lines.next().unwrap(), "a,pass,1.0000,4,4,1,1");
    }
}
