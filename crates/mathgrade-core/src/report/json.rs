use crate::report::RunArtifacts;
use std::path::Path;

pub fn write_json(artifacts: &RunArtifacts, out: &Path) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(artifacts)?;
    std::fs::write(out, body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::summarize;

    #[test]
    fn writes_parseable_artifact() {
        let artifacts = RunArtifacts {
            suite: "demo".into(),
            started_at: chrono::Utc::now(),
            finished_at: chrono::Utc::now(),
            summary: summarize(&[]),
            results: vec![],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        write_json(&artifacts, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let back: RunArtifacts = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.suite, "demo");
    }
}
