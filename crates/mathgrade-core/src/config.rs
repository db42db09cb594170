use crate::errors::ConfigError;
use crate::model::EvalConfig;
use std::path::Path;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

pub fn load_config(path: &Path) -> Result<EvalConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    let cfg: EvalConfig = serde_yaml::from_str(&raw)
        .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;
    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError(format!(
            "unsupported config version {} (supported: {})",
            cfg.version, SUPPORTED_CONFIG_VERSION
        )));
    }
    if cfg.cases.is_empty() {
        return Err(ConfigError("config has no cases".into()));
    }
    if let Some(case) = cfg.cases.iter().find(|c| c.id.is_empty()) {
        return Err(ConfigError(format!(
            "case with empty id (expected: {:?})",
            case.expected
        )));
    }
    for (name, t) in [
        ("accuracy_threshold", cfg.settings.accuracy_threshold),
        ("completeness_threshold", cfg.settings.completeness_threshold),
        ("confidence_threshold", cfg.settings.confidence_threshold),
    ] {
        if let Some(t) = t {
            if !(0.0..=1.0).contains(&t) {
                return Err(ConfigError(format!(
                    "{} {} out of range [0, 1]",
                    name, t
                )));
            }
        }
    }
    Ok(cfg)
}

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, include_str!("../../../eval.yaml"))
        .map_err(|e| ConfigError(format!("failed to write sample config: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_valid_config() {
        let f = write_tmp(
            "version: 1\nsuite: demo\ncases:\n  - id: a\n    expected: \"4\"\n    actual: \"4\"\n",
        );
        let cfg = load_config(f.path()).unwrap();
        assert_eq!(cfg.suite, "demo");
        assert_eq!(cfg.cases.len(), 1);
    }

    #[test]
    fn rejects_wrong_version() {
        let f = write_tmp(
            "version: 2\nsuite: demo\ncases:\n  - id: a\n    expected: \"4\"\n    actual: \"4\"\n",
        );
        assert!(load_config(f.path()).is_err());
    }

    #[test]
    fn rejects_empty_cases() {
        let f = write_tmp("version: 1\nsuite: demo\ncases: []\n");
        assert!(load_config(f.path()).is_err());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let f = write_tmp(
            "version: 1\nsuite: demo\nsettings:\n  accuracy_threshold: 1.5\ncases:\n  - id: a\n    expected: \"4\"\n    actual: \"4\"\n",
        );
        assert!(load_config(f.path()).is_err());
    }

    #[test]
    fn sample_config_parses() {
        let f = write_tmp(include_str!("../../../eval.yaml"));
        let cfg = load_config(f.path()).unwrap();
        assert!(!cfg.cases.is_empty());
    }
}
