pub const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS judge_cache (
  key TEXT PRIMARY KEY,
  provider TEXT NOT NULL,
  model TEXT NOT NULL,
  score REAL NOT NULL,
  created_at TEXT NOT NULL
);
"#;
