use crate::storage::Store;
use rusqlite::params;

/// Persisted semantic-judge scores, keyed by a hash of the judge
/// configuration and both answer strings. Lets repeated runs over the
/// same corpus skip live model calls.
#[derive(Clone)]
pub struct JudgeCache {
    store: Store,
}

impl JudgeCache {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn get(&self, key: &str) -> anyhow::Result<Option<f64>> {
        let conn = self.store.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT score FROM judge_cache WHERE key=?1")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    pub fn put(&self, key: &str, provider: &str, model: &str, score: f64) -> anyhow::Result<()> {
        let conn = self.store.conn.lock().unwrap();
        let created_at = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO judge_cache(key, provider, model, score, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(key) DO UPDATE SET
                score=excluded.score,
                created_at=excluded.created_at",
            params![key, provider, model, score, created_at],
        )?;
        Ok(())
    }
}
