use sqlx::{Row, SqlitePool};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

// Process-wide high score. The database is an upgrade, not a requirement:
// when it is missing or failing, the cached value keeps the game honest for
// the lifetime of the process.
#[derive(Clone)]
pub struct HighScoreStore {
    db: Option<SqlitePool>,
    cached: Arc<AtomicI64>,
}

impl HighScoreStore {
    pub async fn open(db: Option<SqlitePool>) -> Self {
        let initial = match &db {
            Some(pool) => match load_high_score(pool).await {
                Ok(value) => value,
                Err(error) => {
                    tracing::warn!(%error, "failed to load high score, starting from zero");
                    0
                }
            },
            None => 0,
        };
        Self {
            db,
            cached: Arc::new(AtomicI64::new(initial)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            db: None,
            cached: Arc::new(AtomicI64::new(0)),
        }
    }

    pub fn current(&self) -> i64 {
        self.cached.load(Ordering::SeqCst)
    }

    // True iff `score` strictly beats the cached high. The write-back is
    // fire and forget; a failed write downgrades to in-memory behavior.
    pub fn record(&self, score: i64) -> bool {
        let previous = self.cached.fetch_max(score, Ordering::SeqCst);
        if score <= previous {
            return false;
        }
        if let Some(pool) = self.db.clone() {
            tokio::spawn(async move {
                if let Err(error) = persist_high_score(&pool, score).await {
                    tracing::warn!(%error, "failed to persist high score");
                }
            });
        }
        true
    }
}

pub(crate) async fn load_high_score(pool: &SqlitePool) -> sqlx::Result<i64> {
    let row = sqlx::query("SELECT score FROM high_scores WHERE id = 0")
        .fetch_optional(pool)
        .await?;
    Ok(row.and_then(|row| row.try_get("score").ok()).unwrap_or(0))
}

pub(crate) async fn persist_high_score(pool: &SqlitePool, score: i64) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO high_scores (id, score, updated_at) VALUES (0, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET score = excluded.score, updated_at = excluded.updated_at",
    )
    .bind(score)
    .bind(current_time_millis())
    .execute(pool)
    .await?;
    Ok(())
}

fn current_time_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
