use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::info;

/// Remembers signup emails known to be taken so repeat attempts skip the
/// database. Only ever holds positives; a miss means "ask the database".
#[derive(Clone)]
pub struct EmailRegistry {
    taken: Cache<String, ()>,
}

impl Default for EmailRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailRegistry {
    pub fn new() -> Self {
        Self {
            taken: Cache::builder()
                .max_capacity(100_000)
                .time_to_live(Duration::from_secs(86400)) // 24h TTL
                .build(),
        }
    }

    pub async fn mark_taken(&self, email: &str) {
        self.taken.insert(email.to_lowercase(), ()).await;
    }

    pub async fn is_taken(&self, email: &str) -> bool {
        self.taken.get(&email.to_lowercase()).await.is_some()
    }

    /// Load every registered email, `batch_size` rows at a time.
    pub async fn warmup(&self, pool: &SqlitePool, batch_size: usize) -> Result<usize> {
        let mut stream = sqlx::query_as::<_, (String,)>("SELECT email FROM users").fetch(pool);

        let mut batch = Vec::with_capacity(batch_size);
        let mut total = 0usize;

        while let Some(row) = stream.next().await {
            let (email,) = row?;
            batch.push(email);
            total += 1;

            if batch.len() >= batch_size {
                self.mark_batch(&batch).await;
                batch.clear();
            }
        }

        if !batch.is_empty() {
            self.mark_batch(&batch).await;
        }

        info!(total, "Email cache warmup complete");
        Ok(total)
    }

    async fn mark_batch(&self, emails: &[String]) {
        let inserts: Vec<_> = emails.iter().map(|e| self.mark_taken(e)).collect();
        futures::future::join_all(inserts).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[actix_web::test]
    async fn lookups_ignore_case() {
        let registry = EmailRegistry::new();
        registry.mark_taken("Ravi@Vishakan.com").await;

        assert!(registry.is_taken("ravi@vishakan.com").await);
        assert!(!registry.is_taken("other@vishakan.com").await);
    }

    #[actix_web::test]
    async fn warmup_loads_existing_users() {
        let pool = test_pool().await;
        for i in 0..5 {
            sqlx::query(
                "INSERT INTO users (id, name, email, password_hash, role, created_at) \
                 VALUES (?, 'n', ?, 'h', 'Employee', '2026-01-01T00:00:00Z')",
            )
            .bind(format!("id-{}", i))
            .bind(format!("user{}@x.io", i))
            .execute(&pool)
            .await
            .unwrap();
        }

        let registry = EmailRegistry::new();
        let loaded = registry.warmup(&pool, 2).await.unwrap();

        assert_eq!(loaded, 5);
        assert!(registry.is_taken("user4@x.io").await);
    }
}
