use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tokio::sync::RwLock;

use crate::config::{Config, HistoryBackend};
use crate::metrics::track_store_operation;
use crate::models::AttemptLog;
use crate::utils::retry::{retry_async_with_config, RetryConfig};

/// Key-value store the attempt history is written to as a single value.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: &str) -> Result<()>;
    async fn ping(&self) -> Result<()>;
    fn backend(&self) -> &'static str;
}

pub struct RedisHistoryStore {
    redis: ConnectionManager,
}

impl RedisHistoryStore {
    pub async fn connect(uri: &str) -> Result<Self> {
        let client = redis::Client::open(uri).context("Failed to create Redis client")?;

        tracing::info!("Attempting to connect to Redis...");

        let redis = retry_async_with_config(RetryConfig::aggressive(), || {
            let client = client.clone();
            async move { ConnectionManager::new(client).await }
        })
        .await
        .context("Failed to connect to Redis")?;

        let store = Self { redis };
        store.ping().await?;

        tracing::info!("Redis connection established successfully");
        Ok(store)
    }
}

#[async_trait]
impl HistoryStore for RedisHistoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.redis.clone();
        track_store_operation("get", async {
            redis::cmd("GET")
                .arg(key)
                .query_async::<Option<String>>(&mut conn)
                .await
                .context("Failed to read history from Redis")
        })
        .await
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.redis.clone();
        track_store_operation("set", async {
            redis::cmd("SET")
                .arg(key)
                .arg(value)
                .query_async::<()>(&mut conn)
                .await
                .context("Failed to write history to Redis")
        })
        .await
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.redis.clone();
        tokio::time::timeout(
            std::time::Duration::from_secs(5),
            redis::cmd("PING").query_async::<String>(&mut conn),
        )
        .await
        .map_err(|_| anyhow::anyhow!("Redis PING timeout after 5s"))??;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

/// Process-local store; history is gone when the process exits.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        track_store_operation("get", async {
            Ok(self.entries.read().await.get(key).cloned())
        })
        .await
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        track_store_operation("set", async {
            self.entries
                .write()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        })
        .await
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

pub async fn connect_store(config: &Config) -> Result<Arc<dyn HistoryStore>> {
    match config.history_backend {
        HistoryBackend::Redis => {
            let store = RedisHistoryStore::connect(&config.redis_uri).await?;
            Ok(Arc::new(store))
        }
        HistoryBackend::Memory => {
            tracing::warn!("Using in-memory history store; attempts are lost on restart");
            Ok(Arc::new(InMemoryHistoryStore::new()))
        }
    }
}

/// Reads and writes the whole attempt log under one key.
pub struct HistoryService {
    store: Arc<dyn HistoryStore>,
    key: String,
}

impl HistoryService {
    pub fn new(store: Arc<dyn HistoryStore>, key: String) -> Self {
        Self { store, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &Arc<dyn HistoryStore> {
        &self.store
    }

    /// A missing key yields an empty log, and so does an unparseable value
    /// (logged, not surfaced). Store failures are returned.
    pub async fn load(&self) -> Result<AttemptLog> {
        let raw = self.store.get(&self.key).await?;

        let Some(raw) = raw else {
            tracing::debug!("No stored history under key={}", self.key);
            return Ok(AttemptLog::new());
        };

        match AttemptLog::from_json(&raw) {
            Ok(log) => {
                tracing::info!("Restored {} attempts from key={}", log.len(), self.key);
                Ok(log)
            }
            Err(e) => {
                tracing::error!("Failed to parse history under key={}: {}", self.key, e);
                Ok(AttemptLog::new())
            }
        }
    }

    /// Replaces the stored value with the full log.
    pub async fn save(&self, log: &AttemptLog) -> Result<()> {
        let raw = log.to_json().context("Failed to serialize history")?;
        self.store.put(&self.key, &raw).await?;
        tracing::debug!("Saved {} attempts under key={}", log.len(), self.key);
        Ok(())
    }
}
