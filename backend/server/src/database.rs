//! # Contact Store
//!
//! Where accepted submissions end up.
//!
//! ## Redis
//!
//! - One hash per submission at `<prefix>:<id>`: `name`, `email`, `phone`, `created_at` (RFC 3339)
//! - Every id is appended to the `<prefix>:index` list so operators can walk submissions in arrival order
//! - Both writes go out in one atomic pipeline
//! - No TTL, retention is handled outside this service
//!
//! ## Startup
//!
//! The process makes one connection attempt in the background and keeps serving meanwhile.
//! A save that lands before the connection exists fails with [`StoreError::NotConnected`],
//! which the endpoint reports as a server error. Once connected, the connection manager
//! reconnects on its own.
use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use chrono::Utc;
use contact::{ContactSubmission, NewContact};
use redis::{
    Client, RedisError,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use thiserror::Error;
use tokio::{sync::OnceCell, task::JoinHandle};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store is not connected")]
    NotConnected,

    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Persists one submission, assigning its id and creation time.
    async fn save(&self, contact: NewContact) -> Result<ContactSubmission, StoreError>;
}

pub struct RedisStore {
    client: Client,
    connection: Arc<OnceCell<ConnectionManager>>,
    prefix: String,
}

impl RedisStore {
    pub fn open(redis_url: &str, prefix: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::open(redis_url)?,
            connection: Arc::new(OnceCell::new()),
            prefix: prefix.to_string(),
        })
    }

    pub fn connect_in_background(&self) -> JoinHandle<()> {
        let client = self.client.clone();
        let connection = self.connection.clone();

        tokio::spawn(async move {
            match init_redis(&client).await {
                Ok(manager) => {
                    let _ = connection.set(manager);
                    info!("Connected to Redis");
                }
                Err(e) => error!("Redis connection error: {e}"),
            }
        })
    }

    pub fn is_connected(&self) -> bool {
        self.connection.initialized()
    }
}

#[async_trait]
impl ContactStore for RedisStore {
    async fn save(&self, contact: NewContact) -> Result<ContactSubmission, StoreError> {
        let mut connection = self
            .connection
            .get()
            .cloned()
            .ok_or(StoreError::NotConnected)?;

        let submission = contact.into_submission(Uuid::new_v4().to_string(), Utc::now());
        let created_at = submission.created_at.to_rfc3339();

        redis::pipe()
            .atomic()
            .hset_multiple(
                submission_key(&self.prefix, &submission.id),
                &[
                    ("name", submission.name.as_str()),
                    ("email", submission.email.as_str()),
                    ("phone", submission.phone.as_str()),
                    ("created_at", created_at.as_str()),
                ],
            )
            .ignore()
            .rpush(index_key(&self.prefix), &submission.id)
            .ignore()
            .query_async::<()>(&mut connection)
            .await?;

        Ok(submission)
    }
}

async fn init_redis(client: &Client) -> Result<ConnectionManager, RedisError> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    client.get_connection_manager_with_config(config).await
}

pub fn submission_key(prefix: &str, id: &str) -> String {
    format!("{prefix}:{id}")
}

pub fn index_key(prefix: &str) -> String {
    format!("{prefix}:index")
}

/// Keeps submissions in process memory. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    submissions: Mutex<Vec<ContactSubmission>>,
}

impl MemoryStore {
    pub fn submissions(&self) -> Vec<ContactSubmission> {
        self.submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn save(&self, contact: NewContact) -> Result<ContactSubmission, StoreError> {
        let submission = contact.into_submission(Uuid::new_v4().to_string(), Utc::now());

        self.submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(submission.clone());

        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> NewContact {
        NewContact {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "+1 555-0100".to_string(),
        }
    }

    #[test]
    fn test_keys() {
        assert_eq!(submission_key("contact", "abc"), "contact:abc");
        assert_eq!(index_key("contact"), "contact:index");
    }

    #[tokio::test]
    async fn test_memory_store_assigns_distinct_ids() {
        let store = MemoryStore::default();

        let first = store.save(jane()).await.unwrap();
        let second = store.save(jane()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.submissions(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_redis_store_before_connection() {
        let store = RedisStore::open("redis://127.0.0.1:1", "contact").unwrap();

        assert!(!store.is_connected());
        assert!(matches!(
            store.save(jane()).await,
            Err(StoreError::NotConnected)
        ));
    }

    #[test]
    fn test_redis_store_rejects_bad_url() {
        assert!(matches!(
            RedisStore::open("not a url", "contact"),
            Err(StoreError::Redis(_))
        ));
    }
}
