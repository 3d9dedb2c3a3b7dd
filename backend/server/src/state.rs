use std::sync::Arc;

use tracing::info;

use super::{
    config::{Config, StoreKind},
    database::{ContactStore, MemoryStore, RedisStore, StoreError},
};

pub struct AppState {
    pub store: Arc<dyn ContactStore>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Arc<Self>, StoreError> {
        let store: Arc<dyn ContactStore> = match config.store {
            StoreKind::Redis => {
                let store = RedisStore::open(&config.redis_url, &config.key_prefix)?;
                store.connect_in_background();
                Arc::new(store)
            }
            StoreKind::Memory => {
                info!("Using in-memory contact store, submissions will not survive a restart");
                Arc::new(MemoryStore::default())
            }
        };

        Ok(Self::with_store(store))
    }

    pub fn with_store(store: Arc<dyn ContactStore>) -> Arc<Self> {
        Arc::new(Self { store })
    }
}
