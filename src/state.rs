use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::store::{KeyValueStore, RedisStore};

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The key-value store backing notes and sessions.
    pub store: Arc<dyn KeyValueStore>,
    /// The application's configuration.
    pub config: Config,
}

impl AppState {
    /// Creates a new `AppState` connected to the configured Redis server.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let store = RedisStore::connect(&config.redis_url).await?;
        tracing::info!("✅ Redis key-value store connected");

        Ok(AppState {
            store: Arc::new(store),
            config: config.clone(),
        })
    }
}
