// src/state.rs

use crate::config::AppConfig;
use crate::core::{Prober, StatusService};
use crate::error::Result;
use crate::storage::{HistoryStore, InMemoryStore, SiteStore};
use std::sync::Arc;
use tracing::info;

/// Represents the shared application state that is accessible by all Axum
/// handlers: the validated configuration, the storage handles and the status
/// service that ties registry, prober and history together.
pub struct AppState {
    pub config: AppConfig,
    pub sites: Arc<dyn SiteStore>,
    pub history: Arc<dyn HistoryStore>,
    pub status: StatusService,
}

impl AppState {
    /// Creates a new `AppState`. Selects the storage backend (Redis when
    /// `redis_url` is configured, process memory otherwise), pre-builds the
    /// probe HTTP client, and wires up the status service.
    pub async fn new(config: &AppConfig) -> Result<Self> {
        info!("Creating shared AppState: initializing storage and probe client...");

        let (sites, history) = Self::build_storage(config).await?;
        let prober = Arc::new(Prober::new(&config.probe)?);
        let status = StatusService::new(sites.clone(), history.clone(), prober);

        Ok(Self {
            config: config.clone(),
            sites,
            history,
            status,
        })
    }

    #[cfg(feature = "redis")]
    async fn build_storage(
        config: &AppConfig,
    ) -> Result<(Arc<dyn SiteStore>, Arc<dyn HistoryStore>)> {
        use crate::storage::RedisStore;

        if let Some(redis_url) = &config.redis_url {
            let pool = deadpool_redis::Config::from_url(redis_url)
                .create_pool(Some(deadpool_redis::Runtime::Tokio1))?;
            let store = Arc::new(
                RedisStore::new(pool, config.redis_key_prefix.clone()).await?,
            );
            return Ok((store.clone(), store));
        }

        info!("No redis_url configured, using in-memory storage.");
        let store = Arc::new(InMemoryStore::new());
        Ok((store.clone(), store))
    }

    #[cfg(not(feature = "redis"))]
    async fn build_storage(
        config: &AppConfig,
    ) -> Result<(Arc<dyn SiteStore>, Arc<dyn HistoryStore>)> {
        use crate::error::AppError;

        if config.redis_url.is_some() {
            return Err(AppError::config_validation(
                "redis_url is set but this binary was built without the 'redis' feature",
                Some("redis_url"),
            ));
        }

        let store = Arc::new(InMemoryStore::new());
        Ok((store.clone(), store))
    }
}
