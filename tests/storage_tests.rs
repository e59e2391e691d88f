//! Contract tests for the storage traits, run against the in-memory backend.
//! The Redis backend shares the contract; its tests need a live server and
//! are ignored by default (`cargo test -- --ignored` with TEST_REDIS_URL set).

use chrono::Utc;
use statuspulse::error::AppError;
use statuspulse::storage::{CheckRecord, HistoryStore, InMemoryStore, SiteStore};
use std::sync::Arc;

fn record(site_id: u64, online: bool, response_time_ms: f64) -> CheckRecord {
    CheckRecord {
        site_id,
        online,
        status_code: online.then_some(200),
        response_time_ms,
        checked_at: Utc::now(),
    }
}

async fn exercise_registry(store: Arc<dyn SiteStore>) {
    let first = store.register("https://one.example").await.unwrap();
    let second = store.register("https://two.example").await.unwrap();
    assert!(second.id > first.id);

    let err = store.register("not a url").await.unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, first.id);
    assert_eq!(listed[1].id, second.id);

    let fetched = store.get(first.id).await.unwrap();
    assert_eq!(fetched, first);

    let missing = store.get(first.id + 1000).await.unwrap_err();
    assert!(matches!(missing, AppError::SiteNotFound { .. }));
}

async fn exercise_history(store: Arc<dyn SiteStore>, history: Arc<dyn HistoryStore>) {
    let site = store.register("https://history.example").await.unwrap();

    // Known site, no checks yet.
    assert!(history.list(site.id, None).await.unwrap().is_empty());

    for i in 0..4 {
        history.append(record(site.id, i % 2 == 0, f64::from(i))).await.unwrap();
    }

    let full = history.list(site.id, None).await.unwrap();
    assert_eq!(full.len(), 4);
    let times: Vec<f64> = full.iter().map(|r| r.response_time_ms).collect();
    assert_eq!(times, vec![3.0, 2.0, 1.0, 0.0]);

    let limited = history.list(site.id, Some(2)).await.unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0], full[0]);
    assert_eq!(limited[1], full[1]);

    // Unknown site is an error, for appends and reads alike.
    let unknown = site.id + 1000;
    assert!(matches!(
        history.append(record(unknown, true, 1.0)).await.unwrap_err(),
        AppError::SiteNotFound { .. }
    ));
    assert!(matches!(
        history.list(unknown, None).await.unwrap_err(),
        AppError::SiteNotFound { .. }
    ));
}

#[tokio::test]
async fn in_memory_registry_contract() {
    exercise_registry(Arc::new(InMemoryStore::new())).await;
}

#[tokio::test]
async fn in_memory_history_contract() {
    let store = Arc::new(InMemoryStore::new());
    exercise_history(store.clone(), store).await;
}

#[cfg(feature = "redis")]
mod redis_backend {
    use super::*;
    use statuspulse::storage::RedisStore;

    async fn build_redis_store() -> Arc<RedisStore> {
        let url = std::env::var("TEST_REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379/15".to_string());
        let pool = deadpool_redis::Config::from_url(url)
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .expect("Failed to create redis pool");
        // Unique prefix keeps runs isolated on a shared test database.
        let prefix = format!("statuspulse_test:{}:", uuid::Uuid::new_v4());
        Arc::new(
            RedisStore::new(pool, Some(prefix))
                .await
                .expect("Failed to connect to test redis"),
        )
    }

    #[tokio::test]
    #[ignore = "requires a running redis server"]
    async fn redis_registry_contract() {
        exercise_registry(build_redis_store().await).await;
    }

    #[tokio::test]
    #[ignore = "requires a running redis server"]
    async fn redis_history_contract() {
        let store = build_redis_store().await;
        exercise_history(store.clone(), store).await;
    }
}
