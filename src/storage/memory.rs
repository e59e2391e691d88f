// src/storage/memory.rs

use crate::error::{AppError, Result};
use crate::storage::records::validate_target_url;
use crate::storage::{CheckRecord, HistoryStore, Site, SiteStore};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::trace;

/// In-memory implementation of the site registry and check history.
///
/// Id assignment is a single atomic counter, so concurrent registrations
/// never collide. History appends take the write lock, which serializes them
/// into a consistent total order per site.
pub struct InMemoryStore {
    sites: RwLock<BTreeMap<u64, Site>>,
    history: RwLock<HashMap<u64, Vec<CheckRecord>>>,
    next_id: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            sites: RwLock::new(BTreeMap::new()),
            history: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SiteStore for InMemoryStore {
    async fn register(&self, url: &str) -> Result<Site> {
        validate_target_url(url)?;

        let site = Site {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            url: url.to_string(),
            created_at: Utc::now(),
        };

        trace!("InMemoryStore::register: waiting for write lock");
        let mut sites_guard = self.sites.write().await;
        sites_guard.insert(site.id, site.clone());
        Ok(site)
    }

    async fn list(&self) -> Result<Vec<Site>> {
        let sites_guard = self.sites.read().await;
        // BTreeMap iterates in ascending id order, which is creation order.
        Ok(sites_guard.values().cloned().collect())
    }

    async fn get(&self, id: u64) -> Result<Site> {
        let sites_guard = self.sites.read().await;
        sites_guard
            .get(&id)
            .cloned()
            .ok_or(AppError::SiteNotFound { id })
    }
}

#[async_trait]
impl HistoryStore for InMemoryStore {
    async fn append(&self, record: CheckRecord) -> Result<()> {
        {
            let sites_guard = self.sites.read().await;
            if !sites_guard.contains_key(&record.site_id) {
                return Err(AppError::SiteNotFound { id: record.site_id });
            }
        }

        trace!("InMemoryStore::append: waiting for write lock");
        let mut history_guard = self.history.write().await;
        history_guard.entry(record.site_id).or_default().push(record);
        Ok(())
    }

    async fn list(&self, site_id: u64, limit: Option<usize>) -> Result<Vec<CheckRecord>> {
        {
            let sites_guard = self.sites.read().await;
            if !sites_guard.contains_key(&site_id) {
                return Err(AppError::SiteNotFound { id: site_id });
            }
        }

        let history_guard = self.history.read().await;
        let records = history_guard
            .get(&site_id)
            .map(|records| {
                let iter = records.iter().rev().cloned();
                match limit {
                    Some(limit) => iter.take(limit).collect(),
                    None => iter.collect(),
                }
            })
            .unwrap_or_default();
        Ok(records)
    }
}
