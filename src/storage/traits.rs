// src/storage/traits.rs

use crate::error::Result;
use crate::storage::{CheckRecord, Site};
use async_trait::async_trait;

/// Trait for site registry operations.
///
/// Implementations must hand out unique ids under concurrent registration and
/// keep `list` in stable creation order (ascending id).
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Register a new site. Validates the URL (absolute, http/https) and
    /// assigns the next id. Duplicate URLs are allowed.
    async fn register(&self, url: &str) -> Result<Site>;

    /// All registered sites in creation order.
    async fn list(&self) -> Result<Vec<Site>>;

    /// Look up a site by id.
    async fn get(&self, id: u64) -> Result<Site>;
}

/// Trait for the append-only check history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append a check record. Fails if the referenced site does not exist.
    async fn append(&self, record: CheckRecord) -> Result<()>;

    /// Check records for a site, most recent first. Fails for an unknown
    /// site; a known site with no history yields an empty list. `limit`
    /// truncates to the most recent N records.
    async fn list(&self, site_id: u64, limit: Option<usize>) -> Result<Vec<CheckRecord>>;
}
