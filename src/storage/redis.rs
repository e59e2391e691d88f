// src/storage/redis.rs

use crate::error::{AppError, Result};
use crate::storage::records::validate_target_url;
use crate::storage::{CheckRecord, HistoryStore, Site, SiteStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_redis::{Connection as RedisConnection, Pool};
use redis::AsyncCommands;
use std::collections::HashMap;
use tracing::{info, trace};

const SITE_COUNTER_KEY: &str = "sites:next_id";
const SITE_INDEX_KEY: &str = "sites:index";

/// Redis implementation of the site registry and check history.
///
/// Layout: `site:{id}` hashes hold the site fields, `sites:index` is a list
/// of ids in registration order, and `history:{id}` is a list of JSON check
/// records with the most recent at the head. Ids come from `INCR`, appends
/// are single `LPUSH` commands; both are atomic on the server, so no
/// client-side locking is needed.
pub struct RedisStore {
    pool: Pool,
    key_prefix: String,
}

impl RedisStore {
    pub async fn new(pool: Pool, key_prefix: Option<String>) -> Result<Self> {
        let key_prefix = key_prefix.unwrap_or_else(|| "statuspulse:".to_string());

        // Fail fast if the server is unreachable.
        let mut conn = pool.get().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        info!("Connected to Redis, persistence enabled.");

        Ok(Self { pool, key_prefix })
    }

    fn prefix_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    fn site_key(&self, id: u64) -> String {
        self.prefix_key(&format!("site:{id}"))
    }

    fn history_key(&self, site_id: u64) -> String {
        self.prefix_key(&format!("history:{site_id}"))
    }

    async fn get_connection(&self) -> Result<RedisConnection> {
        self.pool.get().await.map_err(Into::into)
    }

    async fn site_exists(&self, conn: &mut RedisConnection, id: u64) -> Result<bool> {
        let exists: bool = conn.exists(self.site_key(id)).await?;
        Ok(exists)
    }

    fn parse_site(&self, id: u64, fields: HashMap<String, String>) -> Result<Site> {
        let url = fields
            .get("url")
            .cloned()
            .ok_or_else(|| AppError::Serialization {
                message: format!("site {id} hash is missing the url field"),
            })?;

        let created_at = fields
            .get("created_at")
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| AppError::Serialization {
                message: format!("site {id} hash has a malformed created_at field"),
            })?;

        Ok(Site { id, url, created_at })
    }
}

#[async_trait]
impl SiteStore for RedisStore {
    async fn register(&self, url: &str) -> Result<Site> {
        validate_target_url(url)?;

        trace!("RedisStore::register: start");
        let mut conn = self.get_connection().await?;
        let id: u64 = conn.incr(self.prefix_key(SITE_COUNTER_KEY), 1).await?;
        let created_at = Utc::now();

        let mut pipe = redis::pipe();
        pipe.atomic();
        pipe.hset_multiple(
            self.site_key(id),
            &[
                ("url", url.to_string()),
                ("created_at", created_at.to_rfc3339()),
            ],
        );
        pipe.rpush(self.prefix_key(SITE_INDEX_KEY), id);
        let _: () = pipe.query_async(&mut conn).await?;

        trace!("RedisStore::register: stored site {}", id);
        Ok(Site {
            id,
            url: url.to_string(),
            created_at,
        })
    }

    async fn list(&self) -> Result<Vec<Site>> {
        trace!("RedisStore::list: start");
        let mut conn = self.get_connection().await?;
        let ids: Vec<u64> = conn.lrange(self.prefix_key(SITE_INDEX_KEY), 0, -1).await?;

        let mut sites = Vec::with_capacity(ids.len());
        for id in ids {
            let fields: HashMap<String, String> = conn.hgetall(self.site_key(id)).await?;
            if fields.is_empty() {
                // Indexed but missing hash; skip rather than fail the listing.
                continue;
            }
            sites.push(self.parse_site(id, fields)?);
        }
        Ok(sites)
    }

    async fn get(&self, id: u64) -> Result<Site> {
        let mut conn = self.get_connection().await?;
        let fields: HashMap<String, String> = conn.hgetall(self.site_key(id)).await?;
        if fields.is_empty() {
            return Err(AppError::SiteNotFound { id });
        }
        self.parse_site(id, fields)
    }
}

#[async_trait]
impl HistoryStore for RedisStore {
    async fn append(&self, record: CheckRecord) -> Result<()> {
        let mut conn = self.get_connection().await?;
        if !self.site_exists(&mut conn, record.site_id).await? {
            return Err(AppError::SiteNotFound { id: record.site_id });
        }

        let payload = serde_json::to_string(&record).map_err(|e| AppError::Serialization {
            message: format!("failed to encode check record: {e}"),
        })?;

        let _: () = conn.lpush(self.history_key(record.site_id), payload).await?;
        trace!("RedisStore::append: recorded check for site {}", record.site_id);
        Ok(())
    }

    async fn list(&self, site_id: u64, limit: Option<usize>) -> Result<Vec<CheckRecord>> {
        let mut conn = self.get_connection().await?;
        if !self.site_exists(&mut conn, site_id).await? {
            return Err(AppError::SiteNotFound { id: site_id });
        }

        // LPUSH keeps the most recent record at index 0.
        let stop = match limit {
            Some(0) => return Ok(Vec::new()),
            Some(limit) => limit as isize - 1,
            None => -1,
        };
        let payloads: Vec<String> = conn.lrange(self.history_key(site_id), 0, stop).await?;

        payloads
            .iter()
            .map(|payload| {
                serde_json::from_str(payload).map_err(|e| AppError::Serialization {
                    message: format!("failed to decode check record: {e}"),
                })
            })
            .collect()
    }
}
