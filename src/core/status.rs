// src/core/status.rs

use crate::core::prober::Prober;
use crate::error::Result;
use crate::storage::{CheckRecord, HistoryStore, Site, SiteStore};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Orchestrates an on-demand check: resolve the site, probe it, persist the
/// result, hand it back. One call, one probe, one history entry - and no
/// entry at all when the site lookup fails.
#[derive(Clone)]
pub struct StatusService {
    sites: Arc<dyn SiteStore>,
    history: Arc<dyn HistoryStore>,
    prober: Arc<Prober>,
}

impl StatusService {
    pub fn new(
        sites: Arc<dyn SiteStore>,
        history: Arc<dyn HistoryStore>,
        prober: Arc<Prober>,
    ) -> Self {
        Self {
            sites,
            history,
            prober,
        }
    }

    pub async fn check(&self, site_id: u64) -> Result<(Site, CheckRecord)> {
        let site = self.sites.get(site_id).await?;
        let outcome = self.prober.probe(&site.url).await?;

        let record = CheckRecord {
            site_id: site.id,
            online: outcome.online,
            status_code: outcome.status_code,
            response_time_ms: outcome.response_time_ms,
            checked_at: Utc::now(),
        };
        self.history.append(record.clone()).await?;

        info!(
            site.id = site.id,
            site.url = %site.url,
            check.online = record.online,
            check.status_code = record.status_code,
            check.response_time_ms = record.response_time_ms,
            "Check completed"
        );
        Ok((site, record))
    }
}
