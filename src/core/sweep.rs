// src/core/sweep.rs

use crate::core::status::StatusService;
use crate::storage::SiteStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Spawns the background sweep: every `interval`, probe each registered site
/// through the same pipeline as an on-demand check. Per-site failures are
/// logged and the loop keeps going.
pub fn spawn_sweeper(
    sites: Arc<dyn SiteStore>,
    status: StatusService,
    interval: Duration,
) -> JoinHandle<()> {
    info!(sweep.interval = ?interval, "Starting background sweep");
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        // The first tick completes immediately; skip it so the first sweep
        // waits a full interval.
        timer.tick().await;
        loop {
            timer.tick().await;
            run_sweep(&sites, &status).await;
        }
    })
}

async fn run_sweep(sites: &Arc<dyn SiteStore>, status: &StatusService) {
    let listed = match sites.list().await {
        Ok(listed) => listed,
        Err(e) => {
            error!(error = %e, "Sweep could not list sites, skipping this cycle");
            return;
        }
    };

    info!(sweep.site_count = listed.len(), "Sweeping registered sites");
    for site in listed {
        if let Err(e) = status.check(site.id).await {
            // A site can disappear between list and check only if storage
            // misbehaves; either way the sweep moves on.
            warn!(site.id = site.id, error = %e, "Sweep check failed");
        }
    }
}
