// src/storage/records.rs

use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A registered site under monitoring. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: u64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// One recorded probe result for a site. Append-only; never mutated.
///
/// `status_code` is `Some` whenever a response was received, regardless of
/// the online policy; it is `None` when the probe failed before a status
/// line arrived (connection refused, DNS failure, timeout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRecord {
    pub site_id: u64,
    pub online: bool,
    pub status_code: Option<u16>,
    pub response_time_ms: f64,
    pub checked_at: DateTime<Utc>,
}

/// Parse and validate a monitoring target URL.
///
/// Only absolute `http`/`https` URLs with a host are accepted. The caller
/// keeps the raw string for storage; the parsed form is what the prober
/// requests.
pub fn validate_target_url(raw: &str) -> Result<Url> {
    let parsed = Url::parse(raw)
        .map_err(|e| AppError::validation("url", format!("'{raw}' is not a valid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::validation(
                "url",
                format!("unsupported scheme '{scheme}', expected http or https"),
            ));
        }
    }

    if parsed.host_str().is_none() {
        return Err(AppError::validation("url", format!("'{raw}' has no host")));
    }

    Ok(parsed)
}
