// src/core/prober.rs

use crate::config::ProbeConfig;
use crate::error::{AppError, Result};
use crate::storage::records::validate_target_url;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// What counts as "online".
///
/// `Reachability` (the default) marks a site online as soon as any HTTP
/// response arrives, even a 500 - the server answered, so it is up.
/// `HttpSuccess` additionally requires a 2xx/3xx status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnlinePolicy {
    #[default]
    Reachability,
    HttpSuccess,
}

impl OnlinePolicy {
    fn is_online(self, status: reqwest::StatusCode) -> bool {
        match self {
            Self::Reachability => true,
            Self::HttpSuccess => status.is_success() || status.is_redirection(),
        }
    }
}

/// Outcome of a single liveness probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub online: bool,
    pub status_code: Option<u16>,
    pub response_time_ms: f64,
}

/// Performs HTTP liveness probes with a bounded timeout.
///
/// Network failures are never errors: connection refusals, DNS failures, TLS
/// failures and timeouts all come back as `online=false` outcomes with the
/// elapsed time. Only a malformed target URL is rejected, before any request
/// is issued.
pub struct Prober {
    client: Client,
    timeout: Duration,
    policy: OnlinePolicy,
}

impl Prober {
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let connect_timeout = Duration::from_secs(config.connect_timeout_secs).min(timeout);

        let mut builder = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let client = builder
            .build()
            .map_err(|e| AppError::internal(format!("failed to build probe HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout,
            policy: config.online_policy,
        })
    }

    /// Issue a single GET against `raw_url` and time it.
    pub async fn probe(&self, raw_url: &str) -> Result<ProbeOutcome> {
        let url = validate_target_url(raw_url)?;
        let timeout_ms = self.timeout.as_secs_f64() * 1000.0;

        let started = Instant::now();
        match self.client.get(url).send().await {
            Ok(response) => {
                let response_time_ms = started.elapsed().as_secs_f64() * 1000.0;
                let status = response.status();
                let online = self.policy.is_online(status);
                debug!(
                    probe.url = raw_url,
                    probe.status = status.as_u16(),
                    probe.online = online,
                    probe.response_time_ms = response_time_ms,
                    "Probe received a response"
                );
                Ok(ProbeOutcome {
                    online,
                    status_code: Some(status.as_u16()),
                    response_time_ms,
                })
            }
            Err(e) => {
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                // A timed-out probe reports exactly the timeout bound.
                let response_time_ms = if e.is_timeout() {
                    elapsed_ms.min(timeout_ms)
                } else {
                    elapsed_ms
                };
                debug!(
                    probe.url = raw_url,
                    probe.error = %e,
                    probe.timed_out = e.is_timeout(),
                    probe.response_time_ms = response_time_ms,
                    "Probe failed"
                );
                Ok(ProbeOutcome {
                    online: false,
                    status_code: None,
                    response_time_ms,
                })
            }
        }
    }
}
