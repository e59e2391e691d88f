// src/config/app.rs

use crate::core::prober::OnlinePolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone, PartialEq, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Probe behavior. The timeout bounds every probe attempt; a probe that
/// exceeds it is reported as offline with its elapsed time capped at the
/// timeout value.
#[derive(Debug, Deserialize, Clone, PartialEq, Serialize)]
pub struct ProbeConfig {
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// What counts as "online": any response at all (`reachability`, the
    /// default) or only 2xx/3xx responses (`http_success`).
    #[serde(default)]
    pub online_policy: OnlinePolicy,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_probe_timeout_ms(),
            connect_timeout_secs: default_connect_timeout_secs(),
            online_policy: OnlinePolicy::default(),
            user_agent: None,
        }
    }
}

/// Optional background sweep that probes every registered site on a fixed
/// interval. Off by default; on-demand checks are the primary mode.
#[derive(Debug, Deserialize, Clone, PartialEq, Serialize)]
pub struct SweepConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_sweep_interval_secs")]
    pub interval_secs: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: default_sweep_interval_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    /// When set (and the `redis` feature is enabled), sites and check history
    /// persist in Redis instead of process memory.
    #[serde(default)]
    pub redis_url: Option<String>,
    #[serde(default)]
    pub redis_key_prefix: Option<String>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_probe_timeout_ms() -> u64 {
    5000
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_sweep_interval_secs() -> u64 {
    300
}
