// src/config/loader.rs

use crate::config::{AppConfig, ConfigValidator};
use crate::error::{AppError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from file or environment variables
pub fn load_config(config_path: &Path) -> Result<AppConfig> {
    let mut config = if config_path.exists() {
        info!("Loading configuration from file: {}", config_path.display());
        load_from_file(config_path)?
    } else {
        info!("Configuration file not found, using defaults");
        AppConfig::default()
    };

    // Override with environment variables
    override_with_env(&mut config);

    // Validate the final configuration
    ConfigValidator::validate(&config)?;

    debug!("Configuration loaded and validated successfully");
    Ok(config)
}

fn load_from_file(config_path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(config_path).map_err(|_| AppError::ConfigNotFound {
        path: config_path.display().to_string(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| AppError::ConfigParse {
        message: format!("Failed to parse config file: {e}"),
        line: e.location().map(|loc| loc.line()),
    })
}

fn override_with_env(config: &mut AppConfig) {
    if let Ok(redis_url) = std::env::var("REDIS_URL") {
        info!("Overriding Redis URL from environment variable");
        config.redis_url = Some(redis_url);
    }

    if let Ok(port_str) = std::env::var("PORT") {
        if let Ok(port) = port_str.parse::<u16>() {
            info!("Overriding server port from environment variable: {}", port);
            config.server.port = port;
        } else {
            warn!("Invalid PORT environment variable: {}", port_str);
        }
    }

    if let Ok(timeout_str) = std::env::var("PROBE_TIMEOUT_MS") {
        if let Ok(timeout_ms) = timeout_str.parse::<u64>() {
            info!(
                "Overriding probe timeout from environment variable: {}ms",
                timeout_ms
            );
            config.probe.timeout_ms = timeout_ms;
        } else {
            warn!("Invalid PROBE_TIMEOUT_MS environment variable: {}", timeout_str);
        }
    }
}
