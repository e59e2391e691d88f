// src/config/validation.rs

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use tracing::{debug, warn};
use url::Url;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &AppConfig) -> Result<()> {
        debug!("Starting configuration validation");

        if let Err(e) = Self::validate_server_config(config) {
            warn!("Server config validation failed: {}", e);
            return Err(e);
        }

        if let Err(e) = Self::validate_probe_config(config) {
            warn!("Probe config validation failed: {}", e);
            return Err(e);
        }

        if let Err(e) = Self::validate_sweep_config(config) {
            warn!("Sweep config validation failed: {}", e);
            return Err(e);
        }

        if let Err(e) = Self::validate_redis_config(config) {
            warn!("Redis config validation failed: {}", e);
            return Err(e);
        }

        debug!("Configuration validation completed successfully");
        Ok(())
    }

    fn validate_server_config(config: &AppConfig) -> Result<()> {
        if config.server.port == 0 {
            return Err(AppError::config_validation(
                "Server port cannot be 0",
                Some("server.port"),
            ));
        }

        if config.server.host.trim().is_empty() {
            return Err(AppError::config_validation(
                "Server host cannot be empty",
                Some("server.host"),
            ));
        }

        Ok(())
    }

    fn validate_probe_config(config: &AppConfig) -> Result<()> {
        if config.probe.timeout_ms == 0 {
            return Err(AppError::config_validation(
                "Probe timeout cannot be 0",
                Some("probe.timeout_ms"),
            ));
        }

        if config.probe.connect_timeout_secs == 0 {
            return Err(AppError::config_validation(
                "Connect timeout cannot be 0",
                Some("probe.connect_timeout_secs"),
            ));
        }

        Ok(())
    }

    fn validate_sweep_config(config: &AppConfig) -> Result<()> {
        if config.sweep.enabled && config.sweep.interval_secs == 0 {
            return Err(AppError::config_validation(
                "Sweep interval cannot be 0 when the sweep is enabled",
                Some("sweep.interval_secs"),
            ));
        }

        Ok(())
    }

    fn validate_redis_config(config: &AppConfig) -> Result<()> {
        if let Some(redis_url) = &config.redis_url {
            let url = Url::parse(redis_url).map_err(|e| {
                AppError::config_validation(
                    format!("Invalid URL in redis_url: {redis_url} - {e}"),
                    Some("redis_url"),
                )
            })?;

            match url.scheme() {
                "redis" | "rediss" => {}
                scheme => {
                    return Err(AppError::config_validation(
                        format!("Unsupported redis_url scheme '{scheme}'. Supported: redis, rediss"),
                        Some("redis_url"),
                    ));
                }
            }
        }

        Ok(())
    }
}
