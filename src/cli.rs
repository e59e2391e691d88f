use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "statuspulse",
    version,
    about = "Uptime monitoring service with on-demand liveness probes and per-site check history"
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "STATUSPULSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Server bind address (overrides the config file)
    #[arg(long, env = "STATUSPULSE_HOST")]
    pub host: Option<String>,

    /// Server port (overrides the config file)
    #[arg(short, long, env = "STATUSPULSE_PORT")]
    pub port: Option<u16>,

    /// Log level filter when RUST_LOG is not set
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "STATUSPULSE_JSON_LOGS")]
    pub json_logs: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
