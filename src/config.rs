// src/config.rs

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::{
    net::{SocketAddr, ToSocketAddrs},
    path::PathBuf,
};

use crate::query::{FilterSettings, TimeFilterMode};

/// Which column layout the time-of-day filter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimeMode {
    /// Substring match of a token against a free-text column.
    Text,
    /// Truthiness of one boolean column per time window.
    Boolean,
}

/// Server settings, from the command line or the environment.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Paginated JSON API over a CSV of program listings")]
pub struct ServerConfig {
    /// CSV file read on every request.
    #[arg(long, env = "PROGRAMS_CSV", default_value = "./data/program.csv")]
    pub data_path: PathBuf,

    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Page size used when a request has no `limit`.
    #[arg(long, env = "DEFAULT_LIMIT", default_value_t = 20)]
    pub default_limit: usize,

    #[arg(long, env = "REGION_COLUMN", default_value = "CTPRVN_NM")]
    pub region_column: String,

    #[arg(long, env = "TIME_MODE", value_enum, default_value_t = TimeMode::Text)]
    pub time_mode: TimeMode,

    /// Free-text column searched in `text` mode.
    #[arg(long, env = "TIME_COLUMN", default_value = "PROGRAM_ESTBL_TIZN_VALUE")]
    pub time_column: String,

    #[arg(long, default_value = "오전")]
    pub morning_token: String,

    #[arg(long, default_value = "오후")]
    pub afternoon_token: String,

    /// Boolean column checked in `boolean` mode for `time=morning`.
    #[arg(long, default_value = "MORNING")]
    pub morning_column: String,

    /// Boolean column checked in `boolean` mode for `time=afternoon`.
    #[arg(long, default_value = "AFTERNOON")]
    pub afternoon_column: String,

    /// Answer 500 when the dataset cannot be loaded, instead of an empty page.
    #[arg(long, env = "STRICT_LOAD")]
    pub strict_load: bool,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    /// Resolve `host:port`; `host` may be an IP literal or a name such as `localhost`.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))?
            .next()
            .with_context(|| format!("bind address {}:{} resolved to nothing", self.host, self.port))
    }

    pub fn time_filter(&self) -> TimeFilterMode {
        match self.time_mode {
            TimeMode::Text => TimeFilterMode::Text {
                column: self.time_column.clone(),
                morning_token: self.morning_token.clone(),
                afternoon_token: self.afternoon_token.clone(),
            },
            TimeMode::Boolean => TimeFilterMode::Boolean {
                morning_column: self.morning_column.clone(),
                afternoon_column: self.afternoon_column.clone(),
            },
        }
    }

    pub fn filter_settings(&self) -> FilterSettings {
        FilterSettings {
            region_column: self.region_column.clone(),
            time: self.time_filter(),
        }
    }
}
