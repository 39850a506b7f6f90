//! Command-line interface parsing for SWAPI Relay
//!
//! Handles `--no-debug`, `--timeout <MS>` and the server options, and turns
//! them into the [`FetchConfig`] used by the fetch layer.

use clap::Parser;
use thiserror::Error;
use tracing::warn;

use crate::fetch::{FetchConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use crate::server::DEFAULT_PORT;

/// Error types for CLI argument parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// The timeout value is not a positive whole number of milliseconds
    #[error("Invalid timeout: '{0}'. Expected a positive number of milliseconds")]
    InvalidTimeout(String),
}

/// SWAPI Relay - fetch, cache and print Star Wars API records
#[derive(Parser, Debug)]
#[command(name = "swapi-relay")]
#[command(about = "Caching Star Wars API relay with a console presenter")]
#[command(version)]
pub struct Cli {
    /// Disable debug logging (cache traffic and per-cycle statistics)
    #[arg(long)]
    pub no_debug: bool,

    /// Request timeout in milliseconds
    ///
    /// Only a positive integer is accepted; any other value, or no value at
    /// all, keeps the default of 5000ms.
    #[arg(long, value_name = "MS", num_args = 0..=1, allow_negative_numbers = true)]
    pub timeout: Option<Option<String>>,

    /// Port the HTTP server listens on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Base URL of the upstream API
    #[arg(long, env = "SWAPI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Accept invalid TLS certificates from the upstream API (INSECURE)
    #[arg(long)]
    pub insecure_tls: bool,
}

impl Cli {
    /// Whether debug logging should be enabled
    pub fn debug_enabled(&self) -> bool {
        !self.no_debug
    }
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Settings for the fetch layer
    pub fetch: FetchConfig,
    /// Port for the HTTP server
    pub port: u16,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            port: DEFAULT_PORT,
        }
    }
}

/// Parses a timeout argument into milliseconds.
///
/// # Arguments
/// * `s` - The timeout string from CLI
///
/// # Returns
/// * `Ok(u64)` if the string is a positive integer
/// * `Err(CliError::InvalidTimeout)` otherwise
pub fn parse_timeout_arg(s: &str) -> Result<u64, CliError> {
    match s.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(CliError::InvalidTimeout(s.to_string())),
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// An invalid timeout is reported as a warning and the default is kept.
    pub fn from_cli(cli: &Cli) -> Self {
        let timeout_ms = match &cli.timeout {
            Some(Some(raw)) => parse_timeout_arg(raw).unwrap_or_else(|err| {
                warn!("{}; using {}ms", err, DEFAULT_TIMEOUT_MS);
                DEFAULT_TIMEOUT_MS
            }),
            Some(None) | None => DEFAULT_TIMEOUT_MS,
        };

        StartupConfig {
            fetch: FetchConfig {
                base_url: cli.base_url.clone(),
                timeout_ms,
                debug_enabled: cli.debug_enabled(),
                accept_invalid_certs: cli.insecure_tls,
            },
            port: cli.port,
        }
    }
}
