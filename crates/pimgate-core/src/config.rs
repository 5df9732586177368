use std::net::SocketAddr;
use std::path::PathBuf;

use crate::app_config::{ExporterConfig, ProxyConfig, DEFAULT_ORG_ID};
use crate::ConfigError;

/// Load the exporter configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_exporter_config() -> Result<ExporterConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_exporter_config_from_env()
}

/// Load the exporter configuration from environment variables already in the
/// process.
///
/// Unlike [`load_exporter_config`], this does NOT load `.env` files — useful
/// for testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_exporter_config_from_env() -> Result<ExporterConfig, ConfigError> {
    build_exporter_config(|key| std::env::var(key))
}

/// Load the proxy configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_proxy_config() -> Result<ProxyConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_proxy_config_from_env()
}

/// Load the proxy configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_proxy_config_from_env() -> Result<ProxyConfig, ConfigError> {
    build_proxy_config(|key| std::env::var(key))
}

/// Build the exporter configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_exporter_config<F>(lookup: F) -> Result<ExporterConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let base_url = or_default(&lookup, "SALSIFY_BASE_URL", "https://app.salsify.com");
    let org_id = require(&lookup, "SALSIFY_ORG_ID")?;
    let api_token = require(&lookup, "SALSIFY_TOKEN")?;
    let timeout_secs = parse_u64(&lookup, "SALSIFY_TIMEOUT_SECS", "30")?;
    let output = PathBuf::from(or_default(&lookup, "PIMGATE_OUTPUT", "attributes.json"));

    Ok(ExporterConfig {
        base_url,
        org_id,
        api_token,
        timeout_secs,
        output,
    })
}

/// Build the proxy configuration using the provided env-var lookup function.
fn build_proxy_config<F>(lookup: F) -> Result<ProxyConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let base_url = or_default(&lookup, "SALSIFY_BASE_URL", "https://app.salsify.com");
    let org_id = or_default(&lookup, "SALSIFY_ORG_ID", DEFAULT_ORG_ID);
    let api_token = require(&lookup, "SALSIFY_TOKEN")?;
    let timeout_secs = parse_u64(&lookup, "SALSIFY_TIMEOUT_SECS", "30")?;
    let bind_addr = parse_socket_addr(&lookup, "PIMGATE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default(&lookup, "PIMGATE_LOG_LEVEL", "info");

    Ok(ProxyConfig {
        base_url,
        org_id,
        api_token,
        timeout_secs,
        bind_addr,
        log_level,
    })
}

fn require<F>(lookup: &F, var: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

fn or_default<F>(lookup: &F, var: &str, default: &str) -> String
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup(var).unwrap_or_else(|_| default.to_string())
}

fn parse_u64<F>(lookup: &F, var: &str, default: &str) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let raw = or_default(lookup, var, default);
    raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

fn parse_socket_addr<F>(lookup: &F, var: &str, default: &str) -> Result<SocketAddr, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let raw = or_default(lookup, var, default);
    raw.parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}
