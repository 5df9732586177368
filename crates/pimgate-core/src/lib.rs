//! Shared configuration for the pimgate binaries.
//!
//! Each binary builds one config struct at startup with required variables
//! validated eagerly and defaults applied explicitly; no other code reads
//! the process environment.

mod app_config;
mod config;

use thiserror::Error;

pub use app_config::{ExporterConfig, ProxyConfig, DEFAULT_ORG_ID};
pub use config::{
    load_exporter_config, load_exporter_config_from_env, load_proxy_config,
    load_proxy_config_from_env,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
