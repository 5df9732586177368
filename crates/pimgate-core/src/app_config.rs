use std::net::SocketAddr;
use std::path::PathBuf;

/// Organization id the proxy falls back to when `SALSIFY_ORG_ID` is not set.
pub const DEFAULT_ORG_ID: &str = "s-852ea8aa-b3aa-44b6-8c04-7bc2acefd665";

/// Configuration for the `export-attributes` command.
#[derive(Clone)]
pub struct ExporterConfig {
    /// Salsify host base URL (scheme + host); the client appends `/api/v1`.
    pub base_url: String,
    pub org_id: String,
    pub api_token: String,
    pub timeout_secs: u64,
    /// Path the attribute list is written to.
    pub output: PathBuf,
}

impl std::fmt::Debug for ExporterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExporterConfig")
            .field("base_url", &self.base_url)
            .field("org_id", &self.org_id)
            .field("api_token", &"[redacted]")
            .field("timeout_secs", &self.timeout_secs)
            .field("output", &self.output)
            .finish()
    }
}

/// Configuration for the product field proxy server.
#[derive(Clone)]
pub struct ProxyConfig {
    /// Salsify host base URL (scheme + host); the client appends `/api/v1`.
    pub base_url: String,
    pub org_id: String,
    pub api_token: String,
    pub timeout_secs: u64,
    pub bind_addr: SocketAddr,
    pub log_level: String,
}

impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("base_url", &self.base_url)
            .field("org_id", &self.org_id)
            .field("api_token", &"[redacted]")
            .field("timeout_secs", &self.timeout_secs)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .finish()
    }
}
