//! The `export-attributes` command: fetch the organization's attribute list
//! and write it to a local JSON file.

use std::path::Path;

use serde_json::Value;

use pimgate_core::ExporterConfig;
use pimgate_salsify::{SalsifyClient, SalsifyError};

/// How much of an upstream error body is kept in the failure message.
const ERROR_BODY_LIMIT: usize = 1000;

/// Loads configuration from the environment and runs the export.
///
/// # Errors
///
/// Returns an error on missing/invalid configuration, any upstream failure,
/// or a failed file write. The process exits 1 in all of those cases.
pub async fn run() -> anyhow::Result<()> {
    let config = pimgate_core::load_exporter_config_from_env()?;
    tracing::debug!(config = ?config, "loaded exporter configuration");
    run_with_config(&config).await
}

async fn run_with_config(config: &ExporterConfig) -> anyhow::Result<()> {
    let client =
        SalsifyClient::with_base_url(&config.api_token, config.timeout_secs, &config.base_url)?;

    let payload = client
        .list_attributes(&config.org_id)
        .await
        .map_err(export_error)?;

    let attrs = unwrap_attributes(payload);
    write_attributes(&attrs, &config.output)?;

    let count = attrs
        .as_array()
        .map_or_else(|| "?".to_string(), |a| a.len().to_string());
    println!("Saved {count} attributes to {}", config.output.display());
    Ok(())
}

/// Unwraps the API envelope: a bare array is used as-is, an object with a
/// non-null `data` field yields that field, anything else passes through.
fn unwrap_attributes(payload: Value) -> Value {
    match payload {
        Value::Array(_) => payload,
        Value::Object(map) => match map.get("data") {
            Some(data) if !data.is_null() => data.clone(),
            _ => Value::Object(map),
        },
        other => other,
    }
}

/// Serializes the attribute list as 2-space-indented JSON and writes it to
/// `path`. Output is deterministic, so re-running against unchanged upstream
/// data leaves the file byte-identical.
fn write_attributes(attrs: &Value, path: &Path) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(attrs)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

/// Maps a client error into the command's failure message. Upstream
/// non-success statuses keep the status line and the first
/// [`ERROR_BODY_LIMIT`] characters of the body.
fn export_error(e: SalsifyError) -> anyhow::Error {
    match e {
        SalsifyError::UpstreamStatus { status, body } => {
            let snippet: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            anyhow::anyhow!("HTTP {status}\n{snippet}")
        }
        other => anyhow::Error::from(other),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    // -----------------------------------------------------------------------
    // unwrap_attributes
    // -----------------------------------------------------------------------

    #[test]
    fn unwrap_attributes_keeps_bare_array() {
        let payload = json!([{"salsify:id": "color"}]);
        assert_eq!(unwrap_attributes(payload.clone()), payload);
    }

    #[test]
    fn unwrap_attributes_takes_data_field() {
        let payload = json!({"data": [{"salsify:id": "color"}], "meta": {"count": 1}});
        assert_eq!(
            unwrap_attributes(payload),
            json!([{"salsify:id": "color"}])
        );
    }

    #[test]
    fn unwrap_attributes_null_data_keeps_whole_object() {
        let payload = json!({"data": null, "meta": {}});
        assert_eq!(unwrap_attributes(payload.clone()), payload);
    }

    #[test]
    fn unwrap_attributes_object_without_data_passes_through() {
        let payload = json!({"attributes": []});
        assert_eq!(unwrap_attributes(payload.clone()), payload);
    }

    // -----------------------------------------------------------------------
    // export_error
    // -----------------------------------------------------------------------

    #[test]
    fn export_error_includes_status_line_and_body() {
        let err = export_error(SalsifyError::UpstreamStatus {
            status: reqwest::StatusCode::NOT_FOUND,
            body: "org not found".to_string(),
        });
        let msg = format!("{err}");
        assert!(msg.contains("HTTP 404 Not Found"), "got: {msg}");
        assert!(msg.contains("org not found"), "got: {msg}");
    }

    #[test]
    fn export_error_truncates_long_bodies() {
        let err = export_error(SalsifyError::UpstreamStatus {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "x".repeat(5000),
        });
        let msg = format!("{err}");
        assert!(msg.chars().count() < 1100, "message too long: {}", msg.len());
    }

    // -----------------------------------------------------------------------
    // run_with_config (wiremock upstream + real file write)
    // -----------------------------------------------------------------------

    fn temp_output(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("pimgate-export-{}-{name}.json", std::process::id()))
    }

    fn test_config(base_url: &str, output: std::path::PathBuf) -> ExporterConfig {
        ExporterConfig {
            base_url: base_url.to_string(),
            org_id: "s-test-org".to_string(),
            api_token: "test-token".to_string(),
            timeout_secs: 5,
            output,
        }
    }

    #[tokio::test]
    async fn export_writes_bare_list_verbatim_and_is_idempotent() {
        let server = MockServer::start().await;
        let attrs = json!([
            {"salsify:id": "color"},
            {"salsify:id": "size"},
            {"salsify:id": "material"}
        ]);
        Mock::given(method("GET"))
            .and(path("/api/v1/orgs/s-test-org/attributes"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&attrs))
            .mount(&server)
            .await;

        let output = temp_output("bare-list");
        let config = test_config(&server.uri(), output.clone());

        run_with_config(&config).await.expect("export should succeed");
        let first = std::fs::read(&output).expect("output file");
        let written: Value = serde_json::from_slice(&first).expect("output is JSON");
        assert_eq!(written, attrs);
        // Pretty-printed, not compact.
        assert!(first.windows(2).any(|w| w == b"\n "));

        run_with_config(&config).await.expect("re-run should succeed");
        let second = std::fs::read(&output).expect("output file");
        assert_eq!(first, second, "re-run must be byte-identical");

        std::fs::remove_file(&output).ok();
    }

    #[tokio::test]
    async fn export_unwraps_data_envelope() {
        let server = MockServer::start().await;
        let body = json!({"data": [{"salsify:id": "color"}]});
        Mock::given(method("GET"))
            .and(path("/api/v1/orgs/s-test-org/attributes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let output = temp_output("envelope");
        let config = test_config(&server.uri(), output.clone());

        run_with_config(&config).await.expect("export should succeed");
        let written: Value =
            serde_json::from_slice(&std::fs::read(&output).expect("output file")).expect("JSON");
        assert_eq!(written, json!([{"salsify:id": "color"}]));

        std::fs::remove_file(&output).ok();
    }

    #[tokio::test]
    async fn export_fails_on_upstream_error_without_writing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/orgs/s-test-org/attributes"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let output = temp_output("upstream-error");
        let config = test_config(&server.uri(), output.clone());

        let err = run_with_config(&config)
            .await
            .expect_err("403 should fail the export");
        let msg = format!("{err}");
        assert!(msg.contains("HTTP 403"), "got: {msg}");
        assert!(msg.contains("forbidden"), "got: {msg}");
        assert!(!output.exists(), "no file should be written on failure");
    }
}
