//! HTTP client for the Salsify Product API.
//!
//! Wraps `reqwest` with bearer-token auth and Salsify-specific error
//! handling. Responses are returned as raw `serde_json::Value`; the record
//! shapes are org-specific and never validated here.

use std::time::Duration;

use reqwest::{header, Client, Url};

use crate::error::SalsifyError;

const DEFAULT_BASE_URL: &str = "https://app.salsify.com";

/// Client for the Salsify Product API.
///
/// Manages the HTTP client, bearer token, and API root URL. Use
/// [`SalsifyClient::new`] for production or [`SalsifyClient::with_base_url`]
/// to point at a mock server in tests.
pub struct SalsifyClient {
    client: Client,
    token: String,
    api_root: Url,
}

impl SalsifyClient {
    /// Creates a new client pointed at the production Salsify API.
    ///
    /// # Errors
    ///
    /// Returns [`SalsifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, timeout_secs: u64) -> Result<Self, SalsifyError> {
        Self::with_base_url(token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom host base URL (for testing with
    /// wiremock). `base_url` is scheme + host only; the `/api/v1` prefix is
    /// appended here.
    ///
    /// # Errors
    ///
    /// Returns [`SalsifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SalsifyError::InvalidBaseUrl`] if
    /// `base_url` is not a valid HTTP(S) URL.
    pub fn with_base_url(
        token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SalsifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("pimgate/0.1 (salsify-integration)")
            .build()?;

        // Normalise: strip any trailing slash before appending the API
        // prefix, and keep a trailing slash on the root so joined segments
        // extend the path rather than replacing the last segment.
        let normalised = format!("{}/api/v1/", base_url.trim_end_matches('/'));
        let api_root = Url::parse(&normalised).map_err(|e| SalsifyError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if api_root.cannot_be_a_base() {
            return Err(SalsifyError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "cannot-be-a-base URL".to_string(),
            });
        }

        Ok(Self {
            client,
            token: token.to_owned(),
            api_root,
        })
    }

    /// Fetches a single product record by org id and product id / SKU.
    ///
    /// Calls `GET /api/v1/orgs/{org_id}/products/{sku}` and returns the raw
    /// JSON record.
    ///
    /// # Errors
    ///
    /// - [`SalsifyError::UpstreamStatus`] on any non-2xx response, carrying
    ///   the upstream body text.
    /// - [`SalsifyError::Http`] on network failure or timeout.
    /// - [`SalsifyError::Deserialize`] if the body is not valid JSON.
    pub async fn get_product(
        &self,
        org_id: &str,
        sku: &str,
    ) -> Result<serde_json::Value, SalsifyError> {
        let url = self.endpoint_url(&["orgs", org_id, "products", sku])?;
        self.request_json(&url).await
    }

    /// Fetches the organization's full attribute list.
    ///
    /// Calls `GET /api/v1/orgs/{org_id}/attributes` and returns the raw JSON
    /// payload; unwrapping any `data` envelope is left to the caller.
    ///
    /// # Errors
    ///
    /// - [`SalsifyError::UpstreamStatus`] on any non-2xx response, carrying
    ///   the upstream body text.
    /// - [`SalsifyError::Http`] on network failure or timeout.
    /// - [`SalsifyError::Deserialize`] if the body is not valid JSON.
    pub async fn list_attributes(&self, org_id: &str) -> Result<serde_json::Value, SalsifyError> {
        let url = self.endpoint_url(&["orgs", org_id, "attributes"])?;
        self.request_json(&url).await
    }

    /// Builds the full request URL by appending percent-encoded path
    /// segments to the API root.
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, SalsifyError> {
        let mut url = self.api_root.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| SalsifyError::InvalidBaseUrl {
                    url: self.api_root.to_string(),
                    reason: "cannot-be-a-base URL".to_string(),
                })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Sends a GET request with bearer auth, asserts a 2xx status, and
    /// parses the response body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, SalsifyError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Body read failures on an error response degrade to an empty
            // body rather than masking the status.
            let body = response.text().await.unwrap_or_default();
            return Err(SalsifyError::UpstreamStatus { status, body });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SalsifyError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SalsifyClient {
        SalsifyClient::with_base_url("test-token", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_url_appends_api_prefix_and_segments() {
        let client = test_client("https://app.salsify.com");
        let url = client
            .endpoint_url(&["orgs", "s-org", "products", "SKU-1"])
            .expect("endpoint url");
        assert_eq!(
            url.as_str(),
            "https://app.salsify.com/api/v1/orgs/s-org/products/SKU-1"
        );
    }

    #[test]
    fn endpoint_url_strips_trailing_slash_from_base() {
        let client = test_client("https://app.salsify.com/");
        let url = client
            .endpoint_url(&["orgs", "s-org", "attributes"])
            .expect("endpoint url");
        assert_eq!(
            url.as_str(),
            "https://app.salsify.com/api/v1/orgs/s-org/attributes"
        );
    }

    #[test]
    fn endpoint_url_percent_encodes_segments() {
        let client = test_client("https://app.salsify.com");
        let url = client
            .endpoint_url(&["orgs", "s-org", "products", "SKU 1/2"])
            .expect("endpoint url");
        assert_eq!(
            url.as_str(),
            "https://app.salsify.com/api/v1/orgs/s-org/products/SKU%201%2F2"
        );
    }

    #[test]
    fn with_base_url_rejects_unparseable_url() {
        let result = SalsifyClient::with_base_url("test-token", 30, "not a url");
        assert!(matches!(result, Err(SalsifyError::InvalidBaseUrl { .. })));
    }
}
