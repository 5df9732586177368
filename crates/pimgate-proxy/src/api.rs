use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;

use pimgate_salsify::extract::{extract_field, BLOCKED_CHANNELS_PATHS, BLOCKED_COUNTRIES_PATHS};
use pimgate_salsify::{SalsifyClient, SalsifyError};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<SalsifyClient>,
    pub org_id: String,
}

#[derive(Debug, Deserialize)]
struct ProductBlocksQuery {
    sku: Option<String>,
}

/// Success body: the identifier, both normalized block lists, and a
/// diagnostic echo of what the fallback extraction actually found.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductBlocks {
    sku: String,
    blocked_channels: Value,
    blocked_countries: Value,
    raw_extract: RawExtract,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawExtract {
    keys_tried: Vec<&'static str>,
    /// Raw resolved value per field. A field whose candidate paths all
    /// failed is omitted; a field that resolved to `null` appears as `null`.
    values_found: serde_json::Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

fn error_response(status: StatusCode, error: &str, details: Option<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            details,
        }),
    )
        .into_response()
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/product-blocks",
            get(get_product_blocks).options(preflight),
        )
        .layer(build_cors())
        .with_state(state)
}

/// Non-preflight `OPTIONS` requests short-circuit with an empty success
/// response; actual CORS preflights are answered by the CORS layer.
async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Fetches one product record and extracts its block lists.
///
/// Every failure maps to a single terminal JSON response: upstream non-2xx
/// statuses pass through with the upstream body as `details`, anything else
/// becomes a generic 500. No retries.
async fn get_product_blocks(
    State(state): State<AppState>,
    Query(query): Query<ProductBlocksQuery>,
) -> Response {
    let Some(sku) = query.sku.filter(|s| !s.is_empty()) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing 'sku' query parameter.",
            None,
        );
    };

    let product = match state.client.get_product(&state.org_id, &sku).await {
        Ok(product) => product,
        Err(SalsifyError::UpstreamStatus { status, body }) => {
            tracing::warn!(%sku, status = status.as_u16(), "salsify returned non-success status");
            return error_response(
                status,
                &format!("Salsify error {}", status.as_u16()),
                Some(body),
            );
        }
        Err(e) => {
            tracing::error!(%sku, error = %e, "product fetch failed");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected server error",
                Some(e.to_string()),
            );
        }
    };

    let channels = extract_field(&product, BLOCKED_CHANNELS_PATHS);
    let countries = extract_field(&product, BLOCKED_COUNTRIES_PATHS);

    let mut values_found = serde_json::Map::new();
    if let Some(raw) = channels.raw.clone() {
        values_found.insert("blockedChannels".to_owned(), raw);
    }
    if let Some(raw) = countries.raw.clone() {
        values_found.insert("blockedCountries".to_owned(), raw);
    }

    let body = ProductBlocks {
        sku,
        blocked_channels: channels.normalized,
        blocked_countries: countries.normalized,
        raw_extract: RawExtract {
            keys_tried: vec!["blockedChannels", "blockedCountries"],
            values_found,
        },
    };
    (StatusCode::OK, Json(body)).into_response()
}
