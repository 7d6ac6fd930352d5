//! ais-api: HTTP boundary for the lookup service.
//!
//! ```text
//! GET /addresses/{query}    address lookup
//! GET /block/{query}        100-block lookup
//! GET /owner/{query}        owner-name lookup
//! GET /account/{number}     single property by OPA account
//! ```
//!
//! Every route accepts `page`, and the presence flags `opa_only` and
//! `summary`. Bodies are JSON; failures carry the error document with its
//! status code.

use ais_core::{AddressService, LookupOptions, QueryError};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Build the router over a shared service.
pub fn router(service: Arc<AddressService>) -> Router {
    Router::new()
        .route("/addresses/{query}", get(addresses))
        .route("/block/{query}", get(block))
        .route("/owner/{query}", get(owner))
        .route("/account/{number}", get(account))
        .with_state(service)
}

/// Bind `bind` and serve until the process is stopped.
pub async fn serve(service: Arc<AddressService>, bind: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(service)).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Query-string parameters. Flags count as set when present, whatever
/// their value.
#[derive(Debug, Default, Deserialize)]
struct LookupParams {
    page: Option<String>,
    opa_only: Option<String>,
    summary: Option<String>,
}

impl From<LookupParams> for LookupOptions {
    fn from(params: LookupParams) -> Self {
        Self {
            page: params.page,
            opa_only: params.opa_only.is_some(),
            summary: params.summary.is_some(),
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

type Lookup = fn(&AddressService, &str, &LookupOptions) -> Result<Value, QueryError>;

async fn addresses(
    State(service): State<Arc<AddressService>>,
    Path(query): Path<String>,
    Query(params): Query<LookupParams>,
) -> Result<Json<Value>, ApiError> {
    run(service, AddressService::addresses, query, params).await
}

async fn block(
    State(service): State<Arc<AddressService>>,
    Path(query): Path<String>,
    Query(params): Query<LookupParams>,
) -> Result<Json<Value>, ApiError> {
    run(service, AddressService::block, query, params).await
}

async fn owner(
    State(service): State<Arc<AddressService>>,
    Path(query): Path<String>,
    Query(params): Query<LookupParams>,
) -> Result<Json<Value>, ApiError> {
    run(service, AddressService::owner, query, params).await
}

async fn account(
    State(service): State<Arc<AddressService>>,
    Path(number): Path<String>,
    Query(params): Query<LookupParams>,
) -> Result<Json<Value>, ApiError> {
    run(service, AddressService::account, number, params).await
}

/// Lookups scan the registry synchronously, so they run on the blocking pool.
async fn run(
    service: Arc<AddressService>,
    lookup: Lookup,
    query: String,
    params: LookupParams,
) -> Result<Json<Value>, ApiError> {
    let opts = LookupOptions::from(params);
    tracing::debug!(%query, ?opts, "lookup");
    let doc = tokio::task::spawn_blocking(move || lookup(&service, &query, &opts))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Json(doc))
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ApiError {
    Query(QueryError),
    Internal(String),
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self::Query(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Query(err) => (err.status(), err.to_document()),
            Self::Internal(message) => (
                500,
                json!({ "status": 500, "message": message }),
            ),
        };
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(%status, body = %body, "lookup failed");
        } else {
            tracing::warn!(%status, message = %body["message"], "lookup rejected");
        }
        (status, Json(body)).into_response()
    }
}
