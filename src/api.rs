// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP surface.
//!
//! | Route           | Query                  | Body                              |
//! |-----------------|------------------------|-----------------------------------|
//! | `/latest-block` |                        | `{"block": BlockRef}`             |
//! | `/asset`        | `id`                   | `{"asset": AssetDescriptor}`      |
//! | `/pair`         | `id`                   | `{"pair": PoolDescriptor}`        |
//! | `/events`       | `fromBlock`, `toBlock` | `{"events": [TradeEvent]}`        |
//! | `/health`       |                        | `{"status": "ok", "timestamp": ms}` |
//!
//! Failures are rendered as `{"error": message}`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::address::parse_address;
use crate::blocks::RangeGuard;
use crate::chain::ChainReader;
use crate::errors::{ErrorKind, SwapscanError};
use crate::pipeline::EventAggregator;

/// Query parameters for `/asset` and `/pair`.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    id: Option<String>,
}

/// Query parameters for `/events`.
///
/// Kept as raw strings so malformed bounds surface as `InvalidRange` rather
/// than an extractor rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    from_block: Option<String>,
    to_block: Option<String>,
}

impl IntoResponse for SwapscanError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Upstream | ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if !self.is_client_error() {
            warn!(error = %self, "Request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build the application router over a shared aggregator.
pub fn router<C>(aggregator: Arc<EventAggregator<C>>) -> Router
where
    C: ChainReader + ?Sized + 'static,
{
    Router::new()
        .route("/latest-block", get(latest_block::<C>))
        .route("/asset", get(asset::<C>))
        .route("/pair", get(pair::<C>))
        .route("/events", get(events::<C>))
        .route("/health", get(health))
        .with_state(aggregator)
}

async fn latest_block<C>(
    State(aggregator): State<Arc<EventAggregator<C>>>,
) -> Result<Json<Value>, SwapscanError>
where
    C: ChainReader + ?Sized + 'static,
{
    let block = aggregator.latest_block().await?;
    Ok(Json(json!({ "block": block })))
}

async fn asset<C>(
    State(aggregator): State<Arc<EventAggregator<C>>>,
    Query(params): Query<IdQuery>,
) -> Result<Json<Value>, SwapscanError>
where
    C: ChainReader + ?Sized + 'static,
{
    let token = parse_address(params.id.as_deref().unwrap_or_default())?;
    let asset = aggregator.resolve_asset(token).await?;
    Ok(Json(json!({ "asset": asset })))
}

async fn pair<C>(
    State(aggregator): State<Arc<EventAggregator<C>>>,
    Query(params): Query<IdQuery>,
) -> Result<Json<Value>, SwapscanError>
where
    C: ChainReader + ?Sized + 'static,
{
    let pool = parse_address(params.id.as_deref().unwrap_or_default())?;
    let pair = aggregator.resolve_pool(pool).await?;
    Ok(Json(json!({ "pair": pair })))
}

async fn events<C>(
    State(aggregator): State<Arc<EventAggregator<C>>>,
    Query(params): Query<EventsQuery>,
) -> Result<Json<Value>, SwapscanError>
where
    C: ChainReader + ?Sized + 'static,
{
    info!(params = ?params, "Received events request");

    let range =
        RangeGuard::parse_bounds(params.from_block.as_deref(), params.to_block.as_deref())?;
    let events = aggregator.resolve_events(range.from, range.to).await?;
    Ok(Json(json!({ "events": events })))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().timestamp_millis(),
    }))
}

/// Starts the API server.
pub async fn serve_api(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;

    info!(address = ?addr, "Starting server");

    axum::serve(listener, app).await?;

    Ok(())
}
