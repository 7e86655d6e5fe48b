// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-request deadline for RPC calls.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_transport::{TransportError, TransportErrorKind};
use tower::Layer;
use tracing::warn;

/// Fails any RPC request that takes longer than the configured duration.
///
/// The error is a transport error, so callers see it the same way they see a
/// dropped connection.
#[derive(Clone, Debug)]
pub struct RequestTimeoutLayer {
    timeout: Arc<Duration>,
}

impl RequestTimeoutLayer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout: Arc::new(timeout),
        }
    }
}

impl<S> Layer<S> for RequestTimeoutLayer {
    type Service = RequestTimeoutService<S>;

    fn layer(&self, service: S) -> Self::Service {
        RequestTimeoutService {
            service,
            timeout: Arc::clone(&self.timeout),
        }
    }
}

/// Service produced by [`RequestTimeoutLayer`].
#[derive(Clone, Debug)]
pub struct RequestTimeoutService<S> {
    service: S,
    timeout: Arc<Duration>,
}

impl<S> tower::Service<RequestPacket> for RequestTimeoutService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let timeout = *self.timeout;
        let fut = self.service.call(request);

        Box::pin(async move {
            match tokio::time::timeout(timeout, fut).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(timeout_ms = timeout.as_millis() as u64, "RPC request timed out");
                    Err(TransportErrorKind::custom_str(&format!(
                        "request timed out after {}ms",
                        timeout.as_millis()
                    )))
                }
            }
        })
    }
}
