//! Request tagging middleware.
//!
//! [`TelemetryLayer`] gives every request a correlation ID, runs it inside a
//! `request` span and records HTTP metrics when the response is ready.
//!
//! The ID comes from the `X-Request-ID` header when the client sent a usable
//! one, otherwise a fresh UUID v7. It is written back into the request headers
//! before the handler runs, so a handler calling
//! [`extract_or_generate_request_id`] logs the same value the client sees
//! echoed on the response.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::http::{HeaderMap, HeaderValue, Method, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::Span;
use uuid::Uuid;

use crate::metrics::record_http_request;

/// Header carrying the correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Routes reported as their own metric label. Anything else is "unmatched".
const KNOWN_ROUTES: [&str; 5] = [
    "/api/solve",
    "/api/scramble",
    "/health/live",
    "/health/ready",
    "/metrics",
];

/// Correlation ID for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(HeaderValue);

impl RequestId {
    /// A new UUID v7.
    pub fn generate() -> Self {
        let id = Uuid::now_v7().to_string();
        // A hyphenated UUID is always a valid header value.
        Self(HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("unknown")))
    }

    /// The client's ID if it is non-empty visible ASCII.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(REQUEST_ID_HEADER)
            .filter(|value| value.to_str().is_ok_and(|s| !s.trim().is_empty()))
            .cloned()
            .map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or_default()
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The request's correlation ID, or a freshly generated one.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    RequestId::from_headers(headers).unwrap_or_else(RequestId::generate)
}

/// Metric label for a request path.
pub fn route_label(path: &str) -> &'static str {
    KNOWN_ROUTES
        .iter()
        .copied()
        .find(|route| *route == path)
        .unwrap_or("unmatched")
}

/// Tower layer that tags requests and records HTTP metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelemetryLayer;

impl<S> Layer<S> for TelemetryLayer {
    type Service = Telemetry<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Telemetry { inner }
    }
}

/// Service produced by [`TelemetryLayer`].
#[derive(Debug, Clone)]
pub struct Telemetry<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for Telemetry<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = TelemetryFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let request_id = extract_or_generate_request_id(req.headers());
        req.headers_mut()
            .insert(REQUEST_ID_HEADER, request_id.header_value().clone());

        let route = route_label(req.uri().path());
        let span = tracing::info_span!(
            "request",
            request_id = %request_id,
            method = %req.method(),
            route,
        );

        let method = req.method().clone();
        let inner = span.in_scope(|| self.inner.call(req));

        TelemetryFuture {
            inner,
            started: Instant::now(),
            method,
            route,
            request_id,
            span,
        }
    }
}

pin_project! {
    /// Response future of [`Telemetry`].
    pub struct TelemetryFuture<F> {
        #[pin]
        inner: F,
        started: Instant,
        method: Method,
        route: &'static str,
        request_id: RequestId,
        span: Span,
    }
}

impl<F, ResBody, E> Future for TelemetryFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _entered = this.span.enter();

        let Poll::Ready(mut result) = this.inner.poll(cx) else {
            return Poll::Pending;
        };

        let elapsed = this.started.elapsed();
        let status = match &mut result {
            Ok(response) => {
                response
                    .headers_mut()
                    .insert(REQUEST_ID_HEADER, this.request_id.header_value().clone());
                response.status().as_u16()
            }
            Err(_) => 500,
        };

        tracing::info!(status, latency_ms = elapsed.as_millis() as u64, "request completed");
        record_http_request(this.method.as_str(), this.route, status, elapsed);

        Poll::Ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct_uuids() {
        let a = RequestId::generate();
        let b = RequestId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_client_id_is_reused() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Request-ID", HeaderValue::from_static("cube-42"));
        assert_eq!(extract_or_generate_request_id(&headers).as_str(), "cube-42");
    }

    #[test]
    fn test_blank_client_id_is_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  "));
        assert!(RequestId::from_headers(&headers).is_none());
        assert_eq!(extract_or_generate_request_id(&headers).as_str().len(), 36);
    }

    #[test]
    fn test_route_labels() {
        assert_eq!(route_label("/api/solve"), "/api/solve");
        assert_eq!(route_label("/api/scramble"), "/api/scramble");
        assert_eq!(route_label("/api/solve/extra"), "unmatched");
        assert_eq!(route_label("/favicon.ico"), "unmatched");
    }
}
