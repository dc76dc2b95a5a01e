//! Request Logging
//!
//! `tower-http` trace layer with one span per request.

use std::time::Duration;

use axum::{body::Body, http::Request, http::Response};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing::{Level, Span};

type MakeSpan = fn(&Request<Body>) -> Span;
type OnResponse = fn(&Response<Body>, Duration, &Span);

/// Create the HTTP trace layer.
///
/// The span carries an empty `user_id` field that the auth extractor fills in.
pub fn create_trace_layer(
) -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeSpan, (), OnResponse> {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeSpan)
        .on_request(())
        .on_response(on_response as OnResponse)
}

fn make_span(req: &Request<Body>) -> Span {
    tracing::span!(
        Level::INFO,
        "http",
        method = %req.method(),
        uri = %req.uri().path(),
        user_id = tracing::field::Empty,
    )
}

fn on_response(res: &Response<Body>, latency: Duration, _span: &Span) {
    tracing::info!(
        status = res.status().as_u16(),
        elapsed_ms = latency.as_millis() as u64,
        "response"
    );
}
