//! Middleware stack for the gateway.
//!
//! Layer order: Request → BodyLimit → Tracing → Timeout → Handler
//!
//! `max_body_bytes` is the only body cap; axum's built-in extractor limit
//! is switched off.

pub mod timeout;
pub mod tracing;

pub use self::timeout::TimeoutLayer;
pub use self::tracing::TracingLayer;

use crate::domain::config::GatewayConfig;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

/// Wrap `router` in the standard stack.
pub fn apply_stack(router: Router, config: &GatewayConfig) -> Router {
    let stack = ServiceBuilder::new()
        .layer(TracingLayer::new())
        .layer(TimeoutLayer::new(config.request_timeout()));

    router
        .layer(stack)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
}
