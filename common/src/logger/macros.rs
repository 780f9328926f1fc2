use super::TraceId;
use tracing::{Level, Span};

/// Create the root span for one navigation attempt
pub fn navigation_span(trace_id: &TraceId) -> Span {
    tracing::span!(
        Level::INFO,
        "navigate",
        trace_id = %trace_id.as_str()
    )
}

/// Create the root span for a login / profile-refresh flow
pub fn auth_span(trace_id: &TraceId) -> Span {
    tracing::span!(
        Level::INFO,
        "auth",
        trace_id = %trace_id.as_str()
    )
}
