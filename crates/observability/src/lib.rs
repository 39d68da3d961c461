//! # nexablog-observability
//!
//! Observability-Crate fuer nexablog:
//! - Structured Logging (Text oder JSON) via tracing-subscriber
//! - Request-Timing Middleware mit Request-IDs
//! - TraceLayer von tower-http

pub mod logging;
pub mod middleware;

pub use logging::{log_format_gueltig, logging_initialisieren};
pub use middleware::{request_trace_layer, timing_middleware, REQUEST_ID_HEADER};
