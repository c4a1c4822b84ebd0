//! Observability wiring for Keepsake.
//!
//! Subscriber setup for structured logging, with an optional OpenTelemetry
//! bridge for trace export.

pub mod tracing_setup;
