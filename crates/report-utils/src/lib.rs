//! Shared utilities for the report workspace
//!
//! Binaries call [`init_tracing_with`] once at startup; libraries only emit
//! through the `tracing` facade.

pub mod logging;

pub use logging::{LogFormat, default_filter, init_tracing_with};
