//! Structured request logging for Shopfront.
//!
//! This crate provides:
//! - `RequestId` - Unique request identifier for log correlation
//! - `StructuredLogger` - Structured logging with request context
//! - `LogBuilder` - Fluent construction of log entries with fields

mod logging;
mod request_id;

pub use logging::*;
pub use request_id::RequestId;
