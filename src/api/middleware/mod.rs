//! HTTP middleware for request processing.
//!
//! Provides cross-origin policy and request tracing.

pub mod cors;
pub mod tracing;
