//! Infrastructure layer for external integrations.
//!
//! This layer implements the storage interface defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL, in-memory, and fallback repository implementations

pub mod persistence;
