//! Configuration storage backends.
//!
//! # Repositories
//!
//! - [`PgConfigRepository`] - PostgreSQL storage via SQLx
//! - [`MemoryConfigRepository`] - process-local fallback storage
//! - [`FallbackConfigRepository`] - routes to PostgreSQL and degrades to memory
//!   when PostgreSQL fails

pub mod fallback_config_repository;
pub mod memory_config_repository;
pub mod pg_config_repository;

pub use fallback_config_repository::FallbackConfigRepository;
pub use memory_config_repository::MemoryConfigRepository;
pub use pg_config_repository::PgConfigRepository;
