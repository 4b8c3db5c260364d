//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.

pub mod config_repository;

pub use config_repository::ConfigRepository;

#[cfg(test)]
pub use config_repository::MockConfigRepository;
