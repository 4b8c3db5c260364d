//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::config_service::ConfigService`] - Configuration lifecycle and keyword resolution

pub mod services;
