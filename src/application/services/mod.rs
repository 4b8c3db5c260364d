//! Business logic services for the application layer.

pub mod config_service;

pub use config_service::{ConfigService, CreateConfig, CreatedConfig, Resolution};
