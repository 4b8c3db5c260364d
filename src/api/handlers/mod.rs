//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod configs;
pub mod health;
pub mod resolve;

pub use configs::{create_config_handler, delete_config_handler, list_configs_handler};
pub use health::health_handler;
pub use resolve::{check_handler, redirect_handler};
