//! Core domain entities.
//!
//! - [`LinkConfig`] - A stored keyword configuration
//! - [`NewLinkConfig`] - Validated input for creating one
//! - [`CampaignType`] - Advertising platform controlling the UTM template

pub mod link_config;

pub use link_config::{CampaignType, LinkConfig, NewLinkConfig, UnknownCampaignType};
