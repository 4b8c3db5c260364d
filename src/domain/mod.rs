//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on HTTP or database code. Business
//! rules live in [`crate::application::services`].

pub mod entities;
pub mod repositories;
