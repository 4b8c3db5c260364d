//! Utility functions shared across layers.
//!
//! - [`utm`] - UTM query-string generation per campaign platform
//! - [`url_check`] - Destination URL validation

pub mod url_check;
pub mod utm;
