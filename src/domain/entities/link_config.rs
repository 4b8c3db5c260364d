//! Link configuration entity and campaign type.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Advertising platform a configuration is set up for.
///
/// Controls which UTM template is generated for the keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignType {
    Facebook,
    Google,
}

impl CampaignType {
    /// Lowercase wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Google => "google",
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a campaign type string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown campaign type: {0}")]
pub struct UnknownCampaignType(pub String);

impl FromStr for CampaignType {
    type Err = UnknownCampaignType;

    /// Parses the exact lowercase name; `"Facebook"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "facebook" => Ok(Self::Facebook),
            "google" => Ok(Self::Google),
            other => Err(UnknownCampaignType(other.to_string())),
        }
    }
}

/// A stored keyword configuration.
///
/// Records are immutable once created; the only lifecycle transition after
/// insert is deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkConfig {
    pub id: String,
    pub keyword: String,
    pub white_link: String,
    pub black_link: String,
    pub campaign_type: CampaignType,
    pub created_at: DateTime<Utc>,
}

impl LinkConfig {
    /// Creates a new LinkConfig instance.
    pub fn new(
        id: String,
        keyword: String,
        white_link: String,
        black_link: String,
        campaign_type: CampaignType,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            keyword,
            white_link,
            black_link,
            campaign_type,
            created_at,
        }
    }
}

/// Validated input for inserting a configuration.
///
/// The id and creation timestamp are assigned by the storage backend.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLinkConfig {
    pub keyword: String,
    pub white_link: String,
    pub black_link: String,
    pub campaign_type: CampaignType,
}

impl NewLinkConfig {
    /// Materializes the record with a backend-assigned id and timestamp.
    pub fn into_config(self, id: String, created_at: DateTime<Utc>) -> LinkConfig {
        LinkConfig::new(
            id,
            self.keyword,
            self.white_link,
            self.black_link,
            self.campaign_type,
            created_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_type_parse() {
        assert_eq!("facebook".parse(), Ok(CampaignType::Facebook));
        assert_eq!("google".parse(), Ok(CampaignType::Google));
        assert!("yahoo".parse::<CampaignType>().is_err());
        assert!("Google".parse::<CampaignType>().is_err());
        assert!("".parse::<CampaignType>().is_err());
    }

    #[test]
    fn test_campaign_type_display() {
        assert_eq!(CampaignType::Facebook.to_string(), "facebook");
        assert_eq!(CampaignType::Google.as_str(), "google");
    }

    #[test]
    fn test_new_link_config_into_config() {
        let now = Utc::now();
        let config = NewLinkConfig {
            keyword: "promo1".to_string(),
            white_link: "https://safe.example".to_string(),
            black_link: "https://real.example".to_string(),
            campaign_type: CampaignType::Google,
        }
        .into_config("42".to_string(), now);

        assert_eq!(config.id, "42");
        assert_eq!(config.keyword, "promo1");
        assert_eq!(config.black_link, "https://real.example");
        assert_eq!(config.created_at, now);
    }
}
