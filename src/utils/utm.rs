//! UTM query-string generation per campaign platform.

use crate::domain::entities::CampaignType;

/// Facebook dynamic URL parameters, filled in by the ad platform at click time.
const FACEBOOK_PARAMS: &str = "&utm_campaign={{campaign.name}}|{{campaign.id}}\
&utm_medium={{adset.name}}|{{adset.id}}\
&utm_content={{ad.name}}|{{ad.id}}\
&utm_term={{placement}}";

/// Google Ads ValueTrack parameters.
const GOOGLE_PARAMS: &str = "&utm_campaign={campaignid}\
&utm_medium={network}\
&utm_content={adgroupid}\
&utm_term={keyword}";

/// Builds the tracking query string for a keyword.
///
/// Always starts with `utm_source=<CAMPAIGN TYPE UPPERCASE>&keyword=<keyword>`.
/// Recognized campaign types append their platform placeholder tokens;
/// any other value yields only the base string.
///
/// The keyword is inserted verbatim, matching what advertisers paste into
/// their campaign URL templates.
///
/// # Examples
///
/// ```
/// use keyword_router::utils::utm::generate_utm;
///
/// let utm = generate_utm("google", "promo1");
/// assert!(utm.starts_with("utm_source=GOOGLE&keyword=promo1"));
/// assert!(utm.contains("{campaignid}"));
/// ```
pub fn generate_utm(campaign_type: &str, keyword: &str) -> String {
    let base = format!(
        "utm_source={}&keyword={}",
        campaign_type.to_uppercase(),
        keyword
    );

    match campaign_type.parse::<CampaignType>() {
        Ok(CampaignType::Facebook) => base + FACEBOOK_PARAMS,
        Ok(CampaignType::Google) => base + GOOGLE_PARAMS,
        Err(_) => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facebook_utm() {
        assert_eq!(
            generate_utm("facebook", "spring"),
            "utm_source=FACEBOOK&keyword=spring\
             &utm_campaign={{campaign.name}}|{{campaign.id}}\
             &utm_medium={{adset.name}}|{{adset.id}}\
             &utm_content={{ad.name}}|{{ad.id}}\
             &utm_term={{placement}}"
        );
    }

    #[test]
    fn test_google_utm() {
        assert_eq!(
            generate_utm("google", "promo1"),
            "utm_source=GOOGLE&keyword=promo1\
             &utm_campaign={campaignid}&utm_medium={network}\
             &utm_content={adgroupid}&utm_term={keyword}"
        );
    }

    #[test]
    fn test_unknown_campaign_type_yields_base_only() {
        assert_eq!(
            generate_utm("yahoo", "kw"),
            "utm_source=YAHOO&keyword=kw"
        );
    }

    #[test]
    fn test_keyword_is_case_preserved() {
        assert!(generate_utm("google", "MiXeD").starts_with("utm_source=GOOGLE&keyword=MiXeD&"));
    }

    #[test]
    fn test_platform_tokens_do_not_leak_across_types() {
        assert!(!generate_utm("google", "k").contains("{{placement}}"));
        assert!(!generate_utm("facebook", "k").contains("{adgroupid}"));
    }
}
