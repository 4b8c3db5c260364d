//! Destination URL validation.
//!
//! Links are stored exactly as submitted; this module only decides whether
//! they are acceptable redirect targets.

use url::Url;

/// Reasons a destination link is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlCheckError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute `http` or `https` URL with a host.
///
/// Rejects `javascript:`, `data:`, `file:` and other schemes a browser
/// would execute or read locally instead of navigating to.
///
/// # Errors
///
/// Returns [`UrlCheckError::InvalidFormat`] for unparsable input,
/// [`UrlCheckError::UnsupportedProtocol`] for non-HTTP(S) schemes and
/// [`UrlCheckError::MissingHost`] when no host is present.
pub fn check_link(input: &str) -> Result<(), UrlCheckError> {
    let url = Url::parse(input).map_err(|e| UrlCheckError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlCheckError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlCheckError::MissingHost);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(check_link("https://safe.example").is_ok());
        assert!(check_link("http://real.example/path?q=1").is_ok());
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert_eq!(
            check_link("javascript:alert(1)"),
            Err(UrlCheckError::UnsupportedProtocol)
        );
        assert_eq!(
            check_link("ftp://files.example"),
            Err(UrlCheckError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_rejects_relative() {
        assert!(matches!(
            check_link("/just/a/path"),
            Err(UrlCheckError::InvalidFormat(_))
        ));
        assert!(matches!(
            check_link("not a url"),
            Err(UrlCheckError::InvalidFormat(_))
        ));
    }
}
