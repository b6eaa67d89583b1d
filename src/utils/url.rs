//! URL utilities for consistent URL handling
//!
//! This module provides the small amount of URL manipulation the pictogram
//! API needs: joining endpoint paths, encoding user text as a path segment
//! and deriving the image host from the versioned API root.

/// URL utilities for consistent URL handling
pub struct UrlUtils;

impl UrlUtils {
    /// Join a base URL with already-encoded path segments
    ///
    /// Trailing slashes on the base are ignored so `https://host/v1/` and
    /// `https://host/v1` produce the same endpoint.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use picto_amigos::utils::url::UrlUtils;
    ///
    /// assert_eq!(
    ///     UrlUtils::endpoint("https://api.arasaac.org/v1/", &["keywords", "es"]),
    ///     "https://api.arasaac.org/v1/keywords/es"
    /// );
    /// ```
    pub fn endpoint(base: &str, segments: &[&str]) -> String {
        let mut url = base.trim_end_matches('/').to_string();
        for segment in segments {
            url.push('/');
            url.push_str(segment.trim_matches('/'));
        }
        url
    }

    /// Percent-encode free text so it can be used as a single path segment
    ///
    /// # Examples
    ///
    /// ```rust
    /// use picto_amigos::utils::url::UrlUtils;
    ///
    /// assert_eq!(UrlUtils::encode_segment("por favor"), "por%20favor");
    /// assert_eq!(UrlUtils::encode_segment("niño/a"), "ni%C3%B1o%2Fa");
    /// ```
    pub fn encode_segment(text: &str) -> String {
        urlencoding::encode(text).into_owned()
    }

    /// Remove a trailing API version segment (`/v1`, `/v2`, ...) from a base URL
    ///
    /// Images are served from the host root rather than the versioned API.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use picto_amigos::utils::url::UrlUtils;
    ///
    /// assert_eq!(
    ///     UrlUtils::strip_api_version("https://api.arasaac.org/v1"),
    ///     "https://api.arasaac.org"
    /// );
    /// assert_eq!(
    ///     UrlUtils::strip_api_version("http://localhost:8080"),
    ///     "http://localhost:8080"
    /// );
    /// ```
    pub fn strip_api_version(base: &str) -> String {
        let trimmed = base.trim_end_matches('/');
        if let Some((head, last)) = trimmed.rsplit_once('/') {
            let is_version = last.len() > 1
                && last.starts_with('v')
                && last[1..].chars().all(|c| c.is_ascii_digit());
            if is_version && !head.ends_with('/') {
                return head.to_string();
            }
        }
        trimmed.to_string()
    }
}
