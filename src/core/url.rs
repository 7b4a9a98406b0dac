//! URL types for type-safe URL handling.
//!
//! - Internal representation: Always decoded (human-readable)
//! - Browser boundary: Decode on input, encode on output

use std::borrow::Borrow;
use std::sync::Arc;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use url::Url;

use super::LinkKind;
use super::error::{Result, RoutingError};

/// Characters escaped when a decoded path is written into a URL.
///
/// `/` is kept: multi-segment values such as the legacy `parameters`
/// variable carry their own slashes.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Decoded URL path (internal representation)
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts with `/`
/// - Never carries a query string or fragment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(Arc<str>);

impl UrlPath {
    /// Create from browser URL (decode percent-encoding, strip query and fragment).
    ///
    /// Absolute URLs are reduced to their path.
    pub fn from_browser(encoded: &str) -> Self {
        let trimmed = encoded.trim();
        let path = match Url::parse(trimmed) {
            Ok(parsed) if parsed.has_host() => parsed.path().to_string(),
            _ => trimmed.split(['?', '#']).next().unwrap_or(trimmed).to_string(),
        };
        let decoded = percent_decode_str(&path)
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| path.clone());
        Self::from_decoded(&decoded)
    }

    /// Create from an already decoded path. Adds the leading slash if missing.
    pub fn from_decoded(decoded: &str) -> Self {
        let trimmed = decoded.trim();
        if trimmed.is_empty() || trimmed == "/" {
            return Self(Arc::from("/"));
        }
        if trimmed.starts_with('/') {
            Self(Arc::from(trimmed))
        } else {
            Self(Arc::from(format!("/{trimmed}")))
        }
    }

    /// Get the decoded URL path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encode for browser (percent-encode non-ASCII and special characters).
    pub fn to_encoded(&self) -> String {
        encode_path(&self.0)
    }

    /// Check if path starts with the given prefix.
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Strip a base path (e.g. `/app` from a subdirectory deployment).
    pub fn strip_base(&self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        if base.is_empty() {
            return self.clone();
        }
        match self.0.strip_prefix(base) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => Self::from_decoded(rest),
            _ => self.clone(),
        }
    }

    /// Split into non-empty segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

/// Percent-encode a decoded path, keeping `/` separators.
pub fn encode_path(decoded: &str) -> String {
    utf8_percent_encode(decoded, PATH_SEGMENT).to_string()
}

/// Check whether a URL carries an explicit scheme (`https:`, `mailto:`, ...).
///
/// A valid scheme starts with an ASCII letter and only contains ASCII
/// alphanumerics or `+`, `-`, `.` before the colon.
pub fn has_scheme(url: &str) -> bool {
    url.find(':').is_some_and(|pos| {
        let scheme = &url[..pos];
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

impl std::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for UrlPath {
    fn default() -> Self {
        Self::from_decoded("/")
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UrlPath {
    fn from(s: &str) -> Self {
        Self::from_decoded(s)
    }
}

impl PartialEq<str> for UrlPath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for UrlPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for UrlPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UrlPath {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_decoded(&s))
    }
}

// ============================================================================
// Request context
// ============================================================================

/// The request the engine generates URLs for.
///
/// Passed explicitly instead of living in ambient state; the base URL
/// supplies scheme, host and the optional subdirectory path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    base_url: Url,
}

impl RequestContext {
    /// Create from an absolute base URL (`https://example.com` or `https://example.com/app`).
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            RoutingError::invalid_argument(format!("base url `{base_url}`: {e}"))
        })?;
        if !base_url.has_host() {
            return Err(RoutingError::invalid_argument(format!(
                "base url `{base_url}` has no host"
            )));
        }
        Ok(Self { base_url })
    }

    /// URL scheme (`https`).
    pub fn scheme(&self) -> &str {
        self.base_url.scheme()
    }

    /// Host name of the request.
    pub fn host(&self) -> &str {
        self.base_url.host_str().unwrap_or_default()
    }

    /// Explicit non-default port, if any.
    pub fn port(&self) -> Option<u16> {
        self.base_url.port()
    }

    /// Subdirectory the site is served from, without trailing slash (`""` or `/app`).
    pub fn base_path(&self) -> &str {
        self.base_url.path().trim_end_matches('/')
    }

    /// `scheme://host[:port]` for the given host, or the request host when empty.
    pub fn origin_for(&self, host: &str) -> String {
        let host = if host.is_empty() { self.host() } else { host };
        match self.port() {
            Some(port) => format!("{}://{}:{}", self.scheme(), host, port),
            None => format!("{}://{}", self.scheme(), host),
        }
    }

    /// Make a link absolute against the request base URL.
    ///
    /// - `https://x/y`, `mailto:a@b` → unchanged
    /// - `//cdn.example.com/x` → request scheme added
    /// - `/about` → request origin prepended
    /// - `about`, `./about`, `#top` → joined with the base URL
    pub fn make_absolute(&self, link: &str) -> String {
        let link = link.trim();
        if let Some(rest) = link.strip_prefix("//") {
            return format!("{}://{}", self.scheme(), rest);
        }
        match LinkKind::parse(link) {
            LinkKind::External(url) => url.to_string(),
            LinkKind::SiteRoot(path) => format!("{}{}", self.origin_for(""), path),
            LinkKind::Fragment(_) | LinkKind::Relative(_) => {
                let mut base = self.base_url.clone();
                if !base.path().ends_with('/') {
                    base.set_path(&format!("{}/", base.path()));
                }
                base.join(link)
                    .map(String::from)
                    .unwrap_or_else(|_| format!("{}/{}", base.as_str().trim_end_matches('/'), link))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_browser_chinese() {
        let url = UrlPath::from_browser("/posts/%E4%B8%AD%E6%96%87.html");
        assert_eq!(url.as_str(), "/posts/中文.html");
    }

    #[test]
    fn test_from_browser_strips_query_and_fragment() {
        let url = UrlPath::from_browser("/news/hello?page=2#top");
        assert_eq!(url.as_str(), "/news/hello");
    }

    #[test]
    fn test_from_browser_absolute_url() {
        let url = UrlPath::from_browser("https://example.com/news/hello-world.html?x=1");
        assert_eq!(url.as_str(), "/news/hello-world.html");
    }

    #[test]
    fn test_from_browser_invalid_utf8() {
        let url = UrlPath::from_browser("/posts/%FF");
        assert_eq!(url.as_str(), "/posts/%FF");
    }

    #[test]
    fn test_from_decoded_adds_leading_slash() {
        assert_eq!(UrlPath::from_decoded("news/a").as_str(), "/news/a");
        assert_eq!(UrlPath::from_decoded("").as_str(), "/");
    }

    #[test]
    fn test_to_encoded_keeps_slashes() {
        let url = UrlPath::from_decoded("/posts/hello world/中");
        assert_eq!(url.to_encoded(), "/posts/hello%20world/%E4%B8%AD");
    }

    #[test]
    fn test_strip_base() {
        let url = UrlPath::from_decoded("/app/news/a");
        assert_eq!(url.strip_base("/app"), "/news/a");
        assert_eq!(url.strip_base("/application"), "/app/news/a");
        assert_eq!(UrlPath::from_decoded("/app").strip_base("/app/"), "/");
    }

    #[test]
    fn test_segments() {
        let url = UrlPath::from_decoded("/en/news/a.html");
        assert_eq!(url.segments().collect::<Vec<_>>(), ["en", "news", "a.html"]);
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("https://example.com"));
        assert!(has_scheme("mailto:user@example.com"));
        assert!(has_scheme("tel:+123"));
        assert!(!has_scheme("/about"));
        assert!(!has_scheme("about"));
        assert!(!has_scheme(":nope"));
        assert!(!has_scheme("1ab://x"));
    }

    #[test]
    fn test_request_context_rejects_relative_base() {
        assert!(RequestContext::new("/relative").is_err());
        assert!(RequestContext::new("mailto:a@b.c").is_err());
    }

    #[test]
    fn test_make_absolute() {
        let ctx = RequestContext::new("https://example.com/app").unwrap();
        assert_eq!(ctx.make_absolute("https://other.org/x"), "https://other.org/x");
        assert_eq!(ctx.make_absolute("//cdn.example.com/a.js"), "https://cdn.example.com/a.js");
        assert_eq!(ctx.make_absolute("/about"), "https://example.com/about");
        assert_eq!(ctx.make_absolute("contact.html"), "https://example.com/app/contact.html");
    }

    #[test]
    fn test_origin_for() {
        let ctx = RequestContext::new("http://localhost:8080").unwrap();
        assert_eq!(ctx.origin_for(""), "http://localhost:8080");
        assert_eq!(ctx.origin_for("example.org"), "http://example.org:8080");
        assert_eq!(ctx.base_path(), "");
    }
}
