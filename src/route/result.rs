//! Outcome of a single resolution step.

use crate::content::Content;
use crate::core::{Result, RoutingError, has_scheme};

/// Tagged result of `ContentUrlResolver::resolve`.
///
/// Created fresh per step and consumed immediately by the generator.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentUrlResult {
    /// Not this resolver's content; try the next one.
    Abstain,
    /// Final absolute URL (always carries a scheme).
    AbsoluteUrl(String),
    /// Continue with other content, which also becomes the parameter source.
    Redirect(Content),
    /// Continue with other content; the current content keeps supplying
    /// the parameters. Resolving to the same content ends the chain.
    Resolve(Content),
}

impl ContentUrlResult {
    pub const fn abstain() -> Self {
        Self::Abstain
    }

    /// Absolute URL result. A value without a scheme is rejected.
    pub fn absolute_url(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        if !has_scheme(&url) {
            return Err(RoutingError::invalid_argument(format!(
                "content url result must not be a relative url: `{url}`"
            )));
        }
        Ok(Self::AbsoluteUrl(url))
    }

    pub fn redirect(content: impl Into<Content>) -> Self {
        Self::Redirect(content.into())
    }

    pub fn resolve(content: impl Into<Content>) -> Self {
        Self::Resolve(content.into())
    }

    #[inline]
    pub const fn is_abstained(&self) -> bool {
        matches!(self, Self::Abstain)
    }

    #[inline]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }

    /// Target URL, if this is an absolute URL result.
    pub fn target_url(&self) -> Option<&str> {
        match self {
            Self::AbsoluteUrl(url) => Some(url),
            _ => None,
        }
    }

    /// Next content of the chain.
    pub const fn content(&self) -> Option<&Content> {
        match self {
            Self::Redirect(content) | Self::Resolve(content) => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PageModel;

    #[test]
    fn test_absolute_url_requires_scheme() {
        assert!(ContentUrlResult::absolute_url("https://example.com/a").is_ok());
        assert!(ContentUrlResult::absolute_url("mailto:info@example.com").is_ok());

        let err = ContentUrlResult::absolute_url("/relative/path").unwrap_err();
        assert!(matches!(err, RoutingError::InvalidArgument(_)));
        assert!(ContentUrlResult::absolute_url("example.com/a").is_err());
    }

    #[test]
    fn test_accessors() {
        assert!(ContentUrlResult::abstain().is_abstained());

        let url = ContentUrlResult::absolute_url("https://example.com").unwrap();
        assert_eq!(url.target_url(), Some("https://example.com"));
        assert!(url.content().is_none());

        let page = PageModel {
            id: 5,
            ..Default::default()
        };
        let redirect = ContentUrlResult::redirect(page.clone());
        assert!(redirect.is_redirect());
        assert_eq!(redirect.content().and_then(Content::id), Some(5));
        assert!(!ContentUrlResult::resolve(page).is_redirect());
    }
}
