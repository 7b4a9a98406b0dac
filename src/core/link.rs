//! Shape of stored link targets (redirect page URLs, external news links).

use super::has_scheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// Carries a scheme: `https://`, `mailto:`, `tel:`.
    External(&'a str),
    /// `#anchor`, stored without the `#`.
    Fragment(&'a str),
    /// `/path` below the site root.
    SiteRoot(&'a str),
    /// Anything else (`contact.html`, `../up`).
    Relative(&'a str),
}

impl<'a> LinkKind<'a> {
    pub fn parse(link: &'a str) -> Self {
        if has_scheme(link) {
            return Self::External(link);
        }
        match link.as_bytes().first() {
            Some(b'#') => Self::Fragment(&link[1..]),
            Some(b'/') => Self::SiteRoot(link),
            _ => Self::Relative(link),
        }
    }

    /// Usable without a request base.
    #[inline]
    pub const fn is_absolute(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        for (input, expected) in [
            ("https://contao.org/news", LinkKind::External("https://contao.org/news")),
            ("mailto:info@example.com", LinkKind::External("mailto:info@example.com")),
            ("#comments", LinkKind::Fragment("comments")),
            ("#", LinkKind::Fragment("")),
            ("/news/hello.html", LinkKind::SiteRoot("/news/hello.html")),
            ("contact.html", LinkKind::Relative("contact.html")),
            ("", LinkKind::Relative("")),
        ] {
            assert_eq!(LinkKind::parse(input), expected, "{input}");
        }
    }

    #[test]
    fn test_only_external_links_are_absolute() {
        assert!(LinkKind::parse("tel:+49301234").is_absolute());
        assert!(!LinkKind::parse("/about.html").is_absolute());
        assert!(!LinkKind::parse("#top").is_absolute());
    }
}
