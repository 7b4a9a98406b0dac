//! Content models.
//!
//! Plain data loaded by a [`ContentLoader`](super::ContentLoader). The
//! engine only reads them; it never creates or persists records.

use serde::{Deserialize, Serialize};

/// Where a linkable content item points to.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinkSource {
    /// Render on the default page of the parent archive.
    #[default]
    Default,
    /// Jump to another page (`jump_to`).
    Internal,
    /// Jump to an article (`article_id`).
    Article,
    /// Link to an external URL (`url`).
    External,
}

/// A routable page.
///
/// Pages loaded "with details" carry the `domain`, `url_prefix` and
/// `url_suffix` inherited from their root page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageModel {
    pub id: u64,
    /// Parent page id (0 for root pages).
    pub pid: u64,
    /// Page type discriminator (`regular`, `forward`, `redirect`, `news_reader`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    /// URL alias; may contain `{parameter}` placeholders.
    pub alias: String,
    pub published: bool,
    /// Sort order among siblings.
    pub sorting: u32,
    /// Target page for `forward` pages.
    pub jump_to: Option<u64>,
    /// Target URL for `redirect` pages (may contain insert tags).
    pub url: String,
    /// Forward pages keep their parameters when this is set.
    pub always_forward: bool,
    /// The page only renders with an item in the URL.
    pub require_item: bool,
    /// Archives a reader page loads its items from.
    pub archives: Vec<u64>,
    pub domain: String,
    pub url_prefix: String,
    pub url_suffix: String,
}

impl PageModel {
    /// Alias, or the numeric id when the alias is empty.
    pub fn alias_or_id(&self) -> String {
        if self.alias.is_empty() {
            self.id.to_string()
        } else {
            self.alias.clone()
        }
    }

    /// Whether this page is the root of a site tree.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.kind == "root"
    }
}

/// An article placed on a page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Article {
    pub id: u64,
    /// The page this article belongs to.
    pub pid: u64,
    pub alias: String,
    pub title: String,
    pub published: bool,
}

/// A news item inside a news archive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NewsItem {
    pub id: u64,
    /// The news archive id.
    pub pid: u64,
    pub alias: String,
    pub headline: String,
    /// Publication time (unix seconds, UTC).
    pub time: i64,
    pub published: bool,
    pub source: LinkSource,
    pub jump_to: Option<u64>,
    pub article_id: Option<u64>,
    pub url: String,
}

/// An event inside a calendar.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CalendarEvent {
    pub id: u64,
    /// The calendar id.
    pub pid: u64,
    pub alias: String,
    pub title: String,
    /// Event start (unix seconds, UTC).
    pub start_time: i64,
    pub published: bool,
    pub source: LinkSource,
    pub jump_to: Option<u64>,
    pub article_id: Option<u64>,
    pub url: String,
}

/// A question inside a FAQ category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Faq {
    pub id: u64,
    /// The FAQ category id.
    pub pid: u64,
    pub alias: String,
    pub question: String,
    pub published: bool,
}

/// A newsletter inside a channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Newsletter {
    pub id: u64,
    /// The newsletter channel id.
    pub pid: u64,
    pub alias: String,
    pub subject: String,
    /// Send date (unix seconds, UTC).
    pub date: i64,
    /// Only sent newsletters are public.
    pub sent: bool,
}

/// Parent container of news, events, FAQs and newsletters.
///
/// `jump_to` is the default page that renders the container's items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Archive {
    pub id: u64,
    pub title: String,
    pub jump_to: Option<u64>,
}

/// A raw URL used as content (redirect page targets, external links).
///
/// The value may contain insert tags and may be relative.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct StringUrl {
    pub value: String,
}

impl StringUrl {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_or_id() {
        let mut page = PageModel {
            id: 7,
            alias: "news".to_string(),
            ..Default::default()
        };
        assert_eq!(page.alias_or_id(), "news");
        page.alias.clear();
        assert_eq!(page.alias_or_id(), "7");
    }

    #[test]
    fn test_link_source_parsing() {
        #[derive(Deserialize)]
        struct Wrapper {
            source: LinkSource,
        }
        for (input, expected) in [
            ("default", LinkSource::Default),
            ("internal", LinkSource::Internal),
            ("article", LinkSource::Article),
            ("external", LinkSource::External),
        ] {
            let parsed: Wrapper = toml::from_str(&format!("source = \"{input}\"")).unwrap();
            assert_eq!(parsed.source, expected, "source failed for {input}");
        }
    }
}
