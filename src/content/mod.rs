//! Content - everything a page can render or link to.
//!
//! [`Content`] is a closed set of variants, one per content kind. Dispatch
//! on a kind goes through [`ContentType`], a plain table key, never through
//! runtime type inspection.

mod model;
mod services;
mod store;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use model::{
    Archive, Article, CalendarEvent, Faq, LinkSource, NewsItem, Newsletter, PageModel, StringUrl,
};
pub use services::{
    Collaborators, InsertTagParser, KeyTranslator, StaticInsertTags, StaticTranslator, Translator,
};
pub use store::{ContentLoader, MemoryStore, SiteData};

/// Content kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Page,
    Article,
    News,
    CalendarEvent,
    Faq,
    Newsletter,
    StringUrl,
}

impl ContentType {
    /// All kinds, in default resolver priority order.
    pub const ALL: [Self; 7] = [
        Self::Page,
        Self::Article,
        Self::News,
        Self::CalendarEvent,
        Self::Faq,
        Self::Newsletter,
        Self::StringUrl,
    ];

    /// Storage table name, also the translation namespace of parameter descriptions.
    pub const fn table(self) -> &'static str {
        match self {
            Self::Page => "tl_page",
            Self::Article => "tl_article",
            Self::News => "tl_news",
            Self::CalendarEvent => "tl_calendar_events",
            Self::Faq => "tl_faq",
            Self::Newsletter => "tl_newsletter",
            Self::StringUrl => "string_url",
        }
    }

    /// Short name used in configuration and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Article => "article",
            Self::News => "news",
            Self::CalendarEvent => "calendar_event",
            Self::Faq => "faq",
            Self::Newsletter => "newsletter",
            Self::StringUrl => "string_url",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name() == s || ty.table() == s)
            .ok_or_else(|| format!("unknown content type `{s}`"))
    }
}

/// Stable identity of a content instance (`tl_news.42`).
///
/// Used as the route key and for fixed-point detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentKey {
    pub kind: ContentType,
    pub ident: String,
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind.table(), self.ident)
    }
}

/// Any piece of content the engine can resolve.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Page(Arc<PageModel>),
    Article(Arc<Article>),
    News(Arc<NewsItem>),
    CalendarEvent(Arc<CalendarEvent>),
    Faq(Arc<Faq>),
    Newsletter(Arc<Newsletter>),
    Url(Arc<StringUrl>),
}

impl Content {
    /// The kind of this content.
    pub const fn content_type(&self) -> ContentType {
        match self {
            Self::Page(_) => ContentType::Page,
            Self::Article(_) => ContentType::Article,
            Self::News(_) => ContentType::News,
            Self::CalendarEvent(_) => ContentType::CalendarEvent,
            Self::Faq(_) => ContentType::Faq,
            Self::Newsletter(_) => ContentType::Newsletter,
            Self::Url(_) => ContentType::StringUrl,
        }
    }

    /// Numeric id, `None` for string URLs.
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Page(c) => Some(c.id),
            Self::Article(c) => Some(c.id),
            Self::News(c) => Some(c.id),
            Self::CalendarEvent(c) => Some(c.id),
            Self::Faq(c) => Some(c.id),
            Self::Newsletter(c) => Some(c.id),
            Self::Url(_) => None,
        }
    }

    /// Route key identifying this content.
    pub fn key(&self) -> ContentKey {
        let ident = match self {
            Self::Url(url) => url.value.clone(),
            _ => self.id().unwrap_or_default().to_string(),
        };
        ContentKey {
            kind: self.content_type(),
            ident,
        }
    }

    /// Whether both values denote the same content instance.
    pub fn is_same(&self, other: &Self) -> bool {
        self.content_type() == other.content_type() && self.key() == other.key()
    }

    /// Address of the shared record behind this value.
    fn instance_ptr(&self) -> *const () {
        match self {
            Self::Page(c) => Arc::as_ptr(c).cast(),
            Self::Article(c) => Arc::as_ptr(c).cast(),
            Self::News(c) => Arc::as_ptr(c).cast(),
            Self::CalendarEvent(c) => Arc::as_ptr(c).cast(),
            Self::Faq(c) => Arc::as_ptr(c).cast(),
            Self::Newsletter(c) => Arc::as_ptr(c).cast(),
            Self::Url(c) => Arc::as_ptr(c).cast(),
        }
    }

    /// Whether both values are clones of one instance.
    ///
    /// Unlike [`is_same`](Self::is_same), two records loaded separately
    /// with equal keys are different instances.
    pub fn same_instance(&self, other: &Self) -> bool {
        std::ptr::eq(self.instance_ptr(), other.instance_ptr())
    }

    /// The page, if this content is one.
    pub fn as_page(&self) -> Option<&Arc<PageModel>> {
        match self {
            Self::Page(page) => Some(page),
            _ => None,
        }
    }
}

/// Hashes and compares a [`Content`] by instance.
///
/// Holding the value keeps the instance alive, so its address is not
/// reused while the key exists.
#[derive(Debug, Clone)]
pub struct InstanceKey(pub Content);

impl PartialEq for InstanceKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.same_instance(&other.0)
    }
}

impl Eq for InstanceKey {}

impl std::hash::Hash for InstanceKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.instance_ptr().hash(state);
    }
}

impl From<PageModel> for Content {
    fn from(page: PageModel) -> Self {
        Self::Page(Arc::new(page))
    }
}

impl From<Article> for Content {
    fn from(article: Article) -> Self {
        Self::Article(Arc::new(article))
    }
}

impl From<NewsItem> for Content {
    fn from(news: NewsItem) -> Self {
        Self::News(Arc::new(news))
    }
}

impl From<CalendarEvent> for Content {
    fn from(event: CalendarEvent) -> Self {
        Self::CalendarEvent(Arc::new(event))
    }
}

impl From<Faq> for Content {
    fn from(faq: Faq) -> Self {
        Self::Faq(Arc::new(faq))
    }
}

impl From<Newsletter> for Content {
    fn from(newsletter: Newsletter) -> Self {
        Self::Newsletter(Arc::new(newsletter))
    }
}

impl From<StringUrl> for Content {
    fn from(url: StringUrl) -> Self {
        Self::Url(Arc::new(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_key_display() {
        let news: Content = NewsItem {
            id: 42,
            ..Default::default()
        }
        .into();
        assert_eq!(news.key().to_string(), "tl_news.42");

        let url: Content = StringUrl::new("https://example.com").into();
        assert_eq!(url.key().to_string(), "string_url.https://example.com");
        assert_eq!(url.id(), None);
    }

    #[test]
    fn test_is_same_compares_identity_not_fields() {
        let a: Content = PageModel {
            id: 3,
            title: "Old".to_string(),
            ..Default::default()
        }
        .into();
        let b: Content = PageModel {
            id: 3,
            title: "New".to_string(),
            ..Default::default()
        }
        .into();
        let article: Content = Article {
            id: 3,
            ..Default::default()
        }
        .into();
        assert!(a.is_same(&b));
        assert!(!a.is_same(&article));
    }

    #[test]
    fn test_instance_key_follows_the_shared_record() {
        use std::collections::HashSet;

        let a: Content = NewsItem {
            id: 42,
            ..Default::default()
        }
        .into();
        let b: Content = NewsItem {
            id: 42,
            ..Default::default()
        }
        .into();
        assert!(a.is_same(&b));
        assert!(!a.same_instance(&b));
        assert!(a.same_instance(&a.clone()));

        let keys: HashSet<_> = [a.clone(), a, b].into_iter().map(InstanceKey).collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_content_type_from_str() {
        assert_eq!("news".parse::<ContentType>(), Ok(ContentType::News));
        assert_eq!(
            "tl_calendar_events".parse::<ContentType>(),
            Ok(ContentType::CalendarEvent)
        );
        assert!("tl_member".parse::<ContentType>().is_err());
    }
}
