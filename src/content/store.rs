//! Content loading.
//!
//! [`ContentLoader`] is the data-layer contract of the engine: point
//! lookups by id or alias plus a few small scans. [`MemoryStore`] is an
//! in-memory implementation that can be filled from a TOML site document.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{
    Archive, Article, CalendarEvent, Content, ContentType, Faq, NewsItem, Newsletter, PageModel,
};

/// Data-layer contract consumed by the resolvers.
///
/// Pages are always returned "with details": `domain`, `url_prefix` and
/// `url_suffix` are inherited from the root page of their tree.
pub trait ContentLoader: Send + Sync {
    /// Page by primary key, published or not.
    fn find_page_with_details(&self, id: u64) -> Option<Arc<PageModel>>;

    /// Published page by primary key.
    fn find_published_page(&self, id: u64) -> Option<Arc<PageModel>>;

    /// First published `regular` child page of `pid`, by sorting.
    fn find_first_published_regular_by_pid(&self, pid: u64) -> Option<Arc<PageModel>>;

    /// Other pages whose alias overlaps the alias of `page`.
    fn find_similar_by_alias(&self, page: &PageModel) -> Vec<Arc<PageModel>>;

    /// Every published page (candidates for incoming URL matching).
    fn find_published_pages(&self) -> Vec<Arc<PageModel>>;

    /// `(url_prefix, url_suffix)` of every root page.
    fn root_affixes(&self) -> Vec<(String, String)>;

    /// Parent archive of an item of `kind`.
    fn find_archive(&self, kind: ContentType, id: u64) -> Option<Archive>;

    /// Item by primary key, public or not.
    fn find_by_id(&self, kind: ContentType, id: u64) -> Option<Content>;

    /// Public item whose id or alias equals `token`, scoped to parent `pid`.
    fn find_published_by_id_or_alias_and_pid(
        &self,
        kind: ContentType,
        token: &str,
        pid: u64,
    ) -> Option<Content>;
}

// ============================================================================
// Site document
// ============================================================================

/// Serialized form of a site (`site.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteData {
    pub pages: Vec<PageModel>,
    pub articles: Vec<Article>,
    pub news_archives: Vec<Archive>,
    pub news: Vec<NewsItem>,
    pub calendars: Vec<Archive>,
    pub events: Vec<CalendarEvent>,
    pub faq_categories: Vec<Archive>,
    pub faqs: Vec<Faq>,
    pub newsletter_channels: Vec<Archive>,
    pub newsletters: Vec<Newsletter>,
}

// ============================================================================
// MemoryStore
// ============================================================================

/// Thread-safe in-memory content store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Raw pages keyed by id (details are computed on read).
    pages: RwLock<BTreeMap<u64, Arc<PageModel>>>,
    /// Items keyed by kind, then id.
    items: RwLock<FxHashMap<ContentType, BTreeMap<u64, Content>>>,
    /// Parent archives keyed by the kind of their items.
    archives: RwLock<FxHashMap<(ContentType, u64), Archive>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a site document.
    pub fn from_site(site: SiteData) -> Self {
        let store = Self::new();
        for page in site.pages {
            store.insert_page(page);
        }
        for (kind, archives) in [
            (ContentType::News, site.news_archives),
            (ContentType::CalendarEvent, site.calendars),
            (ContentType::Faq, site.faq_categories),
            (ContentType::Newsletter, site.newsletter_channels),
        ] {
            for archive in archives {
                store.insert_archive(kind, archive);
            }
        }
        site.articles.into_iter().for_each(|c| store.insert(c.into()));
        site.news.into_iter().for_each(|c| store.insert(c.into()));
        site.events.into_iter().for_each(|c| store.insert(c.into()));
        site.faqs.into_iter().for_each(|c| store.insert(c.into()));
        site.newsletters.into_iter().for_each(|c| store.insert(c.into()));
        store
    }

    /// Parse a site document from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let site: SiteData = toml::from_str(content).context("invalid site document")?;
        Ok(Self::from_site(site))
    }

    /// Load a site document from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read site document `{}`", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Insert or replace a page.
    pub fn insert_page(&self, page: PageModel) {
        self.pages.write().insert(page.id, Arc::new(page));
    }

    /// Insert or replace a parent archive for items of `kind`.
    pub fn insert_archive(&self, kind: ContentType, archive: Archive) {
        self.archives.write().insert((kind, archive.id), archive);
    }

    /// Insert or replace an item. Pages go to the page table.
    pub fn insert(&self, content: Content) {
        match content {
            Content::Page(page) => {
                self.pages.write().insert(page.id, page);
            }
            Content::Url(_) => {}
            other => {
                let id = other.id().unwrap_or_default();
                self.items
                    .write()
                    .entry(other.content_type())
                    .or_default()
                    .insert(id, other);
            }
        }
    }

    /// Remove an item or page.
    pub fn remove(&self, kind: ContentType, id: u64) {
        if kind == ContentType::Page {
            self.pages.write().remove(&id);
        } else if let Some(items) = self.items.write().get_mut(&kind) {
            items.remove(&id);
        }
    }

    /// Number of pages plus items.
    pub fn len(&self) -> usize {
        self.pages.read().len() + self.items.read().values().map(BTreeMap::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy root-level settings onto a page.
    fn with_details(&self, page: &Arc<PageModel>) -> Arc<PageModel> {
        if page.is_root() {
            return Arc::clone(page);
        }
        let pages = self.pages.read();
        let mut current = page.pid;
        // Bounded walk: a corrupt parent chain must not hang the lookup.
        for _ in 0..pages.len() {
            let Some(parent) = pages.get(&current) else {
                break;
            };
            if parent.is_root() {
                let mut detailed = PageModel::clone(page);
                detailed.domain = parent.domain.clone();
                detailed.url_prefix = parent.url_prefix.clone();
                detailed.url_suffix = parent.url_suffix.clone();
                return Arc::new(detailed);
            }
            current = parent.pid;
        }
        Arc::clone(page)
    }

    fn find_item(&self, kind: ContentType, filter: impl Fn(&Content) -> bool) -> Option<Content> {
        self.items
            .read()
            .get(&kind)
            .and_then(|items| items.values().find(|c| filter(c)).cloned())
    }
}

/// Whether an item is visible to visitors.
fn is_public(content: &Content) -> bool {
    match content {
        Content::Page(c) => c.published,
        Content::Article(c) => c.published,
        Content::News(c) => c.published,
        Content::CalendarEvent(c) => c.published,
        Content::Faq(c) => c.published,
        Content::Newsletter(c) => c.sent,
        Content::Url(_) => true,
    }
}

fn alias_of(content: &Content) -> &str {
    match content {
        Content::Page(c) => &c.alias,
        Content::Article(c) => &c.alias,
        Content::News(c) => &c.alias,
        Content::CalendarEvent(c) => &c.alias,
        Content::Faq(c) => &c.alias,
        Content::Newsletter(c) => &c.alias,
        Content::Url(_) => "",
    }
}

fn pid_of(content: &Content) -> Option<u64> {
    match content {
        Content::Page(c) => Some(c.pid),
        Content::Article(c) => Some(c.pid),
        Content::News(c) => Some(c.pid),
        Content::CalendarEvent(c) => Some(c.pid),
        Content::Faq(c) => Some(c.pid),
        Content::Newsletter(c) => Some(c.pid),
        Content::Url(_) => None,
    }
}

/// `token` is the numeric id or the alias of `content`.
fn matches_id_or_alias(content: &Content, token: &str) -> bool {
    let by_id = token
        .parse::<u64>()
        .ok()
        .is_some_and(|id| content.id() == Some(id));
    by_id || (!token.is_empty() && alias_of(content) == token)
}

/// Static part of an alias: everything before the first placeholder.
fn static_alias(alias: &str) -> &str {
    alias.split('{').next().unwrap_or(alias).trim_matches('/')
}

impl ContentLoader for MemoryStore {
    fn find_page_with_details(&self, id: u64) -> Option<Arc<PageModel>> {
        let page = self.pages.read().get(&id).cloned()?;
        Some(self.with_details(&page))
    }

    fn find_published_page(&self, id: u64) -> Option<Arc<PageModel>> {
        self.find_page_with_details(id).filter(|page| page.published)
    }

    fn find_first_published_regular_by_pid(&self, pid: u64) -> Option<Arc<PageModel>> {
        let page = self
            .pages
            .read()
            .values()
            .filter(|p| p.pid == pid && p.published && p.kind == "regular")
            .min_by_key(|p| (p.sorting, p.id))
            .cloned()?;
        Some(self.with_details(&page))
    }

    fn find_similar_by_alias(&self, page: &PageModel) -> Vec<Arc<PageModel>> {
        let needle = static_alias(&page.alias);
        if needle.is_empty() {
            return Vec::new();
        }
        let candidates: Vec<_> = self
            .pages
            .read()
            .values()
            .filter(|p| p.id != page.id && !p.is_root())
            .filter(|p| {
                let other = static_alias(&p.alias);
                !other.is_empty() && (other.contains(needle) || needle.contains(other))
            })
            .cloned()
            .collect();
        candidates.iter().map(|p| self.with_details(p)).collect()
    }

    fn find_published_pages(&self) -> Vec<Arc<PageModel>> {
        let pages: Vec<_> = self
            .pages
            .read()
            .values()
            .filter(|p| p.published)
            .cloned()
            .collect();
        pages.iter().map(|p| self.with_details(p)).collect()
    }

    fn root_affixes(&self) -> Vec<(String, String)> {
        self.pages
            .read()
            .values()
            .filter(|p| p.is_root())
            .map(|p| (p.url_prefix.clone(), p.url_suffix.clone()))
            .collect()
    }

    fn find_archive(&self, kind: ContentType, id: u64) -> Option<Archive> {
        self.archives.read().get(&(kind, id)).cloned()
    }

    fn find_by_id(&self, kind: ContentType, id: u64) -> Option<Content> {
        if kind == ContentType::Page {
            return self.find_page_with_details(id).map(Content::Page);
        }
        self.items
            .read()
            .get(&kind)
            .and_then(|items| items.get(&id))
            .cloned()
    }

    fn find_published_by_id_or_alias_and_pid(
        &self,
        kind: ContentType,
        token: &str,
        pid: u64,
    ) -> Option<Content> {
        self.find_item(kind, |c| {
            is_public(c) && pid_of(c) == Some(pid) && matches_id_or_alias(c, token)
        })
    }
}
