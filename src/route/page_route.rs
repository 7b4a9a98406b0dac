//! Page route - the URL template of one page.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::CompiledRoute;
use crate::content::{Content, PageModel};
use crate::core::{Result, RoutingError};

/// Route of a page, as built by the page registry.
///
/// ```text
/// page:    id=10, alias=news, url_prefix=en, url_suffix=.html
/// path:    /news{!parameters}
///
/// full_path()  -> /en/news{!parameters}.html
/// ```
///
/// Relative template paths are anchored below the page alias
/// (`{category}` → `/news/{category}`).
#[derive(Debug, Clone)]
pub struct PageRoute {
    pub page: Arc<PageModel>,
    /// Template without prefix and suffix.
    path: String,
    pub defaults: BTreeMap<String, String>,
    pub requirements: BTreeMap<String, String>,
    pub options: BTreeMap<String, String>,
    pub methods: Vec<String>,
    url_prefix: String,
    url_suffix: String,
    routable: bool,
    /// Content rendered through this route (set by the generator).
    pub content: Option<Content>,
    /// Route key of `content` (`tl_news.42`).
    pub route_key: Option<String>,
}

impl PageRoute {
    pub fn new(page: Arc<PageModel>, path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') {
            let separator = if path.is_empty() { "" } else { "/" };
            path = format!("/{}{separator}{path}", page.alias_or_id());
        }
        Self {
            url_prefix: page.url_prefix.clone(),
            url_suffix: page.url_suffix.clone(),
            page,
            path,
            defaults: BTreeMap::new(),
            requirements: BTreeMap::new(),
            options: BTreeMap::new(),
            methods: Vec::new(),
            routable: true,
            content: None,
            route_key: None,
        }
    }

    /// Route without a URL of its own.
    pub fn unroutable(page: Arc<PageModel>) -> Self {
        let mut route = Self::new(page, "");
        route.path.clear();
        route.routable = false;
        route
    }

    /// Template path without prefix and suffix.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    #[inline]
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    pub fn set_url_prefix(&mut self, prefix: impl Into<String>) {
        self.url_prefix = prefix.into();
    }

    #[inline]
    pub fn url_suffix(&self) -> &str {
        &self.url_suffix
    }

    pub fn set_url_suffix(&mut self, suffix: impl Into<String>) {
        self.url_suffix = suffix.into();
    }

    #[inline]
    pub const fn is_routable(&self) -> bool {
        self.routable
    }

    /// `/prefix` + path + suffix.
    pub fn full_path(&self) -> String {
        let prefix = self.url_prefix.trim_matches('/');
        if prefix.is_empty() {
            format!("{}{}", self.path, self.url_suffix)
        } else {
            format!("/{prefix}{}{}", self.path, self.url_suffix)
        }
    }

    /// Compile the full path. Unroutable routes cannot be compiled.
    pub fn compile(&self) -> Result<CompiledRoute> {
        if !self.routable {
            return Err(RoutingError::RouteNotFound(format!(
                "page {} of type `{}` is not routable",
                self.page.id, self.page.kind
            )));
        }
        CompiledRoute::compile(&self.full_path(), &self.requirements, &self.defaults)
    }

    /// Full path with every requirement inlined (`/news/{id<\d+>}.html`).
    pub fn path_with_parameters(&self) -> String {
        let mut path = self.full_path();
        for (name, requirement) in &self.requirements {
            for placeholder in [format!("{{{name}}}"), format!("{{!{name}}}")] {
                path = path.replace(&placeholder, &format!("{{{name}<{requirement}>}}"));
            }
        }
        path
    }
}
