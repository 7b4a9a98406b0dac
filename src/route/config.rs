//! Per-page-type route configuration.

use std::collections::BTreeMap;

/// Path shape of a page type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoutePath {
    /// `/{alias-or-id}` plus parameters derived from the page.
    #[default]
    Default,
    /// The page type has no URL of its own.
    Unroutable,
    /// Explicit template. Relative values are appended to `/{alias-or-id}/`.
    Custom(String),
}

/// Route template of a page type, immutable once registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteConfig {
    pub path: RoutePath,
    /// Overrides the page's own URL suffix when set.
    pub url_suffix: Option<String>,
    pub requirements: BTreeMap<String, String>,
    pub defaults: BTreeMap<String, String>,
    pub options: BTreeMap<String, String>,
    pub methods: Vec<String>,
}

impl RouteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unroutable() -> Self {
        Self {
            path: RoutePath::Unroutable,
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = RoutePath::Custom(path.into());
        self
    }

    pub fn with_url_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.url_suffix = Some(suffix.into());
        self
    }

    pub fn with_requirement(mut self, name: impl Into<String>, regex: impl Into<String>) -> Self {
        self.requirements.insert(name.into(), regex.into());
        self
    }

    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.methods.push(method.into().to_ascii_uppercase());
        self
    }

    #[inline]
    pub fn is_routable(&self) -> bool {
        self.path != RoutePath::Unroutable
    }
}
