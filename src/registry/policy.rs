//! Per-page-type policies: route enhancers, content composition and
//! supported content types.

use std::fmt;
use std::sync::Arc;

use crate::content::{ContentType, PageModel};
use crate::route::PageRoute;

/// Page types whose routes are computed at runtime.
pub trait DynamicRoute: Send + Sync {
    /// Adjust the route built from the static configuration.
    fn configure_page_route(&self, route: &mut PageRoute);

    /// URL suffixes this page type may produce.
    fn url_suffixes(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Delegate answering content composition per page.
pub trait CompositionAware: Send + Sync {
    fn supports_content_composition(&self, page: &PageModel) -> bool;
}

/// Delegate answering the supported content types per page.
pub trait ContentTypesProvider: Send + Sync {
    fn supported_content_types(&self, page: &PageModel) -> Vec<ContentType>;
}

/// Whether pages of a type embed arbitrary content modules.
#[derive(Clone, Default)]
pub enum ContentComposition {
    /// Everything but the legacy `redirect` and `forward` types.
    #[default]
    Default,
    Static(bool),
    Delegate(Arc<dyn CompositionAware>),
}

/// Legacy types that only jump elsewhere.
const WITHOUT_COMPOSITION: [&str; 2] = ["redirect", "forward"];

impl ContentComposition {
    pub fn supports(&self, page: &PageModel) -> bool {
        match self {
            Self::Default => !WITHOUT_COMPOSITION.contains(&page.kind.as_str()),
            Self::Static(value) => *value,
            Self::Delegate(delegate) => delegate.supports_content_composition(page),
        }
    }
}

impl fmt::Debug for ContentComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Delegate(_) => f.write_str("Delegate(..)"),
        }
    }
}

/// Content kinds a page type renders, which select its URL parameters.
#[derive(Clone)]
pub enum ContentTypes {
    Static(Vec<ContentType>),
    Provider(Arc<dyn ContentTypesProvider>),
}

impl ContentTypes {
    pub const fn none() -> Self {
        Self::Static(Vec::new())
    }

    pub fn for_page(&self, page: &PageModel) -> Vec<ContentType> {
        match self {
            Self::Static(types) => types.clone(),
            Self::Provider(provider) => provider.supported_content_types(page),
        }
    }
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Vec<ContentType>> for ContentTypes {
    fn from(types: Vec<ContentType>) -> Self {
        Self::Static(types)
    }
}

impl fmt::Debug for ContentTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(types) => f.debug_tuple("Static").field(types).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}
