//! Page registry - page type to route shape and resolver table.
//!
//! Every page type may be registered with a [`RouteConfig`], an optional
//! [`DynamicRoute`] enhancer, a [`ContentComposition`] policy and the
//! [`ContentTypes`] it renders. Unregistered (legacy) types get the default
//! route and no content parameters.
//!
//! Derived data is cached until the registration changes or
//! [`PageRegistry::reset`] is called:
//!
//! - URL prefixes and suffixes (root pages + route configs + enhancers)
//! - resolver subsets per content type

mod policy;

pub use policy::{
    CompositionAware, ContentComposition, ContentTypes, ContentTypesProvider, DynamicRoute,
};

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::content::{ContentLoader, ContentType, PageModel};
use crate::debug;
use crate::resolver::SharedResolver;
use crate::route::{PageRoute, RouteConfig, RoutePath, UrlParameter, placeholders};

/// Registration of one page type.
#[derive(Clone, Default)]
struct Registration {
    config: RouteConfig,
    enhancer: Option<Arc<dyn DynamicRoute>>,
    composition: ContentComposition,
    content_types: ContentTypes,
}

/// Deduplicated URL affixes, first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct UrlAffixes {
    prefixes: Vec<String>,
    suffixes: Vec<String>,
}

/// Registered page types, keyed by type name.
pub struct PageRegistry {
    loader: Arc<dyn ContentLoader>,
    /// All resolvers in priority order.
    resolvers: Vec<SharedResolver>,
    types: RwLock<BTreeMap<String, Registration>>,
    affixes: RwLock<Option<Arc<UrlAffixes>>>,
    by_content_type: RwLock<FxHashMap<ContentType, Vec<SharedResolver>>>,
}

impl PageRegistry {
    pub fn new(loader: Arc<dyn ContentLoader>, resolvers: Vec<SharedResolver>) -> Self {
        Self {
            loader,
            resolvers,
            types: RwLock::new(BTreeMap::new()),
            affixes: RwLock::new(None),
            by_content_type: RwLock::new(FxHashMap::default()),
        }
    }

    /// Register `kind`, replacing an earlier registration.
    pub fn add(
        &self,
        kind: impl Into<String>,
        config: RouteConfig,
        enhancer: Option<Arc<dyn DynamicRoute>>,
        composition: ContentComposition,
        content_types: ContentTypes,
    ) -> &Self {
        let kind = kind.into();
        debug!("route"; "registering page type `{}`", kind);
        self.types.write().insert(
            kind,
            Registration {
                config,
                enhancer,
                composition,
                content_types,
            },
        );
        self.reset();
        self
    }

    /// Unregister `kind`. Unknown types are ignored.
    pub fn remove(&self, kind: &str) -> &Self {
        self.types.write().remove(kind);
        self.reset();
        self
    }

    /// Drop every derived cache.
    pub fn reset(&self) {
        *self.affixes.write() = None;
        self.by_content_type.write().clear();
    }

    // ========================================================================
    // Routes
    // ========================================================================

    /// Route of `page`, built from its type's registration.
    pub fn route(&self, page: &Arc<PageModel>) -> PageRoute {
        let registration = self.registration(&page.kind).unwrap_or_default();
        let config = &registration.config;

        let mut route = match &config.path {
            RoutePath::Unroutable => PageRoute::unroutable(Arc::clone(page)),
            RoutePath::Custom(path) => PageRoute::new(Arc::clone(page), path.clone()),
            RoutePath::Default => self.default_route(page),
        };

        // Values derived from the page win over registered ones.
        let derived = std::mem::take(&mut route.requirements);
        route.requirements = overlay(&config.requirements, derived);
        let derived = std::mem::take(&mut route.defaults);
        route.defaults = overlay(&config.defaults, derived);
        route.options.extend(config.options.clone());
        route.methods = config.methods.clone();

        if let Some(suffix) = &config.url_suffix {
            route.set_url_suffix(suffix.clone());
        }
        if let Some(enhancer) = &registration.enhancer {
            enhancer.configure_page_route(&mut route);
        }
        route
    }

    /// `/{alias-or-id}`, with placeholder details or a trailing `{!parameters}`.
    fn default_route(&self, page: &Arc<PageModel>) -> PageRoute {
        let path = format!("/{}", page.alias_or_id());

        if path.contains('{') {
            let mut route = PageRoute::new(Arc::clone(page), path);
            let used = placeholders(route.path());
            for parameter in self.url_parameters(page) {
                let Some(placeholder) = used.iter().find(|p| p.name == parameter.name()) else {
                    continue;
                };
                if let Some(requirement) = parameter.requirement()
                    && !placeholder.inline_requirement
                {
                    route
                        .requirements
                        .insert(parameter.name().to_string(), requirement.to_string());
                }
                if let Some(default) = parameter.default_value()
                    && !placeholder.optional
                {
                    route
                        .defaults
                        .insert(parameter.name().to_string(), default.as_string());
                }
            }
            return route;
        }

        if is_parameterless(page) {
            return PageRoute::new(Arc::clone(page), path);
        }

        let mut route = PageRoute::new(Arc::clone(page), format!("{path}{{!parameters}}"));
        route.defaults.insert("parameters".to_string(), String::new());
        let requirement = if page.require_item { "/.+?" } else { "(/.+?)?" };
        route
            .requirements
            .insert("parameters".to_string(), requirement.to_string());
        route
    }

    // ========================================================================
    // Policies
    // ========================================================================

    pub fn supports_content_composition(&self, page: &PageModel) -> bool {
        self.registration(&page.kind)
            .map(|r| r.composition)
            .unwrap_or_default()
            .supports(page)
    }

    /// Unregistered types are routable.
    pub fn is_routable(&self, page: &PageModel) -> bool {
        self.types
            .read()
            .get(&page.kind)
            .is_none_or(|r| r.config.is_routable())
    }

    /// Registered type names, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.types.read().keys().cloned().collect()
    }

    /// Registered types without a URL of their own.
    pub fn unroutable_types(&self) -> Vec<String> {
        self.types
            .read()
            .iter()
            .filter(|(_, r)| !r.config.is_routable())
            .map(|(kind, _)| kind.clone())
            .collect()
    }

    /// Every content type some resolver handles, in priority order.
    pub fn content_types(&self) -> Vec<ContentType> {
        let mut types = Vec::new();
        for resolver in &self.resolvers {
            let kind = resolver.content_type();
            if !types.contains(&kind) {
                types.push(kind);
            }
        }
        types
    }

    /// Content types `page` renders.
    pub fn page_content_types(&self, page: &PageModel) -> Vec<ContentType> {
        self.registration(&page.kind)
            .map(|r| r.content_types.for_page(page))
            .unwrap_or_default()
    }

    // ========================================================================
    // Resolvers and parameters
    // ========================================================================

    /// Every resolver in priority order.
    pub fn resolvers(&self) -> &[SharedResolver] {
        &self.resolvers
    }

    /// Resolvers supporting `content_type`, in priority order (memoized).
    pub fn url_resolvers_for(&self, content_type: ContentType) -> Vec<SharedResolver> {
        if let Some(cached) = self.by_content_type.read().get(&content_type) {
            return cached.clone();
        }
        let subset: Vec<_> = self
            .resolvers
            .iter()
            .filter(|r| r.supports_type(content_type))
            .cloned()
            .collect();
        self.by_content_type
            .write()
            .insert(content_type, subset.clone());
        subset
    }

    /// Resolvers contributing parameters to `page`, in priority order.
    pub fn parameter_resolvers(&self, page: &PageModel) -> Vec<SharedResolver> {
        let kinds = self.page_content_types(page);
        if kinds.is_empty() {
            return Vec::new();
        }
        self.resolvers
            .iter()
            .filter(|r| kinds.iter().any(|kind| r.supports_type(*kind)))
            .cloned()
            .collect()
    }

    /// Parameters available on `page`, deduplicated by name.
    ///
    /// The first resolver declaring a name wins.
    pub fn url_parameters(&self, page: &PageModel) -> Vec<UrlParameter> {
        let mut parameters: Vec<UrlParameter> = Vec::new();
        for resolver in self.parameter_resolvers(page) {
            for parameter in resolver.available_parameters(page) {
                if parameters.iter().all(|p| p.name() != parameter.name()) {
                    parameters.push(parameter);
                }
            }
        }
        parameters
    }

    // ========================================================================
    // Affixes
    // ========================================================================

    /// URL prefixes of all root pages.
    pub fn url_prefixes(&self) -> Vec<String> {
        self.affixes().prefixes.clone()
    }

    /// URL suffixes of root pages, route configs and route enhancers.
    pub fn url_suffixes(&self) -> Vec<String> {
        self.affixes().suffixes.clone()
    }

    fn affixes(&self) -> Arc<UrlAffixes> {
        if let Some(cached) = self.affixes.read().as_ref() {
            return Arc::clone(cached);
        }

        let roots = self.loader.root_affixes();
        let mut affixes = UrlAffixes::default();
        for (prefix, _) in &roots {
            push_unique(&mut affixes.prefixes, prefix);
        }
        for (_, suffix) in &roots {
            push_unique(&mut affixes.suffixes, suffix);
        }
        for registration in self.types.read().values() {
            if let Some(suffix) = &registration.config.url_suffix {
                push_unique(&mut affixes.suffixes, suffix);
            }
            if let Some(enhancer) = &registration.enhancer {
                for suffix in enhancer.url_suffixes() {
                    push_unique(&mut affixes.suffixes, &suffix);
                }
            }
        }

        let affixes = Arc::new(affixes);
        *self.affixes.write() = Some(Arc::clone(&affixes));
        affixes
    }

    fn registration(&self, kind: &str) -> Option<Registration> {
        self.types.read().get(kind).cloned()
    }
}

impl std::fmt::Debug for PageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRegistry")
            .field("types", &self.keys())
            .field("resolvers", &self.resolvers.len())
            .finish_non_exhaustive()
    }
}

/// Redirect pages and forward pages that drop their parameters.
fn is_parameterless(page: &PageModel) -> bool {
    match page.kind.as_str() {
        "redirect" => true,
        "forward" => !page.always_forward,
        _ => false,
    }
}

fn overlay(
    base: &BTreeMap<String, String>,
    derived: BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = base.clone();
    merged.extend(derived);
    merged
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
