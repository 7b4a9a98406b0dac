//! Engine wiring.
//!
//! [`RoutingEngine::build`] turns a [`RoutingConfig`] and a content loader
//! into the full set of components:
//!
//! ```text
//! Collaborators ──> resolvers ──> PageRegistry ──┬──> ContentUrlGenerator ──> ContentEnhancer
//!                                                └──> PageRouter
//! ```
//!
//! Built-in page types are registered first, configured ones after, so a
//! `[[page_types]]` entry can override a built-in.

use std::sync::Arc;

use crate::config::{PageTypeConfig, RoutingConfig};
use crate::content::{
    Collaborators, Content, ContentLoader, PageModel, StaticInsertTags, StaticTranslator,
};
use crate::core::{Result, RoutingError};
use crate::enhancer::{ContentEnhancer, Enhancement, RenderContext};
use crate::generator::ContentUrlGenerator;
use crate::registry::{ContentComposition, ContentTypes, PageRegistry};
use crate::resolver::default_resolvers;
use crate::route::conflict::{RouteConflict, detect_conflicts};
use crate::route::{
    ParameterMap, QueryParams, RouteConfig, TemplateUrlGenerator, UrlGenerator, UrlParameter,
};
use crate::router::PageRouter;
use crate::{debug, debug_do};

/// Page types known without configuration.
fn builtin_page_types() -> Vec<(&'static str, RouteConfig)> {
    vec![
        ("regular", RouteConfig::new()),
        ("forward", RouteConfig::new()),
        ("redirect", RouteConfig::new()),
        ("root", RouteConfig::unroutable()),
        ("error_404", RouteConfig::unroutable()),
    ]
}

/// All routing components for one site.
pub struct RoutingEngine {
    loader: Arc<dyn ContentLoader>,
    collaborators: Collaborators,
    registry: Arc<PageRegistry>,
    url_generator: Arc<dyn UrlGenerator>,
    generator: Arc<ContentUrlGenerator>,
    enhancer: ContentEnhancer,
    router: PageRouter,
}

impl RoutingEngine {
    /// Wire every component from `config`.
    pub fn build(config: &RoutingConfig, loader: Arc<dyn ContentLoader>) -> Result<Self> {
        let request = config.request_context()?;
        let collaborators = Collaborators::new(Arc::clone(&loader), request.clone())
            .with_translator(Arc::new(StaticTranslator::new(config.translations.clone())))
            .with_insert_tags(Arc::new(StaticInsertTags::new(config.insert_tags.clone())))
            .with_slug(config.slug.clone());

        let registry = Arc::new(PageRegistry::new(
            Arc::clone(&loader),
            default_resolvers(&collaborators),
        ));
        for (kind, route) in builtin_page_types() {
            registry.add(
                kind,
                route,
                None,
                ContentComposition::Default,
                ContentTypes::none(),
            );
        }
        for page_type in &config.page_types {
            register(&registry, page_type);
        }

        let url_generator: Arc<dyn UrlGenerator> = Arc::new(TemplateUrlGenerator::new(request.clone()));
        let generator = Arc::new(
            ContentUrlGenerator::new(Arc::clone(&registry), Arc::clone(&url_generator))
                .with_max_hops(config.routing.max_hops),
        );
        let enhancer = ContentEnhancer::new(Arc::clone(&registry), Arc::clone(&generator));
        let router = PageRouter::new(Arc::clone(&loader), Arc::clone(&registry), request);

        debug_do! {
            let keys = registry.keys();
            debug!("route"; "page types: {}", keys.join(", "));
        }

        Ok(Self {
            loader,
            collaborators,
            registry,
            url_generator,
            generator,
            enhancer,
            router,
        })
    }

    #[inline]
    pub fn loader(&self) -> &Arc<dyn ContentLoader> {
        &self.loader
    }

    #[inline]
    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    #[inline]
    pub fn registry(&self) -> &Arc<PageRegistry> {
        &self.registry
    }

    pub fn url_generator(&self) -> Arc<dyn UrlGenerator> {
        Arc::clone(&self.url_generator)
    }

    #[inline]
    pub fn generator(&self) -> &Arc<ContentUrlGenerator> {
        &self.generator
    }

    #[inline]
    pub fn enhancer(&self) -> &ContentEnhancer {
        &self.enhancer
    }

    #[inline]
    pub fn router(&self) -> &PageRouter {
        &self.router
    }

    /// Absolute URL of `content`.
    pub fn generate(
        &self,
        content: &Content,
        params: &ParameterMap,
        query: &QueryParams,
    ) -> Result<String> {
        self.generator.generate(content, params, query)
    }

    /// Match `url` and attach its content.
    ///
    /// `None` when no page route matches.
    pub fn handle(&self, url: &str) -> Result<Option<(RenderContext, Enhancement)>> {
        let Some(matched) = self.router.match_url(url)? else {
            return Ok(None);
        };
        let mut context = matched.into_context(url);
        let enhancement = self.enhancer.enhance(&mut context)?;
        Ok(Some((context, enhancement)))
    }

    /// A page loaded with details, or `ContentNotFound`.
    pub fn page(&self, id: u64) -> Result<Arc<PageModel>> {
        self.loader
            .find_page_with_details(id)
            .ok_or_else(|| RoutingError::ContentNotFound(format!("page {id}")))
    }

    /// URL parameters of page `id`.
    pub fn url_parameters(&self, id: u64) -> Result<Vec<UrlParameter>> {
        let page = self.page(id)?;
        Ok(self.registry.url_parameters(&page))
    }

    /// Pages whose alias may produce the same URL as page `id`.
    pub fn conflicts(&self, id: u64) -> Result<Vec<RouteConflict>> {
        let page = self.page(id)?;
        let candidates = self.loader.find_similar_by_alias(&page);
        Ok(detect_conflicts(&page, &candidates, |other| {
            self.registry.route(other)
        }))
    }

    /// Drop every cache; call between requests.
    pub fn reset(&self) {
        self.generator.reset();
        self.registry.reset();
    }
}

impl std::fmt::Debug for RoutingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingEngine")
            .field("registry", &self.registry)
            .field("generator", &self.generator)
            .finish_non_exhaustive()
    }
}

fn register(registry: &PageRegistry, page_type: &PageTypeConfig) {
    let composition = page_type
        .content_composition
        .map_or(ContentComposition::Default, ContentComposition::Static);
    registry.add(
        page_type.kind.clone(),
        page_type.route_config(),
        None,
        composition,
        ContentTypes::from(page_type.content_types()),
    );
}
