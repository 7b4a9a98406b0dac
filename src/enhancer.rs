//! Reverse path: attach the content behind a matched URL.
//!
//! The router yields the raw parameters of a page route. The enhancer
//! picks the identifying parameter, loads the content and compares the
//! canonical parameters of that content with the raw ones. Any mismatch
//! (renamed alias, moved date, ...) ends in a permanent redirect to the
//! canonical URL.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::content::{Content, PageModel};
use crate::core::{Result, RoutingError};
use crate::debug;
use crate::generator::ContentUrlGenerator;
use crate::registry::PageRegistry;
use crate::route::{ParameterMap, QueryParams, UrlParameter};

/// State of one request, passed explicitly through the reverse path.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub page: Arc<PageModel>,
    /// Raw route parameters (matched values plus route defaults).
    pub params: BTreeMap<String, String>,
    /// Content attached by the enhancer.
    pub content: Option<Content>,
    pub request_uri: String,
}

impl RenderContext {
    pub fn new(
        page: Arc<PageModel>,
        params: BTreeMap<String, String>,
        request_uri: impl Into<String>,
    ) -> Self {
        Self {
            page,
            params,
            content: None,
            request_uri: request_uri.into(),
        }
    }
}

/// Outcome of [`ContentEnhancer::enhance`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Enhancement {
    /// Nothing to load: no identifier in the route, or content already attached.
    Unchanged,
    /// Content loaded and attached to the context.
    Attached {
        #[serde(serialize_with = "serialize_key")]
        content: Content,
    },
    /// The URL is stale; send the client to the canonical one.
    Redirect { url: String, permanent: bool },
}

fn serialize_key<S: serde::Serializer>(content: &Content, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&content.key())
}

/// Loads identified content for matched routes.
#[derive(Debug)]
pub struct ContentEnhancer {
    registry: Arc<PageRegistry>,
    generator: Arc<ContentUrlGenerator>,
}

impl ContentEnhancer {
    pub fn new(registry: Arc<PageRegistry>, generator: Arc<ContentUrlGenerator>) -> Self {
        Self {
            registry,
            generator,
        }
    }

    /// Load and attach the content identified by `context.params`.
    ///
    /// Fails with [`RoutingError::ContentNotFound`] when the route carries
    /// an identifier that no resolver can load.
    pub fn enhance(&self, context: &mut RenderContext) -> Result<Enhancement> {
        if context.content.is_some() {
            return Ok(Enhancement::Unchanged);
        }
        let Some(identifier) = self.identifying_parameter(context) else {
            return Ok(Enhancement::Unchanged);
        };
        let token = context
            .params
            .get(identifier.name())
            .map(String::as_str)
            .unwrap_or_default();

        let content = self
            .registry
            .parameter_resolvers(&context.page)
            .iter()
            .find_map(|resolver| resolver.load_content(token, &identifier, &context.page))
            .ok_or_else(|| RoutingError::ContentNotFound(context.request_uri.clone()))?;

        let canonical = self.canonical_parameters(&content, &context.page)?;
        if let Some((name, value)) = canonical.iter().find(|(name, value)| {
            context
                .params
                .get(*name)
                .is_some_and(|raw| !value.matches_raw(raw))
        }) {
            debug!("enhance"; "stale `{}` in {} (canonical `{}`), redirecting",
                name, context.request_uri, value);
            let url = self
                .generator
                .generate(&content, &ParameterMap::new(), &QueryParams::new())?;
            return Ok(Enhancement::Redirect {
                url,
                permanent: true,
            });
        }

        debug!("enhance"; "{} -> {}", context.request_uri, content.key());
        context.content = Some(content.clone());
        Ok(Enhancement::Attached { content })
    }

    /// First declared identifier present in the raw parameters.
    fn identifying_parameter(&self, context: &RenderContext) -> Option<UrlParameter> {
        self.registry
            .url_parameters(&context.page)
            .into_iter()
            .find(|p| p.is_identifier() && context.params.contains_key(p.name()))
    }

    fn canonical_parameters(&self, content: &Content, page: &PageModel) -> Result<ParameterMap> {
        let mut values = ParameterMap::new();
        for resolver in self.registry.url_resolvers_for(content.content_type()) {
            values.extend(resolver.parameters_for_content(content, page)?);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn context(world: &fixtures::World, page: u64, params: &[(&str, &str)]) -> RenderContext {
        let params = params
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        RenderContext::new(world.page(page), params, "/test")
    }

    #[test]
    fn test_attaches_content_on_canonical_parameters() {
        let world = fixtures::world();
        let mut ctx = context(
            &world,
            fixtures::NEWS_READER,
            &[("year", "2024"), ("alias", "hello-world")],
        );

        let result = world.engine.enhancer().enhance(&mut ctx).unwrap();
        assert!(matches!(result, Enhancement::Attached { ref content } if content.id() == Some(fixtures::NEWS_ID)));
        assert_eq!(ctx.content.and_then(|c| c.id()), Some(fixtures::NEWS_ID));
    }

    #[test]
    fn test_stale_date_redirects_permanently() {
        let world = fixtures::world();
        let mut ctx = context(
            &world,
            fixtures::NEWS_READER,
            &[("year", "2023"), ("alias", "hello-world")],
        );

        let result = world.engine.enhancer().enhance(&mut ctx).unwrap();
        assert_eq!(
            result,
            Enhancement::Redirect {
                url: "https://example.com/news/2024/hello-world.html".to_string(),
                permanent: true,
            }
        );
        assert!(ctx.content.is_none());
    }

    #[test]
    fn test_alias_wins_over_id() {
        let world = fixtures::world();
        // `id` points at nothing: were it used, the content would be missing.
        let mut ctx = context(
            &world,
            fixtures::NEWS_BY_ID_AND_ALIAS,
            &[("id", "9999"), ("alias", "hello-world")],
        );

        let result = world.engine.enhancer().enhance(&mut ctx).unwrap();
        assert!(matches!(result, Enhancement::Redirect { permanent: true, .. }));
    }

    #[test]
    fn test_id_alone_identifies_content() {
        let world = fixtures::world();
        let mut ctx = context(
            &world,
            fixtures::NEWS_BY_ID_AND_ALIAS,
            &[("id", "42")],
        );
        let result = world.engine.enhancer().enhance(&mut ctx).unwrap();
        assert!(matches!(result, Enhancement::Attached { .. }));
    }

    #[test]
    fn test_unknown_identifier_is_content_not_found() {
        let world = fixtures::world();
        let mut ctx = context(
            &world,
            fixtures::NEWS_READER,
            &[("year", "2024"), ("alias", "no-such-news")],
        );

        let err = world.engine.enhancer().enhance(&mut ctx).unwrap_err();
        assert!(matches!(err, RoutingError::ContentNotFound(ref uri) if uri == "/test"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_pages_without_identifier_are_unchanged() {
        let world = fixtures::world();
        let mut ctx = context(&world, fixtures::ABOUT, &[("parameters", "/x")]);
        assert_eq!(
            world.engine.enhancer().enhance(&mut ctx).unwrap(),
            Enhancement::Unchanged
        );

        let mut ctx = context(
            &world,
            fixtures::NEWS_READER,
            &[("year", "2024"), ("alias", "hello-world")],
        );
        ctx.content = Some(world.content(crate::ContentType::Faq, fixtures::FAQ_ID));
        assert_eq!(
            world.engine.enhancer().enhance(&mut ctx).unwrap(),
            Enhancement::Unchanged
        );
    }
}
