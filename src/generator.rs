//! Content URL generation.
//!
//! ```text
//! News(42) ──resolve──> Page(7) ──resolve──> Page(7)   fixed point
//!   trail: [Page(7), News(42)]        page renders News(42)
//!
//! News(43) ──redirect──> Page(3) ──resolve──> Page(3)
//!   trail: [Page(3)]                  page renders itself
//! ```
//!
//! The content right behind the terminal page in the trail supplies the
//! URL parameters. A redirect restarts the trail, so the content that was
//! redirected away from never contributes parameters.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::config::DEFAULT_MAX_HOPS;
use crate::content::{Content, InstanceKey, PageModel};
use crate::core::{Result, RoutingError};
use crate::debug;
use crate::registry::PageRegistry;
use crate::route::{ContentUrlResult, ParameterMap, QueryParams, UrlGenerator};

/// Where a resolver chain stands.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainState {
    /// Trail of visited content, most recent first.
    Pending(Vec<Content>),
    /// A resolver produced a final absolute URL.
    ResolvedUrl(String),
    /// The chain settled on a page; `source` is the content it renders.
    ResolvedPage {
        page: Arc<PageModel>,
        source: Option<Content>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    content: InstanceKey,
    params: ParameterMap,
    query: QueryParams,
}

/// Turns content into absolute URLs.
///
/// Results are memoized per content instance and parameter set until
/// [`reset`](Self::reset) is called. Separately loaded records with the
/// same id are separate entries.
pub struct ContentUrlGenerator {
    registry: Arc<PageRegistry>,
    url_generator: Arc<dyn UrlGenerator>,
    max_hops: usize,
    cache: Mutex<FxHashMap<CacheKey, String>>,
}

impl ContentUrlGenerator {
    pub fn new(registry: Arc<PageRegistry>, url_generator: Arc<dyn UrlGenerator>) -> Self {
        Self {
            registry,
            url_generator,
            max_hops: DEFAULT_MAX_HOPS,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops.max(1);
        self
    }

    /// Absolute URL of `content`.
    ///
    /// `params` override the parameters derived from the content, `query`
    /// is appended as is. Both are dropped when the chain leaves the
    /// content they were given for.
    pub fn generate(
        &self,
        content: &Content,
        params: &ParameterMap,
        query: &QueryParams,
    ) -> Result<String> {
        let key = CacheKey {
            content: InstanceKey(content.clone()),
            params: params.clone(),
            query: query.clone(),
        };
        if let Some(url) = self.cache.lock().get(&key) {
            debug!("generate"; "cache hit for {}", content.key());
            return Ok(url.clone());
        }

        let url = match self.resolve_chain(content)? {
            ChainState::ResolvedUrl(url) => url,
            ChainState::ResolvedPage { page, source } => {
                self.page_url(content, &page, source, params, query)?
            }
            ChainState::Pending(_) => {
                return Err(RoutingError::RouteNotFound(content.key().to_string()));
            }
        };

        debug!("generate"; "{} -> {}", content.key(), url);
        self.cache.lock().insert(key, url.clone());
        Ok(url)
    }

    /// Forget every generated URL.
    pub fn reset(&self) {
        self.cache.lock().clear();
    }

    #[cfg(test)]
    fn cached(&self) -> usize {
        self.cache.lock().len()
    }

    /// Run the resolver chain of `content` until it settles.
    pub fn resolve_chain(&self, content: &Content) -> Result<ChainState> {
        let mut state = ChainState::Pending(vec![content.clone()]);
        for _ in 0..self.max_hops {
            state = match state {
                ChainState::Pending(trail) => self.step(trail)?,
                settled => return Ok(settled),
            };
        }
        match state {
            ChainState::Pending(_) => Err(RoutingError::ChainTooLong {
                key: content.key().to_string(),
                limit: self.max_hops,
            }),
            settled => Ok(settled),
        }
    }

    /// Ask the resolvers of the most recent content for the next step.
    fn step(&self, mut trail: Vec<Content>) -> Result<ChainState> {
        let Some(current) = trail.first().cloned() else {
            return Err(RoutingError::invalid_argument("empty resolver trail"));
        };

        for resolver in self.registry.url_resolvers_for(current.content_type()) {
            let result = resolver.resolve(&current)?;
            if !result.is_abstained() {
                debug!("route"; "{} resolved {} to {:?}", resolver.name(), current.key(),
                    result.content().map(Content::key));
            }
            match result {
                ContentUrlResult::Abstain => continue,
                ContentUrlResult::AbsoluteUrl(url) => return Ok(ChainState::ResolvedUrl(url)),
                ContentUrlResult::Redirect(next) => return Ok(ChainState::Pending(vec![next])),
                ContentUrlResult::Resolve(next) if next.is_same(&current) => {
                    return settle(trail);
                }
                ContentUrlResult::Resolve(next) => {
                    trail.insert(0, next);
                    return Ok(ChainState::Pending(trail));
                }
            }
        }

        settle(trail)
    }

    fn page_url(
        &self,
        content: &Content,
        page: &Arc<PageModel>,
        source: Option<Content>,
        params: &ParameterMap,
        query: &QueryParams,
    ) -> Result<String> {
        let mut route = self.registry.route(page);
        if let Some(source) = &source {
            route.content = Some(source.clone());
            route.route_key = Some(source.key().to_string());
        }

        // Caller parameters only describe the content they came with.
        let keeps_caller_params = source.as_ref().is_some_and(|s| s.is_same(content))
            || Content::Page(Arc::clone(page)).is_same(content);
        let empty_params = ParameterMap::new();
        let empty_query = QueryParams::new();
        let (params, query) = if keeps_caller_params {
            (params, query)
        } else {
            (&empty_params, &empty_query)
        };

        let compiled = route.compile()?;
        let mut values = ParameterMap::new();
        if let Some(source) = &source {
            for resolver in self.registry.url_resolvers_for(source.content_type()) {
                values.extend(resolver.parameters_for_content(source, page)?);
            }
        }
        values.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        values.retain(|name, _| compiled.variables().contains(name));

        self.url_generator.generate(&route, &values, query)
    }
}

impl std::fmt::Debug for ContentUrlGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentUrlGenerator")
            .field("max_hops", &self.max_hops)
            .field("cached", &self.cache.lock().len())
            .finish_non_exhaustive()
    }
}

/// End of the chain: only pages render.
fn settle(mut trail: Vec<Content>) -> Result<ChainState> {
    match trail.first() {
        Some(Content::Page(page)) => {
            let page = Arc::clone(page);
            let source = (trail.len() > 1).then(|| trail.swap_remove(1));
            Ok(ChainState::ResolvedPage { page, source })
        }
        Some(other) => Err(RoutingError::RouteNotFound(other.key().to_string())),
        None => Err(RoutingError::invalid_argument("empty resolver trail")),
    }
}
