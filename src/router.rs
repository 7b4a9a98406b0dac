//! Incoming URL → page route.
//!
//! The inverse of generation: every routable published page is compiled
//! and tried against the request path, most specific route first.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::content::ContentLoader;
use crate::core::{RequestContext, Result, UrlPath};
use crate::enhancer::RenderContext;
use crate::registry::PageRegistry;
use crate::route::{CompiledRoute, PageRoute};
use crate::{debug, log};

/// A page route matching a request.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route: PageRoute,
    /// Matched values merged over the route defaults.
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    /// Render context for the enhancer.
    pub fn into_context(self, request_uri: impl Into<String>) -> RenderContext {
        RenderContext::new(self.route.page, self.params, request_uri)
    }
}

/// Summary of a candidate route, for listings.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub page: u64,
    pub kind: String,
    pub domain: String,
    pub path: String,
}

struct Candidate {
    route: PageRoute,
    compiled: CompiledRoute,
    /// Characters before the first placeholder.
    static_len: usize,
}

/// Matches request URLs against the routes of all published pages.
pub struct PageRouter {
    loader: Arc<dyn ContentLoader>,
    registry: Arc<PageRegistry>,
    request: RequestContext,
}

impl std::fmt::Debug for PageRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRouter")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

impl PageRouter {
    pub fn new(
        loader: Arc<dyn ContentLoader>,
        registry: Arc<PageRegistry>,
        request: RequestContext,
    ) -> Self {
        Self {
            loader,
            registry,
            request,
        }
    }

    /// Match an absolute URL or a site-root path.
    ///
    /// Pages bound to another domain than the URL's host are skipped.
    pub fn match_url(&self, url: &str) -> Result<Option<RouteMatch>> {
        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.request.host().to_string());
        let path = UrlPath::from_browser(url).strip_base(self.request.base_path());

        for candidate in self.candidates() {
            let domain = &candidate.route.page.domain;
            if !domain.is_empty() && *domain != host {
                continue;
            }
            if let Some(params) = candidate.compiled.match_path(path.as_str()) {
                debug!("match"; "{} -> page {} ({})", path, candidate.route.page.id,
                    candidate.compiled.path());
                return Ok(Some(RouteMatch {
                    route: candidate.route,
                    params,
                }));
            }
        }

        debug!("match"; "no route for {}", path);
        Ok(None)
    }

    /// Routes of all routable pages, in matching order.
    pub fn routes(&self) -> Vec<RouteSummary> {
        self.candidates()
            .into_iter()
            .map(|c| RouteSummary {
                page: c.route.page.id,
                kind: c.route.page.kind.clone(),
                domain: c.route.page.domain.clone(),
                path: c.route.path_with_parameters(),
            })
            .collect()
    }

    /// Compiled routes, longest static part first, then fewest variables.
    fn candidates(&self) -> Vec<Candidate> {
        let mut candidates: Vec<_> = self
            .loader
            .find_published_pages()
            .into_iter()
            .filter(|page| self.registry.is_routable(page))
            .filter_map(|page| {
                let route = self.registry.route(&page);
                match route.compile() {
                    Ok(compiled) => {
                        let full = route.full_path();
                        let static_len = full.find('{').unwrap_or(full.len());
                        Some(Candidate {
                            route,
                            compiled,
                            static_len,
                        })
                    }
                    Err(e) => {
                        log!("warning"; "skipping page {}: {}", page.id, e);
                        None
                    }
                }
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.static_len
                .cmp(&a.static_len)
                .then_with(|| a.compiled.variables().len().cmp(&b.compiled.variables().len()))
                .then_with(|| a.route.page.id.cmp(&b.route.page.id))
        });
        candidates
    }
}
