//! Pageroute - content to URL resolution for page-based CMS routing.
//!
//! Given any piece of content (a page, an article, a news item, ...) the
//! engine walks a chain of per-type resolvers until it reaches the page that
//! renders the content, extracts the URL parameters describing the content
//! and compiles the page route into an absolute URL. The reverse direction
//! loads the content behind an incoming URL and detects stale links.
//!
//! # Architecture
//!
//! ```text
//! Content ──> ContentUrlGenerator ──> PageRegistry ──> resolvers ──> PageRoute ──> URL
//!                                                                        │
//! URL ──> PageRouter ──> RenderContext ──> ContentEnhancer ──> content or redirect
//! ```
//!
//! # Module Structure
//!
//! - [`content`]: content models, loader and collaborator traits
//! - [`route`]: parameters, results, route templates and conflicts
//! - [`resolver`]: one resolver per content kind
//! - [`registry`]: page types, route shapes and resolver tables
//! - [`generator`]: content -> URL
//! - [`enhancer`]: URL parameters -> content (or canonical redirect)
//! - [`router`]: incoming URL -> matched page route
//! - [`engine`]: wiring from configuration

pub mod config;
pub mod content;
pub mod core;
pub mod engine;
pub mod enhancer;
pub mod generator;
pub mod logger;
pub mod registry;
pub mod resolver;
pub mod route;
pub mod router;
pub mod utils;

#[cfg(test)]
mod fixtures;

pub use crate::core::{Result, RoutingError};
pub use content::{Content, ContentKey, ContentType};
pub use engine::RoutingEngine;
pub use enhancer::{ContentEnhancer, Enhancement, RenderContext};
pub use generator::ContentUrlGenerator;
pub use registry::PageRegistry;
pub use route::{ContentUrlResult, ParamValue, ParameterMap, QueryParams, UrlParameter};
