//! Route building blocks.
//!
//! - [`UrlParameter`] / [`ParamValue`]: parameter descriptors and values
//! - [`ContentUrlResult`]: outcome of one resolver step
//! - [`RouteConfig`]: per page type route template
//! - [`PageRoute`] / [`CompiledRoute`]: route of one page, compiled
//! - [`conflict`]: alias conflict detection

mod compiler;
pub mod conflict;
mod config;
mod page_route;
mod parameter;
mod result;

pub use compiler::{CompiledRoute, Placeholder, TemplateUrlGenerator, UrlGenerator, placeholders};
pub use config::{RouteConfig, RoutePath};
pub use page_route::PageRoute;
pub use parameter::{ParamValue, ParameterMap, QueryParams, UrlParameter};
pub use result::ContentUrlResult;
