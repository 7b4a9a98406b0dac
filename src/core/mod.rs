//! Core types - pure abstractions shared across the codebase.

mod error;
mod link;
mod url;

pub use error::{Result, RoutingError};
pub use link::LinkKind;
pub use url::{RequestContext, UrlPath, encode_path, has_scheme};
