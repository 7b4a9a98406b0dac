//! Routing error taxonomy.
//!
//! Abstaining resolvers are not errors and never show up here; see
//! [`ContentUrlResult::Abstain`](crate::route::ContentUrlResult::Abstain).

use thiserror::Error;

/// Errors raised while resolving content to URLs or URLs to content.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Contract violation: a type-specific operation received foreign content.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A forward page has no target to jump to.
    ///
    /// Forward pages have no rendering of their own, so this must reach
    /// the request layer as a server error.
    #[error("forward page not found: {0}")]
    ForwardPageNotFound(String),

    /// No resolver chain reached a page or an absolute URL.
    #[error("no route found for {0}")]
    RouteNotFound(String),

    /// The URL carried an identifier but no resolver could load the content.
    #[error("content not found: {0}")]
    ContentNotFound(String),

    /// The resolver chain did not settle within the configured hop limit.
    #[error("resolver chain for {key} exceeded {limit} hops")]
    ChainTooLong { key: String, limit: usize },

    /// A mandatory path variable has neither a value nor a default.
    #[error("missing mandatory parameter `{name}` for route `{path}`")]
    MissingParameter { name: String, path: String },

    /// A path variable value does not satisfy its requirement.
    #[error("parameter `{name}` = `{value}` does not match requirement `{requirement}`")]
    InvalidParameter {
        name: String,
        value: String,
        requirement: String,
    },

    /// A route template could not be compiled.
    #[error("invalid route template `{path}`: {reason}")]
    Template { path: String, reason: String },
}

impl RoutingError {
    /// Shorthand for [`RoutingError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Whether the request layer should answer with a 404.
    ///
    /// Only missing content is user-facing; every other error points at
    /// a configuration or programming defect.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ContentNotFound(_))
    }
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, RoutingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RoutingError::RouteNotFound("tl_news.42".to_string());
        assert_eq!(err.to_string(), "no route found for tl_news.42");

        let err = RoutingError::ChainTooLong {
            key: "tl_page.1".to_string(),
            limit: 4,
        };
        assert!(err.to_string().contains("exceeded 4 hops"));
    }

    #[test]
    fn test_only_content_not_found_is_user_facing() {
        assert!(RoutingError::ContentNotFound("/news/x".into()).is_not_found());
        assert!(!RoutingError::RouteNotFound("x".into()).is_not_found());
        assert!(!RoutingError::ForwardPageNotFound("x".into()).is_not_found());
    }
}
