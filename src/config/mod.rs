//! Routing configuration (`routing.toml`).
//!
//! # Sections
//!
//! | Section            | Purpose                                        |
//! |--------------------|------------------------------------------------|
//! | `[request]`        | Base URL generated links are made absolute to  |
//! | `[routing]`        | Resolver chain limits                          |
//! | `[slug]`           | How descriptive parameters are standardized    |
//! | `[[page_types]]`   | Route shape per page type                      |
//! | `[translations]`   | Parameter descriptions                         |
//! | `[insert_tags]`    | Insert tag replacements for stored URLs        |
//!
//! # Example
//!
//! ```toml
//! [request]
//! base_url = "https://example.com"
//!
//! [[page_types]]
//! type = "news_reader"
//! content_types = ["news"]
//! ```

mod error;
mod page_type;
mod slug;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use page_type::{PageTypeConfig, PathSetting};
pub use slug::{SlugCase, SlugConfig, SlugMode, SlugSeparator};

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::RequestContext;
use crate::log;

/// Default cap on resolver hops per generated URL.
pub const DEFAULT_MAX_HOPS: usize = 32;

// ============================================================================
// sections
// ============================================================================

/// `[request]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RequestConfig {
    /// Absolute base URL (`https://example.com` or `https://example.com/app`).
    pub base_url: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".to_string(),
        }
    }
}

/// `[routing]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoutingSection {
    /// Resolver hops before generation gives up.
    pub max_hops: usize,
}

impl Default for RoutingSection {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `routing.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub request: RequestConfig,
    pub routing: RoutingSection,
    pub slug: SlugConfig,
    pub page_types: Vec<PageTypeConfig>,
    /// `<table>.<parameter>` → description
    pub translations: BTreeMap<String, String>,
    /// `tag::argument` → replacement
    pub insert_tags: BTreeMap<String, String>,
}

impl RoutingConfig {
    /// Parse configuration from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load and validate configuration, warning about unknown fields.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Request context for the configured base URL.
    pub fn request_context(&self) -> crate::Result<RequestContext> {
        RequestContext::new(&self.request.base_url)
    }

    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if let Err(e) = self.request_context() {
            diag.error_with_hint(
                "request.base_url",
                e.to_string(),
                "use an absolute URL such as `https://example.com`",
            );
        }

        if self.routing.max_hops == 0 {
            diag.error("routing.max_hops", "must be at least 1");
        }

        let mut seen = BTreeSet::new();
        for (index, page_type) in self.page_types.iter().enumerate() {
            if !seen.insert(page_type.kind.as_str()) {
                diag.warn(
                    format!("page_types[{index}].type"),
                    format!("`{}` is registered twice, the last entry wins", page_type.kind),
                );
            }
            page_type.validate(index, &mut diag);
        }

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RoutingConfig::from_str("").unwrap();
        assert_eq!(config.request.base_url, "http://localhost");
        assert_eq!(config.routing.max_hops, DEFAULT_MAX_HOPS);
        assert!(config.page_types.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = RoutingConfig::from_str("[request\nbase_url = 1");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[routing]\nmax_hops = 8\nunknown_key = 1\n\n[unknown_section]\nx = 1";
        let (config, ignored) = RoutingConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.routing.max_hops, 8);
        assert!(ignored.iter().any(|f| f.contains("unknown_key")));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[request]\nbase_url = \"https://example.com\"\n\n[translations]\n\"tl_news.alias\" = \"Alias\"";
        let (config, ignored) = RoutingConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
        assert_eq!(config.translations["tl_news.alias"], "Alias");
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let content = r#"
[request]
base_url = "/relative"

[routing]
max_hops = 0

[[page_types]]
type = "reader"
content_types = ["unknown"]
"#;
        let config = RoutingConfig::from_str(content).unwrap();
        let Err(ConfigError::Diagnostics(diag)) = config.validate() else {
            panic!("expected diagnostics");
        };
        assert_eq!(diag.errors().len(), 3);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[request]\nbase_url = \"https://example.com/app\"\n\n[[page_types]]\ntype = \"news_reader\"\ncontent_types = [\"news\"]"
        )
        .unwrap();

        let config = RoutingConfig::from_path(file.path()).unwrap();
        assert_eq!(config.page_types[0].content_types(), [crate::ContentType::News]);
        assert_eq!(config.request_context().unwrap().base_path(), "/app");
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RoutingConfig::from_path(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(..))));
    }
}
