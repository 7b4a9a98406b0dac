//! `[[page_types]]` entries: route shape of one page type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ConfigDiagnostics;
use crate::content::ContentType;
use crate::route::{CompiledRoute, RouteConfig, RoutePath};

/// `path = true | false | "default" | "<template>"`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PathSetting {
    Enabled(bool),
    Template(String),
}

impl Default for PathSetting {
    fn default() -> Self {
        Self::Enabled(true)
    }
}

impl PathSetting {
    pub fn to_route_path(&self) -> RoutePath {
        match self {
            Self::Enabled(false) => RoutePath::Unroutable,
            Self::Enabled(true) => RoutePath::Default,
            Self::Template(t) if t.is_empty() || t == "default" => RoutePath::Default,
            Self::Template(t) => RoutePath::Custom(t.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageTypeConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub path: PathSetting,
    /// Replaces the page suffix for pages of this type.
    pub url_suffix: Option<String>,
    pub requirements: BTreeMap<String, String>,
    pub defaults: BTreeMap<String, String>,
    pub options: BTreeMap<String, String>,
    pub methods: Vec<String>,
    /// Unset means the built-in rule (no composition for redirect/forward).
    pub content_composition: Option<bool>,
    /// Content kinds rendered by pages of this type (`news`, `tl_faq`, ...).
    pub content_types: Vec<String>,
}

impl PageTypeConfig {
    pub fn route_config(&self) -> RouteConfig {
        RouteConfig {
            path: self.path.to_route_path(),
            url_suffix: self.url_suffix.clone(),
            requirements: self.requirements.clone(),
            defaults: self.defaults.clone(),
            options: self.options.clone(),
            methods: self.methods.iter().map(|m| m.to_ascii_uppercase()).collect(),
        }
    }

    /// Parsed content kinds; unknown names are skipped (reported by `validate`).
    pub fn content_types(&self) -> Vec<ContentType> {
        self.content_types
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect()
    }

    pub fn validate(&self, index: usize, diag: &mut ConfigDiagnostics) {
        let field = |name: &str| format!("page_types[{index}].{name}");

        if self.kind.trim().is_empty() {
            diag.error(field("type"), "page type name is empty");
        }

        for name in &self.content_types {
            if name.parse::<ContentType>().is_err() {
                let known = ContentType::ALL.map(ContentType::name).join(", ");
                diag.error_with_hint(
                    field("content_types"),
                    format!("unknown content type `{name}`"),
                    format!("known types: {known}"),
                );
            }
        }

        if let RoutePath::Custom(template) = self.path.to_route_path() {
            let absolute = if template.starts_with('/') {
                template
            } else {
                format!("/alias/{template}")
            };
            if let Err(e) = CompiledRoute::compile(&absolute, &self.requirements, &self.defaults) {
                diag.error(field("path"), e.to_string());
            }
        } else {
            for (name, requirement) in &self.requirements {
                if let Err(e) = regex::Regex::new(requirement) {
                    diag.error(field(&format!("requirements.{name}")), e.to_string());
                }
            }
        }

        for method in &self.methods {
            if !matches!(
                method.to_ascii_uppercase().as_str(),
                "GET" | "HEAD" | "POST" | "PUT" | "PATCH" | "DELETE" | "OPTIONS"
            ) {
                diag.warn(field("methods"), format!("unusual HTTP method `{method}`"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> PageTypeConfig {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn test_path_setting_variants() {
        assert_eq!(parse("type = \"regular\"").route_config().path, RoutePath::Default);
        assert_eq!(
            parse("type = \"error_404\"\npath = false").route_config().path,
            RoutePath::Unroutable
        );
        assert_eq!(
            parse("type = \"regular\"\npath = \"default\"").route_config().path,
            RoutePath::Default
        );
        assert_eq!(
            parse("type = \"feed\"\npath = \"{category}\"").route_config().path,
            RoutePath::Custom("{category}".to_string())
        );
    }

    #[test]
    fn test_content_types_accept_name_and_table() {
        let config = parse("type = \"reader\"\ncontent_types = [\"news\", \"tl_faq\", \"nope\"]");
        assert_eq!(config.content_types(), [ContentType::News, ContentType::Faq]);

        let mut diag = ConfigDiagnostics::new();
        config.validate(0, &mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert!(diag.errors()[0].message.contains("nope"));
    }

    #[test]
    fn test_invalid_template_is_reported() {
        let config = parse("type = \"broken\"\npath = \"/{a}/{a}\"");
        let mut diag = ConfigDiagnostics::new();
        config.validate(3, &mut diag);
        assert_eq!(diag.errors()[0].field, "page_types[3].path");
    }

    #[test]
    fn test_methods_are_uppercased() {
        let config = parse("type = \"api\"\nmethods = [\"get\", \"post\"]");
        assert_eq!(config.route_config().methods, ["GET", "POST"]);
    }
}
