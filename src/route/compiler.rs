//! Path template compiler.
//!
//! Templates are plain paths with placeholders:
//!
//! | Syntax             | Meaning                                         |
//! |--------------------|-------------------------------------------------|
//! | `{name}`           | variable                                        |
//! | `{!name}`          | important: always emitted, even when default    |
//! | `{name<\d+>}`      | inline requirement                              |
//! | `{name?}`          | optional, empty default                         |
//! | `{name?value}`     | optional with default `value`                   |
//!
//! A compiled route both matches incoming paths and generates paths from
//! a parameter map. Trailing variables whose value equals their default
//! are left out of generated paths.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use url::form_urlencoded;

use super::{PageRoute, ParameterMap, QueryParams};
use crate::core::{RequestContext, Result, RoutingError, encode_path};

/// `{!name<requirement>?default}` with every part but the name optional.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(!)?(\w+)(?:<([^>]+)>)?(\?([^}]*))?\}").expect("valid placeholder pattern")
});

/// A placeholder as written in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub important: bool,
    /// Carries its own `<requirement>`.
    pub inline_requirement: bool,
    /// Marked `?` (with or without a default).
    pub optional: bool,
}

/// Placeholders of `path`, in order.
pub fn placeholders(path: &str) -> Vec<Placeholder> {
    PLACEHOLDER
        .captures_iter(path)
        .map(|caps| Placeholder {
            name: caps[2].to_string(),
            important: caps.get(1).is_some(),
            inline_requirement: caps.get(3).is_some(),
            optional: caps.get(4).is_some(),
        })
        .collect()
}

/// Characters that belong to the following variable when they precede it.
const SEPARATORS: &str = "/,;.:-_~+*=@|";

/// Requirement of variables without an explicit one.
const DEFAULT_REQUIREMENT: &str = "[^/]+?";

#[derive(Debug, Clone)]
enum Token {
    Text(String),
    Variable {
        prefix: String,
        name: String,
        important: bool,
        requirement: String,
        /// `^(?:requirement)$`, checked on generation.
        validator: Regex,
    },
}

/// A template compiled for matching and generation.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    path: String,
    tokens: Vec<Token>,
    variables: Vec<String>,
    defaults: BTreeMap<String, String>,
    matcher: Regex,
}

impl CompiledRoute {
    /// Compile `path` with route-level requirements and defaults.
    ///
    /// Inline requirements and defaults win over the maps.
    pub fn compile(
        path: &str,
        requirements: &BTreeMap<String, String>,
        defaults: &BTreeMap<String, String>,
    ) -> Result<Self> {
        let template_error = |reason: String| RoutingError::Template {
            path: path.to_string(),
            reason,
        };

        let mut defaults = defaults.clone();
        let mut tokens = Vec::new();
        let mut variables: Vec<String> = Vec::new();
        let mut cursor = 0;

        for caps in PLACEHOLDER.captures_iter(path) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let mut text = path[cursor..whole.start()].to_string();
            cursor = whole.end();

            let name = caps[2].to_string();
            if variables.contains(&name) {
                return Err(template_error(format!("variable `{name}` is used twice")));
            }

            let prefix = match text.chars().last() {
                Some(c) if SEPARATORS.contains(c) => {
                    text.pop();
                    c.to_string()
                }
                _ => String::new(),
            };
            if !text.is_empty() {
                tokens.push(Token::Text(text));
            }

            if caps.get(4).is_some() {
                let default = caps.get(5).map_or("", |m| m.as_str());
                defaults.insert(name.clone(), default.to_string());
            }
            let requirement = caps
                .get(3)
                .map(|m| m.as_str())
                .or_else(|| requirements.get(&name).map(String::as_str))
                .unwrap_or(DEFAULT_REQUIREMENT)
                .to_string();
            let validator = Regex::new(&format!("^(?:{requirement})$"))
                .map_err(|e| template_error(format!("requirement of `{name}`: {e}")))?;

            tokens.push(Token::Variable {
                prefix,
                name: name.clone(),
                important: caps.get(1).is_some(),
                requirement,
                validator,
            });
            variables.push(name);
        }
        if cursor < path.len() {
            tokens.push(Token::Text(path[cursor..].to_string()));
        }

        let matcher = build_matcher(&tokens, &defaults)
            .map_err(|e| template_error(format!("invalid pattern: {e}")))?;

        Ok(Self {
            path: path.to_string(),
            tokens,
            variables,
            defaults,
            matcher,
        })
    }

    /// Template this route was compiled from.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path variable names, in template order.
    #[inline]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    #[inline]
    pub fn defaults(&self) -> &BTreeMap<String, String> {
        &self.defaults
    }

    /// Match a decoded path. Returns defaults merged with the matched variables.
    pub fn match_path(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let caps = self.matcher.captures(path)?;
        let mut params = self.defaults.clone();
        for name in &self.variables {
            if let Some(value) = caps.name(name) {
                params.insert(name.clone(), value.as_str().to_string());
            }
        }
        Some(params)
    }

    /// Generate a percent-encoded path from `params`.
    ///
    /// Every variable needs a value or a default. Values must satisfy
    /// their requirement.
    pub fn generate(&self, params: &ParameterMap) -> Result<String> {
        let value_of = |name: &str| -> Option<String> {
            params
                .get(name)
                .map(ToString::to_string)
                .or_else(|| self.defaults.get(name).cloned())
        };

        if let Some(missing) = self.variables.iter().find(|name| value_of(name).is_none()) {
            return Err(RoutingError::MissingParameter {
                name: missing.clone(),
                path: self.path.clone(),
            });
        }

        let mut url = String::new();
        let mut optional = true;
        for token in self.tokens.iter().rev() {
            match token {
                Token::Text(text) => {
                    url.insert_str(0, &encode_path(text));
                    optional = false;
                }
                Token::Variable {
                    prefix,
                    name,
                    important,
                    requirement,
                    validator,
                } => {
                    let value = value_of(name).unwrap_or_default();
                    let is_default = self.defaults.get(name) == Some(&value);
                    if !optional || *important || !is_default {
                        if !validator.is_match(&value) {
                            return Err(RoutingError::InvalidParameter {
                                name: name.clone(),
                                value,
                                requirement: requirement.clone(),
                            });
                        }
                        url.insert_str(0, &format!("{prefix}{}", encode_path(&value)));
                        optional = false;
                    }
                }
            }
        }

        if url.is_empty() {
            url.push('/');
        }
        Ok(url)
    }
}

/// Anchored matcher; the trailing run of defaulted, non-important
/// variables becomes optional.
fn build_matcher(
    tokens: &[Token],
    defaults: &BTreeMap<String, String>,
) -> std::result::Result<Regex, regex::Error> {
    let mut first_optional = tokens.len();
    for (index, token) in tokens.iter().enumerate().rev() {
        match token {
            Token::Variable {
                name, important, ..
            } if !important && defaults.contains_key(name) => first_optional = index,
            _ => break,
        }
    }

    let mut pattern = String::from("^");
    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::Text(text) => pattern.push_str(&regex::escape(text)),
            Token::Variable {
                prefix,
                name,
                requirement,
                ..
            } => {
                let group = format!("{}(?P<{name}>{requirement})", regex::escape(prefix));
                if index >= first_optional {
                    pattern.push_str("(?:");
                    pattern.push_str(&group);
                } else {
                    pattern.push_str(&group);
                }
            }
        }
    }
    for _ in first_optional..tokens.len() {
        pattern.push_str(")?");
    }
    pattern.push('$');
    Regex::new(&pattern)
}

// ============================================================================
// URL generator
// ============================================================================

/// Assembles absolute URLs for page routes.
pub trait UrlGenerator: Send + Sync {
    fn generate(&self, route: &PageRoute, params: &ParameterMap, query: &QueryParams)
    -> Result<String>;
}

/// Generator over [`CompiledRoute`]: origin + base path + path + query.
///
/// The origin uses the page's domain when it has one, the request host
/// otherwise.
#[derive(Debug, Clone)]
pub struct TemplateUrlGenerator {
    request: RequestContext,
}

impl TemplateUrlGenerator {
    pub fn new(request: RequestContext) -> Self {
        Self { request }
    }
}

impl UrlGenerator for TemplateUrlGenerator {
    fn generate(
        &self,
        route: &PageRoute,
        params: &ParameterMap,
        query: &QueryParams,
    ) -> Result<String> {
        let compiled = route.compile()?;
        let path = compiled.generate(params)?;
        let origin = self.request.origin_for(&route.page.domain);

        let mut url = format!("{origin}{}{path}", self.request.base_path());
        if !query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter())
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        Ok(url)
    }
}
