//! Collaborators consumed by the resolvers.
//!
//! Translation and insert-tag substitution are opaque services of the
//! surrounding application. The defaults here are table driven and are
//! what the command line driver and the tests use.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};

use super::ContentLoader;
use crate::config::SlugConfig;
use crate::core::RequestContext;

/// Human-readable strings for parameter descriptions.
pub trait Translator: Send + Sync {
    /// Translate `key` in `domain`. Unknown keys translate to themselves.
    fn trans(&self, key: &str, domain: &str) -> String;
}

/// Substitution of `{{tag}}` placeholders in stored URLs.
pub trait InsertTagParser: Send + Sync {
    fn replace_inline(&self, raw: &str) -> String;
}

/// Translator that always answers with the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn trans(&self, key: &str, _domain: &str) -> String {
        key.to_string()
    }
}

/// Translator backed by a fixed catalog, falling back to the key.
#[derive(Debug, Clone, Default)]
pub struct StaticTranslator {
    catalog: BTreeMap<String, String>,
}

impl StaticTranslator {
    pub fn new(catalog: BTreeMap<String, String>) -> Self {
        Self { catalog }
    }
}

impl Translator for StaticTranslator {
    fn trans(&self, key: &str, _domain: &str) -> String {
        self.catalog
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// `{{name}}` or `{{name::argument}}`.
static INSERT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("valid insert tag pattern"));

/// Insert tag parser with a fixed tag table.
///
/// Unknown tags are left in place so a broken link stays visible.
#[derive(Debug, Clone, Default)]
pub struct StaticInsertTags {
    tags: BTreeMap<String, String>,
}

impl StaticInsertTags {
    pub fn new(tags: BTreeMap<String, String>) -> Self {
        Self { tags }
    }
}

impl InsertTagParser for StaticInsertTags {
    fn replace_inline(&self, raw: &str) -> String {
        if !raw.contains("{{") {
            return raw.to_string();
        }
        INSERT_TAG
            .replace_all(raw, |caps: &Captures<'_>| {
                self.tags
                    .get(caps[1].trim())
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// Everything a resolver needs besides the content itself.
#[derive(Clone)]
pub struct Collaborators {
    pub loader: Arc<dyn ContentLoader>,
    pub translator: Arc<dyn Translator>,
    pub insert_tags: Arc<dyn InsertTagParser>,
    pub request: RequestContext,
    pub slug: SlugConfig,
}

impl Collaborators {
    /// Collaborators with key translation and no insert tags.
    pub fn new(loader: Arc<dyn ContentLoader>, request: RequestContext) -> Self {
        Self {
            loader,
            translator: Arc::new(KeyTranslator),
            insert_tags: Arc::new(StaticInsertTags::default()),
            request,
            slug: SlugConfig::default(),
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_insert_tags(mut self, insert_tags: Arc<dyn InsertTagParser>) -> Self {
        self.insert_tags = insert_tags;
        self
    }

    pub fn with_slug(mut self, slug: SlugConfig) -> Self {
        self.slug = slug;
        self
    }

    /// Parameter description for `<table>.<name>`.
    pub fn describe(&self, table: &str, name: &str) -> String {
        self.translator
            .trans(&format!("{table}.{name}"), "route_parameters")
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("request", &self.request)
            .field("slug", &self.slug)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_translator_echoes_key() {
        assert_eq!(KeyTranslator.trans("tl_news.alias", "route_parameters"), "tl_news.alias");
    }

    #[test]
    fn test_static_translator_falls_back_to_key() {
        let mut catalog = BTreeMap::new();
        catalog.insert("tl_news.alias".to_string(), "News alias".to_string());
        let translator = StaticTranslator::new(catalog);
        assert_eq!(translator.trans("tl_news.alias", "route_parameters"), "News alias");
        assert_eq!(translator.trans("tl_news.id", "route_parameters"), "tl_news.id");
    }

    #[test]
    fn test_insert_tags_replace_known_keep_unknown() {
        let mut tags = BTreeMap::new();
        tags.insert("env::url".to_string(), "https://example.com".to_string());
        let parser = StaticInsertTags::new(tags);
        assert_eq!(
            parser.replace_inline("{{env::url}}/shop"),
            "https://example.com/shop"
        );
        assert_eq!(parser.replace_inline("{{link_url::9}}"), "{{link_url::9}}");
        assert_eq!(parser.replace_inline("plain"), "plain");
    }
}
