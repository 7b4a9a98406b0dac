use super::{ContentUrlResolver, foreign_content};
use crate::content::{Collaborators, Content, ContentType, PageModel};
use crate::core::{LinkKind, Result};
use crate::debug;
use crate::route::{ContentUrlResult, ParameterMap, UrlParameter};

/// Raw URLs end every chain they appear in.
#[derive(Debug, Clone)]
pub struct StringUrlResolver {
    collaborators: Collaborators,
}

impl StringUrlResolver {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }
}

impl ContentUrlResolver for StringUrlResolver {
    fn name(&self) -> &'static str {
        "string_url"
    }

    fn content_type(&self) -> ContentType {
        ContentType::StringUrl
    }

    fn resolve(&self, content: &Content) -> Result<ContentUrlResult> {
        let Content::Url(url) = content else {
            return Ok(ContentUrlResult::abstain());
        };

        let replaced = self.collaborators.insert_tags.replace_inline(&url.value);
        if LinkKind::parse(replaced.trim()).is_absolute() {
            return ContentUrlResult::absolute_url(replaced.trim());
        }

        let absolute = self.collaborators.request.make_absolute(&replaced);
        debug!("route"; "made `{}` absolute: {}", replaced, absolute);
        ContentUrlResult::absolute_url(absolute)
    }

    fn available_parameters(&self, _page: &PageModel) -> Vec<UrlParameter> {
        Vec::new()
    }

    fn parameters_for_content(&self, content: &Content, _page: &PageModel) -> Result<ParameterMap> {
        match content {
            Content::Url(_) => Ok(ParameterMap::new()),
            other => Err(foreign_content(self.name(), other)),
        }
    }

    fn load_content(
        &self,
        _identifier: &str,
        _parameter: &UrlParameter,
        _page: &PageModel,
    ) -> Option<Content> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::*;
    use crate::content::{MemoryStore, StaticInsertTags, StringUrl};
    use crate::core::RequestContext;

    fn resolver() -> StringUrlResolver {
        let request = RequestContext::new("https://example.com/app").unwrap();
        let mut tags = BTreeMap::new();
        tags.insert("link_url::12".to_string(), "/contact".to_string());
        let collaborators = Collaborators::new(Arc::new(MemoryStore::new()), request)
            .with_insert_tags(Arc::new(StaticInsertTags::new(tags)));
        StringUrlResolver::new(collaborators)
    }

    fn resolve(value: &str) -> String {
        let url: Content = StringUrl::new(value).into();
        resolver()
            .resolve(&url)
            .unwrap()
            .target_url()
            .map(str::to_string)
            .unwrap()
    }

    #[test]
    fn test_absolute_urls_are_kept() {
        assert_eq!(resolve("https://contao.org/x"), "https://contao.org/x");
        assert_eq!(resolve("mailto:info@example.com"), "mailto:info@example.com");
    }

    #[test]
    fn test_relative_urls_are_made_absolute() {
        assert_eq!(resolve("/imprint"), "https://example.com/imprint");
        assert_eq!(resolve("imprint"), "https://example.com/app/imprint");
        assert_eq!(resolve("//cdn.example.com/a"), "https://cdn.example.com/a");
    }

    #[test]
    fn test_insert_tags_are_replaced_first() {
        assert_eq!(resolve("{{link_url::12}}"), "https://example.com/contact");
    }

    #[test]
    fn test_string_url_has_no_parameters() {
        let url: Content = StringUrl::new("/x").into();
        let values = resolver()
            .parameters_for_content(&url, &PageModel::default())
            .unwrap();
        assert!(values.is_empty());
    }
}
