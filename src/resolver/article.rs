use super::{
    ContentUrlResolver, descriptive_parameter, foreign_content, identifier_parameters,
    identifier_token, identifier_values,
};
use crate::content::{Collaborators, Content, ContentType, PageModel};
use crate::core::Result;
use crate::route::{ContentUrlResult, ParamValue, ParameterMap, UrlParameter};
use crate::utils::standardize;

/// Articles render on the page they belong to.
///
/// The legacy `parameters` value is `/articles/<alias-or-id>`.
#[derive(Debug, Clone)]
pub struct ArticleResolver {
    collaborators: Collaborators,
}

impl ArticleResolver {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }
}

impl ContentUrlResolver for ArticleResolver {
    fn name(&self) -> &'static str {
        "article"
    }

    fn content_type(&self) -> ContentType {
        ContentType::Article
    }

    fn resolve(&self, content: &Content) -> Result<ContentUrlResult> {
        let Content::Article(article) = content else {
            return Ok(ContentUrlResult::abstain());
        };
        Ok(self
            .collaborators
            .loader
            .find_page_with_details(article.pid)
            .map_or_else(ContentUrlResult::abstain, |page| {
                ContentUrlResult::resolve(Content::Page(page))
            }))
    }

    fn available_parameters(&self, _page: &PageModel) -> Vec<UrlParameter> {
        let mut params = identifier_parameters(&self.collaborators, ContentType::Article);
        params.push(descriptive_parameter(
            &self.collaborators,
            ContentType::Article,
            "title",
        ));
        params
    }

    fn parameters_for_content(&self, content: &Content, _page: &PageModel) -> Result<ParameterMap> {
        let Content::Article(article) = content else {
            return Err(foreign_content(self.name(), content));
        };
        let mut values = identifier_values(&article.alias, article.id, "articles/");
        values.insert(
            "title".to_string(),
            ParamValue::Str(standardize(&article.title, &self.collaborators.slug)),
        );
        Ok(values)
    }

    /// Articles are only found on the page they belong to.
    fn load_content(
        &self,
        identifier: &str,
        parameter: &UrlParameter,
        page: &PageModel,
    ) -> Option<Content> {
        let token = identifier_token(identifier, parameter)?;
        self.collaborators
            .loader
            .find_published_by_id_or_alias_and_pid(ContentType::Article, token, page.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_article_resolves_to_parent_page() {
        let world = fixtures::world();
        let resolver = ArticleResolver::new(world.collaborators.clone());
        let article = world.content(ContentType::Article, fixtures::ARTICLE_ID);

        let result = resolver.resolve(&article).unwrap();
        assert!(matches!(result, ContentUrlResult::Resolve(Content::Page(ref p)) if p.id == fixtures::ABOUT));
    }

    #[test]
    fn test_article_parameters() {
        let world = fixtures::world();
        let resolver = ArticleResolver::new(world.collaborators.clone());
        let article = world.content(ContentType::Article, fixtures::ARTICLE_ID);

        let values = resolver
            .parameters_for_content(&article, &world.page(fixtures::ABOUT))
            .unwrap();
        assert_eq!(values["parameters"], ParamValue::from("/articles/team"));
        assert_eq!(values["title"], ParamValue::from("our-team"));
    }

    #[test]
    fn test_article_lookup_is_scoped_to_page() {
        let world = fixtures::world();
        let resolver = ArticleResolver::new(world.collaborators.clone());
        let about = world.page(fixtures::ABOUT);
        let other = world.page(fixtures::NEWS_READER);
        let alias = &resolver.available_parameters(&about)[0];

        assert!(resolver.load_content("team", alias, &about).is_some());
        assert!(resolver.load_content("team", alias, &other).is_none());
    }
}
