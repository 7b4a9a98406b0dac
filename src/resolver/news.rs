use super::{
    ContentUrlResolver, LinkTarget, date_parameters, descriptive_parameter, foreign_content,
    identifier_parameters, identifier_token, identifier_values, insert_date_values,
    load_from_archives, resolve_link,
};
use crate::content::{Collaborators, Content, ContentType, PageModel};
use crate::core::Result;
use crate::route::{ContentUrlResult, ParamValue, ParameterMap, UrlParameter};
use crate::utils::standardize;

/// News items: linked by `source`, described by headline and date.
#[derive(Debug, Clone)]
pub struct NewsResolver {
    collaborators: Collaborators,
}

impl NewsResolver {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }
}

impl ContentUrlResolver for NewsResolver {
    fn name(&self) -> &'static str {
        "news"
    }

    fn content_type(&self) -> ContentType {
        ContentType::News
    }

    fn resolve(&self, content: &Content) -> Result<ContentUrlResult> {
        let Content::News(news) = content else {
            return Ok(ContentUrlResult::abstain());
        };
        let target = LinkTarget {
            source: news.source,
            jump_to: news.jump_to,
            article_id: news.article_id,
            url: &news.url,
        };
        resolve_link(&self.collaborators, ContentType::News, news.pid, &target)
    }

    fn available_parameters(&self, _page: &PageModel) -> Vec<UrlParameter> {
        let kind = ContentType::News;
        let mut params = identifier_parameters(&self.collaborators, kind);
        params.push(descriptive_parameter(&self.collaborators, kind, "headline"));
        params.extend(date_parameters(&self.collaborators, kind));
        params
    }

    fn parameters_for_content(&self, content: &Content, _page: &PageModel) -> Result<ParameterMap> {
        let Content::News(news) = content else {
            return Err(foreign_content(self.name(), content));
        };
        let mut values = identifier_values(&news.alias, news.id, "");
        values.insert(
            "headline".to_string(),
            ParamValue::Str(standardize(&news.headline, &self.collaborators.slug)),
        );
        insert_date_values(&mut values, news.time);
        Ok(values)
    }

    fn load_content(
        &self,
        identifier: &str,
        parameter: &UrlParameter,
        page: &PageModel,
    ) -> Option<Content> {
        let token = identifier_token(identifier, parameter)?;
        load_from_archives(&self.collaborators, ContentType::News, token, page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{LinkSource, NewsItem};
    use crate::fixtures;

    fn resolver(world: &fixtures::World) -> NewsResolver {
        NewsResolver::new(world.collaborators.clone())
    }

    #[test]
    fn test_parameters_for_news_item() {
        let world = fixtures::world();
        let news = world.content(ContentType::News, fixtures::NEWS_ID);
        let page = world.page(fixtures::NEWS_READER);

        let values = resolver(&world).parameters_for_content(&news, &page).unwrap();
        let expected: ParameterMap = [
            ("parameters", ParamValue::from("/hello-world")),
            ("alias", ParamValue::from("hello-world")),
            ("id", ParamValue::Int(42)),
            ("headline", ParamValue::from("hello-world")),
            ("year", ParamValue::from("2024")),
            ("month", ParamValue::from("03")),
            ("day", ParamValue::from("07")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_default_source_resolves_to_archive_page() {
        let world = fixtures::world();
        let news = world.content(ContentType::News, fixtures::NEWS_ID);

        let result = resolver(&world).resolve(&news).unwrap();
        let ContentUrlResult::Resolve(Content::Page(page)) = result else {
            panic!("expected default page, got {result:?}");
        };
        assert_eq!(page.id, fixtures::NEWS_READER);
        // loaded with details
        assert_eq!(page.url_suffix, ".html");
    }

    #[test]
    fn test_internal_source_redirects_to_page() {
        let world = fixtures::world();
        let news = world.content(ContentType::News, fixtures::NEWS_INTERNAL_ID);

        let result = resolver(&world).resolve(&news).unwrap();
        let ContentUrlResult::Redirect(Content::Page(page)) = result else {
            panic!("expected redirect, got {result:?}");
        };
        assert_eq!(page.id, fixtures::ABOUT);
    }

    #[test]
    fn test_external_source_is_absolute() {
        let world = fixtures::world();
        let news = world.content(ContentType::News, fixtures::NEWS_EXTERNAL_ID);

        let result = resolver(&world).resolve(&news).unwrap();
        assert_eq!(result.target_url(), Some("https://example.com/press/release"));
    }

    #[test]
    fn test_deleted_article_falls_back_to_default_page() {
        let world = fixtures::world();
        let news: Content = NewsItem {
            id: 99,
            pid: fixtures::NEWS_ARCHIVE,
            alias: "orphan".to_string(),
            source: LinkSource::Article,
            article_id: Some(9999),
            published: true,
            ..Default::default()
        }
        .into();

        let result = resolver(&world).resolve(&news).unwrap();
        assert!(matches!(result, ContentUrlResult::Resolve(Content::Page(ref p)) if p.id == fixtures::NEWS_READER));
    }

    #[test]
    fn test_article_source_redirects_to_article() {
        let world = fixtures::world();
        let news: Content = NewsItem {
            id: 98,
            pid: fixtures::NEWS_ARCHIVE,
            source: LinkSource::Article,
            article_id: Some(fixtures::ARTICLE_ID),
            ..Default::default()
        }
        .into();

        let result = resolver(&world).resolve(&news).unwrap();
        assert!(matches!(result, ContentUrlResult::Redirect(Content::Article(ref a)) if a.id == fixtures::ARTICLE_ID));
    }

    #[test]
    fn test_load_content_by_alias_and_id() {
        let world = fixtures::world();
        let page = world.page(fixtures::NEWS_READER);
        let resolver = resolver(&world);
        let params = resolver.available_parameters(&page);
        let (alias, id, headline) = (&params[0], &params[1], &params[2]);

        let by_alias = resolver.load_content("hello-world", alias, &page).unwrap();
        assert_eq!(by_alias.id(), Some(fixtures::NEWS_ID));
        let by_id = resolver.load_content("42", id, &page).unwrap();
        assert_eq!(by_id.id(), Some(fixtures::NEWS_ID));

        assert!(resolver.load_content("hello-world", headline, &page).is_none());
        assert!(resolver.load_content("unpublished-draft", alias, &page).is_none());
    }

    #[test]
    fn test_load_content_is_scoped_to_page_archives() {
        let world = fixtures::world();
        let resolver = resolver(&world);
        let reader = world.page(fixtures::NEWS_READER);
        let alias = &resolver.available_parameters(&reader)[0];

        assert!(resolver.load_content("elsewhere", alias, &reader).is_none());

        let press = world.page(fixtures::NEWS_BY_ID_AND_ALIAS);
        let loaded = resolver.load_content("elsewhere", alias, &press).unwrap();
        assert_eq!(loaded.id(), Some(fixtures::PRESS_NEWS_ID));

        let unconfigured = PageModel {
            archives: Vec::new(),
            ..PageModel::clone(&reader)
        };
        assert!(resolver.load_content("hello-world", alias, &unconfigured).is_none());
    }
}
