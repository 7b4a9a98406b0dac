use super::{
    ContentUrlResolver, date_parameters, default_page, descriptive_parameter, foreign_content,
    identifier_parameters, identifier_token, identifier_values, insert_date_values,
    load_from_archives,
};
use crate::content::{Collaborators, Content, ContentType, PageModel};
use crate::core::Result;
use crate::route::{ContentUrlResult, ParamValue, ParameterMap, UrlParameter};
use crate::utils::standardize;

/// Newsletters render on their channel's default page once sent.
#[derive(Debug, Clone)]
pub struct NewsletterResolver {
    collaborators: Collaborators,
}

impl NewsletterResolver {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }
}

impl ContentUrlResolver for NewsletterResolver {
    fn name(&self) -> &'static str {
        "newsletter"
    }

    fn content_type(&self) -> ContentType {
        ContentType::Newsletter
    }

    fn resolve(&self, content: &Content) -> Result<ContentUrlResult> {
        let Content::Newsletter(newsletter) = content else {
            return Ok(ContentUrlResult::abstain());
        };
        Ok(default_page(
            &self.collaborators,
            ContentType::Newsletter,
            newsletter.pid,
        ))
    }

    fn available_parameters(&self, _page: &PageModel) -> Vec<UrlParameter> {
        let kind = ContentType::Newsletter;
        let mut params = identifier_parameters(&self.collaborators, kind);
        params.push(descriptive_parameter(&self.collaborators, kind, "subject"));
        params.extend(date_parameters(&self.collaborators, kind));
        params
    }

    fn parameters_for_content(&self, content: &Content, _page: &PageModel) -> Result<ParameterMap> {
        let Content::Newsletter(newsletter) = content else {
            return Err(foreign_content(self.name(), content));
        };
        let mut values = identifier_values(&newsletter.alias, newsletter.id, "");
        values.insert(
            "subject".to_string(),
            ParamValue::Str(standardize(&newsletter.subject, &self.collaborators.slug)),
        );
        insert_date_values(&mut values, newsletter.date);
        Ok(values)
    }

    /// Only sent newsletters are found.
    fn load_content(
        &self,
        identifier: &str,
        parameter: &UrlParameter,
        page: &PageModel,
    ) -> Option<Content> {
        let token = identifier_token(identifier, parameter)?;
        load_from_archives(&self.collaborators, ContentType::Newsletter, token, page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_unsent_newsletter_is_not_loaded() {
        let world = fixtures::world();
        let resolver = NewsletterResolver::new(world.collaborators.clone());
        let page = world.page(fixtures::NEWSLETTER_READER);
        let alias = &resolver.available_parameters(&page)[0];

        assert!(resolver.load_content("march-update", alias, &page).is_some());
        assert!(resolver.load_content("april-draft", alias, &page).is_none());
    }

    #[test]
    fn test_newsletter_parameters() {
        let world = fixtures::world();
        let resolver = NewsletterResolver::new(world.collaborators.clone());
        let newsletter = world.content(ContentType::Newsletter, fixtures::NEWSLETTER_ID);

        let values = resolver
            .parameters_for_content(&newsletter, &world.page(fixtures::NEWSLETTER_READER))
            .unwrap();
        assert_eq!(values["subject"], ParamValue::from("march-update"));
        assert_eq!(values["year"], ParamValue::from("2024"));
        assert_eq!(values["month"], ParamValue::from("03"));
    }
}
