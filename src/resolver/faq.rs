use super::{
    ContentUrlResolver, default_page, descriptive_parameter, foreign_content,
    identifier_parameters, identifier_token, identifier_values, load_from_archives,
};
use crate::content::{Collaborators, Content, ContentType, PageModel};
use crate::core::Result;
use crate::route::{ContentUrlResult, ParamValue, ParameterMap, UrlParameter};
use crate::utils::standardize;

/// FAQ entries always render on their category's default page.
#[derive(Debug, Clone)]
pub struct FaqResolver {
    collaborators: Collaborators,
}

impl FaqResolver {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }
}

impl ContentUrlResolver for FaqResolver {
    fn name(&self) -> &'static str {
        "faq"
    }

    fn content_type(&self) -> ContentType {
        ContentType::Faq
    }

    fn resolve(&self, content: &Content) -> Result<ContentUrlResult> {
        let Content::Faq(faq) = content else {
            return Ok(ContentUrlResult::abstain());
        };
        Ok(default_page(&self.collaborators, ContentType::Faq, faq.pid))
    }

    fn available_parameters(&self, _page: &PageModel) -> Vec<UrlParameter> {
        let mut params = identifier_parameters(&self.collaborators, ContentType::Faq);
        params.push(descriptive_parameter(
            &self.collaborators,
            ContentType::Faq,
            "question",
        ));
        params
    }

    fn parameters_for_content(&self, content: &Content, _page: &PageModel) -> Result<ParameterMap> {
        let Content::Faq(faq) = content else {
            return Err(foreign_content(self.name(), content));
        };
        let mut values = identifier_values(&faq.alias, faq.id, "");
        values.insert(
            "question".to_string(),
            ParamValue::Str(standardize(&faq.question, &self.collaborators.slug)),
        );
        Ok(values)
    }

    fn load_content(
        &self,
        identifier: &str,
        parameter: &UrlParameter,
        page: &PageModel,
    ) -> Option<Content> {
        let token = identifier_token(identifier, parameter)?;
        load_from_archives(&self.collaborators, ContentType::Faq, token, page)
    }
}
