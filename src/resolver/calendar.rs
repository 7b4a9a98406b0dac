use super::{
    ContentUrlResolver, LinkTarget, date_parameters, descriptive_parameter, foreign_content,
    identifier_parameters, identifier_token, identifier_values, insert_date_values,
    load_from_archives, resolve_link,
};
use crate::content::{Collaborators, Content, ContentType, PageModel};
use crate::core::Result;
use crate::route::{ContentUrlResult, ParamValue, ParameterMap, UrlParameter};
use crate::utils::standardize;

/// Calendar events: linked like news, dated by their start time.
#[derive(Debug, Clone)]
pub struct CalendarEventResolver {
    collaborators: Collaborators,
}

impl CalendarEventResolver {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }
}

impl ContentUrlResolver for CalendarEventResolver {
    fn name(&self) -> &'static str {
        "calendar_event"
    }

    fn content_type(&self) -> ContentType {
        ContentType::CalendarEvent
    }

    fn resolve(&self, content: &Content) -> Result<ContentUrlResult> {
        let Content::CalendarEvent(event) = content else {
            return Ok(ContentUrlResult::abstain());
        };
        let target = LinkTarget {
            source: event.source,
            jump_to: event.jump_to,
            article_id: event.article_id,
            url: &event.url,
        };
        resolve_link(&self.collaborators, ContentType::CalendarEvent, event.pid, &target)
    }

    fn available_parameters(&self, _page: &PageModel) -> Vec<UrlParameter> {
        let kind = ContentType::CalendarEvent;
        let mut params = identifier_parameters(&self.collaborators, kind);
        params.push(descriptive_parameter(&self.collaborators, kind, "title"));
        params.extend(date_parameters(&self.collaborators, kind));
        params
    }

    fn parameters_for_content(&self, content: &Content, _page: &PageModel) -> Result<ParameterMap> {
        let Content::CalendarEvent(event) = content else {
            return Err(foreign_content(self.name(), content));
        };
        let mut values = identifier_values(&event.alias, event.id, "");
        values.insert(
            "title".to_string(),
            ParamValue::Str(standardize(&event.title, &self.collaborators.slug)),
        );
        insert_date_values(&mut values, event.start_time);
        Ok(values)
    }

    fn load_content(
        &self,
        identifier: &str,
        parameter: &UrlParameter,
        page: &PageModel,
    ) -> Option<Content> {
        let token = identifier_token(identifier, parameter)?;
        load_from_archives(&self.collaborators, ContentType::CalendarEvent, token, page)
    }
}
