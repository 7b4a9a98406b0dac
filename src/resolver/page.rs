use super::{ContentUrlResolver, foreign_content};
use crate::content::{Collaborators, Content, ContentType, PageModel, StringUrl};
use crate::core::{Result, RoutingError};
use crate::route::{ContentUrlResult, ParameterMap, UrlParameter};
use crate::{debug, log};

/// Pages render themselves, except the legacy jump types.
///
/// - `redirect`: continue with the stored URL
/// - `forward`: continue with `jump_to`, or the first published regular child
/// - anything else: resolve to itself (fixed point)
#[derive(Debug, Clone)]
pub struct PageResolver {
    collaborators: Collaborators,
}

impl PageResolver {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    fn forward_target(&self, page: &PageModel) -> Result<ContentUrlResult> {
        let loader = &self.collaborators.loader;
        let target = match page.jump_to {
            Some(id) => loader.find_published_page(id),
            None => loader.find_first_published_regular_by_pid(page.id),
        };

        match target {
            Some(target) => {
                debug!("route"; "forward page {} -> page {}", page.id, target.id);
                Ok(ContentUrlResult::redirect(Content::Page(target)))
            }
            None => {
                log!("error"; "forward page {} ({}) has no published target", page.id, page.alias_or_id());
                Err(RoutingError::ForwardPageNotFound(format!(
                    "page {} ({})",
                    page.id,
                    page.alias_or_id()
                )))
            }
        }
    }
}

impl ContentUrlResolver for PageResolver {
    fn name(&self) -> &'static str {
        "page"
    }

    fn content_type(&self) -> ContentType {
        ContentType::Page
    }

    fn resolve(&self, content: &Content) -> Result<ContentUrlResult> {
        let Content::Page(page) = content else {
            return Ok(ContentUrlResult::abstain());
        };

        match page.kind.as_str() {
            "redirect" => {
                if page.url.trim().is_empty() {
                    log!("error"; "redirect page {} has no target url", page.id);
                    return Err(RoutingError::ForwardPageNotFound(format!(
                        "redirect page {} ({}) has no url",
                        page.id,
                        page.alias_or_id()
                    )));
                }
                Ok(ContentUrlResult::redirect(StringUrl::new(page.url.clone())))
            }
            "forward" => self.forward_target(page),
            _ => Ok(ContentUrlResult::resolve(content.clone())),
        }
    }

    fn available_parameters(&self, _page: &PageModel) -> Vec<UrlParameter> {
        Vec::new()
    }

    fn parameters_for_content(&self, content: &Content, _page: &PageModel) -> Result<ParameterMap> {
        match content {
            Content::Page(_) => Ok(ParameterMap::new()),
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
