//! Content URL resolvers.
//!
//! One resolver per content kind. A resolver answers three questions for
//! its kind:
//!
//! - where does this content go next (`resolve`)
//! - which URL parameters can describe it on a page (`available_parameters`,
//!   `parameters_for_content`)
//! - which content does a URL token denote (`load_content`)
//!
//! Dispatch is predicate-guarded: `resolve` abstains on foreign content,
//! `parameters_for_content` is only called for kinds the resolver
//! supports and rejects anything else with `InvalidArgument`.

mod article;
mod calendar;
mod faq;
mod news;
mod newsletter;
mod page;
mod string_url;

pub use article::ArticleResolver;
pub use calendar::CalendarEventResolver;
pub use faq::FaqResolver;
pub use news::NewsResolver;
pub use newsletter::NewsletterResolver;
pub use page::PageResolver;
pub use string_url::StringUrlResolver;

use std::sync::Arc;

use crate::content::{Collaborators, Content, ContentType, LinkSource, PageModel};
use crate::core::{Result, RoutingError};
use crate::debug;
use crate::route::{ContentUrlResult, ParamValue, ParameterMap, UrlParameter};
use crate::utils::DateTimeUtc;

/// Resolution and parameter policy of one content kind.
pub trait ContentUrlResolver: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// The kind this resolver handles.
    fn content_type(&self) -> ContentType;

    fn supports_type(&self, content_type: ContentType) -> bool {
        content_type == self.content_type()
    }

    /// Next step for `content`. Foreign content abstains.
    fn resolve(&self, content: &Content) -> Result<ContentUrlResult>;

    /// Parameters this resolver can contribute on `page`.
    fn available_parameters(&self, page: &PageModel) -> Vec<UrlParameter>;

    /// Current values of the available parameters for `content`.
    fn parameters_for_content(&self, content: &Content, page: &PageModel) -> Result<ParameterMap>;

    /// Content denoted by `identifier` for the identifier `parameter`.
    ///
    /// Returns `None` when `parameter` is not an identifier.
    fn load_content(
        &self,
        identifier: &str,
        parameter: &UrlParameter,
        page: &PageModel,
    ) -> Option<Content>;
}

/// Shared handle to a resolver.
pub type SharedResolver = Arc<dyn ContentUrlResolver>;

/// All built-in resolvers in priority order.
pub fn default_resolvers(collaborators: &Collaborators) -> Vec<SharedResolver> {
    vec![
        Arc::new(PageResolver::new(collaborators.clone())),
        Arc::new(ArticleResolver::new(collaborators.clone())),
        Arc::new(NewsResolver::new(collaborators.clone())),
        Arc::new(CalendarEventResolver::new(collaborators.clone())),
        Arc::new(FaqResolver::new(collaborators.clone())),
        Arc::new(NewsletterResolver::new(collaborators.clone())),
        Arc::new(StringUrlResolver::new(collaborators.clone())),
    ]
}

// ============================================================================
// shared helpers
// ============================================================================

/// Misuse of a type-specific operation.
pub(crate) fn foreign_content(resolver: &str, content: &Content) -> RoutingError {
    RoutingError::invalid_argument(format!(
        "{resolver} resolver cannot handle {} content ({})",
        content.content_type(),
        content.key()
    ))
}

/// `alias` and `id` (`\d+`), both identifiers.
pub(crate) fn identifier_parameters(
    collaborators: &Collaborators,
    kind: ContentType,
) -> Vec<UrlParameter> {
    let table = kind.table();
    vec![
        UrlParameter::new("alias")
            .with_description(collaborators.describe(table, "alias"))
            .identifier(),
        UrlParameter::new("id")
            .with_description(collaborators.describe(table, "id"))
            .with_requirement(r"\d+")
            .identifier(),
    ]
}

/// A descriptive (non-identifying) parameter.
pub(crate) fn descriptive_parameter(
    collaborators: &Collaborators,
    kind: ContentType,
    name: &str,
) -> UrlParameter {
    UrlParameter::new(name).with_description(collaborators.describe(kind.table(), name))
}

/// `year` (`\d{4}`), `month` and `day` (`\d{2}`).
///
/// No current-date defaults: every date segment must come from the URL.
pub(crate) fn date_parameters(
    collaborators: &Collaborators,
    kind: ContentType,
) -> Vec<UrlParameter> {
    [("year", r"\d{4}"), ("month", r"\d{2}"), ("day", r"\d{2}")]
        .into_iter()
        .map(|(name, requirement)| {
            descriptive_parameter(collaborators, kind, name).with_requirement(requirement)
        })
        .collect()
}

/// `parameters`, `alias` and `id` values.
///
/// `segment_prefix` goes between the leading slash and the alias of the
/// legacy `parameters` value (`articles/` for articles).
pub(crate) fn identifier_values(alias: &str, id: u64, segment_prefix: &str) -> ParameterMap {
    let alias_value = if alias.is_empty() {
        ParamValue::from(id)
    } else {
        ParamValue::from(alias)
    };
    let mut values = ParameterMap::new();
    values.insert(
        "parameters".to_string(),
        ParamValue::Str(format!("/{segment_prefix}{alias_value}")),
    );
    values.insert("alias".to_string(), alias_value);
    values.insert("id".to_string(), ParamValue::from(id));
    values
}

/// Zero-padded UTC `year`, `month` and `day` of `timestamp`.
pub(crate) fn insert_date_values(values: &mut ParameterMap, timestamp: i64) {
    let (year, month, day) = DateTimeUtc::from_unix(timestamp).ymd_parts();
    values.insert("year".to_string(), ParamValue::Str(year));
    values.insert("month".to_string(), ParamValue::Str(month));
    values.insert("day".to_string(), ParamValue::Str(day));
}

/// Guard for `load_content`: only identifier parameters trigger lookups.
pub(crate) fn identifier_token<'a>(identifier: &'a str, parameter: &UrlParameter) -> Option<&'a str> {
    (parameter.is_identifier() && !identifier.is_empty()).then_some(identifier)
}

/// Public item of `kind` denoted by `token` inside one of `page.archives`.
///
/// A reader page without archives loads nothing.
pub(crate) fn load_from_archives(
    collaborators: &Collaborators,
    kind: ContentType,
    token: &str,
    page: &PageModel,
) -> Option<Content> {
    if page.archives.is_empty() {
        debug!("load"; "page {} has no {} archives", page.id, kind);
        return None;
    }
    page.archives.iter().find_map(|&pid| {
        collaborators
            .loader
            .find_published_by_id_or_alias_and_pid(kind, token, pid)
    })
}

/// The default page of the archive `pid` holding an item of `kind`.
///
/// Abstains when the archive or its page is missing.
pub(crate) fn default_page(
    collaborators: &Collaborators,
    kind: ContentType,
    pid: u64,
) -> ContentUrlResult {
    let page = collaborators
        .loader
        .find_archive(kind, pid)
        .and_then(|archive| archive.jump_to)
        .and_then(|id| collaborators.loader.find_page_with_details(id));

    match page {
        Some(page) => ContentUrlResult::resolve(Content::Page(page)),
        None => {
            debug!("route"; "no default page for {} archive {}", kind, pid);
            ContentUrlResult::abstain()
        }
    }
}

/// Link fields shared by news items and events.
pub(crate) struct LinkTarget<'a> {
    pub source: LinkSource,
    pub jump_to: Option<u64>,
    pub article_id: Option<u64>,
    pub url: &'a str,
}

/// `source`-keyed resolution of linkable items.
///
/// `external` yields an absolute URL, `internal` and `article` redirect to
/// their target. A missing target falls back to the default page.
pub(crate) fn resolve_link(
    collaborators: &Collaborators,
    kind: ContentType,
    pid: u64,
    target: &LinkTarget<'_>,
) -> Result<ContentUrlResult> {
    match target.source {
        LinkSource::External => {
            let url = collaborators.insert_tags.replace_inline(target.url);
            return ContentUrlResult::absolute_url(collaborators.request.make_absolute(&url));
        }
        LinkSource::Internal => {
            if let Some(page) = target
                .jump_to
                .and_then(|id| collaborators.loader.find_page_with_details(id))
            {
                return Ok(ContentUrlResult::redirect(Content::Page(page)));
            }
            debug!("route"; "jump_to page of {} item is gone, using default page", kind);
        }
        LinkSource::Article => {
            if let Some(article) = target
                .article_id
                .and_then(|id| collaborators.loader.find_by_id(ContentType::Article, id))
            {
                return Ok(ContentUrlResult::redirect(article));
            }
            debug!("route"; "article of {} item is gone, using default page", kind);
        }
        LinkSource::Default => {}
    }

    Ok(default_page(collaborators, kind, pid))
}
