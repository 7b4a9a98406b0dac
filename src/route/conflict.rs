//! Alias conflict detection between pages.
//!
//! Two pages of the same domain conflict when their prefix, alias and
//! suffix might produce the same URL. The router cannot answer this
//! (pages may have mandatory parameters), so aliases are compared segment
//! by segment instead.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::PageRoute;
use crate::content::PageModel;
use crate::log;
use crate::utils::plural_count;

/// An optional placeholder (`{page?}`, `{page?1}`) somewhere in a segment.
static OPTIONAL_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?[^}]*\}").expect("valid optional placeholder pattern"));

/// A page whose URL may collide with the checked page.
#[derive(Debug, Clone)]
pub struct RouteConflict {
    pub page: Arc<PageModel>,
    /// Route path of the conflicting page, requirements inlined.
    pub path: String,
}

/// `/prefix/alias+suffix` split into segments.
pub fn split_url(alias: &str, url_prefix: &str, url_suffix: &str) -> Vec<String> {
    let mut url = format!("/{alias}{url_suffix}");
    if !url_prefix.is_empty() {
        url = format!("/{url_prefix}{url}");
    }
    url.trim_matches('/').split('/').map(str::to_string).collect()
}

/// Whether two split URLs might match the same request.
///
/// Every segment of the longer URL must either be a placeholder or equal
/// the segment at the same position of the shorter one. Segments past the
/// end of the shorter URL only overlap when they are optional.
pub fn is_conflicting(a: &[String], b: &[String]) -> bool {
    let (long, short) = if b.len() > a.len() { (b, a) } else { (a, b) };

    for (index, segment) in long.iter().enumerate() {
        let other = short.get(index);
        if other.is_none() && !OPTIONAL_PLACEHOLDER.is_match(segment) {
            return false;
        }
        if segment.contains('{') {
            continue;
        }
        if other != Some(segment) {
            return false;
        }
    }
    true
}

/// Pages among `candidates` whose alias conflicts with `current`.
///
/// Both sides must be loaded with details. Pages of other domains and the
/// page itself are skipped.
pub fn detect_conflicts(
    current: &PageModel,
    candidates: &[Arc<PageModel>],
    route_of: impl Fn(&Arc<PageModel>) -> PageRoute,
) -> Vec<RouteConflict> {
    let current_url = split_url(&current.alias, &current.url_prefix, &current.url_suffix);

    candidates
        .iter()
        .filter(|page| page.id != current.id && page.domain == current.domain)
        .filter(|page| {
            let url = split_url(&page.alias, &page.url_prefix, &page.url_suffix);
            is_conflicting(&current_url, &url)
        })
        .map(|page| RouteConflict {
            page: Arc::clone(page),
            path: route_of(page).path_with_parameters(),
        })
        .collect()
}

/// Print conflicts using the standard log format.
///
/// ```text
/// [conflict] page 12 (news) has 2 conflicts
///   - page 15: /news/{id<\d+>}.html
///   - page 18: /news.html
/// ```
pub fn print_conflicts(page: &PageModel, conflicts: &[RouteConflict]) {
    if conflicts.is_empty() {
        return;
    }
    log!("conflict"; "page {} ({}) has {}", page.id, page.alias_or_id(),
        plural_count(conflicts.len(), "conflict"));
    eprintln!("{}", format_conflicts(conflicts));
}

/// Format conflicts as a string (for error messages).
pub fn format_conflicts(conflicts: &[RouteConflict]) -> String {
    conflicts
        .iter()
        .map(|c| format!("  - page {}: {}", c.page.id, c.path))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(alias: &str) -> Vec<String> {
        split_url(alias, "", ".html")
    }

    fn page(id: u64, alias: &str, domain: &str) -> Arc<PageModel> {
        Arc::new(PageModel {
            id,
            alias: alias.to_string(),
            domain: domain.to_string(),
            url_suffix: ".html".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_split_url() {
        assert_eq!(split_url("news/archive", "en", ".html"), ["en", "news", "archive.html"]);
        assert_eq!(split_url("about", "", ""), ["about"]);
    }

    #[test]
    fn test_identical_aliases_conflict() {
        assert!(is_conflicting(&split("news"), &split("news")));
    }

    #[test]
    fn test_different_segments_do_not_conflict() {
        assert!(!is_conflicting(&split("news"), &split("events")));
        assert!(!is_conflicting(&split("news/a"), &split("news/b")));
    }

    #[test]
    fn test_placeholder_segments_overlap() {
        assert!(is_conflicting(&split("news/{category}"), &split("news/sports")));
    }

    #[test]
    fn test_extra_segment_requires_optional_placeholder() {
        // A mandatory placeholder beyond the shorter URL never matches it
        let short = split_url("news", "", "");
        assert!(!is_conflicting(&split_url("news/{id}", "", ""), &short));
        assert!(is_conflicting(&split_url("news/{id?}", "", ""), &short));
        assert!(!is_conflicting(&split_url("news/archive", "", ""), &short));
    }

    #[test]
    fn test_detect_conflicts_same_domain_only() {
        let current = page(1, "news", "example.com");
        let candidates = vec![
            page(2, "news", "example.com"),
            page(3, "news", "other.org"),
            page(4, "events", "example.com"),
            Arc::clone(&current),
        ];
        let conflicts = detect_conflicts(&current, &candidates, |p| {
            PageRoute::new(Arc::clone(p), format!("/{}", p.alias))
        });
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].page.id, 2);
        assert_eq!(conflicts[0].path, "/news.html");

        let formatted = format_conflicts(&conflicts);
        assert!(formatted.contains("page 2: /news.html"));
    }
}
