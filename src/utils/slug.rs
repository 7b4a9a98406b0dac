//! Descriptive URL fragments.
//!
//! `standardize` turns titles, headlines and questions into the text used
//! for descriptive URL parameters (`Hello World!` → `hello-world`).

use std::borrow::Cow;

use deunicode::deunicode;

use crate::config::{SlugCase, SlugConfig, SlugMode};

/// Characters that collapse into a single separator.
#[inline]
fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '.' | '&' | '/' | '-')
}

/// Standardize `text` for use as a URL parameter value.
///
/// Letters, digits and `_` are kept; runs of whitespace, `.`, `&`, `/`
/// and `-` become one separator; everything else is dropped. A value
/// starting with a digit gets an `id` prefix so it can never be mistaken
/// for a numeric id.
pub fn standardize(text: &str, config: &SlugConfig) -> String {
    if config.path == SlugMode::No {
        return text.trim().to_string();
    }

    let source: Cow<'_, str> = match config.path {
        SlugMode::Full | SlugMode::Ascii => Cow::Owned(deunicode(text)),
        SlugMode::Safe | SlugMode::No => Cow::Borrowed(text),
    };
    let separator = config.separator.as_char();

    let mut slug = String::with_capacity(source.len());
    let mut pending = false;
    for ch in source.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            if pending && !slug.is_empty() {
                slug.push(separator);
            }
            pending = false;
            slug.push(ch);
        } else if is_separator(ch) {
            pending = true;
        }
    }

    let case = if config.path == SlugMode::Full {
        &SlugCase::Lower
    } else {
        &config.case
    };
    let slug = apply_case(&slug, case, separator);

    if slug.starts_with(|c: char| c.is_ascii_digit()) {
        format!("id{separator}{slug}")
    } else {
        slug
    }
}

fn apply_case(slug: &str, case: &SlugCase, separator: char) -> String {
    match case {
        SlugCase::Lower => slug.to_lowercase(),
        SlugCase::Upper => slug.to_uppercase(),
        SlugCase::Preserve => slug.to_string(),
        SlugCase::Capitalize => slug
            .split(separator)
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(&separator.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlugSeparator;

    fn config(path: SlugMode) -> SlugConfig {
        SlugConfig {
            path,
            ..Default::default()
        }
    }

    #[test]
    fn test_standardize_basic() {
        let cfg = SlugConfig::default();
        assert_eq!(standardize("Hello World!", &cfg), "hello-world");
        assert_eq!(standardize("  Rust & Co. / News  ", &cfg), "rust-co-news");
        assert_eq!(standardize("a--b", &cfg), "a-b");
    }

    #[test]
    fn test_standardize_numeric_prefix() {
        let cfg = SlugConfig::default();
        assert_eq!(standardize("2024 Review", &cfg), "id-2024-review");
    }

    #[test]
    fn test_standardize_unicode_modes() {
        assert_eq!(standardize("Café Müller", &config(SlugMode::Safe)), "café-müller");
        assert_eq!(standardize("Café Müller", &config(SlugMode::Ascii)), "cafe-muller");
        assert_eq!(standardize("Café Müller", &config(SlugMode::No)), "Café Müller");
    }

    #[test]
    fn test_standardize_separator_and_case() {
        let cfg = SlugConfig {
            separator: SlugSeparator::Underscore,
            case: SlugCase::Capitalize,
            ..Default::default()
        };
        assert_eq!(standardize("hello big world", &cfg), "Hello_Big_World");

        let full = SlugConfig {
            path: SlugMode::Full,
            case: SlugCase::Upper,
            ..Default::default()
        };
        assert_eq!(standardize("Straße", &full), "strasse");
    }

    #[test]
    fn test_standardize_empty() {
        assert_eq!(standardize("?!", &SlugConfig::default()), "");
    }
}
