//! `[slug]` section: how descriptive parameters are standardized.

use serde::{Deserialize, Serialize};

/// Transliteration mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Unicode → ASCII, always lowercase.
    Full,
    /// Drop unsafe characters, keep Unicode letters (default).
    #[default]
    Safe,
    /// Unicode → ASCII, case per [`SlugCase`].
    Ascii,
    /// Keep the text as is (trimmed).
    No,
}

/// Case transformation mode for slugs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugCase {
    #[default]
    Lower,
    Upper,
    /// Capitalize each word.
    Capitalize,
    Preserve,
}

/// Separator between words.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugSeparator {
    #[default]
    Dash,
    Underscore,
}

impl SlugSeparator {
    pub const fn as_char(&self) -> char {
        match self {
            Self::Dash => '-',
            Self::Underscore => '_',
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SlugConfig {
    /// Mode for descriptive path parameters.
    pub path: SlugMode,
    pub separator: SlugSeparator,
    pub case: SlugCase,
}
