//! URL parameter descriptors and values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Value of a URL parameter: numeric ids stay integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Str(String),
}

impl ParamValue {
    /// String form, as it appears in a URL.
    pub fn as_string(&self) -> String {
        self.to_string()
    }

    /// Whether a raw URL segment denotes this value.
    #[inline]
    pub fn matches_raw(&self, raw: &str) -> bool {
        match self {
            Self::Str(s) => s == raw,
            Self::Int(n) => raw.parse::<i64>().is_ok_and(|r| r == *n) && !raw.starts_with('+'),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or_else(|_| Self::Str(n.to_string()), Self::Int)
    }
}

/// Named parameter values (path variables).
pub type ParameterMap = BTreeMap<String, ParamValue>;

/// Query-only parameters, appended verbatim.
pub type QueryParams = BTreeMap<String, String>;

/// Immutable descriptor of one named URL parameter.
///
/// Built once per resolver call with the `with_*` builders and never
/// changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlParameter {
    name: String,
    description: String,
    requirement: Option<String>,
    default: Option<ParamValue>,
    identifier: bool,
}

impl UrlParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            requirement: None,
            default: None,
            identifier: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.requirement = Some(requirement.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<ParamValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark as identifying a content instance within its page.
    pub fn identifier(mut self) -> Self {
        self.identifier = true;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn requirement(&self) -> Option<&str> {
        self.requirement.as_deref()
    }

    #[inline]
    pub fn default_value(&self) -> Option<&ParamValue> {
        self.default.as_ref()
    }

    #[inline]
    pub const fn is_identifier(&self) -> bool {
        self.identifier
    }
}
