//! Badge types, badge selectors and badge CSS resolution.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::{shape_of, FieldError, Result};
use crate::field::FieldContext;

/// The eight valid badge types, in their canonical order.
pub const VALID_BADGE_TYPES: [&str; 8] = [
    "success",
    "warning",
    "danger",
    "info",
    "primary",
    "secondary",
    "light",
    "dark",
];

/// Method name reported by badge selector validation errors.
const RENDER_AS_BADGES: &str = "EnumField::render_as_badges";

/// Classification of a badge, which picks its color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeType {
    Success,
    Warning,
    Danger,
    Info,
    Primary,
    #[default]
    Secondary,
    Light,
    Dark,
}

/// A tag outside [`VALID_BADGE_TYPES`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown badge type: {0}")]
pub struct UnknownBadgeType(pub String);

impl BadgeType {
    pub const ALL: [BadgeType; 8] = [
        BadgeType::Success,
        BadgeType::Warning,
        BadgeType::Danger,
        BadgeType::Info,
        BadgeType::Primary,
        BadgeType::Secondary,
        BadgeType::Light,
        BadgeType::Dark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeType::Success => "success",
            BadgeType::Warning => "warning",
            BadgeType::Danger => "danger",
            BadgeType::Info => "info",
            BadgeType::Primary => "primary",
            BadgeType::Secondary => "secondary",
            BadgeType::Light => "light",
            BadgeType::Dark => "dark",
        }
    }

    /// Parse a tag, remapping anything unknown to `secondary`.
    pub fn coerce(tag: &str) -> BadgeType {
        tag.parse().unwrap_or(BadgeType::Secondary)
    }

    /// CSS classes of a badge of this type, e.g. `badge badge-success`.
    pub fn css_class(&self) -> String {
        format!("badge badge-{}", self.as_str())
    }
}

impl fmt::Display for BadgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeType {
    type Err = UnknownBadgeType;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        BadgeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownBadgeType(s.to_string()))
    }
}

/// Callback picking a badge type from a badge key and the field being
/// rendered. Results outside the valid tags fall back to `secondary`.
pub type BadgeCallback = Arc<dyn Fn(&str, &FieldContext) -> String + Send + Sync>;

/// How values of a field are turned into badges on display pages.
#[derive(Clone)]
pub enum BadgeSelector {
    /// `true` renders every value as a `secondary` badge, `false` renders no
    /// badge at all.
    Flag(bool),
    /// Badge type per badge key. Keys that are missing render `secondary`.
    Mapping(IndexMap<String, BadgeType>),
    Callback(BadgeCallback),
}

impl BadgeSelector {
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&str, &FieldContext) -> String + Send + Sync + 'static,
    {
        BadgeSelector::Callback(Arc::new(f))
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, BadgeType>> {
        match self {
            BadgeSelector::Mapping(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Debug for BadgeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadgeSelector::Flag(flag) => f.debug_tuple("Flag").field(flag).finish(),
            BadgeSelector::Mapping(map) => f.debug_tuple("Mapping").field(map).finish(),
            BadgeSelector::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// Argument accepted by `EnumField::render_as_badges`.
///
/// String mappings and raw configuration values are validated when they are
/// turned into a [`BadgeSelector`]; typed selectors are accepted as they are.
#[derive(Debug)]
pub enum BadgeArg {
    Selector(BadgeSelector),
    Mapping(IndexMap<String, String>),
    Raw(serde_json::Value),
}

impl BadgeArg {
    pub(crate) fn into_selector(self) -> Result<BadgeSelector> {
        match self {
            BadgeArg::Selector(selector) => Ok(selector),
            BadgeArg::Mapping(map) => validate_mapping(map).map(BadgeSelector::Mapping),
            BadgeArg::Raw(value) => selector_from_value(value),
        }
    }
}

impl From<BadgeSelector> for BadgeArg {
    fn from(value: BadgeSelector) -> Self {
        BadgeArg::Selector(value)
    }
}

impl From<bool> for BadgeArg {
    fn from(value: bool) -> Self {
        BadgeArg::Selector(BadgeSelector::Flag(value))
    }
}

impl From<IndexMap<String, BadgeType>> for BadgeArg {
    fn from(value: IndexMap<String, BadgeType>) -> Self {
        BadgeArg::Selector(BadgeSelector::Mapping(value))
    }
}

impl From<IndexMap<String, String>> for BadgeArg {
    fn from(value: IndexMap<String, String>) -> Self {
        BadgeArg::Mapping(value)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for BadgeArg {
    fn from(value: [(K, V); N]) -> Self {
        BadgeArg::Mapping(
            value
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<serde_json::Value> for BadgeArg {
    fn from(value: serde_json::Value) -> Self {
        BadgeArg::Raw(value)
    }
}

fn invalid_badge_type(given: &str) -> FieldError {
    FieldError::invalid(
        RENDER_AS_BADGES,
        format!(
            "The values of the mapping passed to the \"{}\" method must be one of the following valid badge types: \"{}\" (\"{}\" given).",
            RENDER_AS_BADGES,
            VALID_BADGE_TYPES.join(", "),
            given
        ),
    )
}

fn validate_mapping(map: IndexMap<String, String>) -> Result<IndexMap<String, BadgeType>> {
    map.into_iter()
        .map(|(key, tag)| match tag.parse::<BadgeType>() {
            Ok(badge) => Ok((key, badge)),
            Err(_) => Err(invalid_badge_type(&tag)),
        })
        .collect()
}

fn selector_from_value(value: serde_json::Value) -> Result<BadgeSelector> {
    use serde_json::Value;
    match value {
        Value::Bool(flag) => Ok(BadgeSelector::Flag(flag)),
        Value::Object(map) => {
            let mut tags = IndexMap::with_capacity(map.len());
            for (key, tag) in map {
                match tag {
                    Value::String(tag) => {
                        tags.insert(key, tag);
                    }
                    other => return Err(invalid_badge_type(&other.to_string())),
                }
            }
            validate_mapping(tags).map(BadgeSelector::Mapping)
        }
        other => Err(FieldError::invalid(
            RENDER_AS_BADGES,
            format!(
                "The argument of the \"{}\" method must be a boolean, a mapping or a closure (\"{}\" given).",
                RENDER_AS_BADGES,
                shape_of(&other)
            ),
        )),
    }
}

/// CSS classes of the badge wrapping a value whose badge key is `key`.
///
/// Returns an empty string when the selector renders no badge.
pub fn resolve_badge_css(selector: &BadgeSelector, key: &str, field: &FieldContext) -> String {
    match selector {
        BadgeSelector::Flag(true) => BadgeType::Secondary.css_class(),
        BadgeSelector::Flag(false) => String::new(),
        BadgeSelector::Mapping(map) => map.get(key).copied().unwrap_or_default().css_class(),
        BadgeSelector::Callback(callback) => {
            let tag = callback(key, field);
            let badge = BadgeType::coerce(&tag);
            if badge.as_str() != tag {
                debug!(key, tag = %tag, "badge callback returned unknown type, using secondary");
            }
            badge.css_class()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn field() -> FieldContext {
        FieldContext::default()
    }

    #[test]
    fn valid_badge_types_match_enum() {
        let names: Vec<&str> = BadgeType::ALL.iter().map(BadgeType::as_str).collect();
        assert_eq!(names, VALID_BADGE_TYPES);
    }

    #[rstest]
    #[case("success")]
    #[case("warning")]
    #[case("danger")]
    #[case("info")]
    #[case("primary")]
    #[case("secondary")]
    #[case("light")]
    #[case("dark")]
    fn mapping_resolves_every_valid_type(#[case] tag: &str) {
        let selector = BadgeArg::from([("key", tag)]).into_selector().unwrap();
        assert_eq!(
            resolve_badge_css(&selector, "key", &field()),
            format!("badge badge-{tag}")
        );
    }

    #[test]
    fn uniform_flag_is_always_secondary() {
        let selector = BadgeSelector::Flag(true);
        for key in ["", "ACTIVE", "1", "anything"] {
            assert_eq!(
                resolve_badge_css(&selector, key, &field()),
                "badge badge-secondary"
            );
        }
    }

    #[test]
    fn disabled_flag_renders_no_badge() {
        assert_eq!(resolve_badge_css(&BadgeSelector::Flag(false), "k", &field()), "");
    }

    #[test]
    fn missing_key_falls_back_to_secondary() {
        let empty = BadgeSelector::Mapping(IndexMap::new());
        assert_eq!(
            resolve_badge_css(&empty, "missing", &field()),
            "badge badge-secondary"
        );

        let selector = BadgeArg::from([("other", "danger")]).into_selector().unwrap();
        assert_eq!(
            resolve_badge_css(&selector, "missing", &field()),
            "badge badge-secondary"
        );
    }

    #[test]
    fn callback_result_is_used_when_valid() {
        let selector = BadgeSelector::callback(|key, _| {
            let tag = if key == "1" { "success" } else { "warning" };
            tag.to_string()
        });
        assert_eq!(resolve_badge_css(&selector, "1", &field()), "badge badge-success");
        assert_eq!(resolve_badge_css(&selector, "2", &field()), "badge badge-warning");
    }

    #[test]
    fn callback_result_outside_valid_types_degrades() {
        let selector = BadgeSelector::callback(|_, _| "fuchsia".to_string());
        assert_eq!(
            resolve_badge_css(&selector, "k", &field()),
            "badge badge-secondary"
        );
    }

    #[test]
    fn callback_receives_key_and_field() {
        let selector = BadgeSelector::callback(|key, field| format!("{}{}", field.property(), key));
        let ctx = FieldContext::new("dan", "enum");
        assert_eq!(resolve_badge_css(&selector, "ger", &ctx), "badge badge-danger");
    }

    #[test]
    fn invalid_mapping_tag_is_rejected() {
        let err = BadgeArg::from([("k", "not-a-real-tag")])
            .into_selector()
            .unwrap_err();
        let message = err.to_string();
        assert!(err.is_invalid_configuration());
        assert!(message.contains("\"not-a-real-tag\" given"));
        assert!(message.contains("success, warning, danger, info, primary, secondary, light, dark"));
    }

    #[test]
    fn mapping_is_stored_without_changes() {
        let selector = BadgeArg::from([("k", "success"), ("j", "dark")])
            .into_selector()
            .unwrap();
        let map = selector.as_mapping().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_index(0), Some((&"k".to_string(), &BadgeType::Success)));
        assert_eq!(map.get_index(1), Some((&"j".to_string(), &BadgeType::Dark)));
    }

    #[test]
    fn raw_values_are_validated() {
        assert!(matches!(
            BadgeArg::from(json!(true)).into_selector().unwrap(),
            BadgeSelector::Flag(true)
        ));
        let mapping = BadgeArg::from(json!({"1": "info"})).into_selector().unwrap();
        assert_eq!(mapping.as_mapping().unwrap()["1"], BadgeType::Info);

        let err = BadgeArg::from(json!("yes")).into_selector().unwrap_err();
        assert!(err.to_string().contains("(\"string\" given)"));
        assert_eq!(err.method(), Some("EnumField::render_as_badges"));

        let err = BadgeArg::from(json!({"k": 3})).into_selector().unwrap_err();
        assert!(err.to_string().contains("(\"3\" given)"));
    }

    #[test]
    fn coerce_and_parse() {
        assert_eq!("danger".parse::<BadgeType>(), Ok(BadgeType::Danger));
        assert_eq!(
            "Danger".parse::<BadgeType>(),
            Err(UnknownBadgeType("Danger".into()))
        );
        assert_eq!(BadgeType::coerce("Danger"), BadgeType::Secondary);
        assert_eq!(BadgeType::coerce("light"), BadgeType::Light);
    }
}
