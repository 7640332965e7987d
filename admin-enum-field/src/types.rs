//! Declarative enum field definitions.
//!
//! Field definitions serialize to/from YAML via serde, so admin screens can
//! be described in configuration. Loosely typed entries (`choices`,
//! `badges`) are kept as dynamic values and validated by the same setters a
//! hand-written configuration goes through.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::field::EnumField;

/// Which widget renders the choices in edit forms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Widget {
    Native,
    Autocomplete,
}

/// A declarative description of one enum field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnumFieldDef {
    pub property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// `label: value` pairs, or `value: label` pairs when `translatable`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<serde_json::Value>,
    #[serde(default)]
    pub translatable: bool,
    #[serde(default)]
    pub multiple: bool,
    /// `true`, `false`, or `badge key: badge type` pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badges: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<Widget>,
    #[serde(default)]
    pub expanded: bool,
    #[serde(default = "default_escape_html")]
    pub escape_html: bool,
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub required: Option<bool>,
}

fn default_escape_html() -> bool {
    true
}

impl EnumFieldDef {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse a YAML sequence of definitions.
    pub fn list_from_yaml(yaml: &str) -> Result<Vec<Self>> {
        let defs: Vec<Self> = serde_yaml_ng::from_str(yaml)?;
        debug!(fields = defs.len(), "enum field definitions loaded");
        Ok(defs)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

impl EnumField {
    /// Build a field from its declarative definition.
    pub fn from_def(def: &EnumFieldDef) -> Result<Self> {
        let mut field = EnumField::new(def.property.clone(), String::new());
        field.set_label(def.label.clone());
        if let Some(help) = &def.help {
            field.set_help(help.clone());
        }
        if let Some(choices) = &def.choices {
            if def.translatable {
                field.set_translatable_choices(choices.clone())?;
            } else {
                field.set_choices(choices.clone())?;
            }
        }
        if let Some(badges) = &def.badges {
            field.render_as_badges(badges.clone())?;
        }
        if let Some(widget) = def.widget {
            field.render_as_native_widget(widget == Widget::Native);
        }
        if let Some(required) = def.required {
            field.set_required(required);
        }
        field
            .allow_multiple_choices(def.multiple)
            .render_expanded(def.expanded)
            .escape_html(def.escape_html);
        Ok(field)
    }
}

/// Extra options accepted by `EnumFieldFactory::create_enum_field`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldOptions {
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub required: Option<bool>,
}

impl FieldOptions {
    pub fn required(required: bool) -> Self {
        Self {
            required: Some(required),
        }
    }
}

/// Accept booleans, numbers and strings for flags: `0`, `""`, `"0"` and
/// `"false"` are false, any other number or string is true.
fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Bool(b) => Some(b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|x| x != 0.0)),
        Value::String(s) => Some(!matches!(s.as_str(), "" | "0" | "false")),
        Value::Array(items) => Some(!items.is_empty()),
        Value::Object(map) => Some(!map.is_empty()),
    })
}
