//! The enum field definition and the read-only context it produces.
//!
//! `EnumField` is configured once through its fluent setters, then handed to
//! the host as a [`FieldContext`]. Setters that take loosely typed arguments
//! validate them immediately and leave the field untouched on error.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::badge::{BadgeArg, BadgeSelector};
use crate::error::{shape_of, FieldError, Result};
use crate::lint::check_badge_coverage;
use crate::render;
use crate::types::Widget;
use crate::value::{EnumCase, FieldValue, TaggedCase};

/// Kind tag the enum field configurator recognizes.
pub const ENUM_FIELD_KIND: &str = "enum";

/// Choices in the default convention: label visible to users → submitted
/// value. Translatable choices use the opposite direction.
pub type Choices = IndexMap<String, FieldValue>;

/// Produces choices from the current entity instance (if any) and the field.
pub type ChoiceGenerator =
    Arc<dyn Fn(Option<&serde_json::Value>, &FieldContext) -> Choices + Send + Sync>;

/// Turns a value into a piece of text for the host's form layer.
pub type ValueHook = Arc<dyn Fn(&FieldValue) -> String + Send + Sync>;

/// Where the choices of a field come from.
#[derive(Clone)]
pub enum ChoiceSource {
    Static(Choices),
    /// Invoked on every render pass; results are never cached.
    Generator(ChoiceGenerator),
}

impl ChoiceSource {
    pub fn generator<F>(f: F) -> Self
    where
        F: Fn(Option<&serde_json::Value>, &FieldContext) -> Choices + Send + Sync + 'static,
    {
        ChoiceSource::Generator(Arc::new(f))
    }

    pub fn resolve(&self, instance: Option<&serde_json::Value>, field: &FieldContext) -> Choices {
        match self {
            ChoiceSource::Static(choices) => choices.clone(),
            ChoiceSource::Generator(generate) => generate(instance, field),
        }
    }
}

impl fmt::Debug for ChoiceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceSource::Static(choices) => f.debug_tuple("Static").field(choices).finish(),
            ChoiceSource::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

/// Argument accepted by `EnumField::set_choices`.
#[derive(Debug)]
pub enum ChoiceArg {
    Source(ChoiceSource),
    Raw(serde_json::Value),
}

impl ChoiceArg {
    fn into_source(self, method: &'static str) -> Result<ChoiceSource> {
        use serde_json::Value;
        match self {
            ChoiceArg::Source(source) => Ok(source),
            ChoiceArg::Raw(Value::Object(map)) => Ok(ChoiceSource::Static(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            )),
            ChoiceArg::Raw(Value::Array(items)) => Ok(ChoiceSource::Static(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v.into()))
                    .collect(),
            )),
            ChoiceArg::Raw(other) => Err(FieldError::invalid(
                method,
                format!(
                    "The argument of the \"{}\" method must be a mapping or a closure (\"{}\" given).",
                    method,
                    shape_of(&other)
                ),
            )),
        }
    }
}

impl From<ChoiceSource> for ChoiceArg {
    fn from(value: ChoiceSource) -> Self {
        ChoiceArg::Source(value)
    }
}

impl From<Choices> for ChoiceArg {
    fn from(value: Choices) -> Self {
        ChoiceArg::Source(ChoiceSource::Static(value))
    }
}

impl<K: Into<String>, V: Into<FieldValue>, const N: usize> From<[(K, V); N]> for ChoiceArg {
    fn from(value: [(K, V); N]) -> Self {
        ChoiceArg::Source(ChoiceSource::Static(
            value
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }
}

impl From<serde_json::Value> for ChoiceArg {
    fn from(value: serde_json::Value) -> Self {
        ChoiceArg::Raw(value)
    }
}

/// The custom options an enum field carries.
#[derive(Debug, Clone)]
pub struct EnumFieldOptions {
    pub choices: Option<ChoiceSource>,
    pub use_translatable_choices: bool,
    pub allow_multiple_choices: bool,
    pub autocomplete: bool,
    /// `None` means badges were never configured, which is different from
    /// `Some(BadgeSelector::Flag(false))`.
    pub render_as_badges: Option<BadgeSelector>,
    pub render_expanded: bool,
    pub widget: Option<Widget>,
    pub escape_html: bool,
}

impl Default for EnumFieldOptions {
    fn default() -> Self {
        Self {
            choices: None,
            use_translatable_choices: false,
            allow_multiple_choices: false,
            autocomplete: false,
            render_as_badges: None,
            render_expanded: false,
            widget: None,
            escape_html: true,
        }
    }
}

/// Options forwarded to the host's choice form type.
#[derive(Clone, Default)]
pub struct FormTypeOptions {
    pub required: Option<bool>,
    pub choice_label: Option<ValueHook>,
    pub choice_value: Option<ValueHook>,
}

impl fmt::Debug for FormTypeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormTypeOptions")
            .field("required", &self.required)
            .field("choice_label", &self.choice_label.is_some())
            .field("choice_value", &self.choice_value.is_some())
            .finish()
    }
}

/// A configured field as seen by the host and by callbacks.
///
/// Configuration is read-only once the field leaves its [`EnumField`]; the
/// host only updates the bound value and the formatted value per render pass.
#[derive(Clone, Default)]
pub struct FieldContext {
    property: String,
    label: Option<String>,
    kind: String,
    template_name: String,
    form_type: String,
    css_class: String,
    help: Option<String>,
    value: FieldValue,
    formatted_value: Option<String>,
    options: EnumFieldOptions,
    form_options: FormTypeOptions,
    format_value: Option<ValueHook>,
}

impl fmt::Debug for FieldContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldContext")
            .field("property", &self.property)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("formatted_value", &self.formatted_value)
            .field("options", &self.options)
            .field("form_options", &self.form_options)
            .finish_non_exhaustive()
    }
}

impl FieldContext {
    /// A bare field of any kind, as the host builds for its own field types.
    pub fn new(property: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn form_type(&self) -> &str {
        &self.form_type
    }

    pub fn css_class(&self) -> &str {
        &self.css_class
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<FieldValue>) {
        self.value = value.into();
    }

    pub fn formatted_value(&self) -> Option<&str> {
        self.formatted_value.as_deref()
    }

    pub fn set_formatted_value(&mut self, formatted: impl Into<String>) {
        self.formatted_value = Some(formatted.into());
    }

    pub fn options(&self) -> &EnumFieldOptions {
        &self.options
    }

    pub fn form_options(&self) -> &FormTypeOptions {
        &self.form_options
    }

    pub fn badge_selector(&self) -> Option<&BadgeSelector> {
        self.options.render_as_badges.as_ref()
    }

    /// Label shown for `choice` inside the choice widget.
    pub fn choice_label(&self, choice: &FieldValue) -> Option<String> {
        self.form_options.choice_label.as_ref().map(|hook| hook(choice))
    }

    /// Submitted form value for `choice`.
    pub fn choice_value(&self, choice: &FieldValue) -> Option<String> {
        self.form_options.choice_value.as_ref().map(|hook| hook(choice))
    }

    /// Applies the installed format-value hook to `value`.
    pub fn format_value(&self, value: &FieldValue) -> Option<String> {
        self.format_value.as_ref().map(|hook| hook(value))
    }

    /// Materializes the choice mapping, invoking a generator every time.
    pub fn resolve_choices(&self, instance: Option<&serde_json::Value>) -> Option<Choices> {
        self.options
            .choices
            .as_ref()
            .map(|source| source.resolve(instance, self))
    }

    /// Choices as `(label, value)` pairs, whichever convention the mapping
    /// was given in.
    pub fn choice_entries(&self, instance: Option<&serde_json::Value>) -> Vec<(String, FieldValue)> {
        let Some(choices) = self.resolve_choices(instance) else {
            return Vec::new();
        };
        if self.options.use_translatable_choices {
            choices
                .into_iter()
                .map(|(value, label)| (render::label_of(&label), FieldValue::from(value)))
                .collect()
        } else {
            choices.into_iter().collect()
        }
    }
}

/// Builder for one enum field.
///
/// ```
/// use admin_enum_field::EnumField;
///
/// let mut field = EnumField::new("status", "Status");
/// field
///     .render_as_badges([("ACTIVE", "success"), ("INACTIVE", "danger")])?
///     .allow_multiple_choices(true)
///     .render_expanded(false);
/// assert!(field.as_dto().options().allow_multiple_choices);
/// # Ok::<(), admin_enum_field::FieldError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EnumField {
    dto: FieldContext,
}

impl EnumField {
    pub fn new(property: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            dto: FieldContext {
                property: property.into(),
                label: Some(label.into()),
                kind: ENUM_FIELD_KIND.to_string(),
                template_name: "crud/field/choice".to_string(),
                form_type: "choice".to_string(),
                css_class: "field-select".to_string(),
                ..FieldContext::default()
            },
        }
    }

    pub fn as_dto(&self) -> &FieldContext {
        &self.dto
    }

    /// Finish configuration.
    pub fn into_dto(self) -> FieldContext {
        self.dto
    }

    pub fn set_label(&mut self, label: Option<String>) -> &mut Self {
        self.dto.label = label;
        self
    }

    pub fn set_help(&mut self, help: impl Into<String>) -> &mut Self {
        self.dto.help = Some(help.into());
        self
    }

    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.dto.form_options.required = Some(required);
        self
    }

    pub fn allow_multiple_choices(&mut self, allow: bool) -> &mut Self {
        self.dto.options.allow_multiple_choices = allow;
        self
    }

    pub fn autocomplete(&mut self) -> &mut Self {
        self.dto.options.autocomplete = true;
        self
    }

    /// Set choices as `label → value`, or a generator producing them.
    pub fn set_choices(&mut self, source: impl Into<ChoiceArg>) -> Result<&mut Self> {
        let source = source.into().into_source("EnumField::set_choices")?;
        self.dto.options.choices = Some(source);
        Ok(self)
    }

    /// Set choices as `value → label`, for labels that need translating.
    pub fn set_translatable_choices(&mut self, source: impl Into<ChoiceArg>) -> Result<&mut Self> {
        let source = source
            .into()
            .into_source("EnumField::set_translatable_choices")?;
        self.dto.options.choices = Some(source);
        self.dto.options.use_translatable_choices = true;
        Ok(self)
    }

    /// Render values as badges on index and detail pages.
    ///
    /// Accepts `true`/`false`, a mapping from badge key to badge type, or a
    /// [`BadgeSelector::Callback`]. Mapping values are checked against the
    /// valid badge types right away.
    pub fn render_as_badges(&mut self, selector: impl Into<BadgeArg>) -> Result<&mut Self> {
        let selector = selector.into().into_selector()?;
        self.dto.options.render_as_badges = Some(selector);
        Ok(self)
    }

    pub fn render_as_native_widget(&mut self, native: bool) -> &mut Self {
        self.dto.options.widget = Some(if native {
            Widget::Native
        } else {
            Widget::Autocomplete
        });
        self
    }

    pub fn render_expanded(&mut self, expanded: bool) -> &mut Self {
        self.dto.options.render_expanded = expanded;
        self
    }

    pub fn escape_html(&mut self, escape: bool) -> &mut Self {
        self.dto.options.escape_html = escape;
        self
    }

    /// Use the given enum cases as choices.
    ///
    /// Each case is listed under its label (or bare name), and the field
    /// learns to label, format and submit tagged cases.
    pub fn set_enum_cases<I>(&mut self, cases: I) -> &mut Self
    where
        I: IntoIterator<Item = EnumCase>,
    {
        let cases: Vec<EnumCase> = cases.into_iter().collect();

        for warning in check_badge_coverage(&cases) {
            warn!(
                field = %self.dto.property,
                enum_name = %warning.enum_name,
                missing = ?warning.missing,
                "{}",
                warning
            );
        }

        let choices: Choices = cases
            .into_iter()
            .map(|case| (case.display_label().to_string(), FieldValue::Case(case)))
            .collect();
        debug!(field = %self.dto.property, choices = choices.len(), "enum cases configured");
        self.dto.options.choices = Some(ChoiceSource::Static(choices));

        self.dto.form_options.choice_label = Some(Arc::new(render::label_of));
        self.dto.format_value = Some(Arc::new(render::format_value_text));
        self.dto.form_options.choice_value = Some(Arc::new(render::choice_value_of));
        self
    }

    /// Convenience over [`EnumField::set_enum_cases`] for host enums.
    pub fn set_enum_cases_of<C: TaggedCase>(&mut self, cases: &[C]) -> &mut Self {
        self.set_enum_cases(cases.iter().map(EnumCase::of))
    }
}
