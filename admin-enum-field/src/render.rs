//! Value → label → badge formatting.
//!
//! Two paths exist. On index and detail pages of a field with a badge
//! selector, each value is rendered through [`render_single_item`] and may be
//! wrapped in a `<span>` badge. Everywhere else tagged cases and collections
//! are reduced to plain labels.
//!
//! The two paths label objects differently: [`label_of`] falls back to the
//! runtime type name, [`extract_label`] yields an empty string. Badge pages
//! depend on the latter, so the two are kept apart.

use crate::badge::{resolve_badge_css, BadgeSelector};
use crate::field::FieldContext;
use crate::value::FieldValue;

const SEPARATOR: &str = ", ";

/// Human readable label of a value on the plain path.
///
/// Never fails: values with no better description render as their runtime
/// type name.
pub fn label_of(item: &FieldValue) -> String {
    match item {
        FieldValue::Case(case) => case.display_label().to_string(),
        FieldValue::Scalar(scalar) => scalar.to_text(),
        FieldValue::Stringable { text, .. } => text.clone(),
        other => other.type_name().to_string(),
    }
}

/// Label of a value on the badge path. Objects and collections yield an
/// empty label.
pub fn extract_label(item: &FieldValue) -> String {
    match item {
        FieldValue::Case(case) => case.display_label().to_string(),
        FieldValue::Scalar(scalar) => scalar.to_text(),
        _ => String::new(),
    }
}

/// Key used to look a value up in a badge selector.
///
/// Backed cases use the text form of their backing value, other cases their
/// bare name.
pub fn badge_key_of(item: &FieldValue) -> String {
    match item {
        FieldValue::Case(case) => match case.backing() {
            Some(backing) => backing.to_text(),
            None => case.name().to_string(),
        },
        FieldValue::Scalar(scalar) => scalar.to_text(),
        _ => String::new(),
    }
}

/// Render one value, wrapped in a badge when the selector yields CSS classes.
///
/// The label is not escaped here; escaping is left to the host.
pub fn render_single_item(item: &FieldValue, selector: &BadgeSelector, field: &FieldContext) -> String {
    let label = extract_label(item);
    let key = badge_key_of(item);
    let css = resolve_badge_css(selector, &key, field);

    if css.is_empty() {
        label
    } else {
        format!("<span class=\"{css}\">{label}</span>")
    }
}

/// Badge path. Returns `None` for a null value so the host default applies.
pub fn format_badges(value: &FieldValue, selector: &BadgeSelector, field: &FieldContext) -> Option<String> {
    match value {
        FieldValue::List(items) => Some(
            items
                .iter()
                .map(|item| render_single_item(item, selector, field))
                .collect::<Vec<_>>()
                .join(SEPARATOR),
        ),
        FieldValue::Null => None,
        single => Some(render_single_item(single, selector, field)),
    }
}

/// Plain path. Only tagged cases and collections are formatted.
pub fn format_plain(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Case(case) => Some(case.display_label().to_string()),
        FieldValue::List(items) => Some(join_labels(items)),
        _ => None,
    }
}

/// Formatted value of a field, or `None` to leave the value unformatted.
pub fn format_for_display(
    value: &FieldValue,
    is_display_page: bool,
    selector: Option<&BadgeSelector>,
    field: &FieldContext,
) -> Option<String> {
    match selector {
        Some(selector) if is_display_page => format_badges(value, selector, field),
        _ => format_plain(value),
    }
}

/// Format-value hook installed by `EnumField::set_enum_cases`.
pub fn format_value_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Case(case) => case.display_label().to_string(),
        FieldValue::List(items) => join_labels(items),
        FieldValue::Null => String::new(),
        other => label_of(other),
    }
}

/// Choice-value hook installed by `EnumField::set_enum_cases`: the submitted
/// form value of a choice.
pub fn choice_value_of(choice: &FieldValue) -> String {
    match choice {
        FieldValue::Case(case) => match case.backing() {
            Some(backing) => backing.to_text(),
            None => case.name().to_string(),
        },
        FieldValue::Null => String::new(),
        other => label_of(other),
    }
}

fn join_labels(items: &[FieldValue]) -> String {
    items.iter().map(label_of).collect::<Vec<_>>().join(SEPARATOR)
}
