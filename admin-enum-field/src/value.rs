//! Enum-like values and their classification.
//!
//! The host hands the field a runtime value that can take one of several
//! shapes: a tagged case of some enum, a plain scalar, an object with a text
//! conversion, an opaque object, or a finite collection of any of these.
//! `FieldValue` captures those shapes and [`classify`] reports which one a
//! value has, always checking in the same priority order.

use std::fmt;

use crate::badge::BadgeType;

/// A plain scalar value: text, number or boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// Canonical text form. Booleans follow the host convention of `"1"` for
    /// true and the empty string for false.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Bool(true) => f.write_str("1"),
            Scalar::Bool(false) => Ok(()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// Capabilities a host enum exposes so its members can be shown in an enum
/// field.
///
/// Only `name` is required. A case "has a label" when `label` returns
/// `Some`, is *backed* when `backing` returns `Some`, and carries a badge
/// classification when `badge` returns `Some`.
///
/// ```
/// use admin_enum_field::{Scalar, TaggedCase};
///
/// enum Status {
///     Active,
///     Inactive,
/// }
///
/// impl TaggedCase for Status {
///     fn name(&self) -> &str {
///         match self {
///             Status::Active => "ACTIVE",
///             Status::Inactive => "INACTIVE",
///         }
///     }
///
///     fn backing(&self) -> Option<Scalar> {
///         Some(match self {
///             Status::Active => Scalar::Int(1),
///             Status::Inactive => Scalar::Int(0),
///         })
///     }
/// }
/// ```
pub trait TaggedCase {
    /// Bare name of the case, e.g. `ACTIVE`.
    fn name(&self) -> &str;

    /// Human readable label.
    fn label(&self) -> Option<String> {
        None
    }

    /// Explicit scalar backing value.
    fn backing(&self) -> Option<Scalar> {
        None
    }

    /// Badge classification of the case.
    fn badge(&self) -> Option<BadgeType> {
        None
    }
}

/// An owned snapshot of one tagged case.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumCase {
    enum_name: String,
    name: String,
    label: Option<String>,
    backing: Option<Scalar>,
    badge: Option<BadgeType>,
}

impl EnumCase {
    pub fn new(enum_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            enum_name: enum_name.into(),
            name: name.into(),
            label: None,
            backing: None,
            badge: None,
        }
    }

    /// Capture a case of a host enum through its [`TaggedCase`] capabilities.
    pub fn of<C: TaggedCase>(case: &C) -> Self {
        Self {
            enum_name: std::any::type_name::<C>().to_string(),
            name: case.name().to_string(),
            label: case.label(),
            backing: case.backing(),
            badge: case.badge(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_backing(mut self, backing: impl Into<Scalar>) -> Self {
        self.backing = Some(backing.into());
        self
    }

    pub fn with_badge(mut self, badge: BadgeType) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn enum_name(&self) -> &str {
        &self.enum_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn backing(&self) -> Option<&Scalar> {
        self.backing.as_ref()
    }

    pub fn badge(&self) -> Option<BadgeType> {
        self.badge
    }

    /// The declared label, or the bare name for unlabeled cases.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// A runtime value bound to an enum field.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    #[default]
    Null,
    Case(EnumCase),
    Scalar(Scalar),
    /// An object with a canonical text conversion.
    Stringable { type_name: String, text: String },
    /// An object with neither a label nor a text conversion.
    Opaque { type_name: String },
    List(Vec<FieldValue>),
}

/// The shape of a [`FieldValue`], as reported by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    TaggedCase,
    Collection,
    Null,
    Scalar,
    Stringable,
    Opaque,
}

/// Classify a value.
///
/// Checks run in a fixed order: tagged case, collection, null, scalar, text
/// conversion, and finally the opaque fallback.
pub fn classify(value: &FieldValue) -> ValueShape {
    if value.as_case().is_some() {
        return ValueShape::TaggedCase;
    }
    if value.as_list().is_some() {
        return ValueShape::Collection;
    }
    match value {
        FieldValue::Null => ValueShape::Null,
        FieldValue::Scalar(_) => ValueShape::Scalar,
        FieldValue::Stringable { .. } => ValueShape::Stringable,
        _ => ValueShape::Opaque,
    }
}

impl FieldValue {
    pub fn case<C: TaggedCase>(case: &C) -> Self {
        FieldValue::Case(EnumCase::of(case))
    }

    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Wrap an object that converts to text through `Display`.
    pub fn stringable<T: fmt::Display>(object: &T) -> Self {
        FieldValue::Stringable {
            type_name: std::any::type_name::<T>().to_string(),
            text: object.to_string(),
        }
    }

    /// Stand-in for an object of type `T` that has no text conversion.
    pub fn opaque<T: ?Sized>() -> Self {
        FieldValue::Opaque {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_case(&self) -> Option<&EnumCase> {
        match self {
            FieldValue::Case(case) => Some(case),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Runtime type name used when nothing better describes the value.
    pub fn type_name(&self) -> &str {
        match self {
            FieldValue::Null => "NULL",
            FieldValue::Case(case) => case.enum_name(),
            FieldValue::Scalar(Scalar::Text(_)) => "string",
            FieldValue::Scalar(Scalar::Int(_)) => "integer",
            FieldValue::Scalar(Scalar::Float(_)) => "double",
            FieldValue::Scalar(Scalar::Bool(_)) => "boolean",
            FieldValue::Stringable { type_name, .. } | FieldValue::Opaque { type_name } => {
                type_name
            }
            FieldValue::List(_) => "array",
        }
    }
}

impl From<Scalar> for FieldValue {
    fn from(value: Scalar) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<EnumCase> for FieldValue {
    fn from(value: EnumCase) -> Self {
        FieldValue::Case(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.into())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value.into())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Scalar(value.into())
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Scalar(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Scalar(value.into())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Scalar(value.into())
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(value: Vec<T>) -> Self {
        FieldValue::list(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// JSON values arrive from hosts that hand over serialized entities. Arrays
/// and objects are both collections; objects contribute their values.
impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => b.into(),
            Value::Number(n) => match n.as_i64() {
                Some(i) => i.into(),
                None => n.as_f64().map_or(FieldValue::Null, Into::into),
            },
            Value::String(s) => s.into(),
            Value::Array(items) => FieldValue::list(items),
            Value::Object(map) => FieldValue::list(map.into_iter().map(|(_, v)| v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Opaque;

    enum Priority {
        Low,
        High,
    }

    impl TaggedCase for Priority {
        fn name(&self) -> &str {
            match self {
                Priority::Low => "LOW",
                Priority::High => "HIGH",
            }
        }

        fn label(&self) -> Option<String> {
            match self {
                Priority::Low => None,
                Priority::High => Some("High priority".into()),
            }
        }

        fn backing(&self) -> Option<Scalar> {
            Some(match self {
                Priority::Low => "low".into(),
                Priority::High => "high".into(),
            })
        }
    }

    #[test]
    fn scalar_text_forms() {
        assert_eq!(Scalar::Text("abc".into()).to_text(), "abc");
        assert_eq!(Scalar::Int(-7).to_text(), "-7");
        assert_eq!(Scalar::Float(1.5).to_text(), "1.5");
        assert_eq!(Scalar::Float(2.0).to_text(), "2");
        assert_eq!(Scalar::Bool(true).to_text(), "1");
        assert_eq!(Scalar::Bool(false).to_text(), "");
    }

    #[test]
    fn enum_case_captures_capabilities() {
        let high = EnumCase::of(&Priority::High);
        assert_eq!(high.name(), "HIGH");
        assert_eq!(high.label(), Some("High priority"));
        assert_eq!(high.display_label(), "High priority");
        assert_eq!(high.backing(), Some(&Scalar::Text("high".into())));
        assert_eq!(high.badge(), None);
        assert!(high.enum_name().ends_with("Priority"));

        let low = EnumCase::of(&Priority::Low);
        assert_eq!(low.display_label(), "LOW");
    }

    #[test]
    fn classify_each_shape() {
        assert_eq!(
            classify(&FieldValue::case(&Priority::Low)),
            ValueShape::TaggedCase
        );
        assert_eq!(
            classify(&FieldValue::list(["a", "b"])),
            ValueShape::Collection
        );
        assert_eq!(classify(&FieldValue::Null), ValueShape::Null);
        assert_eq!(classify(&FieldValue::from(3)), ValueShape::Scalar);
        assert_eq!(
            classify(&FieldValue::stringable(&"text")),
            ValueShape::Stringable
        );
        assert_eq!(classify(&FieldValue::opaque::<Opaque>()), ValueShape::Opaque);
    }

    #[test]
    fn empty_collection_is_still_a_collection() {
        assert_eq!(
            classify(&FieldValue::List(Vec::new())),
            ValueShape::Collection
        );
    }

    #[test]
    fn option_maps_none_to_null() {
        assert!(FieldValue::from(None::<i64>).is_null());
        assert_eq!(FieldValue::from(Some(5)), FieldValue::Scalar(Scalar::Int(5)));
    }

    #[test]
    fn json_values_convert_to_field_values() {
        let value = FieldValue::from(serde_json::json!(["a", 1, true, null, 2.5]));
        assert_eq!(
            value,
            FieldValue::List(vec![
                "a".into(),
                1.into(),
                true.into(),
                FieldValue::Null,
                2.5.into(),
            ])
        );

        let object = FieldValue::from(serde_json::json!({"x": "first", "y": "second"}));
        assert_eq!(object, FieldValue::list(["first", "second"]));
    }

    #[test]
    fn type_names_for_fallbacks() {
        assert_eq!(FieldValue::Null.type_name(), "NULL");
        assert_eq!(FieldValue::from("x").type_name(), "string");
        assert_eq!(FieldValue::from(1).type_name(), "integer");
        assert!(FieldValue::opaque::<Opaque>().type_name().ends_with("Opaque"));
    }
}
