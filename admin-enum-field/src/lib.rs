//! Enum field type for admin CRUD screens
//!
//! `admin-enum-field` displays and edits enum-like values in auto-generated
//! admin screens. It turns a value, or a collection of values, into a label
//! and optionally wraps that label in a colored badge.
//!
//! # Architecture
//!
//! - **Field definition**: [`EnumField`] collects and validates configuration
//!   (choices, badge selector, widget flags) and finishes as a read-only
//!   [`FieldContext`]
//! - **Render pipeline**: pure functions in [`render`] map a [`FieldValue`] to
//!   its display string; badges only appear on index and detail pages
//! - **Host integration**: [`EnumFieldConfigurator`] plugs into the host's
//!   configuration pass and delegates everything else to its choice field
//! - **Fail at configuration, never at render**: invalid arguments raise
//!   [`FieldError::InvalidConfiguration`]; odd values while rendering degrade
//!   to plain labels or `secondary` badges

pub mod badge;
pub mod configurator;
pub mod context;
pub mod error;
pub mod factory;
pub mod field;
pub mod lint;
pub mod render;
pub mod types;
pub mod value;

pub use badge::{
    resolve_badge_css, BadgeArg, BadgeCallback, BadgeSelector, BadgeType, UnknownBadgeType,
    VALID_BADGE_TYPES,
};
pub use configurator::{ConfiguratorRegistry, EnumFieldConfigurator, FieldConfigurator};
pub use context::{AdminContext, EntityContext, Page};
pub use error::{FieldError, Result};
pub use factory::{DefaultEnumFieldFactory, EnumFieldFactory};
pub use field::{
    ChoiceArg, ChoiceGenerator, ChoiceSource, Choices, EnumField, EnumFieldOptions,
    FieldContext, FormTypeOptions, ValueHook, ENUM_FIELD_KIND,
};
pub use lint::{check_badge_coverage, BadgeCoverageWarning};
pub use render::{format_for_display, render_single_item};
pub use types::{EnumFieldDef, FieldOptions, Widget};
pub use value::{classify, EnumCase, FieldValue, Scalar, TaggedCase, ValueShape};
