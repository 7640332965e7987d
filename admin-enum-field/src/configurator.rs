//! Integration with the host's field configuration pass.
//!
//! The host runs every registered [`FieldConfigurator`] that supports a
//! field before rendering it. [`EnumFieldConfigurator`] sets the formatted
//! value of enum fields and then hands the field to the host's own choice
//! configurator, which owns option lists, widgets and persistence.

use std::sync::Arc;

use tracing::debug;

use crate::context::{AdminContext, EntityContext};
use crate::field::{FieldContext, ENUM_FIELD_KIND};
use crate::render::format_for_display;

/// A participant in the host's field configuration pass.
pub trait FieldConfigurator: Send + Sync {
    fn supports(&self, field: &FieldContext, entity: &EntityContext) -> bool;

    fn configure(&self, field: &mut FieldContext, entity: &EntityContext, ctx: &AdminContext);
}

/// Configurator for fields built by `EnumField`.
#[derive(Default)]
pub struct EnumFieldConfigurator {
    choice_configurator: Option<Arc<dyn FieldConfigurator>>,
}

impl EnumFieldConfigurator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delegate everything beyond value formatting to the host's choice
    /// configurator.
    pub fn with_choice_configurator(choice_configurator: Arc<dyn FieldConfigurator>) -> Self {
        Self {
            choice_configurator: Some(choice_configurator),
        }
    }

    /// Formatted value of `field` on the current page, or `None` when the
    /// host default should apply.
    pub fn render(&self, field: &FieldContext, ctx: &AdminContext) -> Option<String> {
        format_for_display(
            field.value(),
            ctx.is_display_page(),
            field.badge_selector(),
            field,
        )
    }
}

impl FieldConfigurator for EnumFieldConfigurator {
    fn supports(&self, field: &FieldContext, _entity: &EntityContext) -> bool {
        field.kind() == ENUM_FIELD_KIND
    }

    fn configure(&self, field: &mut FieldContext, entity: &EntityContext, ctx: &AdminContext) {
        if let Some(formatted) = self.render(field, ctx) {
            debug!(
                field = %field.property(),
                page = ?ctx.current_page(),
                "formatted enum field value"
            );
            field.set_formatted_value(formatted);
        }

        if let Some(choice_configurator) = &self.choice_configurator {
            choice_configurator.configure(field, entity, ctx);
        }
    }
}

/// Ordered set of configurators the host consults for every field.
#[derive(Default)]
pub struct ConfiguratorRegistry {
    configurators: Vec<Arc<dyn FieldConfigurator>>,
}

impl ConfiguratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configurator. Configurators run in registration order.
    pub fn register(mut self, configurator: Arc<dyn FieldConfigurator>) -> Self {
        self.configurators.push(configurator);
        self
    }

    pub fn len(&self) -> usize {
        self.configurators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurators.is_empty()
    }

    /// Run every configurator that supports `field`. Returns how many ran.
    pub fn configure(
        &self,
        field: &mut FieldContext,
        entity: &EntityContext,
        ctx: &AdminContext,
    ) -> usize {
        let mut applied = 0;
        for configurator in &self.configurators {
            if configurator.supports(field, entity) {
                configurator.configure(field, entity, ctx);
                applied += 1;
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Page;
    use crate::field::EnumField;
    use crate::value::{EnumCase, FieldValue};
    use std::sync::Mutex;

    /// Records the formatted value each field had when it was delegated.
    #[derive(Default)]
    struct RecordingChoiceConfigurator {
        seen: Mutex<Vec<Option<String>>>,
    }

    impl FieldConfigurator for RecordingChoiceConfigurator {
        fn supports(&self, _field: &FieldContext, _entity: &EntityContext) -> bool {
            true
        }

        fn configure(&self, field: &mut FieldContext, _entity: &EntityContext, _ctx: &AdminContext) {
            self.seen
                .lock()
                .unwrap()
                .push(field.formatted_value().map(str::to_string));
        }
    }

    fn status_field(badges: bool) -> FieldContext {
        let mut field = EnumField::new("status", "Status");
        if badges {
            field.render_as_badges(true).unwrap();
        }
        let mut dto = field.into_dto();
        dto.set_value(EnumCase::new("Status", "ACTIVE"));
        dto
    }

    #[test]
    fn supports_only_enum_fields() {
        let configurator = EnumFieldConfigurator::new();
        let entity = EntityContext::new("Order");
        assert!(configurator.supports(&status_field(false), &entity));
        assert!(!configurator.supports(&FieldContext::new("title", "text"), &entity));
    }

    #[test]
    fn badge_on_display_page_plain_elsewhere() {
        let configurator = EnumFieldConfigurator::new();
        let entity = EntityContext::new("Order");

        let mut field = status_field(true);
        configurator.configure(&mut field, &entity, &AdminContext::new(Page::Detail));
        assert_eq!(
            field.formatted_value(),
            Some("<span class=\"badge badge-secondary\">ACTIVE</span>")
        );

        let mut field = status_field(true);
        configurator.configure(&mut field, &entity, &AdminContext::new(Page::Edit));
        assert_eq!(field.formatted_value(), Some("ACTIVE"));
    }

    #[test]
    fn unformatted_values_are_left_alone() {
        let configurator = EnumFieldConfigurator::new();
        let mut field = EnumField::new("code", "Code").into_dto();
        field.set_value("raw");
        configurator.configure(
            &mut field,
            &EntityContext::new("Order"),
            &AdminContext::new(Page::Index),
        );
        assert_eq!(field.formatted_value(), None);

        let mut field = status_field(true);
        field.set_value(FieldValue::Null);
        configurator.configure(
            &mut field,
            &EntityContext::new("Order"),
            &AdminContext::new(Page::Index),
        );
        assert_eq!(field.formatted_value(), None);
    }

    #[test]
    fn delegates_after_formatting() {
        let recorder = Arc::new(RecordingChoiceConfigurator::default());
        let configurator = EnumFieldConfigurator::with_choice_configurator(recorder.clone());

        let mut field = status_field(false);
        configurator.configure(
            &mut field,
            &EntityContext::new("Order"),
            &AdminContext::new(Page::Index),
        );
        assert_eq!(
            *recorder.seen.lock().unwrap(),
            vec![Some("ACTIVE".to_string())]
        );
    }

    #[test]
    fn registry_runs_supporting_configurators_in_order() {
        let recorder = Arc::new(RecordingChoiceConfigurator::default());
        let registry = ConfiguratorRegistry::new()
            .register(Arc::new(EnumFieldConfigurator::new()))
            .register(recorder.clone());
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());

        let entity = EntityContext::new("Order");
        let ctx = AdminContext::new(Page::Index);

        let mut field = status_field(true);
        assert_eq!(registry.configure(&mut field, &entity, &ctx), 2);

        let mut other = FieldContext::new("title", "text");
        assert_eq!(registry.configure(&mut other, &entity, &ctx), 1);

        assert_eq!(
            *recorder.seen.lock().unwrap(),
            vec![
                Some("<span class=\"badge badge-secondary\">ACTIVE</span>".to_string()),
                None,
            ]
        );
    }
}
