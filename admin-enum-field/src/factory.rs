//! Shortcut for building enum fields from a list of cases.

use crate::field::EnumField;
use crate::types::FieldOptions;
use crate::value::EnumCase;

/// Builds enum fields whose choices are the cases of an enum.
pub trait EnumFieldFactory {
    fn create_enum_field(
        &self,
        property: &str,
        label: &str,
        cases: Vec<EnumCase>,
        options: &FieldOptions,
    ) -> EnumField;

    fn configure_enum_cases<'a>(&self, field: &'a mut EnumField, cases: Vec<EnumCase>) -> &'a mut EnumField;
}

/// The stock [`EnumFieldFactory`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnumFieldFactory;

impl EnumFieldFactory for DefaultEnumFieldFactory {
    fn create_enum_field(
        &self,
        property: &str,
        label: &str,
        cases: Vec<EnumCase>,
        options: &FieldOptions,
    ) -> EnumField {
        let mut field = EnumField::new(property, label);
        self.configure_enum_cases(&mut field, cases);
        if let Some(required) = options.required {
            field.set_required(required);
        }
        field
    }

    fn configure_enum_cases<'a>(&self, field: &'a mut EnumField, cases: Vec<EnumCase>) -> &'a mut EnumField {
        field.set_enum_cases(cases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;

    fn cases() -> Vec<EnumCase> {
        vec![
            EnumCase::new("Status", "ACTIVE").with_label("Active"),
            EnumCase::new("Status", "INACTIVE"),
        ]
    }

    #[test]
    fn create_without_options() {
        let field = DefaultEnumFieldFactory.create_enum_field(
            "status",
            "Status",
            Vec::new(),
            &FieldOptions::default(),
        );
        let dto = field.as_dto();
        assert_eq!(dto.property(), "status");
        assert_eq!(dto.label(), Some("Status"));
        assert_eq!(dto.form_options().required, None);
        assert!(dto.resolve_choices(None).unwrap().is_empty());
    }

    #[test]
    fn create_with_required_option() {
        let factory = DefaultEnumFieldFactory;
        let required = factory.create_enum_field("status", "Status", cases(), &FieldOptions::required(true));
        assert_eq!(required.as_dto().form_options().required, Some(true));

        let optional = factory.create_enum_field("status", "Status", cases(), &FieldOptions::required(false));
        assert_eq!(optional.as_dto().form_options().required, Some(false));
    }

    #[test]
    fn configure_existing_field() {
        let mut field = EnumField::new("status", "Status");
        DefaultEnumFieldFactory
            .configure_enum_cases(&mut field, cases())
            .allow_multiple_choices(true);

        let dto = field.as_dto();
        assert!(dto.options().allow_multiple_choices);
        let choices = dto.resolve_choices(None).unwrap();
        assert_eq!(choices.keys().collect::<Vec<_>>(), ["Active", "INACTIVE"]);
        assert_eq!(
            dto.format_value(&FieldValue::from(cases().remove(1))).as_deref(),
            Some("INACTIVE")
        );
    }
}
