//! Product templates and attribute validation.
//!
//! A template is a named, ordered set of typed field definitions governing
//! which attributes a product class may carry. Validation is write-time
//! only: storefront reads never re-validate. Malformed input is a
//! validation result, not an exceptional condition, and all field problems
//! are collected so an admin form can show them together.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use carsi_core::{FieldId, TemplateId};

use crate::attributes::{AttributeValue, Attributes};

/// The type of a template field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text.
    Text,
    /// Numeric amount. A field's `suffix` may label a unit ("gr", "cm");
    /// units are a display concern and the raw number passes through.
    Number,
    /// One choice out of the field's `options`.
    Select,
    /// A boolean flag.
    Checkbox,
    /// Multi-line text.
    Textarea,
    /// A paper/material name. Materials are validated against an external
    /// material catalog by the host, not here.
    Paper,
}

/// One typed field definition within a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateField {
    pub id: FieldId,
    /// Attribute dictionary key. Unique within the owning template.
    pub key: String,
    /// Display label for admin forms.
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Required fields must be present and type-correct in every governed
    /// attribute dictionary.
    #[serde(default)]
    pub required: bool,
    /// Allowed values. Non-empty exactly when `field_type` is
    /// [`FieldType::Select`].
    #[serde(default)]
    pub options: Vec<String>,
    /// Marks fields that participate in variant disambiguation. Consumed by
    /// the admin UI; the validator does not act on it.
    #[serde(default)]
    pub is_variant: bool,
    /// Optional display unit appended after the value ("gr", "adet").
    #[serde(default)]
    pub suffix: Option<String>,
}

/// A named, ordered set of field definitions for a product class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTemplate {
    pub id: TemplateId,
    pub name: String,
    /// Field order is the admin form order.
    pub fields: Vec<TemplateField>,
}

impl ProductTemplate {
    /// Look up a field definition by attribute key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&TemplateField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// The fields flagged for variant disambiguation, in template order.
    pub fn variant_fields(&self) -> impl Iterator<Item = &TemplateField> {
        self.fields.iter().filter(|f| f.is_variant)
    }

    /// Check the template definition itself (an admin-side save guard).
    ///
    /// Collects a problem for every duplicate field key and for every field
    /// whose `options` list disagrees with its type: `select` fields must
    /// list at least one option, non-`select` fields must list none.
    ///
    /// # Errors
    ///
    /// Returns every definition problem found, one [`FieldError`] each.
    pub fn validate_definition(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        for (idx, field) in self.fields.iter().enumerate() {
            let duplicate = self
                .fields
                .iter()
                .take(idx)
                .any(|earlier| earlier.key == field.key);
            if duplicate {
                errors.push(FieldError {
                    key: field.key.clone(),
                    reason: FieldErrorReason::DuplicateKey,
                });
            }

            match field.field_type {
                FieldType::Select if field.options.is_empty() => {
                    errors.push(FieldError {
                        key: field.key.clone(),
                        reason: FieldErrorReason::MissingOptions,
                    });
                }
                FieldType::Select => {}
                _ if !field.options.is_empty() => {
                    errors.push(FieldError {
                        key: field.key.clone(),
                        reason: FieldErrorReason::UnexpectedOptions,
                    });
                }
                _ => {}
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FieldErrorReason {
    /// A required field has no value.
    #[error("value is required")]
    Missing,
    /// The value's type does not match the field definition.
    #[error("expected a {expected:?} value")]
    TypeMismatch {
        /// The type the field definition demands.
        expected: FieldType,
    },
    /// A select value is not one of the field's options.
    #[error("value is not an allowed option")]
    InvalidOption,
    /// Two fields in one template share a key.
    #[error("field key is duplicated within the template")]
    DuplicateKey,
    /// A select field defines no options.
    #[error("select field must define at least one option")]
    MissingOptions,
    /// A non-select field defines options.
    #[error("only select fields may define options")]
    UnexpectedOptions,
}

/// One field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{key}: {reason}")]
pub struct FieldError {
    /// The attribute key the problem applies to.
    pub key: String,
    pub reason: FieldErrorReason,
}

/// Validate an attribute dictionary against its governing template.
///
/// With no template (`None`), validation is a no-op success: the catalog
/// holds freeform and strictly-typed products side by side, and attribute
/// dictionaries are only interpreted when a template governs them.
///
/// Only `required` fields are checked: each must be present and pass the
/// type check for its field type. Optional fields and unknown keys pass
/// through untouched. Every problem found is collected; the caller gets all
/// of them at once.
///
/// # Errors
///
/// Returns the full list of [`FieldError`]s when any required field is
/// missing or type-incorrect.
pub fn validate(
    template: Option<&ProductTemplate>,
    attributes: &Attributes,
) -> Result<(), Vec<FieldError>> {
    let Some(template) = template else {
        return Ok(());
    };

    let mut errors = Vec::new();

    for field in template.fields.iter().filter(|f| f.required) {
        match attributes.get(&field.key) {
            None => errors.push(FieldError {
                key: field.key.clone(),
                reason: FieldErrorReason::Missing,
            }),
            Some(value) => {
                if let Some(reason) = check_type(field, value) {
                    errors.push(FieldError {
                        key: field.key.clone(),
                        reason,
                    });
                }
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Check one value against one field definition.
fn check_type(field: &TemplateField, value: &AttributeValue) -> Option<FieldErrorReason> {
    let mismatch = || FieldErrorReason::TypeMismatch {
        expected: field.field_type,
    };

    match field.field_type {
        FieldType::Text | FieldType::Textarea | FieldType::Paper => match value {
            AttributeValue::Text(_) => None,
            _ => Some(mismatch()),
        },
        FieldType::Number => match value {
            AttributeValue::Number(_) => None,
            _ => Some(mismatch()),
        },
        FieldType::Checkbox => match value {
            AttributeValue::Bool(_) => None,
            _ => Some(mismatch()),
        },
        FieldType::Select => match value {
            AttributeValue::Text(chosen) if field.options.iter().any(|o| o == chosen) => None,
            AttributeValue::Text(_) => Some(FieldErrorReason::InvalidOption),
            _ => Some(mismatch()),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn field(id: i32, key: &str, field_type: FieldType, required: bool) -> TemplateField {
        TemplateField {
            id: FieldId::new(id),
            key: key.to_owned(),
            label: key.to_owned(),
            field_type,
            required,
            options: Vec::new(),
            is_variant: false,
            suffix: None,
        }
    }

    fn select_field(id: i32, key: &str, options: &[&str], required: bool) -> TemplateField {
        TemplateField {
            options: options.iter().map(|o| (*o).to_owned()).collect(),
            ..field(id, key, FieldType::Select, required)
        }
    }

    fn template(fields: Vec<TemplateField>) -> ProductTemplate {
        ProductTemplate {
            id: TemplateId::new(1),
            name: "Davetiye".to_owned(),
            fields,
        }
    }

    #[test]
    fn test_no_template_is_noop_success() {
        let attrs = Attributes::from([("anything".to_owned(), AttributeValue::from(true))]);
        assert!(validate(None, &attrs).is_ok());
    }

    #[test]
    fn test_required_fields_present_and_typed() {
        let t = template(vec![
            field(1, "Başlık", FieldType::Text, true),
            field(2, "Gramaj", FieldType::Number, true),
            field(3, "Yaldızlı", FieldType::Checkbox, true),
        ]);
        let attrs = Attributes::from([
            ("Başlık".to_owned(), AttributeValue::from("Altın Çerçeve")),
            ("Gramaj".to_owned(), AttributeValue::from(350.0)),
            ("Yaldızlı".to_owned(), AttributeValue::from(true)),
        ]);
        assert!(validate(Some(&t), &attrs).is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let t = template(vec![field(1, "Başlık", FieldType::Text, true)]);
        let errors = validate(Some(&t), &Attributes::new()).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError {
                key: "Başlık".to_owned(),
                reason: FieldErrorReason::Missing,
            }]
        );
    }

    #[test]
    fn test_type_mismatch_on_required_field() {
        let t = template(vec![field(1, "Gramaj", FieldType::Number, true)]);
        let attrs = Attributes::from([("Gramaj".to_owned(), AttributeValue::from("ağır"))]);
        let errors = validate(Some(&t), &attrs).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError {
                key: "Gramaj".to_owned(),
                reason: FieldErrorReason::TypeMismatch {
                    expected: FieldType::Number,
                },
            }]
        );
    }

    #[test]
    fn test_select_rejects_unknown_option() {
        let t = template(vec![select_field(1, "Renk", &["Kırmızı", "Mavi"], true)]);
        let attrs = Attributes::from([("Renk".to_owned(), AttributeValue::from("Yeşil"))]);
        let errors = validate(Some(&t), &attrs).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError {
                key: "Renk".to_owned(),
                reason: FieldErrorReason::InvalidOption,
            }]
        );
    }

    #[test]
    fn test_select_accepts_listed_option() {
        let t = template(vec![select_field(1, "Renk", &["Kırmızı", "Mavi"], true)]);
        let attrs = Attributes::from([("Renk".to_owned(), AttributeValue::from("Mavi"))]);
        assert!(validate(Some(&t), &attrs).is_ok());
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let t = template(vec![field(1, "Başlık", FieldType::Text, true)]);
        let attrs = Attributes::from([
            ("Başlık".to_owned(), AttributeValue::from("Davetiye")),
            ("Bilinmeyen".to_owned(), AttributeValue::from(42.0)),
        ]);
        assert!(validate(Some(&t), &attrs).is_ok());
    }

    #[test]
    fn test_optional_fields_are_not_checked() {
        // A present-but-wrong optional value is passthrough data.
        let t = template(vec![field(1, "Not", FieldType::Textarea, false)]);
        let attrs = Attributes::from([("Not".to_owned(), AttributeValue::from(false))]);
        assert!(validate(Some(&t), &attrs).is_ok());
    }

    #[test]
    fn test_all_errors_collected_at_once() {
        let t = template(vec![
            field(1, "Başlık", FieldType::Text, true),
            field(2, "Gramaj", FieldType::Number, true),
            select_field(3, "Renk", &["Kırmızı"], true),
        ]);
        let attrs = Attributes::from([("Gramaj".to_owned(), AttributeValue::from(true))]);
        let errors = validate(Some(&t), &attrs).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_paper_accepts_any_string() {
        // Material names are checked against the external material catalog
        // by the host, not here.
        let t = template(vec![field(1, "Kağıt", FieldType::Paper, true)]);
        let attrs = Attributes::from([("Kağıt".to_owned(), AttributeValue::from("Kraft 300gr"))]);
        assert!(validate(Some(&t), &attrs).is_ok());
    }

    #[test]
    fn test_definition_rejects_duplicate_keys() {
        let t = template(vec![
            field(1, "Renk", FieldType::Text, false),
            field(2, "Renk", FieldType::Text, false),
        ]);
        let errors = t.validate_definition().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError {
                key: "Renk".to_owned(),
                reason: FieldErrorReason::DuplicateKey,
            }]
        );
    }

    #[test]
    fn test_definition_options_iff_select() {
        let t = template(vec![
            select_field(1, "Renk", &[], true),
            TemplateField {
                options: vec!["A4".to_owned()],
                ..field(2, "Başlık", FieldType::Text, false)
            },
        ]);
        let errors = t.validate_definition().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.reason == FieldErrorReason::MissingOptions));
        assert!(
            errors
                .iter()
                .any(|e| e.reason == FieldErrorReason::UnexpectedOptions)
        );
    }

    #[test]
    fn test_variant_fields_iterator() {
        let mut variant_field = select_field(1, "Renk", &["Kırmızı"], true);
        variant_field.is_variant = true;
        let t = template(vec![variant_field, field(2, "Başlık", FieldType::Text, false)]);
        let keys: Vec<&str> = t.variant_fields().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["Renk"]);
    }
}
