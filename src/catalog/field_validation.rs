// Field-presence validation for catalog requests
//
// The derive on each request DTO covers per-field rules (present, not blank,
// not negative). Conditional requirements that depend on taxApplicability are
// checked here by hand because they span several fields.

use rust_decimal::Decimal;
use validator::{Validate, ValidationErrors};

use crate::catalog::error::{CatalogError, FieldError};
use crate::catalog::models::{CreateCategory, CreateItem, CreateSubcategory};

/// The kind of catalog entity a request describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Category,
    Subcategory,
    Item,
}

/// A creation request, tagged with its entity kind
#[derive(Debug, Clone, Copy)]
pub enum EntityInput<'a> {
    Category(&'a CreateCategory),
    Subcategory(&'a CreateSubcategory),
    Item(&'a CreateItem),
}

impl EntityInput<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityInput::Category(_) => EntityKind::Category,
            EntityInput::Subcategory(_) => EntityKind::Subcategory,
            EntityInput::Item(_) => EntityKind::Item,
        }
    }
}

/// Validate a creation request before any lookup, pricing or write
///
/// Returns every field error found, an empty list means the request is
/// structurally complete.
pub fn validate_entity_fields(input: EntityInput<'_>) -> Vec<FieldError> {
    let (derived, mut conditional) = match input {
        EntityInput::Category(request) => (
            request.validate(),
            request
                .tax_applicability
                .map(|applicable| {
                    category_tax_errors(applicable, request.tax, request.tax_type.as_deref())
                })
                .unwrap_or_default(),
        ),
        EntityInput::Subcategory(request) => (request.validate(), Vec::new()),
        EntityInput::Item(request) => (
            request.validate(),
            request
                .tax_applicability
                .map(|applicable| item_tax_errors(applicable, request.tax))
                .unwrap_or_default(),
        ),
    };

    let mut errors = derived
        .err()
        .map(|e| field_errors_from(&e))
        .unwrap_or_default();
    errors.append(&mut conditional);
    errors
}

/// Run the per-field rules of an update request
pub fn validate_update<T: Validate>(request: &T) -> Result<(), CatalogError> {
    request
        .validate()
        .map_err(|e| CatalogError::Validation(field_errors_from(&e)))
}

/// Category invariant: a tax-applicable category carries both rate and type
pub fn category_tax_errors(
    tax_applicability: bool,
    tax: Option<Decimal>,
    tax_type: Option<&str>,
) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !tax_applicability {
        return errors;
    }
    if tax.is_none() {
        errors.push(FieldError::invalid_tax(
            "tax",
            "tax is required when taxApplicability is true",
        ));
    }
    if tax_type.is_none() {
        errors.push(FieldError::invalid_tax(
            "taxType",
            "taxType is required when taxApplicability is true",
        ));
    }
    errors
}

/// Item invariant: a tax-applicable item carries a rate
pub fn item_tax_errors(tax_applicability: bool, tax: Option<Decimal>) -> Vec<FieldError> {
    if tax_applicability && tax.is_none() {
        vec![FieldError::invalid_tax(
            "tax",
            "tax is required when taxApplicability is true",
        )]
    } else {
        Vec::new()
    }
}

/// Convert derive-level errors into field errors keyed by JSON field name
fn field_errors_from(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut converted: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let json_field = json_field_name(field);
            field_errors
                .iter()
                .map(move |error| match error.code.as_ref() {
                    "negative" => FieldError::invalid_value(
                        json_field,
                        &format!("{} must not be negative", json_field),
                    ),
                    _ => FieldError::missing(json_field),
                })
                .collect::<Vec<_>>()
        })
        .collect();

    // field_errors() is backed by a HashMap
    converted.sort_by(|a, b| a.field.cmp(&b.field));
    converted
}

/// JSON name of a validated struct field
fn json_field_name(field: &str) -> &str {
    match field {
        "tax_applicability" => "taxApplicability",
        "tax_type" => "taxType",
        "base_amount" => "baseAmount",
        "category_id" => "categoryId",
        "subcategory_id" => "subcategoryId",
        other => other,
    }
}
