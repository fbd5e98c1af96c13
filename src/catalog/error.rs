use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// What is wrong with a single request field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldErrorKind {
    /// A structurally required field is absent or blank
    MissingField,
    /// A tax-applicable entity lacks its rate or tax type
    InvalidTaxConfiguration,
    /// The field is present but its value is out of range
    InvalidValue,
}

/// A field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Field name as it appears in the JSON body
    pub field: String,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn missing(field: &str) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::MissingField,
            message: format!("{} is required", field),
        }
    }

    pub fn invalid_tax(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::InvalidTaxConfiguration,
            message: message.to_string(),
        }
    }

    pub fn invalid_value(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::InvalidValue,
            message: message.to_string(),
        }
    }
}

/// Error types for catalog operations
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("{resource} with id {id} not found")]
    ParentNotFound { resource: &'static str, id: Uuid },

    #[error("Subcategory {subcategory_id} does not belong to category {category_id}")]
    InvalidReference {
        subcategory_id: Uuid,
        category_id: Uuid,
    },

    #[error("{resource} {identifier} not found")]
    NotFound {
        resource: &'static str,
        identifier: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl CatalogError {
    pub fn not_found(resource: &'static str, identifier: impl ToString) -> Self {
        CatalogError::NotFound {
            resource,
            identifier: identifier.to_string(),
        }
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::Storage(err.to_string())
    }
}
