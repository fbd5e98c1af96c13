use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::catalog::price_calculator::ItemAmounts;
use crate::catalog::tax_resolver::TaxFields;

/// Top level of the menu tree
///
/// When `tax_applicability` is true both `tax` and `tax_type` are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    #[schema(example = "Beverages")]
    pub name: String,
    #[schema(example = "https://images.example.com/beverages.jpg")]
    pub image: String,
    #[schema(example = "Refreshing drinks and beverages")]
    pub description: String,
    #[schema(example = true)]
    pub tax_applicability: bool,
    /// Tax rate in percent
    #[schema(example = 5)]
    pub tax: Option<Decimal>,
    #[schema(example = "GST")]
    pub tax_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Tax fields a child subcategory inherits at creation time
    pub fn tax_fields(&self) -> TaxFields {
        TaxFields {
            tax_applicability: self.tax_applicability,
            tax: self.tax,
        }
    }
}

/// Second level of the menu tree, owned by exactly one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: Uuid,
    #[schema(example = "Hot Drinks")]
    pub name: String,
    #[schema(example = "https://images.example.com/hot-drinks.jpg")]
    pub image: String,
    #[schema(example = "Coffee, tea, and hot beverages")]
    pub description: String,
    pub category_id: Uuid,
    #[schema(example = true)]
    pub tax_applicability: bool,
    #[schema(example = 5)]
    pub tax: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subcategory {
    pub fn tax_fields(&self) -> TaxFields {
        TaxFields {
            tax_applicability: self.tax_applicability,
            tax: self.tax,
        }
    }
}

/// Leaf of the menu tree
///
/// `total_amount` is always `base_amount - discount` as of the last write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    #[schema(example = "Pizza Margherita")]
    pub name: String,
    #[schema(example = "https://images.example.com/pizza.jpg")]
    pub image: String,
    #[schema(example = "Classic margherita pizza")]
    pub description: String,
    pub category_id: Uuid,
    pub subcategory_id: Option<Uuid>,
    #[schema(example = true)]
    pub tax_applicability: bool,
    #[schema(example = 12)]
    pub tax: Option<Decimal>,
    #[schema(example = 200)]
    pub base_amount: Decimal,
    #[schema(example = 25)]
    pub discount: Decimal,
    #[schema(example = 175)]
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn amounts(&self) -> ItemAmounts {
        ItemAmounts {
            base_amount: self.base_amount,
            discount: self.discount,
            total_amount: self.total_amount,
        }
    }
}

/// Request body for POST /api/categories
///
/// Every field is optional at the type level so that missing fields are
/// reported as field errors instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    #[validate(required, custom = "crate::validation::validate_not_blank")]
    #[schema(example = "Beverages")]
    pub name: Option<String>,
    #[validate(required, custom = "crate::validation::validate_not_blank")]
    #[schema(example = "https://images.example.com/beverages.jpg")]
    pub image: Option<String>,
    #[validate(required, custom = "crate::validation::validate_not_blank")]
    #[schema(example = "Refreshing drinks and beverages")]
    pub description: Option<String>,
    #[validate(required)]
    #[schema(example = true)]
    pub tax_applicability: Option<bool>,
    #[validate(custom = "crate::validation::validate_non_negative")]
    #[schema(example = 5)]
    pub tax: Option<Decimal>,
    #[validate(custom = "crate::validation::validate_not_blank")]
    #[schema(example = "GST")]
    pub tax_type: Option<String>,
}

/// Request body for PUT /api/categories/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub name: Option<String>,
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub image: Option<String>,
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub description: Option<String>,
    pub tax_applicability: Option<bool>,
    #[validate(custom = "crate::validation::validate_non_negative")]
    pub tax: Option<Decimal>,
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub tax_type: Option<String>,
}

/// Request body for POST /api/subcategories
///
/// `tax_applicability` and `tax` default to the parent category's values
/// when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubcategory {
    #[validate(required, custom = "crate::validation::validate_not_blank")]
    #[schema(example = "Hot Drinks")]
    pub name: Option<String>,
    #[validate(required, custom = "crate::validation::validate_not_blank")]
    pub image: Option<String>,
    #[validate(required, custom = "crate::validation::validate_not_blank")]
    pub description: Option<String>,
    #[validate(required)]
    pub category_id: Option<Uuid>,
    pub tax_applicability: Option<bool>,
    #[validate(custom = "crate::validation::validate_non_negative")]
    pub tax: Option<Decimal>,
}

/// Request body for PUT /api/subcategories/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubcategory {
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub name: Option<String>,
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub image: Option<String>,
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub tax_applicability: Option<bool>,
    #[validate(custom = "crate::validation::validate_non_negative")]
    pub tax: Option<Decimal>,
}

/// Request body for POST /api/items
///
/// There is no `totalAmount` field: it is derived from `baseAmount` and
/// `discount`, and anything a caller sends under that name is dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(required, custom = "crate::validation::validate_not_blank")]
    #[schema(example = "Pizza Margherita")]
    pub name: Option<String>,
    #[validate(required, custom = "crate::validation::validate_not_blank")]
    pub image: Option<String>,
    #[validate(required, custom = "crate::validation::validate_not_blank")]
    pub description: Option<String>,
    #[validate(required)]
    pub tax_applicability: Option<bool>,
    #[validate(custom = "crate::validation::validate_non_negative")]
    pub tax: Option<Decimal>,
    #[validate(required, custom = "crate::validation::validate_non_negative")]
    #[schema(example = 200)]
    pub base_amount: Option<Decimal>,
    #[validate(custom = "crate::validation::validate_non_negative")]
    #[schema(example = 25)]
    pub discount: Option<Decimal>,
    #[validate(required)]
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
}

/// Request body for PUT /api/items/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub name: Option<String>,
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub image: Option<String>,
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub description: Option<String>,
    pub tax_applicability: Option<bool>,
    #[validate(custom = "crate::validation::validate_non_negative")]
    pub tax: Option<Decimal>,
    #[validate(custom = "crate::validation::validate_non_negative")]
    pub base_amount: Option<Decimal>,
    #[validate(custom = "crate::validation::validate_non_negative")]
    pub discount: Option<Decimal>,
    pub category_id: Option<Uuid>,
    /// Outer None leaves the stored reference alone, `Some(None)` (an
    /// explicit `null`) clears it
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<Uuid>, nullable)]
    pub subcategory_id: Option<Option<Uuid>>,
}

/// Wraps whatever is present, including `null`, in Some so that an absent
/// field (handled by `default`) stays distinguishable from an explicit null
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Fully resolved category, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub image: String,
    pub description: String,
    pub tax_applicability: bool,
    pub tax: Option<Decimal>,
    pub tax_type: Option<String>,
}

/// Fully resolved subcategory, tax fields already defaulted from the parent
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubcategory {
    pub name: String,
    pub image: String,
    pub description: String,
    pub category_id: Uuid,
    pub tax_applicability: bool,
    pub tax: Option<Decimal>,
}

/// Fully resolved item with its amounts computed
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub image: String,
    pub description: String,
    pub category_id: Uuid,
    pub subcategory_id: Option<Uuid>,
    pub tax_applicability: bool,
    pub tax: Option<Decimal>,
    pub amounts: ItemAmounts,
}
