use rust_decimal::Decimal;

use crate::catalog::error::{CatalogError, FieldError};

/// Effective tax settings of a category or subcategory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxFields {
    pub tax_applicability: bool,
    pub tax: Option<Decimal>,
}

/// Tax settings as supplied by a caller, either field may be unset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxOverride {
    pub tax_applicability: Option<bool>,
    pub tax: Option<Decimal>,
}

/// Resolves cascading tax defaults between levels of the menu tree
pub struct TaxResolver;

impl TaxResolver {
    /// Resolve the tax fields of a subcategory being created
    ///
    /// Each field is resolved on its own: a supplied value is used verbatim,
    /// otherwise the parent category's value is copied. The result is a
    /// snapshot, later edits to the category do not flow back into it.
    ///
    /// # Errors
    /// `InvalidTaxConfiguration` when the result is tax-applicable but has no
    /// rate, which happens when neither the caller nor the parent supplies one.
    pub fn resolve_subcategory_tax(
        input: TaxOverride,
        parent: &TaxFields,
    ) -> Result<TaxFields, CatalogError> {
        let resolved = TaxFields {
            tax_applicability: input.tax_applicability.unwrap_or(parent.tax_applicability),
            tax: input.tax.or(parent.tax),
        };

        Self::check_rate_present(&resolved)?;
        Ok(resolved)
    }

    /// Merge an update into stored tax fields and re-check the invariant
    ///
    /// Used for subcategory edits: there is no defaulting from the parent
    /// here, only the stored values fill in what the update leaves out.
    pub fn apply_update(stored: &TaxFields, update: TaxOverride) -> Result<TaxFields, CatalogError> {
        let merged = TaxFields {
            tax_applicability: update.tax_applicability.unwrap_or(stored.tax_applicability),
            tax: update.tax.or(stored.tax),
        };

        Self::check_rate_present(&merged)?;
        Ok(merged)
    }

    fn check_rate_present(fields: &TaxFields) -> Result<(), CatalogError> {
        if fields.tax_applicability && fields.tax.is_none() {
            return Err(CatalogError::Validation(vec![FieldError::invalid_tax(
                "tax",
                "tax is required when taxApplicability is true",
            )]));
        }
        Ok(())
    }
}
