use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::catalog::error::{CatalogError, FieldError};
use crate::catalog::field_validation::{
    category_tax_errors, item_tax_errors, validate_entity_fields, validate_update, EntityInput,
};
use crate::catalog::memory::InMemoryCatalog;
use crate::catalog::models::{
    Category, CreateCategory, CreateItem, CreateSubcategory, Item, NewCategory, NewItem,
    NewSubcategory, Subcategory, UpdateCategory, UpdateItem, UpdateSubcategory,
};
use crate::catalog::price_calculator::ItemAmounts;
use crate::catalog::repository::{CategoryRepository, ItemRepository, SubcategoryRepository};
use crate::catalog::store::{CategoryStore, ItemStore, SubcategoryStore};
use crate::catalog::tax_resolver::{TaxOverride, TaxResolver};
use crate::query::ItemFilter;

/// Service layer for the menu catalog
///
/// Every write follows the same order: field validation, parent lookup,
/// tax and price resolution, then a single-record write. Nothing is
/// persisted when an earlier step fails.
#[derive(Clone)]
pub struct CatalogService {
    categories: Arc<dyn CategoryStore>,
    subcategories: Arc<dyn SubcategoryStore>,
    items: Arc<dyn ItemStore>,
}

impl CatalogService {
    /// Create a new CatalogService over the given stores
    pub fn new(
        categories: Arc<dyn CategoryStore>,
        subcategories: Arc<dyn SubcategoryStore>,
        items: Arc<dyn ItemStore>,
    ) -> Self {
        Self {
            categories,
            subcategories,
            items,
        }
    }

    /// Catalog backed by PostgreSQL
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(CategoryRepository::new(pool.clone())),
            Arc::new(SubcategoryRepository::new(pool.clone())),
            Arc::new(ItemRepository::new(pool)),
        )
    }

    /// Catalog held in process memory, empty at start
    pub fn in_memory() -> Self {
        let store = InMemoryCatalog::new();
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
        )
    }

    // ---- Categories ----

    /// Create a new category
    pub async fn create_category(&self, request: CreateCategory) -> Result<Category, CatalogError> {
        ensure_valid(EntityInput::Category(&request))?;

        let category = NewCategory {
            name: required(request.name, "name")?,
            image: required(request.image, "image")?,
            description: required(request.description, "description")?,
            tax_applicability: required(request.tax_applicability, "taxApplicability")?,
            tax: request.tax,
            tax_type: request.tax_type,
        };

        let created = self.categories.insert_category(category).await?;
        tracing::info!("Created category {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        tracing::debug!("Listing categories");
        self.categories.list_categories().await
    }

    /// Look up a category by UUID, or by exact name if the identifier is not one
    pub async fn get_category(&self, identifier: &str) -> Result<Category, CatalogError> {
        tracing::debug!("Fetching category {}", identifier);

        let found = match Uuid::parse_str(identifier) {
            Ok(id) => self.categories.find_category_by_id(id).await?,
            Err(_) => self.categories.find_category_by_name(identifier).await?,
        };
        found.ok_or_else(|| CatalogError::not_found("Category", identifier))
    }

    /// Apply a partial update to a category
    ///
    /// Subcategories created earlier keep their own tax snapshot, nothing is
    /// propagated to them.
    pub async fn update_category(
        &self,
        id: Uuid,
        request: UpdateCategory,
    ) -> Result<Category, CatalogError> {
        validate_update(&request)?;

        let stored = self
            .categories
            .find_category_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Category", id))?;

        let merged = Category {
            name: request.name.unwrap_or(stored.name.clone()),
            image: request.image.unwrap_or(stored.image.clone()),
            description: request.description.unwrap_or(stored.description.clone()),
            tax_applicability: request.tax_applicability.unwrap_or(stored.tax_applicability),
            tax: request.tax.or(stored.tax),
            tax_type: request.tax_type.or(stored.tax_type.clone()),
            ..stored
        };

        let errors =
            category_tax_errors(merged.tax_applicability, merged.tax, merged.tax_type.as_deref());
        if !errors.is_empty() {
            return Err(CatalogError::Validation(errors));
        }

        let updated = self
            .categories
            .update_category(&merged)
            .await?
            .ok_or_else(|| CatalogError::not_found("Category", id))?;

        tracing::info!("Updated category {}", id);
        Ok(updated)
    }

    // ---- Subcategories ----

    /// Create a new subcategory
    ///
    /// Tax fields the request leaves out are copied from the parent category.
    pub async fn create_subcategory(
        &self,
        request: CreateSubcategory,
    ) -> Result<Subcategory, CatalogError> {
        ensure_valid(EntityInput::Subcategory(&request))?;

        let category_id = required(request.category_id, "categoryId")?;
        let parent = self.require_category(category_id).await?;

        let tax = TaxResolver::resolve_subcategory_tax(
            TaxOverride {
                tax_applicability: request.tax_applicability,
                tax: request.tax,
            },
            &parent.tax_fields(),
        )?;

        let subcategory = NewSubcategory {
            name: required(request.name, "name")?,
            image: required(request.image, "image")?,
            description: required(request.description, "description")?,
            category_id,
            tax_applicability: tax.tax_applicability,
            tax: tax.tax,
        };

        let created = self.subcategories.insert_subcategory(subcategory).await?;
        tracing::info!(
            "Created subcategory {} ({}) under category {}",
            created.id,
            created.name,
            category_id
        );
        Ok(created)
    }

    pub async fn list_subcategories(&self) -> Result<Vec<Subcategory>, CatalogError> {
        tracing::debug!("Listing subcategories");
        self.subcategories.list_subcategories(None).await
    }

    pub async fn list_subcategories_by_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<Subcategory>, CatalogError> {
        tracing::debug!("Listing subcategories of category {}", category_id);
        self.subcategories
            .list_subcategories(Some(category_id))
            .await
    }

    /// Look up a subcategory by UUID, or by exact name
    pub async fn get_subcategory(&self, identifier: &str) -> Result<Subcategory, CatalogError> {
        tracing::debug!("Fetching subcategory {}", identifier);

        let found = match Uuid::parse_str(identifier) {
            Ok(id) => self.subcategories.find_subcategory_by_id(id).await?,
            Err(_) => self.subcategories.find_subcategory_by_name(identifier).await?,
        };
        found.ok_or_else(|| CatalogError::not_found("Subcategory", identifier))
    }

    /// Apply a partial update to a subcategory
    ///
    /// A new `categoryId` must reference an existing category, and the move is
    /// refused while items reference the subcategory. Tax fields left out of
    /// the update keep their stored values, the parent is not consulted.
    pub async fn update_subcategory(
        &self,
        id: Uuid,
        request: UpdateSubcategory,
    ) -> Result<Subcategory, CatalogError> {
        validate_update(&request)?;

        let stored = self
            .subcategories
            .find_subcategory_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Subcategory", id))?;

        let category_id = request.category_id.unwrap_or(stored.category_id);
        if category_id != stored.category_id {
            self.require_category(category_id).await?;
            self.require_no_items_under(&stored, category_id).await?;
        }

        let tax = TaxResolver::apply_update(
            &stored.tax_fields(),
            TaxOverride {
                tax_applicability: request.tax_applicability,
                tax: request.tax,
            },
        )?;

        let merged = Subcategory {
            name: request.name.unwrap_or(stored.name.clone()),
            image: request.image.unwrap_or(stored.image.clone()),
            description: request.description.unwrap_or(stored.description.clone()),
            category_id,
            tax_applicability: tax.tax_applicability,
            tax: tax.tax,
            ..stored
        };

        let updated = self
            .subcategories
            .update_subcategory(&merged)
            .await?
            .ok_or_else(|| CatalogError::not_found("Subcategory", id))?;

        tracing::info!("Updated subcategory {}", id);
        Ok(updated)
    }

    // ---- Items ----

    /// Create a new item
    ///
    /// This method:
    /// 1. Validates the request fields
    /// 2. Verifies the category (and subcategory, if given) exist
    /// 3. Verifies the subcategory belongs to the category
    /// 4. Computes the total amount and writes the item
    pub async fn create_item(&self, request: CreateItem) -> Result<Item, CatalogError> {
        ensure_valid(EntityInput::Item(&request))?;

        let category_id = required(request.category_id, "categoryId")?;
        self.require_item_references(category_id, request.subcategory_id)
            .await?;

        let base_amount = required(request.base_amount, "baseAmount")?;
        let item = NewItem {
            name: required(request.name, "name")?,
            image: required(request.image, "image")?,
            description: required(request.description, "description")?,
            category_id,
            subcategory_id: request.subcategory_id,
            tax_applicability: required(request.tax_applicability, "taxApplicability")?,
            tax: request.tax,
            amounts: ItemAmounts::new(base_amount, request.discount),
        };

        let created = self.items.insert_item(item).await?;
        tracing::info!(
            "Created item {} ({}) with total {}",
            created.id,
            created.name,
            created.total_amount
        );
        Ok(created)
    }

    /// List items matching a validated filter
    pub async fn list_items(&self, filter: &ItemFilter) -> Result<Vec<Item>, CatalogError> {
        tracing::debug!("Listing items with filter {:?}", filter);
        self.items.list_items(filter).await
    }

    pub async fn list_items_by_category(&self, category_id: Uuid) -> Result<Vec<Item>, CatalogError> {
        self.list_items(&ItemFilter::by_category(category_id)).await
    }

    pub async fn list_items_by_subcategory(
        &self,
        subcategory_id: Uuid,
    ) -> Result<Vec<Item>, CatalogError> {
        self.list_items(&ItemFilter::by_subcategory(subcategory_id))
            .await
    }

    /// Case-insensitive name substring search
    pub async fn search_items(&self, name: &str) -> Result<Vec<Item>, CatalogError> {
        self.list_items(&ItemFilter::by_name(name)).await
    }

    /// Look up an item by UUID, or by exact name
    pub async fn get_item(&self, identifier: &str) -> Result<Item, CatalogError> {
        tracing::debug!("Fetching item {}", identifier);

        let found = match Uuid::parse_str(identifier) {
            Ok(id) => self.items.find_item_by_id(id).await?,
            Err(_) => self.items.find_item_by_name(identifier).await?,
        };
        found.ok_or_else(|| CatalogError::not_found("Item", identifier))
    }

    /// Apply a partial update to an item
    ///
    /// This method:
    /// 1. Validates the fields present in the request
    /// 2. Fetches the stored item
    /// 3. Re-checks references when either of them changes, an explicit
    ///    null `subcategoryId` clears the reference
    /// 4. Re-checks the tax invariant on the merged record
    /// 5. Recomputes the total if `baseAmount` or `discount` changed
    pub async fn update_item(&self, id: Uuid, request: UpdateItem) -> Result<Item, CatalogError> {
        validate_update(&request)?;

        let stored = self
            .items
            .find_item_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Item", id))?;

        let category_id = request.category_id.unwrap_or(stored.category_id);
        let subcategory_id = match request.subcategory_id {
            Some(explicit) => explicit,
            None => stored.subcategory_id,
        };
        if category_id != stored.category_id || subcategory_id != stored.subcategory_id {
            self.require_item_references(category_id, subcategory_id)
                .await?;
        }

        let tax_applicability = request.tax_applicability.unwrap_or(stored.tax_applicability);
        let tax = request.tax.or(stored.tax);
        let errors = item_tax_errors(tax_applicability, tax);
        if !errors.is_empty() {
            return Err(CatalogError::Validation(errors));
        }

        let amounts = stored
            .amounts()
            .apply_update(request.base_amount, request.discount);

        let merged = Item {
            name: request.name.unwrap_or(stored.name.clone()),
            image: request.image.unwrap_or(stored.image.clone()),
            description: request.description.unwrap_or(stored.description.clone()),
            category_id,
            subcategory_id,
            tax_applicability,
            tax,
            base_amount: amounts.base_amount,
            discount: amounts.discount,
            total_amount: amounts.total_amount,
            ..stored
        };

        let updated = self
            .items
            .update_item(&merged)
            .await?
            .ok_or_else(|| CatalogError::not_found("Item", id))?;

        tracing::info!("Updated item {} with total {}", id, updated.total_amount);
        Ok(updated)
    }

    // ---- Reference checks ----

    async fn require_category(&self, category_id: Uuid) -> Result<Category, CatalogError> {
        self.categories
            .find_category_by_id(category_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Referenced category {} does not exist", category_id);
                CatalogError::ParentNotFound {
                    resource: "Category",
                    id: category_id,
                }
            })
    }

    /// A subcategory can only move to another category while no item
    /// references it, otherwise those items would point at a subcategory
    /// outside their own category
    async fn require_no_items_under(
        &self,
        subcategory: &Subcategory,
        new_category_id: Uuid,
    ) -> Result<(), CatalogError> {
        let items = self
            .items
            .list_items(&ItemFilter::by_subcategory(subcategory.id))
            .await?;

        if items.iter().any(|item| item.category_id != new_category_id) {
            tracing::warn!(
                "Subcategory {} still has {} item(s) under category {}",
                subcategory.id,
                items.len(),
                subcategory.category_id
            );
            return Err(CatalogError::InvalidReference {
                subcategory_id: subcategory.id,
                category_id: new_category_id,
            });
        }

        Ok(())
    }

    /// Both parents of an item must exist and the subcategory must sit under
    /// the category
    async fn require_item_references(
        &self,
        category_id: Uuid,
        subcategory_id: Option<Uuid>,
    ) -> Result<(), CatalogError> {
        self.require_category(category_id).await?;

        let Some(subcategory_id) = subcategory_id else {
            return Ok(());
        };

        let subcategory = self
            .subcategories
            .find_subcategory_by_id(subcategory_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Referenced subcategory {} does not exist", subcategory_id);
                CatalogError::ParentNotFound {
                    resource: "Subcategory",
                    id: subcategory_id,
                }
            })?;

        if subcategory.category_id != category_id {
            tracing::warn!(
                "Subcategory {} belongs to category {}, not {}",
                subcategory_id,
                subcategory.category_id,
                category_id
            );
            return Err(CatalogError::InvalidReference {
                subcategory_id,
                category_id,
            });
        }

        Ok(())
    }
}

fn ensure_valid(input: EntityInput<'_>) -> Result<(), CatalogError> {
    let errors = validate_entity_fields(input);
    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!("Rejected {:?} request: {} field error(s)", input.kind(), errors.len());
        Err(CatalogError::Validation(errors))
    }
}

/// Unwrap a field that validation has already confirmed is present
fn required<T>(value: Option<T>, field: &str) -> Result<T, CatalogError> {
    value.ok_or_else(|| CatalogError::Validation(vec![FieldError::missing(field)]))
}
