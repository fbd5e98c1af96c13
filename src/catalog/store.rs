use axum::async_trait;
use uuid::Uuid;

use crate::catalog::error::CatalogError;
use crate::catalog::models::{Category, Item, NewCategory, NewItem, NewSubcategory, Subcategory};
use crate::query::ItemFilter;

/// Persistence for categories
///
/// `update_category` writes the whole record and returns None when the id
/// no longer exists.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn insert_category(&self, category: NewCategory) -> Result<Category, CatalogError>;
    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<Category>, CatalogError>;
    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, CatalogError>;
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;
    async fn update_category(&self, category: &Category) -> Result<Option<Category>, CatalogError>;
}

/// Persistence for subcategories
#[async_trait]
pub trait SubcategoryStore: Send + Sync {
    async fn insert_subcategory(
        &self,
        subcategory: NewSubcategory,
    ) -> Result<Subcategory, CatalogError>;
    async fn find_subcategory_by_id(&self, id: Uuid) -> Result<Option<Subcategory>, CatalogError>;
    async fn find_subcategory_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Subcategory>, CatalogError>;
    /// All subcategories, or only those under `category_id`
    async fn list_subcategories(
        &self,
        category_id: Option<Uuid>,
    ) -> Result<Vec<Subcategory>, CatalogError>;
    async fn update_subcategory(
        &self,
        subcategory: &Subcategory,
    ) -> Result<Option<Subcategory>, CatalogError>;
}

/// Persistence for items
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn insert_item(&self, item: NewItem) -> Result<Item, CatalogError>;
    async fn find_item_by_id(&self, id: Uuid) -> Result<Option<Item>, CatalogError>;
    async fn find_item_by_name(&self, name: &str) -> Result<Option<Item>, CatalogError>;
    async fn list_items(&self, filter: &ItemFilter) -> Result<Vec<Item>, CatalogError>;
    async fn update_item(&self, item: &Item) -> Result<Option<Item>, CatalogError>;
}
