use axum::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::catalog::error::CatalogError;
use crate::catalog::models::{Category, Item, NewCategory, NewItem, NewSubcategory, Subcategory};
use crate::catalog::store::{CategoryStore, ItemStore, SubcategoryStore};
use crate::query::ItemFilter;

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    items: Vec<Item>,
}

/// Catalog kept in process memory
///
/// Used when no database is configured and by the HTTP tests. Records are
/// kept in insertion order, which is also the default listing order.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryStore for InMemoryCatalog {
    async fn insert_category(&self, category: NewCategory) -> Result<Category, CatalogError> {
        let now = Utc::now();
        let created = Category {
            id: Uuid::new_v4(),
            name: category.name,
            image: category.image,
            description: category.description,
            tax_applicability: category.tax_applicability,
            tax: category.tax,
            tax_type: category.tax_type,
            created_at: now,
            updated_at: now,
        };

        self.tables.write().await.categories.push(created.clone());
        Ok(created)
    }

    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<Category>, CatalogError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, CatalogError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.name == name).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.tables.read().await.categories.clone())
    }

    async fn update_category(&self, category: &Category) -> Result<Option<Category>, CatalogError> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.categories.iter_mut().find(|c| c.id == category.id) else {
            return Ok(None);
        };

        *stored = Category {
            created_at: stored.created_at,
            updated_at: Utc::now(),
            ..category.clone()
        };
        Ok(Some(stored.clone()))
    }
}

#[async_trait]
impl SubcategoryStore for InMemoryCatalog {
    async fn insert_subcategory(
        &self,
        subcategory: NewSubcategory,
    ) -> Result<Subcategory, CatalogError> {
        let now = Utc::now();
        let created = Subcategory {
            id: Uuid::new_v4(),
            name: subcategory.name,
            image: subcategory.image,
            description: subcategory.description,
            category_id: subcategory.category_id,
            tax_applicability: subcategory.tax_applicability,
            tax: subcategory.tax,
            created_at: now,
            updated_at: now,
        };

        self.tables.write().await.subcategories.push(created.clone());
        Ok(created)
    }

    async fn find_subcategory_by_id(&self, id: Uuid) -> Result<Option<Subcategory>, CatalogError> {
        let tables = self.tables.read().await;
        Ok(tables.subcategories.iter().find(|s| s.id == id).cloned())
    }

    async fn find_subcategory_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Subcategory>, CatalogError> {
        let tables = self.tables.read().await;
        Ok(tables.subcategories.iter().find(|s| s.name == name).cloned())
    }

    async fn list_subcategories(
        &self,
        category_id: Option<Uuid>,
    ) -> Result<Vec<Subcategory>, CatalogError> {
        let tables = self.tables.read().await;
        Ok(tables
            .subcategories
            .iter()
            .filter(|s| category_id.map_or(true, |id| s.category_id == id))
            .cloned()
            .collect())
    }

    async fn update_subcategory(
        &self,
        subcategory: &Subcategory,
    ) -> Result<Option<Subcategory>, CatalogError> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables
            .subcategories
            .iter_mut()
            .find(|s| s.id == subcategory.id)
        else {
            return Ok(None);
        };

        *stored = Subcategory {
            created_at: stored.created_at,
            updated_at: Utc::now(),
            ..subcategory.clone()
        };
        Ok(Some(stored.clone()))
    }
}

#[async_trait]
impl ItemStore for InMemoryCatalog {
    async fn insert_item(&self, item: NewItem) -> Result<Item, CatalogError> {
        let now = Utc::now();
        let created = Item {
            id: Uuid::new_v4(),
            name: item.name,
            image: item.image,
            description: item.description,
            category_id: item.category_id,
            subcategory_id: item.subcategory_id,
            tax_applicability: item.tax_applicability,
            tax: item.tax,
            base_amount: item.amounts.base_amount,
            discount: item.amounts.discount,
            total_amount: item.amounts.total_amount,
            created_at: now,
            updated_at: now,
        };

        self.tables.write().await.items.push(created.clone());
        Ok(created)
    }

    async fn find_item_by_id(&self, id: Uuid) -> Result<Option<Item>, CatalogError> {
        let tables = self.tables.read().await;
        Ok(tables.items.iter().find(|i| i.id == id).cloned())
    }

    async fn find_item_by_name(&self, name: &str) -> Result<Option<Item>, CatalogError> {
        let tables = self.tables.read().await;
        Ok(tables.items.iter().find(|i| i.name == name).cloned())
    }

    async fn list_items(&self, filter: &ItemFilter) -> Result<Vec<Item>, CatalogError> {
        let mut items: Vec<Item> = {
            let tables = self.tables.read().await;
            tables
                .items
                .iter()
                .filter(|item| filter.matches(item))
                .cloned()
                .collect()
        };

        filter.sort(&mut items);
        Ok(items)
    }

    async fn update_item(&self, item: &Item) -> Result<Option<Item>, CatalogError> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.items.iter_mut().find(|i| i.id == item.id) else {
            return Ok(None);
        };

        *stored = Item {
            created_at: stored.created_at,
            updated_at: Utc::now(),
            ..item.clone()
        };
        Ok(Some(stored.clone()))
    }
}
