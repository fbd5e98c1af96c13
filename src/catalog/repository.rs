use axum::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::catalog::error::CatalogError;
use crate::catalog::models::{Category, Item, NewCategory, NewItem, NewSubcategory, Subcategory};
use crate::catalog::store::{CategoryStore, ItemStore, SubcategoryStore};
use crate::query::{ItemFilter, ItemQueryBuilder, ITEM_COLUMNS};

const CATEGORY_COLUMNS: &str =
    "id, name, image, description, tax_applicability, tax, tax_type, created_at, updated_at";

const SUBCATEGORY_COLUMNS: &str =
    "id, name, image, description, category_id, tax_applicability, tax, created_at, updated_at";

/// Repository for category operations
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new CategoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn insert_category(&self, category: NewCategory) -> Result<Category, CatalogError> {
        let created = sqlx::query_as::<_, Category>(&format!(
            r#"
            INSERT INTO categories (name, image, description, tax_applicability, tax, tax_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(category.name)
        .bind(category.image)
        .bind(category.description)
        .bind(category.tax_applicability)
        .bind(category.tax)
        .bind(category.tax_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<Category>, CatalogError> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE id = $1",
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, CatalogError> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE name = $1 ORDER BY created_at LIMIT 1",
            CATEGORY_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories ORDER BY created_at",
            CATEGORY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn update_category(&self, category: &Category) -> Result<Option<Category>, CatalogError> {
        let updated = sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE categories
            SET name = $1,
                image = $2,
                description = $3,
                tax_applicability = $4,
                tax = $5,
                tax_type = $6,
                updated_at = NOW()
            WHERE id = $7
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(&category.name)
        .bind(&category.image)
        .bind(&category.description)
        .bind(category.tax_applicability)
        .bind(category.tax)
        .bind(&category.tax_type)
        .bind(category.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }
}

/// Repository for subcategory operations
#[derive(Clone)]
pub struct SubcategoryRepository {
    pool: PgPool,
}

impl SubcategoryRepository {
    /// Create a new SubcategoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubcategoryStore for SubcategoryRepository {
    async fn insert_subcategory(
        &self,
        subcategory: NewSubcategory,
    ) -> Result<Subcategory, CatalogError> {
        let created = sqlx::query_as::<_, Subcategory>(&format!(
            r#"
            INSERT INTO subcategories (name, image, description, category_id, tax_applicability, tax)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            SUBCATEGORY_COLUMNS
        ))
        .bind(subcategory.name)
        .bind(subcategory.image)
        .bind(subcategory.description)
        .bind(subcategory.category_id)
        .bind(subcategory.tax_applicability)
        .bind(subcategory.tax)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_subcategory_by_id(&self, id: Uuid) -> Result<Option<Subcategory>, CatalogError> {
        let subcategory = sqlx::query_as::<_, Subcategory>(&format!(
            "SELECT {} FROM subcategories WHERE id = $1",
            SUBCATEGORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subcategory)
    }

    async fn find_subcategory_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Subcategory>, CatalogError> {
        let subcategory = sqlx::query_as::<_, Subcategory>(&format!(
            "SELECT {} FROM subcategories WHERE name = $1 ORDER BY created_at LIMIT 1",
            SUBCATEGORY_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subcategory)
    }

    async fn list_subcategories(
        &self,
        category_id: Option<Uuid>,
    ) -> Result<Vec<Subcategory>, CatalogError> {
        let subcategories = match category_id {
            Some(category_id) => {
                sqlx::query_as::<_, Subcategory>(&format!(
                    "SELECT {} FROM subcategories WHERE category_id = $1 ORDER BY created_at",
                    SUBCATEGORY_COLUMNS
                ))
                .bind(category_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Subcategory>(&format!(
                    "SELECT {} FROM subcategories ORDER BY created_at",
                    SUBCATEGORY_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(subcategories)
    }

    async fn update_subcategory(
        &self,
        subcategory: &Subcategory,
    ) -> Result<Option<Subcategory>, CatalogError> {
        let updated = sqlx::query_as::<_, Subcategory>(&format!(
            r#"
            UPDATE subcategories
            SET name = $1,
                image = $2,
                description = $3,
                category_id = $4,
                tax_applicability = $5,
                tax = $6,
                updated_at = NOW()
            WHERE id = $7
            RETURNING {}
            "#,
            SUBCATEGORY_COLUMNS
        ))
        .bind(&subcategory.name)
        .bind(&subcategory.image)
        .bind(&subcategory.description)
        .bind(subcategory.category_id)
        .bind(subcategory.tax_applicability)
        .bind(subcategory.tax)
        .bind(subcategory.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }
}

/// Repository for item operations
#[derive(Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new ItemRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for ItemRepository {
    async fn insert_item(&self, item: NewItem) -> Result<Item, CatalogError> {
        let created = sqlx::query_as::<_, Item>(&format!(
            r#"
            INSERT INTO items (name, image, description, category_id, subcategory_id,
                               tax_applicability, tax, base_amount, discount, total_amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(item.name)
        .bind(item.image)
        .bind(item.description)
        .bind(item.category_id)
        .bind(item.subcategory_id)
        .bind(item.tax_applicability)
        .bind(item.tax)
        .bind(item.amounts.base_amount)
        .bind(item.amounts.discount)
        .bind(item.amounts.total_amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_item_by_id(&self, id: Uuid) -> Result<Option<Item>, CatalogError> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE id = $1",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn find_item_by_name(&self, name: &str) -> Result<Option<Item>, CatalogError> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE name = $1 ORDER BY created_at LIMIT 1",
            ITEM_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn list_items(&self, filter: &ItemFilter) -> Result<Vec<Item>, CatalogError> {
        let (query_str, params) = ItemQueryBuilder::from_filter(filter).build();

        let mut query = sqlx::query_as::<_, Item>(&query_str);
        for param in params {
            query = query.bind(param);
        }

        let items = query.fetch_all(&self.pool).await?;
        tracing::debug!("Item query returned {} rows", items.len());
        Ok(items)
    }

    async fn update_item(&self, item: &Item) -> Result<Option<Item>, CatalogError> {
        let updated = sqlx::query_as::<_, Item>(&format!(
            r#"
            UPDATE items
            SET name = $1,
                image = $2,
                description = $3,
                category_id = $4,
                subcategory_id = $5,
                tax_applicability = $6,
                tax = $7,
                base_amount = $8,
                discount = $9,
                total_amount = $10,
                updated_at = NOW()
            WHERE id = $11
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(&item.name)
        .bind(&item.image)
        .bind(&item.description)
        .bind(item.category_id)
        .bind(item.subcategory_id)
        .bind(item.tax_applicability)
        .bind(item.tax)
        .bind(item.base_amount)
        .bind(item.discount)
        .bind(item.total_amount)
        .bind(item.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }
}
