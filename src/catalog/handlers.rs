// HTTP handlers for catalog endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::catalog::models::{
    Category, CreateCategory, CreateItem, CreateSubcategory, Item, Subcategory, UpdateCategory,
    UpdateItem, UpdateSubcategory,
};
use crate::error::ApiError;
use crate::query::{ItemQueryParams, QueryValidator};
use crate::AppState;

// ============================================================================
// Categories
// ============================================================================

/// Handler for POST /api/categories
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategory>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let Json(payload) = payload?;
    let category = state.catalog.create_category(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Handler for GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.catalog.list_categories().await?))
}

/// Handler for GET /api/categories/{identifier}
#[utoipa::path(
    get,
    path = "/api/categories/{identifier}",
    params(
        ("identifier" = String, Path, description = "Category UUID or exact name")
    ),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.catalog.get_category(&identifier).await?))
}

/// Handler for PUT /api/categories/{id}
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category UUID")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, description = "Invalid fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateCategory>, JsonRejection>,
) -> Result<Json<Category>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(state.catalog.update_category(id, payload).await?))
}

// ============================================================================
// Subcategories
// ============================================================================

/// Handler for POST /api/subcategories
/// Tax fields left out of the body are copied from the parent category
#[utoipa::path(
    post,
    path = "/api/subcategories",
    request_body = CreateSubcategory,
    responses(
        (status = 201, description = "Subcategory created", body = Subcategory),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Parent category not found", body = crate::error::ErrorResponse)
    ),
    tag = "subcategories"
)]
pub async fn create_subcategory(
    State(state): State<AppState>,
    payload: Result<Json<CreateSubcategory>, JsonRejection>,
) -> Result<(StatusCode, Json<Subcategory>), ApiError> {
    let Json(payload) = payload?;
    let subcategory = state.catalog.create_subcategory(payload).await?;
    Ok((StatusCode::CREATED, Json(subcategory)))
}

/// Handler for GET /api/subcategories
#[utoipa::path(
    get,
    path = "/api/subcategories",
    responses(
        (status = 200, description = "All subcategories", body = Vec<Subcategory>)
    ),
    tag = "subcategories"
)]
pub async fn list_subcategories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Subcategory>>, ApiError> {
    Ok(Json(state.catalog.list_subcategories().await?))
}

/// Handler for GET /api/subcategories/category/{categoryId}
#[utoipa::path(
    get,
    path = "/api/subcategories/category/{categoryId}",
    params(
        ("categoryId" = Uuid, Path, description = "Parent category UUID")
    ),
    responses(
        (status = 200, description = "Subcategories of the category", body = Vec<Subcategory>),
        (status = 400, description = "Malformed category id", body = crate::error::ErrorResponse)
    ),
    tag = "subcategories"
)]
pub async fn list_subcategories_by_category(
    State(state): State<AppState>,
    category_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<Subcategory>>, ApiError> {
    let Path(category_id) = category_id?;
    Ok(Json(
        state
            .catalog
            .list_subcategories_by_category(category_id)
            .await?,
    ))
}

/// Handler for GET /api/subcategories/{identifier}
#[utoipa::path(
    get,
    path = "/api/subcategories/{identifier}",
    params(
        ("identifier" = String, Path, description = "Subcategory UUID or exact name")
    ),
    responses(
        (status = 200, description = "Subcategory found", body = Subcategory),
        (status = 404, description = "Subcategory not found", body = crate::error::ErrorResponse)
    ),
    tag = "subcategories"
)]
pub async fn get_subcategory(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<Subcategory>, ApiError> {
    Ok(Json(state.catalog.get_subcategory(&identifier).await?))
}

/// Handler for PUT /api/subcategories/{id}
#[utoipa::path(
    put,
    path = "/api/subcategories/{id}",
    params(
        ("id" = Uuid, Path, description = "Subcategory UUID")
    ),
    request_body = UpdateSubcategory,
    responses(
        (status = 200, description = "Subcategory updated", body = Subcategory),
        (status = 400, description = "Invalid fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Subcategory or new parent not found", body = crate::error::ErrorResponse)
    ),
    tag = "subcategories"
)]
pub async fn update_subcategory(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateSubcategory>, JsonRejection>,
) -> Result<Json<Subcategory>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(state.catalog.update_subcategory(id, payload).await?))
}

// ============================================================================
// Items
// ============================================================================

/// Handler for POST /api/items
/// totalAmount is computed from baseAmount and discount
#[utoipa::path(
    post,
    path = "/api/items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Missing or invalid fields, or mismatched subcategory", body = crate::error::ErrorResponse),
        (status = 404, description = "Parent category or subcategory not found", body = crate::error::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateItem>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let Json(payload) = payload?;
    let item = state.catalog.create_item(payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for GET /api/items
/// Supports search, filtering by parent and total range, and sorting
#[utoipa::path(
    get,
    path = "/api/items",
    params(ItemQueryParams),
    responses(
        (status = 200, description = "Matching items", body = Vec<Item>),
        (status = 400, description = "Invalid query parameters", body = crate::error::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn list_items(
    State(state): State<AppState>,
    params: Result<Query<ItemQueryParams>, QueryRejection>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let Query(params) = params?;
    tracing::debug!("Fetching items with query parameters: {:?}", params);

    let filter = QueryValidator::validate(params)?;
    Ok(Json(state.catalog.list_items(&filter).await?))
}

/// Handler for GET /api/items/category/{categoryId}
#[utoipa::path(
    get,
    path = "/api/items/category/{categoryId}",
    params(
        ("categoryId" = Uuid, Path, description = "Category UUID")
    ),
    responses(
        (status = 200, description = "Items of the category", body = Vec<Item>)
    ),
    tag = "items"
)]
pub async fn list_items_by_category(
    State(state): State<AppState>,
    category_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let Path(category_id) = category_id?;
    Ok(Json(state.catalog.list_items_by_category(category_id).await?))
}

/// Handler for GET /api/items/subcategory/{subcategoryId}
#[utoipa::path(
    get,
    path = "/api/items/subcategory/{subcategoryId}",
    params(
        ("subcategoryId" = Uuid, Path, description = "Subcategory UUID")
    ),
    responses(
        (status = 200, description = "Items of the subcategory", body = Vec<Item>)
    ),
    tag = "items"
)]
pub async fn list_items_by_subcategory(
    State(state): State<AppState>,
    subcategory_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let Path(subcategory_id) = subcategory_id?;
    Ok(Json(
        state
            .catalog
            .list_items_by_subcategory(subcategory_id)
            .await?,
    ))
}

/// Handler for GET /api/items/search/{name}
#[utoipa::path(
    get,
    path = "/api/items/search/{name}",
    params(
        ("name" = String, Path, description = "Case-insensitive part of the item name")
    ),
    responses(
        (status = 200, description = "Items whose name contains the term", body = Vec<Item>)
    ),
    tag = "items"
)]
pub async fn search_items(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Item>>, ApiError> {
    Ok(Json(state.catalog.search_items(&name).await?))
}

/// Handler for GET /api/items/{identifier}
#[utoipa::path(
    get,
    path = "/api/items/{identifier}",
    params(
        ("identifier" = String, Path, description = "Item UUID or exact name")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 404, description = "Item not found", body = crate::error::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(state.catalog.get_item(&identifier).await?))
}

/// Handler for PUT /api/items/{id}
/// totalAmount is recomputed when baseAmount or discount change
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item UUID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Invalid fields or mismatched subcategory", body = crate::error::ErrorResponse),
        (status = 404, description = "Item or referenced parent not found", body = crate::error::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_item(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateItem>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(state.catalog.update_item(id, payload).await?))
}
