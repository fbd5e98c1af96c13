pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod query;
pub mod seed;
pub mod validation;

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use catalog::{error::FieldError, error::FieldErrorKind, handlers, CatalogService};
use catalog::models::{
    Category, CreateCategory, CreateItem, CreateSubcategory, Item, Subcategory, UpdateCategory,
    UpdateItem, UpdateSubcategory,
};
use error::ErrorResponse;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::create_category,
        handlers::list_categories,
        handlers::get_category,
        handlers::update_category,
        handlers::create_subcategory,
        handlers::list_subcategories,
        handlers::list_subcategories_by_category,
        handlers::get_subcategory,
        handlers::update_subcategory,
        handlers::create_item,
        handlers::list_items,
        handlers::list_items_by_category,
        handlers::list_items_by_subcategory,
        handlers::search_items,
        handlers::get_item,
        handlers::update_item,
    ),
    components(
        schemas(
            Category, CreateCategory, UpdateCategory,
            Subcategory, CreateSubcategory, UpdateSubcategory,
            Item, CreateItem, UpdateItem,
            ErrorResponse, FieldError, FieldErrorKind
        )
    ),
    tags(
        (name = "categories", description = "Top-level menu categories"),
        (name = "subcategories", description = "Subcategories, tax defaulted from their category"),
        (name = "items", description = "Menu items with derived total amounts")
    ),
    info(
        title = "Menu Management API",
        version = "1.0.0",
        description = "RESTful API for managing a category, subcategory and item menu"
    )
)]
pub struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

impl AppState {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            catalog: CatalogService::postgres(pool),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            catalog: CatalogService::in_memory(),
        }
    }
}

async fn root() -> &'static str {
    "Menu Management Backend API"
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS and tracing middleware
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root))
        // Categories
        .route(
            "/api/categories",
            post(handlers::create_category).get(handlers::list_categories),
        )
        .route("/api/categories/:identifier", get(handlers::get_category))
        .route("/api/categories/:identifier", put(handlers::update_category))
        // Subcategories
        .route(
            "/api/subcategories",
            post(handlers::create_subcategory).get(handlers::list_subcategories),
        )
        .route(
            "/api/subcategories/category/:category_id",
            get(handlers::list_subcategories_by_category),
        )
        .route("/api/subcategories/:identifier", get(handlers::get_subcategory))
        .route("/api/subcategories/:identifier", put(handlers::update_subcategory))
        // Items
        .route(
            "/api/items",
            post(handlers::create_item).get(handlers::list_items),
        )
        .route(
            "/api/items/category/:category_id",
            get(handlers::list_items_by_category),
        )
        .route(
            "/api/items/subcategory/:subcategory_id",
            get(handlers::list_items_by_subcategory),
        )
        .route("/api/items/search/:name", get(handlers::search_items))
        .route("/api/items/:identifier", get(handlers::get_item))
        .route("/api/items/:identifier", put(handlers::update_item))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests;
