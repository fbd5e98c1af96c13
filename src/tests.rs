// Handler tests for the Menu Management API
// Every test runs against the router backed by a fresh in-memory catalog

use super::*;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

// ============================================================================
// Test Helpers
// ============================================================================

fn create_test_app() -> TestServer {
    TestServer::new(create_router(AppState::in_memory())).unwrap()
}

fn category_payload(name: &str, tax: f64) -> Value {
    json!({
        "name": name,
        "image": "https://images.example.com/category.jpg",
        "description": "Test category",
        "taxApplicability": true,
        "tax": tax,
        "taxType": "GST"
    })
}

fn item_payload(name: &str, category_id: &str, base_amount: f64, discount: f64) -> Value {
    json!({
        "name": name,
        "image": "https://images.example.com/item.jpg",
        "description": "Test item",
        "taxApplicability": true,
        "tax": 12,
        "baseAmount": base_amount,
        "discount": discount,
        "categoryId": category_id
    })
}

async fn create_category(server: &TestServer, name: &str, tax: f64) -> String {
    let response = server
        .post("/api/categories")
        .json(&category_payload(name, tax))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["id"].as_str().unwrap().to_string()
}

async fn create_subcategory(server: &TestServer, name: &str, category_id: &str) -> Value {
    let response = server
        .post("/api/subcategories")
        .json(&json!({
            "name": name,
            "image": "https://images.example.com/subcategory.jpg",
            "description": "Test subcategory",
            "categoryId": category_id
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

async fn create_item(server: &TestServer, payload: &Value) -> Value {
    let response = server.post("/api/items").json(payload).await;

    let status = response.status_code();
    if status != StatusCode::CREATED {
        eprintln!("Response body: {}", response.text());
        panic!("Expected 201 CREATED, got {}", status);
    }
    response.json()
}

fn names(items: &Value) -> Vec<&str> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect()
}

// ============================================================================
// Root and documentation
// ============================================================================

#[tokio::test]
async fn test_root_banner() {
    let server = create_test_app();

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "Menu Management Backend API");
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let server = create_test_app();

    let response = server.get("/api-docs/openapi.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let doc: Value = response.json();
    assert!(doc["paths"].get("/api/items").is_some());
    assert!(doc["paths"].get("/api/subcategories/category/{categoryId}").is_some());
    assert!(doc["components"]["schemas"].get("ErrorResponse").is_some());
    assert_eq!(
        doc["paths"]["/api/categories/{identifier}"]["get"]["responses"]["404"]["content"]
            ["application/json"]["schema"]["$ref"],
        "#/components/schemas/ErrorResponse"
    );
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn test_create_category_success() {
    let server = create_test_app();

    let response = server
        .post("/api/categories")
        .json(&category_payload("Beverages", 5.0))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let category: Value = response.json();
    assert!(Uuid::parse_str(category["id"].as_str().unwrap()).is_ok());
    assert_eq!(category["name"], "Beverages");
    assert_eq!(category["taxApplicability"], true);
    assert_eq!(category["tax"].as_f64(), Some(5.0));
    assert_eq!(category["taxType"], "GST");
    assert!(category["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_category_missing_fields() {
    let server = create_test_app();

    let response = server
        .post("/api/categories")
        .json(&json!({ "name": "Beverages", "taxApplicability": true }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errorCode"], "VALIDATION_ERROR");

    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["description", "image", "tax", "taxType"]);
}

#[tokio::test]
async fn test_get_category_by_id_and_name() {
    let server = create_test_app();
    let id = create_category(&server, "Food", 12.0).await;

    let by_id: Value = server.get(&format!("/api/categories/{}", id)).await.json();
    let by_name: Value = server.get("/api/categories/Food").await.json();

    assert_eq!(by_id["id"], by_name["id"]);
    assert_eq!(by_name["name"], "Food");
}

#[tokio::test]
async fn test_get_category_not_found() {
    let server = create_test_app();

    let response = server.get(&format!("/api/categories/{}", Uuid::new_v4())).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["errorCode"], "NOT_FOUND");
    assert!(body["timestamp"].is_string());
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_update_category_rejects_tax_without_type() {
    let server = create_test_app();
    let response = server
        .post("/api/categories")
        .json(&json!({
            "name": "Desserts",
            "image": "https://images.example.com/desserts.jpg",
            "description": "Sweet things",
            "taxApplicability": false
        }))
        .await;
    let id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let response = server
        .put(&format!("/api/categories/{}", id))
        .json(&json!({ "taxApplicability": true, "tax": 18 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["details"][0]["field"], "taxType");
    assert_eq!(body["details"][0]["kind"], "INVALID_TAX_CONFIGURATION");
}

#[tokio::test]
async fn test_update_category_with_malformed_id() {
    let server = create_test_app();

    let response = server
        .put("/api/categories/not-a-uuid")
        .json(&json!({ "name": "Renamed" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["errorCode"], "VALIDATION_ERROR");
}

// ============================================================================
// Subcategories
// ============================================================================

#[tokio::test]
async fn test_subcategory_inherits_tax() {
    let server = create_test_app();
    let category_id = create_category(&server, "Food", 12.0).await;

    let subcategory = create_subcategory(&server, "Main Course", &category_id).await;

    assert_eq!(subcategory["categoryId"], category_id.as_str());
    assert_eq!(subcategory["taxApplicability"], true);
    assert_eq!(subcategory["tax"].as_f64(), Some(12.0));
}

#[tokio::test]
async fn test_subcategory_explicit_tax_kept() {
    let server = create_test_app();
    let category_id = create_category(&server, "Food", 12.0).await;

    let response = server
        .post("/api/subcategories")
        .json(&json!({
            "name": "Snacks",
            "image": "https://images.example.com/snacks.jpg",
            "description": "Small bites",
            "categoryId": category_id,
            "taxApplicability": false,
            "tax": 0
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let subcategory: Value = response.json();
    assert_eq!(subcategory["taxApplicability"], false);
    assert_eq!(subcategory["tax"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_subcategory_parent_not_found() {
    let server = create_test_app();

    let response = server
        .post("/api/subcategories")
        .json(&json!({
            "name": "Orphan",
            "image": "https://images.example.com/orphan.jpg",
            "description": "No parent",
            "categoryId": Uuid::new_v4()
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["errorCode"], "PARENT_NOT_FOUND");

    let all: Value = server.get("/api/subcategories").await.json();
    assert!(all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_category_tax_edit_does_not_cascade() {
    let server = create_test_app();
    let category_id = create_category(&server, "Food", 12.0).await;
    let subcategory = create_subcategory(&server, "Main Course", &category_id).await;

    let response = server
        .put(&format!("/api/categories/{}", category_id))
        .json(&json!({ "tax": 18 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["tax"].as_f64(), Some(18.0));

    let reloaded: Value = server
        .get(&format!(
            "/api/subcategories/{}",
            subcategory["id"].as_str().unwrap()
        ))
        .await
        .json();
    assert_eq!(reloaded["tax"].as_f64(), Some(12.0));
}

#[tokio::test]
async fn test_list_subcategories_by_category() {
    let server = create_test_app();
    let beverages = create_category(&server, "Beverages", 5.0).await;
    let food = create_category(&server, "Food", 12.0).await;
    create_subcategory(&server, "Hot Drinks", &beverages).await;
    create_subcategory(&server, "Cold Drinks", &beverages).await;
    create_subcategory(&server, "Main Course", &food).await;

    let listed: Value = server
        .get(&format!("/api/subcategories/category/{}", beverages))
        .await
        .json();

    assert_eq!(names(&listed), vec!["Hot Drinks", "Cold Drinks"]);
}

// ============================================================================
// Items
// ============================================================================

#[tokio::test]
async fn test_create_item_computes_total() {
    let server = create_test_app();
    let category_id = create_category(&server, "Food", 12.0).await;

    let item = create_item(
        &server,
        &item_payload("Pizza Margherita", &category_id, 200.0, 25.0),
    )
    .await;

    assert_eq!(item["baseAmount"].as_f64(), Some(200.0));
    assert_eq!(item["discount"].as_f64(), Some(25.0));
    assert_eq!(item["totalAmount"].as_f64(), Some(175.0));
}

#[tokio::test]
async fn test_create_item_ignores_supplied_total() {
    let server = create_test_app();
    let category_id = create_category(&server, "Food", 12.0).await;

    let mut payload = item_payload("Burger", &category_id, 150.0, 20.0);
    payload["totalAmount"] = json!(1);
    let item = create_item(&server, &payload).await;

    assert_eq!(item["totalAmount"].as_f64(), Some(130.0));
}

#[tokio::test]
async fn test_create_item_discount_above_base() {
    let server = create_test_app();
    let category_id = create_category(&server, "Food", 12.0).await;

    let item = create_item(&server, &item_payload("Giveaway", &category_id, 50.0, 80.0)).await;

    assert_eq!(item["totalAmount"].as_f64(), Some(-30.0));
}

#[tokio::test]
async fn test_create_item_without_discount() {
    let server = create_test_app();
    let category_id = create_category(&server, "Beverages", 5.0).await;

    let mut payload = item_payload("Tea", &category_id, 30.0, 0.0);
    payload.as_object_mut().unwrap().remove("discount");
    let item = create_item(&server, &payload).await;

    assert_eq!(item["discount"].as_f64(), Some(0.0));
    assert_eq!(item["totalAmount"].as_f64(), Some(30.0));
}

#[tokio::test]
async fn test_create_item_missing_category() {
    let server = create_test_app();

    let response = server
        .post("/api/items")
        .json(&item_payload("Ghost", &Uuid::new_v4().to_string(), 10.0, 0.0))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["errorCode"], "PARENT_NOT_FOUND");

    let all: Value = server.get("/api/items").await.json();
    assert!(all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_item_negative_base_amount() {
    let server = create_test_app();
    let category_id = create_category(&server, "Food", 12.0).await;

    let response = server
        .post("/api/items")
        .json(&item_payload("Refund", &category_id, -5.0, 0.0))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["details"][0]["field"], "baseAmount");
    assert_eq!(body["details"][0]["kind"], "INVALID_VALUE");
}

#[tokio::test]
async fn test_create_item_subcategory_from_other_category() {
    let server = create_test_app();
    let beverages = create_category(&server, "Beverages", 5.0).await;
    let food = create_category(&server, "Food", 12.0).await;
    let hot = create_subcategory(&server, "Hot Drinks", &beverages).await;

    let mut payload = item_payload("Pizza", &food, 200.0, 0.0);
    payload["subcategoryId"] = hot["id"].clone();
    let response = server.post("/api/items").json(&payload).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["errorCode"], "INVALID_REFERENCE");
}

#[tokio::test]
async fn test_create_item_malformed_body() {
    let server = create_test_app();

    let response = server
        .post("/api/items")
        .json(&json!({ "name": "Tea", "baseAmount": "thirty", "categoryId": "nope" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["errorCode"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_item_discount_recomputes_total() {
    let server = create_test_app();
    let category_id = create_category(&server, "Food", 12.0).await;
    let item = create_item(
        &server,
        &item_payload("Pizza Margherita", &category_id, 200.0, 25.0),
    )
    .await;
    let path = format!("/api/items/{}", item["id"].as_str().unwrap());

    let first: Value = server.put(&path).json(&json!({ "discount": 50 })).await.json();
    let second: Value = server.put(&path).json(&json!({ "discount": 50 })).await.json();

    assert_eq!(first["baseAmount"].as_f64(), Some(200.0));
    assert_eq!(first["totalAmount"].as_f64(), Some(150.0));
    assert_eq!(second["totalAmount"].as_f64(), Some(150.0));
}

#[tokio::test]
async fn test_update_item_base_amount_only() {
    let server = create_test_app();
    let category_id = create_category(&server, "Food", 12.0).await;
    let item = create_item(&server, &item_payload("Burger", &category_id, 150.0, 20.0)).await;

    let updated: Value = server
        .put(&format!("/api/items/{}", item["id"].as_str().unwrap()))
        .json(&json!({ "baseAmount": 180, "totalAmount": 5 }))
        .await
        .json();

    assert_eq!(updated["discount"].as_f64(), Some(20.0));
    assert_eq!(updated["totalAmount"].as_f64(), Some(160.0));
}

#[tokio::test]
async fn test_update_item_zero_discount() {
    let server = create_test_app();
    let category_id = create_category(&server, "Food", 12.0).await;
    let item = create_item(&server, &item_payload("Burger", &category_id, 150.0, 20.0)).await;

    let updated: Value = server
        .put(&format!("/api/items/{}", item["id"].as_str().unwrap()))
        .json(&json!({ "discount": 0 }))
        .await
        .json();

    assert_eq!(updated["totalAmount"].as_f64(), Some(150.0));
}

#[tokio::test]
async fn test_update_item_not_found() {
    let server = create_test_app();

    let response = server
        .put(&format!("/api/items/{}", Uuid::new_v4()))
        .json(&json!({ "discount": 1 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_item_moves_category_with_null_subcategory() {
    let server = create_test_app();
    let beverages = create_category(&server, "Beverages", 5.0).await;
    let food = create_category(&server, "Food", 12.0).await;
    let hot = create_subcategory(&server, "Hot Drinks", &beverages).await;

    let mut payload = item_payload("Coffee", &beverages, 50.0, 5.0);
    payload["subcategoryId"] = hot["id"].clone();
    let item = create_item(&server, &payload).await;
    let path = format!("/api/items/{}", item["id"].as_str().unwrap());

    let kept = server.put(&path).json(&json!({ "categoryId": food })).await;
    assert_eq!(kept.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(kept.json::<Value>()["errorCode"], "INVALID_REFERENCE");

    let response = server
        .put(&path)
        .json(&json!({ "categoryId": food, "subcategoryId": null }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let moved: Value = response.json();
    assert_eq!(moved["categoryId"], food.as_str());
    assert!(moved["subcategoryId"].is_null());
}

#[tokio::test]
async fn test_update_subcategory_with_items_cannot_change_category() {
    let server = create_test_app();
    let beverages = create_category(&server, "Beverages", 5.0).await;
    let food = create_category(&server, "Food", 12.0).await;
    let hot = create_subcategory(&server, "Hot Drinks", &beverages).await;

    let mut payload = item_payload("Coffee", &beverages, 50.0, 5.0);
    payload["subcategoryId"] = hot["id"].clone();
    create_item(&server, &payload).await;

    let response = server
        .put(&format!("/api/subcategories/{}", hot["id"].as_str().unwrap()))
        .json(&json!({ "categoryId": food }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["errorCode"], "INVALID_REFERENCE");

    let stored: Value = server
        .get(&format!("/api/subcategories/{}", hot["id"].as_str().unwrap()))
        .await
        .json();
    assert_eq!(stored["categoryId"], beverages.as_str());
}

#[tokio::test]
async fn test_item_listing_routes() {
    let server = create_test_app();
    let beverages = create_category(&server, "Beverages", 5.0).await;
    let food = create_category(&server, "Food", 12.0).await;
    let hot = create_subcategory(&server, "Hot Drinks", &beverages).await;

    let mut coffee = item_payload("Coffee", &beverages, 50.0, 5.0);
    coffee["subcategoryId"] = hot["id"].clone();
    create_item(&server, &coffee).await;
    create_item(&server, &item_payload("Iced Coffee", &beverages, 70.0, 0.0)).await;
    create_item(&server, &item_payload("Pizza", &food, 200.0, 25.0)).await;

    let by_category: Value = server
        .get(&format!("/api/items/category/{}", beverages))
        .await
        .json();
    assert_eq!(names(&by_category), vec!["Coffee", "Iced Coffee"]);

    let by_subcategory: Value = server
        .get(&format!(
            "/api/items/subcategory/{}",
            hot["id"].as_str().unwrap()
        ))
        .await
        .json();
    assert_eq!(names(&by_subcategory), vec!["Coffee"]);

    let searched: Value = server.get("/api/items/search/COFFEE").await.json();
    assert_eq!(names(&searched), vec!["Coffee", "Iced Coffee"]);

    let blank: Value = server.get("/api/items/search/%20").await.json();
    assert_eq!(names(&blank), vec!["Iced Coffee"]);

    let by_name: Value = server.get("/api/items/Pizza").await.json();
    assert_eq!(by_name["totalAmount"].as_f64(), Some(175.0));
}

#[tokio::test]
async fn test_list_items_with_query() {
    let server = create_test_app();
    let category_id = create_category(&server, "Food", 12.0).await;
    create_item(&server, &item_payload("Burger", &category_id, 150.0, 20.0)).await;
    create_item(&server, &item_payload("Pizza", &category_id, 200.0, 25.0)).await;
    create_item(&server, &item_payload("Fries", &category_id, 60.0, 0.0)).await;

    let response = server
        .get("/api/items")
        .add_query_param("minTotal", 100)
        .add_query_param("sort", "totalAmount")
        .add_query_param("order", "desc")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(names(&response.json::<Value>()), vec!["Pizza", "Burger"]);
}

#[tokio::test]
async fn test_list_items_invalid_sort() {
    let server = create_test_app();

    let response = server
        .get("/api/items")
        .add_query_param("sort", "popularity")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["errorCode"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_items_malformed_category_filter() {
    let server = create_test_app();

    let response = server
        .get("/api/items")
        .add_query_param("categoryId", "not-a-uuid")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
