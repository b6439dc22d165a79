//! End-to-end session wiring: catalog load, cart persistence across
//! sessions, and startup session restore.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bazaar_core::{CategoryId, ProductId};
use bazaar_storefront::config::StorefrontConfig;
use bazaar_storefront::state::AppState;
use bazaar_storefront::storage::{KeyValueStore, MemoryStore, namespaces};

fn test_config(server: &MockServer) -> StorefrontConfig {
    StorefrontConfig {
        api_base_url: server
            .uri()
            .parse()
            .unwrap_or_else(|_| unreachable!("mock server URI is a valid URL")),
        page_size: 2,
        catalog_fetch_limit: 100,
        state_dir: None,
    }
}

fn product_json(id: i64, title: &str, category_id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "price": 10.0,
        "description": "desc",
        "category": { "id": category_id, "name": "Clothes", "image": "" },
        "images": []
    })
}

async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(1, "Red shirt", 1),
            product_json(2, "Blue shirt", 1),
            product_json(3, "Desk lamp", 2),
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Clothes", "image": "" },
            { "id": 2, "name": "Furniture", "image": "" }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn load_catalog_builds_a_ready_browser() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let state = AppState::with_storage(test_config(&server), Arc::new(MemoryStore::new()));
    let mut browser = state.load_catalog().await.expect("catalog");

    assert_eq!(browser.categories().len(), 2);
    assert_eq!(browser.total_pages(), 2); // 3 products, page size 2

    browser.set_category(Some(CategoryId::new(1)));
    browser.set_search("shirt");
    assert_eq!(browser.filtered().len(), 2);
    assert_eq!(browser.total_pages(), 1);
}

#[tokio::test]
async fn cart_survives_across_sessions_on_shared_storage() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

    {
        let state = AppState::with_storage(test_config(&server), Arc::clone(&storage));
        let browser = state.load_catalog().await.expect("catalog");
        let shirt = browser.product(ProductId::new(1)).expect("product").clone();
        state.cart().add_item(&shirt);
        state.cart().add_item(&shirt);
        state.wishlist().add_item(ProductId::new(3));
    }

    // A second session over the same storage restores both containers.
    let state = AppState::with_storage(test_config(&server), storage);
    let items = state.cart().items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
    assert!(state.wishlist().has_item(ProductId::new(3)));
}

#[tokio::test]
async fn restore_establishes_session_from_stored_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .and(header("Authorization", "Bearer tok-stored"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "email": "maria@example.com",
            "name": "Maria",
            "role": "customer",
            "avatar": ""
        })))
        .mount(&server)
        .await;

    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    storage
        .set(namespaces::AUTH_TOKEN, "tok-stored")
        .expect("seed token");

    let state = AppState::with_storage(test_config(&server), storage);
    assert!(!state.auth().is_authenticated());

    state.restore().await;

    assert!(state.auth().is_authenticated());
    assert_eq!(state.auth().user().expect("user").name, "Maria");
}
