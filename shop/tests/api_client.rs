//! Integration tests for the product API client against a mock HTTP server

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use serde_json::json;
use shopfront::api::{ApiClient, ApiError, DEFAULT_ERROR_MESSAGE, Page};
use shopfront::catalog::ProductId;
use shopfront::users::render_user_table;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn products_body() -> serde_json::Value {
    json!([
        {"id": 1, "nombre": "Teclado", "precio": 120.0, "categoria": "Periféricos", "stock": 3},
        {"id": "b2", "nombre": "Monitor", "precio": 950.5, "categoria": "Pantallas"}
    ])
}

#[tokio::test]
async fn lists_products() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/productos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .mount(&server)
        .await;

    let products = ApiClient::new(server.uri()).all_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Teclado");
    assert_eq!(products[1].id, ProductId::from("b2"));
}

#[tokio::test]
async fn query_values_are_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/productos"))
        .and(query_param("categoria", "Periféricos & Co"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let products = ApiClient::new(server.uri())
        .products_by_category("Periféricos & Co")
        .await
        .unwrap();

    assert!(products.is_empty());
}

#[tokio::test]
async fn searches_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/productos"))
        .and(query_param("nombre_like", "tec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .expect(1)
        .mount(&server)
        .await;

    let results = ApiClient::new(server.uri())
        .search_products("tec")
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn pages_default_to_first_dozen() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/productos"))
        .and(query_param("_page", "1"))
        .and(query_param("_limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    ApiClient::new(server.uri())
        .products_page(Page::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn missing_product_reports_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/productos/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Producto no encontrado"})),
        )
        .mount(&server)
        .await;

    let error = ApiClient::new(server.uri())
        .product(&ProductId::from(99_u64))
        .await
        .unwrap_err();

    assert_eq!(
        error,
        ApiError::Status {
            status: 404,
            message: "Producto no encontrado".into(),
        }
    );
}

#[tokio::test]
async fn error_without_message_uses_generic_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/usuarios"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let error = ApiClient::new(server.uri()).all_users().await.unwrap_err();

    assert_eq!(error.status(), 500);
    assert_eq!(error.user_message(), DEFAULT_ERROR_MESSAGE);
}

#[tokio::test]
async fn invalid_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/productos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let error = ApiClient::new(server.uri()).all_products().await.unwrap_err();

    assert!(matches!(error, ApiError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_connection_error() {
    // Nothing listens on port 1
    let client = ApiClient::new("http://127.0.0.1:1");
    let error = client.all_products().await.unwrap_err();

    assert!(matches!(error, ApiError::Connection(_)));
    assert_eq!(error.status(), 0);
    assert!(!client.check_health().await);
}

#[tokio::test]
async fn health_check_requests_a_single_product() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/productos"))
        .and(query_param("_limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    assert!(ApiClient::new(server.uri()).check_health().await);
}

#[tokio::test]
async fn fetched_users_render_as_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {"city": "Gwenborough"},
            "phone": "1-770-736-8031",
            "company": {"name": "Romaguera-Crona"}
        }])))
        .mount(&server)
        .await;

    let users = ApiClient::default()
        .fetch_users(&format!("{}/users", server.uri()))
        .await
        .unwrap();
    let html = render_user_table(&users).unwrap();

    assert!(html.contains("<td>Bret</td>"));
    assert!(html.contains("<td>Gwenborough</td>"));
}
