//! Remote service calls against a mock server

use celerik_services::{ApiMessageType, ApiServiceHttp, ApiStatusCode, ServiceError};
use httpmock::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Product {
    id: u32,
    name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductFilter {
    name: Option<String>,
    page_number: i32,
    in_stock: bool,
}

fn products(server: &MockServer) -> ApiServiceHttp {
    ApiServiceHttp::new(&server.base_url(), "products").unwrap()
}

#[tokio::test]
async fn test_ok_decodes_envelope() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::GET).path("/products/1");
        then.status(200).json_body(json!({
            "data": { "id": 1, "name": "Lamp" },
            "success": true,
            "message": "The operation completed successfully",
            "messageType": 2,
            "statusCode": 200
        }));
    });

    let response = products(&server)
        .get::<Product, ()>("1", None)
        .await
        .unwrap();

    mock.assert();
    assert!(response.success);
    assert_eq!(response.message_type, Some(ApiMessageType::Success));
    assert_eq!(
        response.data,
        Some(Product {
            id: 1,
            name: "Lamp".to_string()
        })
    );
}

#[tokio::test]
async fn test_get_sends_payload_as_query() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::GET)
            .path("/products/search")
            .query_param("pageNumber", "2")
            .query_param("inStock", "true");
        then.status(200).json_body(json!({ "data": [], "success": true }));
    });

    let filter = ProductFilter {
        name: None,
        page_number: 2,
        in_stock: true,
    };
    let response = products(&server)
        .get::<Vec<Product>, _>("search", Some(&filter))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.data, Some(Vec::new()));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::POST)
            .path("/products/create")
            .header("content-type", "application/json")
            .json_body(json!({ "id": 0, "name": "Desk" }));
        then.status(200).json_body(json!({
            "data": { "id": 8, "name": "Desk" },
            "success": true,
            "statusCode": "Ok"
        }));
    });

    let draft = Product {
        id: 0,
        name: "Desk".to_string(),
    };
    let response = products(&server)
        .post::<Product, _>("create", Some(&draft))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.data.map(|product| product.id), Some(8));
    assert_eq!(response.status_code, ApiStatusCode::Ok);
}

#[tokio::test]
async fn test_bad_request_carries_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::DELETE).path("/products/9");
        then.status(400).body("Product 9 is referenced by an order");
    });

    let response = products(&server)
        .delete::<Product, ()>("9", None)
        .await
        .unwrap();

    assert!(!response.success);
    assert!(response.data.is_none());
    assert_eq!(response.message_type, Some(ApiMessageType::Error));
    assert_eq!(response.status_code, ApiStatusCode::BadRequest);
    assert_eq!(response.message.as_deref(), Some("Product 9 is referenced by an order"));
}

#[tokio::test]
async fn test_bad_request_validation_problem_is_narrowed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::PUT).path("/products/update");
        then.status(400).json_body(json!({
            "type": "https://tools.ietf.org/html/rfc7231#section-6.5.1",
            "title": "One or more validation errors occurred.",
            "status": 400,
            "traceId": "|4f2a-1.",
            "errors": { "Name": ["The Name field is required."] }
        }));
    });

    let draft = Product {
        id: 3,
        name: String::new(),
    };
    let response = products(&server)
        .put::<Product, _>("update", Some(&draft))
        .await
        .unwrap();

    assert_eq!(response.message.as_deref(), Some("The Name field is required"));
}

#[tokio::test]
async fn test_other_status_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).path("/products/broken");
        then.status(500).body("boom");
    });

    let err = products(&server)
        .get::<Product, ()>("broken", None)
        .await
        .unwrap_err();

    assert!(err.is_http());
    assert_eq!(err.status(), Some(500));
    match err {
        ServiceError::Http { url, body, .. } => {
            assert!(url.ends_with("/products/broken"));
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_ok_body_is_a_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).path("/products/odd");
        then.status(200).body("not json");
    });

    let err = products(&server)
        .get::<Product, ()>("odd", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Decode(_)));
}
