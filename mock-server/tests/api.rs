use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, ADMIN_PASSWORD, ADMIN_USERNAME, SYSTEM_NAME};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<String> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .unwrap(),
        None => builder.body(String::new()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<String>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    (status, body_json(resp).await)
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    body["data"]["token"].as_str().unwrap().to_string()
}

// --- auth ---

#[tokio::test]
async fn wrong_password_is_an_application_error() {
    let app = app();
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({"username": ADMIN_USERNAME, "password": "nope"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 400);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn protected_route_without_token_returns_401() {
    let app = app();
    let (status, body) = send(&app, request("GET", "/api/v1/users/list", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);
}

#[tokio::test]
async fn unknown_token_returns_401() {
    let app = app();
    let (status, _) = send(&app, request("GET", "/api/v1/users/list", Some("forged"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let app = app();
    let token = login(&app).await;
    let (status, _) = send(&app, request("POST", "/api/v1/auth/logout", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, request("GET", "/api/v1/users/list", Some(&token), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn public_routes_need_no_token() {
    let app = app();
    let (status, body) = send(&app, request("GET", "/api/v1/public/system/name", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["system_name"], SYSTEM_NAME);

    let (_, body) = send(&app, request("GET", "/api/v1/public/system/basic-info", None, None)).await;
    assert_eq!(body["data"]["system_logo"], "");
}

// --- balance ---

#[tokio::test]
async fn recharge_then_deduct_updates_logs() {
    let app = app();
    let token = login(&app).await;

    let (_, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/balance/recharge",
            Some(&token),
            Some(json!({"user_id": 1, "amount": 100.0, "remark": "test"})),
        ),
    )
    .await;
    assert_eq!(body["code"], 200);
    assert!(body["data"]["id"].is_i64());

    let (_, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/balance/deduct",
            Some(&token),
            Some(json!({"user_id": 1, "amount": 30.0, "style": 3, "remark": ""})),
        ),
    )
    .await;
    assert_eq!(body["code"], 200);

    let (_, body) = send(
        &app,
        request("GET", "/api/v1/balance/logs?user_id=1&page=1&page_size=10", Some(&token), None),
    )
    .await;
    assert_eq!(body["data"]["total"], 2);
    let logs = body["data"]["list"].as_array().unwrap();
    assert_eq!(logs[0]["type"], 1);
    assert_eq!(logs[1]["type"], 2);
    assert_eq!(logs[1]["balance"], 70.0);
}

#[tokio::test]
async fn deduct_more_than_balance_fails() {
    let app = app();
    let token = login(&app).await;
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/balance/deduct",
            Some(&token),
            Some(json!({"user_id": 2, "amount": 500.0, "style": 3})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 400);
    assert_eq!(body["message"], "余额不足");
}

#[tokio::test]
async fn recharge_unknown_user_fails() {
    let app = app();
    let token = login(&app).await;
    let (_, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/balance/recharge",
            Some(&token),
            Some(json!({"user_id": 99, "amount": 1.0})),
        ),
    )
    .await;
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn out_of_range_page_returns_empty_list() {
    let app = app();
    let token = login(&app).await;
    let (status, body) = send(
        &app,
        request(
            "GET",
            "/api/v1/balance/logs?page=18446744073709551615&page_size=10",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert!(body["data"]["list"].as_array().unwrap().is_empty());
}

// --- users & credit ---

#[tokio::test]
async fn users_list_uses_records_shape() {
    let app = app();
    let token = login(&app).await;
    let (_, body) = send(&app, request("GET", "/api/v1/users/list?current=1&size=1", Some(&token), None)).await;
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["size"], 1);
    assert_eq!(body["data"]["records"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn credit_limit_is_camel_case() {
    let app = app();
    let token = login(&app).await;
    let (_, body) = send(
        &app,
        request("POST", "/api/v1/credit/set", Some(&token), Some(json!({"user_id": 1, "creditLimit": 500.0}))),
    )
    .await;
    assert_eq!(body["code"], 200);

    let (_, body) = send(&app, request("GET", "/api/v1/users/list", Some(&token), None)).await;
    assert_eq!(body["data"]["records"][0]["credit_limit"], 500.0);
}

// --- system config ---

#[tokio::test]
async fn system_config_lifecycle() {
    let app = app();
    let token = login(&app).await;

    let (_, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/system-config",
            Some(&token),
            Some(json!({"config_key": "site_notice", "config_value": "hello", "config_type": "string"})),
        ),
    )
    .await;
    assert_eq!(body["code"], 200);

    let (_, body) = send(&app, request("GET", "/api/v1/system-config/key/site_notice", Some(&token), None)).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["config_value"], "hello");

    let (_, body) = send(
        &app,
        request(
            "PUT",
            &format!("/api/v1/system-config/{id}"),
            Some(&token),
            Some(json!({"config_value": "bye"})),
        ),
    )
    .await;
    assert_eq!(body["code"], 200);

    let (_, body) = send(
        &app,
        request("PUT", "/api/v1/system-config/batch", Some(&token), Some(json!({"site_notice": "batched"}))),
    )
    .await;
    assert_eq!(body["code"], 200);

    let (_, body) = send(&app, request("GET", &format!("/api/v1/system-config/{id}"), Some(&token), None)).await;
    assert_eq!(body["data"]["config_value"], "batched");

    let (_, body) = send(&app, request("DELETE", &format!("/api/v1/system-config/{id}"), Some(&token), None)).await;
    assert_eq!(body["code"], 200);

    let (_, body) = send(&app, request("GET", &format!("/api/v1/system-config/{id}"), Some(&token), None)).await;
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn duplicate_config_key_is_rejected() {
    let app = app();
    let token = login(&app).await;
    let (_, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/system-config",
            Some(&token),
            Some(json!({"config_key": "system_name", "config_value": "x"})),
        ),
    )
    .await;
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn system_name_update_is_visible_publicly() {
    let app = app();
    let token = login(&app).await;
    let (_, body) = send(
        &app,
        request(
            "PUT",
            "/api/v1/system-config/system-name",
            Some(&token),
            Some(json!({"system_name": "新名称"})),
        ),
    )
    .await;
    assert_eq!(body["code"], 200);

    let (_, body) = send(&app, request("GET", "/api/v1/public/system/name", None, None)).await;
    assert_eq!(body["data"]["system_name"], "新名称");
}

// --- product interfaces ---

#[tokio::test]
async fn product_interfaces_for_unknown_product_fail() {
    let app = app();
    let token = login(&app).await;
    let (_, body) = send(&app, request("GET", "/api/v1/product-api-relations?product_id=42", Some(&token), None)).await;
    assert_eq!(body["code"], 500);
}

#[tokio::test]
async fn assign_replaces_product_interfaces() {
    let app = app();
    let token = login(&app).await;
    let (_, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/product-api-relations",
            Some(&token),
            Some(json!({"product_id": 1, "interface_ids": [2, 3]})),
        ),
    )
    .await;
    assert_eq!(body["code"], 200);

    let (_, body) = send(&app, request("GET", "/api/v1/product-api-relations?product_id=1", Some(&token), None)).await;
    let names: Vec<&str> = body["data"]["list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["kekebang", "dayuanren"]);
}

// --- statistics & api keys ---

#[tokio::test]
async fn operator_statistics_lists_each_isp() {
    let app = app();
    let token = login(&app).await;
    let (_, body) = send(&app, request("GET", "/api/v1/statistics/order/operator", Some(&token), None)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"][0]["totalOrders"], 120);
}

#[tokio::test]
async fn api_key_lifecycle() {
    let app = app();
    let token = login(&app).await;

    let (_, body) = send(&app, request("GET", "/api/v1/external-api-keys/my", Some(&token), None)).await;
    assert!(body["data"].is_null());

    let (_, body) = send(
        &app,
        request("POST", "/api/v1/external-api-keys", Some(&token), Some(json!({"app_name": "shop"}))),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();
    let app_id = body["data"]["app_id"].as_str().unwrap().to_string();
    let first_key = body["data"]["app_key"].as_str().unwrap().to_string();

    let (_, body) = send(
        &app,
        request("POST", &format!("/api/v1/external-api-keys/{id}/regenerate"), Some(&token), None),
    )
    .await;
    assert_eq!(body["data"]["app_id"], app_id.as_str());
    assert_ne!(body["data"]["app_key"], first_key.as_str());

    let (_, body) = send(
        &app,
        request(
            "PUT",
            &format!("/api/v1/external-api-keys/{id}/status"),
            Some(&token),
            Some(json!({"status": 0})),
        ),
    )
    .await;
    assert_eq!(body["data"]["status"], 0);

    let (_, body) = send(
        &app,
        request("POST", "/api/v1/external-api-keys", Some(&token), Some(json!({}))),
    )
    .await;
    assert_eq!(body["code"], 400);
}
