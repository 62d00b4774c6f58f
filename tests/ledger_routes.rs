//! Rotas do livro de estoque, exercitadas em processo via `tower::ServiceExt::oneshot`.
//!
//! O pool é criado com `connect_lazy`: as rejeições de validação nunca chegam ao banco,
//! então estes testes rodam sem Postgres. Os que gravam de verdade ficam `#[ignore]`
//! e usam `DATABASE_URL`.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt; // oneshot

use stock_ledger::{
    build_router,
    config::{AppState, DatabaseConfig},
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn lazy_state() -> AppState {
    AppState::lazy(&DatabaseConfig::default())
}

fn valid_entry() -> Value {
    json!({
        "product_id": "apple001",
        "quantity": 3,
        "drcr": 1,
        "company_id": "CMPN001",
        "warehouse_id": "WRHS001",
        "bill_id": "IN202405010001",
        "create_time": "2024-05-01 10:00:00",
        "description": "entrada de teste"
    })
}

fn with(mut body: Value, field: &str, value: Value) -> Value {
    body[field] = value;
    body
}

async fn send(state: AppState, req: Request<Body>) -> (StatusCode, bytes::Bytes) {
    let resp = build_router(state).oneshot(req).await.expect("oneshot failed");
    let status = resp.status();
    let body = resp
        .into_body()
        .collect()
        .await
        .expect("body collect failed")
        .to_bytes();
    (status, body)
}

async fn post_entry(state: AppState, body: &Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(state, req).await;
    let json = serde_json::from_slice(&bytes).expect("body is not valid JSON");
    (status, json)
}

async fn get(state: AppState, uri: &str) -> (StatusCode, bytes::Bytes) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(state, req).await
}

fn error_of(json: &Value) -> &str {
    json["error"].as_str().expect("missing error message")
}

// ---------------------------------------------------------------------------
// GET
// ---------------------------------------------------------------------------

#[tokio::test]
async fn index_renders_form_with_catalogs() {
    let (status, body) = get(lazy_state(), "/").await;
    assert_eq!(status, StatusCode::OK);

    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains(r#""apple":"apple001""#));
    assert!(page.contains(r#""沃尔玛":"CMPN001""#));
    assert!(page.contains(r#""顺丰控股股份有限公司":"WRHS002""#));
    assert!(page.contains(r#""CONTRACT":"0""#));
    assert!(!page.contains("{now}"));
}

#[tokio::test]
async fn catalogs_endpoint_returns_every_map() {
    let (status, body) = get(lazy_state(), "/api/catalogs").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["products"]["banana"], "banana001");
    assert_eq!(json["products"]["strawberry"], "strawberry001");
    assert_eq!(json["companies"]["亚马逊"], "CMPN002");
    assert_eq!(json["warehouses"]["北京京邦达贸易有限公司"], "WRHS001");
    assert_eq!(json["drcr"]["OUT"], "-1");
}

#[tokio::test]
async fn health_check_answers_ok() {
    let (status, body) = get(lazy_state(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"OK");
}

// ---------------------------------------------------------------------------
// POST: validação
// ---------------------------------------------------------------------------

#[tokio::test]
async fn quantity_out_of_range_is_rejected() {
    for q in [0, 11, -1, 1000] {
        let (status, json) = post_entry(lazy_state(), &with(valid_entry(), "quantity", json!(q))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "quantity {q}");
        assert!(error_of(&json).contains("quantidade"), "quantity {q}: {json}");
    }
}

#[tokio::test]
async fn quantity_error_wins_even_with_bad_bill_id() {
    let body = with(with(valid_entry(), "quantity", json!(42)), "bill_id", json!("nope"));
    let (status, json) = post_entry(lazy_state(), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_of(&json).contains("quantidade"));
}

#[tokio::test]
async fn quantity_error_wins_when_bill_id_is_missing() {
    let mut body = with(valid_entry(), "quantity", json!(42));
    body.as_object_mut().unwrap().remove("bill_id");
    let (status, json) = post_entry(lazy_state(), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_of(&json).contains("quantidade"), "{json}");
}

#[tokio::test]
async fn quantity_error_wins_when_product_is_null() {
    let body = with(with(valid_entry(), "quantity", json!(0)), "product_id", Value::Null);
    let (status, json) = post_entry(lazy_state(), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_of(&json).contains("quantidade"), "{json}");
}

#[tokio::test]
async fn quantity_error_wins_over_numeric_bill_id() {
    let body = with(with(valid_entry(), "quantity", json!(42)), "bill_id", json!(12345));
    let (status, json) = post_entry(lazy_state(), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_of(&json).contains("quantidade"), "{json}");
}

#[tokio::test]
async fn numeric_bill_id_fails_the_format_check() {
    let (status, json) = post_entry(lazy_state(), &with(valid_entry(), "bill_id", json!(12345))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_of(&json).contains("bill_id"), "{json}");
}

#[tokio::test]
async fn integral_float_quantity_passes_validation() {
    // 3.0 vale como 3; sem banco, a falha tem de vir da persistência
    let config = DatabaseConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        ..DatabaseConfig::default()
    };
    let body = with(valid_entry(), "quantity", json!(3.0));
    let (status, json) = post_entry(AppState::lazy(&config), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_of(&json).contains("quantidade"), "{json}");
}

#[tokio::test]
async fn fractional_quantity_is_a_bad_request() {
    let (status, json) = post_entry(lazy_state(), &with(valid_entry(), "quantity", json!(3.5))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_of(&json).is_empty());
}

#[tokio::test]
async fn malformed_bill_id_is_rejected() {
    for bill in ["IN12345", "PO202405010001", "in202405010001", "OUT2024050100"] {
        let (status, json) = post_entry(lazy_state(), &with(valid_entry(), "bill_id", json!(bill))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "bill_id {bill}");
        assert!(error_of(&json).contains("bill_id"), "bill_id {bill}: {json}");
    }
}

#[tokio::test]
async fn unparseable_body_gets_the_json_error_shape() {
    let req = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, bytes) = send(lazy_state(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&bytes).expect("body is not valid JSON");
    assert!(!error_of(&json).is_empty());
}

#[tokio::test]
async fn non_numeric_quantity_is_a_bad_request() {
    let (status, json) = post_entry(lazy_state(), &with(valid_entry(), "quantity", json!("three"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_of(&json).is_empty());
}

#[tokio::test]
async fn missing_field_is_a_bad_request() {
    let mut body = valid_entry();
    body.as_object_mut().unwrap().remove("bill_id");
    let (status, json) = post_entry(lazy_state(), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn product_without_family_never_reaches_sql() {
    let (status, json) = post_entry(lazy_state(), &with(valid_entry(), "product_id", json!("001apple"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_of(&json).contains("t__20240501"), "{json}");
}

// ---------------------------------------------------------------------------
// POST: persistência
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_database_is_reported_as_bad_request() {
    let config = DatabaseConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        ..DatabaseConfig::default()
    };
    let (status, json) = post_entry(AppState::lazy(&config), &valid_entry()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_of(&json).is_empty());
}

async fn live_state() -> AppState {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("failed to connect to DATABASE_URL");
    AppState::with_pool(pool)
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn sequential_entries_share_the_daily_table() {
    let state = live_state().await;
    let body = with(valid_entry(), "create_time", json!("2024-05-01 10:00:00"));

    let (status, first) = post_entry(state.clone(), &body).await;
    assert_eq!(status, StatusCode::OK, "{first}");
    let (status, second) = post_entry(state.clone(), &body).await;
    assert_eq!(status, StatusCode::OK, "{second}");

    let first = first["data"].as_array().unwrap();
    let second = second["data"].as_array().unwrap();
    assert_eq!(second.len(), first.len() + 1);

    let last = second.last().unwrap();
    assert_eq!(last["name"], "apple");
    assert_eq!(last["product_id"], "apple001");
    assert_eq!(last["create_time"], "2024-05-01 10:00:00");

    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = 't_apple_20240501')",
    )
    .fetch_one(&state.db_pool)
    .await
    .unwrap();
    assert!(exists);
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn different_days_use_different_tables() {
    let state = live_state().await;
    let may = with(valid_entry(), "create_time", json!("2024-05-02 08:00:00"));
    let june = with(valid_entry(), "create_time", json!("2024-06-02 08:00:00"));

    let (_, before) = post_entry(state.clone(), &may).await;
    let (status, _) = post_entry(state.clone(), &june).await;
    assert_eq!(status, StatusCode::OK);
    let (_, after) = post_entry(state.clone(), &may).await;

    let before = before["data"].as_array().unwrap().len();
    let after = after["data"].as_array().unwrap().len();
    assert_eq!(after, before + 1);
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn long_text_values_fit_the_columns() {
    let state = live_state().await;
    let body = with(
        with(valid_entry(), "bill_id", json!(format!("IN{}", "2".repeat(98)))),
        "warehouse_id",
        json!("W".repeat(200)),
    );
    let (status, json) = post_entry(state, &body).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    let last = json["data"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["warehouse_id"].as_str().unwrap().len(), 200);
}
