//! End-to-end router tests against a stubbed service layer.
//!
//! These exercise the full middleware stack: API key gating, validation
//! rejections, response envelopes, and the timing header.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use tally_config::AppConfig;
use tally_core::{CategoryCode, TallyError, TallyResult, TransactionId};
use tally_rest::middleware::{API_KEY_HEADER, RESPONSE_TIME_HEADER};
use tally_rest::{create_router, AppState};
use tally_service::{
    AddTransactionRequest, OverviewResponse, RangeQuery, TransactionEntry, TransactionService,
    TypeSummary, UpdateTransactionRequest,
};

const API_KEY: &str = "test-api-key";

struct StubService {
    fail_reads: bool,
    add_calls: AtomicUsize,
    list_calls: AtomicUsize,
    overview_calls: AtomicUsize,
    last_update: Mutex<Option<UpdateTransactionRequest>>,
}

impl StubService {
    fn healthy() -> Arc<Self> {
        Self::with_failures(false)
    }

    fn with_failures(fail_reads: bool) -> Arc<Self> {
        Arc::new(Self {
            fail_reads,
            add_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            overview_calls: AtomicUsize::new(0),
            last_update: Mutex::new(None),
        })
    }
}

fn sample_entry() -> TransactionEntry {
    TransactionEntry {
        id: TransactionId(1),
        title: "coffee".to_string(),
        amount: Decimal::new(1250, 2),
        category: CategoryCode(1),
        date: "2024-01-10 18:00:00".to_string(),
    }
}

fn sample_overview() -> OverviewResponse {
    OverviewResponse {
        start_at: "2024-01-01 00:00:00".to_string(),
        end_at: "2024-01-31 23:59:59".to_string(),
        data: vec![TypeSummary {
            category: CategoryCode(1),
            sum: Decimal::new(1250, 2),
            count: 2,
        }],
    }
}

#[async_trait]
impl TransactionService for StubService {
    async fn add_transaction(&self, _request: AddTransactionRequest) -> TallyResult<TransactionId> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        Ok(TransactionId(7))
    }

    async fn update_transaction(&self, request: UpdateTransactionRequest) -> TallyResult<()> {
        *self.last_update.lock().unwrap() = Some(request);
        Ok(())
    }

    async fn list_transactions(&self, _query: RangeQuery) -> TallyResult<Vec<TransactionEntry>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(TallyError::Database("storage offline".to_string()));
        }
        Ok(vec![sample_entry()])
    }

    async fn overview(&self, _query: RangeQuery) -> TallyResult<OverviewResponse> {
        self.overview_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(TallyError::Database("storage offline".to_string()));
        }
        Ok(sample_overview())
    }
}

fn router_with(stub: Arc<StubService>) -> Router {
    let mut config = AppConfig::default();
    config.security.api_key = API_KEY.to_string();
    create_router(AppState::new(stub), &config)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn authed_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(API_KEY_HEADER, API_KEY)
        .body(Body::empty())
        .unwrap()
}

fn authed_post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(API_KEY_HEADER, API_KEY)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

#[tokio::test]
async fn test_root_greeting_is_open() {
    let response = router_with(StubService::healthy())
        .oneshot(get("/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "Tally API v1");
}

#[tokio::test]
async fn test_health_is_open() {
    let response = router_with(StubService::healthy())
        .oneshot(get("/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_transaction_routes_require_api_key() {
    let stub = StubService::healthy();
    let router = router_with(stub.clone());

    let response = router
        .oneshot(get("/transaction/list?start_at=2024-01-01&end_at=2024-01-31"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_string(response).await, r#"{"error":"Unauthorized"}"#);
    assert_eq!(stub.list_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_wrong_api_key_is_rejected() {
    let stub = StubService::healthy();
    let request = Request::builder()
        .uri("/transaction/list?start_at=2024-01-01&end_at=2024-01-31")
        .header(API_KEY_HEADER, "not-the-key")
        .body(Body::empty())
        .unwrap();

    let response = router_with(stub.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_string(response).await, r#"{"error":"Unauthorized"}"#);
    assert_eq!(stub.list_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_every_response_carries_timing_header() {
    let router = router_with(StubService::healthy());

    // Open route, authenticated route, and an auth rejection.
    let requests = [
        get("/"),
        authed_get("/transaction/list?start_at=2024-01-01&end_at=2024-01-31"),
        get("/transaction/list?start_at=2024-01-01&end_at=2024-01-31"),
    ];

    for request in requests {
        let response = router.clone().oneshot(request).await.unwrap();
        let timing = response
            .headers()
            .get(RESPONSE_TIME_HEADER)
            .expect("missing timing header")
            .to_str()
            .unwrap()
            .to_string();
        assert!(timing.ends_with("ms"), "unexpected timing value {timing}");
    }
}

#[tokio::test]
async fn test_add_transaction_acknowledges() {
    let stub = StubService::healthy();
    let body = json!({
        "amount": "12.50",
        "title": "coffee",
        "type": 1,
        "kind": 2,
        "currency": 0
    });

    let response = router_with(stub.clone())
        .oneshot(authed_post("/transaction/add", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, r#"{"ok":true}"#);
    assert_eq!(stub.add_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_add_rejects_malformed_json() {
    let stub = StubService::healthy();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/transaction/add")
        .header(header::CONTENT_TYPE, "application/json")
        .header(API_KEY_HEADER, API_KEY)
        .body(Body::from("{not json"))
        .unwrap();

    let response = router_with(stub.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid JSON"));
    assert_eq!(stub.add_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_add_rejects_oversized_title() {
    let stub = StubService::healthy();
    let body = json!({
        "amount": "12.50",
        "title": "x".repeat(33),
        "type": 1,
        "kind": 2,
        "currency": 0
    });

    let response = router_with(stub.clone())
        .oneshot(authed_post("/transaction/add", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Title must be 1-32 characters"));
    assert_eq!(stub.add_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_add_rejects_negative_type_code() {
    let body = json!({
        "amount": "12.50",
        "title": "coffee",
        "type": -1,
        "kind": 2,
        "currency": 0
    });

    let response = router_with(StubService::healthy())
        .oneshot(authed_post("/transaction/add", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid JSON"));
}

#[tokio::test]
async fn test_update_amount_passes_through() {
    let stub = StubService::healthy();
    let body = json!({"id": 1, "amount": "15.00"});

    let response = router_with(stub.clone())
        .oneshot(authed_post("/transaction/update", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, r#"{"ok":true}"#);

    let captured = stub.last_update.lock().unwrap().clone().unwrap();
    assert_eq!(captured.id, 1);
    assert_eq!(captured.amount, Some(Decimal::new(1500, 2)));
    assert!(!captured.is_delete);
}

#[tokio::test]
async fn test_update_delete_branch_passes_through() {
    let stub = StubService::healthy();
    let body = json!({"id": 3, "is_delete": true});

    let response = router_with(stub.clone())
        .oneshot(authed_post("/transaction/update", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, r#"{"ok":true}"#);

    let captured = stub.last_update.lock().unwrap().clone().unwrap();
    assert_eq!(captured.id, 3);
    assert!(captured.is_delete);
    assert!(captured.amount.is_none());
}

#[tokio::test]
async fn test_update_rejects_negative_id() {
    let body = json!({"id": -1, "amount": "15.00"});

    let response = router_with(StubService::healthy())
        .oneshot(authed_post("/transaction/update", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("ID must not be negative"));
}

#[tokio::test]
async fn test_list_envelope_shape() {
    let response = router_with(StubService::healthy())
        .oneshot(authed_get(
            "/transaction/list?start_at=2024-01-01&end_at=2024-01-31",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        r#"{"ok":true,"data":[{"id":1,"title":"coffee","amount":"12.50","type":1,"date":"2024-01-10 18:00:00"}]}"#
    );
}

#[tokio::test]
async fn test_list_rejects_loose_dates() {
    let stub = StubService::healthy();
    let response = router_with(stub.clone())
        .oneshot(authed_get(
            "/transaction/list?start_at=2024-1-1&end_at=2024-01-31",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("start_at"));
    assert_eq!(stub.list_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_list_rejects_missing_query() {
    let response = router_with(StubService::healthy())
        .oneshot(authed_get("/transaction/list"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid query"));
}

#[tokio::test]
async fn test_overview_envelope_shape() {
    let response = router_with(StubService::healthy())
        .oneshot(authed_get(
            "/transaction/overview?start_at=2024-01-01&end_at=2024-01-31",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        r#"{"ok":true,"start_at":"2024-01-01 00:00:00","end_at":"2024-01-31 23:59:59","data":[{"type":1,"sum":"12.50","count":2}]}"#
    );
}

#[tokio::test]
async fn test_service_failure_maps_to_400() {
    let response = router_with(StubService::with_failures(true))
        .oneshot(authed_get(
            "/transaction/list?start_at=2024-01-01&end_at=2024-01-31",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        r#"{"error":"Database error: storage offline"}"#
    );
}

#[tokio::test]
async fn test_unknown_route_is_404_with_timing() {
    let response = router_with(StubService::healthy())
        .oneshot(authed_get("/transaction/nope"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key(RESPONSE_TIME_HEADER));
}
