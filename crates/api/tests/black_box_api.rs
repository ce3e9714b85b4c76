use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use invoicedash_api::app::{build_app, services::AppServices};
use invoicedash_core::{CustomerId, InvoiceId, UuidIdGenerator};
use invoicedash_infra::{InvoiceWriter, RecordStore, RevenueStore, StoreError};
use invoicedash_invoicing::{CustomerRecord, InvoiceChanges, InvoiceRecord, RevenueRecord};

const MAREN_ID: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod over the seeded in-memory store, on an ephemeral port.
        Self::spawn_with(AppServices::in_memory().expect("seed data")).await
    }

    async fn spawn_with(services: AppServices) -> Self {
        let app = build_app(services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn get_json(&self, client: &reqwest::Client, path: &str) -> serde_json::Value {
        let res = client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "GET {path}");
        res.json().await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn invoices_are_paginated_six_per_page() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let first = srv.get_json(&client, "/invoices").await;
    assert_eq!(first["page"], 1);
    assert_eq!(first["total_pages"], 3);
    assert_eq!(first["items"].as_array().unwrap().len(), 6);

    let last = srv.get_json(&client, "/invoices?page=3").await;
    assert_eq!(last["items"].as_array().unwrap().len(), 1);

    let past_end = srv.get_json(&client, "/invoices?page=4").await;
    assert!(past_end["items"].as_array().unwrap().is_empty());

    let zero = srv.get_json(&client, "/invoices?page=0").await;
    assert!(zero["items"].as_array().unwrap().is_empty());

    let pages = srv.get_json(&client, "/invoices/pages").await;
    assert_eq!(pages["total_pages"], 3);
}

#[tokio::test]
async fn search_filters_and_enriches_rows() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = srv.get_json(&client, "/invoices?query=MAREN").await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["name"] == "Maren Holt"));
    assert!(items.iter().all(|i| i["email"] == "maren@holt.dev"));
    assert_eq!(body["total_pages"], 1);

    let none = srv.get_json(&client, "/invoices/pages?query=zzz").await;
    assert_eq!(none["total_pages"], 0);
}

#[tokio::test]
async fn invoice_lifecycle_create_update_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Create
    let res = client
        .post(format!("{}/invoices", srv.base_url))
        .json(&json!({ "customer_id": MAREN_ID, "amount": 12.5, "status": "pending" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let form = srv.get_json(&client, &format!("/invoices/{id}")).await;
    assert_eq!(form["amount"], 1250);
    assert_eq!(form["status"], "pending");

    let page3 = srv.get_json(&client, "/invoices?page=3").await;
    assert_eq!(page3["items"].as_array().unwrap().len(), 2);

    // Update
    let res = client
        .put(format!("{}/invoices/{}", srv.base_url, id))
        .json(&json!({ "customer_id": MAREN_ID, "amount": 20, "status": "paid" }))
        .send()
        .await
        .unwrap();
    if res.status() != StatusCode::OK {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        panic!("expected 200 OK from update, got {status} body={body}");
    }
    let form = srv.get_json(&client, &format!("/invoices/{id}")).await;
    assert_eq!(form["amount"], 2000);
    assert_eq!(form["status"], "paid");

    // Delete
    let res = client
        .delete(format!("{}/invoices/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/invoices/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_invoice_forms_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/invoices", srv.base_url))
        .json(&json!({ "customer_id": MAREN_ID, "amount": 5, "status": "overdue" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let res = client
        .post(format!("{}/invoices", srv.base_url))
        .json(&json!({ "customer_id": "nobody", "amount": 5, "status": "paid" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = client
        .delete(format!("{}/invoices/does-not-exist", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_cards_latest_and_revenue() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let cards = srv.get_json(&client, "/dashboard/cards").await;
    assert_eq!(cards["number_of_invoices"], 13);
    assert_eq!(cards["number_of_customers"], 6);
    assert_eq!(cards["total_paid_invoices"], 100626);
    assert_eq!(cards["total_pending_invoices"], 125632);

    let latest = srv.get_json(&client, "/dashboard/latest-invoices").await;
    let items = latest["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["id"], "inv-0004");

    let revenue = srv.get_json(&client, "/dashboard/revenue").await;
    assert_eq!(revenue["items"].as_array().unwrap().len(), 12);
    assert_eq!(revenue["items"][0]["month"], "Jan");
}

#[tokio::test]
async fn customers_endpoints() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let list = srv.get_json(&client, "/customers").await;
    let names: Vec<_> = list["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    let table = srv.get_json(&client, "/customers/table?query=holt").await;
    let rows = table["items"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["total_invoices"], 2);
    assert_eq!(rows[0]["total_pending"], 15795 + 666);
}

#[tokio::test]
async fn malformed_query_and_body_get_json_errors() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/invoices?page=abc", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_query");
    assert!(body["message"].is_string());

    let res = client
        .post(format!("{}/invoices", srv.base_url))
        .json(&json!({ "customer_id": MAREN_ID, "amount": "ten", "status": "paid" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_body");

    let res = client
        .put(format!("{}/invoices/inv-0001", srv.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_body");
}

/// Backend whose invoice/revenue reads and writes fail; customers resolve so
/// commands get past validation.
struct BrokenBackend {
    read: fn() -> StoreError,
    write: fn() -> StoreError,
}

#[async_trait::async_trait]
impl RecordStore for BrokenBackend {
    async fn list_invoices(&self) -> Result<Vec<InvoiceRecord>, StoreError> {
        Err((self.read)())
    }

    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, StoreError> {
        Ok(vec![CustomerRecord {
            id: CustomerId::parse(MAREN_ID).unwrap(),
            name: "Maren Holt".to_string(),
            email: "maren@holt.dev".to_string(),
            image_url: String::new(),
        }])
    }
}

#[async_trait::async_trait]
impl RevenueStore for BrokenBackend {
    async fn list_revenue(&self) -> Result<Vec<RevenueRecord>, StoreError> {
        Err((self.read)())
    }
}

#[async_trait::async_trait]
impl InvoiceWriter for BrokenBackend {
    async fn insert_invoice(&self, _invoice: InvoiceRecord) -> Result<(), StoreError> {
        Err((self.write)())
    }

    async fn update_invoice(&self, _id: &InvoiceId, _changes: &InvoiceChanges) -> Result<bool, StoreError> {
        Err((self.write)())
    }

    async fn delete_invoice(&self, _id: &InvoiceId) -> Result<bool, StoreError> {
        Err((self.write)())
    }
}

async fn spawn_broken(read: fn() -> StoreError, write: fn() -> StoreError) -> TestServer {
    let backend = Arc::new(BrokenBackend { read, write });
    TestServer::spawn_with(AppServices::new(backend, Arc::new(UuidIdGenerator))).await
}

async fn error_of(res: reqwest::Response) -> (StatusCode, String) {
    let status = res.status();
    let body: serde_json::Value = res.json().await.unwrap();
    (status, body["error"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn unavailable_store_maps_to_503() {
    let srv = spawn_broken(
        || StoreError::Unavailable("connection refused".into()),
        || StoreError::Unavailable("connection refused".into()),
    )
    .await;
    let client = reqwest::Client::new();

    for path in ["/invoices", "/invoices/pages", "/dashboard/cards", "/dashboard/revenue"] {
        let res = client.get(format!("{}{}", srv.base_url, path)).send().await.unwrap();
        assert_eq!(
            error_of(res).await,
            (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable".to_string()),
            "GET {path}"
        );
    }

    let res = client
        .post(format!("{}/invoices", srv.base_url))
        .json(&json!({ "customer_id": MAREN_ID, "amount": 1, "status": "paid" }))
        .send()
        .await
        .unwrap();
    assert_eq!(
        error_of(res).await,
        (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable".to_string())
    );
}

#[tokio::test]
async fn malformed_records_map_to_500() {
    let srv = spawn_broken(
        || StoreError::Malformed("invoice \"x\": negative amount".into()),
        || StoreError::Malformed("bad row".into()),
    )
    .await;
    let client = reqwest::Client::new();

    for path in ["/invoices", "/customers/table", "/dashboard/latest-invoices"] {
        let res = client.get(format!("{}{}", srv.base_url, path)).send().await.unwrap();
        let status = res.status();
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "GET {path}");
        assert_eq!(body["error"], "query_failed");
        // row details stay in the logs
        assert_eq!(body["message"], "failed to read records");
    }
}

#[tokio::test]
async fn conflicting_write_maps_to_409() {
    let srv = spawn_broken(
        || StoreError::Unavailable("unused".into()),
        || StoreError::Conflict("invoice already exists".into()),
    )
    .await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/invoices", srv.base_url))
        .json(&json!({ "customer_id": MAREN_ID, "amount": 1, "status": "paid" }))
        .send()
        .await
        .unwrap();
    assert_eq!(error_of(res).await, (StatusCode::CONFLICT, "conflict".to_string()));
}
