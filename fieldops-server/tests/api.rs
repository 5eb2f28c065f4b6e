//! HTTP API tests through the full middleware stack (no network)

use axum::Router;
use axum::body::Body;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use fieldops_server::{Config, ServerState, api, db};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    app: Router,
    state: ServerState,
    _dir: tempfile::TempDir,
}

async fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    let state = ServerState::from_pool(config, db::test_pool().await).unwrap();
    let app = api::build_app(&state).with_state(state.clone());
    TestApp {
        app,
        state,
        _dir: dir,
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(v) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let (status, bytes) = self.send(request).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Monday strictly after today
    fn next_monday(&self) -> NaiveDate {
        let today = self.state.today();
        let days = 7 - today.weekday().num_days_from_monday() as i64;
        today + Duration::days(days)
    }

    async fn create_store(&self, name: &str, category: &str, chain: &str) -> i64 {
        let (status, body) = self
            .call(
                "POST",
                "/api/stores",
                Some(json!({ "name": name, "category": category, "chain": chain, "city": "Milano" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let (status, body) = app.call("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["email_enabled"], false);

    let (status, body) = app.call("GET", "/health/detailed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = test_app().await;
    let response = app
        .app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_store_crud() {
    let app = test_app().await;
    let id = app.create_store("MediaWorld Roma Est", "white", "mediaworld").await;

    let (status, body) = app.call("GET", &format!("/api/stores/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chain"], "mediaworld");

    let (status, body) = app
        .call(
            "PUT",
            &format!("/api/stores/{id}"),
            Some(json!({ "category": "tier2" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "tier2");

    let (_, body) = app.call("GET", "/api/stores?category=tier2", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    let (_, body) = app.call("GET", "/api/stores?category=white", None).await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = app.call("DELETE", &format!("/api/stores/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.call("GET", &format!("/api/stores/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1001);
}

#[tokio::test]
async fn test_store_validation_rejects_blank_name() {
    let app = test_app().await;
    let (status, _) = app
        .call(
            "POST",
            "/api/stores",
            Some(json!({ "name": "  ", "category": "white", "chain": "comet" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, body) = app.call("GET", "/api/stores", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_import_category_is_idempotent() {
    let app = test_app().await;
    app.create_store("Comet Bologna", "white", "comet").await;
    app.create_store("Comet Modena", "white", "comet").await;
    app.create_store("Unieuro Forlì", "tier2", "unieuro").await;

    let payload = json!({ "category": "white" });
    let (status, body) = app.call("POST", "/api/pending/import", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inserted"], 2);

    let (_, body) = app.call("POST", "/api/pending/import", Some(payload)).await;
    assert_eq!(body["inserted"], 0);
    assert_eq!(body["skipped"], 2);

    let (_, body) = app.call("GET", "/api/pending", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_schedule_rejects_weekend_and_keeps_pending() {
    let app = test_app().await;
    let store_id = app.create_store("Euronics Bari", "white", "euronics").await;
    let (_, pending) = app
        .call(
            "POST",
            "/api/pending",
            Some(json!({ "store_id": store_id, "visit_type": "white" })),
        )
        .await;
    let pending_id = pending["id"].as_i64().unwrap();

    let saturday = app.next_monday() + Duration::days(5);
    assert_eq!(saturday.weekday(), Weekday::Sat);
    let (status, body) = app
        .call(
            "POST",
            &format!("/api/pending/{pending_id}/schedule"),
            Some(json!({ "date": saturday })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4006);

    let (_, body) = app.call("GET", "/api/pending", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    let (_, body) = app
        .call("GET", &format!("/api/stores/{store_id}/visits"), None)
        .await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_schedule_then_unschedule_round_trip() {
    let app = test_app().await;
    let store_id = app.create_store("MediaWorld Torino", "white", "mediaworld").await;
    let (_, pending) = app
        .call(
            "POST",
            "/api/pending",
            Some(json!({ "store_id": store_id, "visit_type": "white" })),
        )
        .await;
    let pending_id = pending["id"].as_i64().unwrap();

    let monday = app.next_monday();
    let (status, visit) = app
        .call(
            "POST",
            &format!("/api/pending/{pending_id}/schedule"),
            Some(json!({ "date": monday })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{visit}");
    let visit_id = visit["id"].as_i64().unwrap();

    let (_, week) = app
        .call("GET", &format!("/api/calendar/week?date={monday}"), None)
        .await;
    assert_eq!(week["days"].as_array().unwrap().len(), 7);
    assert_eq!(week["days"][0]["visits"][0]["id"], visit_id);
    assert!(week["pending"].as_array().unwrap().is_empty());

    // Same store cannot be queued while scheduled
    let (status, body) = app
        .call(
            "POST",
            "/api/pending",
            Some(json!({ "store_id": store_id, "visit_type": "white" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4004);

    let (status, _) = app
        .call("POST", &format!("/api/visits/{visit_id}/unschedule"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.call("GET", "/api/pending", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    let (status, _) = app.call("GET", &format!("/api/visits/{visit_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_price_tag_page() {
    let app = test_app().await;
    let (_, device) = app
        .call(
            "POST",
            "/api/devices",
            Some(json!({ "name": "iPhone 17 Pro", "kind": "iphone" })),
        )
        .await;
    let device_id = device["id"].as_i64().unwrap();

    let (_, fixture) = app
        .call(
            "POST",
            "/api/fixtures",
            Some(json!({
                "name": "Banco iPhone",
                "devices": [{ "device_id": device_id, "position": 1, "quantity": 2 }]
            })),
        )
        .await;
    let fixture_id = fixture["id"].as_i64().unwrap();
    assert_eq!(fixture["price_tags"][0]["name"], "iPhone 17 Pro");

    let store_id = app.create_store("Unieuro Milano Centro", "white", "unieuro").await;
    let (status, report) = app
        .call(
            "POST",
            &format!("/api/stores/{store_id}/fixtures/{fixture_id}"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["added"][0], "iPhone 17 Pro");

    app.call(
        "POST",
        "/api/launches",
        Some(json!({ "name": "Autunno 2026", "device_ids": [device_id] })),
    )
    .await;

    let (status, page) = app
        .call("GET", "/cartelli_prezzo/autunno-2026/unieuro-milano-centro", None)
        .await;
    assert_eq!(status, StatusCode::OK, "{page}");
    assert_eq!(page["store_name"], "Unieuro Milano Centro");
    let tags = page["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["fixture_name"], "Banco iPhone");

    let (status, _) = app.call("GET", "/cartelli_prezzo/nope/unieuro-milano-centro", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn multipart_pdf(boundary: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"tag.pdf\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[tokio::test]
async fn test_chain_tag_pdf_upload_and_download() {
    let app = test_app().await;
    let (status, tag) = app
        .call(
            "POST",
            "/api/price-tags",
            Some(json!({ "chain": "comet", "name": "AirPods Pro" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let tag_id = tag["id"].as_i64().unwrap();

    let boundary = "fieldops-boundary";
    let pdf = b"%PDF-1.4\n% test\n".to_vec();
    let request = Request::post(format!("/api/price-tags/{tag_id}/pdf"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(multipart_pdf(boundary, &pdf)))
        .unwrap();
    let (status, bytes) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_slice(&bytes).unwrap();
    let file = updated["pdf_file"].as_str().unwrap().to_string();
    assert!(file.ends_with(".pdf"));

    let (status, bytes) = app
        .send(
            Request::get(format!("/api/files/price-tags/{file}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, pdf);

    // Not a PDF
    let request = Request::post(format!("/api/price-tags/{tag_id}/pdf"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(multipart_pdf(boundary, b"GIF89a")))
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_backup_export_import() {
    let app = test_app().await;
    app.create_store("Comet Parma", "white", "comet").await;

    let (status, doc) = app.call("GET", "/api/backup/export", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["version"], "1.0");
    assert_eq!(doc["stores"].as_array().unwrap().len(), 1);

    let mut bad = doc.clone();
    bad["version"] = json!("0.9");
    let (status, _) = app.call("POST", "/api/backup/import", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.create_store("Comet Reggio", "white", "comet").await;
    let (status, summary) = app.call("POST", "/api/backup/import", Some(doc)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["stores"], 1);

    let (_, stores) = app.call("GET", "/api/stores", None).await;
    assert_eq!(stores.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_send_email_without_function_is_rejected() {
    let app = test_app().await;
    let (_, template) = app
        .call(
            "POST",
            "/api/email-templates",
            Some(json!({ "name": "Avviso", "subject": "Ciao [nome_negozio]", "body": "..." })),
        )
        .await;
    let id = template["id"].as_i64().unwrap();

    let (status, link) = app
        .call(
            "POST",
            &format!("/api/email-templates/{id}/mailto"),
            Some(json!({ "to": ["negozio@example.com"] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{link}");
    assert!(link["uri"].as_str().unwrap().starts_with("mailto:negozio@example.com?"));

    let (status, _) = app
        .call(
            "POST",
            &format!("/api/email-templates/{id}/send"),
            Some(json!({ "to": ["negozio@example.com"] })),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
