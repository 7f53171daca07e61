//! HTTP tests driving the router in process over an in-memory database

use std::{path::PathBuf, sync::Arc};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use barberia::{
    config::{DatabaseConfig, TenantsConfig},
    create_router,
    repository::Repository,
    services::{catalog::CatalogService, tenants::TenantResolver},
    web, AppState,
};

const BODY_LIMIT: usize = 1024 * 1024;

async fn app() -> Router {
    let database = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    let repository = Repository::connect(&database).await.unwrap();
    CatalogService::new(repository.clone()).seed_defaults().await.unwrap();

    let tenants = TenantsConfig {
        enabled: false,
        data_dir: PathBuf::from("unused"),
    };
    create_router(AppState {
        tenants: TenantResolver::new(repository, tenants),
        templates: Arc::new(web::templates::environment().unwrap()),
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn get_html(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, String::from_utf8(body).unwrap())
}

async fn post_json(app: &Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn visit(client: &str, service: &str, amount: &str) -> Value {
    json!({
        "client_name": client,
        "service_name": service,
        "staff_name": "luis",
        "payment_method": "efectivo",
        "amount": amount,
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = app().await;

    let (status, body) = get_json(&app, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get_json(&app, "/api/v1/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_services_are_seeded() {
    let app = app().await;

    let (status, body) = get_json(&app, "/api/v1/services").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Corte de pelo", "Afeitado", "Tinte", "Corte y barba"]);
}

#[tokio::test]
async fn test_create_visit_numbers_each_client() {
    let app = app().await;

    let (status, first) = post_json(&app, "/api/v1/visits", visit("ana", "corte de pelo", "$15")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["client_name"], "Ana");
    assert_eq!(first["service_name"], "Corte de pelo");
    assert_eq!(first["visit_sequence_number"], 1);

    let (_, second) = post_json(&app, "/api/v1/visits", visit("Ana", "Tinte", "25")).await;
    assert_eq!(second["visit_sequence_number"], 2);

    let (status, visits) = get_json(&app, "/api/v1/visits").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(visits.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_bad_amount_is_rejected() {
    let app = app().await;

    let (status, body) = post_json(&app, "/api/v1/visits", visit("Ana", "Afeitado", "diez")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3);
    assert_eq!(body["error"], "BadValue");

    let (_, visits) = get_json(&app, "/api/v1/visits").await;
    assert!(visits.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_service_is_rejected() {
    let app = app().await;

    let (status, _) = post_json(&app, "/api/v1/visits", visit("Ana", "Masaje", "10")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reports_without_data() {
    let app = app().await;

    let (status, body) = get_json(&app, "/api/v1/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_data"], false);

    let (status, body) = get_json(&app, "/api/v1/reports/week").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "week");
    assert_eq!(body["has_data"], false);
}

#[tokio::test]
async fn test_reports_after_registration() {
    let app = app().await;
    post_json(&app, "/api/v1/visits", visit("Ana", "Tinte", "25")).await;
    post_json(&app, "/api/v1/visits", visit("Beto", "Tinte", "25.50")).await;

    let (_, body) = get_json(&app, "/api/v1/reports/month").await;
    assert_eq!(body["has_data"], true);
    let summary = &body["report"]["summary"];
    assert_eq!(summary["unique_client_count"], 2);
    assert_eq!(summary["most_popular_service"], "Tinte");
    assert_eq!(summary["most_active_staff"], "Luis");

    let (_, body) = get_json(&app, "/api/v1/summary").await;
    assert_eq!(body["summary"]["total_revenue"], "50.50");
}

#[tokio::test]
async fn test_unknown_period_is_rejected() {
    let app = app().await;
    let request = Request::get("/api/v1/reports/year").body(Body::empty()).unwrap();

    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clients_directory() {
    let app = app().await;
    post_json(&app, "/api/v1/visits", visit("ana", "Tinte", "25")).await;

    let (status, created) = post_json(
        &app,
        "/api/v1/clients",
        json!({ "name": "beto", "email": "beto@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Beto");

    let (status, _) = post_json(&app, "/api/v1/clients", json!({ "name": "Caro", "email": "nope" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, clients) = get_json(&app, "/api/v1/clients").await;
    let clients = clients.as_array().unwrap();
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0]["name"], "Ana");
    assert_eq!(clients[0]["total_visits"], 1);
    assert_eq!(clients[0]["average_interval_days"], 30.0);
    assert_eq!(clients[1]["total_visits"], 0);
}

#[tokio::test]
async fn test_html_pages_render() {
    let app = app().await;

    let (status, html) = get_html(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("/visits/new"));

    let (status, html) = get_html(&app, "/visits/new").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Corte de pelo ($15.00)"));
    assert!(html.contains("Transferencia"));

    let (status, html) = get_html(&app, "/reports").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No hay datos para generar reportes"));
}

#[tokio::test]
async fn test_form_submission() {
    let app = app().await;
    let form = |amount: &str| {
        Request::post("/visits/new")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!(
                "client_name=ana&service_id=1&staff_name=luis&payment_method=Tarjeta&amount={}",
                amount
            )))
            .unwrap()
    };

    let (status, body) = send(&app, form("abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("alert-danger"));

    let (status, body) = send(&app, form("15.50")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("Visita registrada exitosamente"));

    let (_, html) = get_html(&app, "/reports").await;
    assert!(html.contains("Corte de pelo"));
    assert!(html.contains("$15.50"));

    let (_, html) = get_html(&app, "/clients").await;
    assert!(html.contains("Ana"));
}

#[tokio::test]
async fn test_spreadsheet_download() {
    let app = app().await;

    let (status, html) = get_html(&app, "/export.xlsx").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No hay datos para exportar"));

    post_json(&app, "/api/v1/visits", visit("Ana", "Tinte", "25")).await;
    let response = app
        .clone()
        .oneshot(Request::get("/export.xlsx").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("reporte_barberia.xlsx"));
    let body = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    assert!(body.starts_with(b"PK"));
}

#[tokio::test]
async fn test_responses_are_gzip_encoded_on_request() {
    let app = app().await;
    let request = Request::get("/api/v1/services")
        .header(header::ACCEPT_ENCODING, "gzip")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_ENCODING], "gzip");
}
