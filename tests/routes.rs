use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use service_tracker::configure;
use service_tracker::dto::snapshot::ClientDocument;
use service_tracker::locale::FixedClock;
use service_tracker::repository::InMemoryRepository;
use service_tracker::services::ClientStore;
use service_tracker::services::seed::demo_clients;

mod common;

fn store() -> web::Data<ClientStore> {
    let now = common::august(20).and_hms_opt(9, 0, 0).unwrap();
    web::Data::new(
        ClientStore::new(Arc::new(InMemoryRepository::new())).with_clock(Arc::new(FixedClock(now))),
    )
}

fn add_body(name: &str) -> Value {
    json!({
        "name": name,
        "service": "Marcenaria planejada",
        "start_date": "17/08/2025",
        "initial_status": "Aguardando visita técnica"
    })
}

#[actix_web::test]
async fn test_client_lifecycle_over_http() {
    let app = test::init_service(App::new().app_data(store()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .set_json(add_body("João da Silva"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["status"], "active");
    assert_eq!(created["display_date"], "17/08/2025");
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/clients/{id}/timeline"))
        .set_json(json!({ "text": "Projeto aprovado & pago, prazo < 30 dias" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        updated["timeline"][0]["description"],
        "Projeto aprovado & pago, prazo < 30 dias"
    );
    assert_eq!(updated["timeline"][0]["date"], "20 de Agosto, 2025");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/clients/{id}"))
        .set_json(json!({ "service": "Marcenaria Completa" }))
        .to_request();
    let saved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(saved["service"], "Marcenaria Completa");
    assert_eq!(saved["name"], "João da Silva");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/clients/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/clients/{id}/complete"))
        .to_request();
    let completed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(completed["status"], "completed");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/clients/{id}/complete"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/clients/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/clients/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invalid_input_is_rejected() {
    let app = test::init_service(App::new().app_data(store()).configure(configure)).await;

    let mut body = add_body("João da Silva");
    body["start_date"] = json!("dd / mm / aaaa");
    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/clients/not-a-uuid")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_index_filters_by_tab_and_search() {
    let store = store();
    let now = common::august(30).and_hms_opt(9, 0, 0).unwrap();
    store
        .apply_remote_snapshot(demo_clients(store.locale(), now).unwrap())
        .unwrap();
    let app = test::init_service(App::new().app_data(store.clone()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/v1/clients").to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["tab"], "active");
    assert_eq!(page["counters"], json!({ "active": 3, "completed": 2, "total": 5 }));
    let names: Vec<&str> = page["clients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Pedro Martins", "Carlos Souza", "Maria Oliveira"]);

    let req = test::TestRequest::get()
        .uri("/api/v1/clients?tab=completed&search=COSTA")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["clients"].as_array().unwrap().len(), 1);
    assert_eq!(page["clients"][0]["name"], "Ana Costa");
    assert_eq!(page["clients"][0]["display_date"], "28/08/2025");
    assert_eq!(page["counters"]["total"], 5);
}

#[actix_web::test]
async fn test_snapshot_sync_round_trip() {
    let source = store();
    let now = common::august(30).and_hms_opt(9, 0, 0).unwrap();
    source
        .apply_remote_snapshot(demo_clients(source.locale(), now).unwrap())
        .unwrap();
    let source_app =
        test::init_service(App::new().app_data(source.clone()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/v1/snapshot").to_request();
    let documents: Vec<ClientDocument> = test::call_and_read_body_json(&source_app, req).await;
    assert_eq!(documents.len(), 5);

    let target = store();
    target.create(common::new_client("Local", 18)).unwrap();
    let target_app =
        test::init_service(App::new().app_data(target.clone()).configure(configure)).await;

    let req = test::TestRequest::put()
        .uri("/api/v1/snapshot")
        .set_json(&documents)
        .to_request();
    let resp = test::call_service(&target_app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(target.list_all().unwrap(), source.list_all().unwrap());

    let mut broken = documents.clone();
    broken[0].timeline.clear();
    let req = test::TestRequest::put()
        .uri("/api/v1/snapshot")
        .set_json(&broken)
        .to_request();
    let resp = test::call_service(&target_app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(target.list_all().unwrap().len(), 5);
}
