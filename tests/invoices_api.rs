mod common;

use axum::{http::StatusCode, Router};
use chrono::{DateTime, Utc};
use common::*;
use serde_json::{json, Value};

async fn app_with_company() -> (Router, String) {
    let app = test_app();
    let code = seed_company(&app, "Apple", "iPhone maker").await;
    (app, code)
}

fn paid_date(body: &Value) -> Option<DateTime<Utc>> {
    serde_json::from_value(body["invoice"]["paid_date"].clone()).unwrap()
}

#[tokio::test]
async fn list_shows_id_company_and_amount() {
    let (app, code) = app_with_company().await;
    let id = seed_invoice(&app, &code, 100.0).await;
    let (status, body) = get(&app, "/invoices").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "invoices": [{ "id": id, "comp_code": "apple", "amt": 100.0 }] })
    );
}

#[tokio::test]
async fn create_starts_unpaid() {
    let (app, code) = app_with_company().await;
    let before = Utc::now();
    let (status, body) = post(&app, "/invoices", json!({ "comp_code": code, "amt": 300 })).await;
    assert_eq!(status, StatusCode::OK);
    let inv = &body["invoice"];
    assert!(inv["id"].is_i64());
    assert_eq!(inv["comp_code"], "apple");
    assert_eq!(inv["amt"], 300.0);
    assert_eq!(inv["paid"], false);
    assert_eq!(inv["paid_date"], Value::Null);
    let added: DateTime<Utc> = serde_json::from_value(inv["add_date"].clone()).unwrap();
    assert!(added >= before && added <= Utc::now());
}

#[tokio::test]
async fn create_for_unknown_company_is_404() {
    let app = test_app();
    let (status, _) = post(&app, "/invoices", json!({ "comp_code": "ghost", "amt": 10 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_with_non_positive_amount_is_unprocessable() {
    let (app, code) = app_with_company().await;
    let (status, _) = post(&app, "/invoices", json!({ "comp_code": code, "amt": 0 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn read_nests_company_fields() {
    let (app, code) = app_with_company().await;
    let id = seed_invoice(&app, &code, 42.5).await;
    let (status, body) = get(&app, &format!("/invoices/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let inv = &body["invoice"];
    assert_eq!(inv["id"], id);
    assert_eq!(
        inv["company"],
        json!({ "code": "apple", "name": "Apple", "description": "iPhone maker" })
    );
    assert_eq!(inv["amt"], 42.5);
    assert_eq!(inv["paid"], false);
    assert!(inv["add_date"].is_string());
    assert_eq!(inv["paid_date"], Value::Null);
    assert!(inv.get("comp_code").is_none());
}

#[tokio::test]
async fn read_missing_invoice_is_404() {
    let app = test_app();
    assert_eq!(get(&app, "/invoices/999").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn out_of_range_id_is_404() {
    let (app, code) = app_with_company().await;
    seed_invoice(&app, &code, 100.0).await;
    let uri = "/invoices/99999999999";
    let (status, body) = get(&app, uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(put(&app, uri, json!({ "amt": 1, "paid": true })).await.0, StatusCode::NOT_FOUND);
    assert_eq!(delete(&app, uri).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let app = test_app();
    let (status, body) = get(&app, "/invoices/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn paying_stamps_paid_date() {
    let (app, code) = app_with_company().await;
    let id = seed_invoice(&app, &code, 100.0).await;
    let before = Utc::now();
    let (status, body) = put(&app, &format!("/invoices/{id}"), json!({ "amt": 150, "paid": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invoice"]["amt"], 150.0);
    assert_eq!(body["invoice"]["paid"], true);
    let stamped = paid_date(&body).expect("paid_date set");
    assert!(stamped >= before && stamped <= Utc::now());
}

#[tokio::test]
async fn staying_paid_keeps_original_paid_date() {
    let (app, code) = app_with_company().await;
    let id = seed_invoice(&app, &code, 100.0).await;
    let uri = format!("/invoices/{id}");
    let (_, first) = put(&app, &uri, json!({ "amt": 100, "paid": true })).await;
    let original = paid_date(&first).unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (status, second) = put(&app, &uri, json!({ "amt": 120, "paid": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid_date(&second), Some(original));
    assert_eq!(second["invoice"]["amt"], 120.0);
}

#[tokio::test]
async fn unpaying_clears_paid_date() {
    let (app, code) = app_with_company().await;
    let id = seed_invoice(&app, &code, 100.0).await;
    let uri = format!("/invoices/{id}");
    put(&app, &uri, json!({ "amt": 100, "paid": true })).await;
    let (status, body) = put(&app, &uri, json!({ "amt": 100, "paid": false })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invoice"]["paid"], false);
    assert_eq!(body["invoice"]["paid_date"], Value::Null);
}

#[tokio::test]
async fn omitted_paid_means_unpaid() {
    let (app, code) = app_with_company().await;
    let id = seed_invoice(&app, &code, 100.0).await;
    let uri = format!("/invoices/{id}");
    put(&app, &uri, json!({ "amt": 100, "paid": true })).await;
    let (status, body) = put(&app, &uri, json!({ "amt": 80 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invoice"]["paid"], false);
    assert_eq!(body["invoice"]["paid_date"], Value::Null);
}

#[tokio::test]
async fn repaying_after_unpaying_stamps_a_new_date() {
    let (app, code) = app_with_company().await;
    let id = seed_invoice(&app, &code, 100.0).await;
    let uri = format!("/invoices/{id}");
    let (_, first) = put(&app, &uri, json!({ "amt": 100, "paid": true })).await;
    let original = paid_date(&first).unwrap();
    put(&app, &uri, json!({ "amt": 100, "paid": false })).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (_, again) = put(&app, &uri, json!({ "amt": 100, "paid": true })).await;
    assert!(paid_date(&again).unwrap() > original);
}

#[tokio::test]
async fn update_missing_invoice_is_404_without_side_effects() {
    let (app, code) = app_with_company().await;
    let id = seed_invoice(&app, &code, 100.0).await;
    let (status, _) = put(&app, "/invoices/999", json!({ "amt": 1, "paid": true })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = get(&app, "/invoices").await;
    assert_eq!(
        body,
        json!({ "invoices": [{ "id": id, "comp_code": "apple", "amt": 100.0 }] })
    );
}

#[tokio::test]
async fn delete_then_gone() {
    let (app, code) = app_with_company().await;
    let id = seed_invoice(&app, &code, 100.0).await;
    let uri = format!("/invoices/{id}");
    let (status, body) = delete(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "deleted" }));
    assert_eq!(get(&app, &uri).await.0, StatusCode::NOT_FOUND);
    assert_eq!(delete(&app, &uri).await.0, StatusCode::NOT_FOUND);
    let (_, company) = get(&app, "/companies/code/apple").await;
    assert_eq!(company["company"]["invoices"], json!([]));
}

#[tokio::test]
async fn deleting_company_removes_its_invoices() {
    let (app, code) = app_with_company().await;
    let id = seed_invoice(&app, &code, 100.0).await;
    delete(&app, "/companies/apple").await;
    assert_eq!(get(&app, &format!("/invoices/{id}")).await.0, StatusCode::NOT_FOUND);
}
