//! HTTP-level CRUD, search and pagination tests for the catalogue entities.

mod common;

use axum::http::StatusCode;
use common::{delete_auth, expect_status, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Vendors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn vendor_lifecycle(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;
    let body = json!({ "name": "Acme", "email": "a@x.com", "phone": "555", "address": "1 Main St" });

    let app = common::build_test_app(pool.clone());
    let created = expect_status(
        post_json_auth(app, "/api/v1/vendors", body, &token).await,
        StatusCode::CREATED,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let fetched = expect_status(
        get_auth(app, &format!("/api/v1/vendors/{id}"), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["name"], "Acme");
    assert_eq!(fetched["email"], "a@x.com");
    assert_eq!(fetched["phone"], "555");
    assert_eq!(fetched["address"], "1 Main St");

    let app = common::build_test_app(pool.clone());
    let deleted = expect_status(
        delete_auth(app, &format!("/api/v1/vendors/{id}"), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(deleted["message"], "Vendor deleted successfully");

    let app = common::build_test_app(pool);
    let missing = expect_status(
        get_auth(app, &format!("/api/v1/vendors/{id}"), &token).await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(missing["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn vendor_update_returns_message_and_404_when_missing(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;
    let body = json!({ "name": "Acme", "email": "a@x.com", "phone": "555", "address": "1 Main St" });

    let app = common::build_test_app(pool.clone());
    let created = expect_status(
        post_json_auth(app, "/api/v1/vendors", body.clone(), &token).await,
        StatusCode::CREATED,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let mut renamed = body.clone();
    renamed["name"] = "Acme Services".into();
    let app = common::build_test_app(pool.clone());
    let json = expect_status(
        put_json_auth(app, &format!("/api/v1/vendors/{id}"), renamed, &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["message"], "Vendor updated successfully");

    let app = common::build_test_app(pool);
    let response = put_json_auth(app, "/api/v1/vendors/999999", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn vendor_with_bad_email_is_rejected(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let body = json!({ "name": "Acme", "email": "nope", "phone": "555", "address": "1 Main St" });
    let json = expect_status(
        post_json_auth(app, "/api/v1/vendors", body, &token).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Search and pagination
// ---------------------------------------------------------------------------

async fn seed_vendors(pool: &PgPool, token: &str, names: &[&str]) {
    for (i, name) in names.iter().enumerate() {
        let body = json!({
            "name": name,
            "email": format!("v{i}@example.com"),
            "phone": format!("555-{i:04}"),
            "address": format!("{i} Harbour Rd"),
        });
        let app = common::build_test_app(pool.clone());
        expect_status(post_json_auth(app, "/api/v1/vendors", body, token).await, StatusCode::CREATED).await;
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_matches_substring_case_insensitively(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;
    seed_vendors(&pool, &token, &["Acme Plumbing", "Blue Electric", "ACME Lifts"]).await;

    let app = common::build_test_app(pool.clone());
    let json = expect_status(
        get_auth(app, "/api/v1/vendors/search?keyword=acme", &token).await,
        StatusCode::OK,
    )
    .await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Acme Plumbing", "ACME Lifts"]);

    let app = common::build_test_app(pool);
    let json = expect_status(
        get_auth(app, "/api/v1/vendors/search?keyword=zzz", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_paginates_with_total(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;
    seed_vendors(&pool, &token, &["One", "Two", "Three", "Four", "Five"]).await;

    let app = common::build_test_app(pool.clone());
    let json = expect_status(
        get_auth(app, "/api/v1/vendors?page=2&limit=2", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["page"], 2);
    assert_eq!(json["limit"], 2);
    assert_eq!(json["total"], 5);
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Three", "Four"]);

    let app = common::build_test_app(pool);
    let json = expect_status(
        get_auth(app, "/api/v1/vendors?limit=1000", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["limit"], 100);
}

// ---------------------------------------------------------------------------
// Referential checks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn asset_with_unknown_category_is_bad_request(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let body = json!({
        "name": "Generator",
        "category_id": 424242,
        "location": "Basement",
        "status": "in_use",
    });
    let json = expect_status(
        post_json_auth(app, "/api/v1/assets", body, &token).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "MISSING_REFERENCE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn asset_flow_through_category(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let category = expect_status(
        post_json_auth(app, "/api/v1/asset-categories", json!({ "name": "Power" }), &token).await,
        StatusCode::CREATED,
    )
    .await;
    let category_id = category["id"].as_i64().unwrap();

    let body = json!({
        "name": "Generator",
        "category_id": category_id,
        "location": "Basement",
        "value": 12000.5,
        "status": "in_use",
    });
    let app = common::build_test_app(pool.clone());
    expect_status(post_json_auth(app, "/api/v1/assets", body, &token).await, StatusCode::CREATED).await;

    let app = common::build_test_app(pool.clone());
    let json = expect_status(
        get_auth(app, &format!("/api/v1/asset-categories/{category_id}/assets"), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"][0]["name"], "Generator");

    // The category is still referenced.
    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/v1/asset-categories/{category_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn asset_with_unknown_status_is_rejected(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let category = expect_status(
        post_json_auth(app, "/api/v1/asset-categories", json!({ "name": "Power" }), &token).await,
        StatusCode::CREATED,
    )
    .await;

    let body = json!({
        "name": "Generator",
        "category_id": category["id"],
        "location": "Basement",
        "status": "lost",
    });
    let app = common::build_test_app(pool);
    let json = expect_status(
        post_json_auth(app, "/api/v1/assets", body, &token).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert!(json["error"].as_str().unwrap().contains("in_use"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn contract_end_before_start_is_rejected(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let vendor = expect_status(
        post_json_auth(
            app,
            "/api/v1/vendors",
            json!({ "name": "Acme", "email": "a@x.com", "phone": "555", "address": "1 Main St" }),
            &token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    let body = json!({
        "vendor_id": vendor["id"],
        "title": "Lift servicing",
        "start_date": "2024-06-01",
        "end_date": "2024-05-01",
        "status": "active",
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/contracts", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut fixed = body;
    fixed["end_date"] = "2025-05-31".into();
    let app = common::build_test_app(pool.clone());
    expect_status(post_json_auth(app, "/api/v1/contracts", fixed, &token).await, StatusCode::CREATED).await;

    let app = common::build_test_app(pool);
    let json = expect_status(
        get_auth(app, &format!("/api/v1/vendors/{}/contracts", vendor["id"]), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_manages_users(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;

    let body = json!({
        "name": "Guard",
        "email": "Guard@Residence.test",
        "password": "secret123",
        "role": "admin",
    });
    let app = common::build_test_app(pool.clone());
    let created = expect_status(post_json_auth(app, "/api/v1/users", body.clone(), &token).await, StatusCode::CREATED).await;
    assert_eq!(created["email"], "guard@residence.test");
    assert_eq!(created["role"], "admin");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/users", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let app = common::build_test_app(pool.clone());
    let bad_role = json!({ "name": "X", "email": "x@residence.test", "password": "secret123", "role": "owner" });
    let response = post_json_auth(app, "/api/v1/users", bad_role, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let id = created["id"].as_i64().unwrap();
    let app = common::build_test_app(pool.clone());
    let json = expect_status(delete_auth(app, &format!("/api/v1/users/{id}"), &token).await, StatusCode::OK).await;
    assert_eq!(json["message"], "User deleted successfully");

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/v1/users/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Malformed input
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn vendor_missing_field_is_bad_request(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;
    let body = json!({ "name": "Acme", "phone": "555", "address": "x" });

    let app = common::build_test_app(pool);
    let json = expect_status(
        post_json_auth(app, "/api/v1/vendors", body, &token).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("email"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrongly_typed_field_is_bad_request(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;
    let body = json!({ "name": "Pump", "category_id": "one", "location": "B1", "status": "in_use" });

    let app = common::build_test_app(pool);
    let json = expect_status(
        post_json_auth(app, "/api/v1/assets", body, &token).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_path_and_query_are_bad_request(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let json = expect_status(
        get_auth(app, "/api/v1/vendors/abc", &token).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "BAD_REQUEST");

    let app = common::build_test_app(pool);
    let json = expect_status(
        get_auth(app, "/api/v1/vendors?page=first", &token).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Maintenance plans and history
// ---------------------------------------------------------------------------

async fn seed_asset(pool: &PgPool, token: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let category = expect_status(
        post_json_auth(app, "/api/v1/asset-categories", json!({ "name": "Lifts" }), token).await,
        StatusCode::CREATED,
    )
    .await;
    let body = json!({
        "name": "Lift A",
        "category_id": category["id"],
        "location": "Tower 1",
        "status": "in_use",
    });
    let app = common::build_test_app(pool.clone());
    let asset = expect_status(
        post_json_auth(app, "/api/v1/assets", body, token).await,
        StatusCode::CREATED,
    )
    .await;
    asset["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn maintenance_plan_and_history_lifecycle(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;
    let asset_id = seed_asset(&pool, &token).await;

    let mut plan_body = json!({
        "asset_id": asset_id,
        "title": "Lift inspection",
        "frequency": "monthly",
        "next_due_date": "2024-08-01",
        "status": "scheduled",
    });
    let app = common::build_test_app(pool.clone());
    let plan = expect_status(
        post_json_auth(app, "/api/v1/maintenance-plans", plan_body.clone(), &token).await,
        StatusCode::CREATED,
    )
    .await;
    let plan_id = plan["id"].as_i64().unwrap();
    let plan_uri = format!("/api/v1/maintenance-plans/{plan_id}");

    plan_body["status"] = "in_progress".into();
    let app = common::build_test_app(pool.clone());
    let json = expect_status(
        put_json_auth(app, &plan_uri, plan_body.clone(), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["message"], "Maintenance plan updated successfully");

    let app = common::build_test_app(pool.clone());
    let fetched = expect_status(get_auth(app, &plan_uri, &token).await, StatusCode::OK).await;
    assert_eq!(fetched["status"], "in_progress");
    assert_eq!(fetched["next_due_date"], "2024-08-01");

    let app = common::build_test_app(pool.clone());
    let json = expect_status(
        get_auth(app, "/api/v1/maintenance-plans/search?keyword=INSPECT", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    plan_body["frequency"] = "hourly".into();
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &plan_uri, plan_body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let record_body = json!({
        "asset_id": asset_id,
        "plan_id": plan_id,
        "performed_on": "2024-07-02",
        "description": "Cables checked",
        "cost": 150.0,
        "performed_by": "LiftCo",
    });
    let app = common::build_test_app(pool.clone());
    let record = expect_status(
        post_json_auth(app, "/api/v1/maintenance-history", record_body, &token).await,
        StatusCode::CREATED,
    )
    .await;
    let record_uri = format!("/api/v1/maintenance-history/{}", record["id"]);

    let app = common::build_test_app(pool.clone());
    let json = expect_status(
        get_auth(app, &format!("/api/v1/assets/{asset_id}/maintenance-history"), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"][0]["performed_by"], "LiftCo");

    // History outlives the plan that scheduled it.
    let app = common::build_test_app(pool.clone());
    expect_status(delete_auth(app, &plan_uri, &token).await, StatusCode::OK).await;
    let app = common::build_test_app(pool.clone());
    let json = expect_status(get_auth(app, &plan_uri, &token).await, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");

    let app = common::build_test_app(pool.clone());
    let kept = expect_status(get_auth(app, &record_uri, &token).await, StatusCode::OK).await;
    assert!(kept["plan_id"].is_null());

    let app = common::build_test_app(pool.clone());
    expect_status(delete_auth(app, &record_uri, &token).await, StatusCode::OK).await;
    let app = common::build_test_app(pool);
    let response = delete_auth(app, &record_uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn maintenance_record_for_unknown_plan_is_bad_request(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;
    let asset_id = seed_asset(&pool, &token).await;
    let body = json!({
        "asset_id": asset_id,
        "plan_id": 424242,
        "performed_on": "2024-07-02",
        "description": "Cables checked",
    });

    let app = common::build_test_app(pool);
    let json = expect_status(
        post_json_auth(app, "/api/v1/maintenance-history", body, &token).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "MISSING_REFERENCE");
}

// ---------------------------------------------------------------------------
// Visitors and residence rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn visitor_lifecycle(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;
    let mut body = json!({ "name": "Le Van C", "id_number": "ID-77", "visit_date": "2024-05-20" });

    let app = common::build_test_app(pool.clone());
    let visitor = expect_status(
        post_json_auth(app, "/api/v1/visitors", body.clone(), &token).await,
        StatusCode::CREATED,
    )
    .await;
    let uri = format!("/api/v1/visitors/{}", visitor["id"]);

    body["purpose"] = "Parcel".into();
    let app = common::build_test_app(pool.clone());
    expect_status(put_json_auth(app, &uri, body, &token).await, StatusCode::OK).await;

    let app = common::build_test_app(pool.clone());
    let fetched = expect_status(get_auth(app, &uri, &token).await, StatusCode::OK).await;
    assert_eq!(fetched["purpose"], "Parcel");

    let app = common::build_test_app(pool.clone());
    let json = expect_status(
        get_auth(app, "/api/v1/visitors/search?keyword=id-7", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone());
    expect_status(delete_auth(app, &uri, &token).await, StatusCode::OK).await;
    let app = common::build_test_app(pool);
    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn visitor_for_unknown_room_is_bad_request(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;
    let body = json!({ "name": "Le Van C", "room_id": 424242, "visit_date": "2024-05-20" });

    let app = common::build_test_app(pool);
    let json = expect_status(
        post_json_auth(app, "/api/v1/visitors", body, &token).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "MISSING_REFERENCE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rule_lifecycle_and_search(pool: PgPool) {
    let (_admin, token) = common::admin_token(&pool).await;
    let mut body = json!({ "title": "Quiet hours", "content": "No noise after 22:00", "category": "Noise" });

    let app = common::build_test_app(pool.clone());
    let rule = expect_status(
        post_json_auth(app, "/api/v1/residence-rules", body.clone(), &token).await,
        StatusCode::CREATED,
    )
    .await;
    let uri = format!("/api/v1/residence-rules/{}", rule["id"]);

    let app = common::build_test_app(pool.clone());
    let json = expect_status(
        get_auth(app, "/api/v1/residence-rules/search?keyword=QUIET", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"][0]["title"], "Quiet hours");

    body["content"] = "No noise after 23:00".into();
    let app = common::build_test_app(pool.clone());
    expect_status(put_json_auth(app, &uri, body, &token).await, StatusCode::OK).await;
    let app = common::build_test_app(pool.clone());
    let fetched = expect_status(get_auth(app, &uri, &token).await, StatusCode::OK).await;
    assert_eq!(fetched["content"], "No noise after 23:00");

    let app = common::build_test_app(pool.clone());
    expect_status(delete_auth(app, &uri, &token).await, StatusCode::OK).await;
    let app = common::build_test_app(pool);
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
