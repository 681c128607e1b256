//! End-to-end tests of the HTTP surface against in-memory SQLite

use axum::http::{header, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use interface_api::{config::ApiConfig, create_router};
use test_utils::test_database;

async fn server() -> TestServer {
    let db = test_database().await;
    TestServer::new(create_router(db.pool.clone(), ApiConfig::default())).unwrap()
}

fn intimation() -> Value {
    json!({
        "entryDate": "2024-01-10",
        "admissionDate": "2024-01-05",
        "customerName": "A. Singh",
        "policyNumber": "POL-123",
        "hospitalName": "City Hospital",
        "companyName": "HDFC",
        "claimStatus": "Intimation",
        "claimType": "Cashless"
    })
}

fn with(base: Value, changes: Value) -> Value {
    let mut merged = base;
    if let (Some(target), Some(source)) = (merged.as_object_mut(), changes.as_object()) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }
    merged
}

async fn create(server: &TestServer, body: Value) -> Value {
    let response = server.post("/api/v1/claims").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn test_health() {
    let server = server().await;
    server.get("/health").await.assert_status_ok();
    let ready = server.get("/health/ready").await;
    ready.assert_status_ok();
    assert_eq!(ready.json::<Value>()["status"], "ready");
}

#[tokio::test]
async fn test_reference_data() {
    let server = server().await;
    let body = server.get("/api/v1/reference").await.json::<Value>();

    assert_eq!(body["companies"].as_array().unwrap().len(), 9);
    assert_eq!(body["dateFormat"], "%Y-%m-%d");
    let types = body["claimTypes"].as_array().unwrap();
    assert!(types.contains(&json!({"name": "Pre-post", "role": "Linkable"})));
    assert!(types.contains(&json!({"name": "Cashless", "role": "Main"})));
    assert!(types.contains(&json!({"name": "Day care", "role": "Standalone"})));
}

#[tokio::test]
async fn test_create_and_fetch() {
    let server = server().await;
    let created = create(&server, with(intimation(), json!({"claimedAmount": 1500.5}))).await;

    assert_eq!(created["customerName"], "A. Singh");
    assert_eq!(created["role"], "Main");
    assert_eq!(created["displayName"], "A. Singh (POL-123)");

    let id = created["id"].as_i64().unwrap();
    let fetched = server.get(&format!("/api/v1/claims/{}", id)).await;
    fetched.assert_status_ok();
    assert_eq!(fetched.json::<Value>()["companyName"], "HDFC");
}

#[tokio::test]
async fn test_regional_dates_are_normalised_on_create() {
    let server = server().await;
    let created = create(
        &server,
        with(intimation(), json!({"entryDate": "10/01/2024", "admissionDate": "05/01/2024"})),
    )
    .await;
    assert_eq!(created["entryDate"], "2024-01-10");
    assert_eq!(created["admissionDate"], "2024-01-05");
}

#[tokio::test]
async fn test_validation_failure_lists_every_message() {
    let server = server().await;
    let body = with(
        intimation(),
        json!({"claimStatus": "Settled", "hospitalName": "", "approvedAmount": "10", "claimedAmount": "5"}),
    );

    let response = server.post("/api/v1/claims").json(&body).expect_failure().await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let error = response.json::<Value>();
    assert_eq!(error["error"], "validation_error");
    assert_eq!(
        error["details"],
        json!([
            "Hospital Name is required",
            "Approved Amount cannot be greater than Claimed Amount",
            "Claim Number is required for submitted/processed claims"
        ])
    );
}

#[tokio::test]
async fn test_dry_run_validation() {
    let server = server().await;

    let ok = server.post("/api/v1/claims/validate").json(&intimation()).await;
    assert_eq!(ok.json::<Value>(), json!({"valid": true, "errors": []}));

    let bad = server
        .post("/api/v1/claims/validate")
        .json(&with(intimation(), json!({"claimStatus": "Settled"})))
        .await;
    assert_eq!(
        bad.json::<Value>(),
        json!({"valid": false, "errors": ["Claim Number is required for submitted/processed claims"]})
    );
    assert!(server.get("/api/v1/claims").await.json::<Vec<Value>>().is_empty());
}

#[tokio::test]
async fn test_link_policy_violations() {
    let server = server().await;
    let day_care = create(&server, with(intimation(), json!({"claimType": "Day care"}))).await;

    let child = with(
        intimation(),
        json!({"claimType": "Pre-post", "parentClaimId": day_care["id"]}),
    );
    let response = server.post("/api/v1/claims").json(&child).expect_failure().await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let error = response.json::<Value>();
    assert_eq!(error["error"], "link_policy_violation");
    assert_eq!(error["details"], json!(["ParentNotMainType"]));

    let orphan = with(intimation(), json!({"claimType": "Hospital cash", "parentClaimId": 999}));
    let response = server.post("/api/v1/claims").json(&orphan).expect_failure().await;
    assert_eq!(response.json::<Value>()["details"], json!(["ParentNotFound"]));
}

#[tokio::test]
async fn test_linking_and_cascade_delete() {
    let server = server().await;
    let parent = create(&server, intimation()).await;
    let parent_id = parent["id"].as_i64().unwrap();

    let child = create(
        &server,
        with(intimation(), json!({"claimType": "Pre-post", "parentClaimId": parent_id})),
    )
    .await;
    assert_eq!(child["parentClaimId"], parent_id);

    let linked = server
        .get(&format!("/api/v1/claims/{}/linked", parent_id))
        .await
        .json::<Vec<Value>>();
    assert_eq!(linked.len(), 1);

    let mains = server.get("/api/v1/main-claims").await.json::<Vec<Value>>();
    assert_eq!(mains.len(), 1);
    assert_eq!(mains[0]["id"], parent_id);

    let deleted = server.delete(&format!("/api/v1/claims/{}", parent_id)).await;
    deleted.assert_status_ok();
    assert_eq!(deleted.json::<Value>(), json!({"deletedId": parent_id, "linkedRemoved": 1}));

    server
        .get(&format!("/api/v1/claims/{}", child["id"]))
        .expect_failure()
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_main_claim_with_children_keeps_main_type() {
    let server = server().await;
    let parent = create(&server, intimation()).await;
    let parent_id = parent["id"].as_i64().unwrap();
    create(
        &server,
        with(intimation(), json!({"claimType": "Hospital cash", "parentClaimId": parent_id})),
    )
    .await;

    let response = server
        .put(&format!("/api/v1/claims/{}", parent_id))
        .json(&with(intimation(), json!({"claimType": "Day care"})))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let updated = server
        .put(&format!("/api/v1/claims/{}", parent_id))
        .json(&with(intimation(), json!({"claimType": "Reimbursement", "remark": "switched"})))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["remark"], "switched");
}

#[tokio::test]
async fn test_unknown_claim_is_not_found() {
    let server = server().await;
    server
        .get("/api/v1/claims/41")
        .expect_failure()
        .await
        .assert_status_not_found();
    server
        .put("/api/v1/claims/41")
        .json(&intimation())
        .expect_failure()
        .await
        .assert_status_not_found();
    server
        .delete("/api/v1/claims/41")
        .expect_failure()
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_search_filters() {
    let server = server().await;
    create(&server, intimation()).await;
    create(
        &server,
        with(intimation(), json!({"customerName": "Priya Nair", "companyName": "NIVA"})),
    )
    .await;

    let found = server
        .get("/api/v1/claims")
        .add_query_param("companyName", "NIVA")
        .await
        .json::<Vec<Value>>();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["customerName"], "Priya Nair");

    let response = server
        .get("/api/v1/claims")
        .add_query_param("entryDateFrom", "2024-02-01")
        .add_query_param("entryDateTo", "2024-01-01")
        .expect_failure()
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.json::<Value>()["details"],
        json!(["Entry Date From cannot be after Entry Date To"])
    );
}

#[tokio::test]
async fn test_statistics() {
    let server = server().await;
    create(&server, with(intimation(), json!({"claimedAmount": "100", "approvedAmount": "60"}))).await;
    create(&server, with(intimation(), json!({"claimedAmount": "50.25"}))).await;

    let stats = server.get("/api/v1/statistics").await.json::<Value>();
    assert_eq!(stats["totalClaims"], 2);
    assert_eq!(stats["byStatus"]["Intimation"], 2);
    assert_eq!(stats["byCompany"]["HDFC"], 2);
}

#[tokio::test]
async fn test_csv_export() {
    let server = server().await;

    let empty = server.post("/api/v1/export/csv").expect_failure().await;
    empty.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(empty.json::<Value>()["message"], "No claims to export");

    create(&server, with(intimation(), json!({"tpaName": "MediAssist"}))).await;
    let response = server.post("/api/v1/export/csv").json(&json!({})).await;
    response.assert_status_ok();

    let disposition = response.header(header::CONTENT_DISPOSITION);
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"insurance_claims_"));
    assert!(disposition.ends_with(".csv\""));

    let text = response.text();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("Claim ID,Entry Date,Admission Date"));
    assert!(lines.next().unwrap().contains("MediAssist"));
}

#[tokio::test]
async fn test_export_rejects_undecodable_filter() {
    let server = server().await;
    create(&server, intimation()).await;
    create(&server, with(intimation(), json!({"policyNumber": "POL-777"}))).await;

    let response = server
        .post("/api/v1/export/csv")
        .json(&json!({"policyNumber": 12345}))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "bad_request");

    let response = server
        .post("/api/v1/export/xlsx")
        .text("{not json")
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let filtered = server
        .post("/api/v1/export/csv")
        .json(&json!({"policyNumber": "POL-777"}))
        .await;
    filtered.assert_status_ok();
    assert_eq!(filtered.text().lines().count(), 2);

    let everything = server.post("/api/v1/export/csv").await;
    everything.assert_status_ok();
    assert_eq!(everything.text().lines().count(), 3);
}

#[tokio::test]
async fn test_xlsx_export() {
    use calamine::{open_workbook_from_rs, Reader, Xlsx};
    use std::io::Cursor;

    let server = server().await;
    server
        .post("/api/v1/export/xlsx")
        .expect_failure()
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    create(&server, intimation()).await;
    create(&server, with(intimation(), json!({"claimStatus": "Submitted", "claimNumber": "CLM-9"}))).await;

    let response = server.post("/api/v1/export/xlsx").await;
    response.assert_status_ok();
    let content_type = response.header(header::CONTENT_TYPE);
    assert_eq!(
        content_type.to_str().unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = response.header(header::CONTENT_DISPOSITION);
    assert!(disposition.to_str().unwrap().ends_with(".xlsx\""));
    let workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(response.as_bytes().to_vec())).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Insurance Claims".to_string()]);

    let grouped = server
        .post("/api/v1/export/xlsx")
        .add_query_param("groupByStatus", true)
        .await;
    grouped.assert_status_ok();
    let disposition = grouped.header(header::CONTENT_DISPOSITION);
    assert!(disposition
        .to_str()
        .unwrap()
        .starts_with("attachment; filename=\"insurance_claims_by_status_"));
    let workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(grouped.as_bytes().to_vec())).unwrap();
    let mut sheets = workbook.sheet_names();
    sheets.sort();
    assert_eq!(sheets, vec!["Intimation".to_string(), "Submitted".to_string()]);
}
