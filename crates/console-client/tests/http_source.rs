//! Integration tests for the REST data source against a mock backend

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use console_client::{API_KEY_HEADER, ClientError, DataSource, HttpDataSource, ResourceController};
use console_protocol::LoadStatus;
use console_types::entities::{Coupon, Enrollment, Staff, User};
use console_types::{AppError, ConsoleSettings, FileUpload, RecordId, Session};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Default settings with every backend pointed at the mock server
fn settings(server: &MockServer, api_key: Option<&str>) -> ConsoleSettings {
    let mut settings = ConsoleSettings::default();
    for backend in settings.backends.values_mut() {
        backend.base_url = format!("{}/api", server.uri());
        backend.api_key = api_key.map(str::to_string);
    }
    settings
}

fn coupons(server: &MockServer) -> HttpDataSource<Coupon> {
    HttpDataSource::from_settings(&settings(server, None), "coupons", &Session::admin()).unwrap()
}

#[tokio::test]
async fn test_named_envelope_and_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header(API_KEY_HEADER, "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "users": [
                {"_id": "u1", "name": "Ada", "email": "ada@example.com"},
                {"_id": "u2", "name": "Grace", "email": "grace@example.com"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = settings(&server, Some("secret"));
    let source: HttpDataSource<User> =
        HttpDataSource::from_settings(&settings, "users", &Session::admin()).unwrap();
    let users = source.list().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[1].name, "Grace");
    assert_eq!(users[0].id, Some(RecordId::from("u1")));
}

#[tokio::test]
async fn test_data_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/staff"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 7, "name": "Ravi", "email": "ravi@example.com"}]
        })))
        .mount(&server)
        .await;

    let source: HttpDataSource<Staff> =
        HttpDataSource::from_settings(&settings(&server, None), "staff", &Session::admin())
            .unwrap();
    let staff = source.list().await.unwrap();

    assert_eq!(staff.len(), 1);
    assert_eq!(staff[0].id, Some(RecordId::from(7u64)));
}

#[tokio::test]
async fn test_success_false_is_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/coupons"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Vendor suspended"
        })))
        .mount(&server)
        .await;

    let error = coupons(&server).list().await.unwrap_err();
    assert!(matches!(
        error,
        ClientError::Protocol(AppError::Remote(ref m)) if m == "Vendor suspended"
    ));
}

#[rstest]
#[case(401, "Authentication required")]
#[case(404, "Not found: No such coupon")]
#[case(500, "Request failed with status 500: No such coupon")]
#[tokio::test]
async fn test_status_mapping(#[case] status: u16, #[case] expected: &str) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/coupons/c1"))
        .respond_with(
            ResponseTemplate::new(status).set_body_json(json!({"message": "No such coupon"})),
        )
        .mount(&server)
        .await;

    let error = coupons(&server).get(&RecordId::from("c1")).await.unwrap_err();
    assert_eq!(error.to_string(), expected);
}

#[tokio::test]
async fn test_validation_errors_reach_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/coupons"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": [{"field": "code", "message": "Code already exists"}]
        })))
        .mount(&server)
        .await;

    let draft = Coupon {
        code: "SAVE10".into(),
        vendor: "Acme".into(),
        ..Coupon::default()
    };
    let error = coupons(&server).create(&draft).await.unwrap_err();
    assert_eq!(error.field_errors().len(), 1);
    assert_eq!(error.field_errors()[0].field, "code");
}

#[tokio::test]
async fn test_failed_reload_keeps_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/coupons"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "coupons": [{"_id": "c1", "code": "SAVE10", "vendor": "Acme"}]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/coupons"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let controller = ResourceController::new(Arc::new(coupons(&server)), 10);
    assert_eq!(controller.load().await.unwrap(), 1);

    let error = controller.load().await.unwrap_err();
    assert!(matches!(error, ClientError::Status { code: 503, .. }));
    assert_eq!(controller.with_view(|v| v.collection().len()), 1);
    assert!(matches!(controller.status(), LoadStatus::Failed(_)));
}

#[tokio::test]
async fn test_wrong_envelope_fails_the_reload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/coupons"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "coupons": [{"_id": "c1", "code": "SAVE10", "vendor": "Acme"}]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/coupons"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let controller = ResourceController::new(Arc::new(coupons(&server)), 10);
    assert_eq!(controller.load().await.unwrap(), 1);

    let error = controller.load().await.unwrap_err();
    assert!(matches!(
        error,
        ClientError::Protocol(AppError::Remote(ref m)) if m.contains("unexpected response envelope")
    ));
    assert_eq!(controller.with_view(|v| v.collection().len()), 1);
}

#[tokio::test]
async fn test_mutations_mirror_server_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/coupons"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "coupons": [{"_id": "c1", "code": "SAVE10", "vendor": "Acme"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/coupons"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "coupon": {"_id": "c2", "code": "FLAT50", "vendor": "Acme"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/coupons/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Updated"
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/coupons/c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let controller = ResourceController::new(Arc::new(coupons(&server)), 10);
    controller.load().await.unwrap();

    let created = controller
        .create(&Coupon {
            code: "FLAT50".into(),
            vendor: "Acme".into(),
            ..Coupon::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, Some(RecordId::from("c2")));

    let mut draft = controller.with_view(|v| v.collection()[0].clone());
    draft.code = "SAVE15".into();
    let updated = controller.update(&RecordId::from("c1"), &draft).await.unwrap();
    assert_eq!(updated.id, Some(RecordId::from("c1")));

    controller.delete(&RecordId::from("c2")).await.unwrap();

    let codes: Vec<String> =
        controller.with_view(|v| v.collection().iter().map(|c| c.code.clone()).collect());
    assert_eq!(codes, vec!["SAVE15"]);
}

#[tokio::test]
async fn test_bulk_create_reports_partial_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/coupons/bulk"))
        .and(body_json(json!([{"code": "A1", "vendor": "Acme"}, {"code": "A1", "vendor": "Acme"}])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "createdCount": 1,
            "failedCount": 1,
            "errors": [{"message": "Duplicate code A1"}]
        })))
        .mount(&server)
        .await;

    let draft = Coupon {
        code: "A1".into(),
        vendor: "Acme".into(),
        ..Coupon::default()
    };
    let outcome = coupons(&server).bulk_create(&[draft.clone(), draft]).await.unwrap();

    assert_eq!(outcome.summary(), "Created 1, failed 1");
    assert_eq!(outcome.errors, vec!["Duplicate code A1".to_string()]);
}

#[tokio::test]
async fn test_staff_import_sends_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/staff/import"))
        .and(body_string_contains("filename=\"staff.csv\""))
        .and(body_string_contains("name=\"department\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"created": 3, "failed": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source: HttpDataSource<Staff> =
        HttpDataSource::from_settings(&settings(&server, None), "staff", &Session::admin())
            .unwrap();
    let file = FileUpload::new(
        "file",
        "staff.csv",
        "text/csv",
        b"name,email\nRavi,ravi@example.com\n".to_vec(),
    );
    let outcome = source
        .upload(file, vec![("department".to_string(), "Science".to_string())])
        .await
        .unwrap();

    assert_eq!(outcome.created, 3);
    assert!(!outcome.has_failures());
}

#[tokio::test]
async fn test_mentor_scoped_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/mentors/m-7/enrollments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"_id": "e1", "studentName": "Asha", "course": "Physics"}]
        })))
        .mount(&server)
        .await;

    let settings = settings(&server, None);
    let source: HttpDataSource<Enrollment> =
        HttpDataSource::from_settings(&settings, "mentor-enrollments", &Session::mentor("m-7"))
            .unwrap();
    assert_eq!(source.list().await.unwrap().len(), 1);

    let missing = HttpDataSource::<Enrollment>::from_settings(
        &settings,
        "mentor-enrollments",
        &Session::admin(),
    );
    assert!(matches!(
        missing,
        Err(ClientError::Protocol(AppError::MissingSessionValue(_)))
    ));
}
