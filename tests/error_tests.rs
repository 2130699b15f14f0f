use axum::{
    http::StatusCode,
    response::IntoResponse,
};
use http_body_util::BodyExt;
use sea_orm::DbErr;
use serde_json::Value;
use startuplens::error::AppError;

// Test for AppError Display implementation
#[test]
fn test_app_error_display() {
    let error1 = AppError::Validation("missing required fields: name".to_string());
    assert_eq!(error1.to_string(), "Invalid request: missing required fields: name");

    let error2 = AppError::NotFound("startup 42".to_string());
    assert_eq!(error2.to_string(), "Not found: startup 42");

    let error3 = AppError::ConfirmationMismatch("names differ".to_string());
    assert_eq!(error3.to_string(), "Confirmation mismatch: names differ");

    let error4 = AppError::Connection("refused".to_string());
    assert_eq!(error4.to_string(), "Store unavailable: refused");
}

// Test for AppError IntoResponse implementation
#[tokio::test]
async fn test_app_error_into_response() {
    let cases = [
        (AppError::Validation("bad".to_string()), StatusCode::BAD_REQUEST, "Invalid request: bad"),
        (AppError::NotFound("x".to_string()), StatusCode::NOT_FOUND, "Not found: x"),
        (
            AppError::ConfirmationMismatch("x".to_string()),
            StatusCode::CONFLICT,
            "Confirmation mismatch: x",
        ),
        (
            AppError::Connection("down".to_string()),
            StatusCode::SERVICE_UNAVAILABLE,
            "Store unavailable: down",
        ),
        (
            AppError::Internal("boom".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error: boom",
        ),
    ];

    for (error, expected_status, expected_message) in cases {
        let response = error.into_response();
        assert_eq!(response.status(), expected_status);

        let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], expected_message);
    }
}

#[test]
fn test_db_errors_are_classified() {
    let err: AppError = DbErr::RecordNotFound("startup".to_string()).into();
    assert!(matches!(err, AppError::NotFound(_)));

    let err: AppError = DbErr::RecordNotUpdated.into();
    assert!(matches!(err, AppError::NotFound(_)));

    let err: AppError = DbErr::Custom("constraint".to_string()).into();
    assert!(matches!(err, AppError::Internal(_)));
}

#[tokio::test]
async fn test_unreachable_store_is_a_connection_error() {
    let options = sea_orm::ConnectOptions::new("sqlite:///nonexistent-dir/for-sure/startups.sqlite");
    let err = startuplens::store::StartupStore::connect(options)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Connection(_)), "{err:?}");
}
