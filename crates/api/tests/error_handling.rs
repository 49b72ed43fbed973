//! Tests for `AppError` -> HTTP response mapping.
//!
//! These tests verify that each error variant produces the documented
//! status code, error code, and message envelope. They do NOT need an
//! HTTP server -- they call `IntoResponse` directly on `AppError` values.

use assert_matches::assert_matches;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

use pitchside_api::error::AppError;
use pitchside_core::error::{CoreError, Precondition};
use pitchside_worker::error::JobError;

/// Helper: convert an `AppError` into its status code and parsed JSON
/// body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: Unauthenticated maps to 401 with UNAUTHENTICATED code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unauthenticated_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthenticated("Missing Authorization header".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHENTICATED");
    assert_eq!(json["error"], "You must be signed in to do this.");
}

// ---------------------------------------------------------------------------
// Test: InvalidArgument maps to 400 with INVALID_ARGUMENT code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_argument_error_returns_400() {
    let err = AppError::Core(CoreError::InvalidArgument(
        "price must be greater than zero".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_ARGUMENT");
    assert_eq!(json["error"], "price must be greater than zero");
}

// ---------------------------------------------------------------------------
// Test: NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Listing",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Listing with id 42 not found");
}

// ---------------------------------------------------------------------------
// Test: PermissionDenied maps to 403 with PERMISSION_DENIED code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn permission_denied_error_returns_403() {
    let err = AppError::Core(CoreError::PermissionDenied(
        "Only the seller can cancel a listing".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "PERMISSION_DENIED");
    assert_eq!(json["error"], "Only the seller can cancel a listing");
}

// ---------------------------------------------------------------------------
// Test: PreconditionFailed maps to 412 with FAILED_PRECONDITION code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn precondition_failed_error_returns_412() {
    let err = AppError::Core(CoreError::PreconditionFailed(Precondition::CardLocked));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::PRECONDITION_FAILED);
    assert_eq!(json["code"], "FAILED_PRECONDITION");
    assert_eq!(json["error"], "Operation rejected: card is locked.");
}

#[tokio::test]
async fn each_precondition_reason_keeps_its_own_message() {
    for (reason, fragment) in [
        (Precondition::ListingNotActive, "not active"),
        (Precondition::OutOfStock, "out of stock"),
        (Precondition::InsufficientBalance, "insufficient"),
        (Precondition::SelfPurchase, "your own listing"),
    ] {
        let err = AppError::Core(CoreError::PreconditionFailed(reason));
        let (status, json) = error_to_response(err).await;

        assert_eq!(status, axum::http::StatusCode::PRECONDITION_FAILED);
        assert!(
            json["error"].as_str().unwrap().contains(fragment),
            "expected {fragment:?} in {:?}",
            json["error"]
        );
    }
}

// ---------------------------------------------------------------------------
// Test: ResourceExhausted maps to 429 and tells the user to wait
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resource_exhausted_error_returns_429_with_wait_message() {
    let err = AppError::Core(CoreError::ResourceExhausted("buy_pack".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json["code"], "RESOURCE_EXHAUSTED");
    assert!(json["error"].as_str().unwrap().contains("Wait"));
}

// ---------------------------------------------------------------------------
// Test: Internal maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::Core(CoreError::Internal(
        "secret database credentials leaked".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: sqlx RowNotFound maps to 404; other db errors map to 500
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sqlx_row_not_found_returns_404() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn other_database_errors_return_500_without_detail() {
    let err = AppError::Database(sqlx::Error::PoolTimedOut);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: JobError converts into the matching AppError variant
// ---------------------------------------------------------------------------

#[test]
fn job_errors_convert_to_matching_app_errors() {
    let err: AppError =
        JobError::Core(CoreError::PreconditionFailed(Precondition::GameweekNotLive)).into();
    assert_matches!(
        err,
        AppError::Core(CoreError::PreconditionFailed(Precondition::GameweekNotLive))
    );

    let err: AppError = JobError::Database(sqlx::Error::PoolTimedOut).into();
    assert_matches!(err, AppError::Database(_));
}
