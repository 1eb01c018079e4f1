//! Tests for mapping domain errors onto HTTP responses.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, web};
use plinth_domain::validate;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use validator::Validate;

#[fixture]
fn field_scoped_error() -> DomainError {
    DomainError::bad_request("msg").with_field_error("email", "invalid")
}

async fn body_json(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("response body to bytes");
    serde_json::from_slice(&bytes).expect("body deserialises")
}

#[rstest]
#[actix_web::test]
async fn bad_request_with_field_errors_maps_to_400(field_scoped_error: DomainError) {
    let api_error = ApiError::from(field_scoped_error);

    assert_eq!(api_error.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(api_error.error_response()).await,
        json!({
            "message": "msg",
            "errors": [{ "field": "email", "message": "invalid" }],
        })
    );
}

#[rstest]
#[actix_web::test]
async fn not_found_maps_to_404_with_null_errors() {
    let api_error = ApiError::from(DomainError::not_found("not found"));

    assert_eq!(api_error.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(api_error.error_response()).await,
        json!({ "message": "not found", "errors": null })
    );
}

#[rstest]
fn forbidden_maps_to_403() {
    let api_error = ApiError::from(DomainError::forbidden("no access"));

    assert_eq!(api_error.status(), StatusCode::FORBIDDEN);
    assert_eq!(api_error.message(), "no access");
    assert!(api_error.field_errors().is_none());
}

#[rstest]
fn bad_request_without_field_errors_has_null_errors() {
    let api_error = ApiError::from(DomainError::bad_request("malformed"));

    assert_eq!(api_error.status(), StatusCode::BAD_REQUEST);
    assert!(api_error.field_errors().is_none());
}

#[rstest]
fn invalid_argument_maps_to_400_with_null_errors() {
    let invalid = validate::valid_email("email", "nope").expect_err("malformed address rejected");

    let api_error = ApiError::from(invalid);

    assert_eq!(api_error.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        api_error.message(),
        "field [email='nope'] is not a valid email address"
    );
    assert!(api_error.field_errors().is_none());
}

#[derive(Debug, Validate)]
struct SignUp {
    #[validate(length(min = 1, message = "must not be empty"))]
    name: String,
    #[validate(range(min = 1, message = "must be positive"))]
    age: u32,
}

#[rstest]
fn declarative_validation_failure_lists_every_field() {
    let payload = SignUp {
        name: String::new(),
        age: 0,
    };
    let failures = payload.validate().expect_err("both fields invalid");

    let api_error = ApiError::from(failures);

    assert_eq!(api_error.status(), StatusCode::BAD_REQUEST);
    assert_eq!(api_error.message(), "Validation failed");
    let errors = api_error.field_errors().expect("field errors present");
    // Sorted by field name for a deterministic response.
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, ["age", "name"]);
    assert!(errors.iter().any(|e| e.message == "must be positive"));
    assert!(errors.iter().any(|e| e.message == "must not be empty"));
}

#[rstest]
#[actix_web::test]
async fn rendering_twice_produces_the_same_response(field_scoped_error: DomainError) {
    let api_error = ApiError::from(field_scoped_error);

    let first = body_json(api_error.error_response()).await;
    let second = body_json(api_error.error_response()).await;
    assert_eq!(first, second);
}

#[rstest]
#[actix_web::test]
async fn handler_errors_render_the_envelope_end_to_end() {
    async fn handler() -> ApiResult<actix_web::HttpResponse> {
        Err(DomainError::not_found("no such user").into())
    }

    let app =
        actix_web::test::init_service(App::new().route("/users/42", web::get().to(handler))).await;
    let req = actix_web::test::TestRequest::get().uri("/users/42").to_request();
    let res = actix_web::test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_web::test::read_body_json(res).await;
    assert_eq!(body, json!({ "message": "no such user", "errors": null }));
}

#[rstest]
fn envelope_round_trips_through_serde(field_scoped_error: DomainError) {
    let envelope = ApiError::from(field_scoped_error).envelope().clone();

    let serialized = serde_json::to_string(&envelope).expect("envelope serialises");
    let deserialized: ErrorEnvelope =
        serde_json::from_str(&serialized).expect("envelope deserialises");
    assert_eq!(deserialized, envelope);
}
