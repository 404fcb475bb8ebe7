//! Tests for review API handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use pagination::Metadata;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::ReviewPage;
use crate::domain::{
    EDIT_CONFLICT_MESSAGE, ErrorCode, NOT_FOUND_MESSAGE, ReactionMap, Statement, Version,
};
use crate::inbound::http::test_utils::{MockPorts, fixture_now, test_app};

fn review_id(value: i64) -> ReviewId {
    ReviewId::new(value).expect("positive id")
}

#[fixture]
fn stored_review() -> Review {
    let at = fixture_now();
    Review {
        id: review_id(1),
        imdb_id: ImdbId::new("tt0111161").expect("imdb id"),
        rating: Rating::new(4).expect("rating"),
        statement: Statement {
            comment: StatementComment::new("Hope is a good thing.").expect("comment"),
            created_at: at,
            updated_at: at,
        },
        reactions: ReactionMap::new(),
        created_at: at,
        updated_at: at,
        version: Version::INITIAL,
    }
}

async fn call(ports: MockPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports.into_state())).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

fn message(body: &Value) -> Option<&str> {
    body.get("message").and_then(Value::as_str)
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_record_and_location() {
    let mut ports = MockPorts::default();
    ports
        .reviews
        .expect_create()
        .withf(|review| {
            review.imdb_id.as_str() == "tt0111161"
                && review.rating.get() == 5
                && review.statement_comment.as_str() == "Hope is a good thing."
        })
        .times(1)
        .return_once(|_| {
            Ok(CreatedRecord {
                id: review_id(9),
                created_at: fixture_now(),
                version: Version::INITIAL,
            })
        });

    let app = actix_test::init_service(test_app(ports.into_state())).await;
    let request = actix_test::TestRequest::post()
        .uri("/v1/reviews")
        .set_payload(
            r#"{"imdb_id":"tt0111161","rating":5,"statement_comment":"Hope is a good thing."}"#,
        )
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/v1/reviews/9")
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({"review": {"id": 9, "created_at": "2026-10-17T12:00:00Z", "version": 1}})
    );
}

#[rstest]
#[actix_web::test]
async fn create_reports_every_invalid_field() {
    let request = actix_test::TestRequest::post()
        .uri("/v1/reviews")
        .set_payload(r#"{"rating": 9}"#);

    let (status, body) = call(MockPorts::default(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.get("code"), Some(&json!("unprocessable_entity")));
    assert_eq!(
        body.get("details"),
        Some(&json!({
            "imdb_id": "must be provided",
            "rating": "must be at most equal to 5",
            "statement_comment": "must be provided"
        }))
    );
}

#[rstest]
#[case(r#"{"imdb_id":"tt1","title":"x"}"#, "body contains unknown field \"title\"")]
#[case("", "body must not be empty")]
#[case(r#"{"imdb_id":"tt1"}{"imdb_id":"tt2"}"#, "body must contain a single JSON value")]
#[actix_web::test]
async fn create_rejects_malformed_bodies(#[case] payload: &'static str, #[case] expected: &str) {
    let request = actix_test::TestRequest::post()
        .uri("/v1/reviews")
        .set_payload(payload);

    let (status, body) = call(MockPorts::default(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), Some(expected));
}

#[rstest]
#[actix_web::test]
async fn create_rejects_oversized_bodies() {
    let payload = format!(r#"{{"statement_comment":"{}"}}"#, "a".repeat(3000));
    let request = actix_test::TestRequest::post()
        .uri("/v1/reviews")
        .set_payload(payload);

    let (status, body) = call(MockPorts::default(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        message(&body),
        Some("body must not be larger than 2048 bytes")
    );
}

#[rstest]
#[actix_web::test]
async fn create_maps_duplicate_imdb_id_to_conflict() {
    let mut ports = MockPorts::default();
    ports
        .reviews
        .expect_create()
        .return_once(|_| Err(Error::conflict("a review for this imdb_id already exists")));
    let request = actix_test::TestRequest::post()
        .uri("/v1/reviews")
        .set_payload(r#"{"imdb_id":"tt0111161","rating":3,"statement_comment":"Again."}"#);

    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        message(&body),
        Some("a review for this imdb_id already exists")
    );
}

#[rstest]
#[actix_web::test]
async fn list_returns_reviews_with_metadata(stored_review: Review) {
    let mut ports = MockPorts::default();
    ports
        .reviews_query
        .expect_list()
        .withf(|request| request.page() == 2 && request.page_size() == 1)
        .times(1)
        .return_once(move |_| {
            Ok(ReviewPage {
                reviews: vec![stored_review],
                metadata: Metadata {
                    current_page: 2,
                    page_size: 1,
                    first_page: 1,
                    last_page: 3,
                    total_records: 3,
                },
            })
        });
    let request = actix_test::TestRequest::get().uri("/v1/reviews?page=2&page_size=1");

    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.pointer("/reviews/0/imdb_id"),
        Some(&json!("tt0111161"))
    );
    assert_eq!(
        body.pointer("/reviews/0/statement/comment"),
        Some(&json!("Hope is a good thing."))
    );
    assert_eq!(
        body.get("metadata"),
        Some(&json!({
            "current_page": 2,
            "page_size": 1,
            "first_page": 1,
            "last_page": 3,
            "total_records": 3
        }))
    );
}

#[rstest]
#[actix_web::test]
async fn list_of_empty_collection_has_empty_metadata() {
    let mut ports = MockPorts::default();
    ports.reviews_query.expect_list().return_once(|_| {
        Ok(ReviewPage {
            reviews: Vec::new(),
            metadata: Metadata::default(),
        })
    });

    let (status, body) = call(ports, actix_test::TestRequest::get().uri("/v1/reviews")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"reviews": [], "metadata": {}}));
}

#[rstest]
#[case("/v1/reviews?page=abc", json!({"page": "must be an integer"}))]
#[case("/v1/reviews?page_size=500", json!({"page_size": "must be a maximum of 100"}))]
#[case("/v1/reviews?page=0&page_size=0", json!({"page": "must be greater than zero", "page_size": "must be greater than zero"}))]
#[actix_web::test]
async fn list_rejects_invalid_paging(#[case] uri: &str, #[case] details: Value) {
    let (status, body) = call(MockPorts::default(), actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.get("details"), Some(&details));
}

#[rstest]
#[case("/v1/reviews/abc")]
#[case("/v1/reviews/0")]
#[case("/v1/reviews/-2")]
#[actix_web::test]
async fn show_rejects_invalid_ids(#[case] uri: &str) {
    let (status, body) = call(MockPorts::default(), actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), Some("invalid id parameter"));
}

#[rstest]
#[actix_web::test]
async fn show_returns_review(stored_review: Review) {
    let mut ports = MockPorts::default();
    ports
        .reviews_query
        .expect_fetch()
        .withf(|id| id.get() == 1)
        .return_once(move |_| Ok(stored_review));

    let (status, body) =
        call(ports, actix_test::TestRequest::get().uri("/v1/reviews/1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.pointer("/review/rating"), Some(&json!(4)));
    assert_eq!(body.pointer("/review/version"), Some(&json!(1)));
}

#[rstest]
#[actix_web::test]
async fn show_maps_missing_review_to_not_found() {
    let mut ports = MockPorts::default();
    ports
        .reviews_query
        .expect_fetch()
        .return_once(|_| Err(Error::not_found(NOT_FOUND_MESSAGE)));

    let (status, body) =
        call(ports, actix_test::TestRequest::get().uri("/v1/reviews/44")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.get("code"), Some(&json!("not_found")));
    assert_eq!(message(&body), Some(NOT_FOUND_MESSAGE));
}

#[rstest]
#[actix_web::test]
async fn update_checks_against_version_read_first(stored_review: Review) {
    let mut ports = MockPorts::default();
    ports
        .reviews
        .expect_current_version()
        .withf(|id| id.get() == 1)
        .times(1)
        .return_once(|_| Ok(Version::new(3)));
    let updated = Review {
        rating: Rating::new(5).expect("rating"),
        version: Version::new(4),
        ..stored_review
    };
    ports
        .reviews
        .expect_update()
        .withf(|request| {
            request.expected_version == Version::new(3)
                && request.changes.rating().map(Rating::get) == Some(5)
                && request.changes.statement_comment().is_none()
        })
        .times(1)
        .return_once(move |_| Ok(updated));
    let request = actix_test::TestRequest::patch()
        .uri("/v1/reviews/1")
        .set_payload(r#"{"rating":5}"#);

    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.pointer("/review/rating"), Some(&json!(5)));
    assert_eq!(body.pointer("/review/version"), Some(&json!(4)));
}

#[rstest]
#[case(r#"{}"#, StatusCode::BAD_REQUEST, "no updatable fields were provided")]
#[case(r#"{"rating":0}"#, StatusCode::UNPROCESSABLE_ENTITY, "failed validation")]
#[case(r#"{"imdb_id":"tt2"}"#, StatusCode::BAD_REQUEST, "body contains unknown field \"imdb_id\"")]
#[actix_web::test]
async fn update_rejects_unusable_bodies(
    #[case] payload: &'static str,
    #[case] expected_status: StatusCode,
    #[case] expected_message: &str,
) {
    let mut ports = MockPorts::default();
    ports
        .reviews
        .expect_current_version()
        .return_once(|_| Ok(Version::INITIAL));
    let request = actix_test::TestRequest::patch()
        .uri("/v1/reviews/1")
        .set_payload(payload);

    let (status, body) = call(ports, request).await;

    assert_eq!(status, expected_status);
    assert_eq!(message(&body), Some(expected_message));
}

#[rstest]
#[actix_web::test]
async fn update_of_missing_review_skips_body() {
    let mut ports = MockPorts::default();
    ports
        .reviews
        .expect_current_version()
        .return_once(|_| Err(Error::not_found(NOT_FOUND_MESSAGE)));
    let request = actix_test::TestRequest::patch()
        .uri("/v1/reviews/8")
        .set_payload("not json");

    let (status, _) = call(ports, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn update_reports_edit_conflict() {
    let mut ports = MockPorts::default();
    ports
        .reviews
        .expect_current_version()
        .return_once(|_| Ok(Version::INITIAL));
    ports
        .reviews
        .expect_update()
        .return_once(|_| Err(Error::conflict(EDIT_CONFLICT_MESSAGE)));
    let request = actix_test::TestRequest::patch()
        .uri("/v1/reviews/1")
        .set_payload(r#"{"statement_comment":"great"}"#);

    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(message(&body), Some(EDIT_CONFLICT_MESSAGE));
}

#[rstest]
#[actix_web::test]
async fn delete_confirms_removal() {
    let mut ports = MockPorts::default();
    ports
        .reviews
        .expect_delete()
        .withf(|id| id.get() == 5)
        .times(1)
        .return_once(|_| Ok(()));

    let (status, body) =
        call(ports, actix_test::TestRequest::delete().uri("/v1/reviews/5")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": REVIEW_DELETED_MESSAGE}));
}

#[rstest]
#[actix_web::test]
async fn delete_of_missing_review_is_not_found() {
    let mut ports = MockPorts::default();
    ports
        .reviews
        .expect_delete()
        .return_once(|_| Err(Error::not_found(NOT_FOUND_MESSAGE)));

    let (status, body) =
        call(ports, actix_test::TestRequest::delete().uri("/v1/reviews/5")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), Some(NOT_FOUND_MESSAGE));
}

#[rstest]
#[actix_web::test]
async fn internal_failures_are_redacted() {
    let mut ports = MockPorts::default();
    ports
        .reviews_query
        .expect_fetch()
        .return_once(|_| Err(Error::internal("review repository find_by_id timed out")));

    let (status, body) =
        call(ports, actix_test::TestRequest::get().uri("/v1/reviews/1")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.get("code"), Some(&json!(ErrorCode::InternalError)));
    assert_eq!(message(&body), Some("Internal server error"));
}

#[rstest]
#[actix_web::test]
async fn unsupported_method_is_rejected() {
    let (status, body) = call(
        MockPorts::default(),
        actix_test::TestRequest::put().uri("/v1/reviews/1"),
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        message(&body),
        Some("the PUT method is not supported for this resource")
    );
}

#[rstest]
#[actix_web::test]
async fn unknown_route_is_not_found() {
    let (status, body) = call(
        MockPorts::default(),
        actix_test::TestRequest::get().uri("/v1/films"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), Some(NOT_FOUND_MESSAGE));
}
