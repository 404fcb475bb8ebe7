//! Movie review API handlers.
//!
//! ```text
//! POST   /v1/reviews {"imdb_id":"tt0111161","rating":5,"statement_comment":"..."}
//! GET    /v1/reviews?page=1&page_size=20
//! GET    /v1/reviews/{id}
//! PATCH  /v1/reviews/{id} {"rating":4}
//! DELETE /v1/reviews/{id}
//! ```

use actix_web::{HttpResponse, http::header, web};
use pagination::Metadata;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::UpdateReviewRequest;
use crate::domain::{
    ApiResult, CreatedRecord, Error, ImdbId, NewReview, Rating, Review, ReviewChanges, ReviewId,
    StatementComment, Validator,
};
use crate::inbound::http::json::read_json;
use crate::inbound::http::schemas::{
    CreatedRecordSchema, ErrorSchema, MessageResponse, MetadataSchema, ReviewSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_page_request, parse_review_id};

/// Confirmation returned by `DELETE /v1/reviews/{id}`.
pub const REVIEW_DELETED_MESSAGE: &str = "review successfully deleted";

/// Request body for `POST /v1/reviews`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateReviewRequest {
    /// Film reference.
    #[schema(example = "tt0111161")]
    pub imdb_id: Option<String>,
    /// Star rating from 1 to 5.
    #[schema(example = 5)]
    pub rating: Option<i64>,
    /// Statement text, at most 280 characters.
    #[schema(example = "Hope is a good thing.")]
    pub statement_comment: Option<String>,
}

impl CreateReviewRequest {
    fn validate(self) -> Result<NewReview, Error> {
        let mut validator = Validator::new();
        let imdb_id = validator.record("imdb_id", ImdbId::new(self.imdb_id.unwrap_or_default()));
        let rating = validator.record("rating", Rating::new(self.rating.unwrap_or_default()));
        let statement_comment = validator.record(
            "statement_comment",
            StatementComment::new(self.statement_comment.unwrap_or_default()),
        );
        match (imdb_id, rating, statement_comment) {
            (Some(imdb_id), Some(rating), Some(statement_comment)) => Ok(NewReview {
                imdb_id,
                rating,
                statement_comment,
            }),
            _ => Err(validator.into_error()),
        }
    }
}

/// Request body for `PATCH /v1/reviews/{id}`; absent fields stay unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateReviewBody {
    /// New star rating.
    #[schema(example = 4)]
    pub rating: Option<i64>,
    /// New statement text.
    pub statement_comment: Option<String>,
}

impl UpdateReviewBody {
    fn validate(self) -> Result<ReviewChanges, Error> {
        let mut validator = Validator::new();
        let rating = self
            .rating
            .and_then(|value| validator.record("rating", Rating::new(value)));
        let statement_comment = self.statement_comment.and_then(|value| {
            validator.record("statement_comment", StatementComment::new(value))
        });
        validator.finish()?;
        ReviewChanges::new(rating, statement_comment)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

/// Query parameters for `GET /v1/reviews`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListReviewsParams {
    /// Page number, starting at 1.
    #[param(example = "1")]
    pub page: Option<String>,
    /// Records per page, at most 100.
    #[param(example = "20")]
    pub page_size: Option<String>,
}

/// Body of `POST /v1/reviews`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedReviewResponse {
    /// Store-assigned fields of the new review.
    #[schema(value_type = CreatedRecordSchema)]
    pub review: CreatedRecord<ReviewId>,
}

/// Body of single-review responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    /// The review.
    #[schema(value_type = ReviewSchema)]
    pub review: Review,
}

/// Body of `GET /v1/reviews`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewListResponse {
    /// Reviews on the requested page, newest first.
    #[schema(value_type = Vec<ReviewSchema>)]
    pub reviews: Vec<Review>,
    /// Pagination summary.
    #[schema(value_type = MetadataSchema)]
    pub metadata: Metadata,
}

/// Create a review.
#[utoipa::path(
    post,
    path = "/v1/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = CreatedReviewResponse,
            headers(("Location" = String, description = "URI of the new review"))),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 409, description = "A review for this imdb_id already exists", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "createReview"
)]
pub async fn create_review(
    state: web::Data<HttpState>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let request: CreateReviewRequest = read_json(payload).await?;
    let review = request.validate()?;
    let created = state.reviews.create(review).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/v1/reviews/{}", created.id)))
        .json(CreatedReviewResponse { review: created }))
}

/// List reviews newest first.
#[utoipa::path(
    get,
    path = "/v1/reviews",
    params(ListReviewsParams),
    responses(
        (status = 200, description = "One page of reviews", body = ReviewListResponse),
        (status = 422, description = "Invalid page or page_size", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "listReviews"
)]
pub async fn list_reviews(
    state: web::Data<HttpState>,
    params: web::Query<ListReviewsParams>,
) -> ApiResult<web::Json<ReviewListResponse>> {
    let ListReviewsParams { page, page_size } = params.into_inner();
    let request = parse_page_request(page.as_deref(), page_size.as_deref())?;
    let listing = state.reviews_query.list(request).await?;
    Ok(web::Json(ReviewListResponse {
        reviews: listing.reviews,
        metadata: listing.metadata,
    }))
}

/// Fetch one review.
#[utoipa::path(
    get,
    path = "/v1/reviews/{id}",
    params(("id" = i64, Path, description = "Review identifier")),
    responses(
        (status = 200, description = "The review", body = ReviewResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "showReview"
)]
pub async fn show_review(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ReviewResponse>> {
    let id = parse_review_id(&path)?;
    let review = state.reviews_query.fetch(id).await?;
    Ok(web::Json(ReviewResponse { review }))
}

/// Apply a partial update guarded by the review's version.
///
/// The version is captured before the body is read, so an edit that lands
/// in between is reported as a conflict.
#[utoipa::path(
    patch,
    path = "/v1/reviews/{id}",
    params(("id" = i64, Path, description = "Review identifier")),
    request_body = UpdateReviewBody,
    responses(
        (status = 200, description = "Updated review", body = ReviewResponse),
        (status = 400, description = "Invalid id, malformed body or no fields", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Edit conflict", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "updateReview"
)]
pub async fn update_review(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Payload,
) -> ApiResult<web::Json<ReviewResponse>> {
    let id = parse_review_id(&path)?;
    let expected_version = state.reviews.current_version(id).await?;
    let body: UpdateReviewBody = read_json(payload).await?;
    let changes = body.validate()?;
    let review = state
        .reviews
        .update(UpdateReviewRequest {
            id,
            expected_version,
            changes,
        })
        .await?;
    Ok(web::Json(ReviewResponse { review }))
}

/// Delete a review.
#[utoipa::path(
    delete,
    path = "/v1/reviews/{id}",
    params(("id" = i64, Path, description = "Review identifier")),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "deleteReview"
)]
pub async fn delete_review(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_review_id(&path)?;
    state.reviews.delete(id).await?;
    Ok(web::Json(MessageResponse {
        message: REVIEW_DELETED_MESSAGE.to_owned(),
    }))
}

#[cfg(test)]
#[path = "reviews_tests.rs"]
mod tests;
