//! Movie review domain service.
//!
//! Implements the review driving ports on top of a [`ReviewRepository`] and
//! turns store failures into transport-agnostic [`Error`] values. Storage
//! faults are logged here and surface as internal errors.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;
use tracing::error;

use crate::domain::ports::{
    ReviewPage, ReviewRepository, ReviewRepositoryError, ReviewsCommand, ReviewsQuery,
    UpdateReviewRequest,
};
use crate::domain::{CreatedRecord, Error, NewReview, Review, ReviewId, Version};

/// Message returned when a record does not exist.
pub const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";
/// Message returned when a versioned write loses the race.
pub const EDIT_CONFLICT_MESSAGE: &str =
    "unable to update the record due to an edit conflict, please try again";

fn map_repository_error(err: ReviewRepositoryError) -> Error {
    match err {
        ReviewRepositoryError::NotFound => Error::not_found(NOT_FOUND_MESSAGE),
        ReviewRepositoryError::EditConflict => Error::conflict(EDIT_CONFLICT_MESSAGE),
        ReviewRepositoryError::DuplicateImdbId => Error::conflict(err.to_string()),
        ReviewRepositoryError::Connection { .. }
        | ReviewRepositoryError::Query { .. }
        | ReviewRepositoryError::Timeout { .. } => {
            error!(error = %err, "review repository failure");
            Error::internal(err.to_string())
        }
    }
}

/// Review service implementing [`ReviewsCommand`] and [`ReviewsQuery`].
#[derive(Clone)]
pub struct ReviewService<R> {
    review_repo: Arc<R>,
}

impl<R> ReviewService<R> {
    /// Create a new service backed by `review_repo`.
    pub fn new(review_repo: Arc<R>) -> Self {
        Self { review_repo }
    }
}

#[async_trait]
impl<R> ReviewsCommand for ReviewService<R>
where
    R: ReviewRepository,
{
    async fn create(&self, review: NewReview) -> Result<CreatedRecord<ReviewId>, Error> {
        self.review_repo
            .insert(&review)
            .await
            .map_err(map_repository_error)
    }

    async fn current_version(&self, id: ReviewId) -> Result<Version, Error> {
        self.review_repo
            .version_for(id)
            .await
            .map_err(map_repository_error)
    }

    async fn update(&self, request: UpdateReviewRequest) -> Result<Review, Error> {
        self.review_repo
            .update(request.id, request.expected_version, &request.changes)
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, id: ReviewId) -> Result<(), Error> {
        self.review_repo
            .delete(id)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> ReviewsQuery for ReviewService<R>
where
    R: ReviewRepository,
{
    async fn fetch(&self, id: ReviewId) -> Result<Review, Error> {
        self.review_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }

    async fn list(&self, page: PageRequest) -> Result<ReviewPage, Error> {
        self.review_repo
            .list(page)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "review_service_tests.rs"]
mod tests;
