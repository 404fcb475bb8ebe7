//! Port abstraction for movie review persistence adapters and their errors.
//!
//! Writes are guarded by the review's [`Version`]: adapters must apply an
//! update only when the stored version equals the expected one and report
//! every other outcome as [`ReviewRepositoryError::EditConflict`].

use async_trait::async_trait;
use pagination::{Metadata, PageRequest};

use crate::domain::{CreatedRecord, NewReview, Review, ReviewChanges, ReviewId, Version};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by review repository adapters.
    pub enum ReviewRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "review repository query failed: {message}",
        /// The operation did not finish within the configured deadline.
        Timeout { operation: String } => "review repository {operation} timed out",
        /// No review exists with the requested identifier.
        NotFound => "review not found",
        /// The stored version no longer matches the expected one.
        EditConflict => "review was modified by another request",
        /// Another review already references the same film.
        DuplicateImdbId => "a review for this imdb_id already exists",
    }
}

/// One page of reviews with its listing metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPage {
    /// Reviews ordered by most recent update first.
    pub reviews: Vec<Review>,
    /// Summary of the whole collection.
    pub metadata: Metadata,
}

/// Driven port for review storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persist a new review at [`Version::INITIAL`].
    async fn insert(&self, review: &NewReview)
    -> Result<CreatedRecord<ReviewId>, ReviewRepositoryError>;

    /// Load one review.
    async fn find_by_id(&self, id: ReviewId) -> Result<Review, ReviewRepositoryError>;

    /// Read the current version of a review.
    async fn version_for(&self, id: ReviewId) -> Result<Version, ReviewRepositoryError>;

    /// Apply `changes` when the stored version equals `expected`, returning
    /// the reloaded review.
    async fn update(
        &self,
        id: ReviewId,
        expected: Version,
        changes: &ReviewChanges,
    ) -> Result<Review, ReviewRepositoryError>;

    /// Remove a review regardless of its version.
    async fn delete(&self, id: ReviewId) -> Result<(), ReviewRepositoryError>;

    /// Fetch one page ordered by `updated_at` descending.
    async fn list(&self, page: PageRequest) -> Result<ReviewPage, ReviewRepositoryError>;
}
