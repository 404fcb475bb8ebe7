//! Driving ports for review mutations and reads.
//!
//! Inbound adapters call these traits; the domain service implements them
//! and maps repository failures onto [`Error`].

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{CreatedRecord, Error, NewReview, Review, ReviewChanges, ReviewId, Version};

use super::ReviewPage;

/// Versioned update of a single review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReviewRequest {
    /// Review to change.
    pub id: ReviewId,
    /// Version the caller read before submitting changes.
    pub expected_version: Version,
    /// Submitted fields.
    pub changes: ReviewChanges,
}

/// Write-side operations on reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewsCommand: Send + Sync {
    /// Store a new review.
    async fn create(&self, review: NewReview) -> Result<CreatedRecord<ReviewId>, Error>;

    /// Capture the version an edit will be checked against.
    async fn current_version(&self, id: ReviewId) -> Result<Version, Error>;

    /// Apply a versioned update.
    async fn update(&self, request: UpdateReviewRequest) -> Result<Review, Error>;

    /// Remove a review.
    async fn delete(&self, id: ReviewId) -> Result<(), Error>;
}

/// Read-side operations on reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewsQuery: Send + Sync {
    /// Load one review.
    async fn fetch(&self, id: ReviewId) -> Result<Review, Error>;

    /// Load one page of reviews with metadata.
    async fn list(&self, page: PageRequest) -> Result<ReviewPage, Error>;
}
