//! PostgreSQL-backed `ReviewRepository` implementation using Diesel ORM.
//!
//! Updates are compare-and-swap writes on `(id, version)`: the predicate
//! carries the version the caller read, so a write that matches no row lost
//! a race (or targeted a deleted review) and is reported as an edit conflict.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::BigInt;
use diesel_async::RunQueryDsl;
use pagination::{Metadata, PageRequest};

use crate::domain::ports::{ReviewPage, ReviewRepository, ReviewRepositoryError};
use crate::domain::{
    CreatedRecord, ImdbId, NewReview, Rating, ReactionMap, Review, ReviewChanges, ReviewId,
    Statement, StatementComment, Version,
};

use super::diesel_helpers::{
    DEFAULT_QUERY_TIMEOUT, cast_count, cast_version, cast_version_for_db, log_diesel_error,
    pool_error_message, with_deadline,
};
use super::models::{NewReviewRow, ReviewChangeset, ReviewRow};
use super::pool::{DbPool, PoolError};
use super::schema::movie_reviews;

/// Diesel-backed implementation of the `ReviewRepository` port.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
    query_timeout: Duration,
}

impl DieselReviewRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Override the per-call deadline.
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }
}

fn map_pool_error(error: PoolError) -> ReviewRepositoryError {
    ReviewRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: DieselError, operation: &'static str) -> ReviewRepositoryError {
    log_diesel_error(&error, operation);

    match error {
        DieselError::NotFound => ReviewRepositoryError::not_found(),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ReviewRepositoryError::duplicate_imdb_id()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ReviewRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => ReviewRepositoryError::query(info.message()),
        DieselError::DeserializationError(err) => {
            ReviewRepositoryError::query(format!("row decode failed: {err}"))
        }
        other => ReviewRepositoryError::query(other.to_string()),
    }
}

fn map_timeout(operation: &'static str) -> ReviewRepositoryError {
    ReviewRepositoryError::timeout(operation)
}

fn decode_error(field: &str, err: impl std::fmt::Display) -> ReviewRepositoryError {
    ReviewRepositoryError::query(format!("stored {field} is invalid: {err}"))
}

/// Convert a database row into a domain review.
///
/// Rows that violate domain constraints (a rating outside 1-5, malformed
/// reactions) are reported as query errors.
fn row_to_review(row: ReviewRow) -> Result<Review, ReviewRepositoryError> {
    let id = ReviewId::new(row.id).map_err(|err| decode_error("id", err))?;
    let imdb_id = ImdbId::new(row.imdb_id).map_err(|err| decode_error("imdb_id", err))?;
    let rating =
        Rating::new(i64::from(row.rating)).map_err(|err| decode_error("rating", err))?;
    let comment = StatementComment::new(row.statement_comment)
        .map_err(|err| decode_error("statement_comment", err))?;
    let reactions: ReactionMap =
        serde_json::from_value(row.reactions).map_err(|err| decode_error("reactions", err))?;

    Ok(Review {
        id,
        imdb_id,
        rating,
        statement: Statement {
            comment,
            created_at: row.statement_created_at,
            updated_at: row.statement_updated_at,
        },
        reactions,
        created_at: row.created_at,
        updated_at: row.updated_at,
        version: Version::new(cast_version(row.version)),
    })
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn insert(
        &self,
        review: &NewReview,
    ) -> Result<CreatedRecord<ReviewId>, ReviewRepositoryError> {
        let row = NewReviewRow {
            imdb_id: review.imdb_id.as_str(),
            rating: review.rating.get(),
            statement_comment: review.statement_comment.as_str(),
        };

        with_deadline(self.query_timeout, "insert", map_timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let (id, created_at, version) = diesel::insert_into(movie_reviews::table)
                .values(&row)
                .returning((
                    movie_reviews::id,
                    movie_reviews::created_at,
                    movie_reviews::version,
                ))
                .get_result::<(i64, chrono::DateTime<Utc>, i32)>(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "insert"))?;

            Ok(CreatedRecord {
                id: ReviewId::new(id)
                    .map_err(|err| ReviewRepositoryError::query(err.to_string()))?,
                created_at,
                version: Version::new(cast_version(version)),
            })
        })
        .await
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Review, ReviewRepositoryError> {
        with_deadline(self.query_timeout, "find", map_timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = movie_reviews::table
                .find(id.get())
                .select(ReviewRow::as_select())
                .first(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "find"))?;
            row_to_review(row)
        })
        .await
    }

    async fn version_for(&self, id: ReviewId) -> Result<Version, ReviewRepositoryError> {
        with_deadline(self.query_timeout, "version lookup", map_timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let version: i32 = movie_reviews::table
                .find(id.get())
                .select(movie_reviews::version)
                .first(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "version lookup"))?;
            Ok(Version::new(cast_version(version)))
        })
        .await
    }

    async fn update(
        &self,
        id: ReviewId,
        expected: Version,
        changes: &ReviewChanges,
    ) -> Result<Review, ReviewRepositoryError> {
        let now = Utc::now();
        let comment = changes.statement_comment().map(StatementComment::as_str);
        let changeset = ReviewChangeset {
            rating: changes.rating().map(Rating::get),
            statement_comment: comment,
            statement_updated_at: comment.map(|_| now),
            updated_at: now,
        };

        with_deadline(self.query_timeout, "update", map_timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = diesel::update(movie_reviews::table)
                .filter(
                    movie_reviews::id
                        .eq(id.get())
                        .and(movie_reviews::version.eq(cast_version_for_db(expected.get()))),
                )
                .set((
                    &changeset,
                    movie_reviews::version.eq(movie_reviews::version + 1),
                ))
                .returning(ReviewRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| map_diesel_error(err, "update"))?;

            // Zero rows: stale version or a concurrently deleted review.
            let Some(row) = row else {
                return Err(ReviewRepositoryError::edit_conflict());
            };
            row_to_review(row)
        })
        .await
    }

    async fn delete(&self, id: ReviewId) -> Result<(), ReviewRepositoryError> {
        with_deadline(self.query_timeout, "delete", map_timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let deleted = diesel::delete(movie_reviews::table.find(id.get()))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "delete"))?;
            if deleted == 0 {
                return Err(ReviewRepositoryError::not_found());
            }
            Ok(())
        })
        .await
    }

    async fn list(&self, page: PageRequest) -> Result<ReviewPage, ReviewRepositoryError> {
        with_deadline(self.query_timeout, "list", map_timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;

            let total_records: i64 = movie_reviews::table
                .count()
                .get_result(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "count"))?;

            let rows: Vec<(i64, ReviewRow)> = movie_reviews::table
                .select((sql::<BigInt>("count(*) OVER()"), ReviewRow::as_select()))
                .order_by(movie_reviews::updated_at.desc())
                .then_order_by(movie_reviews::id.desc())
                .limit(page.limit())
                .offset(page.offset())
                .load(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "list"))?;

            let total_paginated = rows.as_slice().first().map_or(0, |(count, _)| *count);
            let reviews = rows
                .into_iter()
                .map(|(_, row)| row_to_review(row))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(ReviewPage {
                reviews,
                metadata: Metadata::compute(
                    cast_count(total_paginated),
                    cast_count(total_records),
                    page,
                ),
            })
        })
        .await
    }
}
