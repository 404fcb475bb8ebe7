//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain aggregates live
//! next to the repositories that read them.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{movie_reviews, users};

// ---------------------------------------------------------------------------
// Movie review models
// ---------------------------------------------------------------------------

/// Row struct for reading from the movie_reviews table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = movie_reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: i64,
    pub imdb_id: String,
    pub rating: i16,
    pub statement_comment: String,
    pub statement_created_at: DateTime<Utc>,
    pub statement_updated_at: DateTime<Utc>,
    pub reactions: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i32,
}

/// Insertable struct for creating review records.
///
/// Timestamps, reactions and the version come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = movie_reviews)]
pub(crate) struct NewReviewRow<'a> {
    pub imdb_id: &'a str,
    pub rating: i16,
    pub statement_comment: &'a str,
}

/// Changeset for a versioned review update.
///
/// `None` fields are left untouched by Diesel.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = movie_reviews)]
pub(crate) struct ReviewChangeset<'a> {
    pub rating: Option<i16>,
    pub statement_comment: Option<&'a str>,
    pub statement_updated_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
///
/// The password hash is never selected back out.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub profile_handle: String,
    pub location: String,
    pub date_of_birth: NaiveDate,
    pub is_protected: bool,
    pub is_activated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i32,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub profile_handle: &'a str,
    pub password_hash: &'a str,
    pub location: &'a str,
    pub date_of_birth: NaiveDate,
}

/// Changeset for a versioned profile update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub email: Option<&'a str>,
    pub profile_handle: Option<&'a str>,
    pub location: Option<&'a str>,
    pub is_protected: Option<bool>,
    pub updated_at: DateTime<Utc>,
}
