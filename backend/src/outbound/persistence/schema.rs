//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Movie reviews, one per film.
    movie_reviews (id) {
        /// Primary key.
        id -> Int8,
        /// External film reference; unique (`movie_reviews_imdb_id_key`).
        imdb_id -> Text,
        /// Star rating between 1 and 5.
        rating -> Int2,
        /// Reviewer statement text.
        statement_comment -> Text,
        /// When the statement was first written.
        statement_created_at -> Timestamptz,
        /// When the statement text last changed.
        statement_updated_at -> Timestamptz,
        /// Reaction name to array of reacting user ids.
        reactions -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
        /// Optimistic concurrency token, starting at 1.
        version -> Int4,
    }
}

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Primary key.
        id -> Int8,
        /// Unique e-mail address (`users_email_key`).
        email -> Text,
        /// Unique public handle (`users_profile_handle_key`).
        profile_handle -> Text,
        /// Bcrypt hash of the password.
        password_hash -> Text,
        /// Free-form location.
        location -> Text,
        /// Date of birth.
        date_of_birth -> Date,
        /// Whether the profile is hidden from other users.
        is_protected -> Bool,
        /// Whether the account has been activated.
        is_activated -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
        /// Optimistic concurrency token, starting at 1.
        version -> Int4,
    }
}
