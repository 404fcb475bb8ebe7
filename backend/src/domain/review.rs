//! Movie review aggregate and its validated components.
//!
//! Every public review field is a newtype that can only be built through a
//! validating constructor, so a [`Review`] held by the domain always satisfies
//! the storage constraints.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest statement comment accepted, in Unicode scalar values.
pub const STATEMENT_COMMENT_MAX: usize = 280;
/// Lowest rating a review may carry.
pub const RATING_MIN: i64 = 1;
/// Highest rating a review may carry.
pub const RATING_MAX: i64 = 5;

/// Validation failures for review fields.
///
/// The display text is the client-facing per-field message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewValidationError {
    /// Identifiers start at one.
    #[error("invalid id parameter")]
    InvalidId,
    /// `imdb_id` was blank.
    #[error("must be provided")]
    EmptyImdbId,
    /// `rating` was below [`RATING_MIN`].
    #[error("must be greater than zero")]
    RatingTooLow,
    /// `rating` was above [`RATING_MAX`].
    #[error("must be at most equal to 5")]
    RatingTooHigh,
    /// `statement_comment` was empty.
    #[error("must be provided")]
    EmptyComment,
    /// `statement_comment` was longer than [`STATEMENT_COMMENT_MAX`].
    #[error("must not have more than {max} characters")]
    CommentTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

/// Store-assigned review identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ReviewId(i64);

impl ReviewId {
    /// Validate an identifier taken from a path or a row.
    ///
    /// # Examples
    /// ```
    /// use cinepulse::domain::ReviewId;
    ///
    /// assert!(ReviewId::new(0).is_err());
    /// assert_eq!(ReviewId::new(7).map(|id| id.get()), Ok(7));
    /// ```
    pub fn new(id: i64) -> Result<Self, ReviewValidationError> {
        if id < 1 {
            return Err(ReviewValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for ReviewId {
    type Error = ReviewValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReviewId> for i64 {
    fn from(value: ReviewId) -> Self {
        value.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optimistic concurrency token shared by reviews and users.
///
/// Starts at one and grows by exactly one per successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u32);

impl Version {
    /// Version of a freshly inserted record.
    pub const INITIAL: Self = Self(1);

    /// Wrap a raw version value.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw version value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Version a successful write produces.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// External film reference, such as `tt0111161`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImdbId(String);

impl ImdbId {
    /// Validate a reference, which must contain non-whitespace characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ReviewValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ReviewValidationError::EmptyImdbId);
        }
        Ok(Self(raw))
    }

    /// Borrow the reference.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for ImdbId {
    type Error = ReviewValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImdbId> for String {
    fn from(value: ImdbId) -> Self {
        value.0
    }
}

/// Star rating between [`RATING_MIN`] and [`RATING_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i16")]
pub struct Rating(i16);

impl Rating {
    /// Validate a raw rating.
    ///
    /// # Examples
    /// ```
    /// use cinepulse::domain::Rating;
    ///
    /// assert!(Rating::new(0).is_err());
    /// assert!(Rating::new(6).is_err());
    /// assert_eq!(Rating::new(4).map(|rating| rating.get()), Ok(4));
    /// ```
    pub fn new(value: i64) -> Result<Self, ReviewValidationError> {
        if value < RATING_MIN {
            return Err(ReviewValidationError::RatingTooLow);
        }
        if value > RATING_MAX {
            return Err(ReviewValidationError::RatingTooHigh);
        }
        i16::try_from(value)
            .map(Self)
            .map_err(|_| ReviewValidationError::RatingTooHigh)
    }

    /// Raw rating value.
    pub fn get(self) -> i16 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = ReviewValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i16 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// Free-text review statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StatementComment(String);

impl StatementComment {
    /// Validate a comment: non-empty and at most [`STATEMENT_COMMENT_MAX`]
    /// characters. Whitespace is kept as written.
    pub fn new(value: impl Into<String>) -> Result<Self, ReviewValidationError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(ReviewValidationError::EmptyComment);
        }
        if raw.chars().count() > STATEMENT_COMMENT_MAX {
            return Err(ReviewValidationError::CommentTooLong {
                max: STATEMENT_COMMENT_MAX,
            });
        }
        Ok(Self(raw))
    }

    /// Borrow the comment text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for StatementComment {
    type Error = ReviewValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StatementComment> for String {
    fn from(value: StatementComment) -> Self {
        value.0
    }
}

/// Fixed set of reactions other users can leave on a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Reaction {
    /// Thumbs up.
    Agree,
    /// Mind blown.
    Insightful,
    /// Laughing.
    Funny,
    /// Thinking face.
    ThoughtProvoking,
    /// Thumbs down.
    Disagree,
    /// Raised hands.
    WellSaid,
}

/// Reacting user ids grouped by reaction.
pub type ReactionMap = BTreeMap<Reaction, BTreeSet<i64>>;

/// The reviewer's statement with its own edit timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Statement text.
    pub comment: StatementComment,
    /// When the statement was first written.
    pub created_at: DateTime<Utc>,
    /// When the statement text last changed.
    pub updated_at: DateTime<Utc>,
}

/// A stored movie review.
///
/// ## Invariants
/// - `version` starts at [`Version::INITIAL`] and grows by one per update.
/// - `imdb_id` is unique across all reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Store-assigned identifier.
    pub id: ReviewId,
    /// Film reference.
    pub imdb_id: ImdbId,
    /// Star rating.
    pub rating: Rating,
    /// Reviewer statement.
    pub statement: Statement,
    /// Reactions left by other users; never written through this API.
    pub reactions: ReactionMap,
    /// Insert time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Concurrency token.
    pub version: Version,
}

/// Validated input for creating a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    /// Film reference.
    pub imdb_id: ImdbId,
    /// Star rating.
    pub rating: Rating,
    /// Statement text.
    pub statement_comment: StatementComment,
}

/// Store-assigned fields returned after an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRecord<Id> {
    /// New identifier.
    pub id: Id,
    /// Insert time.
    pub created_at: DateTime<Utc>,
    /// Always [`Version::INITIAL`].
    pub version: Version,
}

/// Partial update of a review.
///
/// At least one field is present; construction enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewChanges {
    rating: Option<Rating>,
    statement_comment: Option<StatementComment>,
}

/// Raised when an update carries no recognised field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no updatable fields were provided")]
pub struct EmptyChanges;

impl ReviewChanges {
    /// Build a change set from the submitted fields.
    pub fn new(
        rating: Option<Rating>,
        statement_comment: Option<StatementComment>,
    ) -> Result<Self, EmptyChanges> {
        if rating.is_none() && statement_comment.is_none() {
            return Err(EmptyChanges);
        }
        Ok(Self {
            rating,
            statement_comment,
        })
    }

    /// New rating, if submitted.
    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    /// New statement text, if submitted.
    pub fn statement_comment(&self) -> Option<&StatementComment> {
        self.statement_comment.as_ref()
    }
}

#[cfg(test)]
mod tests {
    //! Field validation coverage.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, ReviewValidationError::RatingTooLow)]
    #[case(-3, ReviewValidationError::RatingTooLow)]
    #[case(6, ReviewValidationError::RatingTooHigh)]
    #[case(i64::MAX, ReviewValidationError::RatingTooHigh)]
    fn rating_rejects_out_of_range(#[case] value: i64, #[case] expected: ReviewValidationError) {
        assert_eq!(Rating::new(value), Err(expected));
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    fn rating_accepts_bounds(#[case] value: i64) {
        assert!(Rating::new(value).is_ok());
    }

    #[rstest]
    fn comment_length_counts_characters_not_bytes() {
        let at_limit = "é".repeat(STATEMENT_COMMENT_MAX);
        assert!(StatementComment::new(at_limit).is_ok());

        let over = "a".repeat(STATEMENT_COMMENT_MAX + 1);
        let err = StatementComment::new(over).expect_err("too long");
        assert_eq!(err.to_string(), "must not have more than 280 characters");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_imdb_ids_are_rejected(#[case] value: &str) {
        assert_eq!(ImdbId::new(value), Err(ReviewValidationError::EmptyImdbId));
    }

    #[rstest]
    fn empty_comment_is_rejected() {
        assert_eq!(
            StatementComment::new(""),
            Err(ReviewValidationError::EmptyComment)
        );
    }

    #[rstest]
    fn whitespace_comment_is_kept_verbatim() {
        let comment = StatementComment::new("   ").expect("non-empty comment");
        assert_eq!(comment.as_str(), "   ");
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    fn review_id_must_be_positive(#[case] value: i64) {
        let err = ReviewId::new(value).expect_err("non-positive id");
        assert_eq!(err.to_string(), "invalid id parameter");
    }

    #[rstest]
    fn version_advances_by_one() {
        assert_eq!(Version::INITIAL.next(), Version::new(2));
    }

    #[rstest]
    fn changes_require_a_field() {
        assert_eq!(ReviewChanges::new(None, None), Err(EmptyChanges));
        let rating = Rating::new(3).expect("valid");
        let changes = ReviewChanges::new(Some(rating), None).expect("rating only");
        assert_eq!(changes.rating(), Some(rating));
        assert!(changes.statement_comment().is_none());
    }

    #[rstest]
    fn reactions_serialise_with_variant_names() {
        let mut reactions = ReactionMap::new();
        reactions.insert(Reaction::ThoughtProvoking, BTreeSet::from([3, 1]));
        let value = serde_json::to_value(&reactions).expect("serialise");
        assert_eq!(value, serde_json::json!({"ThoughtProvoking": [1, 3]}));
    }
}
