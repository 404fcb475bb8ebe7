//! Registered user account and its validated components.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Months, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::review::{EmptyChanges, Version};

/// Minimum profile handle length, in Unicode scalar values.
pub const PROFILE_HANDLE_MIN: usize = 3;
/// Maximum profile handle length, in Unicode scalar values.
pub const PROFILE_HANDLE_MAX: usize = 30;
/// Minimum plaintext password length in bytes.
pub const PASSWORD_MIN_BYTES: usize = 8;
/// Maximum plaintext password length in bytes; bcrypt ignores anything past it.
pub const PASSWORD_MAX_BYTES: usize = 72;
/// Youngest age, in years, allowed to register.
pub const MIN_AGE_YEARS: u32 = 13;
/// Oldest age, in years, accepted as plausible.
pub const MAX_AGE_YEARS: u32 = 100;

/// Validation failures for user fields.
///
/// The display text is the client-facing per-field message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifiers start at one.
    #[error("invalid id parameter")]
    InvalidId,
    /// A required text field was blank.
    #[error("must be provided")]
    Missing,
    /// The e-mail address is not shaped like one.
    #[error("must be a valid email address")]
    InvalidEmail,
    /// The handle is too short.
    #[error("must be at least {min} characters")]
    HandleTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// The handle is too long.
    #[error("must not be more than {max} characters")]
    HandleTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The password is too short.
    #[error("must be at least {min} bytes long")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// The password is too long.
    #[error("must not be more than {max} bytes long")]
    PasswordTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The birth date implies an age below [`MIN_AGE_YEARS`].
    #[error("must be at least {years} years old")]
    TooYoung {
        /// Minimum age.
        years: u32,
    },
    /// The birth date implies an age above [`MAX_AGE_YEARS`].
    #[error("must be at most {years} years old")]
    TooOld {
        /// Maximum age.
        years: u32,
    },
}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate an identifier taken from a path or a row.
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id < 1 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // WHATWG "valid e-mail address" production.
        let pattern = concat!(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@",
            r"[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Account e-mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate an address.
    ///
    /// # Examples
    /// ```
    /// use cinepulse::domain::Email;
    ///
    /// assert!(Email::new("ada@example.com").is_ok());
    /// assert!(Email::new("not-an-address").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::Missing);
        }
        if !email_regex().is_match(&raw) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(raw))
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Public handle shown on the user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileHandle(String);

impl ProfileHandle {
    /// Validate a handle of [`PROFILE_HANDLE_MIN`] to [`PROFILE_HANDLE_MAX`]
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::Missing);
        }
        let length = raw.chars().count();
        if length < PROFILE_HANDLE_MIN {
            return Err(UserValidationError::HandleTooShort {
                min: PROFILE_HANDLE_MIN,
            });
        }
        if length > PROFILE_HANDLE_MAX {
            return Err(UserValidationError::HandleTooLong {
                max: PROFILE_HANDLE_MAX,
            });
        }
        Ok(Self(raw))
    }

    /// Borrow the handle.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for ProfileHandle {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProfileHandle> for String {
    fn from(value: ProfileHandle) -> Self {
        value.0
    }
}

/// Free-form location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location(String);

impl Location {
    /// Validate a non-blank location.
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::Missing);
        }
        Ok(Self(raw))
    }

    /// Borrow the location.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Location {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Location> for String {
    fn from(value: Location) -> Self {
        value.0
    }
}

/// Date of birth checked against an age window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateOfBirth(NaiveDate);

impl DateOfBirth {
    /// Validate that `date` implies an age between [`MIN_AGE_YEARS`] and
    /// [`MAX_AGE_YEARS`] on `today`, both ends inclusive.
    pub fn new(date: NaiveDate, today: NaiveDate) -> Result<Self, UserValidationError> {
        let youngest = years_before(today, MIN_AGE_YEARS);
        if date > youngest {
            return Err(UserValidationError::TooYoung {
                years: MIN_AGE_YEARS,
            });
        }
        let oldest = years_before(today, MAX_AGE_YEARS);
        if date < oldest {
            return Err(UserValidationError::TooOld {
                years: MAX_AGE_YEARS,
            });
        }
        Ok(Self(date))
    }

    /// Wrap a stored value without re-checking the age window.
    pub fn from_stored(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Calendar date.
    pub fn date(self) -> NaiveDate {
        self.0
    }
}

fn years_before(today: NaiveDate, years: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN)
}

/// Plaintext password held only long enough to hash it.
///
/// The buffer is wiped on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct PlaintextPassword(Zeroizing<String>);

impl PlaintextPassword {
    /// Validate a password of [`PASSWORD_MIN_BYTES`] to
    /// [`PASSWORD_MAX_BYTES`] bytes.
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = Zeroizing::new(value.into());
        if raw.is_empty() {
            return Err(UserValidationError::Missing);
        }
        if raw.len() < PASSWORD_MIN_BYTES {
            return Err(UserValidationError::PasswordTooShort {
                min: PASSWORD_MIN_BYTES,
            });
        }
        if raw.len() > PASSWORD_MAX_BYTES {
            return Err(UserValidationError::PasswordTooLong {
                max: PASSWORD_MAX_BYTES,
            });
        }
        Ok(Self(raw))
    }

    /// Borrow the secret for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PlaintextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlaintextPassword(<redacted>)")
    }
}

/// Encoded password hash as produced by the hasher port.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded hash.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Validated registration before the password is hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Account e-mail.
    pub email: Email,
    /// Profile handle.
    pub profile_handle: ProfileHandle,
    /// Secret to hash.
    pub password: PlaintextPassword,
    /// Location.
    pub location: Location,
    /// Date of birth.
    pub date_of_birth: DateOfBirth,
}

/// Registration ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Account e-mail.
    pub email: Email,
    /// Profile handle.
    pub profile_handle: ProfileHandle,
    /// Hashed secret.
    pub password_hash: PasswordHash,
    /// Location.
    pub location: Location,
    /// Date of birth.
    pub date_of_birth: DateOfBirth,
}

/// A stored user account, without credentials.
///
/// ## Invariants
/// - `version` only grows when `email`, `profile_handle` or `location`
///   change; toggling `is_protected` leaves it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Account e-mail.
    pub email: Email,
    /// Profile handle.
    pub profile_handle: ProfileHandle,
    /// Location.
    pub location: Location,
    /// Date of birth.
    pub date_of_birth: DateOfBirth,
    /// Whether the profile is hidden from other users.
    pub is_protected: bool,
    /// Whether the account has been activated.
    pub is_activated: bool,
    /// Insert time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Concurrency token.
    pub version: Version,
}

/// Partial update of a user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    email: Option<Email>,
    profile_handle: Option<ProfileHandle>,
    location: Option<Location>,
    is_protected: Option<bool>,
}

impl UserChanges {
    /// Build a change set; at least one field must be present.
    pub fn new(
        email: Option<Email>,
        profile_handle: Option<ProfileHandle>,
        location: Option<Location>,
        is_protected: Option<bool>,
    ) -> Result<Self, EmptyChanges> {
        if email.is_none() && profile_handle.is_none() && location.is_none() && is_protected.is_none()
        {
            return Err(EmptyChanges);
        }
        Ok(Self {
            email,
            profile_handle,
            location,
            is_protected,
        })
    }

    /// New e-mail, if submitted.
    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    /// New handle, if submitted.
    pub fn profile_handle(&self) -> Option<&ProfileHandle> {
        self.profile_handle.as_ref()
    }

    /// New location, if submitted.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// New protection flag, if submitted.
    pub fn is_protected(&self) -> Option<bool> {
        self.is_protected
    }

    /// True when a versioned profile field changes.
    pub fn touches_profile(&self) -> bool {
        self.email.is_some() || self.profile_handle.is_some() || self.location.is_some()
    }
}
