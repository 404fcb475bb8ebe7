//! User account API handlers.
//!
//! ```text
//! POST  /v1/users {"email":"ada@example.com","password":"...","profile_handle":"ada",
//!                  "location":"London","date_of_birth":"1990-12-10"}
//! PATCH /v1/users/{id} {"location":"Paris","is_protected":true}
//! ```

use actix_web::{HttpResponse, web};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::UpdateUserRequest;
use crate::domain::{
    ApiResult, CreatedRecord, DateOfBirth, Email, Error, Location, PlaintextPassword,
    ProfileHandle, Registration, User, UserChanges, UserId, Validator,
};
use crate::inbound::http::json::read_json;
use crate::inbound::http::schemas::{CreatedRecordSchema, ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

const MISSING: &str = "must be provided";
const INVALID_DATE: &str = "must be a valid date";

/// Request body for `POST /v1/users`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RegisterUserRequest {
    /// Account e-mail, unique across users.
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    /// Plaintext password, 8 to 72 bytes.
    #[schema(example = "correct horse battery")]
    pub password: Option<String>,
    /// Public handle, unique across users.
    #[schema(example = "ada")]
    pub profile_handle: Option<String>,
    /// Free-form location.
    #[schema(example = "London")]
    pub location: Option<String>,
    /// Calendar date (`YYYY-MM-DD`) or RFC 3339 timestamp.
    #[schema(example = "1990-12-10")]
    pub date_of_birth: Option<String>,
}

/// Accept a bare date or an RFC 3339 timestamp.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

impl RegisterUserRequest {
    fn validate(self, today: NaiveDate) -> Result<Registration, Error> {
        let mut validator = Validator::new();
        let profile_handle = validator.record(
            "profile_handle",
            ProfileHandle::new(self.profile_handle.unwrap_or_default()),
        );
        let email = validator.record("email", Email::new(self.email.unwrap_or_default()));
        let password = validator.record(
            "password",
            PlaintextPassword::new(self.password.unwrap_or_default()),
        );
        let location = validator.record("location", Location::new(self.location.unwrap_or_default()));
        let date_of_birth = match self.date_of_birth.as_deref() {
            None => {
                validator.add_error("date_of_birth", MISSING);
                None
            }
            Some(raw) => match parse_date(raw) {
                Some(date) => validator.record("date_of_birth", DateOfBirth::new(date, today)),
                None => {
                    validator.add_error("date_of_birth", INVALID_DATE);
                    None
                }
            },
        };

        match (email, profile_handle, password, location, date_of_birth) {
            (
                Some(email),
                Some(profile_handle),
                Some(password),
                Some(location),
                Some(date_of_birth),
            ) => Ok(Registration {
                email,
                profile_handle,
                password,
                location,
                date_of_birth,
            }),
            _ => Err(validator.into_error()),
        }
    }
}

/// Request body for `PATCH /v1/users/{id}`; absent fields stay unchanged.
///
/// Changing `is_protected` alone does not bump the account version.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserBody {
    /// New e-mail.
    pub email: Option<String>,
    /// New public handle.
    pub profile_handle: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// Hide or show the profile.
    pub is_protected: Option<bool>,
}

impl UpdateUserBody {
    fn validate(self) -> Result<UserChanges, Error> {
        let mut validator = Validator::new();
        let email = self
            .email
            .and_then(|value| validator.record("email", Email::new(value)));
        let profile_handle = self
            .profile_handle
            .and_then(|value| validator.record("profile_handle", ProfileHandle::new(value)));
        let location = self
            .location
            .and_then(|value| validator.record("location", Location::new(value)));
        validator.finish()?;
        UserChanges::new(email, profile_handle, location, self.is_protected)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

/// Body of `POST /v1/users`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedUserResponse {
    /// Store-assigned fields of the new account.
    #[schema(value_type = CreatedRecordSchema)]
    pub user: CreatedRecord<UserId>,
}

/// Body of `PATCH /v1/users/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// The updated account.
    #[schema(value_type = UserSchema)]
    pub user: User,
}

/// Register a new account.
///
/// Duplicate e-mail addresses and handles are reported as field errors.
#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Account created", body = CreatedUserResponse),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 422, description = "Validation failed or duplicate e-mail/handle", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let request: RegisterUserRequest = read_json(payload).await?;
    let registration = request.validate(state.clock.utc().date_naive())?;
    let created = state.users.register(registration).await?;
    Ok(HttpResponse::Created().json(CreatedUserResponse { user: created }))
}

/// Update profile fields guarded by the account's version.
#[utoipa::path(
    patch,
    path = "/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "Updated account", body = UserResponse),
        (status = 400, description = "Invalid id, malformed body or no fields", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Edit conflict", body = ErrorSchema),
        (status = 422, description = "Validation failed or duplicate e-mail/handle", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Payload,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path)?;
    let expected_version = state.users.current_version(id).await?;
    let body: UpdateUserBody = read_json(payload).await?;
    let changes = body.validate()?;
    let user = state
        .users
        .update(UpdateUserRequest {
            id,
            expected_version,
            changes,
        })
        .await?;
    Ok(web::Json(UserResponse { user }))
}
