//! User registration endpoint.
//!
//! ```text
//! POST /users {"username":"ada","email":"ada@example.com","password":"secret123"}
//! ```

use actix_web::{HttpResponse, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, User, UserRegistration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ValidatedJson, user_validation_error};

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserCreateRequest {
    #[schema(example = "integrationuser", min_length = 3, max_length = 50)]
    pub username: String,
    #[schema(example = "integration@example.com")]
    pub email: String,
    #[schema(example = "password123", min_length = 6, max_length = 72)]
    pub password: String,
}

/// Public fields of a registered user. The password hash is never returned.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().get(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at(),
        }
    }
}

impl TryFrom<UserCreateRequest> for UserRegistration {
    type Error = Error;

    fn try_from(value: UserCreateRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.email, &value.password)
            .map_err(|errors| user_validation_error(&errors))
    }
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserCreateRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Username or email already exists", body = Error),
        (status = 422, description = "Invalid field values", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: ValidatedJson<UserCreateRequest>,
) -> ApiResult<HttpResponse> {
    let registration = UserRegistration::try_from(payload.into_inner())?;
    let user = state.users.register(registration).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}
