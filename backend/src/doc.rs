//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every inbound HTTP endpoint and the request, response
//! and error schemas they reference. Swagger UI serves it at `/docs` in debug
//! builds and `cargo run --bin openapi-dump` prints it for tooling.

use utoipa::OpenApi;

use crate::domain::operations::Operation;
use crate::domain::{Error, ErrorCode, FieldError};
use crate::inbound::http::calculator::{CalculationResponse, CalculatorRequest};
use crate::inbound::http::users::{UserCreateRequest, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Calculator backend API",
        description = "Arithmetic operations with persisted history, user registration and health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::calculator::add,
        crate::inbound::http::calculator::subtract,
        crate::inbound::http::calculator::multiply,
        crate::inbound::http::calculator::divide,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserCreateRequest,
        UserResponse,
        CalculatorRequest,
        CalculationResponse,
        Operation,
        Error,
        ErrorCode,
        FieldError
    )),
    tags(
        (name = "users", description = "User registration"),
        (name = "calculator", description = "Arithmetic operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
