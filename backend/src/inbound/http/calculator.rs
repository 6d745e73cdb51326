//! Arithmetic endpoints.
//!
//! ```text
//! POST /add      {"x":3,"y":5}          -> {"result":8.0,"calculation_id":1}
//! POST /divide   {"x":10,"y":0}         -> 400 {"code":"division_by_zero",...}
//! POST /multiply {"x":2,"y":4,"user_id":7}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::operations::Operation;
use crate::domain::ports::{CalculationOutcome, CalculationRequest};
use crate::domain::{Error, FieldError, Operands, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{VALIDATION_MESSAGE, ValidatedJson};

/// Operands for every arithmetic endpoint.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CalculatorRequest {
    #[schema(example = 10.0)]
    pub x: f64,
    #[schema(example = 2.0)]
    pub y: f64,
    /// Acting user. Omitted requests are attributed to the default user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 1)]
    pub user_id: Option<i64>,
}

/// Evaluated result and the identifier of the stored record.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CalculationResponse {
    #[schema(example = 5.0)]
    pub result: f64,
    #[schema(example = 1)]
    pub calculation_id: i64,
}

impl From<CalculationOutcome> for CalculationResponse {
    fn from(outcome: CalculationOutcome) -> Self {
        Self {
            result: outcome.result,
            calculation_id: outcome.calculation_id.get(),
        }
    }
}

fn to_request(operation: Operation, body: CalculatorRequest) -> Result<CalculationRequest, Error> {
    let user_id = body
        .user_id
        .map(|raw| {
            UserId::new(raw).map_err(|err| {
                Error::validation(
                    VALIDATION_MESSAGE,
                    vec![FieldError::new("user_id", err.code(), err.to_string())],
                )
            })
        })
        .transpose()?;

    Ok(CalculationRequest {
        operation,
        operands: Operands::new(body.x, body.y),
        user_id,
    })
}

async fn calculate(
    state: web::Data<HttpState>,
    operation: Operation,
    payload: ValidatedJson<CalculatorRequest>,
) -> ApiResult<web::Json<CalculationResponse>> {
    let request = to_request(operation, payload.into_inner())?;
    let outcome = state.calculator.calculate(request).await?;
    Ok(web::Json(CalculationResponse::from(outcome)))
}

/// Add `x` and `y`.
#[utoipa::path(
    post,
    path = "/add",
    request_body = CalculatorRequest,
    responses(
        (status = 200, description = "Sum", body = CalculationResponse),
        (status = 404, description = "Unknown user_id", body = Error),
        (status = 422, description = "Malformed body", body = Error)
    ),
    tags = ["calculator"],
    operation_id = "add"
)]
#[post("/add")]
pub async fn add(
    state: web::Data<HttpState>,
    payload: ValidatedJson<CalculatorRequest>,
) -> ApiResult<web::Json<CalculationResponse>> {
    calculate(state, Operation::Add, payload).await
}

/// Subtract `y` from `x`.
#[utoipa::path(
    post,
    path = "/subtract",
    request_body = CalculatorRequest,
    responses(
        (status = 200, description = "Difference", body = CalculationResponse),
        (status = 404, description = "Unknown user_id", body = Error),
        (status = 422, description = "Malformed body", body = Error)
    ),
    tags = ["calculator"],
    operation_id = "subtract"
)]
#[post("/subtract")]
pub async fn subtract(
    state: web::Data<HttpState>,
    payload: ValidatedJson<CalculatorRequest>,
) -> ApiResult<web::Json<CalculationResponse>> {
    calculate(state, Operation::Subtract, payload).await
}

/// Multiply `x` by `y`.
#[utoipa::path(
    post,
    path = "/multiply",
    request_body = CalculatorRequest,
    responses(
        (status = 200, description = "Product", body = CalculationResponse),
        (status = 404, description = "Unknown user_id", body = Error),
        (status = 422, description = "Malformed body", body = Error)
    ),
    tags = ["calculator"],
    operation_id = "multiply"
)]
#[post("/multiply")]
pub async fn multiply(
    state: web::Data<HttpState>,
    payload: ValidatedJson<CalculatorRequest>,
) -> ApiResult<web::Json<CalculationResponse>> {
    calculate(state, Operation::Multiply, payload).await
}

/// Divide `x` by `y`. A zero divisor is rejected and nothing is stored.
#[utoipa::path(
    post,
    path = "/divide",
    request_body = CalculatorRequest,
    responses(
        (status = 200, description = "Quotient", body = CalculationResponse),
        (status = 400, description = "Cannot divide by zero", body = Error),
        (status = 404, description = "Unknown user_id", body = Error),
        (status = 422, description = "Malformed body", body = Error)
    ),
    tags = ["calculator"],
    operation_id = "divide"
)]
#[post("/divide")]
pub async fn divide(
    state: web::Data<HttpState>,
    payload: ValidatedJson<CalculatorRequest>,
) -> ApiResult<web::Json<CalculationResponse>> {
    calculate(state, Operation::Divide, payload).await
}
