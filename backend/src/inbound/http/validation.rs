//! Request-body validation for inbound HTTP adapters.
//!
//! Malformed JSON and type mismatches never reach a handler. The
//! [`json_config`] error handler rejects unreadable bodies and
//! [`ValidatedJson`] rejects well-formed JSON that does not fit the request
//! type. Both produce a 422 `validation_failed` response naming the
//! offending field.

use std::sync::OnceLock;

use actix_web::dev::Payload;
use actix_web::error::JsonPayloadError;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::error::Category;

use crate::domain::{Error, FieldError, UserValidationError};

/// Summary message for every validation failure.
pub(crate) const VALIDATION_MESSAGE: &str = "Request validation failed";

/// Field name reported when a failure cannot be tied to one field.
const BODY_FIELD: &str = "body";

static FIELD_RE: OnceLock<Regex> = OnceLock::new();

fn field_regex() -> &'static Regex {
    FIELD_RE.get_or_init(|| {
        Regex::new(r"(?:missing|unknown) field `([^`]+)`")
            .unwrap_or_else(|error| panic!("field regex failed to compile: {error}"))
    })
}

fn field_from_message(message: &str) -> String {
    field_regex()
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map_or_else(|| BODY_FIELD.to_owned(), |name| name.as_str().to_owned())
}

fn deserialize_field_error(error: &serde_json::Error, path: Option<String>) -> FieldError {
    let message = error.to_string();
    let code = match error.classify() {
        Category::Data if message.starts_with("missing field") => "missing",
        Category::Data => "invalid_type",
        Category::Syntax | Category::Eof | Category::Io => "malformed_json",
    };
    let field = match path {
        Some(path) if code == "invalid_type" => path,
        _ => field_from_message(&message),
    };
    FieldError::new(field, code, message)
}

/// Map a typed-deserialisation failure, keeping the path of the field that
/// failed. The root path (`.`) is reported as `body`.
pub(crate) fn typed_payload_error(error: &serde_path_to_error::Error<serde_json::Error>) -> Error {
    let path = error.path().to_string();
    let path = (path != ".").then_some(path);
    Error::validation(
        VALIDATION_MESSAGE,
        vec![deserialize_field_error(error.inner(), path)],
    )
}

/// JSON body extractor that reports which field failed to deserialise.
///
/// The raw body goes through `web::Json<Value>` first, so size limits,
/// content-type checks and syntax errors follow [`json_config`].
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let raw = web::Json::<Value>::from_request(req, payload);
        Box::pin(async move {
            let web::Json(value) = raw.await?;
            serde_path_to_error::deserialize(value)
                .map(ValidatedJson)
                .map_err(|error| typed_payload_error(&error).into())
        })
    }
}

/// Map a JSON extractor failure to a domain validation error.
pub(crate) fn json_payload_error(error: &JsonPayloadError) -> Error {
    let field_error = match error {
        JsonPayloadError::Deserialize(inner) => deserialize_field_error(inner, None),
        JsonPayloadError::ContentType => FieldError::new(
            BODY_FIELD,
            "unsupported_media_type",
            "request body must be application/json",
        ),
        JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            FieldError::new(
                BODY_FIELD,
                "too_large",
                format!("request body exceeds {limit} bytes"),
            )
        }
        other => FieldError::new(BODY_FIELD, "unreadable", other.to_string()),
    };
    Error::validation(VALIDATION_MESSAGE, vec![field_error])
}

/// JSON extractor configuration shared by every endpoint.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use calculator_backend::inbound::http::validation::json_config;
///
/// let app = App::new().app_data(json_config());
/// ```
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|error, _req: &HttpRequest| json_payload_error(&error).into())
}

/// Collect user value-object failures into one validation error.
pub(crate) fn user_validation_error(errors: &[UserValidationError]) -> Error {
    Error::validation(
        VALIDATION_MESSAGE,
        errors.iter().map(FieldError::from).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[expect(dead_code, reason = "only deserialisation failures are inspected")]
    struct Operands {
        x: f64,
        y: f64,
    }

    fn deserialize_error(body: &str) -> Error {
        let inner = serde_json::from_str::<Operands>(body).expect_err("invalid body");
        json_payload_error(&JsonPayloadError::Deserialize(inner))
    }

    fn typed_error(body: Value) -> Error {
        let error = serde_path_to_error::deserialize::<_, Operands>(body).expect_err("invalid body");
        typed_payload_error(&error)
    }

    fn first_error(error: &Error) -> FieldError {
        let details = error.details().expect("details present");
        serde_json::from_value(details["errors"][0].clone()).expect("field error")
    }

    #[rstest]
    #[case(r#"{"x": 1}"#, "y", "missing")]
    #[case(r#"{"x": 1,"#, "body", "malformed_json")]
    fn classifies_deserialisation_failures(
        #[case] body: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let error = deserialize_error(body);

        assert_eq!(error.code(), ErrorCode::ValidationFailed);
        let field_error = first_error(&error);
        assert_eq!(field_error.field, field);
        assert_eq!(field_error.code, code);
    }

    #[rstest]
    #[case(serde_json::json!({"x": "a", "y": 2}), "x", "invalid_type")]
    #[case(serde_json::json!({"x": 1, "y": null}), "y", "invalid_type")]
    #[case(serde_json::json!({"x": 1}), "y", "missing")]
    #[case(serde_json::json!("3 + 5"), "body", "invalid_type")]
    fn typed_failures_name_the_offending_field(
        #[case] body: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let error = typed_error(body);

        assert_eq!(error.code(), ErrorCode::ValidationFailed);
        let field_error = first_error(&error);
        assert_eq!(field_error.field, field);
        assert_eq!(field_error.code, code);
    }

    #[rstest]
    fn wrong_content_type_is_reported_on_body() {
        let error = json_payload_error(&JsonPayloadError::ContentType);
        assert_eq!(first_error(&error).code, "unsupported_media_type");
    }

    #[rstest]
    fn user_failures_keep_every_field() {
        let error = user_validation_error(&[
            UserValidationError::UsernameTooShort { min: 3 },
            UserValidationError::InvalidEmail,
        ]);
        let details = error.details().expect("details present");

        assert_eq!(details["errors"].as_array().map(Vec::len), Some(2));
        assert_eq!(details["errors"][1]["field"], "email");
    }
}
