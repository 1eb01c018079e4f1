//! HTTP error payloads and mapping from domain errors.
//!
//! Keep the domain free of transport concerns by translating
//! [`DomainError`], [`InvalidArgument`] and `validator` failures into Actix
//! responses here. The conversion is the single seam between raised errors
//! and the wire: it never fails and never recovers, and anything not
//! converted into an [`ApiError`] stays on Actix's default handling.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use plinth_domain::{DomainError, InvalidArgument};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Overall message used when a request body fails declarative validation.
const VALIDATION_FAILED: &str = "Validation failed";

/// Wire-level description of a single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Name of the offending field.
    #[schema(example = "email")]
    pub field: String,
    /// Human-readable reason the field was rejected.
    #[schema(example = "invalid format")]
    pub message: String,
}

impl From<plinth_domain::FieldError> for FieldError {
    fn from(value: plinth_domain::FieldError) -> Self {
        Self {
            field: value.field,
            message: value.message,
        }
    }
}

/// Uniform JSON body returned for any failed request.
///
/// `errors` is serialized as JSON `null` (never omitted) when the failure is
/// not field-scoped, so clients can rely on the shape of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Human-readable error message.
    #[schema(example = "Something went wrong")]
    pub message: String,
    /// Field-scoped failures, or `null` when not applicable.
    pub errors: Option<Vec<FieldError>>,
}

/// Error type returned by HTTP handlers.
///
/// Pairs an HTTP status with the [`ErrorEnvelope`] rendered into the
/// response body. Obtained through the `From` conversions below; rendering
/// the same error twice produces the same response.
///
/// # Examples
/// ```
/// use plinth_domain::DomainError;
/// use plinth_web::ApiError;
///
/// let err = ApiError::from(DomainError::not_found("no such user"));
/// assert_eq!(err.status(), actix_web::http::StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    envelope: ErrorEnvelope,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>, errors: Option<Vec<FieldError>>) -> Self {
        Self {
            status,
            envelope: ErrorEnvelope {
                message: message.into(),
                errors,
            },
        }
    }

    /// HTTP status this error maps onto.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Human-readable message carried in the envelope.
    pub fn message(&self) -> &str {
        &self.envelope.message
    }

    /// Field-scoped failures, when the error is field-scoped.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        self.envelope.errors.as_deref()
    }

    /// The wire envelope rendered into the response body.
    pub const fn envelope(&self) -> &ErrorEnvelope {
        &self.envelope
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::BadRequest { message, errors } => {
                let errors = if errors.is_empty() {
                    None
                } else {
                    Some(errors.into_iter().map(FieldError::from).collect())
                };
                Self::new(StatusCode::BAD_REQUEST, message, errors)
            }
            DomainError::NotFound(message) => Self::new(StatusCode::NOT_FOUND, message, None),
            DomainError::Forbidden(message) => Self::new(StatusCode::FORBIDDEN, message, None),
            // Forward-compatibility arm: variants this adapter does not know
            // about surface as opaque server errors instead of leaking detail.
            _ => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                None,
            ),
        }
    }
}

impl From<InvalidArgument> for ApiError {
    fn from(error: InvalidArgument) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error.message().to_owned(), None)
    }
}

/// Maps a declarative validation failure onto a 400 response listing every
/// rejected field.
///
/// `validator` stores field failures in a `HashMap`, so declaration order is
/// unrecoverable; the response list is sorted by field name instead to keep
/// it deterministic for clients.
impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        // Sort so the response list is deterministic.
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let errors: Vec<FieldError> = fields
            .into_iter()
            .flat_map(|(field, failures)| {
                failures.iter().map(move |failure| FieldError {
                    field: (*field).to_owned(),
                    message: failure.to_string(),
                })
            })
            .collect();

        Self::new(StatusCode::BAD_REQUEST, VALIDATION_FAILED, Some(errors))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.envelope.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.envelope)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests;
