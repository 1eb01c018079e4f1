//! Domain error taxonomy.
//!
//! Application code raises [`DomainError`] values; the web adapter layer owns
//! the translation into HTTP statuses and payloads. Keeping the taxonomy here
//! keeps transport concerns out of domain code.

use thiserror::Error;

/// A single field that failed validation, as a (name, message) pair.
///
/// # Examples
/// ```
/// use plinth_domain::FieldError;
///
/// let err = FieldError::new("email", "invalid format");
/// assert_eq!(err.field, "email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// Human-readable reason the field was rejected.
    pub message: String,
}

impl FieldError {
    /// Create a field error from a field name and a message.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application-level failure raised during request handling.
///
/// Marked `#[non_exhaustive]` so downstream matches carry a catch-all arm and
/// new variants can be added without breaking consumers.
///
/// # Examples
/// ```
/// use plinth_domain::DomainError;
///
/// let err = DomainError::bad_request("invalid payload")
///     .with_field_error("email", "invalid format");
/// assert_eq!(err.message(), "invalid payload");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DomainError {
    /// Caller-supplied input is invalid.
    #[error("{message}")]
    BadRequest {
        /// Overall human-readable message.
        message: String,
        /// Field-scoped failures; empty when the failure is not tied to a
        /// particular field. Field names are unique and insertion order is
        /// preserved.
        errors: Vec<FieldError>,
    },
    /// The referenced resource does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The caller is authenticated but not permitted to perform this action.
    #[error("{0}")]
    Forbidden(String),
}

impl DomainError {
    /// Construct a [`DomainError::BadRequest`] with no field errors.
    ///
    /// # Examples
    /// ```
    /// use plinth_domain::DomainError;
    ///
    /// let err = DomainError::bad_request("invalid payload");
    /// assert_eq!(err.message(), "invalid payload");
    /// ```
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Construct a [`DomainError::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Construct a [`DomainError::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Attach a field error to a [`DomainError::BadRequest`].
    ///
    /// Field names behave like map keys: attaching a second error for the
    /// same field replaces the message while keeping the original position.
    /// Attaching to any other variant is a no-op.
    ///
    /// # Examples
    /// ```
    /// use plinth_domain::DomainError;
    ///
    /// let err = DomainError::bad_request("invalid payload")
    ///     .with_field_error("email", "invalid format")
    ///     .with_field_error("email", "already taken");
    /// let DomainError::BadRequest { errors, .. } = err else {
    ///     unreachable!()
    /// };
    /// assert_eq!(errors.len(), 1);
    /// assert_eq!(errors[0].message, "already taken");
    /// ```
    #[must_use]
    pub fn with_field_error(
        mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        if let Self::BadRequest { errors, .. } = &mut self {
            let field = field.into();
            let message = message.into();
            if let Some(existing) = errors.iter_mut().find(|e| e.field == field) {
                existing.message = message;
            } else {
                errors.push(FieldError::new(field, message));
            }
        }
        self
    }

    /// Human-readable message carried by every variant.
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. } => message,
            Self::NotFound(message) | Self::Forbidden(message) => message,
        }
    }
}

/// Error raised by the helpers in [`crate::validate`] when a value fails a
/// field-level invariant.
///
/// The message embeds the field name and the value's string form so it can be
/// surfaced to callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvalidArgument {
    message: String,
}

impl InvalidArgument {
    /// Create an invalid-argument error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Human-readable message describing the rejected argument.
    pub fn message(&self) -> &str {
        &self.message
    }
}
