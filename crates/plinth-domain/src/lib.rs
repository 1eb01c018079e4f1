//! Framework-free building blocks shared by Plinth web services.
//!
//! This crate deliberately has no web-framework dependency: it holds the
//! domain error taxonomy and the field-validation helpers. Translating these
//! errors into HTTP responses is the job of `plinth-web`.

pub mod error;
pub mod validate;

pub use error::{DomainError, FieldError, InvalidArgument};
