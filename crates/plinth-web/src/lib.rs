//! Actix Web adapters for Plinth's cross-cutting HTTP conventions.
//!
//! Every component here is a thin adapter around an Actix extension point:
//! [`error`] maps domain failures onto a uniform JSON envelope,
//! [`middleware::cache_control`] renders a per-route caching policy into the
//! `Cache-Control` header, and [`middleware::request_log`] emits one timed,
//! colour-coded log line per request.

pub mod error;
pub mod middleware;

pub use error::{ApiError, ApiResult, ErrorEnvelope, FieldError};
pub use middleware::{CacheControl, RequestLog};

pub use plinth_domain as domain;
