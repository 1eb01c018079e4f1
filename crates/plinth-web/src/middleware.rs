//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such
//! as per-route cache policies and request logging.

pub mod cache_control;
pub mod request_log;

pub use cache_control::CacheControl;
pub use request_log::RequestLog;
