//! Request logging middleware.
//!
//! Wraps the downstream chain exactly once per request, measures wall-clock
//! latency and emits a single INFO line per request: colour-coded status,
//! bold duration, then a `METHOD uri` summary. The line is emitted whether
//! the chain returned or raised; the original outcome always propagates
//! unchanged.

use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Level, enabled, info};

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Middleware emitting one timed log line per request.
///
/// Requests whose path contains an excluded fragment are skipped, as is all
/// logging when INFO is disabled. The default exclusion covers management
/// endpoints under `actuator`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use plinth_web::RequestLog;
///
/// let app = App::new().wrap(RequestLog::new().exclude("healthz"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestLog {
    exclude: Vec<String>,
}

impl Default for RequestLog {
    fn default() -> Self {
        Self {
            exclude: vec!["actuator".to_owned()],
        }
    }
}

impl RequestLog {
    /// Logger with the default exclusions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also skip requests whose path contains `fragment`.
    #[must_use]
    pub fn exclude(mut self, fragment: impl Into<String>) -> Self {
        self.exclude.push(fragment.into());
        self
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.exclude
            .iter()
            .any(|fragment| path.contains(fragment.as_str()))
    }

    fn should_log(&self, path: &str) -> bool {
        enabled!(Level::INFO) && !self.is_excluded(path)
    }
}

/// Colour the status by its class (yellow 4xx, red 5xx, green otherwise) and
/// embolden the elapsed duration.
fn message_prefix(status: StatusCode, elapsed: Duration) -> String {
    let colour = if status.is_client_error() {
        YELLOW
    } else if status.is_server_error() {
        RED
    } else {
        GREEN
    };
    format!("{colour}{}{RESET} | {BOLD}{elapsed:?}{RESET}", status.as_u16())
}

impl<S, B> Transform<S, ServiceRequest> for RequestLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLogMiddleware {
            service,
            config: self.clone(),
        }))
    }
}

/// Service wrapper produced by [`RequestLog`].
///
/// Applications should not use this type directly.
pub struct RequestLogMiddleware<S> {
    service: S,
    config: RequestLog,
}

impl<S, B> Service<ServiceRequest> for RequestLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let should_log = self.config.should_log(req.path());
        let summary = format!("{} {}", req.method(), req.uri());
        let started = Instant::now();
        let fut = self.service.call(req);
        Box::pin(async move {
            let result = fut.await;
            // Runs on both exit paths so failures are observed but never
            // swallowed.
            if should_log {
                let status = match &result {
                    Ok(res) => res.status(),
                    Err(err) => err.as_response_error().status_code(),
                };
                info!("{} | {summary}", message_prefix(status, started.elapsed()));
            }
            result
        })
    }
}
