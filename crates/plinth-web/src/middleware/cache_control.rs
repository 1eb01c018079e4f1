//! Declarative `Cache-Control` middleware.
//!
//! A [`CacheControl`] value is declared once per route at startup and wrapped
//! around that route; the middleware renders it into a single `Cache-Control`
//! response header on every matching request. Routes without a declared
//! policy emit no header at all.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{CACHE_CONTROL, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

/// Per-route caching policy.
///
/// Defaults mirror a conservative private cache: `private`, `max-age=30`,
/// `stale-while-revalidate=30`. When `no_cache` is enabled the policy
/// switches to the validation branch (`no-cache`, optionally `no-store`) and
/// the freshness directives are not emitted.
///
/// # Examples
/// ```
/// use actix_web::{App, HttpResponse, web};
/// use plinth_web::CacheControl;
///
/// let app = App::new().service(
///     web::resource("/catalogue")
///         .wrap(CacheControl::new().max_age(3600).stale_while_revalidate(0))
///         .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheControl {
    max_age: u64,
    no_cache: bool,
    no_store: bool,
    stale_while_revalidate: u64,
    private_cache: bool,
}

impl Default for CacheControl {
    fn default() -> Self {
        Self {
            max_age: 30,
            no_cache: false,
            no_store: false,
            stale_while_revalidate: 30,
            private_cache: true,
        }
    }
}

impl CacheControl {
    /// Policy with the default directives.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds the response stays fresh; `max-age` is omitted when zero.
    #[must_use]
    pub const fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = seconds;
        self
    }

    /// Require revalidation before any reuse. Suppresses the freshness
    /// directives (`private`, `max-age`, `stale-while-revalidate`).
    #[must_use]
    pub const fn no_cache(mut self, enabled: bool) -> Self {
        self.no_cache = enabled;
        self
    }

    /// Forbid storing the response entirely. Only emitted together with
    /// `no-cache`.
    #[must_use]
    pub const fn no_store(mut self, enabled: bool) -> Self {
        self.no_store = enabled;
        self
    }

    /// Seconds a stale response may be reused while revalidating in the
    /// background; omitted when zero.
    #[must_use]
    pub const fn stale_while_revalidate(mut self, seconds: u64) -> Self {
        self.stale_while_revalidate = seconds;
        self
    }

    /// Restrict storage to private caches (browser-local).
    #[must_use]
    pub const fn private_cache(mut self, enabled: bool) -> Self {
        self.private_cache = enabled;
        self
    }

    /// Render the policy into the `Cache-Control` header value.
    ///
    /// Stateless and idempotent: the same policy always renders the same
    /// directive list, joined with `", "`.
    ///
    /// # Examples
    /// ```
    /// use plinth_web::CacheControl;
    ///
    /// let policy = CacheControl::new().no_cache(true).no_store(true);
    /// assert_eq!(policy.header_value(), "no-cache, no-store");
    /// ```
    pub fn header_value(&self) -> String {
        let mut directives = Vec::new();
        if self.no_cache {
            directives.push("no-cache".to_owned());
            if self.no_store {
                directives.push("no-store".to_owned());
            }
        } else {
            if self.private_cache {
                directives.push("private".to_owned());
            }
            if self.max_age > 0 {
                directives.push(format!("max-age={}", self.max_age));
            }
            if self.stale_while_revalidate > 0 {
                directives.push(format!(
                    "stale-while-revalidate={}",
                    self.stale_while_revalidate
                ));
            }
        }
        directives.join(", ")
    }
}

impl<S, B> Transform<S, ServiceRequest> for CacheControl
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CacheControlMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CacheControlMiddleware {
            service,
            policy: self.clone(),
        }))
    }
}

/// Service wrapper produced by [`CacheControl`].
///
/// Applications should not use this type directly.
pub struct CacheControlMiddleware<S> {
    service: S,
    policy: CacheControl,
}

impl<S, B> Service<ServiceRequest> for CacheControlMiddleware<S>
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
        let header_value = self.policy.header_value();
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&header_value) {
                Ok(value) => {
                    res.response_mut().headers_mut().insert(CACHE_CONTROL, value);
                }
                Err(err) => {
                    error!(
                        %err,
                        header_value,
                        "failed to encode Cache-Control header"
                    );
                }
            }
            Ok(res)
        })
    }
}
