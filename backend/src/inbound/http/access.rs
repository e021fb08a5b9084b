//! Actix middleware applying the domain [`AccessGuard`] to every request.
//!
//! Runs inside the session middleware so the principal stored in the cookie
//! is readable. Redirects and denials are answered here; permitted requests
//! continue to the handlers untouched.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::LOCATION;
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::domain::{AccessDecision, AccessGuard};
use crate::inbound::http::session::SessionContext;

/// Middleware factory wrapping a shared [`AccessGuard`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::inbound::http::access::RequireLogin;
///
/// let _app = App::new().wrap(RequireLogin::default());
/// ```
#[derive(Clone, Default)]
pub struct RequireLogin {
    guard: Rc<AccessGuard>,
}

impl RequireLogin {
    pub fn new(guard: AccessGuard) -> Self {
        Self {
            guard: Rc::new(guard),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireLogin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireLoginMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireLoginMiddleware {
            service,
            guard: Rc::clone(&self.guard),
        }))
    }
}

/// Service wrapper produced by [`RequireLogin`].
pub struct RequireLoginMiddleware<S> {
    service: S,
    guard: Rc<AccessGuard>,
}

impl<S, B> Service<ServiceRequest> for RequireLoginMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let principal = SessionContext::from_service_request(&req).principal();
        let decision = self.guard.decide(req.path(), principal.as_ref());

        let short_circuit = match decision {
            AccessDecision::Permit => None,
            AccessDecision::Redirect { location } => {
                debug!(path = req.path(), %location, "access guard redirect");
                Some(
                    HttpResponse::Found()
                        .insert_header((LOCATION, location))
                        .finish(),
                )
            }
            AccessDecision::Deny => {
                debug!(path = req.path(), "access guard denied request");
                Some(HttpResponse::Forbidden().finish())
            }
        };

        match short_circuit {
            Some(response) => {
                let response = req.into_response(response).map_into_right_body();
                Box::pin(ready(Ok(response)))
            }
            None => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
        }
    }
}
