//! HTTP mapping for domain errors.
//!
//! Handlers return [`ApiResult`]; Actix turns the `Err` side into a JSON
//! envelope with a status derived from the error code. Redirects, re-rendered
//! forms and not-found pages are ordinary responses and never pass through
//! here.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode, TraceId, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Copy of `error` as sent to the client.
///
/// Falls back to the request's scoped trace id when the error carries none;
/// internal failures lose their message and details.
fn client_payload(error: &Error) -> Error {
    let trace_id = error
        .trace_id()
        .map(str::to_owned)
        .or_else(|| TraceId::current().map(|id| id.to_string()));

    let payload = if error.code() == ErrorCode::InternalError {
        error!(message = error.message(), "internal error returned to client");
        Error::internal("Internal server error")
    } else {
        let mut payload = Error::new(error.code(), error.message());
        if let Some(details) = error.details() {
            payload = payload.with_details(details.clone());
        }
        payload
    };

    match trace_id {
        Some(id) => payload.with_trace_id(id),
        None => payload,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let payload = client_payload(self);
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = payload.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(payload)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
