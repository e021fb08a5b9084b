//! Domain model for the user registry.
//!
//! Purpose: hold the record types, validation, access rules and the
//! record-management service. Nothing in here knows about HTTP, cookies or
//! HTML; adapters reach the domain through [`ports`].
//!
//! Public surface:
//! - `User`, `UserDraft`, `UserForm`, `FieldErrors`: records and submissions.
//! - `AccessGuard`, `AccessDecision`: per-request authentication rules.
//! - `LoginCredentials`, `Principal`, `Role`: authentication primitives.
//! - `UserRecordsService`: the record-management use-cases.
//! - `Error`, `ErrorCode`: error payload shared by every adapter.

pub mod access;
pub mod auth;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_records_service;

pub use self::access::{
    AccessDecision, AccessGuard, AuthState, GuardPaths, LISTING_PATH, LOGIN_PATH,
    LOGIN_SUBMIT_PATH, LOGOUT_PATH, ROOT_PATH,
};
pub use self::auth::{LoginCredentials, LoginValidationError, Principal, Role};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{
    EmailAddress, FieldErrors, User, UserDraft, UserForm, UserId, UserValidationError, Username,
    EMAIL_FIELD, ID_FIELD, USERNAME_FIELD,
};
pub use self::user_records_service::UserRecordsService;

/// Convenient result alias for handlers and services.
///
/// # Examples
/// ```
/// use user_registry::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u64> {
///     Err(Error::not_found("no record"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
