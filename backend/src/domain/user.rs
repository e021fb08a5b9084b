//! User record model and field-level validation.
//!
//! A [`UserDraft`] is a candidate record that may or may not carry an id; the
//! record store turns it into a [`User`], whose id is always populated.
//! Submitted form text is parsed with [`UserForm::validate`], which collects
//! every field failure into [`FieldErrors`] instead of stopping at the first.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Form field carrying the record id.
pub const ID_FIELD: &str = "id";
/// Form field carrying the username.
pub const USERNAME_FIELD: &str = "username";
/// Form field carrying the email address.
pub const EMAIL_FIELD: &str = "email";

/// Validation errors raised by the record field constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("id must be a positive whole number")]
    InvalidId,
    #[error("username is required")]
    EmptyUsername,
    #[error("email is required")]
    EmptyEmail,
    #[error("email must look like local@domain")]
    MalformedEmail,
}

/// System-assigned record identifier.
///
/// ## Invariants
/// - Always strictly positive; `0` is never assigned or accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct UserId(NonZeroU64);

impl UserId {
    /// Construct an id from a raw integer.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::UserId;
    ///
    /// assert_eq!(UserId::new(12).map(UserId::get), Ok(12));
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(raw: u64) -> Result<Self, UserValidationError> {
        NonZeroU64::new(raw)
            .map(Self)
            .ok_or(UserValidationError::InvalidId)
    }

    /// Raw integer value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|_| UserValidationError::InvalidId)?;
        Self::new(raw)
    }
}

impl TryFrom<u64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for u64 {
    fn from(value: UserId) -> Self {
        value.get()
    }
}

/// Login handle of a record; trimmed and non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Contact address of a record in `local@domain` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::{EmailAddress, UserValidationError};
    ///
    /// assert!(EmailAddress::new("ada@example.com").is_ok());
    /// assert_eq!(
    ///     EmailAddress::new("ada.example.com"),
    ///     Err(UserValidationError::MalformedEmail)
    /// );
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::MalformedEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Candidate record handed to the store; `id` is unset for new records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub id: Option<UserId>,
    pub username: Username,
    pub email: EmailAddress,
}

impl UserDraft {
    /// Draft without an id; the store assigns the next one on save.
    pub fn new(username: Username, email: EmailAddress) -> Self {
        Self {
            id: None,
            username,
            email,
        }
    }

    /// Draft addressed at an explicit id (insert-or-replace).
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Attach the id chosen by the store.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
        }
    }
}

/// Stored user record.
///
/// ## Invariants
/// - `id` is populated and immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
}

impl User {
    /// Stable record identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login handle.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Contact address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Build a string-field view for pre-filling the edit form.
    pub fn to_form(&self) -> UserForm {
        UserForm {
            id: Some(self.id.to_string()),
            username: Some(self.username.to_string()),
            email: Some(self.email.to_string()),
        }
    }
}

/// Field name to message mapping reported by validation.
///
/// Iteration is ordered by field name so rendered output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Message reported for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Names of the fields that failed.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Raw submitted fields, preserved verbatim for re-rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserForm {
    /// Parse the submission into a draft, collecting every field failure.
    ///
    /// A blank `id` means "unset".
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::UserForm;
    ///
    /// let form = UserForm {
    ///     id: None,
    ///     username: Some("ada".into()),
    ///     email: Some("not-an-email".into()),
    /// };
    /// let errors = form.validate().expect_err("email is malformed");
    /// assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email"]);
    /// ```
    pub fn validate(&self) -> Result<UserDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let id = match self.id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<UserId>() {
                Ok(id) => Some(id),
                Err(err) => {
                    errors.insert(ID_FIELD, err.to_string());
                    None
                }
            },
        };
        let username = Username::new(self.username.as_deref().unwrap_or_default())
            .map_err(|err| errors.insert(USERNAME_FIELD, err.to_string()))
            .ok();
        let email = EmailAddress::new(self.email.as_deref().unwrap_or_default())
            .map_err(|err| errors.insert(EMAIL_FIELD, err.to_string()))
            .ok();

        match (username, email) {
            (Some(username), Some(email)) if errors.is_empty() => Ok(UserDraft {
                id,
                username,
                email,
            }),
            _ => Err(errors),
        }
    }

    /// Submitted value for `field`, or an empty string.
    pub fn value(&self, field: &str) -> &str {
        let value = match field {
            ID_FIELD => self.id.as_deref(),
            USERNAME_FIELD => self.username.as_deref(),
            EMAIL_FIELD => self.email.as_deref(),
            _ => None,
        };
        value.unwrap_or_default()
    }
}
