//! Driven port for turning view models into response bodies.
//!
//! Handlers decide *which* view to show; adapters decide what it looks like.

use crate::domain::{Error, FieldErrors, User, UserForm, UserId};

/// Whether the record form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// One-line status shown above the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginNotice {
    /// The previous submission was rejected.
    InvalidCredentials,
    /// The session was just closed.
    LoggedOut,
}

/// View model handed to a [`ViewRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Every stored record.
    UserList { users: Vec<User> },
    /// A single record, with an optional one-shot flash message.
    UserDetail { user: User, flash: Option<String> },
    /// Input form, pre-filled with `form` and annotated with `errors`.
    UserForm {
        mode: FormMode,
        form: UserForm,
        errors: FieldErrors,
    },
    /// Login form.
    Login { notice: Option<LoginNotice> },
    /// No record is stored under `id`.
    NotFound { id: UserId },
}

impl View {
    /// Blank create form.
    pub fn blank_form() -> Self {
        Self::UserForm {
            mode: FormMode::Create,
            form: UserForm::default(),
            errors: FieldErrors::new(),
        }
    }

    /// Edit form pre-filled from a stored record.
    pub fn edit_form(user: &User) -> Self {
        Self::UserForm {
            mode: FormMode::Edit,
            form: user.to_form(),
            errors: FieldErrors::new(),
        }
    }
}

/// Renders views to a response body.
#[cfg_attr(test, mockall::automock)]
pub trait ViewRenderer: Send + Sync {
    /// Produce the body for `view`.
    fn render(&self, view: &View) -> Result<String, Error>;

    /// Media type of the produced bodies.
    fn content_type(&self) -> &'static str;
}
