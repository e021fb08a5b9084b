//! HTML adapter for the [`ViewRenderer`] port.
//!
//! Pages are assembled by appending to a `String`; every piece of record or
//! form text passes through [`escape`] first.

use crate::domain::ports::{FormMode, LoginNotice, View, ViewRenderer};
use crate::domain::{
    Error, FieldErrors, User, UserForm, UserId, EMAIL_FIELD, ID_FIELD, LISTING_PATH,
    LOGIN_SUBMIT_PATH, LOGOUT_PATH, USERNAME_FIELD,
};

const CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Renders [`View`]s as standalone HTML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlViewRenderer;

impl HtmlViewRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ViewRenderer for HtmlViewRenderer {
    fn render(&self, view: &View) -> Result<String, Error> {
        Ok(match view {
            View::UserList { users } => render_list(users),
            View::UserDetail { user, flash } => render_detail(user, flash.as_deref()),
            View::UserForm { mode, form, errors } => render_form(*mode, form, errors),
            View::Login { notice } => render_login(*notice),
            View::NotFound { id } => render_not_found(*id),
        })
    }

    fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }
}

/// Escape text for use in element content and quoted attribute values.
///
/// # Examples
/// ```
/// use user_registry::outbound::html::escape;
///
/// assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;");
/// ```
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for character in raw.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn page(title: &str, signed_in: bool, body: &str) -> String {
    let mut output = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
    output.push_str("<meta charset=\"utf-8\">\n<title>");
    output.push_str(&escape(title));
    output.push_str("</title>\n</head>\n<body>\n");
    if signed_in {
        output.push_str("<form method=\"post\" action=\"");
        output.push_str(LOGOUT_PATH);
        output.push_str("\"><button type=\"submit\">Logout</button></form>\n");
    }
    output.push_str("<h1>");
    output.push_str(&escape(title));
    output.push_str("</h1>\n");
    output.push_str(body);
    output.push_str("</body>\n</html>\n");
    output
}

fn link(output: &mut String, href: &str, label: &str) {
    output.push_str("<a href=\"");
    output.push_str(&escape(href));
    output.push_str("\">");
    output.push_str(&escape(label));
    output.push_str("</a>");
}

fn record_path(id: UserId) -> String {
    format!("{LISTING_PATH}/{id}")
}

fn render_list(users: &[User]) -> String {
    let mut body = String::from("<p>");
    link(&mut body, &format!("{LISTING_PATH}?form"), "Create user");
    body.push_str("</p>\n");

    if users.is_empty() {
        body.push_str("<p>No users</p>\n");
        return page("Users : View all", true, &body);
    }

    body.push_str("<table>\n<thead><tr><th>Id</th><th>Username</th><th>Email</th></tr></thead>\n<tbody>\n");
    for user in users {
        body.push_str("<tr><td>");
        body.push_str(&user.id().to_string());
        body.push_str("</td><td>");
        link(&mut body, &record_path(user.id()), user.username().as_ref());
        body.push_str("</td><td>");
        body.push_str(&escape(user.email().as_ref()));
        body.push_str("</td></tr>\n");
    }
    body.push_str("</tbody>\n</table>\n");
    page("Users : View all", true, &body)
}

fn render_detail(user: &User, flash: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(message) = flash {
        body.push_str("<p class=\"flash\">");
        body.push_str(&escape(message));
        body.push_str("</p>\n");
    }

    body.push_str("<dl>\n<dt>Id</dt><dd>");
    body.push_str(&user.id().to_string());
    body.push_str("</dd>\n<dt>Username</dt><dd>");
    body.push_str(&escape(user.username().as_ref()));
    body.push_str("</dd>\n<dt>Email</dt><dd>");
    body.push_str(&escape(user.email().as_ref()));
    body.push_str("</dd>\n</dl>\n<p>");
    link(
        &mut body,
        &format!("{LISTING_PATH}/modify/{}", user.id()),
        "Edit",
    );
    body.push_str(" | ");
    link(
        &mut body,
        &format!("{LISTING_PATH}/delete/{}", user.id()),
        "Delete",
    );
    body.push_str(" | ");
    link(&mut body, LISTING_PATH, "All users");
    body.push_str("</p>\n");
    page("Users : View", true, &body)
}

fn field_error(output: &mut String, errors: &FieldErrors, field: &str) {
    if let Some(message) = errors.get(field) {
        output.push_str("<span class=\"error\">");
        output.push_str(&escape(message));
        output.push_str("</span>");
    }
}

fn text_input(output: &mut String, form: &UserForm, errors: &FieldErrors, field: &str, label: &str) {
    output.push_str("<p><label for=\"");
    output.push_str(field);
    output.push_str("\">");
    output.push_str(label);
    output.push_str("</label> <input type=\"text\" id=\"");
    output.push_str(field);
    output.push_str("\" name=\"");
    output.push_str(field);
    output.push_str("\" value=\"");
    output.push_str(&escape(form.value(field)));
    output.push_str("\"> ");
    field_error(output, errors, field);
    output.push_str("</p>\n");
}

fn render_form(mode: FormMode, form: &UserForm, errors: &FieldErrors) -> String {
    let title = match mode {
        FormMode::Create => "Users : Create",
        FormMode::Edit => "Users : Edit",
    };

    let mut body = String::new();
    if !errors.is_empty() {
        body.push_str("<p class=\"error\">Please correct the errors below.</p>\n");
    }
    body.push_str("<form method=\"post\" action=\"");
    body.push_str(LISTING_PATH);
    body.push_str("\">\n");

    let id = form.value(ID_FIELD);
    if mode == FormMode::Edit || !id.is_empty() {
        body.push_str("<input type=\"hidden\" name=\"");
        body.push_str(ID_FIELD);
        body.push_str("\" value=\"");
        body.push_str(&escape(id));
        body.push_str("\">");
        field_error(&mut body, errors, ID_FIELD);
        body.push('\n');
    }
    text_input(&mut body, form, errors, USERNAME_FIELD, "Username");
    text_input(&mut body, form, errors, EMAIL_FIELD, "Email");
    body.push_str("<p><button type=\"submit\">Save</button></p>\n</form>\n<p>");
    link(&mut body, LISTING_PATH, "All users");
    body.push_str("</p>\n");
    page(title, true, &body)
}

fn render_login(notice: Option<LoginNotice>) -> String {
    let mut body = String::new();
    match notice {
        Some(LoginNotice::InvalidCredentials) => {
            body.push_str("<p class=\"error\">Invalid username and password.</p>\n");
        }
        Some(LoginNotice::LoggedOut) => {
            body.push_str("<p class=\"notice\">You have been logged out.</p>\n");
        }
        None => {}
    }
    body.push_str("<form method=\"post\" action=\"");
    body.push_str(LOGIN_SUBMIT_PATH);
    body.push_str("\">\n");
    body.push_str("<p><label for=\"username\">Username</label> <input type=\"text\" id=\"username\" name=\"username\"></p>\n");
    body.push_str("<p><label for=\"password\">Password</label> <input type=\"password\" id=\"password\" name=\"password\"></p>\n");
    body.push_str("<p><button type=\"submit\">Login</button></p>\n</form>\n");
    page("Login", false, &body)
}

fn render_not_found(id: UserId) -> String {
    let mut body = String::from("<p>No user with id ");
    body.push_str(&id.to_string());
    body.push_str(" exists.</p>\n<p>");
    link(&mut body, LISTING_PATH, "All users");
    body.push_str("</p>\n");
    page("Users : Not found", true, &body)
}
