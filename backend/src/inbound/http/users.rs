//! Record-management HTML handlers.
//!
//! ```text
//! GET  /                      -> 302 /user
//! GET  /user[/]               list, or blank form with ?form
//! GET  /user/{id}             view
//! POST /user[/]               create or save-with-id
//! GET  /user/delete/{id}      delete, then 302 /user
//! GET  /user/modify/{id}      edit form
//! ```
//!
//! Path ids only match decimal digits, so `/user/abc` falls through to the
//! default 404. Authentication is enforced by the access middleware before
//! any of these run.

use actix_web::http::StatusCode;
use actix_web::{get, routes, web, HttpResponse};
use serde::Deserialize;

use crate::domain::ports::{CreateOutcome, FormMode, Lookup, View};
use crate::domain::{User, UserForm, UserId, ID_FIELD, LISTING_PATH};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{redirect, render, render_with_status};
use crate::inbound::http::ApiResult;

/// One-shot message shown after a successful save.
pub const CREATED_FLASH: &str = "Successfully created a new user";

/// Query flags on the listing path.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Present (usually empty) when the blank create form is requested.
    pub form: Option<String>,
}

fn record_location(id: UserId) -> String {
    format!("{LISTING_PATH}/{id}")
}

/// Parse a digits-only path segment; zero and overflow resolve to `None`.
fn path_id(raw: &str) -> Option<UserId> {
    raw.parse().ok()
}

fn lookup_page(
    state: &HttpState,
    lookup: Lookup,
    page: impl FnOnce(User) -> View,
) -> ApiResult<HttpResponse> {
    match lookup {
        Lookup::Found(user) => render(state.renderer.as_ref(), &page(user)),
        Lookup::NotFound(id) => render_with_status(
            state.renderer.as_ref(),
            StatusCode::NOT_FOUND,
            &View::NotFound { id },
        ),
    }
}

/// Root path; signed-in visitors land on the listing.
#[get("/")]
pub async fn root() -> HttpResponse {
    redirect(LISTING_PATH)
}

/// Every record, or the blank create form when `?form` is present.
#[routes]
#[get("/user")]
#[get("/user/")]
pub async fn list(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    if query.form.is_some() {
        return render(state.renderer.as_ref(), &View::blank_form());
    }
    let users = state.records.list().await?;
    render(state.renderer.as_ref(), &View::UserList { users })
}

/// Single record, showing and clearing any pending flash message.
#[get(r"/user/{id:\d+}")]
pub async fn view(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(id) = path_id(&path) else {
        return Ok(HttpResponse::NotFound().finish());
    };
    let lookup = state.records.view(id).await?;
    lookup_page(&state, lookup, |user| View::UserDetail {
        user,
        flash: session.take_flash(),
    })
}

/// Validate and store a submission.
///
/// Field errors re-render the form with `200 OK`; nothing is stored.
#[routes]
#[post("/user")]
#[post("/user/")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<UserForm>,
) -> ApiResult<HttpResponse> {
    match state.records.create(form.into_inner()).await? {
        CreateOutcome::Created(user) => {
            session.set_flash(CREATED_FLASH)?;
            Ok(redirect(record_location(user.id())))
        }
        CreateOutcome::Invalid { form, errors } => {
            let mode = if form.value(ID_FIELD).trim().is_empty() {
                FormMode::Create
            } else {
                FormMode::Edit
            };
            render(
                state.renderer.as_ref(),
                &View::UserForm { mode, form, errors },
            )
        }
    }
}

/// Delete a record; absent ids are ignored.
#[get(r"/user/delete/{id:\d+}")]
pub async fn delete(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    if let Some(id) = path_id(&path) {
        state.records.delete(id).await?;
    }
    Ok(redirect(LISTING_PATH))
}

/// Edit form pre-filled from the stored record.
#[get(r"/user/modify/{id:\d+}")]
pub async fn modify_form(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(id) = path_id(&path) else {
        return Ok(HttpResponse::NotFound().finish());
    };
    let lookup = state.records.modify_form(id).await?;
    lookup_page(&state, lookup, |user| View::edit_form(&user))
}

/// Register every record route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(root)
        .service(list)
        .service(create)
        .service(delete)
        .service(modify_form)
        .service(view);
}
