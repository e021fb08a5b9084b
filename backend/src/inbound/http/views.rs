//! Response builders shared by the HTML handlers.

use actix_web::http::header::LOCATION;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;

use crate::domain::ports::{View, ViewRenderer};
use crate::inbound::http::ApiResult;

/// Render `view` with the given status.
pub fn render_with_status(
    renderer: &dyn ViewRenderer,
    status: StatusCode,
    view: &View,
) -> ApiResult<HttpResponse> {
    let body = renderer.render(view)?;
    Ok(HttpResponse::build(status)
        .content_type(renderer.content_type())
        .body(body))
}

/// Render `view` as a `200 OK` page.
pub fn render(renderer: &dyn ViewRenderer, view: &View) -> ApiResult<HttpResponse> {
    render_with_status(renderer, StatusCode::OK, view)
}

/// `302 Found` pointing at `location`.
pub fn redirect(location: impl Into<String>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location.into()))
        .finish()
}
