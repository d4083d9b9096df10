//! HTML pages, compiled into the binary and rendered with Tera.

use actix_web::HttpResponse;
use tera::{Context, Tera};

use crate::app_state::AppState;
use crate::error::AppError;
use crate::forms::FormErrors;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("tasks/list.html", include_str!("../templates/tasks/list.html")),
    ("tasks/detail.html", include_str!("../templates/tasks/detail.html")),
    ("tasks/form.html", include_str!("../templates/tasks/form.html")),
    ("posts/list.html", include_str!("../templates/posts/list.html")),
    ("posts/detail.html", include_str!("../templates/posts/detail.html")),
    ("posts/form.html", include_str!("../templates/posts/form.html")),
];

pub fn engine() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES.iter().copied())?;
    Ok(tera)
}

/// Every listed field gets an entry so templates can loop without guards.
pub fn error_context(errors: &FormErrors, fields: &[&'static str]) -> Context {
    let mut by_field = errors.by_field();
    for field in fields {
        by_field.entry(*field).or_default();
    }
    let mut ctx = Context::new();
    ctx.insert("errors", &by_field);
    ctx
}

pub fn render(state: &AppState, name: &str, mut ctx: Context) -> Result<HttpResponse, AppError> {
    ctx.insert("app_title", &state.config.app_title);
    let html = state.templates.render(name, &ctx)?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
