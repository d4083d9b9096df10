//! Blog post pages: list, detail, add and edit. Posts are never deleted.

use actix_web::{web, HttpResponse};
use log::{info, warn};
use tera::Context;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::forms::{FormErrors, PostForm};
use crate::models::Post;
use crate::redirect;
use crate::templates::{error_context, render};

const FORM_FIELDS: &[&str] = &["title", "content"];

fn render_form(
    data: &AppState,
    heading: &str,
    action: &str,
    form: &PostForm,
    errors: &FormErrors,
) -> Result<HttpResponse, AppError> {
    let mut ctx = error_context(errors, FORM_FIELDS);
    ctx.insert("heading", heading);
    ctx.insert("action", action);
    ctx.insert("form", form);
    render(data, "posts/form.html", ctx)
}

async fn find_post(data: &AppState, slug: &str) -> Result<Post, AppError> {
    data.store
        .post_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound {
            entity: "Post",
            slug: slug.to_string(),
        })
}

/// GET /posts/
pub async fn post_list(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let posts = data.store.list_posts().await?;
    let mut ctx = Context::new();
    ctx.insert("empty", &posts.is_empty());
    ctx.insert("posts", &posts);
    render(&data, "posts/list.html", ctx)
}

/// GET /posts/{slug}/
/// An unknown slug answers 200 with a plain-text notice, not a 404 page.
pub async fn post_detail(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    match data.store.post_by_slug(&slug).await? {
        Some(post) => {
            let mut ctx = Context::new();
            ctx.insert("post", &post);
            render(&data, "posts/detail.html", ctx)
        }
        None => {
            warn!("Post not found: {}", slug);
            Ok(HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Post with slug \"{slug}\" does not exist!")))
        }
    }
}

/// GET /posts/add/
pub async fn add_post_form(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    render_form(
        &data,
        "Add post",
        "/posts/add/",
        &PostForm::default(),
        &FormErrors::default(),
    )
}

/// POST /posts/add/
pub async fn add_post(
    data: web::Data<AppState>,
    form: web::Form<PostForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    match form.validate() {
        Ok(draft) => {
            let post = Post::new(draft);
            data.store.insert_post(&post).await?;
            info!("Post created: {}", post.slug);
            Ok(redirect("/posts/"))
        }
        Err(errors) => {
            warn!("Rejected post form: {:?}", errors);
            render_form(&data, "Add post", "/posts/add/", &form, &errors)
        }
    }
}

/// GET /posts/{slug}/edit/
pub async fn edit_post_form(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let post = find_post(&data, &path).await?;
    let form = PostForm {
        title: post.title.clone(),
        content: post.content.clone(),
    };
    let action = format!("/posts/{}/edit/", post.slug);
    render_form(&data, "Edit post", &action, &form, &FormErrors::default())
}

/// POST /posts/{slug}/edit/
pub async fn edit_post(
    data: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<PostForm>,
) -> Result<HttpResponse, AppError> {
    let mut post = find_post(&data, &path).await?;
    let form = form.into_inner();
    match form.validate() {
        Ok(draft) => {
            post.apply(draft);
            data.store.update_post(&post).await?;
            info!("Post updated: {} -> {}", path.as_str(), post.slug);
            Ok(redirect(&format!("/posts/{}/", post.slug)))
        }
        Err(errors) => {
            warn!("Rejected post form for {}: {:?}", post.slug, errors);
            let action = format!("/posts/{}/edit/", post.slug);
            render_form(&data, "Edit post", &action, &form, &errors)
        }
    }
}
