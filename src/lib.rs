pub mod app_state;
pub mod config;
pub mod error;
pub mod filter;
pub mod forms;
pub mod models;
pub mod posts;
pub mod slug;
pub mod store;
pub mod tasks;
pub mod templates;

use actix_web::{http::header, web, HttpResponse};

use crate::posts::{add_post, add_post_form, edit_post, edit_post_form, post_detail, post_list};
use crate::tasks::{
    add_task, add_task_form, completed_task_list, delete_task, edit_task, edit_task_form,
    pending_task_list, task_detail, task_list, toggle_task,
};

/// 302 to `location`, shared by both apps.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

async fn index() -> HttpResponse {
    redirect("/tasks/")
}

/// Register every page. Fixed paths come before `{slug}` so that
/// `/tasks/add/` is never read as a task slug.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        // TASKS
        .service(
            web::scope("/tasks")
                .route("/", web::get().to(task_list))
                .route("/completed/", web::get().to(completed_task_list))
                .route("/pending/", web::get().to(pending_task_list))
                .route("/add/", web::get().to(add_task_form))
                .route("/add/", web::post().to(add_task))
                .route("/{slug}/", web::get().to(task_detail))
                .route("/{slug}/toggle/", web::get().to(toggle_task))
                .route("/{slug}/edit/", web::get().to(edit_task_form))
                .route("/{slug}/edit/", web::post().to(edit_task))
                .route("/{slug}/delete/", web::get().to(delete_task)),
        )
        // POSTS
        .service(
            web::scope("/posts")
                .route("/", web::get().to(post_list))
                .route("/add/", web::get().to(add_post_form))
                .route("/add/", web::post().to(add_post))
                .route("/{slug}/", web::get().to(post_detail))
                .route("/{slug}/edit/", web::get().to(edit_post_form))
                .route("/{slug}/edit/", web::post().to(edit_post)),
        );
}
