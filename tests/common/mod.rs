#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::test;

use supertodo::app_state::AppState;
use supertodo::config::Config;
use supertodo::models::{Post, PostDraft, Task, TaskDraft};
use supertodo::store::Store;

pub const TASK_LIST_URL: &str = "/tasks/";
pub const TASK_LIST_COMPLETED_URL: &str = "/tasks/completed/";
pub const TASK_LIST_PENDING_URL: &str = "/tasks/pending/";
pub const TASK_ADD_URL: &str = "/tasks/add/";

pub fn task_detail_url(slug: &str) -> String {
    format!("/tasks/{slug}/")
}

pub fn task_toggle_url(slug: &str) -> String {
    format!("/tasks/{slug}/toggle/")
}

pub fn task_edit_url(slug: &str) -> String {
    format!("/tasks/{slug}/edit/")
}

pub fn task_delete_url(slug: &str) -> String {
    format!("/tasks/{slug}/delete/")
}

pub fn state() -> AppState {
    AppState::new(Config::default(), Store::memory()).unwrap()
}

/// Build the full app around `state` with every route registered.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state.clone()))
                .configure(supertodo::routes),
        )
        .await
    };
}

pub async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn make_task(state: &AppState, name: &str, description: &str, completed: bool) -> Task {
    let mut task = Task::new(TaskDraft {
        name: name.to_string(),
        description: description.to_string(),
        ..Default::default()
    });
    task.completed = completed;
    state.store.insert_task(&task).await.unwrap();
    task
}

/// Ten tasks with a mix of completed and pending.
pub async fn make_tasks(state: &AppState) -> Vec<Task> {
    let mut tasks = vec![];
    for i in 0..10 {
        let name = format!("Task number {i}");
        tasks.push(make_task(state, &name, "Some description", i % 2 == 0).await);
    }
    tasks
}

pub async fn make_post(state: &AppState, title: &str, content: &str) -> Post {
    let post = Post::new(PostDraft {
        title: title.to_string(),
        content: content.to_string(),
    });
    state.store.insert_post(&post).await.unwrap();
    post
}
