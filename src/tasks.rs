// src/tasks.rs

use actix_web::{web, HttpResponse};
use log::{info, warn};
use tera::Context;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::filter::TaskFilter;
use crate::forms::{FormErrors, TaskForm, TaskFormKind};
use crate::models::Task;
use crate::redirect;
use crate::templates::{error_context, render};

const FORM_FIELDS: &[&str] = &["name", "description", "complete_before"];

fn detail_url(task: &Task) -> String {
    format!("/tasks/{}/", task.slug)
}

async fn find_task(data: &AppState, slug: &str) -> Result<Task, AppError> {
    match data.store.task_by_slug(slug).await? {
        Some(task) => Ok(task),
        None => {
            warn!("Task not found: {}", slug);
            Err(AppError::task_not_found(slug))
        }
    }
}

async fn render_list(data: &AppState, filter: TaskFilter) -> Result<HttpResponse, AppError> {
    let tasks = data.store.list_tasks(filter).await?;
    let mut ctx = Context::new();
    ctx.insert("heading", filter.heading());
    ctx.insert("empty", &tasks.is_empty());
    ctx.insert("tasks", &tasks);
    render(data, "tasks/list.html", ctx)
}

fn render_form(
    data: &AppState,
    kind: TaskFormKind,
    action: &str,
    form: &TaskForm,
    errors: &FormErrors,
) -> Result<HttpResponse, AppError> {
    let mut ctx = error_context(errors, FORM_FIELDS);
    let heading = match kind {
        TaskFormKind::Add => "Add task",
        TaskFormKind::Edit => "Edit task",
    };
    ctx.insert("heading", heading);
    ctx.insert("action", action);
    ctx.insert("form", form);
    ctx.insert("with_completed", &(kind == TaskFormKind::Edit));
    ctx.insert("checked", &form.is_checked());
    render(data, "tasks/form.html", ctx)
}

/// GET /tasks/
pub async fn task_list(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    render_list(&data, TaskFilter::All).await
}

/// GET /tasks/completed/
pub async fn completed_task_list(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    render_list(&data, TaskFilter::Completed).await
}

/// GET /tasks/pending/
pub async fn pending_task_list(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    render_list(&data, TaskFilter::Pending).await
}

/// GET /tasks/{slug}/
pub async fn task_detail(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let task = find_task(&data, &path).await?;
    let deadline = task
        .complete_before
        .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default();

    let mut ctx = Context::new();
    ctx.insert("task", &task);
    ctx.insert("deadline", &deadline);
    render(&data, "tasks/detail.html", ctx)
}

/// GET /tasks/add/
pub async fn add_task_form(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    render_form(
        &data,
        TaskFormKind::Add,
        "/tasks/add/",
        &TaskForm::default(),
        &FormErrors::default(),
    )
}

/// POST /tasks/add/
/// The slug comes from the name; a clash with an existing task is a store error.
pub async fn add_task(
    data: web::Data<AppState>,
    form: web::Form<TaskForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    match form.validate(TaskFormKind::Add) {
        Ok(draft) => {
            let task = Task::new(draft);
            data.store.insert_task(&task).await?;
            info!("Task created: {}", task.slug);
            Ok(redirect(TaskFilter::All.path()))
        }
        Err(errors) => {
            warn!("Rejected task form: {:?}", errors);
            render_form(&data, TaskFormKind::Add, "/tasks/add/", &form, &errors)
        }
    }
}

/// GET /tasks/{slug}/edit/
pub async fn edit_task_form(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let task = find_task(&data, &path).await?;
    let action = format!("/tasks/{}/edit/", task.slug);
    render_form(
        &data,
        TaskFormKind::Edit,
        &action,
        &TaskForm::from_task(&task),
        &FormErrors::default(),
    )
}

/// POST /tasks/{slug}/edit/
/// Redirects to the detail page under the (possibly new) slug.
pub async fn edit_task(
    data: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<TaskForm>,
) -> Result<HttpResponse, AppError> {
    let mut task = find_task(&data, &path).await?;
    let form = form.into_inner();
    match form.validate(TaskFormKind::Edit) {
        Ok(draft) => {
            task.apply(draft);
            data.store.update_task(&task).await?;
            info!("Task updated: {} -> {}", path.as_str(), task.slug);
            Ok(redirect(&detail_url(&task)))
        }
        Err(errors) => {
            warn!("Rejected task form for {}: {:?}", task.slug, errors);
            let action = format!("/tasks/{}/edit/", task.slug);
            render_form(&data, TaskFormKind::Edit, &action, &form, &errors)
        }
    }
}

/// GET /tasks/{slug}/delete/
pub async fn delete_task(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let task = find_task(&data, &path).await?;
    if !data.store.delete_task(&task.id).await? {
        return Err(AppError::task_not_found(path.into_inner()));
    }
    info!("Task deleted: {}", task.slug);
    Ok(redirect(TaskFilter::All.path()))
}

/// GET /tasks/{slug}/toggle/
pub async fn toggle_task(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let mut task = find_task(&data, &path).await?;
    task.toggle();
    data.store.update_task(&task).await?;
    info!("Task toggled: {} (completed = {})", task.slug, task.completed);
    Ok(redirect(TaskFilter::All.path()))
}
