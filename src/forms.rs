//! Submitted form payloads and the field checks run on them.
//!
//! Validation never fails the request: it yields either a draft ready for the
//! store or a [`FormErrors`] list that the handler renders next to the inputs.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{PostDraft, Task, TaskDraft};
use crate::slug::slugify;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_DATETIME: &str = "Enter a valid date/time.";
pub const NO_SLUG: &str = "Enter a value containing at least one letter or number.";

pub const POST_TITLE_MAX: usize = 256;
pub const TASK_NAME_MAX: usize = 256;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// Field name to messages, the shape the templates iterate over.
    pub fn by_field(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut map: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for e in &self.0 {
            map.entry(e.field).or_default().push(e.message.clone());
        }
        map
    }
}

/// Which variant of the task form was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFormKind {
    Add,
    /// The edit form also carries the completion checkbox.
    Edit,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub complete_before: String,
    #[serde(default, alias = "done")]
    pub completed: String,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            complete_before: task
                .complete_before
                .map(|d| d.format("%Y-%m-%dT%H:%M").to_string())
                .unwrap_or_default(),
            completed: if task.completed { "on".to_string() } else { String::new() },
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(
            self.completed.trim().to_ascii_lowercase().as_str(),
            "on" | "true" | "1" | "yes"
        )
    }

    pub fn validate(&self, kind: TaskFormKind) -> Result<TaskDraft, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        check_required(&mut errors, "name", name);
        check_sluggable(&mut errors, "name", name);
        check_max_len(&mut errors, "name", name, TASK_NAME_MAX);

        let complete_before = match parse_datetime(&self.complete_before) {
            Ok(value) => value,
            Err(()) => {
                errors.add("complete_before", INVALID_DATETIME);
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TaskDraft {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            complete_before,
            completed: match kind {
                TaskFormKind::Add => None,
                TaskFormKind::Edit => Some(self.is_checked()),
            },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl PostForm {
    pub fn validate(&self) -> Result<PostDraft, FormErrors> {
        let mut errors = FormErrors::default();

        let title = self.title.trim();
        let content = self.content.trim();
        check_required(&mut errors, "title", title);
        check_sluggable(&mut errors, "title", title);
        check_max_len(&mut errors, "title", title, POST_TITLE_MAX);
        check_required(&mut errors, "content", content);

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(PostDraft {
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}

fn check_required(errors: &mut FormErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.add(field, REQUIRED);
    }
}

// Stored records must have a non-empty slug.
fn check_sluggable(errors: &mut FormErrors, field: &'static str, value: &str) {
    if !value.is_empty() && slugify(value).is_empty() {
        errors.add(field, NO_SLUG);
    }
}

fn check_max_len(errors: &mut FormErrors, field: &'static str, value: &str, max: usize) {
    let len = value.chars().count();
    if len > max {
        errors.add(
            field,
            format!("Ensure this value has at most {max} characters (it has {len})."),
        );
    }
}

/// Blank input is `Ok(None)`. Naive values are taken as UTC.
fn parse_datetime(raw: &str) -> Result<Option<DateTime<Utc>>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Some(naive.and_utc()))
        .ok_or(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn missing_name_is_a_required_error() {
        let form = TaskForm {
            description: "A description".to_string(),
            ..Default::default()
        };
        let errors = form.validate(TaskFormKind::Add).unwrap_err();
        assert_eq!(errors.messages_for("name"), vec![REQUIRED]);
        assert!(errors.messages_for("description").is_empty());
    }

    #[test]
    fn whitespace_name_counts_as_blank() {
        let form = TaskForm {
            name: "   ".to_string(),
            ..Default::default()
        };
        assert!(form.validate(TaskFormKind::Add).is_err());
    }

    #[test]
    fn name_without_letters_or_digits_is_rejected() {
        for name in ["!!!", "¿?", "-- __ --"] {
            let form = TaskForm {
                name: name.to_string(),
                ..Default::default()
            };
            let errors = form.validate(TaskFormKind::Add).unwrap_err();
            assert_eq!(errors.messages_for("name"), vec![NO_SLUG], "{name}");
        }
        let post = PostForm {
            title: "???".to_string(),
            content: "Body".to_string(),
        };
        assert_eq!(post.validate().unwrap_err().messages_for("title"), vec![NO_SLUG]);
    }

    #[test]
    fn accented_name_is_accepted() {
        let form = TaskForm {
            name: "Añadir tarea".to_string(),
            ..Default::default()
        };
        assert!(form.validate(TaskFormKind::Add).is_ok());
    }

    #[test]
    fn long_name_is_rejected() {
        let form = TaskForm {
            name: "x".repeat(TASK_NAME_MAX + 1),
            ..Default::default()
        };
        let errors = form.validate(TaskFormKind::Add).unwrap_err();
        assert_eq!(
            errors.messages_for("name"),
            vec!["Ensure this value has at most 256 characters (it has 257)."]
        );
    }

    #[test]
    fn add_form_produces_trimmed_draft_without_completion() {
        let form = TaskForm {
            name: "  A task name ".to_string(),
            description: "A description\n".to_string(),
            completed: "on".to_string(),
            ..Default::default()
        };
        let draft = form.validate(TaskFormKind::Add).unwrap();
        assert_eq!(draft.name, "A task name");
        assert_eq!(draft.description, "A description");
        assert_eq!(draft.completed, None);
        assert_eq!(draft.complete_before, None);
    }

    #[test]
    fn edit_form_reads_checkbox() {
        let mut form = TaskForm {
            name: "Name".to_string(),
            completed: "on".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate(TaskFormKind::Edit).unwrap().completed, Some(true));
        form.completed.clear();
        assert_eq!(form.validate(TaskFormKind::Edit).unwrap().completed, Some(false));
    }

    #[test]
    fn parses_deadline_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 18, 30, 0).unwrap();
        for raw in [
            "2025-03-01T18:30",
            "2025-03-01 18:30:00",
            "2025-03-01T18:30:00Z",
            "2025-03-01T19:30:00+01:00",
        ] {
            assert_eq!(parse_datetime(raw), Ok(Some(expected)), "{raw}");
        }
    }

    #[test]
    fn bad_deadline_is_a_field_error() {
        let form = TaskForm {
            name: "Name".to_string(),
            complete_before: "tomorrow-ish".to_string(),
            ..Default::default()
        };
        let errors = form.validate(TaskFormKind::Add).unwrap_err();
        assert_eq!(errors.messages_for("complete_before"), vec![INVALID_DATETIME]);
    }

    #[test]
    fn post_form_requires_both_fields() {
        let errors = PostForm::default().validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["title", "content"]);
        assert_eq!(errors.by_field()["title"], vec![REQUIRED.to_string()]);
    }
}
