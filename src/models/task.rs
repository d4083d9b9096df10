use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slug::slugify;

/// A TODO item, stored as one document in the `tasks` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unique across all tasks; derived from `name`.
    pub slug: String,
    /// Older documents used `done` for the same flag.
    #[serde(default, alias = "done")]
    pub completed: bool,
    #[serde(default)]
    pub complete_before: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated task form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub complete_before: Option<DateTime<Utc>>,
    /// Only the edit form carries the completion checkbox.
    pub completed: Option<bool>,
}

impl Task {
    pub fn new(draft: TaskDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            slug: slugify(&draft.name),
            name: draft.name,
            description: draft.description,
            completed: draft.completed.unwrap_or(false),
            complete_before: draft.complete_before,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields and recompute the slug from the new name.
    pub fn apply(&mut self, draft: TaskDraft) {
        self.slug = slugify(&draft.name);
        self.name = draft.name;
        self.description = draft.description;
        self.complete_before = draft.complete_before;
        if let Some(completed) = draft.completed {
            self.completed = completed;
        }
        self.touch();
    }

    /// Invert the completion flag. Two toggles restore the original state.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
        self.touch();
    }

    // updated_at must end up strictly after created_at even when the clock
    // has not advanced since creation.
    fn touch(&mut self) {
        let now = Utc::now();
        let floor = self.updated_at.max(self.created_at) + Duration::microseconds(1);
        self.updated_at = now.max(floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> TaskDraft {
        TaskDraft {
            name: name.to_string(),
            description: "A description".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn new_task_has_defaults() {
        let task = Task::new(TaskDraft {
            name: "A task name".to_string(),
            ..Default::default()
        });
        assert_eq!(task.slug, "a-task-name");
        assert_eq!(task.description, "");
        assert!(!task.completed);
        assert!(task.complete_before.is_none());
        assert_eq!(task.created_at, task.updated_at);
        assert!(!task.id.is_empty());
    }

    #[test]
    fn apply_recomputes_slug_and_bumps_updated_at() {
        let mut task = Task::new(draft("Old name"));
        task.apply(draft("A new task name"));
        assert_eq!(task.name, "A new task name");
        assert_eq!(task.slug, "a-new-task-name");
        assert!(task.updated_at > task.created_at);
    }

    #[test]
    fn apply_without_checkbox_keeps_completion() {
        let mut task = Task::new(draft("Something"));
        task.completed = true;
        task.apply(draft("Something else"));
        assert!(task.completed);

        task.apply(TaskDraft {
            completed: Some(false),
            ..draft("Something else")
        });
        assert!(!task.completed);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut task = Task::new(draft("Flip me"));
        let before = task.completed;
        task.toggle();
        assert_ne!(task.completed, before);
        task.toggle();
        assert_eq!(task.completed, before);
        assert!(task.updated_at > task.created_at);
    }

    #[test]
    fn legacy_done_field_is_read_as_completed() {
        let json = serde_json::json!({
            "_id": "abc",
            "name": "Legacy",
            "slug": "legacy",
            "done": true,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
        });
        let task: Task = serde_json::from_value(json).unwrap();
        assert!(task.completed);
        assert_eq!(task.description, "");
    }
}
