use crate::models::Task;

/// Tri-state selector behind the three task list views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl TaskFilter {
    pub fn from_completed(completed: Option<bool>) -> Self {
        match completed {
            None => TaskFilter::All,
            Some(true) => TaskFilter::Completed,
            Some(false) => TaskFilter::Pending,
        }
    }

    /// The flag value this filter selects on, `None` meaning "any".
    pub fn completed(self) -> Option<bool> {
        match self {
            TaskFilter::All => None,
            TaskFilter::Completed => Some(true),
            TaskFilter::Pending => Some(false),
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        self.completed().map_or(true, |flag| task.completed == flag)
    }

    pub fn apply<I>(self, tasks: I) -> Vec<Task>
    where
        I: IntoIterator<Item = Task>,
    {
        tasks.into_iter().filter(|t| self.matches(t)).collect()
    }

    pub fn heading(self) -> &'static str {
        match self {
            TaskFilter::All => "All tasks",
            TaskFilter::Completed => "Completed tasks",
            TaskFilter::Pending => "Pending tasks",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            TaskFilter::All => "/tasks/",
            TaskFilter::Completed => "/tasks/completed/",
            TaskFilter::Pending => "/tasks/pending/",
        }
    }
}
