mod post;
mod task;

pub use post::{Post, PostDraft};
pub use task::{Task, TaskDraft};
