use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slug::slugify;

/// A blog post, looked up publicly by its slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl Post {
    pub fn new(draft: PostDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            slug: slugify(&draft.title),
            title: draft.title,
            content: draft.content,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, draft: PostDraft) {
        self.slug = slugify(&draft.title);
        self.title = draft.title;
        self.content = draft.content;
    }
}
