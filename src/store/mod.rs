//! Entity store for posts and tasks.
//!
//! Two interchangeable backends: MongoDB for deployments and an in-memory
//! store for local runs and tests. Both enforce slug uniqueness at write
//! time and report a collision as [`StoreError::DuplicateSlug`].

mod memory;
mod mongo;

use thiserror::Error;

use crate::config::Config;
use crate::filter::TaskFilter;
use crate::models::{Post, Task};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a record with slug \"{0}\" already exists")]
    DuplicateSlug(String),
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

pub enum Store {
    Memory(MemoryStore),
    Mongo(MongoStore),
}

impl Store {
    /// Pick the backend from the configuration: Mongo when `mongo_uri` is set.
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        match &config.mongo_uri {
            Some(uri) => Ok(Store::Mongo(MongoStore::init(uri, &config.database_name).await?)),
            None => Ok(Store::Memory(MemoryStore::default())),
        }
    }

    pub fn memory() -> Self {
        Store::Memory(MemoryStore::default())
    }

    pub async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        match self {
            Store::Memory(s) => s.list_posts(),
            Store::Mongo(s) => s.list_posts().await,
        }
    }

    pub async fn post_by_slug(&self, slug: &str) -> StoreResult<Option<Post>> {
        match self {
            Store::Memory(s) => s.post_by_slug(slug),
            Store::Mongo(s) => s.post_by_slug(slug).await,
        }
    }

    pub async fn insert_post(&self, post: &Post) -> StoreResult<()> {
        match self {
            Store::Memory(s) => s.insert_post(post),
            Store::Mongo(s) => s.insert_post(post).await,
        }
    }

    pub async fn update_post(&self, post: &Post) -> StoreResult<()> {
        match self {
            Store::Memory(s) => s.update_post(post),
            Store::Mongo(s) => s.update_post(post).await,
        }
    }

    pub async fn list_tasks(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        match self {
            Store::Memory(s) => s.list_tasks(filter),
            Store::Mongo(s) => s.list_tasks(filter).await,
        }
    }

    pub async fn task_by_slug(&self, slug: &str) -> StoreResult<Option<Task>> {
        match self {
            Store::Memory(s) => s.task_by_slug(slug),
            Store::Mongo(s) => s.task_by_slug(slug).await,
        }
    }

    pub async fn insert_task(&self, task: &Task) -> StoreResult<()> {
        match self {
            Store::Memory(s) => s.insert_task(task),
            Store::Mongo(s) => s.insert_task(task).await,
        }
    }

    pub async fn update_task(&self, task: &Task) -> StoreResult<()> {
        match self {
            Store::Memory(s) => s.update_task(task),
            Store::Mongo(s) => s.update_task(task).await,
        }
    }

    /// Returns `false` when no task had that id.
    pub async fn delete_task(&self, id: &str) -> StoreResult<bool> {
        match self {
            Store::Memory(s) => s.delete_task(id),
            Store::Mongo(s) => s.delete_task(id).await,
        }
    }
}
