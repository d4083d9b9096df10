use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::filter::TaskFilter;
use crate::models::{Post, Task};

use super::{StoreError, StoreResult};

trait Record: Clone {
    fn id(&self) -> &str;
    fn slug(&self) -> &str;
}

impl Record for Post {
    fn id(&self) -> &str {
        &self.id
    }
    fn slug(&self) -> &str {
        &self.slug
    }
}

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Insertion-ordered rows behind a lock. The uniqueness check and the write
/// happen under the same write guard.
#[derive(Default)]
pub struct MemoryStore {
    posts: RwLock<Vec<Post>>,
    tasks: RwLock<Vec<Task>>,
}

fn read<T>(lock: &RwLock<Vec<T>>) -> StoreResult<RwLockReadGuard<'_, Vec<T>>> {
    lock.read()
        .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<Vec<T>>) -> StoreResult<RwLockWriteGuard<'_, Vec<T>>> {
    lock.write()
        .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
}

fn insert<T: Record>(lock: &RwLock<Vec<T>>, record: &T) -> StoreResult<()> {
    let mut rows = write(lock)?;
    if rows.iter().any(|r| r.slug() == record.slug()) {
        return Err(StoreError::DuplicateSlug(record.slug().to_string()));
    }
    rows.push(record.clone());
    Ok(())
}

fn update<T: Record>(lock: &RwLock<Vec<T>>, record: &T) -> StoreResult<()> {
    let mut rows = write(lock)?;
    if rows
        .iter()
        .any(|r| r.slug() == record.slug() && r.id() != record.id())
    {
        return Err(StoreError::DuplicateSlug(record.slug().to_string()));
    }
    match rows.iter_mut().find(|r| r.id() == record.id()) {
        Some(row) => {
            *row = record.clone();
            Ok(())
        }
        None => Err(StoreError::Backend(format!("no record with id {}", record.id()))),
    }
}

fn by_slug<T: Record>(lock: &RwLock<Vec<T>>, slug: &str) -> StoreResult<Option<T>> {
    Ok(read(lock)?.iter().find(|r| r.slug() == slug).cloned())
}

impl MemoryStore {
    pub fn list_posts(&self) -> StoreResult<Vec<Post>> {
        Ok(read(&self.posts)?.clone())
    }

    pub fn post_by_slug(&self, slug: &str) -> StoreResult<Option<Post>> {
        by_slug(&self.posts, slug)
    }

    pub fn insert_post(&self, post: &Post) -> StoreResult<()> {
        insert(&self.posts, post)
    }

    pub fn update_post(&self, post: &Post) -> StoreResult<()> {
        update(&self.posts, post)
    }

    pub fn list_tasks(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        Ok(filter.apply(read(&self.tasks)?.iter().cloned()))
    }

    pub fn task_by_slug(&self, slug: &str) -> StoreResult<Option<Task>> {
        by_slug(&self.tasks, slug)
    }

    pub fn insert_task(&self, task: &Task) -> StoreResult<()> {
        insert(&self.tasks, task)
    }

    pub fn update_task(&self, task: &Task) -> StoreResult<()> {
        update(&self.tasks, task)
    }

    pub fn delete_task(&self, id: &str) -> StoreResult<bool> {
        let mut rows = write(&self.tasks)?;
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() != before)
    }
}
