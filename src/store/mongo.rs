use futures_util::StreamExt;
use log::info;
use mongodb::bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::de::DeserializeOwned;

use crate::filter::TaskFilter;
use crate::models::{Post, Task};

use super::{StoreError, StoreResult};

const DUPLICATE_KEY: i32 = 11000;

pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn init(uri: &str, db_name: &str) -> StoreResult<Self> {
        let client_options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(client_options)?;
        let store = MongoStore {
            db: client.database(db_name),
        };
        store.ensure_slug_index("posts").await?;
        store.ensure_slug_index("tasks").await?;
        info!("Connected to MongoDB database {}", db_name);
        Ok(store)
    }

    async fn ensure_slug_index(&self, name: &str) -> StoreResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.db
            .collection::<Document>(name)
            .create_index(index)
            .await?;
        Ok(())
    }

    fn posts(&self) -> Collection<Post> {
        self.db.collection::<Post>("posts")
    }

    fn tasks(&self) -> Collection<Task> {
        self.db.collection::<Task>("tasks")
    }

    pub async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        let mut posts = drain(self.posts(), doc! {}).await?;
        posts.sort_by_key(|p| p.created_at);
        Ok(posts)
    }

    pub async fn post_by_slug(&self, slug: &str) -> StoreResult<Option<Post>> {
        Ok(self.posts().find_one(doc! { "slug": slug }).await?)
    }

    pub async fn insert_post(&self, post: &Post) -> StoreResult<()> {
        self.posts()
            .insert_one(post)
            .await
            .map_err(|e| classify(e, &post.slug))?;
        Ok(())
    }

    pub async fn update_post(&self, post: &Post) -> StoreResult<()> {
        let res = self
            .posts()
            .replace_one(doc! { "_id": &post.id }, post)
            .await
            .map_err(|e| classify(e, &post.slug))?;
        if res.matched_count == 0 {
            return Err(StoreError::Backend(format!("no post with id {}", post.id)));
        }
        Ok(())
    }

    pub async fn list_tasks(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        Ok(select_tasks(drain(self.tasks(), doc! {}).await?, filter))
    }

    pub async fn task_by_slug(&self, slug: &str) -> StoreResult<Option<Task>> {
        Ok(self.tasks().find_one(doc! { "slug": slug }).await?)
    }

    pub async fn insert_task(&self, task: &Task) -> StoreResult<()> {
        self.tasks()
            .insert_one(task)
            .await
            .map_err(|e| classify(e, &task.slug))?;
        Ok(())
    }

    pub async fn update_task(&self, task: &Task) -> StoreResult<()> {
        let res = self
            .tasks()
            .replace_one(doc! { "_id": &task.id }, task)
            .await
            .map_err(|e| classify(e, &task.slug))?;
        if res.matched_count == 0 {
            return Err(StoreError::Backend(format!("no task with id {}", task.id)));
        }
        Ok(())
    }

    pub async fn delete_task(&self, id: &str) -> StoreResult<bool> {
        let res = self.tasks().delete_one(doc! { "_id": id }).await?;
        Ok(res.deleted_count > 0)
    }
}

/// Filters after decoding: documents may lack `completed` or carry the
/// legacy `done` key, and only `Task`'s serde defaults read both the same.
fn select_tasks(tasks: Vec<Task>, filter: TaskFilter) -> Vec<Task> {
    let mut tasks = filter.apply(tasks);
    tasks.sort_by_key(|t| t.created_at);
    tasks
}

async fn drain<T>(coll: Collection<T>, filter: Document) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let mut cursor = coll.find(filter).await?;
    let mut rows = vec![];
    while let Some(row) = cursor.next().await {
        rows.push(row?);
    }
    Ok(rows)
}

fn classify(err: mongodb::error::Error, slug: &str) -> StoreError {
    let duplicate = matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY
    );
    if duplicate {
        StoreError::DuplicateSlug(slug.to_string())
    } else {
        err.into()
    }
}
