//! In-memory Storage
//!
//! Process-local implementations of the repository traits. All three
//! repositories share one set of tables so that cascading deletes and
//! foreign-key checks behave like the PostgreSQL schema.
//!
//! Used with `database.backend = "memory"` and by the HTTP test-suite.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{
    Comment, CommentRepository, Page, Post, PostRepository, User, UserRepository,
};
use crate::shared::error::AppError;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
}

impl Tables {
    fn username_taken(&self, username: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.username == username && Some(u.id) != except)
    }

    fn remove_post(&mut self, post_id: i64) -> Option<Post> {
        let post = self.posts.remove(&post_id)?;
        self.comments.retain(|_, c| c.post_id != post_id);
        Some(post)
    }
}

/// Shared handle to the in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            store: self.clone(),
        }
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            store: self.clone(),
        }
    }

    pub fn comments(&self) -> InMemoryCommentRepository {
        InMemoryCommentRepository {
            store: self.clone(),
        }
    }
}

fn duplicate_username() -> AppError {
    AppError::field("username", "A user with that username already exists.")
}

/// In-memory `UserRepository`.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.store.tables.read().users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .store
            .tables
            .read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, AppError> {
        Ok(page.apply(self.store.tables.read().users.values().cloned()))
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut tables = self.store.tables.write();
        if tables.username_taken(&user.username, None) {
            return Err(duplicate_username());
        }
        if tables.users.contains_key(&user.id) {
            return Err(AppError::Internal(format!("duplicate user id {}", user.id)));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut tables = self.store.tables.write();
        if tables.username_taken(&user.username, Some(user.id)) {
            return Err(duplicate_username());
        }
        let stored = tables
            .users
            .get_mut(&user.id)
            .ok_or_else(|| AppError::NotFound("User not found.".into()))?;
        stored.username = user.username.clone();
        stored.email = user.email.clone();
        stored.password_hash = user.password_hash.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tables = self.store.tables.write();
        if tables.users.remove(&id).is_none() {
            return Err(AppError::NotFound("User not found.".into()));
        }

        let authored: Vec<i64> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in authored {
            tables.remove_post(post_id);
        }
        tables.comments.retain(|_, c| c.author_id != id);

        Ok(())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.store.tables.read().username_taken(username, None))
    }

    async fn add_to_group(&self, user_id: i64, group: &str) -> Result<(), AppError> {
        let mut tables = self.store.tables.write();
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("User not found.".into()))?;
        user.groups.insert(group.to_string());
        Ok(())
    }

    async fn remove_from_group(&self, user_id: i64, group: &str) -> Result<(), AppError> {
        if let Some(user) = self.store.tables.write().users.get_mut(&user_id) {
            user.groups.remove(group);
        }
        Ok(())
    }
}

/// In-memory `PostRepository`.
#[derive(Debug, Clone)]
pub struct InMemoryPostRepository {
    store: InMemoryStore,
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        Ok(self.store.tables.read().posts.get(&id).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<Post>, AppError> {
        let tables = self.store.tables.read();
        // Snowflake ids are time-ordered, so reverse id order is newest first.
        Ok(page.apply(tables.posts.values().rev().cloned()))
    }

    async fn create(&self, post: &Post) -> Result<Post, AppError> {
        let mut tables = self.store.tables.write();
        if !tables.users.contains_key(&post.author_id) {
            return Err(AppError::NotFound("User not found.".into()));
        }
        tables.posts.insert(post.id, post.clone());
        Ok(post.clone())
    }

    async fn update(&self, post: &Post) -> Result<Post, AppError> {
        let mut tables = self.store.tables.write();
        let stored = tables
            .posts
            .get_mut(&post.id)
            .ok_or_else(|| AppError::NotFound("Post not found.".into()))?;
        stored.title = post.title.clone();
        stored.content = post.content.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.store
            .tables
            .write()
            .remove_post(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Post not found.".into()))
    }
}

/// In-memory `CommentRepository`.
#[derive(Debug, Clone)]
pub struct InMemoryCommentRepository {
    store: InMemoryStore,
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError> {
        Ok(self.store.tables.read().comments.get(&id).cloned())
    }

    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        Ok(self
            .store
            .tables
            .read()
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create(&self, comment: &Comment) -> Result<Comment, AppError> {
        let mut tables = self.store.tables.write();
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(AppError::NotFound("Post not found.".into()));
        }
        if !tables.users.contains_key(&comment.author_id) {
            return Err(AppError::NotFound("User not found.".into()));
        }
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment.clone())
    }

    async fn update(&self, comment: &Comment) -> Result<Comment, AppError> {
        let mut tables = self.store.tables.write();
        let stored = tables
            .comments
            .get_mut(&comment.id)
            .ok_or_else(|| AppError::NotFound("Comment not found.".into()))?;
        stored.content = comment.content.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.store
            .tables
            .write()
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Comment not found.".into()))
    }
}
