//! Post service - owner-scoped CRUD over the post resource.
//!
//! Reads and writes resolve the post by id first (404 when absent), then
//! check ownership (403 on mismatch). Delete resolves by id only.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Post;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::PostRepo;

/// Post service trait for dependency injection.
#[async_trait]
pub trait PostService: Send + Sync {
    /// List all posts owned by a user
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<Post>>;

    /// Create a new post owned by `user_id`
    async fn create(&self, user_id: Uuid, title: String, content: String) -> AppResult<Post>;

    /// Fetch a single post, enforcing ownership
    async fn get(&self, user_id: Uuid, post_id: Uuid) -> AppResult<Post>;

    /// Overwrite title and content of an owned post
    async fn update(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        title: String,
        content: String,
    ) -> AppResult<Post>;

    /// Delete a post by id. Does not check ownership.
    async fn delete(&self, post_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of PostService.
pub struct PostManager {
    posts: Arc<dyn PostRepo>,
}

impl PostManager {
    /// Create new post service instance
    pub fn new(posts: Arc<dyn PostRepo>) -> Self {
        Self { posts }
    }

    /// Resolve a post by id, then enforce ownership
    async fn resolve_owned(&self, user_id: Uuid, post_id: Uuid) -> AppResult<Post> {
        let post = self.posts.find_by_id(post_id).await?.ok_or_not_found()?;

        if !post.is_owned_by(user_id) {
            return Err(AppError::Forbidden);
        }

        Ok(post)
    }
}

#[async_trait]
impl PostService for PostManager {
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<Post>> {
        self.posts.list_by_owner(user_id).await
    }

    async fn create(&self, user_id: Uuid, title: String, content: String) -> AppResult<Post> {
        let post = self.posts.create(user_id, title, content).await?;
        tracing::debug!(post_id = %post.id, user_id = %user_id, "created post");
        Ok(post)
    }

    async fn get(&self, user_id: Uuid, post_id: Uuid) -> AppResult<Post> {
        self.resolve_owned(user_id, post_id).await
    }

    async fn update(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        title: String,
        content: String,
    ) -> AppResult<Post> {
        self.resolve_owned(user_id, post_id).await?;
        self.posts.update(post_id, title, content).await
    }

    async fn delete(&self, post_id: Uuid) -> AppResult<()> {
        // Any authenticated user may delete by id; there is no ownership check here
        self.posts.delete(post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::infra::MockPostRepo;

    fn sample_post(owner: Uuid) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: "Sample Post".to_string(),
            content: "This is a sample post.".to_string(),
            user_id: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn list_delegates_to_owner_scope() {
        let owner = Uuid::new_v4();
        let mut posts = MockPostRepo::new();
        posts
            .expect_list_by_owner()
            .withf(move |id| *id == owner)
            .returning(move |id| Ok(vec![sample_post(id)]));

        let service = PostManager::new(Arc::new(posts));
        let listed = service.list(owner).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_id, owner);
    }

    #[tokio::test]
    async fn get_missing_post_is_not_found() {
        let mut posts = MockPostRepo::new();
        posts.expect_find_by_id().returning(|_| Ok(None));

        let service = PostManager::new(Arc::new(posts));
        let err = service.get(Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn get_foreign_post_is_forbidden() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let post = sample_post(owner);
        let post_id = post.id;

        let mut posts = MockPostRepo::new();
        posts
            .expect_find_by_id()
            .returning(move |_| Ok(Some(post.clone())));

        let service = PostManager::new(Arc::new(posts));
        let err = service.get(stranger, post_id).await.unwrap_err();

        // The post exists, but a non-owner gets 403 rather than its content
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn update_foreign_post_is_forbidden_and_writes_nothing() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let post = sample_post(owner);
        let post_id = post.id;

        let mut posts = MockPostRepo::new();
        posts
            .expect_find_by_id()
            .returning(move |_| Ok(Some(post.clone())));
        posts.expect_update().never();

        let service = PostManager::new(Arc::new(posts));
        let err = service
            .update(
                stranger,
                post_id,
                "New title".to_string(),
                "New content".to_string(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn update_owned_post_overwrites_fields() {
        let owner = Uuid::new_v4();
        let post = sample_post(owner);
        let post_id = post.id;

        let mut posts = MockPostRepo::new();
        posts
            .expect_find_by_id()
            .returning(move |_| Ok(Some(post.clone())));
        posts
            .expect_update()
            .withf(move |id, title, content| {
                *id == post_id && title == "Updated Post" && content == "Updated content"
            })
            .returning(move |id, title, content| {
                let mut updated = sample_post(owner);
                updated.id = id;
                updated.title = title;
                updated.content = content;
                Ok(updated)
            });

        let service = PostManager::new(Arc::new(posts));
        let updated = service
            .update(
                owner,
                post_id,
                "Updated Post".to_string(),
                "Updated content".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Updated Post");
    }

    #[tokio::test]
    async fn delete_does_not_check_ownership() {
        let mut posts = MockPostRepo::new();
        posts.expect_delete().returning(|_| Ok(()));

        let service = PostManager::new(Arc::new(posts));
        assert!(service.delete(Uuid::new_v4()).await.is_ok());
    }

    #[tokio::test]
    async fn delete_missing_post_is_not_found() {
        let mut posts = MockPostRepo::new();
        posts.expect_delete().returning(|_| Err(AppError::NotFound));

        let service = PostManager::new(Arc::new(posts));
        let err = service.delete(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound));
    }
}
