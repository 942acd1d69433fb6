//! Post domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Post domain entity.
///
/// `user_id` is the owning user and is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Post {
    /// Unique post identifier
    #[schema(example = "7f8d2f40-9f6a-4a1e-b7a3-0f2d9c1e5b44")]
    pub id: Uuid,
    /// Post title
    #[schema(example = "Hello world")]
    pub title: String,
    /// Post body
    #[schema(example = "This is my first post.")]
    pub content: String,
    /// Owning user
    pub user_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Check whether `user_id` owns this post
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
