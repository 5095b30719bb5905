use async_trait::async_trait;

use crate::account::models::Account;
use crate::post::errors::PostError;
use crate::post::models::CreatePostCommand;
use crate::post::models::Post;
use crate::post::models::PostDetails;
use crate::post::models::PostFilter;
use crate::post::models::PostId;
use crate::post::models::UpdatePostCommand;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a post authored by `author`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(
        &self,
        author: &Account,
        command: CreatePostCommand,
    ) -> Result<PostDetails, PostError>;

    /// List posts matching `filter`, newest first, with their authors.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<PostDetails>, PostError>;

    /// Retrieve a post with its author and count the read.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: &PostId) -> Result<PostDetails, PostError>;

    /// Apply a partial update on behalf of `actor`.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `Forbidden` - Actor is not the author
    /// * `DatabaseError` - Database operation failed
    async fn update_post(
        &self,
        actor: &Account,
        id: &PostId,
        command: UpdatePostCommand,
    ) -> Result<PostDetails, PostError>;

    /// Delete a post on behalf of `actor`.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `Forbidden` - Actor is neither the author nor staff
    /// * `DatabaseError` - Database operation failed
    async fn delete_post(&self, actor: &Account, id: &PostId) -> Result<(), PostError>;
}

/// Persistence operations for the post aggregate.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, post: Post) -> Result<Post, PostError>;

    /// Retrieve post by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError>;

    /// Retrieve posts matching `filter` joined with their authors, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self, filter: &PostFilter) -> Result<Vec<PostDetails>, PostError>;

    /// Add one view in a single atomic step and return the stored post with
    /// its author. Other fields are left as stored.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn increment_views(&self, id: &PostId) -> Result<PostDetails, PostError>;

    /// Overwrite title, content, tags and status of a stored post. The view
    /// counter is left as stored.
    ///
    /// # Returns
    /// The post as stored after the write
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, post: Post) -> Result<Post, PostError>;

    /// Remove post from storage.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &PostId) -> Result<(), PostError>;
}
