use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::account::models::Account;
use crate::domain::auth::policy;
use crate::post::errors::PostError;
use crate::post::models::CreatePostCommand;
use crate::post::models::Post;
use crate::post::models::PostAuthor;
use crate::post::models::PostDetails;
use crate::post::models::PostFilter;
use crate::post::models::PostId;
use crate::post::models::UpdatePostCommand;
use crate::post::ports::PostRepository;
use crate::post::ports::PostServicePort;

/// Domain service implementation for post operations.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    async fn find_existing(&self, id: &PostId) -> Result<Post, PostError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(
        &self,
        author: &Account,
        command: CreatePostCommand,
    ) -> Result<PostDetails, PostError> {
        let now = Utc::now();
        let post = Post {
            id: PostId::new(),
            title: command.title,
            content: command.content,
            author_id: author.id,
            tags: command.tags,
            status: command.status,
            views: 0,
            created_at: now,
            updated_at: now,
        };

        let post = self.repository.create(post).await?;

        tracing::info!(post_id = %post.id, author_id = %author.id, "Post created");

        Ok(PostDetails {
            post,
            author: PostAuthor::from(author),
        })
    }

    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<PostDetails>, PostError> {
        self.repository.list_all(&filter).await
    }

    async fn get_post(&self, id: &PostId) -> Result<PostDetails, PostError> {
        self.repository.increment_views(id).await
    }

    async fn update_post(
        &self,
        actor: &Account,
        id: &PostId,
        command: UpdatePostCommand,
    ) -> Result<PostDetails, PostError> {
        let post = self.find_existing(id).await?;

        policy::ensure_owner(actor, &post)?;

        let updated = self.repository.update(command.apply(post, Utc::now())).await?;

        tracing::info!(post_id = %updated.id, actor_id = %actor.id, "Post updated");

        // Only the author gets past the ownership guard.
        Ok(PostDetails {
            post: updated,
            author: PostAuthor::from(actor),
        })
    }

    async fn delete_post(&self, actor: &Account, id: &PostId) -> Result<(), PostError> {
        let post = self.find_existing(id).await?;

        policy::ensure_can_remove_post(actor, &post)?;

        self.repository.delete(id).await?;

        tracing::info!(post_id = %id, actor_id = %actor.id, "Post deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::account::models::AccountId;
    use crate::account::models::AccountStatus;
    use crate::account::models::EmailAddress;
    use crate::account::models::PersonName;
    use crate::account::models::Role;
    use crate::domain::auth::policy::PolicyViolation;
    use crate::post::models::PostContent;
    use crate::post::models::PostStatus;
    use crate::post::models::PostTitle;

    mock! {
        pub TestPostRepository {}

        #[async_trait]
        impl PostRepository for TestPostRepository {
            async fn create(&self, post: Post) -> Result<Post, PostError>;
            async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError>;
            async fn list_all(&self, filter: &PostFilter) -> Result<Vec<PostDetails>, PostError>;
            async fn increment_views(&self, id: &PostId) -> Result<PostDetails, PostError>;
            async fn update(&self, post: Post) -> Result<Post, PostError>;
            async fn delete(&self, id: &PostId) -> Result<(), PostError>;
        }
    }

    fn account(role: Role) -> Account {
        let now = Utc::now();
        Account {
            id: AccountId::new(),
            first_name: PersonName::new("Test".to_string()).unwrap(),
            last_name: PersonName::new("Account".to_string()).unwrap(),
            email: EmailAddress::new(format!("{}@example.com", role)).unwrap(),
            role,
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    fn post_by(author: &Account) -> Post {
        let now = Utc::now();
        Post {
            id: PostId::new(),
            title: PostTitle::new("Title".to_string()).unwrap(),
            content: PostContent::new("Body".to_string()).unwrap(),
            author_id: author.id,
            tags: vec![],
            status: PostStatus::Draft,
            views: 3,
            created_at: now,
            updated_at: now,
        }
    }

    fn repository_with(post: &Post) -> MockTestPostRepository {
        let mut repository = MockTestPostRepository::new();
        let returned = post.clone();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(returned.clone())));
        repository
    }

    #[tokio::test]
    async fn test_create_post_sets_author_and_defaults() {
        let author = account(Role::User);
        let author_id = author.id;

        let mut repository = MockTestPostRepository::new();
        repository
            .expect_create()
            .withf(move |post| {
                post.author_id == author_id && post.views == 0 && post.status == PostStatus::Draft
            })
            .times(1)
            .returning(Ok);

        let service = PostService::new(Arc::new(repository));

        let command = CreatePostCommand::new(
            PostTitle::new("Hello".to_string()).unwrap(),
            PostContent::new("World".to_string()).unwrap(),
        );
        let details = service.create_post(&author, command).await.unwrap();

        assert_eq!(details.post.author_id, author.id);
        assert_eq!(details.author, PostAuthor::from(&author));
        assert!(details.post.tags.is_empty());
    }

    #[tokio::test]
    async fn test_get_post_counts_view_without_rewriting_post() {
        let author = account(Role::User);
        let stored = post_by(&author);
        let post_id = stored.id;

        let mut repository = MockTestPostRepository::new();
        let viewed = PostDetails {
            post: Post {
                views: stored.views + 1,
                ..stored.clone()
            },
            author: PostAuthor::from(&author),
        };
        repository
            .expect_increment_views()
            .withf(move |id| *id == post_id)
            .times(1)
            .returning(move |_| Ok(viewed.clone()));
        repository.expect_find_by_id().times(0);
        repository.expect_update().times(0);

        let service = PostService::new(Arc::new(repository));

        let details = service.get_post(&stored.id).await.unwrap();
        assert_eq!(details.post.views, 4);
        assert_eq!(details.author.id, author.id);
    }

    #[tokio::test]
    async fn test_get_post_not_found() {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_increment_views()
            .returning(|id| Err(PostError::NotFound(id.to_string())));
        repository.expect_update().times(0);

        let service = PostService::new(Arc::new(repository));

        let result = service.get_post(&PostId::new()).await;
        assert!(matches!(result, Err(PostError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_post_by_author() {
        let author = account(Role::User);
        let stored = post_by(&author);

        let mut repository = repository_with(&stored);
        repository
            .expect_update()
            .withf(|post| post.title.as_str() == "Renamed" && post.content.as_str() == "Body")
            .times(1)
            .returning(Ok);

        let service = PostService::new(Arc::new(repository));

        let update = UpdatePostCommand::new(
            Some(PostTitle::new("Renamed".to_string()).unwrap()),
            None,
            None,
            None,
        )
        .unwrap();
        let details = service
            .update_post(&author, &stored.id, update)
            .await
            .unwrap();

        assert_eq!(details.post.title.as_str(), "Renamed");
        assert_eq!(details.post.views, stored.views);
        assert_eq!(details.author.id, author.id);
    }

    #[tokio::test]
    async fn test_update_post_by_admin_is_forbidden() {
        let author = account(Role::User);
        let stored = post_by(&author);

        let mut repository = repository_with(&stored);
        repository.expect_update().times(0);

        let service = PostService::new(Arc::new(repository));

        let update = UpdatePostCommand::new(None, None, None, Some(PostStatus::Archived)).unwrap();
        let result = service
            .update_post(&account(Role::Admin), &stored.id, update)
            .await;

        assert!(matches!(
            result,
            Err(PostError::Forbidden(PolicyViolation::NotAuthor))
        ));
    }

    #[tokio::test]
    async fn test_delete_post_by_moderator() {
        let author = account(Role::User);
        let stored = post_by(&author);
        let post_id = stored.id;

        let mut repository = repository_with(&stored);
        repository
            .expect_delete()
            .withf(move |id| *id == post_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = PostService::new(Arc::new(repository));

        assert!(service
            .delete_post(&account(Role::Moderator), &stored.id)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_delete_post_by_stranger_is_forbidden() {
        let author = account(Role::User);
        let stored = post_by(&author);

        let mut repository = repository_with(&stored);
        repository.expect_delete().times(0);

        let service = PostService::new(Arc::new(repository));

        let result = service.delete_post(&account(Role::User), &stored.id).await;
        assert!(matches!(
            result,
            Err(PostError::Forbidden(PolicyViolation::CannotRemovePost))
        ));
    }

    #[tokio::test]
    async fn test_list_posts_passes_filter() {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_list_all()
            .withf(|filter| filter.tag.as_deref() == Some("rust"))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = PostService::new(Arc::new(repository));

        let posts = service
            .list_posts(PostFilter {
                status: None,
                tag: Some("rust".to_string()),
            })
            .await
            .unwrap();
        assert!(posts.is_empty());
    }
}
