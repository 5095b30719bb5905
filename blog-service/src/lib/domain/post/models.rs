use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::PersonName;
use crate::post::errors::PostContentError;
use crate::post::errors::PostError;
use crate::post::errors::PostIdError;
use crate::post::errors::PostStatusError;
use crate::post::errors::PostTitleError;

/// Blog post aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub content: PostContent,
    pub author_id: AccountId,
    pub tags: Vec<String>,
    pub status: PostStatus,
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public identity of a post's author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostAuthor {
    pub id: AccountId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
}

impl From<&Account> for PostAuthor {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
        }
    }
}

/// A post together with its author, as served to readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetails {
    pub post: Post,
    pub author: PostAuthor,
}

/// Count one read of `post`.
///
/// Returns the post with its view counter incremented. Storage adapters apply
/// it inside their atomic view increment.
pub fn record_view(post: Post) -> Post {
    Post {
        views: post.views.saturating_add(1),
        ..post
    }
}

/// Post unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a post ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        Uuid::parse_str(s)
            .map(PostId)
            .map_err(|e| PostIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post title type
///
/// Trimmed, non-empty, at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    const MAX_LENGTH: usize = 200;

    pub fn new(title: String) -> Result<Self, PostTitleError> {
        let title = title.trim().to_string();
        let length = title.chars().count();

        if length == 0 {
            Err(PostTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(PostTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post body. Kept verbatim, only rejected when blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    pub fn new(content: String) -> Result<Self, PostContentError> {
        if content.trim().is_empty() {
            return Err(PostContentError::Empty);
        }
        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }
}

impl FromStr for PostStatus {
    type Err = PostStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "archived" => Ok(PostStatus::Archived),
            other => Err(PostStatusError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to create a new post. The author is the authenticated caller.
#[derive(Debug)]
pub struct CreatePostCommand {
    pub title: PostTitle,
    pub content: PostContent,
    pub tags: Vec<String>,
    pub status: PostStatus,
}

impl CreatePostCommand {
    pub fn new(title: PostTitle, content: PostContent) -> Self {
        Self {
            title,
            content,
            tags: Vec::new(),
            status: PostStatus::default(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }
}

/// Partial post update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePostCommand {
    pub title: Option<PostTitle>,
    pub content: Option<PostContent>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatus>,
}

impl UpdatePostCommand {
    /// Build an update, rejecting one that changes nothing.
    ///
    /// # Errors
    /// * `EmptyUpdate` - No field provided
    pub fn new(
        title: Option<PostTitle>,
        content: Option<PostContent>,
        tags: Option<Vec<String>>,
        status: Option<PostStatus>,
    ) -> Result<Self, PostError> {
        if title.is_none() && content.is_none() && tags.is_none() && status.is_none() {
            return Err(PostError::EmptyUpdate);
        }

        Ok(Self {
            title,
            content,
            tags,
            status,
        })
    }

    /// Apply the update to a post snapshot.
    pub fn apply(self, post: Post, at: DateTime<Utc>) -> Post {
        Post {
            title: self.title.unwrap_or(post.title),
            content: self.content.unwrap_or(post.content),
            tags: self.tags.unwrap_or(post.tags),
            status: self.status.unwrap_or(post.status),
            updated_at: at,
            ..post
        }
    }
}

/// Optional narrowing of a post listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub tag: Option<String>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        self.status.map_or(true, |status| post.status == status)
            && self
                .tag
                .as_ref()
                .map_or(true, |tag| post.tags.iter().any(|t| t == tag))
    }
}
