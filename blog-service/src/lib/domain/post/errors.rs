use thiserror::Error;

use crate::domain::auth::policy::PolicyViolation;

/// Error for PostId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for PostTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostTitleError {
    #[error("Title is required")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for PostContent validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostContentError {
    #[error("Content is required")]
    Empty,
}

/// Error for PostStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostStatusError {
    #[error("Status must be one of draft, published, or archived (got '{0}')")]
    Unknown(String),
}

/// Top-level error for all post-related operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post ID: {0}")]
    InvalidPostId(#[from] PostIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] PostTitleError),

    #[error("Invalid content: {0}")]
    InvalidContent(#[from] PostContentError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] PostStatusError),

    #[error("At least one field must be provided")]
    EmptyUpdate,

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(PolicyViolation),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<PolicyViolation> for PostError {
    fn from(violation: PolicyViolation) -> Self {
        PostError::Forbidden(violation)
    }
}

impl From<anyhow::Error> for PostError {
    fn from(err: anyhow::Error) -> Self {
        PostError::Unknown(err.to_string())
    }
}
