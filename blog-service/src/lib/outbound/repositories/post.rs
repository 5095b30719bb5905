use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::PersonName;
use crate::post::errors::PostError;
use crate::post::models::Post;
use crate::post::models::PostAuthor;
use crate::post::models::PostContent;
use crate::post::models::PostDetails;
use crate::post::models::PostFilter;
use crate::post::models::PostId;
use crate::post::models::PostTitle;
use crate::post::ports::PostRepository;

const POST_COLUMNS: &str =
    "id, title, content, author_id, tags, status, views, created_at, updated_at";

/// Post columns of `p` plus the author columns of the joined account `a`.
const DETAIL_COLUMNS: &str = r#"
    p.id, p.title, p.content, p.author_id, p.tags, p.status, p.views,
    p.created_at, p.updated_at,
    a.first_name AS author_first_name,
    a.last_name AS author_last_name,
    a.email AS author_email
"#;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_post(row: &PgRow) -> Result<Post, PostError> {
        let id: Uuid = Self::column(row, "id")?;
        let title: String = Self::column(row, "title")?;
        let content: String = Self::column(row, "content")?;
        let author_id: Uuid = Self::column(row, "author_id")?;
        let status: String = Self::column(row, "status")?;
        let views: i64 = Self::column(row, "views")?;
        let created_at: DateTime<Utc> = Self::column(row, "created_at")?;
        let updated_at: DateTime<Utc> = Self::column(row, "updated_at")?;

        Ok(Post {
            id: PostId(id),
            title: PostTitle::new(title)?,
            content: PostContent::new(content)?,
            author_id: AccountId(author_id),
            tags: Self::column(row, "tags")?,
            status: status.parse()?,
            views: u64::try_from(views).map_err(|e| PostError::DatabaseError(e.to_string()))?,
            created_at,
            updated_at,
        })
    }

    fn row_to_details(row: &PgRow) -> Result<PostDetails, PostError> {
        let post = Self::row_to_post(row)?;
        let first_name: String = Self::column(row, "author_first_name")?;
        let last_name: String = Self::column(row, "author_last_name")?;
        let email: String = Self::column(row, "author_email")?;

        let author = PostAuthor {
            id: post.author_id,
            first_name: PersonName::new(first_name).map_err(Self::corrupt_author)?,
            last_name: PersonName::new(last_name).map_err(Self::corrupt_author)?,
            email: EmailAddress::new(email).map_err(Self::corrupt_author)?,
        };

        Ok(PostDetails { post, author })
    }

    fn corrupt_author(e: impl std::fmt::Display) -> PostError {
        PostError::DatabaseError(format!("Stored author is invalid: {}", e))
    }

    fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, PostError>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
    {
        row.try_get(name)
            .map_err(|e| PostError::DatabaseError(e.to_string()))
    }

    fn stored_views(post: &Post) -> Result<i64, PostError> {
        i64::try_from(post.views).map_err(|e| PostError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        sqlx::query(
            r#"
            INSERT INTO posts
                (id, title, content, author_id, tags, status, views, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(post.id.0)
        .bind(post.title.as_str())
        .bind(post.content.as_str())
        .bind(post.author_id.0)
        .bind(&post.tags)
        .bind(post.status.as_str())
        .bind(Self::stored_views(&post)?)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(post)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query(&format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_post).transpose()
    }

    async fn list_all(&self, filter: &PostFilter) -> Result<Vec<PostDetails>, PostError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM posts p
            JOIN accounts a ON a.id = p.author_id
            WHERE ($1::TEXT IS NULL OR p.status = $1)
              AND ($2::TEXT IS NULL OR $2 = ANY(p.tags))
            ORDER BY p.created_at DESC
            "#,
            DETAIL_COLUMNS
        ))
        .bind(filter.status.map(|status| status.as_str()))
        .bind(filter.tag.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_details).collect()
    }

    async fn increment_views(&self, id: &PostId) -> Result<PostDetails, PostError> {
        let row = sqlx::query(&format!(
            r#"
            WITH viewed AS (
                UPDATE posts
                SET views = views + 1
                WHERE id = $1
                RETURNING *
            )
            SELECT {}
            FROM viewed p
            JOIN accounts a ON a.id = p.author_id
            "#,
            DETAIL_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Self::row_to_details(&r),
            None => Err(PostError::NotFound(id.to_string())),
        }
    }

    async fn update(&self, post: Post) -> Result<Post, PostError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE posts
            SET title = $2, content = $3, tags = $4, status = $5, updated_at = $6
            WHERE id = $1
            RETURNING {}
            "#,
            POST_COLUMNS
        ))
        .bind(post.id.0)
        .bind(post.title.as_str())
        .bind(post.content.as_str())
        .bind(&post.tags)
        .bind(post.status.as_str())
        .bind(post.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Self::row_to_post(&r),
            None => Err(PostError::NotFound(post.id.to_string())),
        }
    }

    async fn delete(&self, id: &PostId) -> Result<(), PostError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
