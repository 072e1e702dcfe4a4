/// Comment service - creation, listing and deletion with ownership checks
use crate::db::{comment_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentWithAuthor};
use sqlx::PgPool;
use uuid::Uuid;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a comment on an existing post
    pub async fn create(&self, post_id: Uuid, author_id: Uuid, content: &str) -> Result<Comment> {
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::PostNotFound);
        }
        if !user_repo::user_exists(&self.pool, author_id).await? {
            return Err(AppError::UserNotFound);
        }

        let comment = comment_repo::create_comment(&self.pool, post_id, author_id, content).await?;

        tracing::info!(comment_id = %comment.id, %post_id, user_id = %author_id, "comment created");
        Ok(comment)
    }

    /// Comments for a post, newest first
    pub async fn get_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        Ok(comment_repo::comments_for_post(&self.pool, post_id).await?)
    }

    /// Delete a comment. A missing comment, a comment under a different
    /// post and a non-author caller all report CommentNotFound; existence
    /// is not leaked.
    pub async fn delete(&self, post_id: Uuid, comment_id: Uuid, caller_id: Uuid) -> Result<()> {
        let comment = comment_repo::find_comment(&self.pool, comment_id)
            .await?
            .ok_or(AppError::CommentNotFound)?;

        if comment.post_id != post_id || comment.user_id != caller_id {
            return Err(AppError::CommentNotFound);
        }

        comment_repo::delete_comment_row(&self.pool, comment_id).await?;

        tracing::info!(%comment_id, user_id = %caller_id, "comment deleted");
        Ok(())
    }
}
