/// Bookmark service - same toggle pattern as likes, plus the caller's
/// bookmarked-post listing
use crate::db::{bookmark_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::PostWithStats;
use sqlx::PgPool;
use uuid::Uuid;

pub struct BookmarkService {
    pool: PgPool,
}

impl BookmarkService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Toggle a bookmark; returns the resulting state (true = bookmarked)
    pub async fn toggle(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let removed = bookmark_repo::delete_bookmark(&mut *tx, post_id, user_id).await?;
        let bookmarked = if removed {
            false
        } else {
            if !post_repo::post_exists(&mut *tx, post_id).await? {
                return Err(AppError::PostNotFound);
            }
            bookmark_repo::insert_bookmark(&mut *tx, post_id, user_id).await?;
            true
        };

        tx.commit().await?;
        Ok(bookmarked)
    }

    /// Whether the viewer bookmarked the post
    pub async fn is_bookmarked(&self, post_id: Uuid, viewer: Option<Uuid>) -> Result<bool> {
        match viewer {
            Some(user_id) => {
                Ok(bookmark_repo::bookmark_exists(&self.pool, post_id, user_id).await?)
            }
            None => Ok(false),
        }
    }

    /// The user's bookmarked posts, most recently bookmarked first
    pub async fn bookmarked_posts(&self, user_id: Uuid) -> Result<Vec<PostWithStats>> {
        Ok(bookmark_repo::bookmarked_posts(&self.pool, user_id).await?)
    }
}
