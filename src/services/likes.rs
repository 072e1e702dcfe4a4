/// Like service - toggle semantics over the unique (post, user) pair
use crate::db::{like_repo, post_repo};
use crate::error::{AppError, Result};
use sqlx::PgPool;
use uuid::Uuid;

pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Toggle a like: delete the pair if present, insert it otherwise.
    /// Runs in one transaction; the unique constraint on (post_id, user_id)
    /// resolves concurrent identical toggles without duplicates.
    /// Returns the resulting state (true = liked).
    pub async fn toggle(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let removed = like_repo::delete_like(&mut *tx, post_id, user_id).await?;
        let liked = if removed {
            false
        } else {
            if !post_repo::post_exists(&mut *tx, post_id).await? {
                return Err(AppError::PostNotFound);
            }
            like_repo::insert_like(&mut *tx, post_id, user_id).await?;
            true
        };

        tx.commit().await?;
        Ok(liked)
    }

    /// Whether the viewer liked the post; anonymous viewers never have
    pub async fn is_liked(&self, post_id: Uuid, viewer: Option<Uuid>) -> Result<bool> {
        match viewer {
            Some(user_id) => Ok(like_repo::like_exists(&self.pool, post_id, user_id).await?),
            None => Ok(false),
        }
    }

    /// Total likes on a post
    pub async fn count(&self, post_id: Uuid) -> Result<i64> {
        Ok(like_repo::count_likes(&self.pool, post_id).await?)
    }
}
