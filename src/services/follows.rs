/// Follow service - the relation driving feed composition
use crate::db::{follow_repo, user_repo};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Follower/following totals for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowCounts {
    pub followers: i64,
    pub following: i64,
}

#[derive(Clone)]
pub struct FollowService {
    pool: PgPool,
}

impl FollowService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent follow; returns true if a new relation was created
    pub async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        if follower_id == followee_id {
            return Err(AppError::SelfFollow);
        }
        if !user_repo::user_exists(&self.pool, followee_id).await? {
            return Err(AppError::UserNotFound);
        }

        let created = follow_repo::insert_follow(&self.pool, follower_id, followee_id).await?;
        if created {
            tracing::info!(%follower_id, %followee_id, "follow created");
        }
        Ok(created)
    }

    /// Idempotent unfollow; returns true if a relation was removed
    pub async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        Ok(follow_repo::delete_follow(&self.pool, follower_id, followee_id).await?)
    }

    /// Whether follower follows followee
    pub async fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        Ok(follow_repo::follow_exists(&self.pool, follower_id, followee_id).await?)
    }

    /// Ids of users the follower follows
    pub async fn following_ids(&self, follower_id: Uuid) -> Result<Vec<Uuid>> {
        Ok(follow_repo::following_ids(&self.pool, follower_id).await?)
    }

    /// Follower/following totals for a user
    pub async fn counts(&self, user_id: Uuid) -> Result<FollowCounts> {
        Ok(FollowCounts {
            followers: follow_repo::count_followers(&self.pool, user_id).await?,
            following: follow_repo::count_following(&self.pool, user_id).await?,
        })
    }
}
