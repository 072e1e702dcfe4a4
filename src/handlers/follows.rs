/// Follow handlers - follow/unfollow and relation counts
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::FollowService;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub following: bool,
}

/// Follow a user
/// POST /api/v1/users/{user_id}/follow
pub async fn follow_user(
    pool: web::Data<PgPool>,
    followee_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = FollowService::new(pool.get_ref().clone());
    service.follow(user_id.0, *followee_id).await?;

    Ok(HttpResponse::Ok().json(FollowResponse { following: true }))
}

/// Unfollow a user
/// DELETE /api/v1/users/{user_id}/follow
pub async fn unfollow_user(
    pool: web::Data<PgPool>,
    followee_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = FollowService::new(pool.get_ref().clone());
    service.unfollow(user_id.0, *followee_id).await?;

    Ok(HttpResponse::Ok().json(FollowResponse { following: false }))
}

/// Follower/following totals for a user
/// GET /api/v1/users/{user_id}/follow-counts
pub async fn get_follow_counts(
    pool: web::Data<PgPool>,
    target_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = FollowService::new(pool.get_ref().clone());
    let counts = service.counts(*target_id).await?;

    Ok(HttpResponse::Ok().json(counts))
}
