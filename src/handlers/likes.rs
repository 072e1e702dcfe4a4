/// Like handlers - toggle endpoint for post likes
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::LikeService;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ToggleLikeResponse {
    pub liked: bool,
    pub like_count: i64,
}

/// Toggle a like on a post
/// POST /api/v1/posts/{post_id}/like
pub async fn toggle_like(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = LikeService::new(pool.get_ref().clone());

    let liked = service.toggle(*post_id, user_id.0).await?;
    let like_count = service.count(*post_id).await?;

    Ok(HttpResponse::Ok().json(ToggleLikeResponse { liked, like_count }))
}
