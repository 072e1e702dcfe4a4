/// Bookmark handlers - toggle endpoint and the caller's saved posts
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::BookmarkService;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ToggleBookmarkResponse {
    pub bookmarked: bool,
}

/// Toggle a bookmark on a post
/// POST /api/v1/posts/{post_id}/bookmark
pub async fn toggle_bookmark(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = BookmarkService::new(pool.get_ref().clone());
    let bookmarked = service.toggle(*post_id, user_id.0).await?;

    Ok(HttpResponse::Ok().json(ToggleBookmarkResponse { bookmarked }))
}

/// The caller's bookmarked posts, most recently saved first
/// GET /api/v1/bookmarks
pub async fn list_bookmarks(pool: web::Data<PgPool>, user_id: UserId) -> Result<HttpResponse> {
    let service = BookmarkService::new(pool.get_ref().clone());
    let posts = service.bookmarked_posts(user_id.0).await?;

    Ok(HttpResponse::Ok().json(posts))
}
