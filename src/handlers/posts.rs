/// Post handlers - HTTP endpoints for post operations
use crate::config::PaginationConfig;
use crate::error::Result;
use crate::middleware::{MaybeUserId, UserId};
use crate::services::posts::UploadedImage;
use crate::services::PostService;
use crate::storage::FileStorage;
use actix_multipart::form::{bytes::Bytes as UploadBytes, text::Text, MultipartForm};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Multipart body for post creation: a text field plus an optional image
#[derive(MultipartForm)]
pub struct CreatePostForm {
    pub content: Text<String>,
    pub image: Option<UploadBytes>,
}

#[derive(Debug, Validate)]
struct CreatePostRequest {
    #[validate(length(min = 1, max = 1000, message = "content must be 1-1000 characters"))]
    content: String,
}

/// Pagination query parameters (zero-based page)
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: i64,
}

/// Search query parameters
#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, max = 100, message = "keyword must be 1-100 characters"))]
    pub keyword: String,
    #[serde(default)]
    pub page: i64,
}

fn post_service(
    pool: &web::Data<PgPool>,
    storage: &web::Data<Arc<dyn FileStorage>>,
    pagination: &web::Data<PaginationConfig>,
) -> PostService {
    PostService::new(
        pool.get_ref().clone(),
        storage.get_ref().clone(),
        pagination.page_size,
    )
}

/// Create a new post
/// POST /api/v1/posts (multipart: content + optional image)
pub async fn create_post(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<dyn FileStorage>>,
    pagination: web::Data<PaginationConfig>,
    user_id: UserId,
    MultipartForm(form): MultipartForm<CreatePostForm>,
) -> Result<HttpResponse> {
    let request = CreatePostRequest {
        content: form.content.into_inner(),
    };
    request.validate()?;

    let image = form.image.map(|upload| UploadedImage {
        file_name: upload.file_name.clone().unwrap_or_default(),
        bytes: upload.data.to_vec(),
    });

    let service = post_service(&pool, &storage, &pagination);
    let post = service.create(user_id.0, &request.content, image).await?;

    Ok(HttpResponse::Created().json(post))
}

/// Get a post with counts and viewer flags
/// GET /api/v1/posts/{post_id}
pub async fn get_post(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<dyn FileStorage>>,
    pagination: web::Data<PaginationConfig>,
    post_id: web::Path<Uuid>,
    viewer: MaybeUserId,
) -> Result<HttpResponse> {
    let service = post_service(&pool, &storage, &pagination);
    let detail = service.get_post(*post_id, viewer.0).await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Global paged post listing, newest first
/// GET /api/v1/posts?page=N
pub async fn list_posts(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<dyn FileStorage>>,
    pagination: web::Data<PaginationConfig>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let service = post_service(&pool, &storage, &pagination);
    let page = service.get_all_paged(query.page).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Keyword search over post content
/// GET /api/v1/posts/search?keyword=...&page=N
pub async fn search_posts(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<dyn FileStorage>>,
    pagination: web::Data<PaginationConfig>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    query.validate()?;

    let service = post_service(&pool, &storage, &pagination);
    let page = service.search(&query.keyword, query.page).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// The caller's feed: posts from followed users, newest first
/// GET /api/v1/feed?page=N
pub async fn get_feed(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<dyn FileStorage>>,
    pagination: web::Data<PaginationConfig>,
    user_id: UserId,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let service = post_service(&pool, &storage, &pagination);
    let page = service.get_feed(user_id.0, query.page).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// All posts by a username
/// GET /api/v1/users/{username}/posts
pub async fn get_user_posts(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<dyn FileStorage>>,
    pagination: web::Data<PaginationConfig>,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let service = post_service(&pool, &storage, &pagination);
    let posts = service.get_user_posts(&username).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Delete a post (owner only)
/// DELETE /api/v1/posts/{post_id}
pub async fn delete_post(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<dyn FileStorage>>,
    pagination: web::Data<PaginationConfig>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = post_service(&pool, &storage, &pagination);
    service.delete(*post_id, user_id.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_fails_validation() {
        let request = CreatePostRequest {
            content: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn over_length_content_fails_validation() {
        let request = CreatePostRequest {
            content: "x".repeat(1001),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn max_length_content_passes_validation() {
        let request = CreatePostRequest {
            content: "x".repeat(1000),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn empty_keyword_fails_validation() {
        let query = SearchQuery {
            keyword: String::new(),
            page: 0,
        };
        assert!(query.validate().is_err());
    }
}
