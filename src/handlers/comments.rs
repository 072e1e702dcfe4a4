/// Comment handlers - HTTP endpoints for comment operations
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 500, message = "content must be 1-500 characters"))]
    pub content: String,
}

/// Create a comment on a post
/// POST /api/v1/posts/{post_id}/comments
pub async fn create_comment(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CommentService::new(pool.get_ref().clone());
    let comment = service.create(*post_id, user_id.0, &req.content).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Comments for a post, newest first
/// GET /api/v1/posts/{post_id}/comments
pub async fn get_comments(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new(pool.get_ref().clone());
    let comments = service.get_comments(*post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Delete a comment (author only)
/// DELETE /api/v1/posts/{post_id}/comments/{comment_id}
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    let service = CommentService::new(pool.get_ref().clone());
    service.delete(post_id, comment_id, user_id.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth;
    use crate::middleware::JwtAuthMiddleware;
    use actix_web::{test as actix_test, App};

    #[test]
    fn blank_comment_fails_validation() {
        let req = CreateCommentRequest {
            content: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[actix_web::test]
    async fn blank_comment_is_rejected_before_any_query() {
        // A lazy pool never connects; validation fails first.
        let pool = PgPool::connect_lazy("postgresql://localhost/unused").unwrap();
        let token = auth::generate_token("test-secret", Uuid::new_v4(), 3600).unwrap();

        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(pool)).service(
                web::scope("")
                    .wrap(JwtAuthMiddleware::new("test-secret"))
                    .route("/posts/{post_id}/comments", web::post().to(create_comment)),
            ),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri(&format!("/posts/{}/comments", Uuid::new_v4()))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(serde_json::json!({ "content": "" }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn long_comment_fails_validation() {
        let req = CreateCommentRequest {
            content: "y".repeat(501),
        };
        assert!(req.validate().is_err());
    }
}
