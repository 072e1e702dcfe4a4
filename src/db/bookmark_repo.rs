use crate::models::PostWithStats;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Insert a bookmark for a (post, user) pair.
/// Returns false when the pair already existed.
pub async fn insert_bookmark<'e>(
    exec: impl PgExecutor<'e>,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO bookmarks (post_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (post_id, user_id) DO NOTHING
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(exec)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a bookmark for a (post, user) pair; returns true if a row was removed
pub async fn delete_bookmark<'e>(
    exec: impl PgExecutor<'e>,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM bookmarks
        WHERE post_id = $1 AND user_id = $2
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(exec)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Check if a user has bookmarked a post
pub async fn bookmark_exists(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM bookmarks
            WHERE post_id = $1 AND user_id = $2
        )
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Posts bookmarked by a user, most recently bookmarked first,
/// with author and counts
pub async fn bookmarked_posts(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<PostWithStats>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostWithStats>(
        r#"
        SELECT p.id, p.user_id, u.username, p.content, p.image_url, p.created_at,
               (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count,
               (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
        FROM bookmarks b
        JOIN posts p ON p.id = b.post_id
        JOIN users u ON u.id = p.user_id
        WHERE b.user_id = $1
        ORDER BY b.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Delete all bookmarks belonging to a post (cascade step of post deletion)
pub async fn delete_bookmarks_for_post<'e>(
    exec: impl PgExecutor<'e>,
    post_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM bookmarks WHERE post_id = $1")
        .bind(post_id)
        .execute(exec)
        .await?;

    Ok(result.rows_affected())
}
