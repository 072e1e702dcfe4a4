use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Insert a like for a (post, user) pair.
/// Returns false when the pair already existed; the unique constraint on
/// (post_id, user_id) makes this safe under concurrent identical requests.
pub async fn insert_like<'e>(
    exec: impl PgExecutor<'e>,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO likes (post_id, user_id)
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

/// Delete a like for a (post, user) pair; returns true if a row was removed
pub async fn delete_like<'e>(
    exec: impl PgExecutor<'e>,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM likes
        WHERE post_id = $1 AND user_id = $2
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(exec)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Check if a user has liked a post
pub async fn like_exists(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM likes
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

/// Count total likes for a post
pub async fn count_likes(pool: &PgPool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Delete all likes belonging to a post (cascade step of post deletion)
pub async fn delete_likes_for_post<'e>(
    exec: impl PgExecutor<'e>,
    post_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM likes WHERE post_id = $1")
        .bind(post_id)
        .execute(exec)
        .await?;

    Ok(result.rows_affected())
}
