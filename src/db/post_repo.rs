use crate::models::{Post, PostWithStats};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Columns selected for listing queries: post fields joined with the
/// author's username and per-post aggregate counts.
const POST_WITH_STATS: &str = r#"
    SELECT p.id, p.user_id, u.username, p.content, p.image_url, p.created_at,
           (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count,
           (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
    FROM posts p
    JOIN users u ON u.id = p.user_id
"#;

/// Create a new post
pub async fn create_post(
    pool: &PgPool,
    user_id: Uuid,
    content: &str,
    image_url: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (user_id, content, image_url)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, content, image_url, created_at
        "#,
    )
    .bind(user_id)
    .bind(content)
    .bind(image_url)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, content, image_url, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Find a post inside a transaction, locking the row until commit.
/// Serializes concurrent deletes of the same post.
pub async fn find_post_for_update<'e>(
    exec: impl PgExecutor<'e>,
    post_id: Uuid,
) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, content, image_url, created_at
        FROM posts
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(post_id)
    .fetch_optional(exec)
    .await?;

    Ok(post)
}

/// Check whether a post exists
pub async fn post_exists<'e>(exec: impl PgExecutor<'e>, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
        .bind(post_id)
        .fetch_one(exec)
        .await?;

    Ok(exists)
}

/// Get a single post with author and counts
pub async fn find_post_with_stats(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Option<PostWithStats>, sqlx::Error> {
    let sql = format!("{POST_WITH_STATS} WHERE p.id = $1");
    let post = sqlx::query_as::<_, PostWithStats>(&sql)
        .bind(post_id)
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

/// Global newest-first page of posts with counts
pub async fn list_posts_page(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostWithStats>, sqlx::Error> {
    let sql = format!("{POST_WITH_STATS} ORDER BY p.created_at DESC LIMIT $1 OFFSET $2");
    let posts = sqlx::query_as::<_, PostWithStats>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(posts)
}

/// Case-insensitive substring search over post content, newest first
pub async fn search_posts_page(
    pool: &PgPool,
    keyword: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostWithStats>, sqlx::Error> {
    let sql = format!(
        "{POST_WITH_STATS} WHERE p.content ILIKE $1 ORDER BY p.created_at DESC LIMIT $2 OFFSET $3"
    );

    // Escape LIKE metacharacters so user input matches literally.
    let pattern = format!(
        "%{}%",
        keyword.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
    );

    let posts = sqlx::query_as::<_, PostWithStats>(&sql)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(posts)
}

/// Newest-first page of posts authored by users the follower follows
pub async fn feed_posts_page(
    pool: &PgPool,
    follower_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostWithStats>, sqlx::Error> {
    let sql = format!(
        r#"{POST_WITH_STATS}
        WHERE p.user_id IN (SELECT followee_id FROM follows WHERE follower_id = $1)
        ORDER BY p.created_at DESC
        LIMIT $2 OFFSET $3"#
    );

    let posts = sqlx::query_as::<_, PostWithStats>(&sql)
        .bind(follower_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(posts)
}

/// All posts by a user, newest first
pub async fn posts_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, content, image_url, created_at
        FROM posts
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count posts authored by a user
pub async fn count_posts_by_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Delete a post row; children are removed by the service inside the same
/// transaction before this runs.
pub async fn delete_post_row<'e>(
    exec: impl PgExecutor<'e>,
    post_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(exec)
        .await?;

    Ok(result.rows_affected() > 0)
}
