/// Post service - creation, retrieval, feed, search and deletion
use crate::db::{bookmark_repo, comment_repo, like_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Post, PostWithStats};
use crate::storage::FileStorage;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// A page of posts with Slice semantics: `has_more` says whether the next
/// page exists without running a COUNT over the whole table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<PostWithStats>,
    pub page: i64,
    pub has_more: bool,
}

/// A single post as seen by a (possibly anonymous) viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: PostWithStats,
    pub liked: bool,
    pub bookmarked: bool,
    pub is_owner: bool,
}

/// An image uploaded alongside post content
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

pub struct PostService {
    pool: PgPool,
    storage: Arc<dyn FileStorage>,
    page_size: i64,
}

impl PostService {
    pub fn new(pool: PgPool, storage: Arc<dyn FileStorage>, page_size: i64) -> Self {
        Self {
            pool,
            storage,
            page_size,
        }
    }

    /// Create a new post, persisting the uploaded image first
    pub async fn create(
        &self,
        author_id: Uuid,
        content: &str,
        image: Option<UploadedImage>,
    ) -> Result<Post> {
        if !user_repo::user_exists(&self.pool, author_id).await? {
            return Err(AppError::UserNotFound);
        }

        let image_url = match image {
            Some(img) => Some(self.storage.save(&img.bytes, &img.file_name).await?),
            None => None,
        };

        let post =
            match post_repo::create_post(&self.pool, author_id, content, image_url.as_deref())
                .await
            {
                Ok(post) => post,
                Err(err) => {
                    // The file was written before the insert; don't orphan it.
                    if let Some(url) = &image_url {
                        if let Err(cleanup) = self.storage.delete(url).await {
                            tracing::warn!(%url, "stored image cleanup failed: {}", cleanup);
                        }
                    }
                    return Err(err.into());
                }
            };

        tracing::info!(post_id = %post.id, user_id = %author_id, "post created");
        Ok(post)
    }

    /// Get a post by ID, failing with PostNotFound if absent
    pub async fn find_by_id(&self, post_id: Uuid) -> Result<Post> {
        post_repo::find_post(&self.pool, post_id)
            .await?
            .ok_or(AppError::PostNotFound)
    }

    /// Get a post with counts and viewer-dependent flags.
    /// An anonymous viewer gets all flags false.
    pub async fn get_post(&self, post_id: Uuid, viewer: Option<Uuid>) -> Result<PostDetail> {
        let post = post_repo::find_post_with_stats(&self.pool, post_id)
            .await?
            .ok_or(AppError::PostNotFound)?;

        let (liked, bookmarked, is_owner) = match viewer {
            Some(user_id) => (
                like_repo::like_exists(&self.pool, post_id, user_id).await?,
                bookmark_repo::bookmark_exists(&self.pool, post_id, user_id).await?,
                post.user_id == user_id,
            ),
            None => (false, false, false),
        };

        Ok(PostDetail {
            post,
            liked,
            bookmarked,
            is_owner,
        })
    }

    /// Paginated feed: posts authored by users the caller follows,
    /// newest first
    pub async fn get_feed(&self, user_id: Uuid, page: i64) -> Result<PostPage> {
        let offset = self.offset(page);
        let mut posts =
            post_repo::feed_posts_page(&self.pool, user_id, self.page_size + 1, offset).await?;
        Ok(self.into_page(&mut posts, page))
    }

    /// Global paginated listing, newest first
    pub async fn get_all_paged(&self, page: i64) -> Result<PostPage> {
        let offset = self.offset(page);
        let mut posts = post_repo::list_posts_page(&self.pool, self.page_size + 1, offset).await?;
        Ok(self.into_page(&mut posts, page))
    }

    /// Paginated keyword search over post content
    pub async fn search(&self, keyword: &str, page: i64) -> Result<PostPage> {
        let offset = self.offset(page);
        let mut posts =
            post_repo::search_posts_page(&self.pool, keyword, self.page_size + 1, offset).await?;
        Ok(self.into_page(&mut posts, page))
    }

    /// All posts by username, newest first
    pub async fn get_user_posts(&self, username: &str) -> Result<Vec<Post>> {
        let user = user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or(AppError::UserNotFound)?;

        Ok(post_repo::posts_by_user(&self.pool, user.id).await?)
    }

    /// Count posts authored by a user
    pub async fn count_by_user(&self, user_id: Uuid) -> Result<i64> {
        Ok(post_repo::count_posts_by_user(&self.pool, user_id).await?)
    }

    /// Delete a post and everything hanging off it.
    ///
    /// A missing post and a non-owner caller both report PostNotFound so
    /// that callers cannot probe for the existence of other users' posts.
    /// Children are removed in the same transaction as the post row; the
    /// stored image is deleted only after the commit succeeds.
    pub async fn delete(&self, post_id: Uuid, caller_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let post = post_repo::find_post_for_update(&mut *tx, post_id)
            .await?
            .ok_or(AppError::PostNotFound)?;

        if post.user_id != caller_id {
            return Err(AppError::PostNotFound);
        }

        comment_repo::delete_comments_for_post(&mut *tx, post_id).await?;
        like_repo::delete_likes_for_post(&mut *tx, post_id).await?;
        bookmark_repo::delete_bookmarks_for_post(&mut *tx, post_id).await?;
        post_repo::delete_post_row(&mut *tx, post_id).await?;

        tx.commit().await?;

        if let Some(image_url) = &post.image_url {
            if let Err(err) = self.storage.delete(image_url).await {
                tracing::warn!(%post_id, %image_url, "stored image removal failed: {}", err);
            }
        }

        tracing::info!(%post_id, user_id = %caller_id, "post deleted");
        Ok(())
    }

    fn offset(&self, page: i64) -> i64 {
        // Saturate rather than overflow on absurd page numbers.
        page.max(0).saturating_mul(self.page_size)
    }

    /// Fetches run with page_size + 1 rows; the extra row only signals
    /// that another page exists.
    fn into_page(&self, posts: &mut Vec<PostWithStats>, page: i64) -> PostPage {
        let has_more = posts.len() as i64 > self.page_size;
        posts.truncate(self.page_size as usize);
        PostPage {
            posts: std::mem::take(posts),
            page: page.max(0),
            has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stub_post(n: usize) -> PostWithStats {
        PostWithStats {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            username: format!("user{}", n),
            content: format!("post {}", n),
            image_url: None,
            created_at: Utc::now(),
            like_count: 0,
            comment_count: 0,
        }
    }

    // connect_lazy needs a runtime even though no connection is made
    fn service_with_page_size(page_size: i64) -> PostService {
        use crate::storage::LocalFileStorage;
        let pool = PgPool::connect_lazy("postgresql://localhost/unused").unwrap();
        let storage = Arc::new(LocalFileStorage::new("/tmp/unused", "/uploads"));
        PostService::new(pool, storage, page_size)
    }

    #[tokio::test]
    async fn page_slicing_detects_next_page() {
        let service = service_with_page_size(2);

        let mut rows: Vec<_> = (0..3).map(stub_post).collect();
        let page = service.into_page(&mut rows, 0);
        assert_eq!(page.posts.len(), 2);
        assert!(page.has_more);

        let mut rows: Vec<_> = (0..2).map(stub_post).collect();
        let page = service.into_page(&mut rows, 1);
        assert_eq!(page.posts.len(), 2);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn negative_page_clamps_to_zero() {
        let service = service_with_page_size(10);
        assert_eq!(service.offset(-3), 0);
        assert_eq!(service.offset(2), 20);

        let mut rows = vec![stub_post(0)];
        let page = service.into_page(&mut rows, -3);
        assert_eq!(page.page, 0);
    }

    #[tokio::test]
    async fn huge_page_offset_saturates() {
        let service = service_with_page_size(10);
        assert_eq!(service.offset(i64::MAX), i64::MAX);
        assert_eq!(service.offset(i64::MAX / 10), i64::MAX - (i64::MAX % 10));
    }
}
