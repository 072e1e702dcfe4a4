/// Database access layer
///
/// One repository module per entity. Functions that participate in a
/// caller-managed transaction accept a generic executor; everything else
/// takes the pool directly.
pub mod bookmark_repo;
pub mod comment_repo;
pub mod follow_repo;
pub mod like_repo;
pub mod post_repo;
pub mod user_repo;
