/// Business logic layer
///
/// Services wrap the repositories with ownership checks, toggle semantics
/// and response shaping. Handlers construct them per request from shared
/// state.
pub mod bookmarks;
pub mod comments;
pub mod follows;
pub mod likes;
pub mod posts;

pub use bookmarks::BookmarkService;
pub use comments::CommentService;
pub use follows::FollowService;
pub use likes::LikeService;
pub use posts::{PostDetail, PostPage, PostService};
