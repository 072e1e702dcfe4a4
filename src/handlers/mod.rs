/// HTTP request handlers
pub mod bookmarks;
pub mod comments;
pub mod follows;
pub mod likes;
pub mod posts;

pub use bookmarks::*;
pub use comments::*;
pub use follows::*;
pub use likes::*;
pub use posts::*;
