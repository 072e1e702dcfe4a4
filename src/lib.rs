/// Gram Service Library
///
/// A small social backend: posts with optional images, comments, likes,
/// bookmarks and follows over PostgreSQL.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for posts, comments, likes, bookmarks, follows
/// - `services`: Business logic layer (ownership checks, toggles, feed)
/// - `db`: Database access layer and repositories
/// - `middleware`: HTTP middleware for authentication
/// - `storage`: File storage for uploaded post images
/// - `auth`: JWT token helpers
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, Result};
