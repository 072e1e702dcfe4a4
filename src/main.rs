use actix_cors::Cors;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use gram_service::handlers;
use gram_service::middleware::JwtAuthMiddleware;
use gram_service::storage::{FileStorage, LocalFileStorage};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "gram-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "gram-service"
        })),
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

/// Gram Service
///
/// A social CRUD backend: posts with optional images, comments, likes,
/// bookmarks and follows over PostgreSQL.
///
/// # Routes
///
/// - `/api/v1/posts/*` - create, read, search, delete posts and comments
/// - `/api/v1/feed` - the caller's feed of followed users' posts
/// - `/api/v1/bookmarks` - the caller's saved posts
/// - `/api/v1/users/*` - posts by username, follow/unfollow
///
/// The auth middleware resolves the caller's identity from a JWT bearer
/// token; read endpoints accept anonymous callers, mutating handlers
/// require an authenticated identity and answer 401 without one.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match gram_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting gram-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database connection pool
    let db_pool = match PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("running database migrations")?;

    tracing::info!("Connected to database, migrations applied");

    let storage: Arc<dyn FileStorage> = Arc::new(LocalFileStorage::from_config(&config.storage));
    let storage_data = web::Data::new(storage);
    let pagination_data = web::Data::new(config.pagination.clone());

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let jwt_secret = config.auth.jwt_secret.clone();
    let max_upload_bytes = config.storage.max_upload_bytes;

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(storage_data.clone())
            .app_data(pagination_data.clone())
            .app_data(MultipartFormConfig::default().total_limit(max_upload_bytes))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            // Health check endpoints
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .service(
                web::scope("/api/v1")
                    .wrap(JwtAuthMiddleware::new(jwt_secret.clone()))
                    .route("/feed", web::get().to(handlers::get_feed))
                    .route("/bookmarks", web::get().to(handlers::list_bookmarks))
                    .service(
                        web::resource("/posts")
                            .route(web::get().to(handlers::list_posts))
                            .route(web::post().to(handlers::create_post)),
                    )
                    .route("/posts/search", web::get().to(handlers::search_posts))
                    .service(
                        web::resource("/posts/{post_id}")
                            .route(web::get().to(handlers::get_post))
                            .route(web::delete().to(handlers::delete_post)),
                    )
                    .service(
                        web::resource("/posts/{post_id}/comments")
                            .route(web::get().to(handlers::get_comments))
                            .route(web::post().to(handlers::create_comment)),
                    )
                    .route(
                        "/posts/{post_id}/comments/{comment_id}",
                        web::delete().to(handlers::delete_comment),
                    )
                    .route(
                        "/posts/{post_id}/like",
                        web::post().to(handlers::toggle_like),
                    )
                    .route(
                        "/posts/{post_id}/bookmark",
                        web::post().to(handlers::toggle_bookmark),
                    )
                    .route(
                        "/users/{username}/posts",
                        web::get().to(handlers::get_user_posts),
                    )
                    .route(
                        "/users/{user_id}/follow-counts",
                        web::get().to(handlers::get_follow_counts),
                    )
                    .service(
                        web::resource("/users/{user_id}/follow")
                            .route(web::post().to(handlers::follow_user))
                            .route(web::delete().to(handlers::unfollow_user)),
                    ),
            )
    })
    .bind(&bind_address)
    .with_context(|| format!("binding {}", bind_address))?
    .run()
    .await?;

    Ok(())
}
