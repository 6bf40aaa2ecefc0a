mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::{AppConfig, Config, RuntimeConfig};
use crate::core::openapi::ApiDoc;
use crate::core::{database, middleware};
use crate::features::images::{routes as images_routes, ImageService};
use crate::modules::storage::UploadsDir;
use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Load .env file BEFORE reading runtime settings or RUST_LOG
    let _ = dotenvy::dotenv();

    let runtime_config = RuntimeConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let worker_threads = runtime_config.worker_threads;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );

    let pool = database::create_pool(&config.database)
        .map_err(|e| anyhow::anyhow!("Invalid DATABASE_URL: {}", e))?;

    // A store that cannot be opened is logged, not fatal: the server keeps
    // running and every image request answers 500 until it becomes reachable.
    match database::ensure_schema(&pool).await {
        Ok(()) => tracing::info!("Connected to SQLite database: {}", config.database.url),
        Err(e) => tracing::error!("Error opening database {}: {}", config.database.url, e),
    }

    let image_service = Arc::new(ImageService::new(pool));
    tracing::info!("Image service initialized");

    let uploads = UploadsDir::new(&config.uploads);
    uploads.check();

    let app = build_router(&config.app, image_service, &uploads);

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server running at http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the full application: API, uploads, docs and the shared layers
fn build_router(
    config: &AppConfig,
    image_service: Arc<ImageService>,
    uploads: &UploadsDir,
) -> Router {
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let swagger = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    Router::new()
        .merge(swagger)
        .merge(images_routes::routes(image_service))
        .merge(uploads.routes())
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.max_request_body_size))
        .layer(middleware::cors_layer(config.cors_allowed_origins.clone()))
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // Propagate X-Request-Id to response headers
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::UploadsConfig;
    use crate::shared::test_helpers::{create_test_pool, insert_image};
    use axum::http::{header, HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn test_app(uploads_dir: std::path::PathBuf) -> (TestServer, sqlx::SqlitePool) {
        let pool = create_test_pool().await;
        let service = Arc::new(ImageService::new(pool.clone()));
        let uploads = UploadsDir::new(&UploadsConfig { dir: uploads_dir });
        let app = build_router(&AppConfig::default(), service, &uploads);
        (TestServer::new(app).unwrap(), pool)
    }

    fn missing_dir() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("absent-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_health_check() {
        let (server, _) = test_app(missing_dir()).await;

        server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_any_origin_is_allowed() {
        let (server, _) = test_app(missing_dir()).await;

        let response = server
            .get("/api/images")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://elsewhere.test"))
            .await;

        response.assert_status_ok();
        assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let (server, _) = test_app(missing_dir()).await;
        let request_id = HeaderName::from_static("x-request-id");

        let generated = server.get("/api/images").await;
        assert!(generated.maybe_header(request_id.clone()).is_some());

        let echoed = server
            .get("/api/images")
            .add_header(request_id.clone(), HeaderValue::from_static("client-supplied"))
            .await;
        assert_eq!(echoed.header(request_id), "client-supplied");
    }

    #[tokio::test]
    async fn test_api_and_uploads_share_the_filename_convention() {
        let dir = std::env::temp_dir().join(format!("uploads-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("cat.jpg"), b"jpeg bytes").unwrap();
        let (server, pool) = test_app(dir.clone()).await;
        insert_image(&pool, "cat.jpg").await;

        let images: Value = server.get("/api/images").await.json();
        let filename = images[0]["filename"].as_str().unwrap().to_string();

        let file = server.get(&format!("/uploads/{filename}")).await;
        file.assert_status_ok();
        assert_eq!(file.header(header::CONTENT_TYPE), "image/jpeg");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_rate_through_full_stack() {
        let (server, pool) = test_app(missing_dir()).await;
        let id = insert_image(&pool, "cat.png").await;

        server
            .post(&format!("/api/images/{id}/rate"))
            .json(&json!({ "rating": 5 }))
            .await
            .assert_json(&json!({ "message": "Rating updated successfully" }));
    }

    #[tokio::test]
    async fn test_rating_body_over_limit_is_payload_too_large() {
        let pool = create_test_pool().await;
        let id = insert_image(&pool, "cat.png").await;
        let config = AppConfig {
            max_request_body_size: 32,
            ..AppConfig::default()
        };
        let uploads = UploadsDir::new(&UploadsConfig { dir: missing_dir() });
        let app = build_router(&config, Arc::new(ImageService::new(pool)), &uploads);
        let server = TestServer::new(app).unwrap();

        let response = server
            .post(&format!("/api/images/{id}/rate"))
            .json(&json!({ "rating": 4, "comment": "x".repeat(64) }))
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        response.assert_json(&json!({ "error": "Request body is too large" }));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (server, _) = test_app(missing_dir()).await;

        server
            .get("/api/unknown")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let (server, _) = test_app(missing_dir()).await;

        let doc: Value = server.get("/api-docs/openapi.json").await.json();
        assert!(doc["paths"]["/api/images"].is_object());
    }
}
