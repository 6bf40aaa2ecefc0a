//! Static file service for uploaded images
//!
//! Files are looked up by exact path below the uploads directory. Content
//! type is inferred from the extension; directories are never listed and no
//! index file is substituted for them.

use std::path::{Path, PathBuf};

use axum::Router;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::core::config::UploadsConfig;

/// URL prefix the uploads directory is mounted under
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Read-only view of the uploads directory
#[derive(Debug, Clone)]
pub struct UploadsDir {
    root: PathBuf,
}

impl UploadsDir {
    pub fn new(config: &UploadsConfig) -> Self {
        Self {
            root: config.dir.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Log whether the directory is present. A missing directory is not an
    /// error: requests under `/uploads` then answer 404.
    pub fn check(&self) {
        let root = self.root();
        if root.is_dir() {
            info!("Serving uploads from {}", root.display());
        } else {
            warn!(
                "Uploads directory {} does not exist; {} requests will return 404",
                root.display(),
                UPLOADS_ROUTE
            );
        }
    }

    /// Router serving the directory under [`UPLOADS_ROUTE`]
    pub fn routes(&self) -> Router {
        let serve_dir = ServeDir::new(&self.root).append_index_html_on_directories(false);
        Router::new().nest_service(UPLOADS_ROUTE, serve_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use axum_test::TestServer;

    fn temp_uploads() -> UploadsDir {
        let dir = std::env::temp_dir().join(format!("uploads-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        UploadsDir::new(&UploadsConfig { dir })
    }

    #[tokio::test]
    async fn test_serves_file_with_inferred_content_type() {
        let uploads = temp_uploads();
        let bytes: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
        std::fs::write(uploads.root().join("cat.png"), bytes).unwrap();
        let server = TestServer::new(uploads.routes()).unwrap();

        let response = server.get("/uploads/cat.png").await;

        response.assert_status_ok();
        assert_eq!(response.header(header::CONTENT_TYPE), "image/png");
        assert_eq!(response.as_bytes().as_ref(), bytes);

        std::fs::remove_dir_all(uploads.root()).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let uploads = temp_uploads();
        let server = TestServer::new(uploads.routes()).unwrap();

        server
            .get("/uploads/nope.png")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        std::fs::remove_dir_all(uploads.root()).unwrap();
    }

    #[tokio::test]
    async fn test_directories_are_not_listed() {
        let uploads = temp_uploads();
        std::fs::create_dir_all(uploads.root().join("album")).unwrap();
        std::fs::write(uploads.root().join("album").join("index.html"), "<html/>").unwrap();
        let server = TestServer::new(uploads.routes()).unwrap();

        server
            .get("/uploads/album/")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        std::fs::remove_dir_all(uploads.root()).unwrap();
    }

    #[tokio::test]
    async fn test_missing_directory_serves_nothing() {
        let uploads = UploadsDir::new(&UploadsConfig {
            dir: std::env::temp_dir().join(format!("absent-{}", uuid::Uuid::new_v4())),
        });
        uploads.check();
        let server = TestServer::new(uploads.routes()).unwrap();

        server
            .get("/uploads/cat.png")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
