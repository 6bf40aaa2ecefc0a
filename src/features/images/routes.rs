use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::images::handlers;
use crate::features::images::services::ImageService;

/// Create routes for the images feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<ImageService>) -> Router {
    Router::new()
        .route("/api/images", get(handlers::list_images))
        .route("/api/images/{id}/rate", post(handlers::rate_image))
        .with_state(service)
}
