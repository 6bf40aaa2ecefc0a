use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::images::dtos::{ImageResponseDto, RateImageDto};
use crate::features::images::services::ImageService;
use crate::shared::constants::{RATING_OUT_OF_RANGE, RATING_UPDATED};
use crate::shared::types::{ErrorResponse, MessageResponse};
use crate::shared::validation::first_error_message;

/// List all images
///
/// Returns every stored image record, most recently created first.
#[utoipa::path(
    get,
    path = "/api/images",
    responses(
        (status = 200, description = "List of images", body = Vec<ImageResponseDto>),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "images"
)]
pub async fn list_images(
    State(service): State<Arc<ImageService>>,
) -> Result<Json<Vec<ImageResponseDto>>> {
    let images = service.list().await?;
    Ok(Json(images))
}

/// Rate an image
#[utoipa::path(
    post,
    path = "/api/images/{id}/rate",
    params(
        ("id" = String, Path, description = "Image ID")
    ),
    request_body = RateImageDto,
    responses(
        (status = 200, description = "Rating updated", body = MessageResponse),
        (status = 400, description = "Rating outside 1-5", body = ErrorResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "images"
)]
pub async fn rate_image(
    State(service): State<Arc<ImageService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<RateImageDto>,
) -> Result<Json<MessageResponse>> {
    dto.validate()
        .map_err(|e| AppError::Validation(first_error_message(&e)))?;

    let rating = dto
        .rating
        .ok_or_else(|| AppError::Validation(RATING_OUT_OF_RANGE.to_string()))?;

    service.rate(&id, rating).await?;
    Ok(Json(MessageResponse::new(RATING_UPDATED)))
}
