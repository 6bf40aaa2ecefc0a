use utoipa::OpenApi;

use crate::features::images::{dtos as images_dtos, handlers as images_handlers};
use crate::shared::types::{ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Images (public)
        images_handlers::list_images,
        images_handlers::rate_image,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            MessageResponse,
            // Images
            images_dtos::ImageResponseDto,
            images_dtos::RateImageDto,
        )
    ),
    tags(
        (name = "images", description = "Image records and ratings (public)"),
    ),
    info(
        title = "Image Rating API",
        version = "0.1.0",
        description = "List stored images and rate them from 1 to 5",
    )
)]
pub struct ApiDoc;
