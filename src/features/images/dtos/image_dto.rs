use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::images::models::Image;
use crate::shared::validation::lenient_integer;

/// Response DTO for an image record
///
/// Values are passed through as stored; rows written without the table
/// defaults come back with `null` fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageResponseDto {
    pub id: i64,
    pub filename: String,
    /// 0 while unrated, otherwise 1-5
    #[schema(example = 0)]
    pub rating: Option<i64>,
    /// Creation time in SQLite's `CURRENT_TIMESTAMP` text form
    #[schema(example = "2024-05-01 12:30:00")]
    pub created_at: Option<String>,
}

impl From<Image> for ImageResponseDto {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            filename: image.filename,
            rating: image.rating,
            created_at: image.created_at,
        }
    }
}

/// Request DTO for rating an image
///
/// Anything other than an integral number in `rating` (missing, `null`,
/// strings, fractions) is treated as absent and rejected with the range
/// message. `4.0` counts as 4.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RateImageDto {
    #[serde(default, deserialize_with = "lenient_integer")]
    #[validate(
        required(message = "Rating must be between 1 and 5"),
        range(min = 1, max = 5, message = "Rating must be between 1 and 5")
    )]
    #[schema(value_type = i64, minimum = 1, maximum = 5, example = 4)]
    pub rating: Option<i64>,
}
