use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::images::dtos::ImageResponseDto;
use crate::features::images::models::Image;
use crate::shared::constants::IMAGE_NOT_FOUND;

/// Service for reading and rating image records
pub struct ImageService {
    pool: SqlitePool,
}

impl ImageService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every image, newest first
    pub async fn list(&self) -> Result<Vec<ImageResponseDto>> {
        let images = sqlx::query_as::<_, Image>(
            r#"
            SELECT id, filename, rating, CAST(created_at AS TEXT) AS created_at
            FROM images
            ORDER BY images.created_at DESC, images.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list images: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(images.into_iter().map(|i| i.into()).collect())
    }

    /// Set the rating of one image.
    ///
    /// `id` is bound as given; a value that matches no row yields `NotFound`.
    /// The rating must already be validated by the caller.
    pub async fn rate(&self, id: &str, rating: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE images
            SET rating = ?
            WHERE id = ?
            "#,
        )
        .bind(rating)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update rating: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(IMAGE_NOT_FOUND.to_string()));
        }

        tracing::info!("Image rated: id={}, rating={}", id, rating);

        Ok(())
    }
}
