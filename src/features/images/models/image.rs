use sqlx::FromRow;

/// Database model for a row of the `images` table
///
/// Rows are written by an external uploader, so `rating` and `created_at` may
/// be `NULL` even though the table gives them defaults. `created_at` is read
/// back as the text SQLite holds, fractional seconds included.
#[derive(Debug, Clone, FromRow)]
pub struct Image {
    pub id: i64,
    pub filename: String,
    pub rating: Option<i64>,
    pub created_at: Option<String>,
}
