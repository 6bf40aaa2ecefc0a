/// Rating stored for images nobody has rated yet
#[cfg(test)]
pub const UNRATED: i64 = 0;

// =============================================================================
// RESPONSE MESSAGES
// =============================================================================

pub const RATING_OUT_OF_RANGE: &str = "Rating must be between 1 and 5";

pub const IMAGE_NOT_FOUND: &str = "Image not found";

pub const RATING_UPDATED: &str = "Rating updated successfully";
