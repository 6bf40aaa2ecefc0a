//! Storage module for image files
//!
//! Serves the uploads directory read-only. Files are placed there by an
//! external uploader; nothing here writes to disk.

mod uploads;

pub use uploads::UploadsDir;
