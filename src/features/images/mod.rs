//! Image records and their ratings.
//!
//! Records are inserted into the `images` table by whatever process places
//! files in the uploads directory; this feature only lists them and lets a
//! client rate them.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/images` | No | List images, newest first |
//! | POST | `/api/images/{id}/rate` | No | Set an image's 1-5 rating |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ImageService;
