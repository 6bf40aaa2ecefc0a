//! Modules layer - Infrastructure components outside the HTTP API
//!
//! Contains adapters for the filesystem-backed image storage.

pub mod storage;
