//! Core types for Vidgate: errors, configuration, and domain models.
//!
//! This crate holds everything the other crates share: the unified [`AppError`]
//! type with its HTTP metadata, the env-driven [`Config`], and the domain
//! models (video records, orientation buckets, storage backend selection).

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

pub use config::{Config, ThumbnailStoreKind};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
