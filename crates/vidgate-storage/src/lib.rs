//! Vidgate storage library
//!
//! Object-storage abstraction and implementations: the [`Storage`] trait, S3
//! and local-filesystem backends, key generation, and the injected
//! [`ThumbnailStore`] abstraction.
//!
//! # Storage key format
//!
//! - **Media**: `{landscape|portrait|other}/{base64url(256-bit random)}.{ext}`
//! - **Thumbnails** (durable store): `thumbnails/{video_id}.{ext}`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod thumbnails;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use thumbnails::{MemoryThumbnailStore, ObjectThumbnailStore, StoredThumbnail, ThumbnailStore};
pub use traits::{Storage, StorageError, StorageResult};
pub use vidgate_core::StorageBackend;
