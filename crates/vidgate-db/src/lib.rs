//! Metadata collaborator for Vidgate.
//!
//! The upload pipeline only needs two capabilities from the metadata store,
//! resolve a record and persist an updated one, so they live behind the
//! [`VideoRepository`] trait. `PgVideoRepository` backs it with Postgres;
//! `MemoryVideoRepository` backs it with a process-local map for development
//! and tests.

pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::MemoryVideoRepository;
pub use postgres::{connect, PgVideoRepository};
pub use repository::VideoRepository;
