//! # Tourmap Common Library
//!
//! Shared core for the tourmap service:
//! - Entity records (City, Venue, Concert) and joined views
//! - Schema validation with path-keyed structured errors
//! - Pure collection merge operations (upsert, partial update, remove, sort)
//! - Blob-backed record store (whole-document JSON per collection)
//! - Sync pipeline orchestrating validate → fetch → merge → persist
//! - Configuration loading
//! - Seed data

pub mod config;
pub mod error;
pub mod merge;
pub mod records;
pub mod seed;
pub mod store;
pub mod sync;
pub mod validate;

pub use error::{Error, Result};
