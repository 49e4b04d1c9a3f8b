//! Core types and traits for the Shortbloom URL shortener.
//!
//! This crate provides the shared vocabulary used by the storage backends
//! and the shortener service: the validated [`ShortCode`], the error
//! taxonomy, and the [`Repository`] / [`Shortener`] capability traits.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{CoreError, ShortenerError, StorageError};
pub use repository::Repository;
pub use shortcode::{ShortCode, SHORT_CODE_LENGTH};
pub use shortener::Shortener;
