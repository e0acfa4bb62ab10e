//! Core types and traits for the Pinhole URL shortener.
//!
//! This crate provides the base-62 encoder and the shared types and
//! traits used by both the shortener service and the redirector service.

pub mod base62;
pub mod cache;
pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use cache::UrlCache;
pub use error::{CacheError, CoreError, ShortenerError, StorageError};
pub use repository::{MappingId, NewShortUrl, ReadRepository, Repository, ShortUrlMapping};
pub use shortcode::ShortCode;
pub use shortener::{ShortenParams, Shortener};
