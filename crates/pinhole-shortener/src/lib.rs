//! URL shortener service implementation.
//!
//! This crate wires a code [`Generator`](pinhole_generator::Generator) to a
//! [`Repository`](pinhole_core::Repository): it validates the submitted URL,
//! looks for an unused code and persists the new mapping. Core types are
//! re-exported from `pinhole_core`.

pub mod service;
pub mod validate;

pub use pinhole_core::{ShortenParams, Shortener, ShortenerError};
pub use service::{ShortenerService, ShortenerSettings, DEFAULT_MAX_ATTEMPTS, MIN_ATTEMPTS};
pub use validate::validate_url;
