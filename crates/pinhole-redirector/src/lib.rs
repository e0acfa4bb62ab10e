//! Redirector service library with read-through caching.
//!
//! This crate provides a [`RedirectorService`] that resolves short codes
//! to their stored mappings. It uses the Repository decorator pattern to
//! add transparent caching via any [`UrlCache`](pinhole_core::UrlCache).
//!
//! # Example
//!
//! ```rust
//! use pinhole_cache::MokaUrlCache;
//! use pinhole_core::ShortCode;
//! use pinhole_redirector::{redirect_location, CachedRepository, RedirectorService};
//! use pinhole_storage::InMemoryRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cached_repo = CachedRepository::new(InMemoryRepository::new(), MokaUrlCache::new());
//! let service = RedirectorService::new(cached_repo);
//!
//! let code = ShortCode::new("abc123")?;
//! let mapping = service.resolve(&code).await?;
//! println!("Redirect to: {}", redirect_location(&mapping.long_url));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod location;
pub mod redirector;
pub mod repository;
pub mod service;

pub use error::{RedirectorError, Result};
pub use location::redirect_location;
pub use redirector::Redirector;
pub use repository::CachedRepository;
pub use service::RedirectorService;
