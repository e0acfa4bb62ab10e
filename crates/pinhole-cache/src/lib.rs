//! [`UrlCache`] backends for the Pinhole lookup path.
//!
//! [`MokaUrlCache`] keeps mappings in process memory; [`RedisUrlCache`]
//! shares them between gateway instances.

pub mod moka;
pub mod redis;

pub use self::moka::{CacheConfig, MokaUrlCache};
pub use self::redis::RedisUrlCache;
pub use pinhole_core::cache::{Result, UrlCache};
pub use pinhole_core::CacheError;
