use crate::validate::validate_url;
use async_trait::async_trait;
use pinhole_core::{
    NewShortUrl, Repository, ShortUrlMapping, ShortenParams, Shortener, ShortenerError,
    StorageError,
};
use pinhole_generator::Generator;
use std::sync::Arc;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

/// One existence check plus one save.
pub const MIN_ATTEMPTS: u32 = 2;

/// Tunables for [`ShortenerService`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct ShortenerSettings {
    /// Upper bound on repository round trips (existence checks plus saves)
    /// spent finding a free code for one request. Values below
    /// [`MIN_ATTEMPTS`] are raised to it.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator`. Generated codes are
/// only candidates: each one is checked against the repository and saved if
/// free. A save that loses a race to a concurrent writer (`Conflict`) is
/// retried with a fresh code.
#[derive(Debug, Clone)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    settings: ShortenerSettings,
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` with default settings.
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_settings(repository, generator, ShortenerSettings::default())
    }

    pub fn with_settings(repository: R, generator: G, settings: ShortenerSettings) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            settings: ShortenerSettings {
                max_attempts: settings.max_attempts.max(MIN_ATTEMPTS),
            },
        }
    }

    pub fn settings(&self) -> ShortenerSettings {
        self.settings
    }

    async fn persist_unique(&self, long_url: &str) -> Result<ShortUrlMapping, ShortenerError> {
        let max_attempts = self.settings.max_attempts;
        let mut attempts = 0u32;

        while attempts < max_attempts {
            let code = self.generator.generate();

            attempts += 1;
            if self.repository.exists(&code).await? {
                debug!(code = %code, attempts, "Generated code already taken");
                continue;
            }

            if attempts == max_attempts {
                break;
            }
            attempts += 1;
            match self
                .repository
                .save(NewShortUrl::new(code.clone(), long_url))
                .await
            {
                Ok(mapping) => return Ok(mapping),
                Err(StorageError::Conflict(_)) => {
                    debug!(code = %code, attempts, "Lost race for generated code");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(attempts, "Gave up looking for a free short code");
        Err(ShortenerError::CodeSpaceExhausted { attempts })
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, params: ShortenParams) -> Result<ShortUrlMapping, ShortenerError> {
        let long_url = validate_url(&params.long_url)?;

        let mapping = self.persist_unique(long_url).await?;
        info!(code = %mapping.short_code, id = %mapping.id, "Created short url");

        Ok(mapping)
    }
}
