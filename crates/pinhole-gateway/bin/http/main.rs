mod cli;
mod telemetry;

use crate::cli::{CacheBackendArg, SeedSourceArg, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use pinhole_cache::{MokaUrlCache, RedisUrlCache, UrlCache};
use pinhole_core::{Repository, Shortener};
use pinhole_gateway::{App, AppState};
use pinhole_generator::{Base62Generator, ClockSeed, CodeLength, Generator, SequenceSeed};
use pinhole_redirector::{CachedRepository, Redirector, RedirectorService};
use pinhole_shortener::{ShortenerService, ShortenerSettings};
use pinhole_storage::{InMemoryRepository, MySqlRepository};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    let telemetry = telemetry::init(config.log_format, config.otlp_endpoint.as_deref())?;

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_backend = %config.storage,
        cache_backend = %config.cache,
        seed_source = %config.seed,
        seed_offset = config.seed_offset,
        code_length = config.code_length,
        max_attempts = config.max_attempts,
        "starting gateway server"
    );

    let repository = build_repository(&config).await?;
    let shortener = build_shortener(&config, Arc::clone(&repository))?;
    let redirector = build_redirector(&config, repository).await?;

    let state = AppState::new(shortener, redirector, config.base_url.clone());
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    telemetry.shutdown();
    Ok(())
}

async fn build_repository(config: &CLI) -> anyhow::Result<Arc<dyn Repository>> {
    match config.storage {
        StorageBackendArg::InMemory => Ok(Arc::new(InMemoryRepository::new())),
        StorageBackendArg::Mysql => {
            let dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(dsn).await?;
            repository.migrate().await?;
            Ok(Arc::new(repository))
        }
    }
}

fn build_shortener(
    config: &CLI,
    repository: Arc<dyn Repository>,
) -> anyhow::Result<Arc<dyn Shortener>> {
    let length = CodeLength::from_len(config.code_length)
        .with_context(|| format!("code length {} is too long", config.code_length))?;
    let settings = ShortenerSettings::builder()
        .max_attempts(config.max_attempts)
        .build();

    let shortener = match config.seed {
        SeedSourceArg::Clock => shortener_with(
            repository,
            Base62Generator::builder()
                .seed(ClockSeed::new())
                .length(length)
                .build(),
            settings,
        ),
        SeedSourceArg::Sequence => shortener_with(
            repository,
            Base62Generator::builder()
                .seed(SequenceSeed::with_offset(config.seed_offset))
                .length(length)
                .build(),
            settings,
        ),
    };
    Ok(shortener)
}

fn shortener_with<G: Generator>(
    repository: Arc<dyn Repository>,
    generator: G,
    settings: ShortenerSettings,
) -> Arc<dyn Shortener> {
    Arc::new(ShortenerService::with_settings(
        repository, generator, settings,
    ))
}

async fn build_redirector(
    config: &CLI,
    repository: Arc<dyn Repository>,
) -> anyhow::Result<Arc<dyn Redirector>> {
    match config.cache {
        CacheBackendArg::Moka => Ok(redirector_with(
            repository,
            MokaUrlCache::with_capacity(config.cache_capacity),
        )),
        CacheBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("redis url is required when cache backend is redis")?;
            Ok(redirector_with(
                repository,
                RedisUrlCache::connect(redis_url).await?,
            ))
        }
    }
}

fn redirector_with<C: UrlCache>(repository: Arc<dyn Repository>, cache: C) -> Arc<dyn Redirector> {
    Arc::new(RedirectorService::new(CachedRepository::new(
        repository, cache,
    )))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
