use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "PINHOLE_GATEWAY_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "PINHOLE_GATEWAY_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "PINHOLE_GATEWAY_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "PINHOLE_GATEWAY_MYSQL_DSN";
pub const CACHE_BACKEND_ENV: &str = "PINHOLE_GATEWAY_CACHE_BACKEND";
pub const CACHE_CAPACITY_ENV: &str = "PINHOLE_GATEWAY_CACHE_CAPACITY";
pub const REDIS_URL_ENV: &str = "PINHOLE_GATEWAY_REDIS_URL";
pub const SEED_SOURCE_ENV: &str = "PINHOLE_GATEWAY_SEED_SOURCE";
pub const SEED_OFFSET_ENV: &str = "PINHOLE_GATEWAY_SEED_OFFSET";
pub const CODE_LENGTH_ENV: &str = "PINHOLE_GATEWAY_CODE_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "PINHOLE_GATEWAY_MAX_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "PINHOLE_GATEWAY_LOG_FORMAT";
pub const OTLP_ENDPOINT_ENV: &str = "PINHOLE_GATEWAY_OTLP_ENDPOINT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheBackendArg {
    #[value(name = "moka")]
    Moka,
    #[value(name = "redis")]
    Redis,
}

impl Display for CacheBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheBackendArg::Moka => write!(f, "moka"),
            CacheBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeedSourceArg {
    /// Nanosecond clock, strictly increasing within the process
    #[value(name = "clock")]
    Clock,
    /// Plain counter starting at zero
    #[value(name = "sequence")]
    Sequence,
}

impl Display for SeedSourceArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedSourceArg::Clock => write!(f, "clock"),
            SeedSourceArg::Sequence => write!(f, "sequence"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "json")]
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "pinhole-gateway-http-server")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public base URL that short URLs are built on
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    #[arg(
        long,
        env = CACHE_BACKEND_ENV,
        value_enum,
        default_value_t = CacheBackendArg::Moka
    )]
    pub cache: CacheBackendArg,

    /// Entry bound for the in-process cache
    #[arg(long, env = CACHE_CAPACITY_ENV, default_value_t = pinhole_cache::moka::DEFAULT_MAX_CAPACITY)]
    pub cache_capacity: u64,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("cache", "redis"))]
    pub redis_url: Option<String>,

    #[arg(
        long,
        env = SEED_SOURCE_ENV,
        value_enum,
        default_value_t = SeedSourceArg::Clock
    )]
    pub seed: SeedSourceArg,

    /// First value of the sequence seed.
    ///
    /// Every process that shares a store with `--seed sequence` needs its
    /// own offset range, and a restarted process must start past the codes
    /// it already issued.
    #[arg(long, env = SEED_OFFSET_ENV, default_value_t = 0)]
    pub seed_offset: u64,

    /// Length of generated codes, 0 for variable length
    #[arg(
        long,
        env = CODE_LENGTH_ENV,
        default_value_t = pinhole_generator::DEFAULT_CODE_LENGTH,
        value_parser = clap::value_parser!(u8).range(0..=i64::from(pinhole_generator::MAX_CODE_LENGTH))
    )]
    pub code_length: u8,

    #[arg(long, env = MAX_ATTEMPTS_ENV, default_value_t = pinhole_shortener::DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Pretty)]
    pub log_format: LogFormatArg,

    /// OTLP/gRPC collector endpoint; spans are only exported when set
    #[arg(long, env = OTLP_ENDPOINT_ENV)]
    pub otlp_endpoint: Option<String>,
}
