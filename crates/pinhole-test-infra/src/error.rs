use thiserror::Error;

pub type Result<T> = std::result::Result<T, TestInfraError>;

/// Failure while bringing up a backend for an integration test.
#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("failed to start container: {0}")]
    Container(#[from] testcontainers::TestcontainersError),

    #[error("redis container not reachable: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("mysql container not reachable: {0}")]
    Mysql(#[from] sqlx::Error),
}
