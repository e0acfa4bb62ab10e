use jiff::Timestamp;
use pinhole_cache::{CacheError, RedisUrlCache, UrlCache};
use pinhole_core::{MappingId, NewShortUrl, ShortCode, ShortUrlMapping};
use pinhole_test_infra::redis::RedisServer;
use redis::AsyncCommands;

/// Test fixture that keeps a Redis container alive for the test's duration.
struct Fixture {
    _redis: RedisServer,
    conn: redis::aio::MultiplexedConnection,
}

impl Fixture {
    async fn start() -> Self {
        let redis = RedisServer::new().await.expect("start redis");
        let conn = redis.connection().await.expect("connect redis");
        Self {
            _redis: redis,
            conn,
        }
    }
}

fn mapping(code: &str, url: &str) -> ShortUrlMapping {
    NewShortUrl {
        short_code: ShortCode::new_unchecked(code),
        long_url: url.to_string(),
        created_at: Timestamp::from_second(1_700_000_000).unwrap(),
    }
    .into_mapping(MappingId::new(9))
}

#[tokio::test]
async fn get_and_put() {
    let fixture = Fixture::start().await;
    let cache = RedisUrlCache::new(fixture.conn.clone());
    let code = ShortCode::new("test123").unwrap();
    let m = mapping("test123", "https://example.com");

    assert!(cache.get(&code).await.unwrap().is_none());

    cache.put(&code, &m).await.unwrap();

    assert_eq!(cache.get(&code).await.unwrap(), Some(m));
}

#[tokio::test]
async fn uses_short_url_key_prefix_without_expiry() {
    let fixture = Fixture::start().await;
    let cache = RedisUrlCache::new(fixture.conn.clone());
    let code = ShortCode::new("abc").unwrap();

    cache
        .put(&code, &mapping("abc", "https://example.com"))
        .await
        .unwrap();

    let mut conn = fixture.conn.clone();
    let exists: bool = conn.exists("short_url:abc").await.unwrap();
    assert!(exists);
    let ttl: i64 = conn.ttl("short_url:abc").await.unwrap();
    assert_eq!(ttl, -1);
}

#[tokio::test]
async fn custom_prefixes_do_not_collide() {
    let fixture = Fixture::start().await;
    let a = RedisUrlCache::with_prefix(fixture.conn.clone(), "a:");
    let b = RedisUrlCache::with_prefix(fixture.conn.clone(), "b:");
    let code = ShortCode::new("same").unwrap();

    a.put(&code, &mapping("same", "https://a.example"))
        .await
        .unwrap();

    assert!(b.get(&code).await.unwrap().is_none());
    assert_eq!(
        a.get(&code).await.unwrap().unwrap().long_url,
        "https://a.example"
    );
}

#[tokio::test]
async fn corrupt_value_is_reported_as_invalid_data() {
    let fixture = Fixture::start().await;
    let cache = RedisUrlCache::new(fixture.conn.clone());

    let mut conn = fixture.conn.clone();
    let _: () = conn.set("short_url:broken", "not json").await.unwrap();

    let err = cache
        .get(&ShortCode::new("broken").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, CacheError::InvalidData(_)));
}

#[tokio::test]
async fn connect_from_url() {
    let redis = RedisServer::new().await.expect("start redis");
    let url = redis.redis_url().await.unwrap();

    let cache = RedisUrlCache::connect(&url).await.unwrap();
    let code = ShortCode::new("viaurl").unwrap();
    cache
        .put(&code, &mapping("viaurl", "https://example.com"))
        .await
        .unwrap();
    assert!(cache.get(&code).await.unwrap().is_some());
}
