use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pinhole_cache::MokaUrlCache;
use pinhole_core::repository;
use pinhole_core::{
    NewShortUrl, ReadRepository, Repository, ShortCode, ShortUrlMapping, StorageError,
};
use pinhole_gateway::{App, AppState};
use pinhole_generator::{
    Base62Generator, ClockSeed, CodeLength, Generator, SequenceSeed, MAX_CODE_LENGTH,
};
use pinhole_redirector::{CachedRepository, RedirectorService};
use pinhole_shortener::ShortenerService;
use pinhole_storage::InMemoryRepository;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;

const BASE_URL: &str = "http://localhost:8080";

fn router_with<R: Repository, G: Generator>(repository: Arc<R>, generator: G) -> Router {
    let shortener = ShortenerService::new(Arc::clone(&repository), generator);
    let redirector =
        RedirectorService::new(CachedRepository::new(repository, MokaUrlCache::new()));
    App::router(AppState::new(
        Arc::new(shortener),
        Arc::new(redirector),
        BASE_URL,
    ))
}

fn test_app() -> (Router, Arc<InMemoryRepository>) {
    let repository = Arc::new(InMemoryRepository::new());
    let router = router_with(
        Arc::clone(&repository),
        Base62Generator::new(ClockSeed::new()),
    );
    (router, repository)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, header::HeaderMap, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn shorten_request(body: impl Into<Body>) -> Request<Body> {
    Request::post("/api/v1/shorten")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn shorten(long_url: &str) -> Request<Body> {
    shorten_request(json!({ "longUrl": long_url }).to_string())
}

fn redirect(code: &str) -> Request<Body> {
    Request::get(format!("/{code}")).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health() {
    let (router, _) = test_app();

    let (status, _, body) = send(
        &router,
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn create_then_redirect_scheme_less_url() {
    let (router, _) = test_app();

    let (status, _, body) = send(&router, shorten("example.com/page")).await;
    assert_eq!(status, StatusCode::CREATED);

    let code = body["shortCode"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 8);
    assert!(ShortCode::new(&code).is_ok());
    assert_eq!(body["shortUrl"], format!("{BASE_URL}/{code}"));

    let (status, headers, _) = send(&router, redirect(&code)).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(headers[header::LOCATION], "https://example.com/page");
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
}

#[tokio::test]
async fn create_then_redirect_absolute_url() {
    let (router, _) = test_app();

    let (_, _, body) = send(&router, shorten("https://example.com/some/long/path?x=1")).await;
    let code = body["shortCode"].as_str().unwrap();

    for _ in 0..3 {
        let (status, headers, _) = send(&router, redirect(code)).await;
        assert_eq!(status, StatusCode::FOUND);
        assert_eq!(
            headers[header::LOCATION],
            "https://example.com/some/long/path?x=1"
        );
    }
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let (router, _) = test_app();

    let (status, headers, body) = send(&router, redirect("zzzzzzzz")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(headers.get(header::LOCATION).is_none());
    assert_eq!(body, json!({ "error": "short url not found" }));
}

#[tokio::test]
async fn malformed_code_is_not_found() {
    let (router, _) = test_app();

    let (status, _, _) = send(&router, redirect("not-a-code")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let too_long = "a".repeat(pinhole_core::shortcode::MAX_LENGTH + 1);
    let (status, _, _) = send(&router, redirect(&too_long)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_urls_are_rejected_without_persisting() {
    let (router, repository) = test_app();

    for bad in ["", "   ", "not a url"] {
        let (status, _, body) = send(&router, shorten(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad:?}");
        assert_eq!(body["error"], "invalid request");
        assert_eq!(body["details"][0]["field"], "longUrl");
    }

    assert!(repository.is_empty());
}

#[tokio::test]
async fn missing_long_url_is_rejected() {
    let (router, repository) = test_app();

    let (status, _, body) = send(&router, shorten_request("{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "longUrl");
    assert!(repository.is_empty());
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (router, repository) = test_app();

    let (status, _, body) = send(&router, shorten_request("{\"longUrl\": ")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid request");
    assert!(repository.is_empty());
}

#[tokio::test]
async fn same_url_twice_gets_two_codes() {
    let (router, repository) = test_app();

    let (_, _, first) = send(&router, shorten("https://example.com")).await;
    let (_, _, second) = send(&router, shorten("https://example.com")).await;

    assert_ne!(first["shortCode"], second["shortCode"]);
    assert_eq!(repository.len(), 2);
}

#[tokio::test]
async fn many_creations_yield_distinct_codes() {
    let repository = Arc::new(InMemoryRepository::new());
    let router = router_with(
        Arc::clone(&repository),
        Base62Generator::new(SequenceSeed::new()),
    );

    let mut codes = HashSet::new();
    for i in 0..100 {
        let (status, _, body) = send(&router, shorten(&format!("https://example.com/{i}"))).await;
        assert_eq!(status, StatusCode::CREATED);
        codes.insert(body["shortCode"].as_str().unwrap().to_string());
    }

    assert_eq!(codes.len(), 100);
    assert_eq!(repository.len(), 100);
}

#[tokio::test]
async fn longest_codes_redirect() {
    let repository = Arc::new(InMemoryRepository::new());
    let generator = Base62Generator::builder()
        .seed(ClockSeed::new())
        .length(CodeLength::from_len(MAX_CODE_LENGTH).unwrap())
        .build();
    let router = router_with(Arc::clone(&repository), generator);

    let (status, _, body) = send(&router, shorten("https://example.com/long")).await;
    assert_eq!(status, StatusCode::CREATED);
    let code = body["shortCode"].as_str().unwrap();
    assert_eq!(code.len(), pinhole_core::shortcode::MAX_LENGTH);

    let (status, headers, _) = send(&router, redirect(code)).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(headers[header::LOCATION], "https://example.com/long");
}

fn sequence_router(repository: &Arc<InMemoryRepository>, offset: u64) -> Router {
    router_with(
        Arc::clone(repository),
        Base62Generator::new(SequenceSeed::with_offset(offset)),
    )
}

#[tokio::test]
async fn restart_with_offset_past_issued_codes_keeps_creating() {
    let repository = Arc::new(InMemoryRepository::new());

    let first_run = sequence_router(&repository, 0);
    for i in 0..40 {
        let (status, _, _) = send(&first_run, shorten(&format!("https://example.com/{i}"))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let restarted = sequence_router(&repository, 40);
    for i in 0..4 {
        let (status, _, _) =
            send(&restarted, shorten(&format!("https://example.com/again/{i}"))).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    assert_eq!(repository.len(), 44);
}

#[tokio::test]
async fn restart_over_issued_codes_runs_out_of_attempts() {
    let repository = Arc::new(InMemoryRepository::new());

    let first_run = sequence_router(&repository, 0);
    for i in 0..40 {
        send(&first_run, shorten(&format!("https://example.com/{i}"))).await;
    }

    let restarted = sequence_router(&repository, 0);
    let (status, _, _) = send(&restarted, shorten("https://example.com/again")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(repository.len(), 40);
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_normalised() {
    let repository = Arc::new(InMemoryRepository::new());
    let shortener = ShortenerService::new(
        Arc::clone(&repository),
        Base62Generator::new(SequenceSeed::new()),
    );
    let redirector = RedirectorService::new(repository);
    let router = App::router(AppState::new(
        Arc::new(shortener),
        Arc::new(redirector),
        "https://pin.example/",
    ));

    let (_, _, body) = send(&router, shorten("https://example.com")).await;

    assert_eq!(body["shortUrl"], "https://pin.example/00000000");
}

/// Every call fails as if the database were down.
struct DownRepository;

#[async_trait]
impl ReadRepository for DownRepository {
    async fn find_by_code(&self, _code: &ShortCode) -> repository::Result<Option<ShortUrlMapping>> {
        Err(StorageError::Unavailable("db down".to_string()))
    }

    async fn exists(&self, _code: &ShortCode) -> repository::Result<bool> {
        Err(StorageError::Unavailable("db down".to_string()))
    }
}

#[async_trait]
impl Repository for DownRepository {
    async fn save(&self, _mapping: NewShortUrl) -> repository::Result<ShortUrlMapping> {
        Err(StorageError::Unavailable("db down".to_string()))
    }
}

#[tokio::test]
async fn storage_failures_are_opaque_server_errors() {
    let router = router_with(
        Arc::new(DownRepository),
        Base62Generator::new(SequenceSeed::new()),
    );

    let (status, _, body) = send(&router, shorten("https://example.com")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "internal server error" }));

    let (status, _, body) = send(&router, redirect("abc123")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.to_string().contains("db down"));
}

/// Always proposes the same code.
struct StuckGenerator;

impl Generator for StuckGenerator {
    fn generate(&self) -> ShortCode {
        ShortCode::new_unchecked("stuck")
    }
}

#[tokio::test]
async fn exhausted_code_space_is_unavailable() {
    let repository = Arc::new(InMemoryRepository::new());
    repository
        .save(NewShortUrl::new(
            ShortCode::new_unchecked("stuck"),
            "https://first.example",
        ))
        .await
        .unwrap();
    let router = router_with(Arc::clone(&repository), StuckGenerator);

    let (status, _, body) = send(&router, shorten("https://second.example")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({ "error": "service unavailable" }));
    assert_eq!(repository.len(), 1);
}
