use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pinhole_core::{ShortCode, ShortenParams};
use pinhole_redirector::redirect_location;
use tracing::{debug, info};

pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let Json(request) = payload?;
    let long_url = request
        .long_url
        .ok_or_else(|| AppError::invalid_field("longUrl", "longUrl is required"))?;

    let mapping = state
        .shortener()
        .shorten(ShortenParams::new(long_url))
        .await?;

    let short_url = mapping.short_code.to_url(state.base_url());
    info!(code = %mapping.short_code, short_url = %short_url, "shortened url");

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            short_code: mapping.short_code.to_string(),
            short_url,
        }),
    ))
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    // a malformed code can never have been issued
    let code = ShortCode::new(&short_code).map_err(|_| AppError::NotFound)?;

    let mapping = state.redirector().resolve(&code).await?;
    let location = location_header(&redirect_location(&mapping.long_url))?;
    debug!(code = %code, location = ?location, "redirecting");

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, location),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        ],
    )
        .into_response())
}

/// Non-ASCII targets are sent in their percent-encoded form.
fn location_header(target: &str) -> Result<HeaderValue> {
    if let Ok(value) = HeaderValue::from_str(target) {
        return Ok(value);
    }

    let url = ::url::Url::parse(target)
        .map_err(|e| AppError::Internal(format!("stored url is not redirectable: {e}")))?;
    HeaderValue::from_str(url.as_str())
        .map_err(|e| AppError::Internal(format!("stored url is not redirectable: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_location_is_kept() {
        let value = location_header("https://example.com/page?q=1").unwrap();
        assert_eq!(value, "https://example.com/page?q=1");
    }

    #[test]
    fn non_ascii_location_is_percent_encoded() {
        let value = location_header("https://example.com/café").unwrap();
        assert_eq!(value, "https://example.com/caf%C3%A9");
    }
}
