use pinhole_core::ShortenerError;
use url::Url;

/// Checks that `raw` is something we are willing to redirect to and returns
/// the value to store.
///
/// The value must be a URL with a host. A value without a scheme, such as
/// `example.com/page`, is checked as if it started with `https://` but is
/// stored as submitted. Surrounding whitespace is dropped.
pub fn validate_url(raw: &str) -> Result<&str, ShortenerError> {
    let candidate = raw.trim();
    if candidate.is_empty() {
        return Err(ShortenerError::InvalidUrl(
            "URL must not be blank".to_string(),
        ));
    }

    if candidate.contains("://") {
        return match Url::parse(candidate) {
            Ok(url) if url.has_host() => Ok(candidate),
            Ok(_) => Err(ShortenerError::InvalidUrl(format!(
                "URL must have a host: {candidate}"
            ))),
            Err(e) => Err(ShortenerError::InvalidUrl(format!(
                "malformed URL {candidate:?}: {e}"
            ))),
        };
    }

    match Url::parse(&format!("https://{candidate}")) {
        Ok(url) if url.has_host() => Ok(candidate),
        Ok(_) => Err(ShortenerError::InvalidUrl(format!(
            "URL must have a host: {candidate}"
        ))),
        Err(e) => Err(ShortenerError::InvalidUrl(format!(
            "malformed URL {candidate:?}: {e}"
        ))),
    }
}
