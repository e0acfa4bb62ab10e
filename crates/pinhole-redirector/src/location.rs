use std::borrow::Cow;
use url::Url;

/// Scheme assumed for stored URLs that were submitted without one.
pub const DEFAULT_SCHEME: &str = "https";

/// Turns a stored long URL into a redirect target.
///
/// URLs that already carry a scheme and a host are returned unchanged.
/// Anything else (e.g. `example.com/page`) gets `https://` prepended.
pub fn redirect_location(long_url: &str) -> Cow<'_, str> {
    if has_scheme(long_url) {
        Cow::Borrowed(long_url)
    } else {
        Cow::Owned(format!("{DEFAULT_SCHEME}://{long_url}"))
    }
}

fn has_scheme(candidate: &str) -> bool {
    // `localhost:8080/x` parses with scheme "localhost", so a host is
    // required as well
    Url::parse(candidate).is_ok_and(|url| url.has_host() && candidate.contains("://"))
}
