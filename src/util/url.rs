use thiserror::Error;
use url::Url;

/// Errors that can occur during feed URL validation.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
}

/// Validates a URL string for use as a feed subscription.
///
/// This is the fast local rejection that runs before the action gate is
/// touched: a URL that fails here never produces a remote call. The server
/// performs its own fetch-side checks; the client only enforces that the
/// input is a plausible http(s) resource.
///
/// # Errors
///
/// Returns [`UrlValidationError`] if the URL cannot be parsed, uses a
/// non-http(s) scheme, or names no host.
pub fn validate_feed_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.host_str().is_none() {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}
