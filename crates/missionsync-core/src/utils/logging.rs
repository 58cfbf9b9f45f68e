/// Logging setup and redaction helpers
///
/// Pre-authenticated download URLs and bearer tokens must never reach the
/// logs; everything that may carry them goes through these helpers.
use tracing_subscriber::EnvFilter;

/// Initializes the JSON tracing subscriber used by every Lambda binary.
///
/// Honors `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A second initialization (tests, warm containers) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .try_init();
}

/// Strips the query string and fragment from a URL
///
/// # Examples
/// ```
/// use missionsync_core::utils::logging::redact_url;
///
/// assert_eq!(
///     redact_url("https://tenant.sharepoint.com/download.aspx?tempauth=abc"),
///     "https://tenant.sharepoint.com/download.aspx?[redacted]"
/// );
/// assert_eq!(redact_url("https://example.com/a"), "https://example.com/a");
/// ```
pub fn redact_url(url: &str) -> String {
    match url.find(['?', '#']) {
        Some(idx) => format!("{}?[redacted]", &url[..idx]),
        None => url.to_string(),
    }
}

/// Masks a secret, keeping only its length
pub fn redact_secret(secret: &str) -> String {
    format!("[{} chars]", secret.chars().count())
}

/// Sanitizes S3 key for logging (keeps only the file name)
pub fn sanitize_s3_key_for_log(key: &str) -> String {
    match key.rsplit_once('/') {
        Some((_, filename)) => format!(".../{}", filename),
        None => key.to_string(),
    }
}
