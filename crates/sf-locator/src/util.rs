use crate::constants::DEFAULT_TIMEOUT;

/// HTTP client shared by every lookup in a batch.
///
/// The per-request timeout is applied by [`crate::stores::StoreLocator`];
/// here we only bound connection setup.
pub fn default_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .gzip(true)
        .brotli(true)
        .connect_timeout(DEFAULT_TIMEOUT)
        .build()
}
