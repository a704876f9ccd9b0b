use std::time::Duration;

use reitwatch_core::FeedError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = concat!("reitwatch/", env!("CARGO_PKG_VERSION"));

/// Shared blocking client configuration for all feeds.
pub(crate) fn build_client() -> Result<reqwest::blocking::Client, FeedError> {
    reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|error| FeedError::internal(format!("http client: {error}")))
}

/// Maps transport failures into structured feed errors.
pub(crate) fn transport_error(error: reqwest::Error) -> FeedError {
    if error.is_timeout() || error.is_connect() {
        FeedError::unavailable(error.to_string())
    } else if error.is_decode() {
        FeedError::decode(error.to_string())
    } else {
        FeedError::internal(error.to_string())
    }
}

/// Maps non-success HTTP statuses into structured feed errors.
pub(crate) fn status_error(status: reqwest::StatusCode) -> FeedError {
    if status.as_u16() == 429 {
        FeedError::rate_limited(format!("http status {status}"))
    } else if status.is_server_error() {
        FeedError::unavailable(format!("http status {status}"))
    } else {
        FeedError::invalid_request(format!("http status {status}"))
    }
}
