//! Shared plumbing for the HTTP clients.

use std::time::Duration;

use sarathi_core::ApiError;

pub(crate) const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the client both API callers share.
pub(crate) fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

/// Buckets a transport-level failure: anything that kept the request from
/// completing counts as unreachable, the rest stays unclassified.
pub(crate) fn classify_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_connect() || err.is_timeout() {
        ApiError::Unreachable
    } else {
        ApiError::Unclassified {
            status: err.status().map(|status| status.as_u16()),
            message: err.to_string(),
        }
    }
}
