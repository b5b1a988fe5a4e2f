//! HTTP client for the device status page.
//!
//! Wraps a [`reqwest::Client`] with the device URL and extraction
//! pattern. Fetch failures come back as the core
//! [`Failure`](linkwatch_core::Failure) taxonomy so the presenter can
//! render them; only client *construction* can produce a Rust error.

use std::error::Error as _;
use std::time::Duration;

use linkwatch_core::{Failure, RawReading};

use crate::pattern::ExtractionPattern;

/// The client could not be built (TLS backend initialisation, invalid
/// builder configuration). Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("device HTTP client could not be built: {0}")]
    Build(#[from] reqwest::Error),
}

/// HTTP poller for a single remote device.
pub struct DeviceClient {
    client: reqwest::Client,
    url: String,
    pattern: ExtractionPattern,
}

impl DeviceClient {
    /// Build a client with its own connection pool and a whole-request
    /// timeout.
    pub fn new(
        url: String,
        pattern: ExtractionPattern,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url, pattern))
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, url: String, pattern: ExtractionPattern) -> Self {
        Self {
            client,
            url,
            pattern,
        }
    }

    /// Issue one HTTP GET and extract one reading.
    ///
    /// * non-2xx status → [`Failure::Http`]
    /// * transport timeout → [`Failure::Timeout`]
    /// * other transport errors → [`Failure::Network`] with the OS
    ///   error code when one exists in the source chain
    /// * 2xx body with no line matching the pattern →
    ///   [`Failure::NoConnection`]
    ///
    /// No retry is performed here.
    pub async fn fetch(&self) -> Result<RawReading, Failure> {
        tracing::debug!(url = %self.url, "Polling device status page");

        let response = match self.client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => return Err(transport_failure(&e)),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(status_failure(status));
        }

        // The status pages are a few KB of firmware-generated ASCII;
        // buffering the body and scanning it line by line is fine.
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Err(transport_failure(&e)),
        };

        match self.pattern.extract(&body) {
            Some(reading) => Ok(reading),
            None => Err(Failure::NoConnection),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Map a non-2xx status to its failure, keeping the reason phrase.
fn status_failure(status: reqwest::StatusCode) -> Failure {
    Failure::Http {
        status: status.as_u16(),
        reason: status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string(),
    }
}

/// Classify a transport-level error.
fn transport_failure(err: &reqwest::Error) -> Failure {
    if err.is_timeout() {
        return Failure::Timeout;
    }
    Failure::Network {
        code: os_error_code(err),
        reason: root_cause(err),
    }
}

/// Innermost source message, which names the actual transport problem
/// instead of reqwest's outer "error sending request" wrapper.
fn root_cause(err: &reqwest::Error) -> String {
    let mut cause: &(dyn std::error::Error + 'static) = err;
    while let Some(source) = cause.source() {
        cause = source;
    }
    cause.to_string()
}

/// Walk the source chain for an `io::Error` carrying an OS errno.
fn os_error_code(err: &reqwest::Error) -> Option<i32> {
    let mut source: Option<&(dyn std::error::Error + 'static)> = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if let Some(code) = io.raw_os_error() {
                return Some(code);
            }
        }
        source = cause.source();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn non_2xx_status_keeps_code_and_reason() {
        assert_eq!(
            status_failure(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
            Failure::Http {
                status: 500,
                reason: "Internal Server Error".to_string()
            }
        );
        assert_eq!(
            status_failure(reqwest::StatusCode::NOT_FOUND),
            Failure::Http {
                status: 404,
                reason: "Not Found".to_string()
            }
        );
    }

    #[test]
    fn unknown_status_still_maps() {
        let status = reqwest::StatusCode::from_u16(599).expect("valid code");
        assert_matches!(
            status_failure(status),
            Failure::Http { status: 599, reason } if reason == "unknown status"
        );
    }

    #[test]
    fn client_builds_with_timeout() {
        let pattern = ExtractionPattern::new(r"(?P<Q10>\d+)").expect("valid pattern");
        let client = DeviceClient::new(
            "http://192.168.3.253".to_string(),
            pattern,
            Duration::from_secs(3),
        )
        .expect("client builds");
        assert_eq!(client.url(), "http://192.168.3.253");
    }
}
