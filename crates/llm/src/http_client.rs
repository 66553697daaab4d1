//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients with the bounded
//! request timeout applied. An elapsed timeout surfaces as a request error and
//! is treated like any other provider failure.

use std::time::Duration;

/// Build a `reqwest::Client` with the given request timeout.
pub fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("failed to build reqwest client")
}
