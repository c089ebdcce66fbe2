//! Middleware stack for the outbound HTTP client.

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

/// Wrap `client` in the middleware stack.
///
/// With `max_retries == 0` no retry layer is installed and every call is a
/// single attempt.
pub(crate) fn build(client: Client, max_retries: u32) -> ClientWithMiddleware {
    let builder = ClientBuilder::new(client);

    if max_retries == 0 {
        return builder.build();
    }

    let retry_policy = ExponentialBackoff::builder()
        .retry_bounds(Duration::from_millis(200), Duration::from_secs(5))
        .build_with_max_retries(max_retries);

    builder.with(RetryTransientMiddleware::new_with_policy(retry_policy)).build()
}
