//! One timed request.
//!
//! [`Transport`] is the seam to the network: it performs a single GET and only
//! returns once the whole body has been read. [`TimedFetcher`] wraps a transport
//! with the clock and turns each successful call into a [`Sample`].
//!
//! # Timing boundary
//!
//! The clock starts right before the request future is first polled and stops right
//! after the body has been fully read. That interval includes client-side work:
//! runtime scheduling, connection checkout from the pool, request serialization and
//! body buffering. It is not the cleanest possible measurement of server latency,
//! but it is the boundary every previous run was measured with, so results stay
//! comparable.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use url::Url;

use crate::error::{FetchError, SetupError};
use crate::metric::Sample;
use crate::target::Target;

/// What a transport hands back for a fully received response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub bytes: usize,
}

/// Performs exactly one request per call. No retries.
///
/// Implementations must surface every failure, including timeouts, as a
/// [`FetchError`] and must not resolve before the body has been consumed.
pub trait Transport: Send + Sync {
    fn get(&self, url: &Url) -> impl Future<Output = Result<Response, FetchError>> + Send;
}

/// [`Transport`] backed by a single, shared `reqwest::Client`.
///
/// The client keeps connections alive between attempts, so only the first request
/// to a host pays for connection setup.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, SetupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SetupError::Client)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<Response, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(Response {
            status,
            bytes: body.len(),
        })
    }
}

/// Times one request against a target.
#[derive(Debug, Clone)]
pub struct TimedFetcher<T> {
    transport: T,
}

impl<T: Transport> TimedFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue one request and measure it, see the module docs for what the
    /// measured interval covers.
    pub async fn fetch(&self, target: &Target) -> Result<Sample, FetchError> {
        let start = Instant::now();
        let response = self.transport.get(target.url()).await?;
        let elapsed = start.elapsed();

        Ok(Sample::new(elapsed, response.status, response.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Metric;

    struct Sleepy(Duration);

    impl Transport for Sleepy {
        async fn get(&self, _: &Url) -> Result<Response, FetchError> {
            tokio::time::sleep(self.0).await;
            Ok(Response {
                status: 204,
                bytes: 0,
            })
        }
    }

    struct Refused;

    impl Transport for Refused {
        async fn get(&self, _: &Url) -> Result<Response, FetchError> {
            Err(FetchError::Connect("connection refused".into()))
        }
    }

    fn target() -> Target {
        Target::parse("http://127.0.0.1:9000/").unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn measures_whole_transport_call() {
        let fetcher = TimedFetcher::new(Sleepy(Duration::from_millis(250)));
        let sample = fetcher.fetch(&target()).await.unwrap();

        assert_eq!(sample.elapsed(), Duration::from_millis(250));
        assert_eq!(sample.status, 204);
    }

    #[tokio::test]
    async fn surfaces_transport_failure() {
        let fetcher = TimedFetcher::new(Refused);
        let err = fetcher.fetch(&target()).await.unwrap_err();

        assert!(matches!(err, FetchError::Connect(_)));
    }
}
