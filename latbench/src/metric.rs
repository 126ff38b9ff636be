use std::fmt::Debug;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};

use crate::macros::metric;

/// A `Metric` is a single observation produced by one successful attempt.
///
/// Metrics are the most granular level of data in a run. They are collected by an
/// [`crate::Aggregate`], then summarized by a [`crate::Report`] and written out by a
/// [`crate::Reporter`].
///
/// Every metric carries the wall-clock time its attempt took; anything else (status,
/// payload size, ...) is up to the implementor. The easiest way to get an implementation
/// is the [`metric`] attribute, which derives the required traits and wires
/// [`Metric::elapsed`] to the field marked `#[elapsed]`.
///
/// ## Example
/// ```rust
/// use latbench::{Metric, macros::metric};
/// use std::time::Duration;
///
/// #[metric]
/// struct Ping {
///     #[elapsed]
///     rtt: Duration,
/// }
///
/// let ping = Ping { rtt: Duration::from_millis(3) };
/// assert_eq!(ping.elapsed(), Duration::from_millis(3));
/// ```
pub trait Metric
where
    Self: Serialize + DeserializeOwned + PartialOrd + PartialEq + Send + Sync + Debug + Clone,
{
    /// Time between dispatching the request and having the full response in hand.
    fn elapsed(&self) -> Duration;
}

/// One successful request as seen by [`crate::fetch::TimedFetcher`].
#[metric]
pub struct Sample {
    #[elapsed]
    pub elapsed: Duration,
    /// HTTP status code of the response.
    pub status: u16,
    /// Size of the fully read response body.
    pub bytes: usize,
}

impl Sample {
    pub fn new(elapsed: Duration, status: u16, bytes: usize) -> Self {
        Self {
            elapsed,
            status,
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_reads_marked_field() {
        let sample = Sample::new(Duration::from_millis(42), 200, 7);
        assert_eq!(sample.elapsed(), Duration::from_millis(42));
    }

    #[test]
    fn tuple_metric_uses_positional_field() {
        #[metric]
        struct Bare(u8, #[elapsed] Duration);

        let bare = Bare(1, Duration::from_secs(2));
        assert_eq!(bare.elapsed(), Duration::from_secs(2));
    }
}
