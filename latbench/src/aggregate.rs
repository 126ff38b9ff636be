use std::fmt::Debug;
use std::time::Duration;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::Metric;
use crate::metric::Sample;

/// The `Aggregate` trait defines how [`Metric`] values coming out of successful
/// attempts are collected for one target.
///
/// Aggregates store the raw material; they do **not** compute final statistics such
/// as the mean. Those belong in a [`crate::Report`], which is built from the aggregate
/// once the target is done.
///
/// Only successful attempts ever reach an aggregate: a failed attempt produces no
/// metric, so there is nothing to consume and nothing to skip.
///
/// # Example
/// ```rust
/// use latbench::{Aggregate, Metric, metric::Sample};
///
/// #[derive(Debug, Clone, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
/// struct Count(u64);
///
/// impl Aggregate for Count {
///     type Metric = Sample;
///
///     fn new() -> Self {
///         Count(0)
///     }
///
///     fn consume(&mut self, _: &Self::Metric) {
///         self.0 += 1;
///     }
///
///     fn merge(&mut self, other: Self) {
///         self.0 += other.0;
///     }
/// }
/// ```
pub trait Aggregate
where
    Self: Serialize + DeserializeOwned + PartialOrd + PartialEq + Send + Sync + Debug + Clone,
{
    /// The metric type this aggregate collects.
    type Metric: Metric;

    /// Create a new, empty instance of the aggregate.
    fn new() -> Self;

    /// Consume multiple metrics in order.
    fn aggregate(&mut self, metrics: &[Self::Metric]) {
        metrics.iter().for_each(|m| self.consume(m));
    }

    /// Incorporate a single metric.
    fn consume(&mut self, metric: &Self::Metric);

    /// Fold another aggregate into this one. `other` is treated as having been
    /// collected after `self`.
    fn merge(&mut self, other: Self);
}

/// Append-only, chronologically ordered latencies of one target.
///
/// The series only grows. Its length is the number of successful attempts, so it is
/// at most the configured repetition count.
#[derive(Debug, Clone, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DurationSeries {
    samples: Vec<Duration>,
}

impl DurationSeries {
    pub fn samples(&self) -> &[Duration] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples as fractional seconds, the unit summaries are reported in.
    pub fn secs(&self) -> Vec<f64> {
        self.samples.iter().map(Duration::as_secs_f64).collect()
    }
}

impl Aggregate for DurationSeries {
    type Metric = Sample;

    fn new() -> Self {
        Self::default()
    }

    fn consume(&mut self, metric: &Self::Metric) {
        self.samples.push(metric.elapsed());
    }

    fn merge(&mut self, other: Self) {
        self.samples.extend(other.samples);
    }
}
