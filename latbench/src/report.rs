use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::{self, Debug, Display};
use std::future::Future;
use std::io::Write;

use crate::{
    Aggregate, aggregate::DurationSeries, config::LABEL_WIDTH, executor::TargetRun, stats,
};

/// A [`Report`] is the processed form of a [`TargetRun`].
///
/// Reports derive the final numbers (mean, spread, ...) from the raw aggregate. They
/// are plain data: no I/O, deterministic, serializable. Writing them somewhere is the
/// job of a [`Reporter`].
///
/// # Example
/// ```rust, ignore
/// #[derive(Debug, Serialize, Deserialize)]
/// struct CountReport {
///     samples: usize,
/// }
///
/// impl From<TargetRun<DurationSeries>> for CountReport {
///     fn from(run: TargetRun<DurationSeries>) -> Self {
///         Self { samples: run.aggregate.len() }
///     }
/// }
///
/// impl Report<DurationSeries> for CountReport {}
/// ```
pub trait Report<A>
where
    Self: Send + Sync + Debug + From<TargetRun<A>> + Serialize + DeserializeOwned,
    A: Aggregate,
{
}

/// A [`Reporter`] consumes a [`Report`] and performs the side effects, such as printing
/// it.
pub trait Reporter<A: Aggregate, R: Report<A>> {
    fn report(&self, report: &R) -> impl Future<Output = Result<(), Box<dyn std::error::Error>>>;
}

/// Count, mean and population standard deviation of one target's latencies, in
/// seconds.
///
/// With no samples `mean` and `std` are `NaN`. They print as `NaN` and serialize to
/// JSON as `null`, so an empty target never looks like a zero-variance one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub target: String,
    /// Display form of the target, cut to [`LABEL_WIDTH`] characters.
    pub label: String,
    pub samples: usize,
    #[serde(deserialize_with = "nan_from_null")]
    pub mean: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub std: f64,
    pub attempts: usize,
    pub failures: usize,
}

fn nan_from_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl From<TargetRun<DurationSeries>> for Summary {
    fn from(run: TargetRun<DurationSeries>) -> Self {
        let secs = run.aggregate.secs();
        Self {
            target: run.target.to_string(),
            label: run.target.label(LABEL_WIDTH),
            samples: secs.len(),
            mean: stats::mean(&secs),
            std: stats::population_std(&secs),
            attempts: run.attempts,
            failures: run.failures,
        }
    }
}

impl Report<DurationSeries> for Summary {}

impl Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>width$} > mean {} std {} samples {}",
            self.label,
            self.mean,
            self.std,
            self.samples,
            width = LABEL_WIDTH
        )
    }
}

/// Prints one human-readable line per report.
pub struct StdoutReporter;

impl<A, R> Reporter<A, R> for StdoutReporter
where
    A: Aggregate,
    R: Report<A> + Display,
{
    async fn report(&self, report: &R) -> Result<(), Box<dyn std::error::Error>> {
        writeln!(std::io::stdout().lock(), "{report}")?;
        Ok(())
    }
}

/// Prints one JSON object per line.
pub struct JsonReporter;

impl<A, R> Reporter<A, R> for JsonReporter
where
    A: Aggregate,
    R: Report<A>,
{
    async fn report(&self, report: &R) -> Result<(), Box<dyn std::error::Error>> {
        let value = serde_json::to_string(report)?;
        writeln!(std::io::stdout().lock(), "{value}")?;
        Ok(())
    }
}
