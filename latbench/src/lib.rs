//! Latbench: sequential latency measurement for HTTP endpoints.
//!
//! Latbench sends the same GET request to an endpoint over and over, one at a time,
//! times every request and prints the sample count, mean and standard deviation.
//! It answers "how long does this endpoint take to serve one request on its own",
//! not "how does it behave under load": there is never more than one request in
//! flight.
//!
//! # Architecture
//!
//! - [`Scenario`]: the ordered targets to measure and the fetcher to measure them with.
//! - [`Executor`]: runs a scenario. [`SequentialExecutor`] makes a fixed number of
//!   attempts per target, strictly one after another, and isolates failed attempts.
//! - [`fetch::TimedFetcher`]: times a single request made through a
//!   [`fetch::Transport`] (a shared `reqwest` client in production).
//! - [`Metric`]: one successful attempt. [`metric::Sample`] is the built-in one.
//! - [`Aggregate`]: collects the metrics of one target.
//!   [`aggregate::DurationSeries`] keeps them in order.
//! - [`Report`]: derives final numbers from an aggregate. [`report::Summary`] holds
//!   count, mean and population standard deviation.
//! - [`Reporter`]: writes reports somewhere (stdout as text or JSON).
//!
//! # Example
//!
//! ```rust, no_run
//! use latbench::{bench, config::BenchConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BenchConfig::builder()
//!     .targets(vec!["http://localhost:3000/".into()])
//!     .repetitions(100)
//!     .build();
//! for summary in bench::run(&config).await? {
//!     assert_eq!(summary.attempts, 100);
//! }
//! # Ok(())
//! # }
//! ```

/// Metric aggregators
pub mod aggregate;
/// Top-level run over HTTP
pub mod bench;
/// Compiled-in defaults and command-line overrides
pub mod config;
/// Failure types
pub mod error;
/// Orchestrators that define how attempts are scheduled
pub mod executor;
/// Timing a single request
pub mod fetch;
/// Single metrics
pub mod metric;
/// Progress sinks
pub mod progress;
/// Reports and Reporters
pub mod report;
/// Scenario definition
pub mod scenario;
/// Mean and standard deviation
pub mod stats;
/// Endpoints to measure
pub mod target;

pub use aggregate::Aggregate;
pub use executor::{Executor, SequentialExecutor};
pub use metric::Metric;
pub use report::{Report, Reporter};
pub use scenario::Scenario;

/// Procedural macros to reduce boilerplate
pub mod macros {
    pub use latbench_macros::*;
}
