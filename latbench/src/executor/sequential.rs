//! The `SequentialExecutor`: one attempt at a time, one target at a time.
//!
//! # Flow
//! 1. Targets are visited in scenario order.
//! 2. For each target, exactly `repetitions` attempts are made. Each attempt is awaited
//!    to completion before the next one is dispatched, so a measurement never competes
//!    with another in-flight request from this process.
//! 3. A successful attempt's `Sample` is consumed into the target's aggregate. A failed
//!    attempt is logged, announced with a one-line notice and dropped; it contributes
//!    nothing to the aggregate and is never retried.
//! 4. After every attempt, successful or not, the progress sink (if any) advances by one.
//!
//! Failures are counted, never propagated: a run where every attempt fails still
//! yields one (empty) `TargetRun` per target.
use std::convert::Infallible;

use typed_builder::TypedBuilder;

use super::{Executor, TargetRun};
use crate::{
    aggregate::Aggregate,
    config::DEFAULT_REPETITIONS,
    fetch::{TimedFetcher, Transport},
    metric::Sample,
    progress::ProgressSink,
    scenario::Scenario,
    target::Target,
};

/// Executor that measures single-request latency by never overlapping attempts.
#[derive(TypedBuilder)]
pub struct SequentialExecutor {
    /// Attempts per target.
    #[builder(default = DEFAULT_REPETITIONS)]
    pub repetitions: usize,
    /// Optional progress reporting; correctness does not depend on it.
    #[builder(default, setter(strip_option))]
    pub progress: Option<Box<dyn ProgressSink>>,
}

impl SequentialExecutor {
    async fn run_target<A, T>(&self, fetcher: &TimedFetcher<T>, target: &Target) -> TargetRun<A>
    where
        A: Aggregate<Metric = Sample>,
        T: Transport,
    {
        tracing::info!("Benchmarking {target} ({} attempts)", self.repetitions);
        if let Some(progress) = &self.progress {
            progress.begin(target, self.repetitions as u64);
        }

        let mut aggregate = A::new();
        let mut failures = 0;
        for attempt in 0..self.repetitions {
            match fetcher.fetch(target).await {
                Ok(sample) => {
                    tracing::debug!(attempt, elapsed = ?sample.elapsed, status = sample.status);
                    aggregate.consume(&sample);
                }
                Err(e) => {
                    failures += 1;
                    tracing::warn!(url = %target, attempt, error = %e, "Attempt failed");
                    self.notice(&format!("Couldn't connect: {target} ({e})"));
                }
            }
            if let Some(progress) = &self.progress {
                progress.advance();
            }
        }

        if let Some(progress) = &self.progress {
            progress.finish();
        }
        tracing::info!(
            "Finished {target}: {} ok, {failures} failed",
            self.repetitions - failures
        );

        TargetRun {
            target: target.clone(),
            aggregate,
            attempts: self.repetitions,
            failures,
        }
    }

    fn notice(&self, line: &str) {
        match &self.progress {
            Some(progress) => progress.notice(line),
            None => println!("{line}"),
        }
    }
}

impl<A, T> Executor<A, T> for SequentialExecutor
where
    A: Aggregate<Metric = Sample> + 'static,
    T: Transport,
{
    type Error = Infallible;

    async fn exec(&self, scenario: &Scenario<A, T>) -> Result<Vec<TargetRun<A>>, Self::Error> {
        tracing::info!("Running scenario: {}!", scenario.name);

        let mut runs = Vec::with_capacity(scenario.targets.len());
        for target in &scenario.targets {
            runs.push(self.run_target(&scenario.fetcher, target).await);
        }

        tracing::info!("Done running scenario: {}!", scenario.name);
        Ok(runs)
    }
}
