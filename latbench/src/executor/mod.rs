//! Executor: drives a `Scenario` and collects one aggregate per target
//!
//! The `Executor` trait is the runtime that executes a `Scenario`. Different
//! executors could schedule attempts differently; latbench ships a single
//! [`SequentialExecutor`] because its numbers are only meaningful when exactly one
//! request is in flight at any time.
pub mod sequential;
pub use sequential::SequentialExecutor;

use crate::{
    aggregate::Aggregate,
    fetch::Transport,
    scenario::Scenario,
    target::Target,
};
use std::future::Future;

/// Everything an executor learned about one target.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetRun<A> {
    pub target: Target,
    /// Metrics of the successful attempts only.
    pub aggregate: A,
    /// Attempts made, successful or not.
    pub attempts: usize,
    /// Attempts that produced no metric.
    pub failures: usize,
}

/// The runtime hook that executes a `Scenario`.
///
/// Implementations return one [`TargetRun`] per scenario target, in the same order
/// as the scenario lists them.
pub trait Executor<A, T>
where
    Self: Send + Sync + Sized,
    A: Aggregate,
    T: Transport,
{
    type Error;

    /// Execute the scenario and return the per-target results.
    fn exec(
        &self,
        scenario: &Scenario<A, T>,
    ) -> impl Future<Output = Result<Vec<TargetRun<A>>, Self::Error>> + Send;
}
