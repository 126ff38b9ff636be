use std::marker::PhantomData;

use typed_builder::TypedBuilder;

use crate::{
    aggregate::Aggregate,
    fetch::{TimedFetcher, Transport},
    target::Target,
};

/// What to measure: a named, ordered list of targets and the fetcher that times
/// requests against them.
///
/// A scenario says nothing about how often or in which order attempts happen; that
/// is the [`crate::Executor`]'s job. The fetcher (and with it the transport) is
/// shared by every attempt on every target.
#[derive(TypedBuilder)]
pub struct Scenario<A, T>
where
    A: Aggregate,
    T: Transport,
{
    #[builder(setter(into))]
    pub name: String,
    /// Processed strictly in this order.
    pub targets: Vec<Target>,
    pub fetcher: TimedFetcher<T>,
    #[builder(default, setter(skip))]
    aggregate: PhantomData<A>,
}
