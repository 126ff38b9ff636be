use crate::{
    Executor, Reporter,
    aggregate::DurationSeries,
    config::{BenchConfig, LABEL_WIDTH, OutputFormat},
    error::SetupError,
    executor::SequentialExecutor,
    fetch::{HttpTransport, TimedFetcher, Transport},
    progress::BarProgress,
    report::{JsonReporter, StdoutReporter, Summary},
    scenario::Scenario,
    target::Target,
};

/// Run the benchmark described by `config` over HTTP and print one summary per
/// target.
///
/// The HTTP client lives for exactly the duration of this call and is shared by all
/// attempts. Only setup problems are returned as errors; failed attempts are part
/// of a normal run, and so is a summary that could not be written.
pub async fn run(config: &BenchConfig) -> Result<Vec<Summary>, SetupError> {
    let targets = config.targets()?;
    let transport = HttpTransport::new(config.timeout)?;
    tracing::info!(
        targets = targets.len(),
        repetitions = config.repetitions,
        timeout = ?config.timeout,
        "Starting benchmark"
    );

    let summaries = measure(config, targets, transport).await;
    match config.format {
        OutputFormat::Text => publish(&StdoutReporter, &summaries).await,
        OutputFormat::Json => publish(&JsonReporter, &summaries).await,
    };
    Ok(summaries)
}

/// Hand every summary to `reporter`. A failed write is logged and skipped; returns
/// how many summaries could not be reported.
pub async fn publish<R>(reporter: &R, summaries: &[Summary]) -> usize
where
    R: Reporter<DurationSeries, Summary>,
{
    let mut failed = 0;
    for summary in summaries {
        if let Err(e) = reporter.report(summary).await {
            failed += 1;
            tracing::error!(url = %summary.target, "Failed to report summary: {e}");
        }
    }
    failed
}

/// Measure already validated targets with any transport.
pub async fn measure<T: Transport>(
    config: &BenchConfig,
    targets: Vec<Target>,
    transport: T,
) -> Vec<Summary> {
    let scenario = Scenario::<DurationSeries, T>::builder()
        .name("latency")
        .targets(targets)
        .fetcher(TimedFetcher::new(transport))
        .build();

    let executor = if config.progress {
        SequentialExecutor::builder()
            .repetitions(config.repetitions)
            .progress(Box::new(BarProgress::new(LABEL_WIDTH)))
            .build()
    } else {
        SequentialExecutor::builder()
            .repetitions(config.repetitions)
            .build()
    };

    let Ok(runs) = executor.exec(&scenario).await;
    runs.into_iter().map(Summary::from).collect()
}
