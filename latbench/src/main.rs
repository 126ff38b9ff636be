use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use latbench::{
    bench,
    config::{Args, BenchConfig},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // stdout is reserved for notices and summaries
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();

    let config = BenchConfig::from(Args::parse());
    match bench::run(&config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Benchmark could not start: {e}");
            eprintln!("latbench: {e}");
            ExitCode::FAILURE
        }
    }
}
