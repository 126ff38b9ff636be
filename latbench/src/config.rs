use std::time::Duration;

use clap::{Parser, ValueEnum};
use typed_builder::TypedBuilder;

use crate::error::SetupError;
use crate::target::Target;

/// Endpoint measured when no `--target` is given.
pub const DEFAULT_TARGET: &str =
    "http://127.0.0.1:9000/tracking?ori=http://google.it&ref=https://twitch.tv/johndisandonato&path=/prova";
/// Attempts per target.
pub const DEFAULT_REPETITIONS: usize = 1999;
/// Total time allowed for one request, body included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
/// How many characters of a target are shown in summaries and progress bars.
pub const LABEL_WIDTH: usize = 15;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One aligned line per target
    #[default]
    Text,
    /// One JSON object per target
    Json,
}

/// Everything a run needs. All fields have compiled-in defaults.
#[derive(Debug, Clone, TypedBuilder)]
pub struct BenchConfig {
    #[builder(default = vec![DEFAULT_TARGET.to_string()])]
    pub targets: Vec<String>,
    #[builder(default = DEFAULT_REPETITIONS)]
    pub repetitions: usize,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    #[builder(default = true)]
    pub progress: bool,
    #[builder(default)]
    pub format: OutputFormat,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl BenchConfig {
    /// Validate every configured target. Any bad target, or none at all, stops the
    /// run before it starts.
    pub fn targets(&self) -> Result<Vec<Target>, SetupError> {
        if self.targets.is_empty() {
            return Err(SetupError::NoTargets);
        }
        self.targets.iter().map(|raw| Target::parse(raw)).collect()
    }
}

/// Time repeated GET requests against HTTP endpoints and print mean and standard
/// deviation per endpoint.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Endpoint to measure; repeat to measure several, one after another
    #[arg(long = "target", value_name = "URL")]
    pub targets: Vec<String>,

    /// Attempts per target
    #[arg(short = 'n', long, default_value_t = DEFAULT_REPETITIONS)]
    pub repetitions: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Do not draw progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Summary output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl From<Args> for BenchConfig {
    fn from(args: Args) -> Self {
        let targets = if args.targets.is_empty() {
            vec![DEFAULT_TARGET.to_string()]
        } else {
            args.targets
        };
        BenchConfig::builder()
            .targets(targets)
            .repetitions(args.repetitions)
            .timeout(Duration::from_secs(args.timeout_secs))
            .progress(!args.no_progress)
            .format(args.format)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_defaults() {
        let config = BenchConfig::from(Args::try_parse_from(["latbench"]).unwrap());

        assert_eq!(config.targets, vec![DEFAULT_TARGET.to_string()]);
        assert_eq!(config.repetitions, DEFAULT_REPETITIONS);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.progress);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "latbench",
            "--target",
            "http://localhost:3000/a",
            "--target",
            "http://localhost:3000/b",
            "-n",
            "10",
            "--timeout-secs",
            "2",
            "--no-progress",
            "--format",
            "json",
        ])
        .unwrap();
        let config = BenchConfig::from(args);

        assert_eq!(config.targets.len(), 2);
        assert_eq!(config.repetitions, 10);
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert!(!config.progress);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn default_target_is_valid() {
        let targets = BenchConfig::default().targets().unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].label(LABEL_WIDTH), "http://127.0.0.");
    }

    #[test]
    fn empty_target_list_is_a_setup_error() {
        let config = BenchConfig::builder().targets(vec![]).build();
        assert!(matches!(config.targets(), Err(SetupError::NoTargets)));
    }

    #[test]
    fn one_bad_target_fails_setup() {
        let config = BenchConfig::builder()
            .targets(vec!["http://localhost/".into(), "nope".into()])
            .build();
        assert!(config.targets().is_err());
    }
}
