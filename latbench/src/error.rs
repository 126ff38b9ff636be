use thiserror::Error;

/// Why a single attempt produced no sample.
///
/// Every transport-level problem ends up here, timeouts included. The executor
/// catches it, reports it and moves on to the next attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("could not connect: {0}")]
    Connect(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Failures that stop a run before the first request goes out.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid target `{raw}`: {source}")]
    InvalidTarget {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported scheme `{scheme}` in target `{raw}`, expected http or https")]
    UnsupportedScheme { raw: String, scheme: String },
    #[error("target `{0}` has no host")]
    MissingHost(String),
    #[error("no targets configured")]
    NoTargets,
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
