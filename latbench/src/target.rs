use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::SetupError;

/// One endpoint to benchmark: the full URL, query parameters included.
///
/// Targets are validated once at setup and never change during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
}

impl Target {
    /// Parse and validate a target. Only `http` and `https` URLs with a host are
    /// accepted; name resolution is left to the first attempt.
    pub fn parse(raw: &str) -> Result<Self, SetupError> {
        let url = Url::parse(raw).map_err(|source| SetupError::InvalidTarget {
            raw: raw.to_string(),
            source,
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(SetupError::UnsupportedScheme {
                    raw: raw.to_string(),
                    scheme: other.to_string(),
                });
            }
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(SetupError::MissingHost(raw.to_string()));
        }

        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The first `width` characters of the URL, for fixed-width output.
    pub fn label(&self, width: usize) -> String {
        self.url.as_str().chars().take(width).collect()
    }
}

impl FromStr for Target {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_query_parameters() {
        let target = Target::parse("http://127.0.0.1:9000/tracking?ori=a&path=/b").unwrap();
        assert_eq!(target.url().query(), Some("ori=a&path=/b"));
        assert_eq!(target.to_string(), "http://127.0.0.1:9000/tracking?ori=a&path=/b");
    }

    #[test]
    fn label_truncates() {
        let target: Target = "http://127.0.0.1:9000/tracking".parse().unwrap();
        assert_eq!(target.label(15), "http://127.0.0.");
        assert_eq!(target.label(100), target.to_string());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            Target::parse("not a url"),
            Err(SetupError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn rejects_other_schemes() {
        match Target::parse("ftp://example.com/file") {
            Err(SetupError::UnsupportedScheme { scheme, .. }) => assert_eq!(scheme, "ftp"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
