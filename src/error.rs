use thiserror::Error;

/// Errors produced while building, fetching, or rendering an issue list.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing configuration value.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The template source does not compile.
    #[error("Invalid template: {0}")]
    Template(#[source] minijinja::Error),

    /// The template compiled but failed while executing.
    #[error("Failed to render issues: {0}")]
    Render(#[source] minijinja::Error),

    /// Credentials are missing or rejected by the provider.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Network or HTTP client failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("GitHub API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Provider is throttling requests.
    #[error("GitHub rate limit exceeded{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<u64> },

    /// A search result record is missing a required field or has the wrong shape.
    #[error("Malformed issue record at position {index}: {message}")]
    MalformedRecord { index: usize, message: String },

    /// A search response body does not have the expected shape.
    #[error("Malformed search response: {message}")]
    MalformedResponse { message: String },

    /// Organization and repository cannot be derived from the issue API URL.
    #[error("Cannot derive organization/repository from issue URL '{url}'")]
    MalformedIssueUrl { url: String },
}

/// Coarse failure category, for callers deciding whether to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Authentication,
    Transport,
    RateLimit,
    MalformedRecord,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration { .. } | Error::Template(_) | Error::Render(_) => {
                ErrorKind::Configuration
            }
            Error::Authentication { .. } => ErrorKind::Authentication,
            Error::Network(_) | Error::Api { .. } => ErrorKind::Transport,
            Error::RateLimited { .. } => ErrorKind::RateLimit,
            Error::MalformedRecord { .. }
            | Error::MalformedResponse { .. }
            | Error::MalformedIssueUrl { .. } => ErrorKind::MalformedRecord,
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(seconds) => format!(", retry after {seconds}s"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
