use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResultsError>;

/// Run-level failures. Only these abort a run.
#[derive(Debug, Error)]
pub enum ResultsError {
    /// Source dataset missing or not valid structured data.
    #[error("input error ({}): {reason}", .path.display())]
    Input { path: PathBuf, reason: String },

    #[error("output error ({}): {reason}", .path.display())]
    Output { path: PathBuf, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ResultsError {
    pub fn input(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ResultsError::Input {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn output(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ResultsError::Output {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Per-identifier fetch failures. The batch absorbs these into empty records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid identifier {identifier:?}: {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    /// Network-level failure reaching the proxy (connect, timeout, body read).
    #[error("transport error for {url}: {reason}")]
    Transport {
        url: String,
        reason: String,
        timed_out: bool,
    },

    /// The proxy answered but did not deliver a rendered page.
    #[error("upstream error for {url}: status {status}{}", detail(.message))]
    Upstream {
        url: String,
        status: String,
        message: Option<String>,
    },
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" ({m})"))
        .unwrap_or_default()
}

impl FetchError {
    /// Short label used in logs and run reports.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidIdentifier { .. } => "invalid_identifier",
            FetchError::Transport { timed_out: true, .. } => "timeout",
            FetchError::Transport { .. } => "transport",
            FetchError::Upstream { .. } => "upstream",
        }
    }

    pub(crate) fn transport(url: &str, err: &reqwest::Error) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            reason: err.to_string(),
            timed_out: err.is_timeout(),
        }
    }

    pub(crate) fn upstream(url: &str, status: impl ToString, message: Option<String>) -> Self {
        FetchError::Upstream {
            url: url.to_string(),
            status: status.to_string(),
            message,
        }
    }
}
