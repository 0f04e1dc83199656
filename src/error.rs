#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("{0} needs a rendered fetch but browser support is not compiled in")]
    BrowserUnavailable(String),

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown site `{0}`")]
    UnknownSite(String),
}

impl ScrapeError {
    /// Fetch failures, as opposed to problems with the site configuration.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            ScrapeError::Request(_)
                | ScrapeError::Status { .. }
                | ScrapeError::Browser(_)
                | ScrapeError::BrowserUnavailable(_)
                | ScrapeError::Task(_)
        )
    }
}
