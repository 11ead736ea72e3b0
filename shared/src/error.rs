use thiserror::Error;

/// Terminal failure of one analysis submission. `Display` is the message
/// shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Connection Error: Backend not reachable.")]
    TransportUnreachable,
    #[error("The analysis did not finish within {secs} seconds. Please try again.")]
    TimedOut { secs: u32 },
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Analysis failed: the server returned an unreadable response.")]
    MalformedResponse,
    #[error("Floor plan is larger than the {} MB upload limit.", .limit_bytes / (1024 * 1024))]
    UploadTooLarge { limit_bytes: u64 },
    #[error("Analysis failed: the floor plan could not be prepared for upload.")]
    RequestEncoding,
}

impl AnalysisError {
    pub fn server_fallback(status: u16) -> Self {
        AnalysisError::Server {
            status,
            message: format!("Analysis failed (HTTP {})", status),
        }
    }
}

/// Failure below the HTTP layer, as reported by a transport. The detail is
/// for logs only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    #[error("request could not be delivered: {0}")]
    Unreachable(String),
    #[error("request timed out after {secs}s")]
    TimedOut { secs: u32 },
    /// The request body could not be built; nothing was sent.
    #[error("request could not be built: {0}")]
    Encoding(String),
}

impl From<TransportFailure> for AnalysisError {
    fn from(failure: TransportFailure) -> Self {
        log::warn!("Analysis transport failure: {}", failure);
        match failure {
            TransportFailure::Unreachable(_) => AnalysisError::TransportUnreachable,
            TransportFailure::TimedOut { secs } => AnalysisError::TimedOut { secs },
            TransportFailure::Encoding(_) => AnalysisError::RequestEncoding,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API base URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },
    #[error("Unknown locale code: {0}")]
    UnknownLocale(String),
    #[error("Invalid request timeout '{0}'")]
    InvalidTimeout(String),
    #[error("Locale table is missing an entry for '{0}'")]
    MissingLocale(String),
    #[error("Locale table could not be parsed: {0}")]
    LocaleParse(#[from] serde_yaml::Error),
}
