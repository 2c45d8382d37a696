use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// The logo (or another fetched asset) answered with a non-success status.
    #[error("resource {location} could not be fetched (HTTP {status})")]
    ResourceFetch { location: String, status: u16 },

    /// The request never produced a response, or the body could not be read.
    #[error("resource {location} is unavailable: {message}")]
    ResourceUnavailable { location: String, message: String },

    #[error("document export failed: {0}")]
    Export(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid report input: {0}")]
    InvalidInput(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Errors raised by the asset loader; callers degrade instead of failing.
    pub fn is_resource_failure(&self) -> bool {
        matches!(
            self,
            ReportError::ResourceFetch { .. } | ReportError::ResourceUnavailable { .. }
        )
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(value: serde_json::Error) -> Self {
        ReportError::InvalidInput(value.to_string())
    }
}
