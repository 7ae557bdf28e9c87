use crate::validate::ValidationState;

/// Error types for the visualizer service.
/// Field validation never lands here; it is reported through `ValidationState`.
#[derive(Debug, thiserror::Error)]
pub enum VizError {
    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("pricing service error: {status} {message}")]
    PricingService { status: u16, message: String },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("invalid input")]
    InvalidInput(ValidationState),

    #[error("a pricing request is already in flight")]
    Busy,

    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for VizError {
    fn from(e: reqwest::Error) -> Self {
        VizError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for VizError {
    fn from(e: serde_json::Error) -> Self {
        VizError::Parse(e.to_string())
    }
}

pub type VizResult<T> = Result<T, VizError>;
