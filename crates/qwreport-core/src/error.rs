use thiserror::Error;

#[derive(Debug, Error)]
pub enum QwReportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Reaction failed: {0}")]
    Reaction(String),
}

impl QwReportError {
    /// Short error code used in structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            QwReportError::Config(_) => "CONFIG_ERROR",
            QwReportError::Reaction(_) => "REACTION_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, QwReportError>;
