use thiserror::Error;

use crate::config::Config;

/// A form field that failed validation. Carries the rejected raw value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unrecognized color {0:?}")]
    InvalidColor(String),
    #[error("unrecognized hardware {0:?}")]
    InvalidHardware(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Network(String),
    #[error("failed to read response body: {0}")]
    Body(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl SubmitError {
    /// Text shown to the customer. Only validation failures are specific;
    /// everything else gets the generic retry message.
    pub fn user_message(&self, config: &Config) -> &'static str {
        match self {
            SubmitError::Validation(ValidationError::InvalidColor(_)) => config.messages.invalid_color,
            SubmitError::Validation(ValidationError::InvalidHardware(_)) => config.messages.invalid_hardware,
            SubmitError::Transport(_) | SubmitError::Clipboard(_) => config.messages.submit_failed,
        }
    }
}
