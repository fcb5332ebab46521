use thiserror::Error;

pub type EphemerisResult<T> = Result<T, EphemerisError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    /// A non-finite value reached an angle normalisation.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Invalid observer: {message}")]
    InvalidObserver { message: String },
}

impl EphemerisError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_observer(message: impl Into<String>) -> Self {
        Self::InvalidObserver {
            message: message.into(),
        }
    }
}
