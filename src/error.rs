use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("data unavailable for {instrument}: {reason}")]
    DataUnavailable { instrument: String, reason: String },

    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

impl EngineError {
    pub fn data_unavailable(instrument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            instrument: instrument.into(),
            reason: reason.into(),
        }
    }

    /// `true` when the failed cycle should simply be retried on the next eligible tick.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
