/// Crate-wide result alias.
pub type ChoreoResult<T> = Result<T, ChoreoError>;

/// Error type shared by scheduling, choreography, and playback.
#[derive(thiserror::Error, Debug)]
pub enum ChoreoError {
    /// Invalid configuration or input values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Timeline construction failed (anchor resolution, label lookup).
    #[error("schedule error: {0}")]
    Schedule(String),

    /// Sampling or playback failed.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error source.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChoreoError {
    /// Build a [`ChoreoError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ChoreoError::Schedule`].
    pub fn schedule(msg: impl Into<String>) -> Self {
        Self::Schedule(msg.into())
    }

    /// Build a [`ChoreoError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ChoreoError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ChoreoError {
    fn from(value: serde_json::Error) -> Self {
        Self::serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
