/// Convenience result type used across the slideshow core.
pub type SlideShowResult<T> = Result<T, SlideShowError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Missing metadata, out-of-order layers and unsupported transitions are logged and degraded
/// rather than returned; only the conditions below reach callers.
#[derive(thiserror::Error, Debug)]
pub enum SlideShowError {
    /// Invalid caller-provided or presentation data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed backend layer message or payload.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Errors while building or running an animation.
    #[error("animation error: {0}")]
    Animation(String),

    /// A caller broke an API precondition; the operation was stopped.
    #[error("contract violation: {0}")]
    Contract(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideShowError {
    /// Build a [`SlideShowError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlideShowError::Protocol`] value.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Build a [`SlideShowError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`SlideShowError::Contract`] value.
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::Contract(msg.into())
    }

    /// Build a [`SlideShowError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SlideShowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
