/// Convenience result type used across foldbox.
pub type FoldResult<T> = Result<T, FoldError>;

/// Error taxonomy for box construction, animation and configuration.
#[derive(thiserror::Error, Debug)]
pub enum FoldError {
    /// A box dimension failed validation; the previous build stays in effect.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An animation or frame-rate description is unusable.
    #[error("animation error: {0}")]
    Animation(String),

    /// JSON could not be read or written.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error, usually IO with path context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FoldError {
    /// Build a [`FoldError::InvalidParameter`] value.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build a [`FoldError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`FoldError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True when the error came from dimension validation.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }
}

impl From<serde_json::Error> for FoldError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            FoldError::invalid_parameter("x")
                .to_string()
                .contains("invalid parameter:")
        );
        assert!(
            FoldError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            FoldError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = FoldError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn json_errors_map_to_serde() {
        let err: FoldError = serde_json::from_str::<f64>("{").unwrap_err().into();
        assert!(matches!(err, FoldError::Serde(_)));
        assert!(!err.is_invalid_parameter());
    }
}
