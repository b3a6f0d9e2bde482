use thiserror::Error;

/// Pipeline error taxonomy.
///
/// Transport failures have no variant here on purpose: the gateway converts
/// every remote failure into a fallback result instead of an error.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input rejected before any network attempt
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An analysis is already in flight for this session
    #[error("analysis already in progress")]
    Busy,

    /// Upstream object could not be mapped onto the canonical record
    #[error("normalization failed: {0}")]
    Normalize(String),

    /// One export artifact could not be produced
    #[error("export failed: {0}")]
    Export(String),
}

impl PipelineError {
    /// Short machine-readable code for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidInput(_) => "INVALID_INPUT",
            PipelineError::Busy => "BUSY",
            PipelineError::Normalize(_) => "NORMALIZATION_FAILED",
            PipelineError::Export(_) => "EXPORT_FAILED",
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        assert_eq!(PipelineError::InvalidInput("x".into()).kind(), "INVALID_INPUT");
        assert_eq!(PipelineError::Busy.kind(), "BUSY");
        assert_eq!(PipelineError::Normalize("x".into()).kind(), "NORMALIZATION_FAILED");
        assert_eq!(PipelineError::Export("x".into()).kind(), "EXPORT_FAILED");
    }

    #[test]
    fn test_display_includes_detail() {
        let err = PipelineError::Normalize("missing input text".into());
        assert!(err.to_string().contains("missing input text"));
    }
}
