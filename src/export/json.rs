//! Lossless structural export of the canonical record.

use crate::analysis::types::AnalysisResult;
use crate::error::{PipelineError, PipelineResult};

/// Encode the record as pretty-printed JSON. Round-trips exactly through
/// `decode`.
pub fn encode(result: &AnalysisResult) -> PipelineResult<String> {
    serde_json::to_string_pretty(result).map_err(|e| PipelineError::Export(e.to_string()))
}

/// Decode a snapshot produced by `encode`
pub fn decode(data: &str) -> PipelineResult<AnalysisResult> {
    serde_json::from_str(data).map_err(|e| PipelineError::Export(e.to_string()))
}
