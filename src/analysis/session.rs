//! Explicit session state threaded through the pipeline: one current record,
//! at most one analysis in flight.

use crate::error::{PipelineError, PipelineResult};

use super::gateway::RemoteClient;
use super::normalize;
use super::types::{AnalysisRequest, AnalysisResult};

/// Per-session state. The busy flag is what callers consult before
/// submitting; the current record is replaced wholesale by each analysis.
pub struct Session {
    client: RemoteClient,
    current: Option<AnalysisResult>,
    busy: bool,
}

impl Session {
    pub fn new(client: RemoteClient) -> Self {
        Self {
            client,
            current: None,
            busy: false,
        }
    }

    /// Whether an analysis is currently in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The record from the most recent successful analysis
    pub fn current(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }

    /// Run one analysis end to end: validate, call the gateway (which cannot
    /// fail), normalize, and store the canonical record. On a normalization
    /// error the session holds no result rather than a corrupted one.
    pub fn run(&mut self, request: AnalysisRequest) -> PipelineResult<AnalysisResult> {
        if self.busy {
            return Err(PipelineError::Busy);
        }
        validate(&request)?;

        // A new submission discards the previous record
        self.current = None;

        self.busy = true;
        let raw = self.client.analyze(&request);
        self.busy = false;

        let result = normalize::normalize(&raw)?;
        self.current = Some(result.clone());
        Ok(result)
    }
}

/// Reject bad input before any network attempt
fn validate(request: &AnalysisRequest) -> PipelineResult<()> {
    match request {
        AnalysisRequest::Text { text } => {
            if text.trim().is_empty() {
                return Err(PipelineError::InvalidInput("text is required".to_string()));
            }
        }
        AnalysisRequest::Document { bytes, file_name } => {
            if bytes.is_empty() {
                return Err(PipelineError::InvalidInput("document is empty".to_string()));
            }
            if !file_name.to_ascii_lowercase().ends_with(".pdf") {
                return Err(PipelineError::InvalidInput(format!(
                    "unsupported file type: {}",
                    file_name
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::gateway::GatewayConfig;
    use super::*;

    fn offline_session() -> Session {
        // Discard port: the remote call fails immediately and the gateway
        // degrades to the fallback generator
        Session::new(RemoteClient::new(GatewayConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..GatewayConfig::default()
        }))
    }

    #[test]
    fn test_empty_text_rejected_before_network() {
        let mut session = offline_session();
        let err = session
            .run(AnalysisRequest::Text { text: "   ".to_string() })
            .unwrap_err();
        assert_eq!(err.kind(), "INVALID_INPUT");
        assert!(session.current().is_none());
    }

    #[test]
    fn test_non_pdf_document_rejected() {
        let mut session = offline_session();
        let err = session
            .run(AnalysisRequest::Document {
                bytes: vec![1],
                file_name: "notes.txt".to_string(),
            })
            .unwrap_err();
        assert_eq!(err.kind(), "INVALID_INPUT");
    }

    #[test]
    fn test_offline_run_yields_demo_result() {
        let mut session = offline_session();
        let result = session
            .run(AnalysisRequest::Text {
                text: "Surely goodness and mercy shall follow me.".to_string(),
            })
            .unwrap();
        assert!(result.demo_mode);
        assert_eq!(result.word_count, 7);
        assert_eq!(session.current(), Some(&result));
        assert!(!session.is_busy());
    }

    #[test]
    fn test_new_analysis_replaces_previous_record() {
        let mut session = offline_session();
        let first = session
            .run(AnalysisRequest::Text { text: "First passage here.".to_string() })
            .unwrap();
        let second = session
            .run(AnalysisRequest::Text { text: "Second passage here.".to_string() })
            .unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(session.current().map(|r| r.id.as_str()), Some(second.id.as_str()));
    }
}
