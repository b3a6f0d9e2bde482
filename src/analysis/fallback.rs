//! Local fallback generator used when the remote analysis service is
//! unreachable. Produces an object in the remote service's wire shape so the
//! normalizer runs on both paths.

use serde_json::{Value, json};

use super::types::AnalysisRequest;

/// Canned passage substituted for document uploads; no text extraction
/// happens locally, so the document path echoes fixed statistics too.
const DOCUMENT_TEXT: &str = "For God so loved the world that he gave his one and only Son, \
that whoever believes in him shall not perish but have eternal life. For God did not send \
his Son into the world to condemn the world, but to save the world through him.";

const DOCUMENT_CLEANED: &str = "god loved world gave one son whoever believes shall perish \
eternal life god send son world condemn world save world";

/// Generate a result-shaped object for a request the backend never saw
pub fn generate(request: &AnalysisRequest) -> Value {
    match request {
        AnalysisRequest::Text { text } => text_result(text),
        AnalysisRequest::Document { file_name, .. } => document_result(file_name),
    }
}

/// Deterministic text cleaning: lowercase, strip everything that is not
/// alphanumeric or whitespace, then drop tokens of length <= 3
pub fn clean_text(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped
        .split_whitespace()
        .filter(|token| token.chars().count() > 3)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whitespace-delimited token count
pub fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

fn text_result(text: &str) -> Value {
    let words = word_count(text);
    let chars = text.chars().count() as u64;

    let mut result = json!({
        "input_text": text,
        "cleaned_text": clean_text(text),
        "word_count": words,
        "char_count": chars,
        "ml_prediction": {
            "sentiment": "Positive",
            "confidence": 0.92,
            "probabilities": {
                "Positive": 0.92,
                "Negative": 0.03,
                "Neutral": 0.05
            }
        },
        "vader_analysis": {
            "sentiment": "Positive",
            "scores": {
                "compound": 0.7845,
                "pos": 0.312,
                "neu": 0.688,
                "neg": 0.0
            }
        },
        "textblob_analysis": {
            "sentiment": "Positive",
            "polarity": 0.15,
            "subjectivity": 0.35
        },
        "demo_mode": true
    });
    // Derived metric is omitted entirely rather than emitted as a non-finite value
    if words > 0 {
        result["avg_word_length"] = json!(chars as f64 / words as f64);
    }
    result
}

fn document_result(file_name: &str) -> Value {
    json!({
        "input_text": DOCUMENT_TEXT,
        "cleaned_text": DOCUMENT_CLEANED,
        "word_count": 47,
        "char_count": 234,
        "avg_word_length": 4.5,
        "ml_prediction": {
            "sentiment": "Positive",
            "confidence": 0.89,
            "probabilities": {
                "Positive": 0.89,
                "Negative": 0.04,
                "Neutral": 0.07
            }
        },
        "vader_analysis": {
            "sentiment": "Positive",
            "scores": {
                "compound": 0.8316,
                "pos": 0.285,
                "neu": 0.715,
                "neg": 0.0
            }
        },
        "textblob_analysis": {
            "sentiment": "Positive",
            "polarity": 0.22,
            "subjectivity": 0.28
        },
        "demo_mode": true,
        "file_name": file_name
    })
}
