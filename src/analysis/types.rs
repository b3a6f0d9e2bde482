use serde::{Deserialize, Serialize};

/// Sentiment category shared by all three models
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Parse a label leniently ("Positive", "POSITIVE" and "positive" all match)
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full probability distribution over the three categories
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Probabilities {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Neural network model opinion
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MlPrediction {
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub probabilities: Probabilities,
}

/// Lexicon-based model opinion. The compound score is independent of the
/// positive/negative/neutral distribution and may be negative.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VaderAnalysis {
    pub sentiment: Sentiment,
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Pattern-based model opinion
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TextBlobAnalysis {
    pub sentiment: Sentiment,
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Canonical analysis record, immutable once produced. Every downstream
/// consumer (consensus, exports) reads this shape and nothing else.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: String,
    pub input_text: String,
    pub cleaned_text: String,
    pub word_count: u64,
    pub char_count: u64,
    pub ml_prediction: MlPrediction,
    pub vader_analysis: VaderAnalysis,
    pub textblob_analysis: TextBlobAnalysis,
    /// True exactly when the result came from the local fallback generator
    #[serde(default)]
    pub demo_mode: bool,
    /// Display name of the uploaded document, when the analysis came from one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl AnalysisResult {
    /// Average word length; None when the record has no words
    pub fn avg_word_length(&self) -> Option<f64> {
        if self.word_count == 0 {
            None
        } else {
            Some(self.char_count as f64 / self.word_count as f64)
        }
    }
}

/// One submitted analysis: raw text, or an uploaded document with its
/// declared display name
#[derive(Clone, Debug)]
pub enum AnalysisRequest {
    Text { text: String },
    Document { bytes: Vec<u8>, file_name: String },
}

/// Fixture record shared by tests across the crate
#[cfg(test)]
pub(crate) fn sample_result() -> AnalysisResult {
    AnalysisResult {
        id: "test-id".to_string(),
        input_text: "The Lord is my shepherd; I shall not want.".to_string(),
        cleaned_text: "lord shepherd shall want".to_string(),
        word_count: 37,
        char_count: 189,
        ml_prediction: MlPrediction {
            sentiment: Sentiment::Positive,
            confidence: 0.92,
            probabilities: Probabilities {
                positive: 0.92,
                negative: 0.03,
                neutral: 0.05,
            },
        },
        vader_analysis: VaderAnalysis {
            sentiment: Sentiment::Positive,
            compound: 0.7845,
            positive: 0.312,
            negative: 0.0,
            neutral: 0.688,
        },
        textblob_analysis: TextBlobAnalysis {
            sentiment: Sentiment::Negative,
            polarity: 0.15,
            subjectivity: 0.35,
        },
        demo_mode: false,
        file_name: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Sentiment::parse("Positive"), Some(Sentiment::Positive));
        assert_eq!(Sentiment::parse("NEGATIVE"), Some(Sentiment::Negative));
        assert_eq!(Sentiment::parse("neutral"), Some(Sentiment::Neutral));
        assert_eq!(Sentiment::parse("ambivalent"), None);
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&Sentiment::Positive).unwrap();
        assert_eq!(json, "\"positive\"");
    }

    #[test]
    fn test_avg_word_length_guards_zero() {
        let mut result = sample_result();
        assert_eq!(result.avg_word_length(), Some(189.0 / 37.0));
        result.word_count = 0;
        assert!(result.avg_word_length().is_none());
    }
}
