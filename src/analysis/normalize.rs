//! Result normalizer: maps heterogeneous upstream objects (remote snake_case
//! with nested scores, or the canonical camelCase shape itself) onto one
//! canonical record. Every result passes through here, fallback included.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{PipelineError, PipelineResult};

use super::fallback::{clean_text, word_count};
use super::types::{
    AnalysisResult, MlPrediction, Probabilities, Sentiment, TextBlobAnalysis, VaderAnalysis,
};

/// Map a raw upstream object onto the canonical record.
///
/// Idempotent: feeding the serialized canonical form back in reproduces the
/// record, id included. A fresh id is assigned only when the upstream object
/// carries none.
pub fn normalize(raw: &Value) -> PipelineResult<AnalysisResult> {
    let obj = raw
        .as_object()
        .ok_or_else(|| err("upstream result is not an object"))?;

    let input_text = get_str(obj, &["input_text", "inputText"])
        .ok_or_else(|| err("missing input text"))?
        .to_string();

    let cleaned_text = get_str(obj, &["cleaned_text", "cleanedText"])
        .map(str::to_string)
        .unwrap_or_else(|| clean_text(&input_text));

    let word_count = get_count(obj, &["word_count", "wordCount"])
        .unwrap_or_else(|| word_count(&input_text));
    let char_count = get_count(obj, &["char_count", "charCount"])
        .unwrap_or_else(|| input_text.chars().count() as u64);

    let id = get_str(obj, &["id"])
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let demo_mode = get(obj, &["demo_mode", "demoMode"])
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let file_name = get_str(obj, &["file_name", "fileName"]).map(str::to_string);

    let ml_prediction = normalize_ml(section(obj, &["ml_prediction", "mlPrediction"])?)?;
    let vader_analysis = normalize_vader(section(obj, &["vader_analysis", "vaderAnalysis"])?)?;
    let textblob_analysis =
        normalize_textblob(section(obj, &["textblob_analysis", "textblobAnalysis"])?)?;

    Ok(AnalysisResult {
        id,
        input_text,
        cleaned_text,
        word_count,
        char_count,
        ml_prediction,
        vader_analysis,
        textblob_analysis,
        demo_mode,
        file_name,
    })
}

fn normalize_ml(obj: &Map<String, Value>) -> PipelineResult<MlPrediction> {
    let probabilities = get(obj, &["probabilities"])
        .and_then(Value::as_object)
        .ok_or_else(|| err("missing ml probabilities"))?;

    Ok(MlPrediction {
        sentiment: sentiment_of(obj, "ml sentiment")?,
        confidence: number(obj, &["confidence"], "ml confidence")?,
        probabilities: Probabilities {
            positive: number_ci(probabilities, "positive", "ml positive probability")?,
            negative: number_ci(probabilities, "negative", "ml negative probability")?,
            neutral: number_ci(probabilities, "neutral", "ml neutral probability")?,
        },
    })
}

fn normalize_vader(obj: &Map<String, Value>) -> PipelineResult<VaderAnalysis> {
    // Remote nests the numbers under `scores` with short keys; the canonical
    // form keeps them flat with long keys. Read from whichever is present.
    let scores = get(obj, &["scores"]).and_then(Value::as_object).unwrap_or(obj);

    Ok(VaderAnalysis {
        sentiment: sentiment_of(obj, "vader sentiment")?,
        compound: number(scores, &["compound"], "vader compound")?,
        positive: number(scores, &["positive", "pos"], "vader positive")?,
        negative: number(scores, &["negative", "neg"], "vader negative")?,
        neutral: number(scores, &["neutral", "neu"], "vader neutral")?,
    })
}

fn normalize_textblob(obj: &Map<String, Value>) -> PipelineResult<TextBlobAnalysis> {
    Ok(TextBlobAnalysis {
        sentiment: sentiment_of(obj, "textblob sentiment")?,
        polarity: number(obj, &["polarity"], "textblob polarity")?,
        subjectivity: number(obj, &["subjectivity"], "textblob subjectivity")?,
    })
}

/// First value present under any of the candidate key names
fn get<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key))
}

fn get_str<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    get(obj, keys).and_then(Value::as_str)
}

fn get_count(obj: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    get(obj, keys).and_then(coerce_f64).map(|n| n.max(0.0) as u64)
}

fn section<'a>(
    obj: &'a Map<String, Value>,
    keys: &[&str],
) -> PipelineResult<&'a Map<String, Value>> {
    get(obj, keys)
        .and_then(Value::as_object)
        .ok_or_else(|| err(&format!("missing `{}` section", keys[0])))
}

/// Required numeric field, under any of the candidate key names
fn number(obj: &Map<String, Value>, keys: &[&str], label: &str) -> PipelineResult<f64> {
    get(obj, keys)
        .and_then(coerce_f64)
        .ok_or_else(|| err(&format!("missing or non-numeric {}", label)))
}

/// Required numeric field looked up case-insensitively (remote emits
/// capitalized probability keys)
fn number_ci(obj: &Map<String, Value>, key: &str, label: &str) -> PipelineResult<f64> {
    obj.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .and_then(|(_, v)| coerce_f64(v))
        .ok_or_else(|| err(&format!("missing or non-numeric {}", label)))
}

fn sentiment_of(obj: &Map<String, Value>, label: &str) -> PipelineResult<Sentiment> {
    let raw = get_str(obj, &["sentiment"]).ok_or_else(|| err(&format!("missing {}", label)))?;
    Sentiment::parse(raw).ok_or_else(|| err(&format!("unrecognized {}: {:?}", label, raw)))
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn err(detail: &str) -> PipelineError {
    PipelineError::Normalize(detail.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::fallback;
    use super::super::types::{AnalysisRequest, sample_result};
    use super::*;

    fn remote_shape() -> Value {
        json!({
            "input_text": "He restores my soul.",
            "cleaned_text": "restores soul",
            "word_count": 4,
            "char_count": 20,
            "avg_word_length": 5.0,
            "ml_prediction": {
                "sentiment": "Positive",
                "confidence": 0.92,
                "probabilities": { "Positive": 0.92, "Negative": 0.03, "Neutral": 0.05 }
            },
            "vader_analysis": {
                "sentiment": "Positive",
                "scores": { "compound": 0.7845, "pos": 0.312, "neu": 0.688, "neg": 0.0 }
            },
            "textblob_analysis": {
                "sentiment": "Neutral",
                "polarity": 0.15,
                "subjectivity": 0.35
            }
        })
    }

    #[test]
    fn test_remote_shape_maps_to_canonical() {
        let result = normalize(&remote_shape()).unwrap();
        assert_eq!(result.input_text, "He restores my soul.");
        assert_eq!(result.word_count, 4);
        assert_eq!(result.char_count, 20);
        assert_eq!(result.ml_prediction.sentiment, Sentiment::Positive);
        assert_eq!(result.ml_prediction.probabilities.positive, 0.92);
        assert_eq!(result.vader_analysis.positive, 0.312);
        assert_eq!(result.vader_analysis.neutral, 0.688);
        assert_eq!(result.vader_analysis.compound, 0.7845);
        assert_eq!(result.textblob_analysis.sentiment, Sentiment::Neutral);
        assert!(!result.demo_mode);
        assert!(!result.id.is_empty());
    }

    #[test]
    fn test_distributions_sum_to_one_on_both_paths() {
        let remote = normalize(&remote_shape()).unwrap();
        let request = AnalysisRequest::Text {
            text: "He leads me beside still waters.".to_string(),
        };
        let demo = normalize(&fallback::generate(&request)).unwrap();

        for result in [remote, demo] {
            let p = &result.ml_prediction.probabilities;
            assert!((p.positive + p.negative + p.neutral - 1.0).abs() < 1e-6);
            let v = &result.vader_analysis;
            assert!((v.positive + v.negative + v.neutral - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_fallback_path_is_marked_demo() {
        let request = AnalysisRequest::Text {
            text: "He leads me in paths of righteousness.".to_string(),
        };
        let result = normalize(&fallback::generate(&request)).unwrap();
        assert!(result.demo_mode);
        assert_eq!(result.word_count, 7);
    }

    #[test]
    fn test_canonical_form_is_a_no_op() {
        let original = sample_result();
        let value = serde_json::to_value(&original).unwrap();
        let renormalized = normalize(&value).unwrap();
        assert_eq!(renormalized, original);
    }

    #[test]
    fn test_missing_input_text_fails() {
        let raw = json!({ "word_count": 3 });
        let err = normalize(&raw).unwrap_err();
        assert_eq!(err.kind(), "NORMALIZATION_FAILED");
        assert!(err.to_string().contains("input text"));
    }

    #[test]
    fn test_non_numeric_required_field_fails() {
        let mut raw = remote_shape();
        raw["ml_prediction"]["confidence"] = json!("very");
        assert!(normalize(&raw).is_err());
    }

    #[test]
    fn test_numeric_strings_coerce() {
        let mut raw = remote_shape();
        raw["ml_prediction"]["confidence"] = json!("0.92");
        let result = normalize(&raw).unwrap();
        assert_eq!(result.ml_prediction.confidence, 0.92);
    }

    #[test]
    fn test_unknown_sentiment_label_fails() {
        let mut raw = remote_shape();
        raw["textblob_analysis"]["sentiment"] = json!("ambivalent");
        assert!(normalize(&raw).is_err());
    }

    #[test]
    fn test_missing_counts_recomputed_from_input() {
        let mut raw = remote_shape();
        raw.as_object_mut().unwrap().remove("word_count");
        raw.as_object_mut().unwrap().remove("char_count");
        raw.as_object_mut().unwrap().remove("cleaned_text");
        let result = normalize(&raw).unwrap();
        assert_eq!(result.word_count, 4);
        assert_eq!(result.char_count, 20);
        assert_eq!(result.cleaned_text, "restores soul");
    }
}
