//! Tabular export: (metric, value) rows over the canonical record.

use crate::analysis::types::AnalysisResult;

/// Flatten the record into (metric, value) pairs. Numbers keep their plain
/// decimal display form; rounding is left to consumers.
pub fn rows(result: &AnalysisResult) -> Vec<(String, String)> {
    let ml = &result.ml_prediction;
    let vader = &result.vader_analysis;
    let textblob = &result.textblob_analysis;

    vec![
        ("ID".to_string(), result.id.clone()),
        ("Word Count".to_string(), result.word_count.to_string()),
        ("Character Count".to_string(), result.char_count.to_string()),
        ("ML Sentiment".to_string(), ml.sentiment.to_string()),
        ("ML Confidence".to_string(), ml.confidence.to_string()),
        ("ML Positive Prob".to_string(), ml.probabilities.positive.to_string()),
        ("ML Negative Prob".to_string(), ml.probabilities.negative.to_string()),
        ("ML Neutral Prob".to_string(), ml.probabilities.neutral.to_string()),
        ("VADER Sentiment".to_string(), vader.sentiment.to_string()),
        ("VADER Compound".to_string(), vader.compound.to_string()),
        ("VADER Positive".to_string(), vader.positive.to_string()),
        ("VADER Negative".to_string(), vader.negative.to_string()),
        ("VADER Neutral".to_string(), vader.neutral.to_string()),
        ("TextBlob Sentiment".to_string(), textblob.sentiment.to_string()),
        ("TextBlob Polarity".to_string(), textblob.polarity.to_string()),
        ("TextBlob Subjectivity".to_string(), textblob.subjectivity.to_string()),
    ]
}

/// Encode the rows as CSV text with a `Metric,Value` header
pub fn encode(result: &AnalysisResult) -> String {
    let mut out = String::from("Metric,Value\n");
    for (metric, value) in rows(result) {
        out.push_str(&escape(&metric));
        out.push(',');
        out.push_str(&escape(&value));
        out.push('\n');
    }
    out
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
