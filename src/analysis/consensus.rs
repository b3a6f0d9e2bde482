//! Majority-vote verdict across the three model opinions.

use serde::{Deserialize, Serialize};

use super::types::{AnalysisResult, Sentiment};

/// Verdict derived from the three per-model labels
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Consensus {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl Consensus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for Consensus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Majority vote over three labels. Any label held by at least two of the
/// three opinions wins; three pairwise-distinct labels yield `Mixed`.
/// Pure and order-independent, no confidence weighting.
pub fn consensus(a: Sentiment, b: Sentiment, c: Sentiment) -> Consensus {
    let tally = |label| [a, b, c].iter().filter(|&&s| s == label).count();

    if tally(Sentiment::Positive) >= 2 {
        Consensus::Positive
    } else if tally(Sentiment::Negative) >= 2 {
        Consensus::Negative
    } else if tally(Sentiment::Neutral) >= 2 {
        Consensus::Neutral
    } else {
        Consensus::Mixed
    }
}

impl AnalysisResult {
    /// Majority-vote verdict across the three embedded model labels
    pub fn consensus(&self) -> Consensus {
        consensus(
            self.ml_prediction.sentiment,
            self.vader_analysis.sentiment,
            self.textblob_analysis.sentiment,
        )
    }

    /// (positive, negative, neutral) tally of the three model labels
    pub fn label_tally(&self) -> (usize, usize, usize) {
        let labels = [
            self.ml_prediction.sentiment,
            self.vader_analysis.sentiment,
            self.textblob_analysis.sentiment,
        ];
        let count = |label| labels.iter().filter(|&&s| s == label).count();
        (
            count(Sentiment::Positive),
            count(Sentiment::Negative),
            count(Sentiment::Neutral),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::sample_result;
    use super::*;

    const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    #[test]
    fn test_unanimous_labels_win() {
        assert_eq!(
            consensus(Sentiment::Positive, Sentiment::Positive, Sentiment::Positive),
            Consensus::Positive
        );
        assert_eq!(
            consensus(Sentiment::Negative, Sentiment::Negative, Sentiment::Negative),
            Consensus::Negative
        );
        assert_eq!(
            consensus(Sentiment::Neutral, Sentiment::Neutral, Sentiment::Neutral),
            Consensus::Neutral
        );
    }

    #[test]
    fn test_two_against_one() {
        assert_eq!(
            consensus(Sentiment::Positive, Sentiment::Positive, Sentiment::Negative),
            Consensus::Positive
        );
        assert_eq!(
            consensus(Sentiment::Neutral, Sentiment::Negative, Sentiment::Neutral),
            Consensus::Neutral
        );
    }

    #[test]
    fn test_three_distinct_labels_are_mixed() {
        assert_eq!(
            consensus(Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral),
            Consensus::Mixed
        );
    }

    #[test]
    fn test_symmetric_under_permutation() {
        for &a in &ALL {
            for &b in &ALL {
                for &c in &ALL {
                    let expected = consensus(a, b, c);
                    assert_eq!(consensus(a, c, b), expected);
                    assert_eq!(consensus(b, a, c), expected);
                    assert_eq!(consensus(b, c, a), expected);
                    assert_eq!(consensus(c, a, b), expected);
                    assert_eq!(consensus(c, b, a), expected);
                }
            }
        }
    }

    #[test]
    fn test_output_is_total_over_all_combinations() {
        for &a in &ALL {
            for &b in &ALL {
                for &c in &ALL {
                    let verdict = consensus(a, b, c);
                    assert!(matches!(
                        verdict,
                        Consensus::Positive
                            | Consensus::Negative
                            | Consensus::Neutral
                            | Consensus::Mixed
                    ));
                }
            }
        }
    }

    #[test]
    fn test_record_consensus_uses_embedded_labels() {
        // ml positive, vader positive, textblob negative
        let result = sample_result();
        assert_eq!(result.consensus(), Consensus::Positive);
        assert_eq!(result.label_tally(), (2, 1, 0));
    }
}
