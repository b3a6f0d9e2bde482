//! Sentiment-analysis result pipeline: remote gateway with local fallback,
//! result normalization, consensus scoring, and multi-format export.

pub mod analysis;
pub mod error;
pub mod export;
