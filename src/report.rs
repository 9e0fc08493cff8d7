//! Batch evaluation over a directory of reviews.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::Sentiment;
use crate::corpus::{RatingConvention, RawDocument};
use crate::engine::Engine;
use crate::error::SentimentResult;
use crate::model::Label;

/// Classification of one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileResult {
    pub file: String,
    pub sentiment: Sentiment,
    /// Label implied by the file name, if it carries a top/bottom rating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Label>,
}

impl FileResult {
    /// `Some(true/false)` when the file has an expected label.
    pub fn is_correct(&self) -> Option<bool> {
        match self.expected? {
            Label::Positive => Some(self.sentiment == Sentiment::Positive),
            Label::Negative => Some(self.sentiment == Sentiment::Negative),
            Label::Other => None,
        }
    }
}

/// Per-file results plus per-label totals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvaluationReport {
    pub results: Vec<FileResult>,
    pub counts: BTreeMap<Sentiment, usize>,
}

impl EvaluationReport {
    pub fn count(&self, sentiment: Sentiment) -> usize {
        self.counts.get(&sentiment).copied().unwrap_or(0)
    }

    /// Share of labeled files classified as their label; neutral counts as a miss.
    pub fn accuracy(&self) -> Option<f64> {
        let judged: Vec<bool> = self.results.iter().filter_map(FileResult::is_correct).collect();
        if judged.is_empty() {
            return None;
        }
        let hits = judged.iter().filter(|ok| **ok).count();
        Some(hits as f64 / judged.len() as f64)
    }
}

impl std::fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} test reviews.", self.results.len())?;
        writeln!(f)?;
        writeln!(f, "File Classifications:")?;
        for r in &self.results {
            writeln!(f, "{}: {}", r.file, r.sentiment)?;
        }
        writeln!(f)?;
        writeln!(f, "Results Summary:")?;
        for sentiment in Sentiment::ALL {
            writeln!(f, "{sentiment}: {}", self.count(sentiment))?;
        }
        if let Some(acc) = self.accuracy() {
            writeln!(f, "accuracy on rated files: {:.2}%", acc * 100.0)?;
        }
        Ok(())
    }
}

/// Classify every document (in parallel) and tally the outcome.
pub fn evaluate(
    engine: &Engine,
    documents: &[RawDocument],
    convention: &RatingConvention,
) -> SentimentResult<EvaluationReport> {
    let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
    let sentiments = engine.classify_batch(&texts)?;

    let mut report = EvaluationReport::default();
    for (doc, sentiment) in documents.iter().zip(sentiments) {
        *report.counts.entry(sentiment).or_insert(0) += 1;
        let expected = match convention.label_for(&doc.name) {
            Label::Other => None,
            label => Some(label),
        };
        report.results.push(FileResult {
            file: doc.name.clone(),
            sentiment,
            expected,
        });
    }

    tracing::info!(
        documents = report.results.len(),
        positive = report.count(Sentiment::Positive),
        negative = report.count(Sentiment::Negative),
        neutral = report.count(Sentiment::Neutral),
        "evaluation complete"
    );
    Ok(report)
}
