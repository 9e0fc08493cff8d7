//! Frequency model: per-class word tables and corpus counters.
//!
//! A [`ModelArtifact`] is produced once by [`Trainer::train`] (or decoded by
//! the [`store`](crate::store)) and is read-only afterwards. It fully
//! determines classifier behavior; tokenizer rules and decision thresholds
//! live in code and configuration, not in the artifact.

pub mod train;
pub mod weighting;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use train::{LabeledDocument, Trainer};
pub use weighting::WeightingPolicy;

/// Training label resolved by the corpus collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Negative,
    /// Neither top- nor bottom-rated; ignored by training.
    Other,
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Other => write!(f, "other"),
        }
    }
}

// ── WordFrequencyTable ─────────────────────────────────────────────────────

/// Lowercase token → accumulated weight for one class.
///
/// Values are integral under uniform weighting and fractional under the
/// weighted policy. Keys are never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordFrequencyTable {
    counts: HashMap<String, f64>,
}

impl WordFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated weight of `token`, `0.0` when never seen.
    pub fn get(&self, token: &str) -> f64 {
        self.counts.get(token).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.counts.contains_key(token)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Sum of all values; equals the class word mass on a consistent model.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    /// The `n` heaviest tokens, heaviest first, ties broken alphabetically.
    pub fn top(&self, n: usize) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }

    /// Add `weight` to an already-lowercased token.
    pub(crate) fn add(&mut self, token: String, weight: f64) {
        *self.counts.entry(token).or_insert(0.0) += weight;
    }
}

impl FromIterator<(String, f64)> for WordFrequencyTable {
    /// Build a table from raw pairs; keys are lowercased and duplicates summed.
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (token, weight) in iter {
            table.add(token.to_lowercase(), weight);
        }
        table
    }
}

// ── CorpusStatistics ───────────────────────────────────────────────────────

/// The four scalar counters of a trained model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusStatistics {
    pub positive_docs: u64,
    pub negative_docs: u64,
    /// Sum of weighted token contributions to the positive class.
    pub positive_word_mass: f64,
    /// Sum of weighted token contributions to the negative class.
    pub negative_word_mass: f64,
}

impl CorpusStatistics {
    pub fn total_docs(&self) -> u64 {
        self.positive_docs + self.negative_docs
    }
}

// ── ModelArtifact ──────────────────────────────────────────────────────────

/// The persisted unit: two word tables and four counters.
///
/// Field order is the persisted tuple order: positive words, negative words,
/// positive docs, negative docs, positive word mass, negative word mass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    positive_words: WordFrequencyTable,
    negative_words: WordFrequencyTable,
    num_positive_docs: u64,
    num_negative_docs: u64,
    num_positive_words: f64,
    num_negative_words: f64,
}

impl ModelArtifact {
    /// Assemble an artifact from its parts.
    pub fn from_parts(
        positive_words: WordFrequencyTable,
        negative_words: WordFrequencyTable,
        stats: CorpusStatistics,
    ) -> Self {
        Self {
            positive_words,
            negative_words,
            num_positive_docs: stats.positive_docs,
            num_negative_docs: stats.negative_docs,
            num_positive_words: stats.positive_word_mass,
            num_negative_words: stats.negative_word_mass,
        }
    }

    /// Split the artifact back into its parts.
    pub fn into_parts(self) -> (WordFrequencyTable, WordFrequencyTable, CorpusStatistics) {
        let stats = self.statistics();
        (self.positive_words, self.negative_words, stats)
    }

    pub fn positive_words(&self) -> &WordFrequencyTable {
        &self.positive_words
    }

    pub fn negative_words(&self) -> &WordFrequencyTable {
        &self.negative_words
    }

    /// Word table for a training label; `None` for [`Label::Other`].
    pub fn words(&self, label: Label) -> Option<&WordFrequencyTable> {
        match label {
            Label::Positive => Some(&self.positive_words),
            Label::Negative => Some(&self.negative_words),
            Label::Other => None,
        }
    }

    pub fn statistics(&self) -> CorpusStatistics {
        CorpusStatistics {
            positive_docs: self.num_positive_docs,
            negative_docs: self.num_negative_docs,
            positive_word_mass: self.num_positive_words,
            negative_word_mass: self.num_negative_words,
        }
    }

    /// Whether at least one class has a document, i.e. priors are defined.
    pub fn is_trained(&self) -> bool {
        self.num_positive_docs + self.num_negative_docs > 0
    }

    /// Absolute difference between each table's sum and its stored word mass.
    pub fn mass_drift(&self) -> (f64, f64) {
        (
            (self.positive_words.total() - self.num_positive_words).abs(),
            (self.negative_words.total() - self.num_negative_words).abs(),
        )
    }

    /// Structural checks applied to decoded artifacts.
    ///
    /// Keys must be lowercase, every weight finite and non-negative.
    pub fn validate_shape(&self) -> Result<(), String> {
        for (class, table, mass) in [
            ("positive", &self.positive_words, self.num_positive_words),
            ("negative", &self.negative_words, self.num_negative_words),
        ] {
            if !mass.is_finite() || mass < 0.0 {
                return Err(format!("{class} word mass {mass} is not a non-negative number"));
            }
            for (token, weight) in table.iter() {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(format!("{class} weight for {token:?} is {weight}"));
                }
                if token.to_lowercase() != token {
                    return Err(format!("{class} key {token:?} is not lowercase"));
                }
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            positive_docs: self.num_positive_docs,
            negative_docs: self.num_negative_docs,
            positive_vocabulary: self.positive_words.len(),
            negative_vocabulary: self.negative_words.len(),
            positive_word_mass: self.num_positive_words,
            negative_word_mass: self.num_negative_words,
        }
    }
}

/// Human- and JSON-friendly overview of a model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub positive_docs: u64,
    pub negative_docs: u64,
    pub positive_vocabulary: usize,
    pub negative_vocabulary: usize,
    pub positive_word_mass: f64,
    pub negative_word_mass: f64,
}

impl std::fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "documents:   {} positive, {} negative", self.positive_docs, self.negative_docs)?;
        writeln!(
            f,
            "vocabulary:  {} positive, {} negative",
            self.positive_vocabulary, self.negative_vocabulary
        )?;
        write!(
            f,
            "word mass:   {:.1} positive, {:.1} negative",
            self.positive_word_mass, self.negative_word_mass
        )
    }
}
